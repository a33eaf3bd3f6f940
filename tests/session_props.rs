use std::collections::HashSet;

use battleship_arena::{
    Catalog, Cell, GameSession, MoveKind, Orientation, SessionConfig, SessionError, Slot,
    BOARD_SIZE,
};
use proptest::prelude::*;

fn started_session() -> GameSession {
    let mut session = GameSession::new();
    session.join().unwrap();
    session.join().unwrap();
    session
}

/// Cells holding a ship on the board of `slot`.
fn ship_cells(session: &GameSession, slot: Slot) -> Vec<(usize, usize)> {
    let board = session.board(slot).unwrap();
    (0..BOARD_SIZE)
        .flat_map(|x| (0..BOARD_SIZE).map(move |y| (x, y)))
        .filter(|&(x, y)| board.cell(x, y) == Some(Cell::Ship))
        .collect()
}

/// Cells without a ship on the board of `slot`.
fn water_cells(session: &GameSession, slot: Slot) -> Vec<(usize, usize)> {
    let board = session.board(slot).unwrap();
    (0..BOARD_SIZE)
        .flat_map(|x| (0..BOARD_SIZE).map(move |y| (x, y)))
        .filter(|&(x, y)| board.cell(x, y) == Some(Cell::Empty))
        .collect()
}

fn orientation() -> impl Strategy<Value = Orientation> {
    prop_oneof![Just(Orientation::Horizontal), Just(Orientation::Vertical)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Admission never exceeds two slots.
    #[test]
    fn joins_never_exceed_two(attempts in 0usize..8) {
        let mut session = GameSession::new();
        for i in 0..attempts {
            let res = session.join();
            if i < 2 {
                prop_assert_eq!(res.unwrap().slot as usize, i);
            } else {
                prop_assert_eq!(res.unwrap_err(), SessionError::Full);
            }
            prop_assert!(session.players().len() <= 2);
        }
        prop_assert_eq!(session.players().len(), attempts.min(2));
    }

    /// Whatever manual placements were attempted first, the started match has
    /// one ship per catalog entry on each board, in bounds and disjoint.
    #[test]
    fn started_fleet_is_disjoint_and_in_bounds(
        attempts in prop::collection::vec(
            (0u8..2, 0usize..4, 0usize..BOARD_SIZE, 0usize..BOARD_SIZE, orientation()),
            0..12,
        )
    ) {
        let catalog = Catalog::standard();
        let mut session = GameSession::with_config(SessionConfig::manual_start());
        session.join().unwrap();
        session.join().unwrap();
        for (slot, ship, x, y, o) in attempts {
            let name = catalog.specs()[ship].name();
            let _ = session.place_ship(slot, name, x, y, o);
        }
        session.start_match().unwrap();

        for slot in 0..2 {
            let board = session.board(slot).unwrap();
            let mut lengths: Vec<_> = board.ships().iter().map(|s| s.length()).collect();
            lengths.sort_unstable();
            prop_assert_eq!(lengths, vec![1, 2, 3, 3]);

            let mut occupied = HashSet::new();
            for ship in board.ships() {
                prop_assert!(ship.in_bounds());
                for cell in ship.cells() {
                    prop_assert!(cell.0 < BOARD_SIZE && cell.1 < BOARD_SIZE);
                    prop_assert!(occupied.insert(cell), "overlap at {:?}", cell);
                }
            }
            prop_assert_eq!(occupied.len(), catalog.total_cells());
            let marked: HashSet<_> = ship_cells(&session, slot).into_iter().collect();
            prop_assert_eq!(marked, occupied);
        }
    }

    /// Correct-slot moves flip the turn unless they win; wrong-slot moves
    /// change nothing.
    #[test]
    fn turn_alternates(
        moves in prop::collection::vec((0u8..2, 0usize..BOARD_SIZE, 0usize..BOARD_SIZE), 0..40)
    ) {
        let mut session = started_session();
        for (slot, x, y) in moves {
            let before = session.state();
            let outcome = session.make_move(slot, x, y).unwrap();
            match outcome.kind {
                MoveKind::NotYourTurn { current } => {
                    prop_assert_ne!(slot, current);
                    prop_assert_eq!(session.state(), before);
                }
                MoveKind::Hit { .. } | MoveKind::Miss { .. } => {
                    prop_assert_eq!(slot, before.current_turn);
                    prop_assert_eq!(session.current_turn(), 1 - before.current_turn);
                }
                MoveKind::Win { winner, .. } => {
                    prop_assert_eq!(winner, slot);
                    prop_assert_eq!(session.current_turn(), before.current_turn);
                    break;
                }
                other => prop_assert!(false, "unexpected outcome {:?}", other),
            }
        }
    }

    /// Sinking every ship cell finishes the match exactly once, with the last
    /// hitter as winner, regardless of hit order and interleaved misses.
    #[test]
    fn win_detected_exactly_once(
        winner in 0u8..2,
        seed_order in Just((0..9usize).collect::<Vec<_>>()).prop_shuffle(),
        miss_offset in 0usize..16,
    ) {
        let mut session = started_session();
        let loser = 1 - winner;
        let targets = ship_cells(&session, loser);
        let water = water_cells(&session, winner);
        prop_assert_eq!(targets.len(), 9);

        if winner == 1 {
            let (x, y) = water[miss_offset % water.len()];
            session.make_move(0, x, y).unwrap();
        }

        let mut wins = 0;
        for (n, idx) in seed_order.iter().enumerate() {
            let (x, y) = targets[*idx];
            let outcome = session.make_move(winner, x, y).unwrap();
            if let Some(w) = outcome.winner() {
                prop_assert_eq!(w, winner);
                prop_assert_eq!(n, targets.len() - 1);
                wins += 1;
                break;
            }
            prop_assert!(outcome.is_hit());
            let (mx, my) = water[(miss_offset + n) % water.len()];
            let reply = session.make_move(loser, mx, my).unwrap();
            prop_assert_eq!(reply.kind, MoveKind::Miss { x: mx, y: my });
        }
        prop_assert_eq!(wins, 1);
        prop_assert_eq!(session.winner(), Some(winner));
        prop_assert!(!session.is_started());
    }

    /// Leaving, or moving after the match was decided, restores a fresh
    /// session.
    #[test]
    fn reset_restores_fresh_state(
        moves in prop::collection::vec((0u8..2, 0usize..BOARD_SIZE, 0usize..BOARD_SIZE), 0..30),
        leaver in 0u8..2,
    ) {
        let fresh = GameSession::new().state();
        let mut session = started_session();
        for (slot, x, y) in moves {
            session.make_move(slot, x, y).unwrap();
            if session.winner().is_some() {
                break;
            }
        }
        if session.winner().is_some() {
            let outcome = session.make_move(leaver, 0, 0).unwrap();
            let restarted = matches!(outcome.kind, MoveKind::Restarted { .. });
            prop_assert!(restarted);
        } else {
            session.leave(leaver).unwrap();
        }
        prop_assert_eq!(session.state(), fresh);
    }
}
