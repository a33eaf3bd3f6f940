use battleship_arena::{ClientEvent, Dispatcher, ServerEvent, Slot, BOARD_SIZE};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde_json::json;

/// A random shooter that never fires twice at the same cell.
struct Shooter {
    rng: SmallRng,
    untried: Vec<(usize, usize)>,
    shots: usize,
    hits: usize,
}

impl Shooter {
    fn new(seed: u64) -> Self {
        let untried = (0..BOARD_SIZE)
            .flat_map(|x| (0..BOARD_SIZE).map(move |y| (x, y)))
            .collect();
        Self {
            rng: SmallRng::seed_from_u64(seed),
            untried,
            shots: 0,
            hits: 0,
        }
    }

    fn next_target(&mut self) -> Option<(usize, usize)> {
        if self.untried.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..self.untried.len());
        self.shots += 1;
        Some(self.untried.swap_remove(idx))
    }
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let mut dispatcher = Dispatcher::default();
    let mut shooters = [Shooter::new(seed1), Shooter::new(seed2)];

    for conn in 0..2 {
        dispatcher.handle(conn, ClientEvent::AddPlayer);
    }

    let mut winner: Option<Slot> = None;
    let mut moves = 0usize;
    while winner.is_none() {
        let slot = dispatcher.session().current_turn();
        let (x, y) = shooters[slot as usize]
            .next_target()
            .ok_or_else(|| anyhow::anyhow!("player {} ran out of targets", slot))?;
        moves += 1;
        for event in dispatcher.handle(slot as u64, ClientEvent::MakeMove { player_id: slot, x, y }) {
            match event {
                ServerEvent::MoveResult(outcome) if outcome.is_hit() => {
                    shooters[slot as usize].hits += 1;
                }
                ServerEvent::GameOver { winner: w } => winner = Some(w),
                ServerEvent::Error { message, .. } => return Err(anyhow::anyhow!(message)),
                _ => {}
            }
        }
    }

    let result = json!({
        "winner": winner.map(|w| format!("player{}", w)),
        "moves": moves,
        "player0": {"shots": shooters[0].shots, "hits": shooters[0].hits},
        "player1": {"shots": shooters[1].shots, "hits": shooters[1].hits},
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
