use battleship_arena::{
    Board, Catalog, Cell, Orientation, PlacementError, Shot, ShipSpec, BOARD_SIZE,
};

/// Cells of the standard fleet under row-major first-fit placement.
const STANDARD_CELLS: [(usize, usize); 9] = [
    (0, 0),
    (0, 1),
    (0, 2),
    (0, 3),
    (1, 3),
    (2, 3),
    (0, 4),
    (1, 4),
    (2, 4),
];

#[test]
fn test_first_fit_standard_layout() {
    let mut board = Board::new(&Catalog::standard());
    board.place_remaining().unwrap();
    assert!(board.is_fully_placed());

    let origins: Vec<_> = board
        .ships()
        .iter()
        .map(|s| (s.name(), s.origin(), s.orientation()))
        .collect();
    assert_eq!(
        origins,
        vec![
            ("Submarine", (0, 0), Orientation::Horizontal),
            ("Patrol Boat", (0, 1), Orientation::Horizontal),
            ("Destroyer", (0, 3), Orientation::Vertical),
            ("Carrier", (0, 4), Orientation::Vertical),
        ]
    );
    for (x, y) in STANDARD_CELLS {
        assert_eq!(board.cell(x, y), Some(Cell::Ship), "({}, {})", x, y);
    }
    assert_eq!(board.ship_cells_left(), STANDARD_CELLS.len());
}

#[test]
fn test_check_placement_bounds_and_overlap() {
    let mut board = Board::new(&Catalog::standard());
    assert_eq!(
        board.check_placement(3, 0, 3, Orientation::Horizontal),
        Err(PlacementError::OutOfBounds)
    );
    assert_eq!(
        board.check_placement(3, 3, 0, Orientation::Vertical),
        Err(PlacementError::OutOfBounds)
    );
    assert_eq!(
        board.check_placement(1, BOARD_SIZE, 0, Orientation::Horizontal),
        Err(PlacementError::OutOfBounds)
    );
    assert!(board.check_placement(3, 2, 2, Orientation::Horizontal).is_ok());

    board.place("Destroyer", 2, 2, Orientation::Horizontal).unwrap();
    assert_eq!(
        board.check_placement(3, 0, 3, Orientation::Vertical),
        Err(PlacementError::Overlap)
    );
    assert!(board.check_placement(2, 0, 1, Orientation::Vertical).is_ok());
}

#[test]
fn test_manual_place_consumes_inventory() {
    let mut board = Board::new(&Catalog::standard());
    assert_eq!(board.remaining("Carrier"), Some(1));

    let ship = board.place("Carrier", 4, 0, Orientation::Horizontal).unwrap();
    assert_eq!(ship.cells().collect::<Vec<_>>(), vec![(4, 0), (4, 1), (4, 2)]);
    assert_eq!(board.remaining("Carrier"), Some(0));

    assert_eq!(
        board.place("Carrier", 0, 0, Orientation::Horizontal),
        Err(PlacementError::NoneRemaining("Carrier".to_string()))
    );
    assert_eq!(
        board.place("Battleship", 0, 0, Orientation::Horizontal),
        Err(PlacementError::UnknownShip("Battleship".to_string()))
    );
    assert!(!board.is_fully_placed());
}

#[test]
fn test_place_remaining_keeps_manual_ships() {
    let mut board = Board::new(&Catalog::standard());
    board.place("Submarine", 4, 4, Orientation::Vertical).unwrap();
    board.place_remaining().unwrap();

    assert_eq!(board.ships().len(), 4);
    assert_eq!(board.ships()[0].origin(), (4, 4));
    // the patrol boat now takes the origin the submarine left free
    assert_eq!(board.ships()[1].origin(), (0, 0));
    assert_eq!(board.ship_cells_left(), 9);
}

#[test]
fn test_place_remaining_reports_no_room() {
    let catalog = Catalog::new(vec![ShipSpec::new("Barge", 5, 6)]);
    let mut board = Board::new(&catalog);
    assert_eq!(
        board.place_remaining(),
        Err(PlacementError::NoRoom("Barge".to_string()))
    );
}

#[test]
fn test_fire_marks_cells() {
    let mut board = Board::new(&Catalog::standard());
    board.place_remaining().unwrap();

    assert_eq!(board.fire(0, 0), Some(Shot::Hit));
    assert_eq!(board.cell(0, 0), Some(Cell::Hit));
    assert_eq!(board.fire(4, 4), Some(Shot::Miss));
    assert_eq!(board.cell(4, 4), Some(Cell::Miss));

    // repeated shots resolve as misses and keep the cell state
    assert_eq!(board.fire(0, 0), Some(Shot::Miss));
    assert_eq!(board.cell(0, 0), Some(Cell::Hit));
    assert_eq!(board.fire(4, 4), Some(Shot::Miss));

    assert_eq!(board.fire(5, 0), None);
    assert_eq!(board.fire(0, 5), None);
}

#[test]
fn test_all_sunk_after_every_ship_cell_hit() {
    let mut board = Board::new(&Catalog::standard());
    board.place_remaining().unwrap();
    for (i, (x, y)) in STANDARD_CELLS.iter().enumerate() {
        assert!(!board.all_sunk());
        board.fire(*x, *y).unwrap();
        assert_eq!(board.ship_cells_left(), STANDARD_CELLS.len() - i - 1);
    }
    assert!(board.all_sunk());
}

#[test]
fn test_view_matches_board() {
    let mut board = Board::new(&Catalog::standard());
    board.place_remaining().unwrap();
    board.fire(1, 3).unwrap();
    let view = board.view();
    assert_eq!(&view.cells, board.cells());
    assert_eq!(view.ships.len(), 4);
    assert_eq!(view.ships[2].name, "Destroyer");
    assert_eq!(view.cell(1, 3), Some(Cell::Hit));
    assert_eq!(view.ship_cells_left(), 8);
    assert_eq!(
        view.to_string().lines().next(),
        Some("# # # # #")
    );
}

#[test]
fn test_orientation_parse() {
    assert_eq!("horizontal".parse::<Orientation>(), Ok(Orientation::Horizontal));
    assert_eq!(" Vertical ".parse::<Orientation>(), Ok(Orientation::Vertical));
    assert_eq!("h".parse::<Orientation>(), Ok(Orientation::Horizontal));
    assert_eq!(
        "diagonal".parse::<Orientation>(),
        Err(PlacementError::BadOrientation("diagonal".to_string()))
    );
}

#[test]
fn test_standard_catalog() {
    let catalog = battleship_arena::Catalog::standard();
    assert_eq!(catalog.specs().len(), battleship_arena::NUM_SHIPS);
    assert_eq!(catalog.total_cells(), battleship_arena::TOTAL_SHIP_CELLS);
    let destroyer = catalog.specs().iter().find(|s| s.name() == "Destroyer");
    assert_eq!(destroyer.map(|s| s.length()), Some(3));
    assert_eq!(Board::new(&catalog).remaining("Battleship"), None);
}
