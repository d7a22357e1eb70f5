//! Piece rotation and collision properties for every shape kind

use fruit_drop::core::pieces::{rotation_states, KICK_OFFSETS};
use fruit_drop::core::{fits, try_rotate, ActivePiece, Grid, PieceGenerator, SimpleRng};
use fruit_drop::types::{FruitType, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};

fn sorted_fruits(piece: &ActivePiece) -> Vec<FruitType> {
    let mut fruits: Vec<FruitType> = piece.cells().iter().map(|&(_, _, f)| f).collect();
    fruits.sort_by_key(|f| f.index());
    fruits
}

#[test]
fn test_rotation_preserves_fruit_multiset() {
    let mut generator = PieceGenerator::new(2024);
    for _ in 0..200 {
        let piece = generator.next_piece(7);
        let expected = sorted_fruits(&piece);

        let mut rotated = piece;
        for turn in 1..=8 {
            rotated = rotated.rotated_cw();
            assert_eq!(sorted_fruits(&rotated), expected, "{:?} turn {turn}", piece.kind);
        }
    }
}

#[test]
fn test_four_turns_return_to_start() {
    let mut generator = PieceGenerator::new(99);
    for _ in 0..100 {
        let piece = generator.next_piece(4);
        let mut rotated = piece;
        for _ in 0..4 {
            rotated = rotated.rotated_cw();
        }
        assert_eq!(rotated, piece);
    }
}

#[test]
fn test_half_turn_of_two_state_piece_reverses_fruits() {
    let fruits = [
        FruitType::Cherry,
        FruitType::Peach,
        FruitType::Orange,
        FruitType::Banana,
    ];
    let piece = ActivePiece::spawn(ShapeKind::I, fruits);
    assert_eq!(rotation_states(ShapeKind::I).len(), 2);

    let half = piece.rotated_cw().rotated_cw();
    assert_eq!(half.rotation, 0);
    assert_eq!(
        half.fruits,
        [
            FruitType::Banana,
            FruitType::Orange,
            FruitType::Peach,
            FruitType::Cherry
        ]
    );
}

#[test]
fn test_o_piece_is_rotation_fixed_point() {
    let fruits = [
        FruitType::Cherry,
        FruitType::Peach,
        FruitType::Orange,
        FruitType::Banana,
    ];
    let piece = ActivePiece {
        x: 4,
        y: 0,
        ..ActivePiece::spawn(ShapeKind::O, fruits)
    };

    let mut rotated = piece;
    for _ in 0..5 {
        rotated = rotated.rotated_cw();
        assert_eq!(rotated, piece);
    }
    assert_eq!(rotated.cells(), piece.cells());
}

#[test]
fn test_t_piece_kicks_left_off_wall() {
    let fruits = [FruitType::Melon; 4];
    let grid = Grid::new();
    // Vertical T hugging the right wall: its horizontal state is one column too wide.
    let mut piece = ActivePiece::spawn(ShapeKind::T, fruits).rotated_cw();
    piece.x = BOARD_WIDTH as i8 - piece.width() as i8;
    piece.y = 5;
    assert!(fits(&piece, &grid));

    let (rotated, kick) = try_rotate(&piece, |p| fits(p, &grid)).unwrap();
    assert_eq!(kick, (-1, 0));
    assert_eq!(rotated.x, piece.x - 1);
    assert_eq!(rotated.rotation, 2);
}

#[test]
fn test_spawn_is_centered_on_top_row() {
    for kind in ShapeKind::ALL {
        let piece = ActivePiece::spawn(kind, [FruitType::Cherry; 4]);
        assert_eq!(piece.y, 0);
        assert_eq!(piece.x, (BOARD_WIDTH as i8 - piece.width() as i8) / 2);
        assert!(fits(&piece, &Grid::new()), "{kind:?}");
    }
}

#[test]
fn test_accepted_positions_stay_in_bounds() {
    let grid = Grid::new();
    let mut rng = SimpleRng::new(7);
    let mut generator = PieceGenerator::new(7);

    for _ in 0..50 {
        let mut piece = generator.next_piece(1);
        for _ in 0..200 {
            let candidate = match rng.next_range(4) {
                0 => piece.translated(-1, 0),
                1 => piece.translated(1, 0),
                2 => piece.translated(0, 1),
                _ => match try_rotate(&piece, |p| fits(p, &grid)) {
                    Some((rotated, _)) => rotated,
                    None => piece,
                },
            };
            if !fits(&candidate, &grid) {
                continue;
            }
            piece = candidate;
            for (x, y, _) in piece.cells() {
                assert!((0..BOARD_WIDTH as i8).contains(&x), "{piece:?}");
                assert!(y < BOARD_HEIGHT as i8, "{piece:?}");
            }
        }
    }
}

#[test]
fn test_kick_offsets_are_never_zero() {
    assert!(KICK_OFFSETS.iter().all(|&k| k != (0, 0)));
}
