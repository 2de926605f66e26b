use std::thread;

use connect_four::ai::{create_strategy, Decision, Difficulty, MonteCarloArrayAi, StrategyKind};
use connect_four::game::{
    parse_grid, AnyBoard, ArrayBoard, Board, BoardKind, CellState, GraphBoard, Grid, Side,
};

const DRAWN: &str = "
    XXXOXXX
    XXXOXXX
    OOOXOOO
    OOOXOOO
    XXXOXXX
    XXXOXXX
";

fn swap_sides(grid: Grid) -> Grid {
    grid.map(|row| {
        row.map(|cell| match cell {
            CellState::Player => CellState::Opponent,
            CellState::Opponent => CellState::Player,
            CellState::Empty => CellState::Empty,
        })
    })
}

#[test]
fn vertical_four_wins_on_both_boards() {
    for kind in [BoardKind::Array, BoardKind::Graph] {
        let mut board = AnyBoard::new(kind);
        for turn in 0..4 {
            let pos = board.apply_move(0, Side::Player).unwrap();
            if turn < 3 {
                assert!(!board.has_winner());
                board.apply_move(6, Side::Opponent).unwrap();
            } else {
                assert!(board.check_victory(pos.row, pos.col));
            }
        }
        assert!(board.has_winner());
        assert_eq!(board.winner(), Some(Side::Player));
    }
}

#[test]
fn drawn_board_has_no_winner_and_scores_zero() {
    let grid = parse_grid(DRAWN).unwrap();
    for kind in [BoardKind::Array, BoardKind::Graph] {
        let board = AnyBoard::from_grid(kind, grid);
        assert!(board.is_full());
        assert!(!board.has_winner());
        assert!(board.available_columns().is_empty());
        assert_eq!(board.evaluate(Side::Player), 0);
        assert_eq!(board.evaluate(Side::Opponent), 0);
    }
}

#[test]
fn cloned_board_is_independent() {
    let mut original = GraphBoard::new();
    original.apply_move(3, Side::Player).unwrap();
    let mut copy = original.clone();
    copy.apply_move(3, Side::Opponent).unwrap();
    copy.apply_move(4, Side::Player).unwrap();

    assert_eq!(original.cell(4, 3), CellState::Empty);
    assert_eq!(original.cell(5, 4), CellState::Empty);
    assert_eq!(copy.cell(4, 3), CellState::Opponent);
    assert_eq!(original.available_columns().len(), 7);
}

#[test]
fn evaluation_mirrors_when_stones_swap() {
    let positions = [
        "
        .......
        .......
        .......
        ...O...
        ..XXO..
        .OXXXO.
        ",
        "
        .......
        .......
        ..O....
        ..XO...
        .XXOX..
        OXOXOX.
        ",
        "
        .......
        .......
        .......
        .......
        .......
        OOO.XX.
        ",
    ];
    for text in positions {
        let grid = parse_grid(text).unwrap();
        let swapped = swap_sides(grid);
        for kind in [BoardKind::Array, BoardKind::Graph] {
            let board = AnyBoard::from_grid(kind, grid);
            let mirror = AnyBoard::from_grid(kind, swapped);
            assert_eq!(board.evaluate(Side::Player), mirror.evaluate(Side::Opponent));
            assert_eq!(board.evaluate(Side::Opponent), mirror.evaluate(Side::Player));
        }
    }
}

#[test]
fn representations_agree_on_rules() {
    let mut array = ArrayBoard::new();
    let mut graph = GraphBoard::new();
    let moves = [3, 3, 2, 4, 2, 2, 5, 6, 1, 0, 4, 4];
    let mut side = Side::Player;
    for col in moves {
        assert_eq!(array.apply_move(col, side), graph.apply_move(col, side));
        assert_eq!(array.grid(), graph.grid());
        assert_eq!(array.has_winner(), graph.has_winner());
        assert_eq!(array.available_columns(), graph.available_columns());
        side = side.other();
    }
}

#[test]
fn every_strategy_takes_an_open_win() {
    for kind in StrategyKind::ALL {
        let mut board = AnyBoard::new(kind.board_kind());
        for col in 0..3 {
            board.apply_move(col, Side::Opponent).unwrap();
            board.apply_move(col, Side::Player).unwrap();
        }
        let mut ai = create_strategy(kind, Side::Opponent, Difficulty::Easy);
        let before = board.clone();
        let report = ai.search(&board).unwrap();
        assert_eq!(report.column, Some(3), "{kind}");
        assert_eq!(board, before);
    }
}

#[test]
fn strategy_rejects_the_other_board() {
    for kind in StrategyKind::ALL {
        let mut ai = create_strategy(kind, Side::Player, Difficulty::Easy);
        let other = match kind.board_kind() {
            BoardKind::Array => AnyBoard::new(BoardKind::Graph),
            BoardKind::Graph => AnyBoard::new(BoardKind::Array),
        };
        assert!(ai.search(&other).is_err(), "{kind}");
    }
}

#[test]
fn report_serializes_to_json() {
    let mut ai = create_strategy(StrategyKind::MinimaxArray, Side::Player, Difficulty::Easy);
    let report = ai.search(&AnyBoard::new(BoardKind::Array)).unwrap();
    assert_eq!(report.decision, Decision::Search);

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["decision"], "search");
    assert_eq!(value["scores"].as_array().unwrap().len(), 7);
    assert_eq!(value["column"], report.column.unwrap());
}

#[test]
fn engines_run_on_separate_threads() {
    let (minimax, monte_carlo) = thread::scope(|scope| {
        let minimax = scope.spawn(|| {
            let mut ai = create_strategy(StrategyKind::MinimaxGraph, Side::Player, Difficulty::Medium);
            let mut board = AnyBoard::new(BoardKind::Graph);
            board.apply_move(3, Side::Opponent).unwrap();
            ai.choose_move(&board).unwrap()
        });
        let monte_carlo = scope.spawn(|| {
            let mut ai = MonteCarloArrayAi::new(Side::Opponent, Difficulty::Easy).with_seed(17);
            let mut board = ArrayBoard::new();
            board.apply_move(3, Side::Player).unwrap();
            ai.search_board(&board).column
        });
        (minimax.join().unwrap(), monte_carlo.join().unwrap())
    });

    assert!(minimax.is_some_and(|col| col < 7));
    assert!(monte_carlo.is_some_and(|col| col < 7));
}
