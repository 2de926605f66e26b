use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use connect_four::ai::{Difficulty, SearchReport, StrategyFactory, StrategyKind};
use connect_four::config::EngineConfig;
use connect_four::game::{parse_grid, AnyBoard, Board, Duel, GameOutcome, Side};

/// Connect Four decision engine.
#[derive(Parser)]
#[command(name = "connect-four", version, about = "Connect Four decision engine")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log search details to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the available strategies
    Strategies,

    /// Ask a strategy for its move on a position
    Choose {
        #[arg(long)]
        strategy: StrategyKind,

        #[arg(long, default_value = "medium")]
        difficulty: Difficulty,

        /// Columns played so far, Player first, e.g. 3,3,4
        #[arg(long, value_delimiter = ',', conflicts_with = "grid")]
        moves: Vec<usize>,

        /// Text grid file: six rows of `.`, `X` and `O`, top row first
        #[arg(long)]
        grid: Option<PathBuf>,

        /// Print the full search report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Play two strategies against each other
    Duel {
        /// Plays Player and moves first
        #[arg(long)]
        first: StrategyKind,

        /// Plays Opponent
        #[arg(long)]
        second: StrategyKind,

        #[arg(long, default_value = "hard")]
        difficulty: Difficulty,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => EngineConfig::load_or_default(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let factory = StrategyFactory::new(config);

    match cli.command {
        Command::Strategies => list_strategies(),
        Command::Choose {
            strategy,
            difficulty,
            moves,
            grid,
            json,
        } => choose(&factory, strategy, difficulty, &moves, grid, json),
        Command::Duel {
            first,
            second,
            difficulty,
        } => duel(&factory, first, second, difficulty),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn list_strategies() -> Result<()> {
    for kind in StrategyKind::ALL {
        println!(
            "{:<18} {:<6} {}",
            kind.name(),
            kind.board_kind().name(),
            kind.description()
        );
    }
    Ok(())
}

fn choose(
    factory: &StrategyFactory,
    kind: StrategyKind,
    difficulty: Difficulty,
    moves: &[usize],
    grid: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let board = match grid {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading grid {}", path.display()))?;
            let grid = parse_grid(&text).with_context(|| format!("parsing grid {}", path.display()))?;
            AnyBoard::from_grid(kind.board_kind(), grid)
        }
        None => replay(kind, moves)?,
    };

    if board.has_winner() {
        bail!("the position is already won");
    }
    let Some(side) = board.side_to_move() else {
        bail!("stone counts can't come from alternating play with Player first");
    };
    let mut engine = factory.create(kind, side, difficulty);
    let report = engine.search(&board)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{board}");
        print_report(engine.name(), difficulty, side, &report);
    }
    Ok(())
}

fn replay(kind: StrategyKind, moves: &[usize]) -> Result<AnyBoard> {
    let mut board = AnyBoard::new(kind.board_kind());
    let mut side = Side::Player;
    for (i, &col) in moves.iter().enumerate() {
        board
            .apply_move(col, side)
            .with_context(|| format!("move {} (column {col})", i + 1))?;
        if board.has_winner() && i + 1 < moves.len() {
            bail!("move {} ends the game, later moves are not allowed", i + 1);
        }
        side = side.other();
    }
    Ok(board)
}

fn print_report(name: &str, difficulty: Difficulty, side: Side, report: &SearchReport) {
    match report.column {
        Some(col) => println!(
            "{name} ({difficulty}) playing {}: column {col} ({:?})",
            side.name(),
            report.decision
        ),
        None => println!("{name} ({difficulty}) playing {}: no legal move", side.name()),
    }
    for entry in &report.scores {
        println!("  column {}: {:.3}", entry.column, entry.score);
    }
    if report.pruned > 0 {
        println!("  pruned branches: {}", report.pruned);
    }
    if report.rollouts > 0 {
        println!("  rollouts: {}", report.rollouts);
    }
}

fn duel(
    factory: &StrategyFactory,
    first: StrategyKind,
    second: StrategyKind,
    difficulty: Difficulty,
) -> Result<()> {
    let first_engine = factory.create(first, Side::Player, difficulty);
    let second_engine = factory.create(second, Side::Opponent, difficulty);
    let mut duel = Duel::new(first_engine, second_engine)?;

    while duel.outcome().is_none() {
        let side = duel.turn();
        if let Some(pos) = duel.step()? {
            println!("{:<8} -> column {}", side.name(), pos.col);
        }
    }

    println!("\n{}", duel.board());
    match duel.outcome() {
        Some(GameOutcome::Winner(Side::Player)) => println!("{first} wins as Player"),
        Some(GameOutcome::Winner(Side::Opponent)) => println!("{second} wins as Opponent"),
        Some(GameOutcome::Draw) | None => println!("draw"),
    }
    Ok(())
}
