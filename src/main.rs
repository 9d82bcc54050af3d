//! Order & Chaos against the computer.
//!
//! ## Usage
//!
//! - `order-chaos` - Show a demo
//! - `order-chaos play` - Play interactively over the text protocol
//! - `order-chaos demo` - Let the computer play both sides

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use order_chaos::constants::{DEFAULT_SIZE, SUPPORTED_SIZES};
use order_chaos::game::{Game, Participant};
use order_chaos::policy::choose_move;
use order_chaos::session::{status_message, Session};

/// Order & Chaos: five in a row against the computer
#[derive(Parser)]
#[command(name = "order-chaos")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Board size
    #[arg(long, short, global = true, default_value_t = DEFAULT_SIZE, value_parser = parse_size)]
    size: usize,

    /// Seed for the random source (random when omitted)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the computer using text commands on stdin
    Play,
    /// Let the computer play both sides of one match
    Demo,
}

fn parse_size(s: &str) -> Result<usize, String> {
    let size: usize = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    if SUPPORTED_SIZES.contains(&size) {
        Ok(size)
    } else {
        Err(format!(
            "board size must be between {} and {}",
            SUPPORTED_SIZES.start(),
            SUPPORTED_SIZES.end()
        ))
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let rng = match cli.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };

    match cli.command {
        Some(Commands::Play) => {
            let mut session = Session::with_rng(cli.size, rng).context("failed to start match")?;
            session.run()
        }
        Some(Commands::Demo) | None => run_demo(cli.size, rng),
    }
}

fn run_demo(size: usize, mut rng: fastrand::Rng) -> anyhow::Result<()> {
    println!("Order & Chaos: computer vs computer\n");

    let mut game = Game::new(size, &mut rng).context("failed to start match")?;
    println!(
        "{size}x{size} board, human seat plays {}, computer plays {}\n",
        game.human_role(),
        game.computer_role()
    );

    while !game.status().is_over() {
        match game.turn() {
            Participant::Computer => {
                game.play_computer_turn(&mut rng)?;
            }
            Participant::Human => {
                // The policy only reads the board it is given, so a snapshot
                // serves for the human seat.
                let mut snapshot = game.board().clone();
                let Some(mv) = choose_move(&mut snapshot, game.human_role(), &mut rng) else {
                    break;
                };
                game.apply_move(Participant::Human, mv.point, mv.symbol)?;
            }
        }
        if let Some(mv) = game.last_move() {
            println!("{:>2}. {mv}", game.moves().len());
        }
    }

    println!("\n{}", game.board());
    if let Some(line) = game.winning_line() {
        println!("Winning line: {line:?}");
    }
    println!("{}", status_message(&game));
    Ok(())
}
