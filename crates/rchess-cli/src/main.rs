//! perft / divide コマンドラインツール
//!
//! 移動生成の検証と計測に使う。ノード数はstdoutへ、計測ログはlog経由で
//! stderrへ出す。

use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rchess_core::movegen;
use rchess_core::position::{Position, START_FEN};

#[derive(Parser)]
#[command(name = "rchess", version, about = "Bitboard chess move generator utilities")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Count the leaf nodes of the legal move tree
    Perft {
        /// Search depth
        #[arg(short, long, default_value_t = 5)]
        depth: u32,
        /// Position in FEN notation
        #[arg(short, long, default_value = START_FEN)]
        fen: String,
    },
    /// Show the subtree count below every root move
    Divide {
        /// Search depth
        #[arg(short, long, default_value_t = 2)]
        depth: u32,
        /// Position in FEN notation
        #[arg(short, long, default_value = START_FEN)]
        fen: String,
    },
}

fn main() -> Result<()> {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );

    let cli = Cli::parse();

    // 計測がテーブル構築込みにならないよう先に初期化しておく
    rchess_core::init_tables_once();

    match cli.command {
        Command::Perft { depth, fen } => {
            let mut pos =
                Position::from_fen(&fen).with_context(|| format!("invalid FEN: {fen}"))?;

            let start = Instant::now();
            let nodes = movegen::perft(&mut pos, depth);
            let elapsed = start.elapsed();

            log::info!(
                "perft({depth}) = {nodes} in {:.3}s ({:.1} Mnps)",
                elapsed.as_secs_f64(),
                nodes as f64 / elapsed.as_secs_f64() / 1e6,
            );
            println!("{nodes}");
        }

        Command::Divide { depth, fen } => {
            anyhow::ensure!(depth >= 1, "divide needs a depth of at least 1");

            let mut pos =
                Position::from_fen(&fen).with_context(|| format!("invalid FEN: {fen}"))?;

            let mut total = 0u64;
            for (mv, nodes) in movegen::divide(&mut pos, depth) {
                println!("{mv}: {nodes}");
                total += nodes;
            }
            println!("total: {total}");
        }
    }

    Ok(())
}
