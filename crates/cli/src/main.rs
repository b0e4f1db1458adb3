// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use std::{path::PathBuf, time::Duration};

use headsup_cli::{Config, replay, strategy::StrategyKind};
use headsup_core::{game::Match, poker::Chips};

/// Largest small blind, 100 blinds per seat must fit the match total.
const MAX_BLIND: i64 = 10_000_000;

/// Largest starting stack, both stacks must fit the match total.
const MAX_STACK: i64 = 2_000_000_000;

#[derive(Debug, Parser)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plays matches between two automated seats.
    Play {
        /// The small blind.
        #[clap(long, short, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=MAX_BLIND))]
        blind: u32,
        /// The starting stack, defaults to 100 small blinds.
        #[clap(long, short, value_parser = clap::value_parser!(u32).range(1..=MAX_STACK))]
        stack: Option<u32>,
        /// Number of matches to play.
        #[clap(long, short, default_value_t = 1)]
        matches: u32,
        /// Maximum number of hands per match.
        #[clap(long, default_value_t = 1_000)]
        max_hands: u32,
        /// Seat 0 strategy.
        #[clap(long, value_enum, default_value = "random")]
        seat0: StrategyKind,
        /// Seat 1 strategy.
        #[clap(long, value_enum, default_value = "passive")]
        seat1: StrategyKind,
        /// Seed for a reproducible run.
        #[clap(long)]
        seed: Option<u64>,
        /// Milliseconds a seat has to act before it is folded.
        #[clap(long, default_value_t = 50)]
        timeout: u64,
        /// Directory where to save the match logs.
        #[clap(long, short)]
        output: Option<PathBuf>,
    },
    /// Prints a saved match log.
    Replay {
        /// The match log path.
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Play {
            blind,
            stack,
            matches,
            max_hands,
            seat0,
            seat1,
            seed,
            timeout,
            output,
        } => {
            let blind = Chips::new(blind);
            let config = Config {
                blind,
                stack: stack.map_or(blind * Match::STARTING_BLINDS, Chips::new),
                matches,
                max_hands,
                strategies: [seat0, seat1],
                seed,
                timeout: Duration::from_millis(timeout),
                output,
            };

            let summary = headsup_cli::run(config)?;
            info!(
                "Wins {} {}, unfinished {}, hands {}",
                summary.wins[0], summary.wins[1], summary.unfinished, summary.hands
            );
        }
        Command::Replay { path } => {
            for line in replay::replay_file(&path)? {
                println!("{line}");
            }
        }
    }

    Ok(())
}
