// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Prints a saved match log.
use anyhow::{Context, Result};
use std::{fs, path::Path};

use headsup_core::{
    history::EventLog,
    replay::{Snapshot, replay},
};

/// Reads a match log and returns one line for each event.
pub fn replay_file(path: &Path) -> Result<Vec<String>> {
    let buf = fs::read(path).with_context(|| format!("Cannot read {}", path.display()))?;
    let log = EventLog::deserialize(&buf)
        .with_context(|| format!("Invalid match log {}", path.display()))?;

    let snapshots = replay(log.events())
        .with_context(|| format!("Inconsistent match log {}", path.display()))?;

    Ok(snapshots.iter().map(format_snapshot).collect())
}

/// Formats an event with the stacks, bets and pot after it.
pub fn format_snapshot(snapshot: &Snapshot) -> String {
    let view = &snapshot.view;
    let event = snapshot.event.to_string();
    let mut line = format!(
        "{event:<32} stacks {:>9} {:>9}",
        view.stacks[0], view.stacks[1]
    );

    if let Some(round) = view.round {
        line.push_str(&format!(
            " bets {:>7} {:>7} pot {:>9} {round}",
            view.bets[0], view.bets[1], view.pot
        ));
    }

    line
}
