// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Heads-up match simulator.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod play;
pub use play::{Config, Summary, run};
pub mod replay;
pub mod strategy;
