//! Lab command implementation.
//!
//! Each lab runs a fixed table of scenarios and prints one table per task.
//! A scenario that fails is reported in its row and the run continues.

mod constrained;
mod direct;
mod gradient;
mod linear;

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::commands::Context;

/// Arguments for the lab command.
#[derive(Args, Debug)]
pub struct LabArgs {
    /// Lab number: 1 linear systems, 2 direct search, 3 gradient methods,
    /// 4 constrained methods
    #[arg(value_parser = clap::value_parser!(u8).range(1..=4))]
    pub lab: u8,

    /// Directory with taskN/A.txt and taskN/b.txt files replacing the
    /// built-in systems of lab 1
    #[arg(short, long)]
    pub data: Option<PathBuf>,
}

/// Execute the lab command.
pub fn execute(args: LabArgs, ctx: &Context) -> Result<()> {
    tracing::debug!("running lab {}", args.lab);
    match args.lab {
        1 => linear::run(args.data.as_deref(), ctx),
        2 => direct::run(ctx),
        3 => gradient::run(ctx),
        _ => constrained::run(ctx),
    }
}
