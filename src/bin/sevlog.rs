//! `sevlog [--config PATH] [--group NAME] [-m key=value]... <level> <text>...`
//!
//! Loads the config (explicit path or `<config_dir>/sevlog/sevlog.toml`), sends one
//! entry through every configured sink and flushes before exiting.

use clap::Parser;
use sevlog::cli::{Cli, run};
use std::process::ExitCode;

fn main() -> ExitCode {
    run(Cli::parse())
}
