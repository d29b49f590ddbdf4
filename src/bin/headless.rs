//! Headless runner: line-delimited JSON on stdin/stdout.
//!
//! Logs go to stderr so they never interleave with protocol lines.

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;

use tui_2048::adapter::{Session, SessionConfig};
use tui_2048::config::{Cli, Config};

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::load(&Cli::parse()).context("invalid configuration")?;
    info!("headless session: seed {}, {}x{}", config.seed, config.size, config.size);

    let mut session = Session::new(SessionConfig {
        seed: config.seed,
        size: config.size,
    });

    let stdin = io::stdin();
    let stdout = io::stdout();
    session.run(stdin.lock(), stdout.lock())?;

    info!(
        "input closed after {} moves, score {}",
        session.game().moves(),
        session.game().score()
    );
    Ok(())
}
