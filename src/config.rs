//! Runtime configuration for the binaries.
//!
//! Values come from `TUI2048_*` environment variables first; command line flags
//! override them. The result is validated once, before any terminal state is
//! touched.

use std::env;

use clap::Parser;
use thiserror::Error;

use crate::types::{DEFAULT_BOARD_SIZE, DEFAULT_STEP_MS, MAX_BOARD_SIZE, MIN_PLAYABLE_SIZE};

pub const SEED_VAR: &str = "TUI2048_SEED";
pub const SIZE_VAR: &str = "TUI2048_SIZE";
pub const STEP_MS_VAR: &str = "TUI2048_STEP_MS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}={value:?} is not a valid number")]
    InvalidEnv { var: &'static str, value: String },
    #[error("board size {0} is outside {}..={}", MIN_PLAYABLE_SIZE, MAX_BOARD_SIZE)]
    SizeOutOfRange(u8),
    #[error("step duration must be positive")]
    ZeroStep,
}

/// Command line flags; each one overrides its environment variable.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "tui-2048", version, about = "Slide tiles, merge equal values, reach 2048")]
pub struct Cli {
    /// Rng seed for tile spawns
    #[arg(long)]
    pub seed: Option<u64>,
    /// Board side length
    #[arg(long)]
    pub size: Option<u8>,
    /// Milliseconds per cell of slide animation
    #[arg(long = "step-ms")]
    pub step_ms: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub seed: u64,
    pub size: u8,
    pub step_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: 1,
            size: DEFAULT_BOARD_SIZE,
            step_ms: DEFAULT_STEP_MS,
        }
    }
}

impl Config {
    /// Read the process environment, then apply `cli` on top.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())?.with_overrides(cli)
    }

    /// Build from an arbitrary variable lookup; unset or blank variables keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(seed) = parse_var(&lookup, SEED_VAR)? {
            config.seed = seed;
        }
        if let Some(size) = parse_var(&lookup, SIZE_VAR)? {
            config.size = size;
        }
        if let Some(step_ms) = parse_var(&lookup, STEP_MS_VAR)? {
            config.step_ms = step_ms;
        }
        Ok(config)
    }

    pub fn with_overrides(mut self, cli: &Cli) -> Result<Self, ConfigError> {
        if let Some(seed) = cli.seed {
            self.seed = seed;
        }
        if let Some(size) = cli.size {
            self.size = size;
        }
        if let Some(step_ms) = cli.step_ms {
            self.step_ms = step_ms;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PLAYABLE_SIZE..=MAX_BOARD_SIZE).contains(&self.size) {
            return Err(ConfigError::SizeOutOfRange(self.size));
        }
        if self.step_ms == 0 {
            return Err(ConfigError::ZeroStep);
        }
        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::InvalidEnv {
            var,
            value: raw.clone(),
        })
}
