//! Text renderings of the current state and the trajectory history.

use std::{fmt, io::Write, str::FromStr};

use crate::{Error, model::State};

/// How [`crate::env::EconomyEnv::render`] reports the episode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// One line with the current state.
    #[default]
    Console,
    /// The full history as a time-series table, one row per step.
    Human,
}

impl FromStr for RenderMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "console" => Ok(RenderMode::Console),
            "human" => Ok(RenderMode::Human),
            other => Err(Error::UnsupportedRenderMode(other.to_string())),
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderMode::Console => f.write_str("console"),
            RenderMode::Human => f.write_str("human"),
        }
    }
}

const COLUMNS: [&str; 5] = ["capital", "resource", "pollution", "debt", "green_capital"];

pub(crate) fn console<W: Write>(out: &mut W, state: &State) -> Result<(), Error> {
    writeln!(out, "State: {:?}", state.to_array()).map_err(Error::Render)
}

pub(crate) fn history<W: Write>(out: &mut W, history: &[State]) -> Result<(), Error> {
    let mut write = || -> std::io::Result<()> {
        write!(out, "{:>6}", "step")?;
        for name in COLUMNS {
            write!(out, " {name:>16}")?;
        }
        writeln!(out)?;
        for (step, state) in history.iter().enumerate() {
            write!(out, "{:>6}", step + 1)?;
            for value in state.to_array() {
                write!(out, " {value:>16.6}")?;
            }
            writeln!(out)?;
        }
        Ok(())
    };
    write().map_err(Error::Render)
}
