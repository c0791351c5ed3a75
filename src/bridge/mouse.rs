use std::fmt;
use std::io;
use std::str::FromStr;

use crossterm::{queue, Command};
use serde::{Deserialize, Serialize};

/// Pointer reporting granularity requested from the host terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseTracking {
    /// Presses, releases and drags reported per cell.
    #[default]
    #[serde(alias = "cell_motion")]
    Cell,
    /// Every pointer movement, buttons held or not.
    #[serde(alias = "all_motion")]
    All,
    #[serde(alias = "disabled")]
    Off,
}

impl MouseTracking {
    fn motion_mode(self) -> Option<u16> {
        match self {
            MouseTracking::Cell => Some(1002),
            MouseTracking::All => Some(1003),
            MouseTracking::Off => None,
        }
    }
}

impl FromStr for MouseTracking {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().replace('-', "_").as_str() {
            "cell" | "cell_motion" => Ok(MouseTracking::Cell),
            "all" | "all_motion" => Ok(MouseTracking::All),
            "off" | "disabled" => Ok(MouseTracking::Off),
            other => Err(format!(
                "unknown mouse tracking mode '{}' (expected cell, all or off)",
                other
            )),
        }
    }
}

/// DECSET sequence enabling the tracking mode plus SGR coordinates.
#[derive(Debug, Clone, Copy)]
pub struct EnableMouseTracking(pub MouseTracking);

impl Command for EnableMouseTracking {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        match self.0.motion_mode() {
            Some(mode) => write!(f, "\x1b[?1000h\x1b[?{}h\x1b[?1006h", mode),
            None => Ok(()),
        }
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> io::Result<()> {
        Ok(())
    }
}

/// Resets whatever [`EnableMouseTracking`] turned on.
#[derive(Debug, Clone, Copy)]
pub struct DisableMouseTracking(pub MouseTracking);

impl Command for DisableMouseTracking {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        match self.0.motion_mode() {
            Some(mode) => write!(f, "\x1b[?1006l\x1b[?{}l\x1b[?1000l", mode),
            None => Ok(()),
        }
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> io::Result<()> {
        Ok(())
    }
}

pub(crate) fn enable(out: &mut impl io::Write, tracking: MouseTracking) -> io::Result<()> {
    queue!(out, EnableMouseTracking(tracking))
}

pub(crate) fn disable(out: &mut impl io::Write, tracking: MouseTracking) -> io::Result<()> {
    queue!(out, DisableMouseTracking(tracking))
}
