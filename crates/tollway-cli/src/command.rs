//! Interactive commands read from stdin.

use std::str::FromStr;

use anyhow::bail;
use tollway_triggers::{ButtonPress, RegionTransition};

/// One line typed by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneCommand {
    /// Press a button on the lane panel.
    Press(ButtonPress),

    /// Move the car across the beacon region boundary.
    Cross(RegionTransition),

    /// Redraw the screen.
    Show,

    Help,
    Quit,
}

impl FromStr for LaneCommand {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let command = match line.trim().to_ascii_lowercase().as_str() {
            "enter" | "e" => Self::Press(ButtonPress::Entrance),
            "use" | "u" => Self::Press(ButtonPress::Use),
            "exit" | "x" => Self::Press(ButtonPress::Exit),
            "yes" | "y" => Self::Press(ButtonPress::DialogYes),
            "no" | "n" => Self::Press(ButtonPress::DialogNo),
            "region-in" | "in" => Self::Cross(RegionTransition::Entered),
            "region-out" | "out" => Self::Cross(RegionTransition::Exited),
            "show" | "s" | "" => Self::Show,
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" => Self::Quit,
            other => bail!("Unknown command {other:?}, type \"help\" for a list"),
        };
        Ok(command)
    }
}

pub const HELP: &str = "\
Commands:
  enter (e)       press the entrance button
  use (u)         press the use button
  exit (x)        press the exit button
  yes (y) / no (n) answer the payment dialog
  region-in (in)  beacon: car reaches the gate
  region-out (out) beacon: car leaves the gate
  show (s)        redraw the screen
  quit (q)        stop the lane";
