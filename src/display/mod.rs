pub mod braille;
pub mod layout;
pub mod snapshot;
pub mod terminal;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Full-screen UI with keyboard-driven knobs
    #[default]
    Interactive,
    /// Print one plot to stdout and exit
    Snapshot,
}
