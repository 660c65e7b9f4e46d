//! The config snapshot: full layout and render state handed to new browser clients.

use serde::Serialize;

use crate::data::chart::ChartDescription;

/// Everything a browser needs to rebuild the page from scratch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigSnapshot {
    /// Column count of each grid row.
    pub grid: Vec<usize>,
    /// Row height in pixels.
    pub height: u32,
    pub plots: Vec<ChartDescription>,
}

impl ConfigSnapshot {
    pub fn new(grid: Vec<usize>, height: u32) -> Self {
        Self {
            grid,
            height,
            plots: Vec::new(),
        }
    }
}
