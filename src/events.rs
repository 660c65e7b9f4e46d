//! Events pushed to browser clients over the `/event` stream.
//!
//! Each message is a JSON object tagged by `type`:
//!
//! | type       | fields         | meaning |
//! |------------|----------------|---------|
//! | `new_grid` | `data`         | full [`ConfigSnapshot`]; the page rebuilds every chart |
//! | `refresh`  | `idx`, `data`  | full render description of one plot |
//! | `push`     | `idx`, `data`  | trailing point of every series of one plot |
//!
//! Between drain cycles the relay sends [`HEARTBEAT`], which clients ignore.

use serde::Serialize;

use crate::data::chart::{ChartDescription, PushedPoint};
use crate::data::snapshot::ConfigSnapshot;

/// No-op keep-alive message (the JSON string `"NOP"`).
pub const HEARTBEAT: &str = "\"NOP\"";

/// An incremental change notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlotEvent {
    /// A plot was added or the grid changed.
    NewGrid { data: ConfigSnapshot },
    /// A plot's data was replaced.
    Refresh { idx: usize, data: ChartDescription },
    /// A point was appended to every series of a plot.
    Push { idx: usize, data: PushedPoint },
}

impl PlotEvent {
    /// Wire name of the event type.
    pub fn name(&self) -> &'static str {
        match self {
            PlotEvent::NewGrid { .. } => "new_grid",
            PlotEvent::Refresh { .. } => "refresh",
            PlotEvent::Push { .. } => "push",
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl std::fmt::Display for PlotEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlotEvent::NewGrid { data } => {
                write!(f, "new_grid ({} plots, rows {:?})", data.plots.len(), data.grid)
            }
            PlotEvent::Refresh { idx, .. } => write!(f, "refresh #{idx}"),
            PlotEvent::Push { idx, .. } => write!(f, "push #{idx}"),
        }
    }
}
