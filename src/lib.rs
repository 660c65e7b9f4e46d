//! pncl crate root: re-exports and module wiring.
//!
//! Draws Chart.js charts in a browser tab from a synchronous host API. A small
//! relay server runs on a background thread and forwards every plot change to
//! the page as server-sent events.
//!
//! - `data`: series, plot kinds and their Chart.js render descriptions
//! - `grid`: dynamic and fixed grid layouts
//! - `aggregator`: plot list and config snapshot, turns mutations into events
//! - `sink`: event and config queues between host and relay
//! - `server`: the relay (page, `/config`, `/event`)
//! - `pencil`: the host-facing API
//!
//! ```no_run
//! use pncl::{GridSpec, Pencil, PencilConfig, PlotArgs};
//!
//! let mut p = Pencil::new(PencilConfig { grid: GridSpec::Fixed(vec![2, 1]), ..Default::default() })?;
//! p.bar(PlotArgs::xy(["a", "b", "c"], [3.0, 1.0, 2.0]).with_labels(["votes"]))?;
//! p.line(PlotArgs::y([0.0, 1.0, 4.0, 9.0]))?;
//! # Ok::<(), pncl::PencilError>(())
//! ```

pub mod aggregator;
pub mod color_scheme;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod grid;
pub mod pencil;
pub mod persistence;
pub mod server;
pub mod sink;

// Public re-exports for a compact external API
pub use aggregator::Aggregator;
pub use config::PencilConfig;
pub use data::chart::ChartDescription;
pub use data::plot::{Plot, PlotKind};
pub use data::series::{Datum, PlotArgs, Series};
pub use data::snapshot::ConfigSnapshot;
pub use error::{PencilError, PlotError};
pub use events::PlotEvent;
pub use grid::GridSpec;
pub use pencil::Pencil;
pub use server::RelayServer;
