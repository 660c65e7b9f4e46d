//! Host API: create and update plots shown in the browser.

use std::net::SocketAddr;
use std::path::Path;

use crate::aggregator::Aggregator;
use crate::config::PencilConfig;
use crate::data::plot::{Plot, PlotKind};
use crate::data::series::{Datum, PlotArgs};
use crate::data::snapshot::ConfigSnapshot;
use crate::error::{PencilError, PlotError};
use crate::grid::GridSpec;
use crate::persistence;
use crate::server::RelayServer;
use crate::sink;

/// Plots in a browser tab, updated live.
///
/// ```no_run
/// use pncl::{Pencil, PencilConfig, PlotArgs};
///
/// let mut p = Pencil::new(PencilConfig::default())?;
/// p.open_in_browser()?;
/// let x: Vec<f64> = (0..10).map(f64::from).collect();
/// let y: Vec<f64> = x.iter().map(|v| v * v).collect();
/// let line = p.line(PlotArgs::xy(x, y).with_labels(["Line"]))?;
/// p.push(line, [10.0, 100.0])?;
/// # Ok::<(), pncl::PencilError>(())
/// ```
pub struct Pencil {
    aggregator: Aggregator,
    relay: Option<RelayServer>,
    url: String,
    keep_alive: bool,
}

impl Pencil {
    /// Start the relay server and publish an empty page.
    pub fn new(config: PencilConfig) -> Result<Self, PencilError> {
        config.validate()?;
        let (outbox, inbox) = sink::channel();
        let aggregator = Aggregator::new(config.grid.clone(), config.row_height, outbox)?;
        let relay = RelayServer::start(&config, inbox)?;
        let url = browser_url(relay.local_addr());
        Ok(Self {
            aggregator,
            relay: Some(relay),
            url,
            keep_alive: config.keep_alive,
        })
    }

    /// Add a plot of any kind and return its index.
    pub fn add_plot(&mut self, kind: PlotKind, args: impl Into<PlotArgs>) -> Result<usize, PlotError> {
        self.aggregator.add(kind, args.into())
    }

    /// Add a line plot. `x, y1, ..., yn`, or a single series plotted against its index.
    pub fn line(&mut self, args: impl Into<PlotArgs>) -> Result<usize, PlotError> {
        self.add_plot(PlotKind::Line, args)
    }

    /// Add a bar plot. `x` may be categorical.
    pub fn bar(&mut self, args: impl Into<PlotArgs>) -> Result<usize, PlotError> {
        self.add_plot(PlotKind::Bar, args)
    }

    pub fn radar(&mut self, args: impl Into<PlotArgs>) -> Result<usize, PlotError> {
        self.add_plot(PlotKind::Radar, args)
    }

    /// Add a pie chart; `x` names the slices.
    pub fn pie(&mut self, args: impl Into<PlotArgs>) -> Result<usize, PlotError> {
        self.add_plot(PlotKind::Pie, args)
    }

    pub fn doughnut(&mut self, args: impl Into<PlotArgs>) -> Result<usize, PlotError> {
        self.add_plot(PlotKind::Doughnut, args)
    }

    pub fn polar_area(&mut self, args: impl Into<PlotArgs>) -> Result<usize, PlotError> {
        self.add_plot(PlotKind::PolarArea, args)
    }

    pub fn scatter(&mut self, args: impl Into<PlotArgs>) -> Result<usize, PlotError> {
        self.add_plot(PlotKind::Scatter, args)
    }

    /// Replace all data of plot `index` (zero-based, in creation order).
    pub fn refresh(&mut self, index: usize, args: impl Into<PlotArgs>) -> Result<(), PlotError> {
        self.aggregator.refresh(index, args.into())
    }

    /// Append a point to every series of plot `index`: `x, y1, ..., yn`,
    /// or a single `y` when the plot has one series.
    pub fn push<I, D>(&mut self, index: usize, values: I) -> Result<(), PlotError>
    where
        I: IntoIterator<Item = D>,
        D: Into<Datum>,
    {
        self.aggregator.push(index, values)
    }

    /// Re-arrange the grid. A fixed grid must have room for every plot.
    pub fn set_grid(&mut self, grid: impl Into<GridSpec>) -> Result<(), PlotError> {
        self.aggregator.set_grid(grid.into())
    }

    pub fn snapshot(&self) -> &ConfigSnapshot {
        self.aggregator.snapshot()
    }

    pub fn plots(&self) -> &[Plot] {
        self.aggregator.plots()
    }

    /// Bound address of the relay, `None` once stopped.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.relay.as_ref().map(RelayServer::local_addr)
    }

    /// Full URL of an endpoint, e.g. `endpoint("config")`. An empty name is the page itself.
    pub fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.url, name.trim_start_matches('/'))
    }

    /// Open the plot page in the default browser.
    #[cfg(feature = "browser")]
    pub fn open_in_browser(&self) -> Result<(), PencilError> {
        let url = self.endpoint("");
        webbrowser::open(&url).map_err(|source| PencilError::Browser { url, source })
    }

    /// Stop the relay. Plots keep accepting updates, but no browser receives them.
    pub fn stop(&mut self) {
        if let Some(mut relay) = self.relay.take() {
            relay.stop();
        }
    }

    /// Block until the relay exits (i.e. until the process is killed).
    pub fn block(mut self) {
        if let Some(relay) = self.relay.as_mut() {
            log::info!("Serving plots at {}; press Ctrl+C to exit", self.url);
            relay.block();
        }
    }

    /// Write the last-known config snapshot to `path` as JSON.
    pub fn save_snapshot(&self, path: &Path) -> Result<(), PencilError> {
        persistence::save_snapshot_to_path(self.snapshot(), path)
    }
}

impl Drop for Pencil {
    fn drop(&mut self) {
        if let Some(relay) = self.relay.as_mut() {
            if self.keep_alive {
                log::info!("Serving plots at {}; press Ctrl+C to exit", self.url);
                relay.block();
            }
            relay.stop();
        }
    }
}

/// Browsers cannot open an unspecified address, so use loopback instead.
fn browser_url(addr: SocketAddr) -> String {
    if addr.ip().is_unspecified() {
        format!("http://127.0.0.1:{}", addr.port())
    } else {
        format!("http://{addr}")
    }
}
