//! Ordered plot list, grid and config snapshot; turns every mutation into events.

use crate::data::chart::ChartDescription;
use crate::data::plot::{Plot, PlotKind};
use crate::data::series::{Datum, PlotArgs};
use crate::data::snapshot::ConfigSnapshot;
use crate::error::PlotError;
use crate::events::PlotEvent;
use crate::grid::GridSpec;
use crate::sink::Outbox;

/// Owns all plot state on the host side.
///
/// Every successful mutation queues one [`PlotEvent`] and replaces the config
/// snapshot. A failed mutation changes nothing and queues nothing.
pub struct Aggregator {
    grid: GridSpec,
    plots: Vec<Plot>,
    snapshot: ConfigSnapshot,
    outbox: Outbox,
}

impl Aggregator {
    /// Create an empty aggregator and publish its initial snapshot.
    pub fn new(grid: GridSpec, row_height: u32, outbox: Outbox) -> Result<Self, PlotError> {
        let rows = grid.layout(0)?;
        let aggregator = Self {
            grid,
            plots: Vec::new(),
            snapshot: ConfigSnapshot::new(rows, row_height),
            outbox,
        };
        aggregator.outbox.publish_config(&aggregator.snapshot);
        Ok(aggregator)
    }

    /// Append a new plot and return its index.
    pub fn add(&mut self, kind: PlotKind, args: PlotArgs) -> Result<usize, PlotError> {
        let plot = Plot::new(kind, args)?;
        let rows = self.grid.layout(self.plots.len() + 1)?;

        let index = self.plots.len();
        self.snapshot.plots.push(plot.describe());
        self.snapshot.grid = rows;
        self.plots.push(plot);
        log::debug!("Added {} plot #{index}", kind.label());

        self.emit(PlotEvent::NewGrid {
            data: self.snapshot.clone(),
        });
        Ok(index)
    }

    /// Replace the data of plot `index`.
    pub fn refresh(&mut self, index: usize, args: PlotArgs) -> Result<(), PlotError> {
        let plot = self
            .plots
            .get_mut(index)
            .ok_or(PlotError::NoSuchPlot(index))?;
        plot.refresh(args)?;
        let description = plot.describe();
        self.snapshot.plots[index] = description.clone();

        self.emit(PlotEvent::Refresh {
            idx: index,
            data: description,
        });
        Ok(())
    }

    /// Append one point per series to plot `index`.
    pub fn push<I, D>(&mut self, index: usize, values: I) -> Result<(), PlotError>
    where
        I: IntoIterator<Item = D>,
        D: Into<Datum>,
    {
        let plot = self
            .plots
            .get_mut(index)
            .ok_or(PlotError::NoSuchPlot(index))?;
        plot.push(values)?;
        let pushed = plot.last_pushed();
        self.snapshot.plots[index] = plot.describe();

        self.emit(PlotEvent::Push {
            idx: index,
            data: pushed,
        });
        Ok(())
    }

    /// Re-arrange the grid. On failure the previous grid stays in place.
    pub fn set_grid(&mut self, grid: GridSpec) -> Result<(), PlotError> {
        let rows = grid.layout(self.plots.len())?;
        self.grid = grid;
        self.snapshot.grid = rows;

        self.emit(PlotEvent::NewGrid {
            data: self.snapshot.clone(),
        });
        Ok(())
    }

    fn emit(&self, event: PlotEvent) {
        self.outbox.send_event(&event);
        self.outbox.publish_config(&self.snapshot);
    }

    /// The current config snapshot; always reflects the last successful call.
    pub fn snapshot(&self) -> &ConfigSnapshot {
        &self.snapshot
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn plots(&self) -> &[Plot] {
        &self.plots
    }

    pub fn plot(&self, index: usize) -> Option<&Plot> {
        self.plots.get(index)
    }

    /// Render description of plot `index` as last sent to the browser.
    pub fn description(&self, index: usize) -> Option<&ChartDescription> {
        self.snapshot.plots.get(index)
    }

    pub fn len(&self) -> usize {
        self.plots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink;

    #[tokio::test]
    async fn add_emits_new_grid_with_full_snapshot() {
        let (outbox, inbox) = sink::channel();
        let mut agg = Aggregator::new(GridSpec::Dynamic(2), 300, outbox).unwrap();
        assert!(inbox.latest_config().contains(r#""plots":[]"#));

        let idx = agg.add(PlotKind::Bar, PlotArgs::y([1.0, 2.0])).unwrap();
        assert_eq!(idx, 0);
        let events = inbox.drain_events().await;
        assert_eq!(events.len(), 1);
        assert!(events[0].starts_with(r#"{"type":"new_grid""#));
        assert!(inbox.latest_config().contains(r#""type":"bar""#));
    }

    #[tokio::test]
    async fn failed_mutations_queue_nothing() {
        let (outbox, inbox) = sink::channel();
        let mut agg = Aggregator::new(GridSpec::Fixed(vec![1]), 300, outbox).unwrap();
        agg.add(PlotKind::Line, PlotArgs::y([1.0])).unwrap();
        inbox.drain_events().await;
        let before = agg.snapshot().clone();

        assert!(agg.add(PlotKind::Line, PlotArgs::y([1.0])).is_err());
        assert!(agg.push(0, [1.0, 2.0, 3.0]).is_err());
        assert_eq!(agg.refresh(4, PlotArgs::y([1.0])), Err(PlotError::NoSuchPlot(4)));
        assert!(agg.set_grid(GridSpec::Fixed(vec![])).is_err());

        assert!(inbox.drain_events().await.is_empty());
        assert_eq!(agg.snapshot(), &before);
        assert_eq!(agg.grid(), &GridSpec::Fixed(vec![1]));
    }

    #[tokio::test]
    async fn refresh_replaces_description() {
        let (outbox, inbox) = sink::channel();
        let mut agg = Aggregator::new(GridSpec::default(), 300, outbox).unwrap();
        agg.add(PlotKind::Radar, PlotArgs::y([1.0, 2.0])).unwrap();
        agg.refresh(0, PlotArgs::y([5.0, 6.0, 7.0]).with_labels(["r"]))
            .unwrap();

        let events = inbox.drain_events().await;
        assert_eq!(events.len(), 2);
        let refresh: serde_json::Value = serde_json::from_str(&events[1]).unwrap();
        assert_eq!(refresh["type"], "refresh");
        assert_eq!(refresh["idx"], 0);
        assert_eq!(refresh["data"]["datasets"][0]["label"], "r");
        assert_eq!(agg.description(0).unwrap().kind, PlotKind::Radar);
        assert_eq!(agg.plot(0).unwrap().len(), 3);
    }
}
