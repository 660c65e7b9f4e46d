//! Configuration of a [`Pencil`](crate::Pencil) instance.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::PencilError;
use crate::grid::GridSpec;

/// Default port of the relay server.
pub const DEFAULT_PORT: u16 = 8080;

/// Top-level configuration.
///
/// | Field               | Purpose |
/// |---------------------|---------|
/// | `grid`              | Column count (dynamic) or per-row column counts (fixed) |
/// | `row_height`        | Height of each grid row in pixels |
/// | `keep_alive`        | Keep serving after the `Pencil` is dropped |
/// | `host`, `port`      | Bind address of the relay server; port `0` picks a free port |
/// | `events_per_second` | Tick rate of the event stream |
/// | `static_dir`        | Extra directory served for paths without a route |
///
/// Every field has a default, so a YAML file only needs the fields it changes:
///
/// ```yaml
/// grid: [2, 4, 1]
/// events_per_second: 4
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PencilConfig {
    pub grid: GridSpec,
    pub row_height: u32,
    /// When `true`, dropping the [`Pencil`](crate::Pencil) blocks on the relay
    /// so the page stays live until the process is killed (Ctrl+C).
    pub keep_alive: bool,
    pub host: String,
    pub port: u16,
    pub events_per_second: f64,
    pub static_dir: Option<PathBuf>,
}

impl Default for PencilConfig {
    fn default() -> Self {
        Self {
            grid: GridSpec::default(),
            row_height: 300,
            keep_alive: true,
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            events_per_second: 1.0,
            static_dir: None,
        }
    }
}

impl PencilConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, PencilError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, PencilError> {
        let txt = std::fs::read_to_string(path).map_err(|source| PencilError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&txt)
    }

    pub fn validate(&self) -> Result<(), PencilError> {
        self.grid.validate()?;
        self.tick_period()?;
        if self.row_height == 0 {
            return Err(PencilError::Config("row_height must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Interval between two drain cycles of the event stream.
    ///
    /// Fails unless `events_per_second` is positive and its period is a
    /// non-zero, representable [`Duration`].
    pub fn tick_period(&self) -> Result<Duration, PencilError> {
        let eps = self.events_per_second;
        let invalid = || {
            PencilError::Config(format!(
                "events_per_second must be a positive rate with a non-zero period, got {eps}"
            ))
        };
        if !(eps.is_finite() && eps > 0.0) {
            return Err(invalid());
        }
        match Duration::try_from_secs_f64(1.0 / eps) {
            Ok(period) if !period.is_zero() => Ok(period),
            _ => Err(invalid()),
        }
    }

    /// `host:port`, with IPv6 hosts bracketed.
    pub fn bind_addr(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_overrides_only_given_fields() {
        let cfg = PencilConfig::from_yaml_str("grid: [2, 4, 1]\nevents_per_second: 4\n").unwrap();
        assert_eq!(cfg.grid, GridSpec::Fixed(vec![2, 4, 1]));
        assert_eq!(cfg.tick_period().unwrap(), Duration::from_millis(250));
        assert_eq!(cfg.row_height, 300);
        assert!(cfg.keep_alive);
    }

    #[test]
    fn rejects_non_positive_tick_rate() {
        assert!(matches!(
            PencilConfig::from_yaml_str("events_per_second: 0"),
            Err(PencilError::Config(_))
        ));
    }

    #[test]
    fn rejects_rates_without_a_usable_period() {
        for eps in [1e10, 1e-320, f64::INFINITY, f64::NAN, -1.0] {
            let cfg = PencilConfig {
                events_per_second: eps,
                ..Default::default()
            };
            assert!(
                matches!(cfg.validate(), Err(PencilError::Config(_))),
                "events_per_second = {eps}"
            );
            assert!(cfg.tick_period().is_err(), "events_per_second = {eps}");
        }
        assert!(matches!(
            PencilConfig::from_yaml_str("events_per_second: 1.0e10"),
            Err(PencilError::Config(_))
        ));
    }

    #[test]
    fn high_but_representable_rate_is_accepted() {
        let cfg = PencilConfig {
            events_per_second: 1e6,
            ..Default::default()
        };
        let period = cfg.tick_period().unwrap();
        assert!(!period.is_zero());
        assert!(period < Duration::from_millis(1));
    }

    #[test]
    fn rejects_zero_columns() {
        assert!(matches!(
            PencilConfig::from_yaml_str("grid: 0"),
            Err(PencilError::Plot(_))
        ));
    }

    #[test]
    fn bind_addr_brackets_ipv6() {
        let mut cfg = PencilConfig::default();
        assert_eq!(cfg.bind_addr(), "0.0.0.0:8080");
        cfg.host = "::1".to_string();
        assert_eq!(cfg.bind_addr(), "[::1]:8080");
    }
}
