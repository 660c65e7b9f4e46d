pub mod chart;
pub mod plot;
pub mod series;
pub mod snapshot;
