//! Series values and the argument bundle accepted by plot-creating calls.

use serde::{Deserialize, Serialize};

use crate::error::PlotError;

/// A single value of a series: a finite number or a category name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Datum {
    Number(f64),
    Text(String),
}

impl Datum {
    /// Numeric value, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Datum::Number(v) => Some(*v),
            Datum::Text(_) => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Datum::Number(_))
    }

    /// Reason this value cannot be serialized to the browser, if any.
    fn invalid_reason(&self) -> Option<String> {
        match self {
            Datum::Number(v) if !v.is_finite() => Some(format!("{v} is not a finite number")),
            _ => None,
        }
    }
}

impl From<f64> for Datum {
    fn from(v: f64) -> Self {
        Datum::Number(v)
    }
}

impl From<i64> for Datum {
    fn from(v: i64) -> Self {
        Datum::Number(v as f64)
    }
}

impl From<&str> for Datum {
    fn from(v: &str) -> Self {
        Datum::Text(v.to_string())
    }
}

impl From<String> for Datum {
    fn from(v: String) -> Self {
        Datum::Text(v)
    }
}

/// A flat, one-dimensional sequence of values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series(Vec<Datum>);

impl Series {
    pub fn new(values: Vec<Datum>) -> Self {
        Self(values)
    }

    /// The implicit x index `0..len`.
    pub fn index(len: usize) -> Self {
        Self((0..len).map(|i| Datum::Number(i as f64)).collect())
    }

    /// Parse an untyped JSON value. Only a flat array of numbers and/or strings is accepted.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, PlotError> {
        series_from_json(0, value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[Datum] {
        &self.0
    }

    pub fn last(&self) -> Option<&Datum> {
        self.0.last()
    }

    /// `true` when every value is a number (an empty series is numeric).
    pub fn is_numeric(&self) -> bool {
        self.0.iter().all(Datum::is_number)
    }

    pub(crate) fn push(&mut self, value: Datum) {
        self.0.push(value);
    }

    /// Check that the series can be rendered; `index` is its argument position.
    pub(crate) fn check(&self, index: usize) -> Result<(), PlotError> {
        match self.0.iter().find_map(Datum::invalid_reason) {
            Some(reason) => Err(PlotError::InvalidSeries { index, reason }),
            None => Ok(()),
        }
    }
}

fn series_from_json(index: usize, value: &serde_json::Value) -> Result<Series, PlotError> {
    use serde_json::Value;

    let invalid = |reason: String| PlotError::InvalidSeries { index, reason };
    let Value::Array(items) = value else {
        return Err(invalid(format!("expected an array, got {value}")));
    };
    let values = items
        .iter()
        .map(|item| match item {
            Value::Number(n) => n
                .as_f64()
                .map(Datum::Number)
                .ok_or_else(|| invalid(format!("{n} is not representable as f64"))),
            Value::String(s) => Ok(Datum::Text(s.clone())),
            Value::Array(_) => Err(invalid("nested arrays are not allowed".to_string())),
            other => Err(invalid(format!("unsupported value {other}"))),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Series(values))
}

impl From<Vec<Datum>> for Series {
    fn from(v: Vec<Datum>) -> Self {
        Self(v)
    }
}

impl From<Vec<f64>> for Series {
    fn from(v: Vec<f64>) -> Self {
        Self(v.into_iter().map(Datum::Number).collect())
    }
}

impl From<&[f64]> for Series {
    fn from(v: &[f64]) -> Self {
        Self(v.iter().copied().map(Datum::Number).collect())
    }
}

impl<const N: usize> From<[f64; N]> for Series {
    fn from(v: [f64; N]) -> Self {
        Self(v.into_iter().map(Datum::Number).collect())
    }
}

impl From<Vec<i64>> for Series {
    fn from(v: Vec<i64>) -> Self {
        Self(v.into_iter().map(Datum::from).collect())
    }
}

impl From<std::ops::Range<i64>> for Series {
    fn from(r: std::ops::Range<i64>) -> Self {
        Self(r.map(Datum::from).collect())
    }
}

impl From<Vec<String>> for Series {
    fn from(v: Vec<String>) -> Self {
        Self(v.into_iter().map(Datum::Text).collect())
    }
}

impl From<Vec<&str>> for Series {
    fn from(v: Vec<&str>) -> Self {
        Self(v.into_iter().map(Datum::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Series {
    fn from(v: [&str; N]) -> Self {
        Self(v.into_iter().map(Datum::from).collect())
    }
}

/// Positional series plus the named overrides of a plot-creating or refresh call.
///
/// With a single series it is plotted against `0..n`; with two or more the first
/// one is x and the rest are y-series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotArgs {
    pub series: Vec<Series>,
    /// Legend label per y-series.
    pub labels: Option<Vec<String>>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
}

impl PlotArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single series plotted against its index.
    pub fn y(values: impl Into<Series>) -> Self {
        Self::new().with_series(values)
    }

    /// An x series and one y series.
    pub fn xy(x: impl Into<Series>, y: impl Into<Series>) -> Self {
        Self::new().with_series(x).with_series(y)
    }

    /// Append another positional series.
    pub fn with_series(mut self, values: impl Into<Series>) -> Self {
        self.series.push(values.into());
        self
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }

    pub fn with_y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = Some(label.into());
        self
    }

    /// Build arguments from untyped JSON values, one per positional series.
    pub fn from_json(values: &[serde_json::Value]) -> Result<Self, PlotError> {
        let series = values
            .iter()
            .enumerate()
            .map(|(i, v)| series_from_json(i, v))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            series,
            ..Self::default()
        })
    }
}

impl From<Vec<Series>> for PlotArgs {
    fn from(series: Vec<Series>) -> Self {
        Self {
            series,
            ..Self::default()
        }
    }
}

impl From<Series> for PlotArgs {
    fn from(series: Series) -> Self {
        Self::from(vec![series])
    }
}
