//! Plot state: one chart's series, labels and kind.
//!
//! All seven chart kinds share the same data model and mutation rules; only the
//! render description (see [`crate::data::chart`]) depends on the kind.

use serde::{Deserialize, Serialize};

use crate::data::series::{Datum, PlotArgs, Series};
use crate::error::PlotError;

/// Chart kind, serialized with the Chart.js type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlotKind {
    Line,
    Bar,
    Radar,
    Pie,
    Doughnut,
    PolarArea,
    Scatter,
}

impl PlotKind {
    pub fn all() -> &'static [PlotKind] {
        &[
            PlotKind::Line,
            PlotKind::Bar,
            PlotKind::Radar,
            PlotKind::Pie,
            PlotKind::Doughnut,
            PlotKind::PolarArea,
            PlotKind::Scatter,
        ]
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            PlotKind::Line => "Line",
            PlotKind::Bar => "Bar",
            PlotKind::Radar => "Radar",
            PlotKind::Pie => "Pie",
            PlotKind::Doughnut => "Doughnut",
            PlotKind::PolarArea => "Polar Area",
            PlotKind::Scatter => "Scatter",
        }
    }

    /// Data is sent as `{x, y}` pairs rather than bare y values.
    pub(crate) fn uses_points(self) -> bool {
        matches!(self, PlotKind::Line | PlotKind::Bar | PlotKind::Scatter)
    }

    /// The x series doubles as `data.labels`.
    pub(crate) fn has_x_labels(self) -> bool {
        !matches!(self, PlotKind::Line | PlotKind::Scatter)
    }

    /// One colour per category instead of one per series.
    pub(crate) fn colors_per_category(self) -> bool {
        matches!(
            self,
            PlotKind::Pie | PlotKind::Doughnut | PlotKind::PolarArea
        )
    }
}

/// Data and labels of a single chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    kind: PlotKind,
    x: Series,
    y: Vec<Series>,
    labels: Option<Vec<String>>,
    x_label: Option<String>,
    y_label: Option<String>,
}

/// Checked contents of a [`PlotArgs`], ready to be swapped in.
struct Validated {
    x: Series,
    y: Vec<Series>,
    labels: Option<Vec<String>>,
    x_label: Option<String>,
    y_label: Option<String>,
}

fn validate(args: PlotArgs) -> Result<Validated, PlotError> {
    let PlotArgs {
        mut series,
        labels,
        x_label,
        y_label,
    } = args;

    if series.is_empty() {
        return Err(PlotError::NoSeries);
    }
    for (i, s) in series.iter().enumerate() {
        s.check(i)?;
    }

    // A lone series is y against its index; otherwise y-series start at position 1.
    let (x, y, y_offset) = if series.len() == 1 {
        let y = series.remove(0);
        (Series::index(y.len()), vec![y], 0)
    } else {
        let x = series.remove(0);
        (x, series, 1)
    };

    for (i, s) in y.iter().enumerate() {
        let index = i + y_offset;
        if !s.is_numeric() {
            return Err(PlotError::InvalidSeries {
                index,
                reason: "y values must be numbers".to_string(),
            });
        }
        if s.len() != x.len() {
            return Err(PlotError::LengthMismatch {
                index,
                len: s.len(),
                expected: x.len(),
            });
        }
    }

    if let Some(labels) = &labels {
        if labels.len() != y.len() {
            return Err(PlotError::LabelCount {
                labels: labels.len(),
                series: y.len(),
            });
        }
    }

    Ok(Validated {
        x,
        y,
        labels,
        x_label,
        y_label,
    })
}

fn check_value(index: usize, value: &Datum, numeric: bool) -> Result<(), PlotError> {
    let reason = match value {
        Datum::Number(v) if !v.is_finite() => format!("{v} is not a finite number"),
        Datum::Text(t) if numeric => format!("expected a number, got {t:?}"),
        _ => return Ok(()),
    };
    Err(PlotError::InvalidSeries { index, reason })
}

impl Plot {
    /// Create a plot of the given kind. Fails without side effects on invalid arguments.
    pub fn new(kind: PlotKind, args: PlotArgs) -> Result<Self, PlotError> {
        let v = validate(args)?;
        Ok(Self {
            kind,
            x: v.x,
            y: v.y,
            labels: v.labels,
            x_label: v.x_label,
            y_label: v.y_label,
        })
    }

    /// Replace every series and label. Fails without side effects on invalid arguments.
    pub fn refresh(&mut self, args: PlotArgs) -> Result<(), PlotError> {
        let v = validate(args)?;
        self.x = v.x;
        self.y = v.y;
        self.labels = v.labels;
        self.x_label = v.x_label;
        self.y_label = v.y_label;
        Ok(())
    }

    /// Append one point to every series.
    ///
    /// Takes the x value followed by one value per y-series. A plot with a
    /// single series also accepts a lone y value, in which case x continues
    /// from the last x value (`0` for an empty plot).
    pub fn push<I, D>(&mut self, values: I) -> Result<(), PlotError>
    where
        I: IntoIterator<Item = D>,
        D: Into<Datum>,
    {
        let mut values: Vec<Datum> = values.into_iter().map(Into::into).collect();
        let series = self.y.len();
        let argument_count = PlotError::ArgumentCount {
            got: values.len(),
            series,
        };

        let x = if values.len() == 1 {
            if series != 1 {
                return Err(argument_count);
            }
            match self.x.last() {
                None => Datum::Number(0.0),
                Some(Datum::Number(last)) => Datum::Number(last + 1.0),
                Some(Datum::Text(_)) => {
                    return Err(PlotError::InvalidSeries {
                        index: 0,
                        reason: "cannot continue a categorical x series implicitly".to_string(),
                    })
                }
            }
        } else {
            if values.len() != series + 1 {
                return Err(argument_count);
            }
            let x = values.remove(0);
            check_value(0, &x, false)?;
            x
        };
        for (i, v) in values.iter().enumerate() {
            check_value(i + 1, v, true)?;
        }

        self.x.push(x);
        for (s, v) in self.y.iter_mut().zip(values) {
            s.push(v);
        }
        Ok(())
    }

    pub fn kind(&self) -> PlotKind {
        self.kind
    }

    pub fn x(&self) -> &Series {
        &self.x
    }

    pub fn y(&self) -> &[Series] {
        &self.y
    }

    /// Number of points per series.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn x_label(&self) -> Option<&str> {
        self.x_label.as_deref()
    }

    pub fn y_label(&self) -> Option<&str> {
        self.y_label.as_deref()
    }

    /// Legend labels, defaulting to `Data {i}`.
    pub fn dataset_labels(&self) -> Vec<String> {
        match &self.labels {
            Some(labels) => labels.clone(),
            None => (0..self.y.len()).map(|i| format!("Data {i}")).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_series_gets_implicit_index() {
        let plot = Plot::new(PlotKind::Line, PlotArgs::y([4.0, 5.0, 6.0])).unwrap();
        assert_eq!(plot.x(), &Series::index(3));
        assert_eq!(plot.y().len(), 1);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = Plot::new(
            PlotKind::Bar,
            PlotArgs::xy([0.0, 1.0, 2.0], [1.0, 2.0]),
        )
        .unwrap_err();
        assert_eq!(
            err,
            PlotError::LengthMismatch {
                index: 1,
                len: 2,
                expected: 3
            }
        );
    }

    #[test]
    fn categorical_y_is_rejected() {
        let err = Plot::new(PlotKind::Line, PlotArgs::xy([0.0, 1.0], ["a", "b"])).unwrap_err();
        assert!(matches!(err, PlotError::InvalidSeries { index: 1, .. }));
    }

    #[test]
    fn label_count_must_match_series() {
        let args = PlotArgs::xy([0.0], [1.0]).with_labels(["a", "b"]);
        assert_eq!(
            Plot::new(PlotKind::Line, args).unwrap_err(),
            PlotError::LabelCount {
                labels: 2,
                series: 1
            }
        );
    }

    #[test]
    fn push_single_value_continues_x() {
        let mut plot = Plot::new(PlotKind::Line, PlotArgs::xy([0.0, 5.0], [1.0, 2.0])).unwrap();
        plot.push([3.0]).unwrap();
        assert_eq!(plot.x().last(), Some(&Datum::Number(6.0)));
        assert_eq!(plot.len(), 3);
    }

    #[test]
    fn push_single_value_on_categorical_x_fails() {
        let mut plot = Plot::new(PlotKind::Pie, PlotArgs::xy(["a"], [1.0])).unwrap();
        let before = plot.clone();
        assert!(plot.push([2.0]).is_err());
        assert_eq!(plot, before);
    }

    #[test]
    fn push_with_text_y_leaves_plot_untouched() {
        let mut plot = Plot::new(PlotKind::Line, PlotArgs::xy([0.0], [1.0])).unwrap();
        let before = plot.clone();
        assert!(plot.push([Datum::from(1.0), Datum::from("nope")]).is_err());
        assert_eq!(plot, before);
    }

    #[test]
    fn default_dataset_labels() {
        let plot = Plot::new(
            PlotKind::Line,
            PlotArgs::xy([0.0], [1.0]).with_series([2.0]),
        )
        .unwrap();
        assert_eq!(plot.dataset_labels(), vec!["Data 0", "Data 1"]);
    }

    #[test]
    fn kind_names_follow_chartjs() {
        assert_eq!(
            serde_json::to_string(&PlotKind::PolarArea).unwrap(),
            "\"polarArea\""
        );
        assert_eq!(PlotKind::all().len(), 7);
    }
}
