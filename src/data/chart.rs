//! Render descriptions: the Chart.js configuration documents sent to the browser.
//!
//! These types only serialize. They mirror the Chart.js 2.x config layout
//! (`{type, data: {labels, datasets}, options}`) so that the page script can hand
//! them to `new Chart(...)` unchanged.

use serde::Serialize;

use crate::color_scheme::{self, Rgb};
use crate::data::plot::{Plot, PlotKind};
use crate::data::series::Datum;

/// Full render description of one plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDescription {
    #[serde(rename = "type")]
    pub kind: PlotKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    /// Category labels for kinds that use the x series as labels, `null` otherwise.
    pub labels: Option<Vec<Datum>>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: DatasetData,
    pub border_color: Paint,
    pub background_color: Paint,
}

/// `{x, y}` coordinate pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub x: Datum,
    pub y: Datum,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DatasetData {
    Points(Vec<Point>),
    Values(Vec<Datum>),
}

/// One element of [`DatasetData`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Sample {
    Point(Point),
    Value(Datum),
}

/// Dataset colour: one for the whole series, or one per category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Paint {
    Single(String),
    PerCategory(Vec<String>),
}

// ---------- Options ----------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub maintain_aspect_ratio: bool,
    pub elements: Elements,
    /// `null` for kinds without cartesian axes (radar, pie family).
    pub scales: Option<Scales>,
    pub animation: Animation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Elements {
    pub point: PointElement,
    pub line: LineElement,
    pub rectangle: BorderElement,
    pub arc: BorderElement,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointElement {
    pub radius: f32,
    pub border_width: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineElement {
    pub tension: f32,
    pub border_width: f32,
    pub fill: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderElement {
    pub border_width: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scales {
    pub x_axes: Vec<Axis>,
    pub y_axes: Vec<Axis>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub axis_type: Option<AxisType>,
    pub scale_label: ScaleLabel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisType {
    Linear,
    Category,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleLabel {
    pub display: bool,
    pub label_string: Option<String>,
}

impl ScaleLabel {
    fn new(label: Option<&str>) -> Self {
        Self {
            display: label.is_some(),
            label_string: label.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Animation {
    /// Milliseconds.
    pub duration: u32,
}

impl ChartOptions {
    /// Options shared by every kind, with axis titles when given.
    fn base(x_label: Option<&str>, y_label: Option<&str>) -> Self {
        Self {
            maintain_aspect_ratio: false,
            elements: Elements {
                point: PointElement {
                    radius: 0.0,
                    border_width: 1.0,
                },
                line: LineElement {
                    tension: 0.1,
                    border_width: 1.0,
                    fill: false,
                },
                rectangle: BorderElement { border_width: 1.0 },
                arc: BorderElement { border_width: 1.0 },
            },
            scales: Some(Scales {
                x_axes: vec![Axis {
                    axis_type: None,
                    scale_label: ScaleLabel::new(x_label),
                }],
                y_axes: vec![Axis {
                    axis_type: None,
                    scale_label: ScaleLabel::new(y_label),
                }],
            }),
            animation: Animation { duration: 500 },
        }
    }

    /// Options for a plot kind.
    pub fn for_kind(kind: PlotKind, x_label: Option<&str>, y_label: Option<&str>) -> Self {
        let mut options = Self::base(x_label, y_label);
        let x_axis_type = match kind {
            PlotKind::Line | PlotKind::Scatter => Some(AxisType::Linear),
            PlotKind::Bar => Some(AxisType::Category),
            PlotKind::Radar | PlotKind::Pie | PlotKind::Doughnut | PlotKind::PolarArea => {
                options.scales = None;
                None
            }
        };
        if let (Some(scales), Some(t)) = (options.scales.as_mut(), x_axis_type) {
            for axis in &mut scales.x_axes {
                axis.axis_type = Some(t);
            }
        }
        match kind {
            PlotKind::Radar => options.elements.line.fill = true,
            PlotKind::Scatter => options.elements.point.radius = 2.0,
            _ => {}
        }
        options
    }
}

// ---------- Data transform ----------

fn single_paint(color: Rgb) -> (Paint, Paint) {
    (
        Paint::Single(color.border()),
        Paint::Single(color.background()),
    )
}

fn category_paint(categories: usize) -> (Paint, Paint) {
    let colors: Vec<Rgb> = (0..categories).map(color_scheme::color).collect();
    (
        Paint::PerCategory(colors.iter().map(Rgb::border).collect()),
        Paint::PerCategory(colors.iter().map(Rgb::background).collect()),
    )
}

impl Plot {
    /// Build the render description for the current data.
    pub fn describe(&self) -> ChartDescription {
        let kind = self.kind();
        let x = self.x().values();
        let labels = self.dataset_labels();

        let datasets = self
            .y()
            .iter()
            .enumerate()
            .map(|(i, y)| {
                let ys = y.values();
                let data = if kind.uses_points() {
                    DatasetData::Points(
                        x.iter()
                            .zip(ys)
                            .map(|(x, y)| Point {
                                x: x.clone(),
                                y: y.clone(),
                            })
                            .collect(),
                    )
                } else {
                    DatasetData::Values(ys.to_vec())
                };
                let (border_color, background_color) = if kind.colors_per_category() {
                    category_paint(x.len())
                } else {
                    single_paint(color_scheme::color(i))
                };
                Dataset {
                    label: (!kind.colors_per_category()).then(|| labels[i].clone()),
                    data,
                    border_color,
                    background_color,
                }
            })
            .collect();

        ChartDescription {
            kind,
            data: ChartData {
                labels: kind.has_x_labels().then(|| x.to_vec()),
                datasets,
            },
            options: ChartOptions::for_kind(kind, self.x_label(), self.y_label()),
        }
    }

    /// Only the most recently appended point of every series.
    pub fn last_pushed(&self) -> PushedPoint {
        let description = self.describe();
        let label = description
            .data
            .labels
            .as_ref()
            .and_then(|labels| labels.last().cloned());
        let datasets = description
            .data
            .datasets
            .iter()
            .filter_map(Dataset::trailing)
            .collect();
        PushedPoint { label, datasets }
    }
}

/// Payload of a push event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PushedPoint {
    pub label: Option<Datum>,
    pub datasets: Vec<PushedDataset>,
}

/// Trailing element of every array-valued field of a [`Dataset`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushedDataset {
    pub data: Sample,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

impl Paint {
    fn last(&self) -> Option<String> {
        match self {
            Paint::Single(_) => None,
            Paint::PerCategory(colors) => colors.last().cloned(),
        }
    }
}

impl Dataset {
    /// `None` for an empty dataset.
    fn trailing(&self) -> Option<PushedDataset> {
        let data = match &self.data {
            DatasetData::Points(points) => Sample::Point(points.last()?.clone()),
            DatasetData::Values(values) => Sample::Value(values.last()?.clone()),
        };
        Some(PushedDataset {
            data,
            border_color: self.border_color.last(),
            background_color: self.background_color.last(),
        })
    }
}
