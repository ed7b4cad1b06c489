//! Backend independent description of the charts that can be drawn for one
//! measurement series.

use std::fmt;
use std::str::FromStr;

use crate::error::PlotterError;

pub mod stats;
use self::stats::{Bin, BoxSummary};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaletteColor(pub u8, pub u8, pub u8);

pub const PALETTE: [PaletteColor; 8] = [
    PaletteColor(0x1f, 0x77, 0xb4),
    PaletteColor(0xff, 0x7f, 0x0e),
    PaletteColor(0x2c, 0xa0, 0x2c),
    PaletteColor(0xd6, 0x27, 0x28),
    PaletteColor(0x94, 0x67, 0xbd),
    PaletteColor(0x8c, 0x56, 0x4b),
    PaletteColor(0xe3, 0x77, 0xc2),
    PaletteColor(0x7f, 0x7f, 0x7f),
];

/// Hole size of a donut chart, as a fraction of the radius.
pub const DONUT_HOLE: f64 = 0.3;

impl PaletteColor {
    pub fn for_index(index: usize) -> PaletteColor {
        PALETTE[index % PALETTE.len()]
    }
}

impl fmt::Display for PaletteColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
    Scatter,
    Area,
    Histogram,
    Box,
    StackedBar,
    Donut,
    Heatmap,
    Pie,
}

impl ChartKind {
    pub const ALL: [ChartKind; 10] = [
        ChartKind::Line,
        ChartKind::Bar,
        ChartKind::Scatter,
        ChartKind::Area,
        ChartKind::Histogram,
        ChartKind::Box,
        ChartKind::StackedBar,
        ChartKind::Donut,
        ChartKind::Heatmap,
        ChartKind::Pie,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Line => "Line Chart",
            ChartKind::Bar => "Bar Chart",
            ChartKind::Scatter => "Scatter Plot",
            ChartKind::Area => "Area Chart",
            ChartKind::Histogram => "Histogram",
            ChartKind::Box => "Box Plot",
            ChartKind::StackedBar => "Stacked Bar Chart",
            ChartKind::Donut => "Donut Chart",
            ChartKind::Heatmap => "Heatmap",
            ChartKind::Pie => "Pie Chart",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Scatter => "scatter",
            ChartKind::Area => "area",
            ChartKind::Histogram => "histogram",
            ChartKind::Box => "box",
            ChartKind::StackedBar => "stacked-bar",
            ChartKind::Donut => "donut",
            ChartKind::Heatmap => "heatmap",
            ChartKind::Pie => "pie",
        }
    }

    /// Whether the values are drawn along a numeric axis.
    pub fn has_value_axis(self) -> bool {
        match self {
            ChartKind::Donut | ChartKind::Heatmap | ChartKind::Pie => false,
            _ => true,
        }
    }

    /// Whether `values` can be drawn by this kind of chart.
    ///
    /// Charts with a value axis need the distance between the smallest and
    /// the largest finite value to fit into an f64.
    pub fn can_scale(self, values: &[f64]) -> bool {
        if !self.has_value_axis() {
            return true;
        }

        match stats::value_range(values) {
            Some((min, max)) => stats::span(min, max).is_some(),
            None => true,
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ChartKind {
    type Err = PlotterError;

    fn from_str(s: &str) -> Result<ChartKind, PlotterError> {
        let requested = s.trim();

        ChartKind::ALL
            .iter()
            .cloned()
            .find(|kind| {
                kind.label().eq_ignore_ascii_case(requested) || kind.slug().eq_ignore_ascii_case(requested)
            })
            .ok_or_else(|| PlotterError::UnsupportedChartType(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChartSize {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartSize {
    fn default() -> ChartSize {
        ChartSize {
            width: 700,
            height: 400,
        }
    }
}

#[derive(PartialEq, Clone, Debug)]
pub struct Slice {
    pub value: f64,
    pub count: usize,
    pub color: PaletteColor,
}

#[derive(PartialEq, Clone, Debug)]
pub struct Bar {
    pub index: usize,
    pub value: f64,
    pub color: PaletteColor,
}

/// What each chart kind needs to be drawn.
#[derive(PartialEq, Clone, Debug)]
pub enum ChartData {
    Line { points: Vec<(usize, f64)> },
    Bar { points: Vec<(usize, f64)> },
    Scatter { points: Vec<(usize, f64)> },
    Area { points: Vec<(usize, f64)> },
    Histogram { bins: Vec<Bin> },
    Box { summary: BoxSummary },
    StackedBar { bars: Vec<Bar> },
    Donut { slices: Vec<Slice>, hole: f64 },
    Heatmap { cells: Vec<(usize, f64)>, min: f64, max: f64 },
    Pie { slices: Vec<Slice> },
}

impl ChartData {
    fn build(kind: ChartKind, values: &[f64]) -> Option<ChartData> {
        let points = || values.iter().cloned().enumerate().collect::<Vec<_>>();
        let slices = || {
            stats::value_counts(values)
                .into_iter()
                .enumerate()
                .map(|(i, (value, count))| Slice {
                    value,
                    count,
                    color: PaletteColor::for_index(i),
                })
                .collect::<Vec<_>>()
        };

        let data = match kind {
            ChartKind::Line => ChartData::Line { points: points() },
            ChartKind::Bar => ChartData::Bar { points: points() },
            ChartKind::Scatter => ChartData::Scatter { points: points() },
            ChartKind::Area => ChartData::Area { points: points() },
            ChartKind::Histogram => ChartData::Histogram {
                bins: stats::histogram_bins(values),
            },
            ChartKind::Box => ChartData::Box {
                summary: stats::box_summary(values)?,
            },
            ChartKind::StackedBar => ChartData::StackedBar {
                bars: values
                    .iter()
                    .enumerate()
                    .map(|(index, value)| Bar {
                        index,
                        value: *value,
                        color: PaletteColor::for_index(index),
                    })
                    .collect(),
            },
            ChartKind::Donut => ChartData::Donut {
                slices: slices(),
                hole: DONUT_HOLE,
            },
            ChartKind::Heatmap => {
                let (min, max) = stats::value_range(values)?;
                ChartData::Heatmap {
                    cells: points(),
                    min,
                    max,
                }
            }
            ChartKind::Pie => ChartData::Pie { slices: slices() },
        };

        if data.item_count() == 0 {
            return None;
        }

        Some(data)
    }

    /// Number of drawn items: points, bins, bars, slices or cells.
    pub fn item_count(&self) -> usize {
        match self {
            ChartData::Line { points }
            | ChartData::Bar { points }
            | ChartData::Scatter { points }
            | ChartData::Area { points } => points.len(),
            ChartData::Histogram { bins } => bins.len(),
            ChartData::Box { .. } => 1,
            ChartData::StackedBar { bars } => bars.len(),
            ChartData::Donut { slices, .. } | ChartData::Pie { slices } => slices.len(),
            ChartData::Heatmap { cells, .. } => cells.len(),
        }
    }
}

/// One chart for one measurement of one CAN ID.
#[derive(PartialEq, Clone, Debug)]
pub struct ChartArtifact {
    pub id: String,
    pub measurement: String,
    pub kind: ChartKind,
    pub title: String,
    pub color: PaletteColor,
    pub size: ChartSize,
    pub data: ChartData,
}

impl ChartArtifact {
    /// Builds the chart of `values`, `None` if there is nothing to draw or the
    /// values cannot be scaled onto the chart's axis.
    ///
    /// `position` is the measurement's place in the selection and picks the
    /// palette colour.
    pub fn build(
        id: &str,
        measurement: &str,
        kind: ChartKind,
        values: &[f64],
        position: usize,
        size: ChartSize,
    ) -> Option<ChartArtifact> {
        if values.is_empty() || !kind.can_scale(values) {
            return None;
        }

        let data = ChartData::build(kind, values)?;

        Some(ChartArtifact {
            id: id.to_string(),
            measurement: measurement.to_string(),
            kind,
            title: format!("{} for {}", kind.label(), measurement),
            color: PaletteColor::for_index(position),
            size,
            data,
        })
    }

    /// File name friendly name, e.g. `0x100_RPM_line`.
    pub fn file_stem(&self) -> String {
        let sanitize = |text: &str| -> String {
            text.chars()
                .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
                .collect()
        };

        format!(
            "{}_{}_{}",
            sanitize(&self.id),
            sanitize(&self.measurement),
            self.kind.slug()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chart_kind_labels_and_slugs() {
        assert_eq!("Line Chart".parse::<ChartKind>().unwrap(), ChartKind::Line);
        assert_eq!("scatter plot".parse::<ChartKind>().unwrap(), ChartKind::Scatter);
        assert_eq!("stacked-bar".parse::<ChartKind>().unwrap(), ChartKind::StackedBar);
        assert_eq!(" Donut Chart ".parse::<ChartKind>().unwrap(), ChartKind::Donut);

        for kind in ChartKind::ALL.iter() {
            assert_eq!(kind.label().parse::<ChartKind>().unwrap(), *kind);
            assert_eq!(kind.slug().parse::<ChartKind>().unwrap(), *kind);
        }
    }

    #[test]
    fn test_parse_unsupported_chart_kind() {
        let error_message = match "Pyramid Chart".parse::<ChartKind>() {
            Err(fail) => format!("{}", fail),
            Ok(_) => unreachable!(),
        };

        assert_eq!(error_message, "Unsupported chart type: Pyramid Chart");
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(PaletteColor::for_index(0), PaletteColor::for_index(8));
        assert_eq!(format!("{}", PaletteColor::for_index(1)), "#ff7f0e");
        assert_eq!(format!("{}", PaletteColor::for_index(15)), "#7f7f7f");
    }

    #[test]
    fn test_build_line_chart() {
        let chart =
            ChartArtifact::build("0x100", "RPM", ChartKind::Line, &[1.0, 2.0], 2, ChartSize::default())
                .unwrap();

        assert_eq!(chart.title, "Line Chart for RPM");
        assert_eq!(chart.color, PALETTE[2]);
        assert_eq!(chart.size, ChartSize { width: 700, height: 400 });
        assert_eq!(
            chart.data,
            ChartData::Line {
                points: vec![(0, 1.0), (1, 2.0)],
            }
        );
    }

    #[test]
    fn test_build_empty_series() {
        for kind in ChartKind::ALL.iter() {
            assert_eq!(
                ChartArtifact::build("0x1", "RPM", *kind, &[], 0, ChartSize::default()),
                None
            );
        }
    }

    #[test]
    fn test_build_donut_counts_distinct_values() {
        let chart = ChartArtifact::build(
            "0x1",
            "Gear",
            ChartKind::Donut,
            &[2.0, 3.0, 2.0, 2.0],
            0,
            ChartSize::default(),
        )
        .unwrap();

        assert_eq!(
            chart.data,
            ChartData::Donut {
                slices: vec![
                    Slice {
                        value: 2.0,
                        count: 3,
                        color: PALETTE[0],
                    },
                    Slice {
                        value: 3.0,
                        count: 1,
                        color: PALETTE[1],
                    },
                ],
                hole: DONUT_HOLE,
            }
        );
    }

    #[test]
    fn test_build_stacked_bar_colors_each_bar() {
        let values: Vec<f64> = (0..10).map(|v| v as f64).collect();

        let chart =
            ChartArtifact::build("0x1", "Speed", ChartKind::StackedBar, &values, 3, ChartSize::default())
                .unwrap();

        match chart.data {
            ChartData::StackedBar { bars } => {
                assert_eq!(bars.len(), 10);
                assert_eq!(bars[0].color, PALETTE[0]);
                assert_eq!(bars[9].color, PALETTE[1]);
            }
            other => panic!("unexpected chart data {:?}", other),
        }
    }

    #[test]
    fn test_build_heatmap_range() {
        let chart =
            ChartArtifact::build("0x1", "Temp", ChartKind::Heatmap, &[4.0, -2.0, 9.0], 0, ChartSize::default())
                .unwrap();

        match chart.data {
            ChartData::Heatmap { cells, min, max } => {
                assert_eq!(cells.len(), 3);
                assert_eq!(min, -2.0);
                assert_eq!(max, 9.0);
            }
            other => panic!("unexpected chart data {:?}", other),
        }
    }

    #[test]
    fn test_file_stem() {
        let chart = ChartArtifact::build(
            "0x1A0",
            "Motor Temp",
            ChartKind::StackedBar,
            &[1.0],
            0,
            ChartSize::default(),
        )
        .unwrap();

        assert_eq!(chart.file_stem(), "0x1A0_Motor_Temp_stacked-bar");
    }

    #[test]
    fn test_build_values_too_far_apart() {
        let values = [1.7e308, -1.7e308];

        for kind in ChartKind::ALL.iter() {
            let chart = ChartArtifact::build("0x1", "V", *kind, &values, 0, ChartSize::default());

            assert_eq!(chart.is_some(), !kind.has_value_axis(), "{}", kind);
        }

        assert!(ChartKind::Line.can_scale(&[0.0, 1.7e308]));
        assert!(ChartKind::Line.can_scale(&[std::f64::NAN]));
    }
}
