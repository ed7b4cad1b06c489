use std::f64::consts::PI;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use failure::Error;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::chart::stats::{self, Bin, BoxSummary};
use crate::chart::{Bar, ChartArtifact, ChartData, PaletteColor, Slice};
use crate::render::Renderer;

type Root<'b> = DrawingArea<SVGBackend<'b>, Shift>;
type Cartesian<'a, 'b> = ChartContext<'a, SVGBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

const FONT: &str = "sans-serif";

/// Writes every chart to `<out_dir>/<file stem>.svg`.
pub struct SvgRenderer {
    out_dir: PathBuf,
    written: Vec<PathBuf>,
}

impl SvgRenderer {
    pub fn new<P: AsRef<Path>>(out_dir: P) -> Result<SvgRenderer, Error> {
        fs::create_dir_all(&out_dir)?;

        Ok(SvgRenderer {
            out_dir: out_dir.as_ref().to_path_buf(),
            written: Vec::new(),
        })
    }

    pub fn path_for(&self, chart: &ChartArtifact) -> PathBuf {
        self.out_dir.join(format!("{}.svg", chart.file_stem()))
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, chart: &ChartArtifact) -> Result<(), Error> {
        let path = self.path_for(chart);

        {
            let root = SVGBackend::new(&path, (chart.size.width, chart.size.height)).into_drawing_area();
            root.fill(&WHITE)?;
            draw(&root, chart)?;
            root.present()?;
        }

        info!("Wrote {} to {}", chart.title, path.display());
        self.written.push(path);
        Ok(())
    }
}

fn rgb(color: PaletteColor) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

/// Axis range around `min..max` with 5% room on each side. Falls back to
/// less room when the padded range would not fit into an f64.
fn padded(min: f64, max: f64) -> Range<f64> {
    let padding = if min == max {
        1.0f64.max(min.abs() * 0.05)
    } else {
        (max / 2.0 - min / 2.0) * 0.1
    };

    let start = (min - padding).max(std::f64::MIN);
    let end = (max + padding).min(std::f64::MAX);

    match stats::span(start, end) {
        Some(_) => start..end,
        None if min < max => min..max,
        None => (min - 1.0)..(max + 1.0),
    }
}

fn finite_points<'p>(points: &'p [(usize, f64)]) -> impl Iterator<Item = (f64, f64)> + 'p {
    points
        .iter()
        .filter(|(_, value)| value.is_finite())
        .map(|(index, value)| (*index as f64, *value))
}

fn cartesian<'a, 'b>(
    root: &'a Root<'b>,
    title: &str,
    x_range: Range<f64>,
    y_range: Range<f64>,
) -> Result<Cartesian<'a, 'b>, Error> {
    let chart_context = ChartBuilder::on(root)
        .caption(title, (FONT, 20))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(55)
        .build_cartesian_2d(x_range, y_range)?;

    Ok(chart_context)
}

fn draw(root: &Root, chart: &ChartArtifact) -> Result<(), Error> {
    let color = rgb(chart.color);

    match chart.data {
        ChartData::Line { ref points } => {
            let mut chart_context = indexed(root, chart, points, false)?;
            chart_context.draw_series(LineSeries::new(finite_points(points), &color))?;
        }
        ChartData::Scatter { ref points } => {
            let mut chart_context = indexed(root, chart, points, false)?;
            chart_context.draw_series(
                finite_points(points).map(|point| Circle::new(point, 3, color.filled())),
            )?;
        }
        ChartData::Bar { ref points } => {
            let mut chart_context = indexed(root, chart, points, true)?;
            chart_context.draw_series(
                finite_points(points)
                    .map(|(x, y)| Rectangle::new([(x - 0.4, 0.0), (x + 0.4, y)], color.filled())),
            )?;
        }
        ChartData::Area { ref points } => {
            let mut chart_context = indexed(root, chart, points, true)?;
            chart_context.draw_series(
                AreaSeries::new(finite_points(points), 0.0, &color.mix(0.3)).border_style(&color),
            )?;
        }
        ChartData::StackedBar { ref bars } => draw_stacked_bars(root, chart, bars)?,
        ChartData::Histogram { ref bins } => draw_histogram(root, chart, bins, color)?,
        ChartData::Box { ref summary } => draw_box(root, chart, summary, color)?,
        ChartData::Heatmap {
            ref cells,
            min,
            max,
        } => draw_heatmap(root, chart, cells, min, max, color)?,
        ChartData::Donut { ref slices, hole } => draw_pie(root, chart, slices, hole)?,
        ChartData::Pie { ref slices } => draw_pie(root, chart, slices, 0.0)?,
    }

    Ok(())
}

/// Value over index axes shared by line, scatter, bar and area charts.
fn indexed<'a, 'b>(
    root: &'a Root<'b>,
    chart: &ChartArtifact,
    points: &[(usize, f64)],
    from_zero: bool,
) -> Result<Cartesian<'a, 'b>, Error> {
    let values: Vec<f64> = points.iter().map(|(_, value)| *value).collect();
    let (mut min, mut max) = stats::value_range(&values).unwrap_or((0.0, 1.0));

    if from_zero {
        min = min.min(0.0);
        max = max.max(0.0);
    }

    let mut chart_context = cartesian(
        root,
        &chart.title,
        -0.5..(points.len() as f64 - 0.5),
        padded(min, max),
    )?;

    chart_context
        .configure_mesh()
        .x_desc("Index")
        .y_desc("Value")
        .draw()?;

    Ok(chart_context)
}

fn draw_stacked_bars(root: &Root, chart: &ChartArtifact, bars: &[Bar]) -> Result<(), Error> {
    let points: Vec<(usize, f64)> = bars.iter().map(|bar| (bar.index, bar.value)).collect();
    let mut chart_context = indexed(root, chart, &points, true)?;

    chart_context.draw_series(bars.iter().filter(|bar| bar.value.is_finite()).map(|bar| {
        let x = bar.index as f64;
        Rectangle::new([(x - 0.4, 0.0), (x + 0.4, bar.value)], rgb(bar.color).filled())
    }))?;

    Ok(())
}

fn draw_histogram(root: &Root, chart: &ChartArtifact, bins: &[Bin], color: RGBColor) -> Result<(), Error> {
    let start = bins.first().map(|bin| bin.start).unwrap_or(0.0);
    let end = bins.last().map(|bin| bin.end).unwrap_or(1.0);
    let highest = bins.iter().map(|bin| bin.count).max().unwrap_or(1) as f64;

    let mut chart_context = cartesian(root, &chart.title, start..end, 0.0..(highest * 1.1))?;

    chart_context
        .configure_mesh()
        .x_desc("Value")
        .y_desc("Count")
        .draw()?;

    chart_context.draw_series(bins.iter().map(|bin| {
        Rectangle::new([(bin.start, 0.0), (bin.end, bin.count as f64)], color.filled())
    }))?;

    chart_context.draw_series(bins.iter().map(|bin| {
        Rectangle::new([(bin.start, 0.0), (bin.end, bin.count as f64)], WHITE.stroke_width(1))
    }))?;

    Ok(())
}

fn draw_box(root: &Root, chart: &ChartArtifact, summary: &BoxSummary, color: RGBColor) -> Result<(), Error> {
    let (min, max) = summary.outliers.iter().fold(
        (summary.lower_whisker, summary.upper_whisker),
        |(min, max), outlier| (min.min(*outlier), max.max(*outlier)),
    );

    let mut chart_context = cartesian(root, &chart.title, -1.0..1.0, padded(min, max))?;

    chart_context
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|_| String::new())
        .y_desc("Value")
        .draw()?;

    chart_context.draw_series(vec![
        Rectangle::new([(-0.3, summary.q1), (0.3, summary.q3)], color.mix(0.3).filled()),
        Rectangle::new([(-0.3, summary.q1), (0.3, summary.q3)], color.stroke_width(2)),
    ])?;

    chart_context.draw_series(vec![
        PathElement::new(vec![(-0.3, summary.median), (0.3, summary.median)], color.stroke_width(2)),
        PathElement::new(vec![(0.0, summary.q3), (0.0, summary.upper_whisker)], color.stroke_width(1)),
        PathElement::new(vec![(0.0, summary.q1), (0.0, summary.lower_whisker)], color.stroke_width(1)),
        PathElement::new(
            vec![(-0.15, summary.upper_whisker), (0.15, summary.upper_whisker)],
            color.stroke_width(1),
        ),
        PathElement::new(
            vec![(-0.15, summary.lower_whisker), (0.15, summary.lower_whisker)],
            color.stroke_width(1),
        ),
    ])?;

    chart_context.draw_series(
        summary
            .outliers
            .iter()
            .map(|outlier| Circle::new((0.0, *outlier), 3, color.stroke_width(1))),
    )?;

    Ok(())
}

fn shade(color: RGBColor, intensity: f64) -> RGBColor {
    let blend = |channel: u8| (255.0 - (255.0 - channel as f64) * intensity).round() as u8;
    RGBColor(blend(color.0), blend(color.1), blend(color.2))
}

fn draw_heatmap(
    root: &Root,
    chart: &ChartArtifact,
    cells: &[(usize, f64)],
    min: f64,
    max: f64,
    color: RGBColor,
) -> Result<(), Error> {
    let mut chart_context = cartesian(root, &chart.title, 0.0..(cells.len() as f64), 0.0..1.0)?;

    chart_context
        .configure_mesh()
        .disable_mesh()
        .x_desc("Index")
        .y_label_formatter(&|_| String::new())
        .draw()?;

    chart_context.draw_series(finite_points(cells).map(|(x, value)| {
        let intensity = if max > min {
            (value / 2.0 - min / 2.0) / (max / 2.0 - min / 2.0)
        } else {
            0.5
        };
        Rectangle::new([(x, 0.0), (x + 1.0, 1.0)], shade(color, intensity).filled())
    }))?;

    Ok(())
}

fn arc(radius: f64, from: f64, to: f64) -> Vec<(f64, f64)> {
    let steps = (((to - from).abs() / (2.0 * PI) * 120.0).ceil() as usize).max(2);

    (0..=steps)
        .map(|step| {
            let angle = from + (to - from) * step as f64 / steps as f64;
            (radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

/// Pie chart, or a donut chart when `hole` is above zero.
fn draw_pie(root: &Root, chart: &ChartArtifact, slices: &[Slice], hole: f64) -> Result<(), Error> {
    let aspect = chart.size.width as f64 / chart.size.height.max(1) as f64;
    let mut chart_context = cartesian(root, &chart.title, (-1.3 * aspect)..(1.3 * aspect), -1.3..1.3)?;

    let total: usize = slices.iter().map(|slice| slice.count).sum();
    let label_radius = (1.0 + hole) / 2.0;
    let mut angle = PI / 2.0;

    for slice in slices {
        let sweep = 2.0 * PI * slice.count as f64 / total as f64;
        let next_angle = angle - sweep;

        let mut outline = arc(1.0, angle, next_angle);
        if hole > 0.0 {
            outline.extend(arc(hole, next_angle, angle));
        } else {
            outline.push((0.0, 0.0));
        }

        chart_context.draw_series(std::iter::once(Polygon::new(outline, rgb(slice.color).filled())))?;

        let middle = angle - sweep / 2.0;
        let share = 100.0 * slice.count as f64 / total as f64;
        chart_context.draw_series(std::iter::once(Text::new(
            format!("{} ({:.1}%)", slice.value, share),
            (label_radius * middle.cos(), label_radius * middle.sin()),
            (FONT, 12).into_font(),
        )))?;

        angle = next_angle;
    }

    Ok(())
}
