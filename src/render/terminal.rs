use std::io::prelude::*;

use failure::Error;

use crate::chart::{ChartArtifact, ChartData};
use crate::dataset::Dataset;
use crate::render::Renderer;

/// Lists the sorted CAN IDs and, per ID, the measurements that can be plotted
/// and the number of recorded payloads.
pub fn write_listing(dataset: &Dataset, stream: &mut dyn Write) -> Result<(), Error> {
    writeln!(stream, "Unique CAN IDs:\t{}", dataset.sorted_ids().join(", "))?;

    for id in dataset.ids() {
        let names = dataset.measurement_names(id);

        if names.is_empty() {
            writeln!(stream, "{}:\t(no measurements)", id)?;
        } else {
            writeln!(stream, "{}:\t{}", id, names.join(", "))?;
        }

        if let Some(frames) = dataset.data_bytes(id) {
            writeln!(stream, "{} data bytes:\t{} frames", id, frames.len())?;
        }
    }

    Ok(())
}

/// Short textual description of each chart, one `key:\tvalue` per line.
pub struct TerminalRenderer<'a> {
    stream: &'a mut dyn Write,
}

impl<'a> TerminalRenderer<'a> {
    pub fn new(stream: &'a mut dyn Write) -> TerminalRenderer {
        TerminalRenderer { stream }
    }
}

impl<'a> Renderer for TerminalRenderer<'a> {
    fn render(&mut self, chart: &ChartArtifact) -> Result<(), Error> {
        let stream = &mut self.stream;
        let mut write = |text: String| writeln!(stream, "{}", text);

        write(format!("chart:\t{}", chart.title))?;
        write(format!("can_id:\t{}", chart.id))?;
        write(format!("color:\t{}", chart.color))?;

        match chart.data {
            ChartData::Line { ref points }
            | ChartData::Bar { ref points }
            | ChartData::Scatter { ref points }
            | ChartData::Area { ref points } => write(format!("points:\t{}", points.len()))?,
            ChartData::StackedBar { ref bars } => write(format!("bars:\t{}", bars.len()))?,
            ChartData::Histogram { ref bins } => write(format!("bins:\t{}", bins.len()))?,
            ChartData::Box { ref summary } => {
                write(format!("median:\t{}", summary.median))?;
                write(format!("outliers:\t{}", summary.outliers.len()))?;
            }
            ChartData::Donut { ref slices, .. } | ChartData::Pie { ref slices } => {
                write(format!("slices:\t{}", slices.len()))?
            }
            ChartData::Heatmap { ref cells, min, max } => {
                write(format!("cells:\t{}", cells.len()))?;
                write(format!("range:\t{} .. {}", min, max))?;
            }
        }

        Ok(())
    }
}
