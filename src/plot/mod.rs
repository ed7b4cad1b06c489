use std::fmt;

use crate::chart::{ChartArtifact, ChartKind, ChartSize};
use crate::dataset::Dataset;

#[derive(PartialEq, Clone, Debug)]
pub enum PlotMessage {
    NoMeasurementsSelected,
    UnsupportedChartType(String),
    NoData(String),
    RangeTooWide(String),
    NoDataAvailable,
}

impl fmt::Display for PlotMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PlotMessage::NoMeasurementsSelected => write!(f, "No measurements selected for plotting."),
            PlotMessage::UnsupportedChartType(kind) => write!(f, "Unsupported chart type: {}", kind),
            PlotMessage::NoData(measurement) => write!(f, "No data for {}.", measurement),
            PlotMessage::RangeTooWide(measurement) => {
                write!(f, "Values of {} span too wide a range to plot.", measurement)
            }
            PlotMessage::NoDataAvailable => {
                write!(f, "No data available for the selected measurements.")
            }
        }
    }
}

#[derive(PartialEq, Clone, Debug, Default)]
pub struct PlotOutcome {
    pub charts: Vec<ChartArtifact>,
    pub messages: Vec<PlotMessage>,
}

/// Builds one chart per selected measurement of `selected_id`.
///
/// Problems never fail the call, they end up in `PlotOutcome::messages`.
pub fn plot_data<S: AsRef<str>>(
    selected_id: &str,
    selected_measurements: &[S],
    data: &Dataset,
    chart_type: &str,
    size: ChartSize,
) -> PlotOutcome {
    let mut outcome = PlotOutcome::default();

    if selected_measurements.is_empty() {
        outcome.messages.push(PlotMessage::NoMeasurementsSelected);
        return outcome;
    }

    let kind: ChartKind = match chart_type.parse() {
        Ok(kind) => kind,
        Err(err) => {
            warn!("{}", err);
            outcome
                .messages
                .push(PlotMessage::UnsupportedChartType(chart_type.to_string()));
            return outcome;
        }
    };

    for (i, measurement) in selected_measurements.iter().enumerate() {
        let measurement = measurement.as_ref();
        let values = data.scalars(selected_id, measurement).unwrap_or(&[]);

        if !kind.can_scale(values) {
            warn!("{} of {} cannot be drawn as {}", measurement, selected_id, kind);
            outcome.messages.push(PlotMessage::RangeTooWide(measurement.to_string()));
            continue;
        }

        match ChartArtifact::build(selected_id, measurement, kind, values, i, size) {
            Some(chart) => outcome.charts.push(chart),
            None => {
                debug!("No {} data for {} of {}", kind, measurement, selected_id);
                outcome.messages.push(PlotMessage::NoData(measurement.to_string()));
            }
        }
    }

    if outcome.charts.is_empty() {
        outcome.messages.push(PlotMessage::NoDataAvailable);
    }

    outcome
}
