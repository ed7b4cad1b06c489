//! Plot session: remembers the charts plotted for the selected CAN ID.
//!
//! A session is `Idle` or `Plotting`. While plotting, further plot requests
//! are refused. Finished plots are appended to the charts of the selected
//! CAN ID; selecting another ID starts over with an empty list.

use failure::Error;

use crate::chart::{ChartArtifact, ChartSize};
use crate::dataset::Dataset;
use crate::error::PlotterError;
use crate::plot::{self, PlotOutcome};

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum PlotState {
    Idle,
    Plotting,
}

#[derive(Debug)]
pub struct PlotSession {
    selected_id: Option<String>,
    state: PlotState,
    charts: Vec<ChartArtifact>,
    size: ChartSize,
}

impl PlotSession {
    pub fn new(size: ChartSize) -> PlotSession {
        PlotSession {
            selected_id: None,
            state: PlotState::Idle,
            charts: Vec::new(),
            size,
        }
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_ref().map(|id| id.as_str())
    }

    #[cfg(test)]
    pub fn state(&self) -> PlotState {
        self.state
    }

    /// Charts plotted for the selected CAN ID, oldest first.
    pub fn charts(&self) -> &[ChartArtifact] {
        &self.charts
    }

    pub fn select_id(&mut self, id: &str) {
        if self.selected_id() == Some(id) {
            return;
        }

        if !self.charts.is_empty() {
            info!(
                "CAN ID changed to {}, dropping {} charts",
                id,
                self.charts.len()
            );
        }

        self.charts.clear();
        self.selected_id = Some(id.to_string());
    }

    pub fn begin_plot(&mut self) -> Result<(), Error> {
        if self.state == PlotState::Plotting {
            return Err(PlotterError::PlotInProgress.into());
        }

        if self.selected_id.is_none() {
            return Err(PlotterError::NoIdSelected.into());
        }

        self.state = PlotState::Plotting;
        Ok(())
    }

    pub fn finish_plot(&mut self, outcome: &PlotOutcome) {
        self.charts.extend(outcome.charts.iter().cloned());
        self.state = PlotState::Idle;
    }

    /// Plots `measurements` of the selected CAN ID and keeps the charts.
    pub fn plot<S: AsRef<str>>(
        &mut self,
        measurements: &[S],
        data: &Dataset,
        chart_type: &str,
    ) -> Result<PlotOutcome, Error> {
        self.begin_plot()?;

        let outcome = match self.selected_id {
            Some(ref id) => plot::plot_data(id, measurements, data, chart_type, self.size),
            None => PlotOutcome::default(),
        };

        self.finish_plot(&outcome);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use crate::log_parser;
    use super::*;

    fn get_fixture() -> Dataset {
        log_parser::parse_str("ID: 0x1\nRPM: 1\nRPM: 2\nID: 0x2\nSpeed: 30\n").unwrap()
    }

    #[test]
    fn test_charts_accumulate_for_selected_id() {
        let dataset = get_fixture();
        let mut session = PlotSession::new(ChartSize::default());

        session.select_id("0x1");
        session.plot(&["RPM"], &dataset, "Line Chart").unwrap();
        session.plot(&["RPM"], &dataset, "Bar Chart").unwrap();

        assert_eq!(session.state(), PlotState::Idle);
        assert_eq!(session.charts().len(), 2);
        assert_eq!(session.charts()[0].title, "Line Chart for RPM");
        assert_eq!(session.charts()[1].title, "Bar Chart for RPM");
    }

    #[test]
    fn test_changing_id_clears_charts() {
        let dataset = get_fixture();
        let mut session = PlotSession::new(ChartSize::default());

        session.select_id("0x1");
        session.plot(&["RPM"], &dataset, "Line Chart").unwrap();
        session.select_id("0x2");

        assert!(session.charts().is_empty());
        assert_eq!(session.selected_id(), Some("0x2"));

        session.plot(&["Speed"], &dataset, "Scatter Plot").unwrap();
        assert_eq!(session.charts().len(), 1);
        assert_eq!(session.charts()[0].id, "0x2");
    }

    #[test]
    fn test_reselecting_same_id_keeps_charts() {
        let dataset = get_fixture();
        let mut session = PlotSession::new(ChartSize::default());

        session.select_id("0x1");
        session.plot(&["RPM"], &dataset, "Line Chart").unwrap();
        session.select_id("0x1");

        assert_eq!(session.charts().len(), 1);
    }

    #[test]
    fn test_plot_refused_while_plotting() {
        let mut session = PlotSession::new(ChartSize::default());
        session.select_id("0x1");

        session.begin_plot().unwrap();

        let error_message = match session.begin_plot() {
            Err(fail) => format!("{}", fail),
            Ok(_) => unreachable!(),
        };
        assert_eq!(error_message, "A plot is already in progress");
        assert_eq!(session.state(), PlotState::Plotting);

        session.finish_plot(&PlotOutcome::default());
        assert_eq!(session.state(), PlotState::Idle);
        assert!(session.begin_plot().is_ok());
    }

    #[test]
    fn test_plot_without_selected_id() {
        let dataset = get_fixture();
        let mut session = PlotSession::new(ChartSize::default());

        assert!(session.plot(&["RPM"], &dataset, "Line Chart").is_err());
        assert_eq!(session.state(), PlotState::Idle);
    }

    #[test]
    fn test_failed_plot_keeps_previous_charts() {
        let dataset = get_fixture();
        let mut session = PlotSession::new(ChartSize::default());

        session.select_id("0x1");
        session.plot(&["RPM"], &dataset, "Line Chart").unwrap();
        let outcome = session.plot(&["RPM"], &dataset, "Pyramid Chart").unwrap();

        assert!(outcome.charts.is_empty());
        assert_eq!(session.charts().len(), 1);
    }
}
