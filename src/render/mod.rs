use failure::Error;

use crate::chart::ChartArtifact;

pub mod svg;
pub mod terminal;

pub trait Renderer {
    fn render(&mut self, chart: &ChartArtifact) -> Result<(), Error>;
}
