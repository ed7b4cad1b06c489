//! Parsed CAN log data: frame identifier -> series name -> values.
//!
//! Identifiers and series keep the order in which they first appeared in
//! the log, which is also the order they are offered for plotting.

use indexmap::IndexMap;

/// Reserved series name for the raw frame payloads.
pub const DATA_BYTES: &str = "Data Bytes";

#[derive(Clone, Debug, PartialEq)]
pub enum Series {
    Scalars(Vec<f64>),
    Bytes(Vec<Vec<u8>>),
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Frame {
    series: IndexMap<String, Series>,
}

impl Frame {
    pub fn new() -> Frame {
        Frame {
            series: IndexMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Series> {
        self.series.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(|name| name.as_str())
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn push_scalar(&mut self, name: &str, value: f64) {
        match self.entry(name, || Series::Scalars(Vec::new())) {
            Series::Scalars(values) => values.push(value),
            Series::Bytes(_) => warn!("Series {} holds data bytes, dropped value {}", name, value),
        }
    }

    pub fn push_bytes(&mut self, bytes: Vec<u8>) {
        match self.entry(DATA_BYTES, || Series::Bytes(Vec::new())) {
            Series::Bytes(frames) => frames.push(bytes),
            Series::Scalars(_) => warn!("Series {} holds scalars, dropped data bytes", DATA_BYTES),
        }
    }

    fn entry<F>(&mut self, name: &str, empty: F) -> &mut Series
    where
        F: FnOnce() -> Series,
    {
        self.series.entry(name.to_string()).or_insert_with(empty)
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Dataset {
    frames: IndexMap<String, Frame>,
}

impl Dataset {
    pub fn new() -> Dataset {
        Dataset {
            frames: IndexMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Identifiers in order of first appearance.
    pub fn ids(&self) -> Vec<&str> {
        self.frames.keys().map(|id| id.as_str()).collect()
    }

    pub fn sorted_ids(&self) -> Vec<&str> {
        let mut ids = self.ids();
        ids.sort();
        ids
    }

    pub fn frame(&self, id: &str) -> Option<&Frame> {
        self.frames.get(id)
    }

    /// Returns the frame for `id`, registering the identifier if it is new.
    pub fn frame_mut(&mut self, id: &str) -> &mut Frame {
        self.frames.entry(id.to_string()).or_insert_with(Frame::new)
    }

    /// Plottable series names of `id`, i.e. everything except the data bytes.
    pub fn measurement_names(&self, id: &str) -> Vec<&str> {
        match self.frame(id) {
            Some(frame) => frame.names().filter(|name| *name != DATA_BYTES).collect(),
            None => Vec::new(),
        }
    }

    pub fn scalars(&self, id: &str, name: &str) -> Option<&[f64]> {
        match self.frame(id)?.get(name)? {
            Series::Scalars(values) => Some(values.as_slice()),
            Series::Bytes(_) => None,
        }
    }

    pub fn data_bytes(&self, id: &str) -> Option<&[Vec<u8>]> {
        match self.frame(id)?.get(DATA_BYTES)? {
            Series::Bytes(frames) => Some(frames.as_slice()),
            Series::Scalars(_) => None,
        }
    }
}
