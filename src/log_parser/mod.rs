use std::io;
use std::io::BufRead;

use failure::Error;

use crate::dataset::Dataset;
use crate::error::PlotterError;

pub mod log_lines;
use self::log_lines::*;

/// Reads a whole CAN log dump into a `Dataset`.
///
/// Lines that cannot be converted are skipped. A read or decoding failure
/// aborts the parse and nothing of what was read so far is returned.
pub fn parse(reader: &mut dyn io::Read) -> Result<Dataset, Error> {
    let input = io::BufReader::new(reader);

    let mut dataset = Dataset::new();
    let mut current_id: Option<String> = None;
    let mut skipped_lines: usize = 0;

    for (line_number, line) in input.lines().enumerate() {
        let line_value = line.map_err(PlotterError::ReadInput)?;

        match LogLine::new_from_log_line(&line_value, current_id.is_some()) {
            Ok(Some(LogLine::CanId(id))) => {
                dataset.frame_mut(&id);
                current_id = Some(id);
            }
            Ok(Some(LogLine::DataBytes(bytes))) => {
                if let Some(ref id) = current_id {
                    dataset.frame_mut(id).push_bytes(bytes);
                }
            }
            Ok(Some(LogLine::Measurement { name, value })) => {
                if let Some(ref id) = current_id {
                    dataset.frame_mut(id).push_scalar(&name, value);
                }
            }
            Ok(None) => (),
            Err(err) => {
                skipped_lines += 1;
                debug!("Skipped line {}: {}", line_number + 1, err);
            }
        }
    }

    info!(
        "Parsed {} CAN IDs, skipped {} lines",
        dataset.len(),
        skipped_lines
    );

    Ok(dataset)
}

#[cfg(test)]
pub fn parse_str(text: &str) -> Result<Dataset, Error> {
    parse(&mut text.as_bytes())
}
