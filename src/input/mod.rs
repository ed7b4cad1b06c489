use std::fs::File;
use std::io;

use failure::Error;
use flate2::read::GzDecoder;

use crate::error::PlotterError;

/// Opens a log for reading: `-` is stdin, `*.gz` is decompressed on the fly.
pub fn open_input(filename: &str) -> Result<Box<dyn io::Read>, Error> {
    if filename == "-" {
        info!("Reading CAN log from stdin");
        return Ok(Box::new(io::stdin()));
    }

    let file = File::open(filename).map_err(|cause| PlotterError::OpenInput {
        filename: filename.to_string(),
        cause,
    })?;

    if filename.ends_with(".gz") {
        info!("Reading gzip compressed CAN log {}", filename);
        Ok(Box::new(GzDecoder::new(file)))
    } else {
        info!("Reading CAN log {}", filename);
        Ok(Box::new(file))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;

    #[test]
    fn test_open_plain() {
        let mut input = open_input("src/test/simple.log").unwrap();
        let mut text = String::new();

        input.read_to_string(&mut text).unwrap();

        assert!(text.starts_with("CAN log dump"));
    }

    #[test]
    fn test_open_gzip_matches_plain() {
        let mut plain = String::new();
        let mut unzipped = String::new();

        open_input("src/test/simple.log").unwrap().read_to_string(&mut plain).unwrap();
        open_input("src/test/simple.log.gz").unwrap().read_to_string(&mut unzipped).unwrap();

        assert_eq!(plain, unzipped);
    }

    #[test]
    fn test_open_missing_file() {
        let error_message = match open_input("src/test/does-not-exist.log") {
            Err(fail) => format!("{}", fail),
            Ok(_) => unreachable!(),
        };

        assert!(error_message.contains("Cannot open src/test/does-not-exist.log"));
    }
}
