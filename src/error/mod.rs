use failure::Fail;

#[derive(Debug, Fail)]
pub enum PlotterError {
    #[fail(display = "Cannot open {}: {}", filename, cause)]
    OpenInput {
        filename: String,
        #[fail(cause)]
        cause: std::io::Error,
    },

    #[fail(display = "Error reading the file: {}", _0)]
    ReadInput(#[fail(cause)] std::io::Error),

    #[fail(display = "Unsupported chart type: {}", _0)]
    UnsupportedChartType(String),

    #[fail(display = "A plot is already in progress")]
    PlotInProgress,

    #[fail(display = "No CAN ID selected")]
    NoIdSelected,
}

#[cfg(test)]
mod tests {
    use std::io;
    use super::*;

    #[test]
    fn test_read_input_message() {
        let error = PlotterError::ReadInput(io::Error::new(
            io::ErrorKind::InvalidData,
            "stream did not contain valid UTF-8",
        ));

        assert_eq!(
            format!("{}", error),
            "Error reading the file: stream did not contain valid UTF-8"
        );
    }

    #[test]
    fn test_open_input_message() {
        let error = PlotterError::OpenInput {
            filename: String::from("missing.txt"),
            cause: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };

        assert!(format!("{}", error).starts_with("Cannot open missing.txt"));
        assert!(error.cause().is_some());
    }
}
