use regex::Regex;

lazy_static! {
    static ref CAN_ID_PATTERN: Regex = Regex::new(r"ID:\s*(0x[0-9A-Fa-f]+)").unwrap();
    static ref DATA_BYTES_PATTERN: Regex = Regex::new(r"Data Bytes:\s*(.*)").unwrap();
    static ref MEASUREMENT_PATTERN: Regex = Regex::new(r"(\w+):\s*(.*)").unwrap();
}

/// Removed from measurement values before parsing, in this order.
pub const UNIT_SUFFIXES: [&str; 4] = ["A", "rpm", "deg", "Nm"];

#[derive(PartialEq, Clone, Debug)]
pub enum LogLine {
    CanId(String),
    DataBytes(Vec<u8>),
    Measurement { name: String, value: f64 },
}

impl LogLine {
    /// Classifies one line of a CAN log dump.
    ///
    /// Data bytes and measurement lines are only recognised while a CAN ID
    /// is active. `Ok(None)` means the line carries nothing of interest,
    /// `Err` means it looked like data but could not be converted.
    pub fn new_from_log_line(
        log_line: &str,
        has_current_id: bool,
    ) -> Result<Option<LogLine>, &'static str> {
        if let Some(captures) = CAN_ID_PATTERN.captures(log_line) {
            return Ok(Some(LogLine::CanId(captures[1].to_string())));
        }

        if !has_current_id {
            return Ok(None);
        }

        if let Some(captures) = DATA_BYTES_PATTERN.captures(log_line) {
            return parse_data_bytes(&captures[1]).map(|bytes| Some(LogLine::DataBytes(bytes)));
        }

        if let Some(captures) = MEASUREMENT_PATTERN.captures(log_line) {
            let value = parse_measurement_value(&captures[2])?;

            return Ok(Some(LogLine::Measurement {
                name: captures[1].to_string(),
                value,
            }));
        }

        Ok(None)
    }
}

fn parse_data_bytes(tokens: &str) -> Result<Vec<u8>, &'static str> {
    tokens
        .split_whitespace()
        .map(|token| {
            if token.len() != 2 || !token.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err("Data byte is not two hex digits");
            }

            u8::from_str_radix(token, 16).map_err(|_| "Data byte is not two hex digits")
        })
        .collect()
}

pub fn strip_units(value: &str) -> String {
    UNIT_SUFFIXES
        .iter()
        .fold(value.to_string(), |stripped, unit| stripped.replace(unit, ""))
}

fn parse_measurement_value(value: &str) -> Result<f64, &'static str> {
    match strip_units(value).trim().parse() {
        Ok(number) => Ok(number),
        Err(_) => Err("Measurement value is not numeric"),
    }
}
