use clap::{App, Arg};
use failure::{err_msg, Error};

use crate::chart::ChartSize;

#[derive(PartialEq, Debug)]
pub struct PlotterArgs {
    pub filename: String,
    pub can_id: Option<String>,
    pub measurements: Vec<String>,
    pub all_measurements: bool,
    pub chart_type: String,
    pub out_dir: String,
    pub size: ChartSize,
    pub list_only: bool,
    pub quiet: bool,
}

fn parse_pixels(value: Option<&str>, name: &str) -> Result<u32, Error> {
    match value.unwrap_or("").parse() {
        Ok(pixels) => Ok(pixels),
        Err(err) => Err(err_msg(format!("--{} must be numeric ({})", name, err))),
    }
}

pub fn parse_args<T>(args: T) -> Result<PlotterArgs, Error>
where
    T: IntoIterator<Item = String>,
{
    let app = App::new("CAN Bus Data Plotter")
        .author(crate_authors!())
        .version(crate_version!())
        .after_help(crate_description!())
        .arg(
            Arg::with_name("filename")
                .index(1)
                .value_name("FILE")
                .required(false)
                .help("CAN log dump to plot, defaults to stdin, *.gz is decompressed")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("id")
                .value_name("CAN_ID")
                .short("i")
                .long("id")
                .help("CAN ID to plot, e.g. '0x100'. Without it the IDs are only listed")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("measurement")
                .value_name("NAME")
                .short("m")
                .long("measurement")
                .help("Measurement to plot, may be repeated")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1),
        )
        .arg(
            Arg::with_name("all")
                .short("a")
                .long("all")
                .help("Plot every measurement of the CAN ID"),
        )
        .arg(
            Arg::with_name("chart")
                .value_name("CHART_TYPE")
                .short("c")
                .long("chart")
                .help(
                    "Chart type: line, bar, scatter, area, histogram, box, \
                     stacked-bar, donut, heatmap or pie",
                )
                .takes_value(true)
                .default_value("line"),
        )
        .arg(
            Arg::with_name("out-dir")
                .value_name("DIR")
                .short("o")
                .long("out-dir")
                .help("Directory the SVG charts are written to")
                .takes_value(true)
                .default_value("."),
        )
        .arg(
            Arg::with_name("width")
                .value_name("PIXELS")
                .long("width")
                .takes_value(true)
                .default_value("700"),
        )
        .arg(
            Arg::with_name("height")
                .value_name("PIXELS")
                .long("height")
                .takes_value(true)
                .default_value("400"),
        )
        .arg(
            Arg::with_name("list")
                .short("l")
                .long("list")
                .help("Only list the CAN IDs and their measurements"),
        )
        .arg(Arg::with_name("quiet").short("q").long("quiet").help(
            "Don't output listings and chart summaries to stdout",
        ))
        .get_matches_from(args);

    let filename = app.value_of("filename").unwrap_or("-").to_string();

    let can_id = app.value_of("id").map(String::from);

    let measurements = match app.values_of("measurement") {
        Some(values) => values.map(String::from).collect(),
        None => vec![],
    };

    let size = ChartSize {
        width: parse_pixels(app.value_of("width"), "width")?,
        height: parse_pixels(app.value_of("height"), "height")?,
    };

    Ok(PlotterArgs {
        filename,
        can_id,
        measurements,
        all_measurements: app.is_present("all"),
        chart_type: app.value_of("chart").unwrap_or("line").to_string(),
        out_dir: app.value_of("out-dir").unwrap_or(".").to_string(),
        size,
        list_only: app.is_present("list"),
        quiet: app.is_present("quiet"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args_default() {
        let raw_args = vec!["can_log_plotter".to_string()];

        let expected = PlotterArgs {
            filename: String::from("-"),
            can_id: None,
            measurements: vec![],
            all_measurements: false,
            chart_type: String::from("line"),
            out_dir: String::from("."),
            size: ChartSize {
                width: 700,
                height: 400,
            },
            list_only: false,
            quiet: false,
        };

        let result = parse_args(raw_args).unwrap();

        assert_eq!(result, expected);
    }

    #[test]
    fn test_parse_args_all() {
        let raw_args = vec![
            String::from("can_log_plotter"),
            String::from("--id"),
            String::from("0x100"),
            String::from("-m"),
            String::from("RPM"),
            String::from("--measurement"),
            String::from("Current"),
            String::from("--all"),
            String::from("--chart"),
            String::from("Donut Chart"),
            String::from("my-dump.txt"),
            String::from("--out-dir"),
            String::from("charts"),
            String::from("--width"),
            String::from("1024"),
            String::from("--height"),
            String::from("768"),
            String::from("--list"),
            String::from("--quiet"),
        ];

        let expected = PlotterArgs {
            filename: String::from("my-dump.txt"),
            can_id: Some(String::from("0x100")),
            measurements: vec![String::from("RPM"), String::from("Current")],
            all_measurements: true,
            chart_type: String::from("Donut Chart"),
            out_dir: String::from("charts"),
            size: ChartSize {
                width: 1024,
                height: 768,
            },
            list_only: true,
            quiet: true,
        };

        let result = parse_args(raw_args).unwrap();

        assert_eq!(result, expected);
    }

    #[test]
    fn test_invalid_width() {
        let raw_args = vec![
            String::from("can_log_plotter"),
            String::from("--width"),
            String::from("wide"),
        ];

        let error_message = match parse_args(raw_args) {
            Err(fail) => format!("{}", fail),
            Ok(_) => unreachable!(),
        };

        assert!(error_message.contains("--width must be numeric"));
    }

    #[test]
    fn test_invalid_height() {
        let raw_args = vec![
            String::from("can_log_plotter"),
            String::from("--height"),
            String::from("tall"),
        ];

        let error_message = match parse_args(raw_args) {
            Err(fail) => format!("{}", fail),
            Ok(_) => unreachable!(),
        };

        assert!(error_message.contains("--height must be numeric"));
    }
}
