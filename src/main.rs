#[macro_use]
extern crate clap;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

use std::io::{self, Write};
use std::process;

use failure::Error;

mod args;
mod chart;
mod dataset;
mod error;
mod input;
mod log_parser;
mod plot;
mod render;
mod session;

use crate::dataset::Dataset;
use crate::render::svg::SvgRenderer;
use crate::render::terminal::{self, TerminalRenderer};
use crate::render::Renderer;
use crate::session::PlotSession;

fn load_dataset(filename: &str, stdout: &mut dyn Write) -> Result<Dataset, Error> {
    let mut input = input::open_input(filename)?;

    match log_parser::parse(&mut *input) {
        Ok(dataset) => Ok(dataset),
        Err(err) => {
            error!("{}", err);
            writeln!(stdout, "{}", err)?;
            Ok(Dataset::new())
        }
    }
}

pub fn run(args: &args::PlotterArgs, stdout: &mut dyn Write) -> Result<(), Error> {
    let dataset = load_dataset(&args.filename, stdout)?;

    if dataset.is_empty() {
        warn!("No CAN IDs in {}", args.filename);
        writeln!(stdout, "No data found or file is empty.")?;
        return Ok(());
    }

    if !args.quiet {
        terminal::write_listing(&dataset, stdout)?;
    }

    let can_id = match args.can_id {
        Some(ref can_id) if !args.list_only => can_id,
        _ => return Ok(()),
    };

    if dataset.frame(can_id).is_none() {
        warn!("CAN ID {} not found in {}", can_id, args.filename);
        writeln!(stdout, "Unknown CAN ID: {}", can_id)?;
        return Ok(());
    }

    let measurements: Vec<String> = if args.all_measurements {
        dataset
            .measurement_names(can_id)
            .into_iter()
            .map(String::from)
            .collect()
    } else {
        args.measurements.clone()
    };

    if measurements.is_empty() {
        writeln!(stdout, "Select measurements to plot.")?;
        return Ok(());
    }

    let mut session = PlotSession::new(args.size);
    session.select_id(can_id);

    let outcome = session.plot(&measurements, &dataset, &args.chart_type)?;
    for message in &outcome.messages {
        writeln!(stdout, "{}", message)?;
    }

    let mut svg_renderer = SvgRenderer::new(&args.out_dir)?;

    for chart in session.charts() {
        svg_renderer.render(chart)?;

        if !args.quiet {
            TerminalRenderer::new(stdout).render(chart)?;
            if let Some(path) = svg_renderer.written().last() {
                writeln!(stdout, "file:\t{}", path.display())?;
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match args::parse_args(std::env::args()) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if let Err(err) = run(&args, &mut handle) {
        error!("{}", err);
        for cause in err.iter_causes() {
            eprintln!("Caused by: {}", cause);
        }
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}
