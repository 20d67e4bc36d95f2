use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod controller;
mod domain;
mod inputter;
mod model;
mod ui;

use controller::Controller;
use domain::{PTVConfig, PTVError};
use model::{Model, Status};

/// A console based tabular data viewer.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Comma delimited input file, first line holds the column names
    #[arg(default_value = "property_data.csv")]
    path: String,

    /// Stop reading the input after this many data rows
    #[arg(long)]
    max_rows: Option<usize>,
}

fn main() -> ExitCode {
    match run() {
        Err(e) => {
            eprintln!("Error: {:?}", e);
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}

fn run() -> Result<(), PTVError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let path = shellexpand::full(&args.path)
        .map_err(|e| PTVError::LoadingFailed(e.to_string()))?
        .into_owned();

    let cfg = PTVConfig::default().max_rows(args.max_rows);

    let mut model = Model::load(PathBuf::from(path), &cfg)?;
    println!("Starting ptv!");

    let mut controller = Controller::new(&cfg);

    while model.status != Status::EXITING {
        if let Some(message) = controller.handle_input(&model)? {
            model.update(message)?;
        }
    }

    Ok(())
}
