use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;
use log::info;

use root_length_rust_lib::calibration::{calibrate, reference_region};
use root_length_rust_lib::config::Config;
use root_length_rust_lib::errors::Result;
use root_length_rust_lib::gui::MinifbFrontend;
use root_length_rust_lib::image_io::load_image;
use root_length_rust_lib::session::run_session;
use root_length_rust_lib::binarize::to_grayscale;

/// Command-line arguments
#[derive(Parser, Debug)]
#[clap(author, version, about = "RootLengthR - Plant Root Length Measurement")]
struct Args {
    /// Path to the scanned image
    image: PathBuf,

    /// Path to configuration file (compiled-in defaults when omitted)
    #[clap(short, long)]
    config: Option<PathBuf>,
}

fn print_banner() {
    println!("RootLengthR {}", env!("CARGO_PKG_VERSION"));
    println!("Copyright (C) 2022 Johannes Fahr");
    println!("This program comes with ABSOLUTELY NO WARRANTY;");
    println!("This is free software, and you are welcome to");
    println!("redistribute it under certain conditions;");
    println!();
}

/// Main function
fn main() -> Result<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            // Usage errors go to stdout with a failure status
            println!("{}", e.render());
            std::process::exit(1);
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    print_banner();

    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config.validate()?;

    let input = load_image(&args.image)?;
    info!(
        "Loaded {} ({}x{})",
        input.filename,
        input.image.width(),
        input.image.height()
    );

    let mut frontend = MinifbFrontend::new(&config);

    let region = reference_region(
        &input.image,
        config.reference_view_width,
        config.reference_view_height,
    )?;
    let calibration = calibrate(&mut frontend, region, &config)?;
    let scale = calibration.scale()?;

    let gray = to_grayscale(&input.image);
    let outcome = run_session(&mut frontend, &gray, &input.image, scale, &config)?;

    for m in &outcome.frame.measurements {
        info!(
            "Root {} at ({}, {}) {}x{}: {:.6}",
            m.contour_index,
            m.source_bounds.x,
            m.source_bounds.y,
            m.source_bounds.width,
            m.source_bounds.height,
            m.length
        );
    }
    info!(
        "Finished {} at threshold {}: {} roots, total length {:.6}",
        input.filename,
        outcome.threshold.value(),
        outcome.frame.measurements.len(),
        outcome.frame.total_length()
    );

    Ok(())
}
