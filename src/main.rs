use clap::Parser;
use log::warn;
use snafu::ErrorCompat;
use std::path::PathBuf;

mod args;
mod pipeline;

use crate::args::Args;
use crate::pipeline::PipelineOptions;

fn main() {
    let args = Args::parse();

    let mut builder = env_logger::Builder::from_default_env();
    if args.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();

    let data_dir = PathBuf::from(args.data_dir.unwrap_or_else(|| "data".to_string()));
    let out_path = match args.out {
        Some(p) => PathBuf::from(p),
        None => data_dir.join("roll-calls.tab"),
    };

    let opts = PipelineOptions {
        data_dir,
        out_path,
        summary: args.summary,
        reference: args.reference,
    };

    if let Err(e) = pipeline::run_pipeline(&opts) {
        warn!("Error occured {:?}", e);
        eprintln!("An error occured {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
