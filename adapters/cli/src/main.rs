#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Entry point for the Planet Builder command-line interface.

use std::process;

use clap::Parser;
use planet_builder_cli::Args;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    if let Err(err) = planet_builder_cli::run(&args) {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}
