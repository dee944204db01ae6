//! The `c3c` binary entry point: argument parsing, logger setup, and
//! dispatch into [`c3c_cli::driver::compile`].

use c3c_cli::driver;
use c3c_config::{BuildTarget, Opts};
use c3c_interface::Session;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_tracing();

    let opts = Opts::parse();
    let session = Session::new();

    let target = match BuildTarget::from_opts(&opts) {
        Ok(target) => target,
        Err(err) => session.dcx.fatal(err),
    };

    match driver::compile(&target, session) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("C3C_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}
