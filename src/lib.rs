//! A diagnostic tool that measures how much CPU time a raw sequential disk
//! read costs.
//!
//! The device's buffers are flushed, the system's CPU counters are sampled, a
//! large read is done from the start of the device, the counters are sampled
//! again, and the busy share of the elapsed CPU time is compared against a
//! threshold.

pub mod collection;
pub mod constants;
pub mod device;
pub mod load;
pub mod measure;
pub mod options;
pub mod utils {
    pub mod logging;
}

use std::{io, path::Path, process::ExitCode};

use anyhow::Context;
use clap::Parser;

use crate::{
    collection::cpu::ProcStat,
    measure::run_measurement,
    options::{args::DiskLoadArgs, init_measure_config, read_config},
};

/// Parses the arguments, runs a single measurement, and returns the exit code
/// for it. Problems with the options themselves are returned as errors.
pub fn start_disk_cpu_load() -> anyhow::Result<ExitCode> {
    let args = DiskLoadArgs::parse();

    #[cfg(feature = "logging")]
    {
        if let Err(err) = utils::logging::init_logger(
            log::LevelFilter::Debug,
            std::ffi::OsStr::new(constants::DEBUG_LOG_FILE_NAME),
        ) {
            println!("Issue initializing logger: {err}");
        }
    }

    let config = read_config(args.config.as_deref().map(Path::new))
        .context("Unable to properly parse or read the config file.")?;
    let measure_config = init_measure_config(args, &config)?;
    crate::info!("Resolved options: {measure_config:?}");

    let counters = ProcStat::new(&measure_config.stat_file);
    let device = measure_config.backend.device_ops();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match run_measurement(&measure_config, &counters, device.as_ref(), &mut out) {
        Ok(measurement) if measurement.exceeds_threshold() => Ok(ExitCode::FAILURE),
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            crate::error!("Measurement aborted: {err}");
            eprintln!("Error: {err}");
            Ok(ExitCode::from(err.exit_code()))
        }
    }
}
