//! Sequences a single measurement: flush, snapshot, read, snapshot, compare.
//!
//! Everything here runs one step at a time on the calling thread. Overlapping
//! the read with either snapshot would skew the result.

use std::{
    io::{self, Write},
    time::{Duration, Instant},
};

use thiserror::Error;

use crate::{
    collection::{cpu::CounterSource, error::CollectionError},
    device::{DeviceOps, ExecutionFailure},
    load::{compute_cpu_load, CpuLoad},
    options::MeasureConfig,
};

/// Something went wrong before a load could be measured.
#[derive(Debug, Error)]
pub enum MeasureError {
    #[error(transparent)]
    Collection(#[from] CollectionError),

    #[error(transparent)]
    Execution(#[from] ExecutionFailure),

    #[error("unable to write the report: {0}")]
    Report(#[from] io::Error),
}

impl MeasureError {
    /// The exit code to report. A failed operation's own status code is passed
    /// through when there is one that fits, otherwise this is 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            MeasureError::Execution(failure) => failure
                .status_code()
                .and_then(|code| u8::try_from(code).ok())
                .filter(|&code| code != 0)
                .unwrap_or(1),
            MeasureError::Collection(_) | MeasureError::Report(_) => 1,
        }
    }
}

/// The outcome of a completed measurement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Measurement {
    pub load: CpuLoad,
    pub max_load: i64,
}

impl Measurement {
    /// Whether the load went over the configured maximum. Hitting it exactly is fine.
    pub fn exceeds_threshold(&self) -> bool {
        self.load.percent > i128::from(self.max_load)
    }
}

/// Runs one measurement, writing status lines to `out`.
///
/// The first failing step aborts the run; nothing is retried, and no later
/// step is attempted.
pub fn run_measurement<C, D, W>(
    config: &MeasureConfig, counters: &C, device: &D, out: &mut W,
) -> Result<Measurement, MeasureError>
where
    C: CounterSource + ?Sized,
    D: DeviceOps + ?Sized,
    W: Write,
{
    writeln!(
        out,
        "Testing CPU load when reading {} MiB from {}",
        config.xfer_mebibytes,
        config.device.display()
    )?;
    writeln!(out, "Maximum acceptable CPU load is {}", config.max_load)?;

    device.flush_buffers(&config.device)?;
    let start = counters.capture()?;
    crate::debug!("Start counters: {:?}", start.counters());

    if config.verbose {
        writeln!(out, "Beginning disk read....")?;
    }

    let read_start = Instant::now();
    device.bulk_read(&config.device, config.xfer_mebibytes)?;
    let elapsed = read_start.elapsed();

    if config.verbose {
        writeln!(out, "Disk read complete!")?;
        writeln!(
            out,
            "Read {} MiB in {}",
            config.xfer_mebibytes,
            humantime::format_duration(truncate_to_millis(elapsed))
        )?;
    }

    let end = counters.capture()?;
    crate::debug!("End counters: {:?}", end.counters());

    let load = compute_cpu_load(start, end);
    crate::info!("Computed load: {load:?}");

    if config.verbose {
        writeln!(out, "Start CPU time = {}", load.start_total)?;
        writeln!(out, "End CPU time = {}", load.end_total)?;
        writeln!(out, "CPU time used = {}", load.diff_used)?;
        writeln!(out, "Total elapsed time = {}", load.diff_total)?;
    }

    writeln!(out, "Detected disk read CPU load is {}", load.percent)?;

    let measurement = Measurement {
        load,
        max_load: config.max_load,
    };

    if measurement.exceeds_threshold() {
        writeln!(out, "*** DISK CPU LOAD TEST HAS FAILED! ***")?;
    }

    Ok(measurement)
}

fn truncate_to_millis(duration: Duration) -> Duration {
    Duration::from_millis(duration.as_millis().try_into().unwrap_or(u64::MAX))
}
