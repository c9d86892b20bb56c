//! Aggregate CPU counters, as reported by `/proc/stat`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use super::error::{CollectionError, CollectionResult};
use crate::constants::STAT_FILE_PATH;

/// Position of the idle bucket, following the kernel's counter order of
/// user, nice, system, idle, iowait, irq, softirq, steal, guest, guest_nice.
const IDLE_INDEX: usize = 3;

/// The first token of the line that sums all cores.
const AGGREGATE_CPU_TOKEN: &str = "cpu";

/// Cumulative CPU time counters since boot, in the order the kernel reports them.
///
/// A snapshot always has at least the idle bucket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CpuSnapshot {
    counters: Box<[u64]>,
}

impl CpuSnapshot {
    /// The idle counter.
    pub fn idle(&self) -> u64 {
        self.counters[IDLE_INDEX]
    }

    /// The sum of every counter.
    pub fn total(&self) -> i128 {
        self.counters.iter().map(|&counter| i128::from(counter)).sum()
    }

    pub fn counters(&self) -> &[u64] {
        &self.counters
    }
}

impl TryFrom<Vec<u64>> for CpuSnapshot {
    type Error = CollectionError;

    fn try_from(counters: Vec<u64>) -> Result<Self, Self::Error> {
        if counters.len() <= IDLE_INDEX {
            return Err(CollectionError::malformed(format!(
                "expected at least {} counters on the aggregate cpu line, found {}",
                IDLE_INDEX + 1,
                counters.len()
            )));
        }

        Ok(CpuSnapshot {
            counters: counters.into_boxed_slice(),
        })
    }
}

/// Something that can capture a [`CpuSnapshot`] of the whole system.
///
/// Every call must do a fresh read; two captures bracket the workload being
/// measured.
pub trait CounterSource {
    fn capture(&self) -> CollectionResult<CpuSnapshot>;
}

/// Reads counters from a `/proc/stat`-formatted file.
#[derive(Clone, Debug)]
pub struct ProcStat {
    path: PathBuf,
}

impl ProcStat {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        ProcStat { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ProcStat {
    fn default() -> Self {
        ProcStat::new(STAT_FILE_PATH)
    }
}

impl CounterSource for ProcStat {
    fn capture(&self) -> CollectionResult<CpuSnapshot> {
        let contents =
            fs::read_to_string(&self.path).map_err(|source| CollectionError::SourceUnavailable {
                path: self.path.clone(),
                source,
            })?;

        parse_aggregate_cpu(&contents)
    }
}

/// Given `/proc/stat` file contents, parse the aggregate `cpu` line into a
/// [`CpuSnapshot`]. Per-core lines (`cpu0`, `cpu1`, ...) are skipped.
///
/// Either every counter parses or nothing is returned.
pub fn parse_aggregate_cpu(contents: &str) -> CollectionResult<CpuSnapshot> {
    let mut fields = contents
        .lines()
        .map(str::split_whitespace)
        .find_map(|mut fields| (fields.next() == Some(AGGREGATE_CPU_TOKEN)).then_some(fields))
        .ok_or_else(|| CollectionError::malformed("no aggregate cpu line found"))?;

    let counters = fields.try_fold(Vec::with_capacity(10), |mut counters, field| {
        let counter = field.parse::<u64>().map_err(|_| {
            CollectionError::malformed(format!("'{field}' is not a valid counter value"))
        })?;
        counters.push(counter);

        Ok::<_, CollectionError>(counters)
    })?;

    CpuSnapshot::try_from(counters)
}
