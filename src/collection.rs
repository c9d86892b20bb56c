//! Reading the system's CPU time-accounting counters.

pub mod cpu;
pub mod error;
