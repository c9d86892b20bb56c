//! Turning two [`CpuSnapshot`]s into a load percentage.

use crate::collection::cpu::CpuSnapshot;

/// The CPU load between two snapshots, alongside the values it was derived from.
///
/// `percent` is not clamped: if idle time somehow shrank it can be negative or
/// above 100.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CpuLoad {
    pub start_total: i128,
    pub end_total: i128,
    /// Elapsed CPU time that was not idle.
    pub diff_used: i128,
    /// Total elapsed CPU time.
    pub diff_total: i128,
    pub percent: i128,
}

/// Computes the share of elapsed CPU time that was busy between `start` and
/// `end`, as a floored percentage. `end` must be captured after `start` on the
/// same machine for this to mean anything.
///
/// No elapsed CPU time means no measurable load, so that returns 0.
pub fn compute_cpu_load(start: CpuSnapshot, end: CpuSnapshot) -> CpuLoad {
    let diff_idle = i128::from(end.idle()) - i128::from(start.idle());
    let start_total = start.total();
    let end_total = end.total();
    let diff_total = end_total - start_total;
    let diff_used = diff_total - diff_idle;

    let percent = if diff_total == 0 {
        0
    } else {
        floor_div(diff_used * 100, diff_total)
    };

    CpuLoad {
        start_total,
        end_total,
        diff_used,
        diff_total,
        percent,
    }
}

/// Integer division rounding toward negative infinity.
///
/// Rust's `/` truncates toward zero, and `div_euclid` differs from floor when
/// the divisor is negative, so neither works as-is.
pub(crate) fn floor_div(lhs: i128, rhs: i128) -> i128 {
    let quotient = lhs / rhs;

    if lhs % rhs != 0 && ((lhs < 0) != (rhs < 0)) {
        quotient - 1
    } else {
        quotient
    }
}
