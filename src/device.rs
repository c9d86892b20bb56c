//! The two side-effecting operations done against the device: flushing its
//! buffers, and reading from it in bulk.
//!
//! Both block until finished. Neither is ever retried, since a rerun would
//! fall outside the window bracketed by the two counter snapshots.

pub mod external;
pub mod native;

use std::{io, path::Path};

use serde::Deserialize;
use thiserror::Error;

pub use self::{external::ExternalOps, native::NativeOps};

/// An external operation failed to run to completion.
#[derive(Debug, Error)]
pub enum ExecutionFailure {
    /// The operation ran, but reported a non-zero status.
    #[error("'{operation}' exited with status code {code}")]
    Status { operation: String, code: i32 },

    /// The operation ended without a status code, e.g. killed by a signal.
    #[error("'{operation}' terminated abnormally")]
    Terminated { operation: String },

    /// The operation could not be run, or failed partway through.
    #[error("'{operation}' failed: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },
}

impl ExecutionFailure {
    pub(crate) fn io<O: Into<String>>(operation: O, source: io::Error) -> Self {
        ExecutionFailure::Io {
            operation: operation.into(),
            source,
        }
    }

    /// The status code reported by the failing operation, if it gave one.
    pub fn status_code(&self) -> Option<i32> {
        match self {
            ExecutionFailure::Status { code, .. } => Some(*code),
            ExecutionFailure::Terminated { .. } | ExecutionFailure::Io { .. } => None,
        }
    }
}

/// The device-facing operations a measurement needs.
pub trait DeviceOps {
    /// Flushes the device's buffers so earlier runs don't leave anything cached.
    fn flush_buffers(&self, device: &Path) -> Result<(), ExecutionFailure>;

    /// Reads `mebibytes` MiB sequentially from the start of `device` in 1 MiB
    /// blocks, discarding the data.
    fn bulk_read(&self, device: &Path, mebibytes: u64) -> Result<(), ExecutionFailure>;
}

/// How [`DeviceOps`] are carried out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IoBackend {
    /// Shell out to `blockdev` and `dd`.
    #[default]
    External,

    /// Use syscalls from within the process.
    Native,
}

impl IoBackend {
    pub fn device_ops(self) -> Box<dyn DeviceOps> {
        match self {
            IoBackend::External => Box::new(ExternalOps),
            IoBackend::Native => Box::new(NativeOps),
        }
    }
}
