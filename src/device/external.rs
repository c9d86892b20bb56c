//! Device operations carried out by the usual command-line tools.

use std::{
    ffi::OsString,
    path::Path,
    process::{Command, Stdio},
};

use super::{DeviceOps, ExecutionFailure};
use crate::constants::BLOCK_SIZE;

/// Runs `blockdev --flushbufs` and `dd`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExternalOps;

impl DeviceOps for ExternalOps {
    fn flush_buffers(&self, device: &Path) -> Result<(), ExecutionFailure> {
        run_checked(Command::new("blockdev").arg("--flushbufs").arg(device))
    }

    fn bulk_read(&self, device: &Path, mebibytes: u64) -> Result<(), ExecutionFailure> {
        let mut input = OsString::from("if=");
        input.push(device);

        run_checked(
            Command::new("dd")
                .arg(input)
                .arg("of=/dev/null")
                .arg(format!("bs={BLOCK_SIZE}"))
                .arg(format!("count={mebibytes}"))
                .stdout(Stdio::null())
                .stderr(Stdio::null()),
        )
    }
}

/// Runs `command` to completion, treating anything but a zero exit status as a failure.
pub(crate) fn run_checked(command: &mut Command) -> Result<(), ExecutionFailure> {
    let operation = describe(command);
    crate::debug!("Running '{operation}'.");

    let status = command
        .status()
        .map_err(|err| ExecutionFailure::io(operation.clone(), err))?;

    if status.success() {
        Ok(())
    } else if let Some(code) = status.code() {
        crate::warn!("'{operation}' exited with {code}.");
        Err(ExecutionFailure::Status { operation, code })
    } else {
        crate::warn!("'{operation}' was terminated.");
        Err(ExecutionFailure::Terminated { operation })
    }
}

fn describe(command: &Command) -> String {
    std::iter::once(command.get_program())
        .chain(command.get_args())
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}
