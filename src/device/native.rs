//! Device operations done in-process, without spawning anything.

use std::{
    fs::File,
    io::{self, Read},
    path::Path,
};

use super::{DeviceOps, ExecutionFailure};
use crate::constants::BLOCK_SIZE;

/// Flushes and reads the device directly.
///
/// Flushing uses the `BLKFLSBUF` ioctl on Linux block devices, and falls back
/// to an `fsync` for anything else (e.g. a regular file standing in for a disk).
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeOps;

impl DeviceOps for NativeOps {
    fn flush_buffers(&self, device: &Path) -> Result<(), ExecutionFailure> {
        let operation = || format!("flush buffers of {}", device.display());

        let file = File::open(device).map_err(|err| ExecutionFailure::io(operation(), err))?;
        flush_file(&file).map_err(|err| ExecutionFailure::io(operation(), err))
    }

    fn bulk_read(&self, device: &Path, mebibytes: u64) -> Result<(), ExecutionFailure> {
        let operation = || format!("read {mebibytes} MiB from {}", device.display());

        let file = File::open(device).map_err(|err| ExecutionFailure::io(operation(), err))?;
        let read = read_blocks(file, mebibytes).map_err(|err| ExecutionFailure::io(operation(), err))?;
        crate::debug!("Read {read} bytes from {}.", device.display());

        Ok(())
    }
}

cfg_if::cfg_if! {
    if #[cfg(target_os = "linux")] {
        /// `_IO(0x12, 97)` from `linux/fs.h`.
        const BLKFLSBUF: u32 = 0x1261;

        fn flush_file(file: &File) -> io::Result<()> {
            use std::os::fd::AsRawFd;

            use rustix::fs::FileType;

            let stat = rustix::fs::fstat(file)?;
            if FileType::from_raw_mode(stat.st_mode as _) != FileType::BlockDevice {
                return file.sync_all();
            }

            // SAFETY: the fd is valid for the lifetime of `file`, and BLKFLSBUF takes no argument.
            let ret = unsafe { libc::ioctl(file.as_raw_fd(), BLKFLSBUF as _) };
            if ret != 0 {
                return Err(io::Error::last_os_error());
            }

            Ok(())
        }
    } else {
        fn flush_file(file: &File) -> io::Result<()> {
            file.sync_all()
        }
    }
}

/// Reads up to `blocks` full [`BLOCK_SIZE`] blocks from `reader` into a
/// reused buffer, stopping early at end of file the same way `dd` does.
///
/// Returns the number of bytes read.
pub(crate) fn read_blocks<R: Read>(mut reader: R, blocks: u64) -> io::Result<u64> {
    let mut buffer = vec![0_u8; BLOCK_SIZE as usize];
    let mut total = 0;

    for _ in 0..blocks {
        let read = fill_block(&mut reader, &mut buffer)?;
        total += read as u64;

        if read < buffer.len() {
            break;
        }
    }

    Ok(total)
}

/// Reads until `buffer` is full or the reader is exhausted.
fn fill_block<R: Read>(reader: &mut R, buffer: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;

    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }

    Ok(filled)
}
