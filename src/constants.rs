//! Default values and fixed paths.

/// The aggregate CPU counters are read from here unless overridden.
pub const STAT_FILE_PATH: &str = "/proc/stat";

/// Bytes per transfer unit; the bulk read always moves whole mebibytes.
pub const BLOCK_SIZE: u64 = 1_048_576;

// Defaults for the measurement itself.
pub const DEFAULT_MAX_LOAD: i64 = 30;
pub const DEFAULT_XFER_MEBIBYTES: u64 = 4096;
pub const DEFAULT_DEVICE_FILENAME: &str = "/dev/sda";

// Config and logging locations.
pub const CONFIG_DIR_NAME: &str = "disk_cpu_load";
pub const DEFAULT_CONFIG_FILE_NAME: &str = "disk_cpu_load.toml";
pub const DEBUG_LOG_FILE_NAME: &str = "debug.log";
