//! How the measurement is configured, from both arguments and the config file.

pub mod args;
pub mod config;
mod error;

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

pub use self::error::{OptionError, OptionResult};
use self::{args::DiskLoadArgs, config::Config};
use crate::{constants::*, device::IoBackend};

/// The fully resolved options for a single measurement. Never changes once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeasureConfig {
    pub device: PathBuf,
    pub xfer_mebibytes: u64,
    pub max_load: i64,
    pub verbose: bool,
    pub stat_file: PathBuf,
    pub backend: IoBackend,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        MeasureConfig {
            device: PathBuf::from(DEFAULT_DEVICE_FILENAME),
            xfer_mebibytes: DEFAULT_XFER_MEBIBYTES,
            max_load: DEFAULT_MAX_LOAD,
            verbose: false,
            stat_file: PathBuf::from(STAT_FILE_PATH),
            backend: IoBackend::default(),
        }
    }
}

/// Returns the config path to use. If `override_config_path` is specified, then
/// we will use that. Otherwise, the default location in the platform's config
/// directory is used, if there is one.
pub fn get_config_path(override_config_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(conf_loc) = override_config_path {
        return Some(conf_loc.to_path_buf());
    }

    dirs::config_dir().map(|mut path| {
        path.push(CONFIG_DIR_NAME);
        path.push(DEFAULT_CONFIG_FILE_NAME);
        path
    })
}

/// Reads the config file. A missing file is only an error if it was asked for
/// explicitly; the default one is optional and never created.
pub fn read_config(override_config_path: Option<&Path>) -> OptionResult<Config> {
    let Some(path) = get_config_path(override_config_path) else {
        return Ok(Config::default());
    };

    match fs::read_to_string(&path) {
        Ok(config_string) => {
            crate::info!("Using the config file at {}.", path.display());
            Ok(toml_edit::de::from_str(&config_string)?)
        }
        Err(err) if err.kind() == ErrorKind::NotFound && override_config_path.is_none() => {
            Ok(Config::default())
        }
        Err(err) if err.kind() == ErrorKind::NotFound => Err(OptionError::config(format!(
            "the config file '{}' does not exist.",
            path.display()
        ))),
        Err(err) => Err(err.into()),
    }
}

/// Resolves every option. Arguments win over the config file, which wins over
/// the built-in defaults.
pub fn init_measure_config(args: DiskLoadArgs, config: &Config) -> OptionResult<MeasureConfig> {
    let flags = config.flags.clone().unwrap_or_default();

    let max_load = args
        .max_load
        .or(flags.max_load)
        .unwrap_or(DEFAULT_MAX_LOAD);
    let xfer_mebibytes = get_xfer(args.xfer, flags.xfer)?;
    let verbose = args.verbose || flags.verbose.unwrap_or(false);
    let device = get_device(args.device_filename.as_deref(), flags.device_filename.as_deref())?;
    let stat_file = match flags.stat_file {
        Some(stat_file) if stat_file.is_empty() => {
            return Err(OptionError::config("'stat_file' cannot be empty."));
        }
        Some(stat_file) => PathBuf::from(stat_file),
        None => PathBuf::from(STAT_FILE_PATH),
    };
    let backend = flags.backend.unwrap_or_default();

    Ok(MeasureConfig {
        device,
        xfer_mebibytes,
        max_load,
        verbose,
        stat_file,
        backend,
    })
}

fn get_xfer(arg: Option<u64>, flag: Option<u64>) -> OptionResult<u64> {
    match (arg, flag) {
        (Some(0), _) => Err(OptionError::arg("'--xfer' must be greater than 0.")),
        (Some(xfer), _) => Ok(xfer),
        (None, Some(0)) => Err(OptionError::config("'xfer' must be greater than 0.")),
        (None, Some(xfer)) => Ok(xfer),
        (None, None) => Ok(DEFAULT_XFER_MEBIBYTES),
    }
}

fn get_device(arg: Option<&str>, flag: Option<&str>) -> OptionResult<PathBuf> {
    let name = match (arg, flag) {
        (Some(name), _) if name.trim().is_empty() => {
            return Err(OptionError::arg("'--device-filename' cannot be empty."));
        }
        (None, Some(name)) if name.trim().is_empty() => {
            return Err(OptionError::config("'device_filename' cannot be empty."));
        }
        (Some(name), _) | (None, Some(name)) => name,
        (None, None) => DEFAULT_DEVICE_FILENAME,
    };

    Ok(normalize_device(name))
}

/// A bare device name like `sda` is taken to live under `/dev/`; anything with
/// a path separator is used as-is.
fn normalize_device(name: &str) -> PathBuf {
    if name.contains('/') {
        PathBuf::from(name)
    } else {
        Path::new("/dev").join(name)
    }
}
