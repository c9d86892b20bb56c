use serde::Deserialize;

use crate::device::IoBackend;

/// The parsed config file.
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(test, serde(deny_unknown_fields))]
pub struct Config {
    pub(crate) flags: Option<ConfigFlags>,
}

/// Everything under `[flags]`. Each has a matching argument, except for
/// `stat_file` and `backend`, which only make sense to set here.
#[derive(Clone, Debug, Default, Deserialize)]
#[cfg_attr(test, serde(deny_unknown_fields), derive(PartialEq, Eq))]
pub(crate) struct ConfigFlags {
    pub(crate) max_load: Option<i64>,
    pub(crate) xfer: Option<u64>,
    pub(crate) verbose: Option<bool>,
    pub(crate) device_filename: Option<String>,
    pub(crate) stat_file: Option<String>,
    pub(crate) backend: Option<IoBackend>,
}
