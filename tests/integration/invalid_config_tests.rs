//! These tests are for testing some invalid config-file-specific options.

use assert_cmd::prelude::*;
use predicates::prelude::*;

use crate::util::disk_cpu_load_command;

#[test]
fn test_toml_mismatch_type() {
    disk_cpu_load_command(&["-C", "./tests/invalid_configs/toml_mismatch_type.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid type"));
}

#[test]
fn test_invalid_backend() {
    disk_cpu_load_command(&["-C", "./tests/invalid_configs/invalid_backend.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown variant"));
}

#[test]
fn test_zero_xfer() {
    disk_cpu_load_command(&["-C", "./tests/invalid_configs/zero_xfer.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'xfer' must be greater than 0"));
}

/// This test isn't really needed as this is technically covered by TOML spec.
#[test]
fn test_duplicate_key() {
    disk_cpu_load_command(&["-C", "./tests/invalid_configs/duplicate_max_load.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate key"));
}
