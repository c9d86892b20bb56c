//! These tests are mostly here just to ensure that invalid results will be
//! caught when passing arguments.

use assert_cmd::prelude::*;
use predicates::prelude::*;

use crate::util::{disk_cpu_load_command, no_cfg_command};

#[test]
fn test_help_lists_flags() {
    disk_cpu_load_command(&["--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--max-load")
                .and(predicate::str::contains("--xfer"))
                .and(predicate::str::contains("--verbose"))
                .and(predicate::str::contains("-v"))
                .and(predicate::str::contains("--device-filename")),
        );
}

#[test]
fn test_zero_xfer() {
    no_cfg_command()
        .arg("--xfer")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("'--xfer' must be greater than 0"));
}

#[test]
fn test_non_numeric_xfer() {
    // This test should auto fail due to how clap works
    no_cfg_command()
        .arg("--xfer")
        .arg("lots")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'lots'"));
}

#[test]
fn test_negative_xfer() {
    no_cfg_command()
        .arg("--xfer")
        .arg("-100")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_non_numeric_max_load() {
    no_cfg_command()
        .arg("--max-load")
        .arg("thirty")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'thirty'"));
}

#[test]
fn test_empty_device_filename() {
    no_cfg_command()
        .arg("--device-filename")
        .arg("")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "'--device-filename' cannot be empty",
        ));
}

#[test]
fn test_unknown_flag() {
    no_cfg_command()
        .arg("--max_load")
        .arg("20")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument"));
}

#[test]
fn test_missing_config_file() {
    disk_cpu_load_command(&["-C", "./tests/valid_configs/does_not_exist.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}
