//! Full runs against a fake counter file and a regular file standing in for a disk.

use assert_cmd::prelude::*;
use predicates::prelude::*;

use crate::util::FakeSystem;

#[test]
fn test_unchanging_counters_pass() {
    let system = FakeSystem::new(FakeSystem::STAT, 2);

    system
        .command(&system.disk())
        .arg("--xfer")
        .arg("2")
        .assert()
        .success()
        .stdout(
            predicate::str::contains(format!(
                "Testing CPU load when reading 2 MiB from {}",
                system.disk().display()
            ))
            .and(predicate::str::contains("Maximum acceptable CPU load is 30"))
            .and(predicate::str::contains("Detected disk read CPU load is 0"))
            .and(predicate::str::contains("FAILED").not()),
        );
}

#[test]
fn test_xfer_past_end_of_disk() {
    let system = FakeSystem::new(FakeSystem::STAT, 1);

    system
        .command(&system.disk())
        .arg("--xfer")
        .arg("8")
        .assert()
        .success();
}

#[test]
fn test_verbose() {
    let system = FakeSystem::new(FakeSystem::STAT, 1);

    system
        .command(&system.disk())
        .arg("--xfer")
        .arg("1")
        .arg("-v")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Beginning disk read....")
                .and(predicate::str::contains("Disk read complete!"))
                .and(predicate::str::contains("Start CPU time = 3728158"))
                .and(predicate::str::contains("End CPU time = 3728158"))
                .and(predicate::str::contains("CPU time used = 0"))
                .and(predicate::str::contains("Total elapsed time = 0")),
        );
}

#[test]
fn test_threshold_exceeded() {
    let system = FakeSystem::new(FakeSystem::STAT, 1);

    system
        .command(&system.disk())
        .arg("--xfer")
        .arg("1")
        .arg("--max-load")
        .arg("-1")
        .assert()
        .code(1)
        .stdout(
            predicate::str::contains("Detected disk read CPU load is 0")
                .and(predicate::str::contains("*** DISK CPU LOAD TEST HAS FAILED! ***")),
        );
}

#[test]
fn test_missing_device() {
    let system = FakeSystem::new(FakeSystem::STAT, 1);

    system
        .command(&system.missing_disk())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("flush buffers"))
        .stdout(predicate::str::contains("Detected").not());
}

#[test]
fn test_malformed_counters() {
    let system = FakeSystem::new("cpu0 1 2 3 4\nintr 1\n", 1);

    system
        .command(&system.disk())
        .arg("--xfer")
        .arg("1")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no aggregate cpu line found"));
}

#[test]
fn test_non_numeric_counters() {
    let system = FakeSystem::new("cpu 1 2 3 four 5\n", 1);

    system
        .command(&system.disk())
        .arg("--xfer")
        .arg("1")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("'four' is not a valid counter value"));
}
