use std::{
    collections::HashMap,
    env,
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use tempfile::TempDir;

pub fn abs_path(path: &str) -> OsString {
    let path = Path::new(path);

    if path.exists() {
        path.canonicalize().unwrap().into_os_string()
    } else {
        // We are going to trust that the path given is valid...
        path.to_owned().into_os_string()
    }
}

/// Returns a QEMU runner target given an architecture.
fn get_qemu_target(arch: &str) -> &str {
    match arch {
        "armv7" => "arm",
        "i686" => "i386",
        "powerpc" => "ppc",
        "powerpc64le" => "ppc64le",
        _ => arch,
    }
}

/// Running binary tests via cross needs the right runner, which can be found
/// by inspecting env variables that should only show up while using cross.
fn cross_runner() -> Option<String> {
    const TARGET_RUNNER: &str = "CARGO_TARGET_RUNNER";
    const CROSS_RUNNER: &str = "CROSS_RUNNER";

    let env_mapping = env::vars_os()
        .filter_map(|(k, v)| {
            let (k, v) = (k.to_string_lossy(), v.to_string_lossy());

            if k.starts_with("CARGO_TARGET_") && k.ends_with("_RUNNER") && !v.is_empty() {
                Some((TARGET_RUNNER.to_string(), v.to_string()))
            } else if k == CROSS_RUNNER && !v.is_empty() {
                Some((k.to_string(), v.to_string()))
            } else {
                None
            }
        })
        .collect::<HashMap<_, _>>();

    if let Some(cross_runner) = env_mapping.get(CROSS_RUNNER) {
        if cross_runner == "qemu-user" {
            env_mapping.get(TARGET_RUNNER).map(|target_runner| {
                format!(
                    "qemu-{}",
                    get_qemu_target(target_runner.split_ascii_whitespace().last().unwrap())
                )
            })
        } else {
            None
        }
    } else {
        env_mapping.get(TARGET_RUNNER).cloned()
    }
}

const EXE_PATH: &str = env!("CARGO_BIN_EXE_disk_cpu_load");
const DEFAULT_CFG: [&str; 2] = ["-C", "./tests/valid_configs/empty_config.toml"];

/// Returns the [`Command`] of a binary invocation of disk_cpu_load.
pub fn disk_cpu_load_command(args: &[&str]) -> Command {
    let mut cmd = match cross_runner() {
        None => Command::new(EXE_PATH),
        Some(runner) => {
            let mut cmd = Command::new(runner);
            cmd.arg(EXE_PATH);
            cmd
        }
    };

    let mut prev = "";
    for arg in args.iter() {
        if prev == "-C" {
            // This is the config file; make sure we set it to absolute path!
            cmd.arg(abs_path(arg));
        } else {
            cmd.arg(arg);
        }

        prev = arg;
    }

    cmd
}

/// Returns the [`Command`] of a binary invocation of disk_cpu_load with the
/// default, empty config file, so a user's own config never leaks in.
pub fn no_cfg_command() -> Command {
    disk_cpu_load_command(&DEFAULT_CFG)
}

/// A scratch directory holding a fake counter file, a fake "disk", and a
/// config file pointing at both with the native backend.
pub struct FakeSystem {
    dir: TempDir,
}

impl FakeSystem {
    pub const STAT: &'static str = "\
cpu  4705 356 584 3699176 23060 0 277 0 0 0
cpu0 1393 32 572 1334292 6130 0 178 0 0 0
intr 114930548 113199788 3 0 5 263 0 4 0 1 0 0 0
ctxt 1990473
btime 1062191376
";

    pub fn new(stat: &str, disk_mebibytes: usize) -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("stat"), stat).unwrap();
        fs::write(dir.path().join("disk.img"), vec![0_u8; disk_mebibytes * 1_048_576]).unwrap();

        let config = format!(
            "[flags]\nstat_file = {:?}\nbackend = \"native\"\n",
            dir.path().join("stat").display().to_string()
        );
        fs::write(dir.path().join("config.toml"), config).unwrap();

        FakeSystem { dir }
    }

    pub fn config(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    pub fn disk(&self) -> PathBuf {
        self.dir.path().join("disk.img")
    }

    pub fn missing_disk(&self) -> PathBuf {
        self.dir.path().join("no_such_disk")
    }

    /// A command with the config already set; `device` is passed as the device filename.
    pub fn command(&self, device: &Path) -> Command {
        let mut cmd = disk_cpu_load_command(&[]);
        cmd.arg("-C")
            .arg(self.config())
            .arg("--device-filename")
            .arg(device);

        cmd
    }
}
