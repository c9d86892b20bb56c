//! Generates shell completions and a manpage when `DISK_CPU_LOAD_GENERATE` is set.

use std::{
    env, fs,
    io::Result,
    path::{Path, PathBuf},
};

use clap_complete::{generate_to, shells::Shell};

include!("src/options/args.rs");

fn create_dir(dir: &Path) -> Result<()> {
    let res = fs::create_dir_all(dir);
    if let Err(err) = &res {
        eprintln!(
            "Failed to create a directory at location {dir:?}, encountered error {err:?}. Aborting...",
        );
    }

    res
}

fn generate_files() -> Result<()> {
    const COMPLETION_DIR: &str = "./target/tmp/disk_cpu_load/completion/";
    const MANPAGE_DIR: &str = "./target/tmp/disk_cpu_load/manpage/";

    let completion_out_dir = PathBuf::from(COMPLETION_DIR);
    let manpage_out_dir = PathBuf::from(MANPAGE_DIR);

    create_dir(&completion_out_dir)?;
    create_dir(&manpage_out_dir)?;

    // Generate completions
    let mut app = DiskLoadArgs::command();
    generate_to(Shell::Bash, &mut app, "disk_cpu_load", &completion_out_dir)?;
    generate_to(Shell::Zsh, &mut app, "disk_cpu_load", &completion_out_dir)?;
    generate_to(Shell::Fish, &mut app, "disk_cpu_load", &completion_out_dir)?;
    generate_to(Shell::PowerShell, &mut app, "disk_cpu_load", &completion_out_dir)?;
    generate_to(Shell::Elvish, &mut app, "disk_cpu_load", &completion_out_dir)?;

    // Generate manpage
    let man = clap_mangen::Man::new(app);
    let mut buffer: Vec<u8> = Default::default();
    man.render(&mut buffer)?;
    fs::write(manpage_out_dir.join("disk_cpu_load.1"), buffer)?;

    Ok(())
}

fn main() -> Result<()> {
    match env::var_os("DISK_CPU_LOAD_GENERATE") {
        Some(var) if !var.is_empty() => generate_files()?,
        _ => {}
    }

    println!("cargo:rerun-if-env-changed=DISK_CPU_LOAD_GENERATE");

    Ok(())
}
