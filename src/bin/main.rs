use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    disk_cpu_load::start_disk_cpu_load()
}
