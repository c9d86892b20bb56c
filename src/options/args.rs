// Argument parsing via clap.
//
// Note that you probably want to keep this as a single file so the build script doesn't
// trip all over itself.

use clap::*;
use indoc::indoc;

const TEMPLATE: &str = indoc! {
    "{name} {version}

    {about}

    {usage-heading} {usage}

    {all-args}"
};

const USAGE: &str = "disk_cpu_load [OPTIONS]";

// The arguments for disk_cpu_load.
#[derive(Parser, Debug, Default)]
#[command(
    name = crate_name!(),
    version = crate_version!(),
    about = "Script to test CPU load imposed by a simple disk read operation.",
    color = ColorChoice::Auto,
    help_template = TEMPLATE,
    override_usage = USAGE,
)]
pub struct DiskLoadArgs {
    #[arg(
        long,
        value_name = "PERCENT",
        allow_negative_numbers = true,
        help = "The maximum acceptable CPU load, as a percentage. Defaults to 30."
    )]
    pub max_load: Option<i64>,

    #[arg(
        long,
        value_name = "MEBIBYTES",
        help = "The amount of data to read from the disk, in mebibytes. Defaults to 4096 (4 GiB)."
    )]
    pub xfer: Option<u64>,

    #[arg(
        short = 'v',
        long,
        action = ArgAction::SetTrue,
        help = "If present, produce more verbose output."
    )]
    pub verbose: bool,

    #[arg(
        long,
        value_name = "DEVICE",
        help = "The WHOLE-DISK device filename, e.g. \"sda\" or \"/dev/sda\". Defaults to /dev/sda.",
        long_help = indoc! {
            "This is the WHOLE-DISK device filename (with or without \"/dev/\"),
            e.g. \"sda\" or \"/dev/sda\". The disk is read from its beginning,
            so it does not need to hold a mounted filesystem. Defaults to /dev/sda."
        }
    )]
    pub device_filename: Option<String>,

    #[arg(
        short = 'C',
        long,
        value_name = "PATH",
        help = "Sets the location of the config file.",
        long_help = indoc! {
            "Sets the location of the config file. Expects a config file in the TOML format.
            Without this, the platform config directory is checked for
            'disk_cpu_load/disk_cpu_load.toml', and built-in defaults are used if it
            does not exist. Arguments always take precedence over the config file."
        }
    )]
    pub config: Option<String>,
}
