//! CLI argument parsing for launchpad.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "launchpad")]
#[command(version, about = "Application launcher", long_about = None)]
pub struct Cli {
    /// Stay resident: hide instead of quitting, toggle on the next invocation
    #[arg(short = 'd', long)]
    pub daemon: bool,

    /// Don't show the window on first launch (daemon mode only)
    #[arg(short = 'n', long)]
    pub no_show: bool,

    /// Icon size in pixels
    #[arg(short = 'i', long, value_name = "PX")]
    pub icon_size: Option<u32>,

    /// Number of grid columns
    #[arg(short = 'c', long)]
    pub columns: Option<u32>,

    /// Icon spacing in pixels
    #[arg(short = 's', long, value_name = "PX")]
    pub spacing: Option<u32>,

    /// CSS style sheet
    #[arg(long, value_name = "PATH")]
    pub style: Option<PathBuf>,

    /// Name of the output to display the launcher on
    #[arg(short = 'o', long, value_name = "NAME")]
    pub output: Option<String>,

    /// Terminal emulator for terminal applications
    #[arg(short = 't', long)]
    pub terminal: Option<String>,

    /// Enable debug logging (also logs to $TMPDIR/launchpad.log)
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Whether the window should be shown right after startup.
    #[must_use]
    pub fn show_on_start(&self) -> bool {
        !self.daemon || !self.no_show
    }
}
