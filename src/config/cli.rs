//! Command-line flags

use std::path::PathBuf;

use clap::Parser;

use crate::config::StressConfig;
use crate::domain::monitor::AreaSource;

/// Tile every monitor with placeholder windows opened through debugchrome
#[derive(Debug, Parser)]
#[command(name = "grid-stress", version)]
pub struct Cli {
    /// TOML config file (defaults to ./grid-stress.toml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Grid rows per monitor
    #[arg(long)]
    pub rows: Option<u32>,

    /// Grid columns per monitor
    #[arg(long)]
    pub cols: Option<u32>,

    /// Executable that receives each launch command
    #[arg(long, value_name = "PATH")]
    pub executable: Option<PathBuf>,

    /// Seconds before each window closes itself
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Partition the whole monitor instead of its working area
    #[arg(long)]
    pub full_monitor: bool,

    /// Launch cells in random order across monitors
    #[arg(long)]
    pub shuffle: bool,

    /// Seed for colors and shuffle order
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print launch commands without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Log filter, e.g. `debug` or `grid_stress=trace`
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    /// Overwrites every setting given on the command line
    ///
    /// Boolean switches can only turn a setting on.
    pub fn apply(&self, config: &mut StressConfig) {
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(executable) = &self.executable {
            config.executable = executable.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if self.full_monitor {
            config.area = AreaSource::FullMonitor;
        }
        if self.shuffle {
            config.shuffle = true;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.dry_run {
            config.dry_run = true;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_flags_change_nothing() {
        let cli = Cli::parse_from(["grid-stress"]);
        let mut config = StressConfig::default();
        cli.apply(&mut config);
        assert_eq!(config, StressConfig::default());
    }

    #[test]
    fn flags_map_onto_config() {
        let cli = Cli::parse_from([
            "grid-stress",
            "--rows",
            "2",
            "--cols",
            "5",
            "--executable",
            "C:\\tools\\debugchrome.exe",
            "--timeout",
            "5",
            "--full-monitor",
            "--dry-run",
            "--log-level",
            "debug",
        ]);
        let mut config = StressConfig::default();
        cli.apply(&mut config);

        assert_eq!((config.rows, config.cols), (2, 5));
        assert_eq!(config.executable, PathBuf::from("C:\\tools\\debugchrome.exe"));
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.area, AreaSource::FullMonitor);
        assert!(config.dry_run);
        assert!(!config.shuffle);
        assert_eq!(config.log_level, "debug");
    }
}
