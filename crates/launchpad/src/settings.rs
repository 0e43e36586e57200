//! Effective settings: command line flags over config file values.

use std::path::PathBuf;

use launchpad_core::RunMode;
use launchpad_core::config::Config;

use crate::cli::Cli;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub mode: RunMode,
    pub show_on_start: bool,
    pub icon_size: u32,
    pub columns: u32,
    pub spacing: u32,
    pub style: Option<PathBuf>,
    pub output: Option<String>,
    pub terminal: String,
}

impl Settings {
    /// Merge `cli` over `config`; `term` is the value of `$TERM`.
    #[must_use]
    pub fn resolve(cli: &Cli, config: &Config, term: Option<&str>) -> Self {
        let terminal = cli
            .terminal
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| config.terminal_or(term));

        Self {
            mode: if cli.daemon {
                RunMode::Persistent
            } else {
                RunMode::OneShot
            },
            show_on_start: cli.show_on_start(),
            icon_size: cli.icon_size.unwrap_or(config.icon_size),
            columns: cli.columns.unwrap_or(config.columns).max(1),
            spacing: cli.spacing.unwrap_or(config.spacing),
            style: cli.style.clone().or_else(|| config.style.clone()),
            output: cli.output.clone().or_else(|| config.output.clone()),
            terminal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults_from_config() {
        let cli = Cli::parse_from(["launchpad"]);
        let settings = Settings::resolve(&cli, &Config::default(), Some("linux"));

        assert_eq!(settings.mode, RunMode::OneShot);
        assert!(settings.show_on_start);
        assert_eq!(settings.icon_size, 64);
        assert_eq!(settings.columns, 6);
        assert_eq!(settings.spacing, 20);
        assert_eq!(settings.terminal, "foot");
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from(["launchpad", "-d", "-c", "3", "-t", "kitty"]);
        let config = Config {
            terminal: Some("alacritty".to_string()),
            columns: 9,
            icon_size: 32,
            ..Config::default()
        };
        let settings = Settings::resolve(&cli, &config, Some("xterm"));

        assert_eq!(settings.mode, RunMode::Persistent);
        assert_eq!(settings.columns, 3);
        assert_eq!(settings.icon_size, 32);
        assert_eq!(settings.terminal, "kitty");
    }

    #[test]
    fn test_terminal_falls_back_to_term_env() {
        let cli = Cli::parse_from(["launchpad"]);
        let settings = Settings::resolve(&cli, &Config::default(), Some("wezterm"));
        assert_eq!(settings.terminal, "wezterm");
    }

    #[test]
    fn test_zero_columns_is_clamped() {
        let cli = Cli::parse_from(["launchpad", "-c", "0"]);
        let settings = Settings::resolve(&cli, &Config::default(), None);
        assert_eq!(settings.columns, 1);
    }
}
