//! CLI argument definitions via clap derive, and command dispatch.
//!
//! Two binaries share this module: `show` (read-only views) and `config`
//! (mode changes). Both take the `muxcable` command group as their first
//! subcommand, mirroring the SONiC CLI layout.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use sonic_db::SonicDb;
use tracing::error;

use crate::error::MuxCableResult;
use crate::settings::{MuxCableSettings, DEFAULT_SETTINGS_PATH};
use crate::types::{MuxMode, PortScope};
use crate::{reader, writer};

/// Options shared by both binaries.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Settings file (database connection, mock tables).
    #[arg(long, global = true, value_name = "PATH", default_value = DEFAULT_SETTINGS_PATH)]
    pub settings: PathBuf,

    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
}

/// Show SONiC operational state.
#[derive(Debug, Parser)]
#[command(name = "show", version, arg_required_else_help = true)]
pub struct ShowCli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: ShowCommand,
}

/// `show` command groups.
#[derive(Debug, Subcommand)]
pub enum ShowCommand {
    /// Show muxcable information.
    #[command(subcommand)]
    Muxcable(ShowMuxcable),
}

/// `show muxcable` subcommands.
#[derive(Debug, Subcommand)]
pub enum ShowMuxcable {
    /// Show muxcable status information.
    Status(PortQueryArgs),
    /// Show muxcable config information.
    Config(PortQueryArgs),
}

/// Arguments for the `show muxcable` views.
#[derive(Debug, Args)]
pub struct PortQueryArgs {
    /// Port name; all ports when omitted.
    pub port: Option<String>,

    /// Display the output in JSON format.
    #[arg(long)]
    pub json: bool,
}

/// Modify SONiC configuration.
#[derive(Debug, Parser)]
#[command(name = "config", version, arg_required_else_help = true)]
pub struct ConfigCli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// `config` command groups.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Configure muxcable.
    #[command(subcommand)]
    Muxcable(ConfigMuxcable),
}

/// `config muxcable` subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigMuxcable {
    /// Configure the mux mode of one or all ports.
    Mode(ModeArgs),
}

/// Mode values accepted by `config muxcable mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Let the link manager choose the active ToR.
    Auto,
    /// Make this ToR active.
    Active,
}

impl From<ModeArg> for MuxMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Auto => MuxMode::Auto,
            ModeArg::Active => MuxMode::Active,
        }
    }
}

/// Arguments for `config muxcable mode`.
#[derive(Debug, Args)]
pub struct ModeArgs {
    /// Target mode.
    #[arg(value_enum)]
    pub state: ModeArg,

    /// Port name, or "all" for every mux cable port.
    #[arg(value_name = "all|PORT")]
    pub port: String,

    /// Display the output in JSON format.
    #[arg(long)]
    pub json: bool,
}

impl ModeArgs {
    /// Ports selected by the positional argument.
    pub fn scope(&self) -> PortScope {
        PortScope::from(self.port.as_str())
    }
}

/// Runs a `show` command and returns its stdout.
pub async fn run_show(command: &ShowCommand, db: &dyn SonicDb) -> MuxCableResult<String> {
    match command {
        ShowCommand::Muxcable(ShowMuxcable::Status(args)) => {
            reader::render_status(db, args.port.as_deref(), args.json).await
        }
        ShowCommand::Muxcable(ShowMuxcable::Config(args)) => {
            reader::render_config(db, args.port.as_deref(), args.json).await
        }
    }
}

/// Runs a `config` command and returns its stdout.
pub async fn run_config(command: &ConfigCommand, db: &dyn SonicDb) -> MuxCableResult<String> {
    match command {
        ConfigCommand::Muxcable(ConfigMuxcable::Mode(args)) => {
            writer::set_mode(db, args.state.into(), &args.scope(), args.json).await
        }
    }
}

/// Opens the database described by the settings file.
pub async fn open_db(global: &GlobalArgs) -> MuxCableResult<Box<dyn SonicDb>> {
    let settings = MuxCableSettings::load_or_default(&global.settings)?;
    settings.open_db().await
}

/// Prints command output, or the error on stderr, and maps to an exit code.
///
/// Nothing reaches stdout unless the whole command succeeded.
pub fn finish(result: MuxCableResult<String>) -> ExitCode {
    match result {
        Ok(output) => {
            let mut stdout = io::stdout().lock();
            match stdout.write_all(output.as_bytes()).and_then(|()| stdout.flush()) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    error!("Failed to write output: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definitions_are_valid() {
        ShowCli::command().debug_assert();
        ConfigCli::command().debug_assert();
    }

    #[test]
    fn test_parse_show_status_json() {
        let cli = ShowCli::try_parse_from(["show", "muxcable", "status", "Ethernet0", "--json"])
            .unwrap();
        match cli.command {
            ShowCommand::Muxcable(ShowMuxcable::Status(args)) => {
                assert_eq!(args.port.as_deref(), Some("Ethernet0"));
                assert!(args.json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.global.settings, PathBuf::from(DEFAULT_SETTINGS_PATH));
    }

    #[test]
    fn test_parse_config_mode() {
        let cli = ConfigCli::try_parse_from([
            "config",
            "--settings",
            "/tmp/muxcable.conf",
            "muxcable",
            "mode",
            "active",
            "all",
        ])
        .unwrap();
        let ConfigCommand::Muxcable(ConfigMuxcable::Mode(args)) = cli.command;
        assert_eq!(args.state, ModeArg::Active);
        assert_eq!(args.scope(), PortScope::All);
        assert!(!args.json);
        assert_eq!(cli.global.settings, PathBuf::from("/tmp/muxcable.conf"));
    }

    #[test]
    fn test_parse_config_mode_rejects_standby() {
        let result =
            ConfigCli::try_parse_from(["config", "muxcable", "mode", "standby", "Ethernet0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_config_mode_requires_port() {
        let result = ConfigCli::try_parse_from(["config", "muxcable", "mode", "auto"]);
        assert!(result.is_err());
    }
}
