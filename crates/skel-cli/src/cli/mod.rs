//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use skel_core::domain::{Profile, SpecPolicy};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "skel",
    bin_name = "skel",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Broadway read-model skeleton generator",
    long_about = "skel writes the PHP classes of a Broadway read model \
                  (entity, repository, projector and optionally a factory) \
                  together with their phpspec files.",
    after_help = "EXAMPLES:\n\
        \x20 skel read\n\
        \x20 skel read --class-name 'App\\ReadModel\\Invoice' -p id:string -p total:int\n\
        \x20 skel read-orm --class-name Order --specs always\n\
        \x20 skel completions bash > /usr/share/bash-completion/completions/skel",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a plain read model: entity, repository and projector.
    #[command(
        visible_alias = "r",
        alias = "broadway:read",
        about = "Generate a Broadway read model",
        after_help = "EXAMPLES:\n\
            \x20 skel read\n\
            \x20 skel read --class-name Invoice --no-interaction --specs never\n\
            \x20 skel read --class-name 'App\\Invoice' -p id:string --dry-run"
    )]
    Read(ReadArgs),

    /// Generate a read model backed by a persistence engine, with a factory.
    #[command(
        name = "read-orm",
        alias = "broadway:read:doctrine-orm",
        about = "Generate a read model with a persistence-engine repository and factory",
        after_help = "EXAMPLES:\n\
            \x20 skel read-orm\n\
            \x20 skel read-orm --class-name Order -p id:string --specs always"
    )]
    ReadOrm(ReadArgs),

    /// List the templates of each profile.
    #[command(
        visible_alias = "ls",
        about = "List available templates",
        after_help = "EXAMPLES:\n\
            \x20 skel templates\n\
            \x20 skel templates --profile persistence-engine\n\
            \x20 skel templates --format json"
    )]
    Templates(TemplatesArgs),

    /// Initialise a skel configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 skel init           # global config\n\
            \x20 skel init --local   # .skel.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 skel completions bash > ~/.local/share/bash-completion/completions/skel\n\
            \x20 skel completions zsh  > ~/.zfunc/_skel\n\
            \x20 skel completions fish > ~/.config/fish/completions/skel.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the skel configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 skel config get layout.source_dir\n\
            \x20 skel config list\n\
            \x20 skel config path"
    )]
    Config(ConfigCommands),
}

// ── read / read-orm ───────────────────────────────────────────────────────────

/// Arguments shared by `skel read` and `skel read-orm`.
#[derive(Debug, Args)]
pub struct ReadArgs {
    /// Base class name, without any role suffix. Asked for when omitted.
    #[arg(
        long = "class-name",
        visible_alias = "className",
        value_name = "NAME",
        help = "Class name without suffix, e.g. App\\ReadModel\\Invoice"
    )]
    pub class_name: Option<String>,

    /// Constructor properties as `name:type`; skips the property prompts.
    #[arg(
        short = 'p',
        long = "param",
        value_name = "NAME:TYPE",
        help = "Property as name:type (repeatable)"
    )]
    pub params: Vec<String>,

    /// Whether phpspec files are generated.
    #[arg(
        long = "specs",
        value_enum,
        value_name = "WHEN",
        help = "Generate phpspec files: ask, always or never"
    )]
    pub specs: Option<SpecChoice>,

    /// Replace files that already exist.
    #[arg(short = 'f', long = "force", help = "Overwrite existing files")]
    pub force: bool,

    /// Project root the layout directories are relative to.
    #[arg(
        long = "root",
        value_name = "DIR",
        help = "Project root (default: current directory)"
    )]
    pub root: Option<PathBuf>,

    /// Generate in memory and report, writing nothing.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,

    /// Never prompt; confirmations take their default answer.
    #[arg(
        short = 'n',
        long = "no-interaction",
        help = "Do not ask any interactive question"
    )]
    pub no_interaction: bool,
}

/// `--specs` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SpecChoice {
    Ask,
    Always,
    Never,
}

impl From<SpecChoice> for SpecPolicy {
    fn from(choice: SpecChoice) -> Self {
        match choice {
            SpecChoice::Ask => Self::Ask,
            SpecChoice::Always => Self::Always,
            SpecChoice::Never => Self::Never,
        }
    }
}

// ── templates ─────────────────────────────────────────────────────────────────

/// Arguments for `skel templates`.
#[derive(Debug, Args)]
pub struct TemplatesArgs {
    /// Only show one profile.
    #[arg(long = "profile", value_enum, help = "Filter by profile")]
    pub profile: Option<ProfileChoice>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProfileChoice {
    Plain,
    PersistenceEngine,
}

impl From<ProfileChoice> for Profile {
    fn from(choice: ProfileChoice) -> Self {
        match choice {
            ProfileChoice::Plain => Self::Plain,
            ProfileChoice::PersistenceEngine => Self::PersistenceEngine,
        }
    }
}

/// Output format for the `templates` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One key per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `skel init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to the global config location (the default).
    #[arg(
        long = "global",
        conflicts_with = "local",
        help = "Create global configuration"
    )]
    pub global: bool,

    /// Write to `.skel.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `skel completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `skel config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `generation.specs`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
