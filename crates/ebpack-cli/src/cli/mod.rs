//! CLI argument definitions using the clap derive API.
//!
//! Argument names, help text and value enums live here. Handlers in
//! `commands` turn them into core calls.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name    = "ebpack",
    bin_name = "ebpack",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Package names and Dockerfiles for EasyBuild installations",
    long_about = "ebpack derives package names for software built with EasyBuild \
                  and generates Dockerfiles that install it into an image.",
    after_help = "EXAMPLES:\n\
        \x20 ebpack name foo.toml\n\
        \x20 ebpack render foo.toml > Dockerfile\n\
        \x20 ebpack docker foo.toml --tool-version 4.5.0\n\
        \x20 ebpack completions bash > /usr/share/bash-completion/completions/ebpack",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the package name and version of a descriptor.
    #[command(
        about = "Print package name and version",
        after_help = "EXAMPLES:\n\
            \x20 ebpack name foo.toml\n\
            \x20 ebpack name foo.toml --tool-version 4.5.0 --output-format json"
    )]
    Name(NameArgs),

    /// Render the Dockerfile for one or more descriptors to stdout.
    #[command(
        about = "Render a Dockerfile without running docker",
        after_help = "EXAMPLES:\n\
            \x20 ebpack render foo.toml\n\
            \x20 ebpack render foo.toml bar.json --naming-scheme hierarchical"
    )]
    Render(RenderArgs),

    /// Generate a Dockerfile in a scratch directory and run docker there.
    #[command(
        about = "Generate a Dockerfile and check the docker engine",
        after_help = "EXAMPLES:\n\
            \x20 ebpack docker foo.toml\n\
            \x20 ebpack docker foo.toml --print\n\
            \x20 ebpack docker foo.toml --build"
    )]
    Docker(DockerArgs),

    /// Inspect the effective configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 ebpack config list\n\
            \x20 ebpack config get tool.version\n\
            \x20 ebpack config path"
    )]
    Config(ConfigCommands),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 ebpack completions bash > ~/.local/share/bash-completion/completions/ebpack\n\
            \x20 ebpack completions zsh  > ~/.zfunc/_ebpack"
    )]
    Completions(CompletionsArgs),
}

/// Overrides shared by commands that name or render packages.
#[derive(Debug, Args)]
pub struct PackagingArgs {
    /// EasyBuild release pinned into the image (`tool.version`).
    #[arg(long = "tool-version", value_name = "VERSION")]
    pub tool_version: Option<String>,

    /// Module naming scheme of the image (`modules.naming_scheme`).
    #[arg(long = "naming-scheme", value_name = "SCHEME")]
    pub naming_scheme: Option<String>,

    /// Builtin Dockerfile template (`docker.template`).
    #[arg(long = "template", value_name = "NAME")]
    pub template: Option<String>,
}

#[derive(Debug, Args)]
pub struct NameArgs {
    /// Descriptor file (.toml or .json).
    #[arg(value_name = "DESCRIPTOR")]
    pub descriptor: PathBuf,

    #[arg(long = "tool-version", value_name = "VERSION")]
    pub tool_version: Option<String>,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Descriptor files; the first one names the Dockerfile.
    #[arg(value_name = "DESCRIPTOR", required = true, num_args = 1..)]
    pub descriptors: Vec<PathBuf>,

    #[command(flatten)]
    pub packaging: PackagingArgs,
}

#[derive(Debug, Args)]
pub struct DockerArgs {
    /// Descriptor files; the first one names the Dockerfile and the image.
    #[arg(value_name = "DESCRIPTOR", required = true, num_args = 1..)]
    pub descriptors: Vec<PathBuf>,

    #[command(flatten)]
    pub packaging: PackagingArgs,

    /// Also run `docker build` and tag the image with the package identity.
    #[arg(long = "build")]
    pub build: bool,

    /// Print the generated Dockerfile.
    #[arg(long = "print")]
    pub print: bool,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: clap_complete::Shell,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `docker.executable`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path of the default configuration file.
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_name_command() {
        let cli = Cli::parse_from(["ebpack", "name", "foo.toml", "--tool-version", "4.5.0"]);
        match cli.command {
            Commands::Name(args) => {
                assert_eq!(args.descriptor, PathBuf::from("foo.toml"));
                assert_eq!(args.tool_version.as_deref(), Some("4.5.0"));
            }
            other => panic!("expected Name, got {other:?}"),
        }
    }

    #[test]
    fn docker_accepts_several_descriptors() {
        let cli = Cli::parse_from(["ebpack", "docker", "a.toml", "b.json", "--build"]);
        match cli.command {
            Commands::Docker(args) => {
                assert_eq!(args.descriptors.len(), 2);
                assert!(args.build);
                assert!(!args.print);
            }
            other => panic!("expected Docker, got {other:?}"),
        }
    }

    #[test]
    fn render_requires_a_descriptor() {
        assert!(Cli::try_parse_from(["ebpack", "render"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["ebpack", "render", "a.toml", "-vv", "--no-color"]);
        assert_eq!(cli.global.verbose, 2);
        assert!(cli.global.no_color);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["ebpack", "--quiet", "--verbose", "config", "list"]);
        assert!(result.is_err());
    }
}
