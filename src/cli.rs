use std::path::{Path, PathBuf};

mod diagnose;
mod init;
mod list;
mod metadata;
mod terminal;

use clap::ArgAction;
use reqlist::{Config, RequirementList, storage};
use terminal::Colorize;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global=true)]
    verbose: u8,

    /// The path to the project root containing the requirements file
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::List(list::Command::default()))
            .run(&self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Print the install requirements (default)
    List(list::Command),

    /// Print the package metadata handed to the packaging tool
    Metadata(metadata::Command),

    /// Write the package manifest for the project
    Init(init::Command),

    /// Report skipped lines and likely editable-marker typos
    Diagnose(diagnose::Command),
}

impl Command {
    fn run(self, root: &Path) -> anyhow::Result<()> {
        match self {
            Self::List(command) => command.run(root)?,
            Self::Metadata(command) => command.run(root)?,
            Self::Init(command) => command.run(root)?,
            Self::Diagnose(command) => command.run(root)?,
        }
        Ok(())
    }
}

/// Load the requirement list for the project at `root`.
///
/// A missing or unreadable file is fatal only when `strict` is set. Otherwise
/// a diagnostic is printed and the project is treated as having no
/// dependencies.
fn load_requirements(
    root: &Path,
    config: &Config,
    strict: bool,
) -> anyhow::Result<RequirementList> {
    let path = config.requirements_path(root);
    match storage::load(&path, config.editable_marker()) {
        Ok(requirements) => Ok(requirements),
        Err(e) if strict => Err(e.into()),
        Err(e) => {
            tracing::debug!("Continuing without requirements: {e}");
            let message = if e.is_not_found() {
                format!("{} file not found", config.requirements_file().display())
            } else {
                e.to_string()
            };
            eprintln!("{}", message.warning());
            Ok(RequirementList::default())
        }
    }
}
