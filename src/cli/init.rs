use std::path::{Path, PathBuf};

use reqlist::{Config, PackageInfo};
use tracing::instrument;

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The distribution name of the package
    #[arg(long)]
    name: String,

    /// The package version
    #[arg(long, value_name = "VERSION")]
    package_version: String,

    /// The package author
    #[arg(long)]
    author: Option<String>,

    /// The author's contact email
    #[arg(long)]
    author_email: Option<String>,

    /// The requirements file, relative to the project root
    #[arg(long, value_name = "PATH")]
    requirements_file: Option<PathBuf>,

    /// Treat a missing requirements file as an error
    #[arg(long)]
    strict: bool,
}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let config_path = root.join(Config::FILE_NAME);
        if config_path.exists() {
            anyhow::bail!(
                "Project already initialized (found existing {})",
                Config::FILE_NAME
            );
        }

        let mut config = Config::default();
        config.set_package(PackageInfo {
            name: self.name,
            version: self.package_version,
            author: self.author,
            author_email: self.author_email,
        });
        if let Some(requirements_file) = self.requirements_file {
            config.set_requirements_file(requirements_file);
        }
        config.set_strict(self.strict);

        config
            .save(&config_path)
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", Config::FILE_NAME))?;

        println!("Initialized package manifest in {}", root.display());
        println!("  Created: {}", Config::FILE_NAME);

        if !config.requirements_path(root).exists() {
            println!();
            println!(
                "Note: {} does not exist yet; the package will declare no dependencies.",
                config.requirements_file().display()
            );
        }

        Ok(())
    }
}
