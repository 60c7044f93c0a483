use std::path::Path;

use reqlist::{Config, PackageMetadata};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Output format (json, table)
    #[arg(long, value_name = "FORMAT", default_value = "json")]
    output: OutputFormat,

    /// Fail if the requirements file is missing or unreadable
    #[arg(long)]
    strict: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let config_path = root.join(Config::FILE_NAME);
        let config = Config::load(&config_path)
            .map_err(|e| anyhow::anyhow!("{e} ({})", config_path.display()))?;

        let Some(info) = config.package().cloned() else {
            anyhow::bail!(
                "No [package] table in {}. Run 'reqlist init --name <NAME> --package-version \
                 <VERSION>' first.",
                Config::FILE_NAME
            );
        };

        let strict = self.strict || config.strict();
        let requirements = super::load_requirements(root, &config, strict)?;
        let metadata = PackageMetadata::new(info, requirements);

        match self.output {
            OutputFormat::Json => println!("{}", metadata.to_json_pretty()?),
            OutputFormat::Table => Self::output_table(&metadata),
        }

        Ok(())
    }

    fn output_table(metadata: &PackageMetadata) {
        let info = metadata.info();
        let unset = "–".dim();

        println!("{:<18} {}", "name", info.name);
        println!("{:<18} {}", "version", info.version);
        println!(
            "{:<18} {}",
            "author",
            info.author.as_deref().unwrap_or(&unset)
        );
        println!(
            "{:<18} {}",
            "author_email",
            info.author_email.as_deref().unwrap_or(&unset)
        );
        println!("{:<18} {}", "install_requires", metadata.install_requires());
    }
}
