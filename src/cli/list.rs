use std::path::Path;

use reqlist::{Config, RequirementList};
use tracing::instrument;

#[derive(Debug, Default, clap::Parser)]
pub struct Command {
    /// Output format (text, json)
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    output: OutputFormat,

    /// Fail if the requirements file is missing or unreadable
    #[arg(long)]
    strict: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    /// One requirement per line
    #[default]
    Text,
    /// A JSON array of strings
    Json,
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let config = Config::load_or_default(root);
        let strict = self.strict || config.strict();
        let requirements = super::load_requirements(root, &config, strict)?;

        match self.output {
            OutputFormat::Text => Self::output_text(&requirements),
            OutputFormat::Json => println!("{}", serde_json::to_string(&requirements)?),
        }

        Ok(())
    }

    fn output_text(requirements: &RequirementList) {
        for requirement in requirements {
            println!("{requirement}");
        }
    }
}
