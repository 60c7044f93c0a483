use std::path::Path;

use reqlist::{Config, Line, storage};
use tracing::instrument;

use crate::cli::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Fail if the requirements file is missing or unreadable
    #[arg(long)]
    strict: bool,
}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let config = Config::load_or_default(root);
        let path = config.requirements_path(root);
        let lines = match storage::inspect(&path, config.editable_marker()) {
            Ok(lines) => lines,
            Err(e) if self.strict || config.strict() => return Err(e.into()),
            Err(e) => {
                println!("{}", format!("⚠️  {e}").warning());
                println!("{}", "The package will declare no dependencies.".dim());
                return Ok(());
            }
        };

        let mut kept = 0;
        let mut skipped: Vec<String> = Vec::new();
        let mut issues: Vec<String> = Vec::new();

        for (number, raw, line) in &lines {
            match line {
                Line::Requirement(requirement) => {
                    kept += 1;
                    if requirement.is_editable_variant() {
                        issues.push(format!(
                            "line {number}: '{requirement}' looks like an editable install but \
                             is not exactly '{}', so it is kept as a requirement",
                            config.editable_marker()
                        ));
                    }
                }
                Line::Blank => skipped.push(format!("line {number}: blank")),
                Line::EditableMarker => {
                    skipped.push(format!("line {number}: editable marker '{}'", raw.trim()));
                }
            }
        }

        println!(
            "{}: {kept} requirements, {} lines skipped",
            config.requirements_file().display(),
            skipped.len()
        );
        for entry in &skipped {
            println!("  {}", entry.dim());
        }

        if issues.is_empty() {
            println!("{}", "✅ No marker issues detected.".success());
        } else {
            let issue_count = issues.len();
            println!();
            println!(
                "{}",
                format!("⚠️  {issue_count} possible marker issues found:").warning()
            );
            for (i, issue) in issues.iter().enumerate() {
                println!("{}. {}", i + 1, issue);
            }
        }

        Ok(())
    }
}
