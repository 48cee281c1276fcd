use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use mailframe_editor::{ExportResult, Pipeline};
use mailframe_model::deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Design file to export
    pub input: PathBuf,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn export(args: ExportArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let result = export_file(&args.input, &config)?;
    let json = serde_json::to_string_pretty(&result)?;

    match &args.output {
        Some(path) => {
            fs::write(path, json)?;
            info!(output = %path.display(), "export written");
        }
        None => println!("{}", json),
    }

    if result.success {
        Ok(())
    } else {
        Err(anyhow!(
            "Export failed: {}",
            result.error_message.as_deref().unwrap_or("unknown error")
        ))
    }
}

fn export_file(path: &Path, config: &Config) -> Result<ExportResult> {
    let source = fs::read_to_string(path)?;
    let design = deserialize(&source)?;
    let mut pipeline = Pipeline::new(config.editor.compile.clone());
    Ok(pipeline.export(&design))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_export_file() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().to_path_buf();
        let file = dir.join("empty.json");
        fs::write(&file, "{}").unwrap();

        let result = export_file(&file, &Config::default()).unwrap();

        assert!(result.success);
        assert!(result.html.contains("</html>"));
        assert!(result.design.rows().is_empty());
    }
}
