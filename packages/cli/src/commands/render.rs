use crate::config::{resolve_inputs, Config};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use mailframe_editor::Document;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Design file or directory (defaults to the configured designs directory)
    pub path: Option<PathBuf>,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Use the stored column widths instead of equal shares
    #[arg(long)]
    pub stored_widths: bool,
}

pub fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let mut config = Config::load(cwd)?;
    if args.stored_widths {
        config.editor.compile.column_widths = mailframe_editor::ColumnWidthPolicy::Stored;
    }

    let root = args
        .path
        .clone()
        .unwrap_or_else(|| config.get_designs_dir(cwd));
    let files = resolve_inputs(&root)?;
    let base = if root.is_dir() {
        root.clone()
    } else {
        root.parent().map(Path::to_path_buf).unwrap_or_default()
    };
    let out_dir = match &args.out_dir {
        Some(out) => PathBuf::from(cwd).join(out),
        None => config.get_out_dir(cwd),
    };

    if !args.stdout {
        println!("{}", "🔨 Rendering designs...".bright_blue().bold());
    }

    if files.is_empty() {
        println!("{}", "⚠️  No design files found".yellow());
        return Ok(());
    }

    let mut success_count = 0;
    let mut error_count = 0;

    for file in &files {
        let relative_path = file.strip_prefix(&base).unwrap_or(file);
        match render_file(file, &config) {
            Ok(html) if args.stdout => {
                success_count += 1;
                println!("{}", html);
            }
            Ok(html) => {
                let output_file = out_dir.join(relative_path).with_extension("html");
                if let Some(parent) = output_file.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&output_file, html)?;

                success_count += 1;
                println!(
                    "  {} {} → {}",
                    "✓".green(),
                    relative_path.display(),
                    output_file.display()
                );
            }
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    relative_path.display(),
                    e.to_string().red()
                );
            }
        }
    }

    if args.stdout {
        return if error_count == 0 {
            Ok(())
        } else {
            Err(anyhow::anyhow!("{} designs failed to render", error_count))
        };
    }

    println!();
    if error_count == 0 {
        println!(
            "{} Rendered {} designs successfully",
            "✅".green(),
            success_count
        );
        Ok(())
    } else {
        println!(
            "{} Rendered {} designs, {} errors",
            "⚠️".yellow(),
            success_count,
            error_count
        );
        Err(anyhow::anyhow!("{} designs failed to render", error_count))
    }
}

fn render_file(file_path: &Path, config: &Config) -> Result<String> {
    debug!(file = %file_path.display(), "rendering");
    let source = fs::read_to_string(file_path)?;
    let doc = Document::from_json(&source, config.editor.clone())?;
    Ok(doc.render()?)
}
