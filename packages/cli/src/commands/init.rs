use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use mailframe_editor::{Document, EditorOptions, Mutation};
use mailframe_model::{ColumnPath, ContentType};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Directory for design files
    #[arg(short, long, default_value = "designs")]
    pub designs_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!(
        "{}",
        "📝 Initializing Mailframe project...".bright_blue().bold()
    );

    let designs_dir = PathBuf::from(cwd).join(&args.designs_dir);
    if !designs_dir.exists() {
        fs::create_dir_all(&designs_dir)?;
        println!("  {} Created {}/", "✓".green(), args.designs_dir);
    }

    let starter_file = designs_dir.join("welcome.json");
    if !starter_file.exists() {
        fs::write(&starter_file, starter_design()?)?;
        println!("  {} Created welcome.json", "✓".green());
    }

    let config = Config {
        designs_dir: args.designs_dir.clone(),
        ..Config::default()
    };
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}/welcome.json", args.designs_dir);
    println!("  2. Run: mailframe render");
    println!("  3. Check output in {}/", config.out_dir);

    Ok(())
}

/// A one-row design with a heading, a paragraph and a button
fn starter_design() -> Result<String> {
    let mut doc = Document::new(EditorOptions::default());
    let column = ColumnPath::top(0, 0);

    let placements = [ContentType::Heading, ContentType::Text, ContentType::Button]
        .into_iter()
        .map(|content_type| Mutation::PlaceComponent {
            column: column.clone(),
            index: None,
            content_type,
        })
        .collect();
    doc.apply_batch(placements, "Starter content")?;

    Ok(doc.to_json()?)
}
