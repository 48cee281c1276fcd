use crate::config::{resolve_inputs, Config};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use mailframe_editor::merge_tags::{used_tags, TagCounter};
use mailframe_editor::MergeTag;
use mailframe_linter::{lint_design, Diagnostic, DiagnosticLevel, LintOptions};
use mailframe_model::visitor::Visitor;
use mailframe_model::{deserialize, Design};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct LintArgs {
    /// Design file or directory to lint
    pub input: PathBuf,

    /// Show all diagnostics including info level
    #[arg(short, long)]
    pub all: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

#[derive(Default)]
struct Totals {
    diagnostics: usize,
    errors: usize,
    warnings: usize,
    files: usize,
}

pub fn lint(args: LintArgs, cwd: &str) -> Result<()> {
    if args.format != "text" && args.format != "json" {
        return Err(anyhow::anyhow!("Unknown format: {}. Use: text or json", args.format));
    }

    let config = Config::load(cwd)?;
    let files = resolve_inputs(&args.input)?;
    let text = args.format == "text";

    if text {
        println!("🔍 {} Mailframe Linter", "Starting".green().bold());
        println!("   Input: {}", args.input.display());
        println!();
    }

    let mut totals = Totals::default();
    for file in &files {
        lint_file(file, &args, &config, &mut totals)?;
    }

    if text {
        println!();
        println!(
            "✨ {} Linting complete!",
            if totals.errors > 0 {
                "Done".red().bold()
            } else {
                "Done".green().bold()
            }
        );
        println!("   Files checked: {}", totals.files);
        println!("   Total diagnostics: {}", totals.diagnostics);

        if totals.errors > 0 {
            println!("   {} {}", "Errors:".red(), totals.errors);
        }
        if totals.warnings > 0 {
            println!("   {} {}", "Warnings:".yellow(), totals.warnings);
        }
        if totals.errors == 0 && totals.warnings == 0 {
            println!("   {} No issues found!", "✓".green());
        }
    }

    if totals.errors > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn lint_file(path: &Path, args: &LintArgs, config: &Config, totals: &mut Totals) -> Result<()> {
    let source = fs::read_to_string(path)?;
    let design = deserialize(&source)
        .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;

    let diagnostics: Vec<Diagnostic> = lint_design(&design, LintOptions::default())
        .into_iter()
        .filter(|d| args.all || d.level != DiagnosticLevel::Info)
        .collect();

    totals.files += 1;
    totals.diagnostics += diagnostics.len();
    totals.errors += count(&diagnostics, DiagnosticLevel::Error);
    totals.warnings += count(&diagnostics, DiagnosticLevel::Warning);

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&diagnostics)?);
        return Ok(());
    }

    println!("{}", path.display().to_string().bold());
    for diagnostic in &diagnostics {
        print_diagnostic(diagnostic);
    }

    if args.all {
        if let Some(summary) = merge_tag_summary(&design, config.editor.available_merge_tags()) {
            println!("   {} {}", "merge tags:".dimmed(), summary);
        }
    }

    Ok(())
}

/// Placeholder totals plus the catalogue keys in use; None without placeholders
fn merge_tag_summary(design: &Design, available: &[MergeTag]) -> Option<String> {
    let mut counter = TagCounter::default();
    counter.visit_design(design);
    if counter.total == 0 {
        return None;
    }

    let used: Vec<&str> = used_tags(design, available)
        .into_iter()
        .map(|tag| tag.key.as_str())
        .collect();

    let mut summary = format!("{} placeholders", counter.total);
    if !counter.malformed.is_empty() {
        summary.push_str(&format!(", {} malformed", counter.malformed.len()));
    }
    if !used.is_empty() {
        summary.push_str(&format!(" ({})", used.join(", ")));
    }
    Some(summary)
}

fn count(diagnostics: &[Diagnostic], level: DiagnosticLevel) -> usize {
    diagnostics.iter().filter(|d| d.level == level).count()
}

fn print_diagnostic(diagnostic: &Diagnostic) {
    let level = match diagnostic.level {
        DiagnosticLevel::Error => "error".red().bold(),
        DiagnosticLevel::Warning => "warning".yellow().bold(),
        DiagnosticLevel::Info => "info".blue().bold(),
    };

    println!(
        "   {}[{}] {} ({})",
        level,
        diagnostic.rule.dimmed(),
        diagnostic.message,
        diagnostic.location
    );
    if let Some(suggestion) = &diagnostic.suggestion {
        println!("      {} {}", "help:".cyan(), suggestion);
    }
}
