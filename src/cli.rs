// CLI module - command-line argument parsing and handlers
//
// Subcommands:
// - regions: List the muscle regions that can be queried
// - query:   Ask the model for exercises targeting one region
// - prompt:  Print the request body a query would send, without sending it
// - config:  Show, locate, reset, edit or update the config file

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use neuromuscle::anatomy::{MuscleGroup, MuscleRegion, MuscleRegistry, RegionId};
use neuromuscle::config::{Config, VERSION};
use neuromuscle::prompt::PromptBuilder;
use neuromuscle::query::{ExerciseQueryPipeline, ExerciseRecord, HttpTransport, QueryOutcome};
use neuromuscle::session::Session;
use neuromuscle::util::truncate_utf8_safe;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;
use std::sync::Arc;
use unicode_width::UnicodeWidthStr;

/// Neuromuscle - exercise recommendations for individual muscle regions
#[derive(Parser)]
#[command(name = "neuromuscle")]
#[command(version = VERSION)]
#[command(about = "Exercise recommendations for individual muscle regions", long_about = None)]
pub struct Cli {
    /// Use this config file instead of ~/.config/neuromuscle/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List muscle regions
    Regions {
        /// Only this group (chest, back, shoulder, arm, core, leg, head)
        #[arg(long)]
        group: Option<String>,

        /// Include decorative regions
        #[arg(long)]
        all: bool,
    },

    /// Query exercises for a region
    Query {
        /// Region id, e.g. `lats` or `upper_chest`
        region: String,

        /// Print the records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the request that `query` would send
    Prompt {
        /// Region id
        region: String,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(long)]
        edit: bool,

        /// Rewrite config with the current structure (preserves user values)
        #[arg(long)]
        update: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Region commands
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_regions(group: Option<&str>, all: bool) -> Result<()> {
    let registry = MuscleRegistry::standard();

    let regions: Vec<&MuscleRegion> = match group {
        Some(name) => {
            let Some(group) = MuscleGroup::parse(name) else {
                let known: Vec<&str> = MuscleGroup::ALL.iter().map(|g| g.as_str()).collect();
                bail!("Unknown group '{}'. Expected one of: {}", name, known.join(", "));
            };
            registry
                .by_group(group)
                .filter(|r| all || r.interactive)
                .collect()
        }
        None => registry
            .all()
            .iter()
            .filter(|r| all || r.interactive)
            .collect(),
    };

    let rows: Vec<[&str; 4]> = regions
        .iter()
        .map(|r| {
            [
                r.id.as_str(),
                r.group.as_str(),
                r.display_name,
                r.anatomical_name,
            ]
        })
        .collect();
    print_table(&["ID", "GROUP", "NAME", "ANATOMY"], &rows);
    Ok(())
}

/// Map a user-supplied id to an interactive region
fn resolve_region(registry: &MuscleRegistry, input: &str) -> Result<RegionId> {
    let input = input.trim();
    match registry.lookup(input) {
        Some(region) if region.interactive => Ok(region.id),
        Some(region) => bail!(
            "'{}' is decorative and has no exercises. Run `neuromuscle regions` to list valid ids",
            region.id
        ),
        None => bail!(
            "Unknown region '{}'. Run `neuromuscle regions` to list valid ids",
            input
        ),
    }
}

pub fn handle_prompt(config: &Config, region: &str) -> Result<()> {
    let registry = MuscleRegistry::standard();
    let id = resolve_region(&registry, region)?;

    let builder = PromptBuilder::new(config.provider.model.clone(), config.prompt.clone());
    let request = builder.build_request(registry.anatomical_name(id));

    println!("# POST {}", config.provider.endpoint_url());
    println!(
        "{}",
        serde_json::to_string_pretty(&request).context("Failed to serialize request")?
    );
    Ok(())
}

pub async fn handle_query(config: &Config, region: &str, json: bool) -> Result<()> {
    let registry = Arc::new(MuscleRegistry::standard());
    let id = resolve_region(&registry, region)?;

    let transport =
        HttpTransport::from_config(&config.provider).context("Failed to build HTTP client")?;
    let pipeline = ExerciseQueryPipeline::new(
        Arc::new(transport),
        config.provider.credential.clone(),
    );
    if !pipeline.has_credential() {
        eprintln!(
            "No API key: export {} or set [provider].key (see `neuromuscle config --path`)",
            config.provider.key_env
        );
    }
    let prompts = PromptBuilder::new(config.provider.model.clone(), config.prompt.clone());
    let mut session = Session::new(registry.clone(), Arc::new(pipeline), prompts);

    if !json {
        eprintln!(
            "Querying {} for {} ...",
            config.provider.model,
            registry.display_name(id)
        );
    }
    session.select(id);
    session.settle().await;

    let Some(outcome) = session.panel().outcome() else {
        bail!("Query finished without a result");
    };

    match outcome {
        QueryOutcome::Success(records) => {
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(records)
                        .context("Failed to serialize records")?
                );
            } else {
                println!("{}", registry.display_name(id));
                println!();
                print_records(records);
            }
            Ok(())
        }
        QueryOutcome::Empty => {
            if json {
                println!("[]");
            } else {
                println!("No exercises returned for {}", registry.display_name(id));
            }
            Ok(())
        }
        QueryOutcome::Failure(failure) => bail!("{}", failure),
    }
}

fn print_records(records: &[ExerciseRecord]) {
    let rows: Vec<[String; 5]> = records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            [
                format!("{}.", i + 1),
                r.name.clone(),
                r.recommended_volume.clone(),
                format!("{:.1}", r.display_score()),
                r.difficulty
                    .as_ref()
                    .map(|d| d.label_zh().to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();
    let borrowed: Vec<[&str; 5]> = rows
        .iter()
        .map(|r| [&*r[0], &*r[1], &*r[2], &*r[3], &*r[4]])
        .collect();
    print_table(&["#", "EXERCISE", "VOLUME", "SCORE", "LEVEL"], &borrowed);

    for (i, record) in records.iter().enumerate() {
        if record.description.trim().is_empty() {
            continue;
        }
        println!();
        let focus = if record.focus.is_empty() {
            String::new()
        } else {
            format!(" [{}]", record.focus)
        };
        println!("{}. {}{}", i + 1, record.name, focus);
        println!("   {}", truncate_utf8_safe(record.description.trim(), 600));
        if let Some(url) = &record.media_url {
            println!("   {}", url);
        }
    }
}

/// Left-aligned table with display-width padding (CJK glyphs are two columns)
fn print_table<const N: usize>(headers: &[&str; N], rows: &[[&str; N]]) {
    let mut widths = headers.map(|h| h.width());
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.width());
        }
    }

    let line = |cells: &[&str; N]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, w)| pad(cell, *w))
            .collect();
        padded.join("  ").trim_end().to_string()
    };

    println!("{}", line(headers));
    for row in rows {
        println!("{}", line(row));
    }
}

fn pad(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

// ─────────────────────────────────────────────────────────────────────────────
// Config commands
// ─────────────────────────────────────────────────────────────────────────────

/// Handle `config`. Runs before logging is set up, so output is plain stdio.
pub fn handle_config(
    config_file: Option<&PathBuf>,
    show: bool,
    reset: bool,
    edit: bool,
    update: bool,
    path: bool,
) {
    if path {
        handle_config_path(config_file);
    } else if show {
        handle_config_show(config_file);
    } else if reset {
        handle_config_reset(config_file);
    } else if edit {
        handle_config_edit(config_file);
    } else if update {
        handle_config_update(config_file);
    } else {
        // No flag provided, show help
        println!("Usage: neuromuscle config [--show|--reset|--edit|--update|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --edit    Open config file in $EDITOR");
        println!("  --update  Update config with new structure (preserves user values)");
        println!("  --path    Show config file path");
    }
}

fn target_path(config_file: Option<&PathBuf>) -> PathBuf {
    match config_file.cloned().or_else(Config::config_path) {
        Some(path) => path,
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

/// Load config, or print the error with tips and exit
pub fn load_config_or_exit(config_file: Option<&PathBuf>) -> Config {
    let result = match config_file {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    match result {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            eprintln!();
            eprintln!("Tips:");
            eprintln!("  - Check the TOML syntax (quoted strings, [section] headers)");
            eprintln!("  - Show the file location: neuromuscle config --path");
            eprintln!("  - Start over from defaults: neuromuscle config --reset");
            std::process::exit(1);
        }
    }
}

fn handle_config_path(config_file: Option<&PathBuf>) {
    println!("{}", target_path(config_file).display());
}

fn handle_config_show(config_file: Option<&PathBuf>) {
    let config = load_config_or_exit(config_file);
    let provider = &config.provider;

    println!("# Effective configuration (env > file > defaults)");
    println!();
    println!("[provider]");
    println!("endpoint = {:?}", provider.endpoint_url());
    println!("model = {:?}", provider.model);
    println!("key_env = {:?}", provider.key_env);
    match &provider.credential {
        Some(credential) => println!("key = set (sha256 {})", credential.fingerprint()),
        None => println!("key = missing"),
    }
    println!("timeout_secs = {}", provider.timeout.as_secs());
    println!();
    println!("[prompt]");
    println!("temperature = {:?}", config.prompt.temperature);
    println!("max_tokens = {}", config.prompt.max_tokens);
    println!("exercise_count = {}", config.prompt.exercise_count);
    println!("language = {:?}", config.prompt.language);
    println!();
    println!("[highlight]");
    println!("selected = \"{}\"", config.highlight.selected);
    println!("hover = \"{}\"", config.highlight.hover);
    println!(
        "pulse_period_ms = {}",
        config.highlight.pulse_period.as_millis()
    );
    println!();
    println!("[logging]");
    println!("level = {:?}", config.logging.level);
    println!("file_enabled = {}", config.logging.file_enabled);

    // Show source info
    println!();
    let path = target_path(config_file);
    if path.exists() {
        println!("# Source: {}", path.display());
    } else {
        println!("# Source: defaults (no config file)");
    }
    for warning in &config.warnings {
        println!("# Warning: {}", warning);
    }
}

fn handle_config_reset(config_file: Option<&PathBuf>) {
    let path = target_path(config_file);

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        let _ = std::io::stderr().flush();

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err()
            || !input.trim().eq_ignore_ascii_case("y")
        {
            println!("Aborted.");
            return;
        }
    }

    // Create parent directory
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            std::process::exit(1);
        }
    }

    // Write the default config (using Config's single source of truth)
    if let Err(e) = std::fs::write(&path, Config::default().to_toml()) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}

fn handle_config_edit(config_file: Option<&PathBuf>) {
    let path = target_path(config_file);

    // Ensure config exists
    if !path.exists() {
        if config_file.is_some() {
            if let Err(e) = std::fs::write(&path, Config::default().to_toml()) {
                eprintln!("Error writing config: {}", e);
                std::process::exit(1);
            }
        } else {
            Config::ensure_config_exists();
        }
        println!("Created new config file: {}", path.display());
    }

    // Get editor from environment
    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            // Platform-specific fallback
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    println!("Opening {} with {}", path.display(), editor);

    match Command::new(&editor).arg(&path).status() {
        Ok(s) if s.success() => {}
        Ok(s) => {
            eprintln!("Editor exited with status: {}", s);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Failed to launch editor '{}': {}", editor, e);
            eprintln!("Set $EDITOR environment variable to your preferred editor");
            std::process::exit(1);
        }
    }
}

fn handle_config_update(config_file: Option<&PathBuf>) {
    let path = target_path(config_file);

    if !path.exists() {
        if let Err(e) = std::fs::create_dir_all(path.parent().unwrap_or(&path))
            .and_then(|_| std::fs::write(&path, Config::default().to_toml()))
        {
            eprintln!("Error writing config: {}", e);
            std::process::exit(1);
        }
        println!("Created new config file: {}", path.display());
        return;
    }

    // File values only; env overrides stay out of the rewritten file
    let updated = match Config::updated_toml(&path) {
        Ok(toml) => toml,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            eprintln!("Fix the file first, or run: neuromuscle config --reset");
            std::process::exit(1);
        }
    };

    // Backup existing
    let backup_path = path.with_extension("toml.bak");
    if let Err(e) = std::fs::copy(&path, &backup_path) {
        eprintln!("Warning: Could not create backup: {}", e);
    } else {
        println!("Backup created: {}", backup_path.display());
    }

    if let Err(e) = std::fs::write(&path, updated) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config updated with latest structure: {}", path.display());
    println!("Your values have been preserved.");
}
