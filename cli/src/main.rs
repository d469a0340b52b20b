//! glyphflow CLI - document model inspection and editing tool

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use glyphflow::{Document, EditSession, GroupingMode};

#[derive(Parser)]
#[command(name = "glyphflow")]
#[command(version)]
#[command(about = "Inspect and edit glyph-level document models", long_about = None)]
struct Cli {
    /// Input document model (JSON)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show document information
    Info {
        /// Input document model (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// List editable text groups
    Groups {
        /// Input document model (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Grouping policy
        #[arg(long, value_enum, default_value = "auto")]
        mode: Mode,

        /// Only show groups on this page (zero-based)
        #[arg(long)]
        page: Option<usize>,

        /// Emit groups as JSON instead of a listing
        #[arg(long)]
        json: bool,
    },

    /// Apply text edits and write the rebuilt document
    Apply {
        /// Input document model (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Edits file: JSON object mapping "page.seq" group ids to text
        #[arg(short, long, value_name = "FILE")]
        edits: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Grouping policy
        #[arg(long, value_enum, default_value = "auto")]
        mode: Mode,

        /// Rebuild every edited group as a single run
        #[arg(long)]
        force_single: bool,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Keep line-level groups
    SingleLine,
    /// Merge lines into paragraphs
    Paragraph,
    /// Decide per page (default)
    Auto,
}

impl From<Mode> for GroupingMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::SingleLine => GroupingMode::SingleLine,
            Mode::Paragraph => GroupingMode::Paragraph,
            Mode::Auto => GroupingMode::Auto,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Groups {
            input,
            mode,
            page,
            json,
        }) => cmd_groups(&input, mode.into(), page, json),
        Some(Commands::Apply {
            input,
            edits,
            output,
            mode,
            force_single,
        }) => cmd_apply(&input, &edits, output.as_deref(), mode.into(), force_single),
        None => {
            if let Some(input) = cli.input {
                cmd_info(&input)
            } else {
                println!("{}", "Usage: glyphflow <FILE>".yellow());
                println!("       glyphflow --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_info(input: &Path) -> glyphflow::Result<()> {
    let doc = Document::from_json_file(input)?;

    println!("{}", "Document".green().bold());
    println!("  Pages:  {}", doc.page_count());
    println!("  Fonts:  {}", doc.fonts.len());
    let runs: usize = doc.pages.iter().map(|p| p.texts.len()).sum();
    let images: usize = doc.pages.iter().map(|p| p.images.len()).sum();
    println!("  Runs:   {runs}");
    println!("  Images: {images}");

    for (page_index, page) in doc.pages.iter().enumerate() {
        println!(
            "  Page {page_index}: {:.0}x{:.0} pt ({} runs, {} images)",
            page.width_or_default(),
            page.height_or_default(),
            page.texts.len(),
            page.images.len()
        );
    }

    for font in &doc.fonts {
        let upem = font
            .units_per_em
            .map(|u| u.to_string())
            .unwrap_or_else(|| "default".to_string());
        println!("  Font {} (upem {upem})", font.id.cyan());
    }
    Ok(())
}

fn cmd_groups(
    input: &Path,
    mode: GroupingMode,
    page: Option<usize>,
    json: bool,
) -> glyphflow::Result<()> {
    let doc = Document::from_json_file(input)?;
    let groups = glyphflow::group_document_text(&doc, mode);

    if json {
        let selected: Vec<_> = match page {
            Some(p) => groups.get(p).cloned().into_iter().collect(),
            None => groups,
        };
        println!("{}", serde_json::to_string_pretty(&selected)?);
        return Ok(());
    }

    for (page_index, page_groups) in groups.iter().enumerate() {
        if page.is_some_and(|p| p != page_index) {
            continue;
        }
        println!(
            "{} {} ({} groups)",
            "Page".green().bold(),
            page_index,
            page_groups.len()
        );
        for group in page_groups {
            let kind = if group.is_paragraph() { "par" } else { "line" };
            println!(
                "  [{}] {} {}",
                group.id.to_string().cyan(),
                kind.dimmed(),
                preview(&group.text)
            );
        }
    }
    Ok(())
}

fn cmd_apply(
    input: &Path,
    edits_path: &Path,
    output: Option<&Path>,
    mode: GroupingMode,
    force_single: bool,
) -> glyphflow::Result<()> {
    let doc = Document::from_json_file(input)?;
    let edits: BTreeMap<String, String> = serde_json::from_str(&fs::read_to_string(edits_path)?)?;

    let mut session = EditSession::new(doc, mode);
    let mut applied = 0usize;
    for (key, text) in &edits {
        let applied_here = parse_group_key(key)
            .is_some_and(|(page_index, seq)| session.set_group_text(page_index, seq, text.clone()));
        if applied_here {
            applied += 1;
        } else {
            eprintln!("{}: no group {key}", "Warning".yellow().bold());
        }
    }

    let dirty = session.dirty_pages().iter().filter(|d| **d).count();
    log::info!("applied {applied} edits, {dirty} dirty pages");

    let rebuilt = session.export(force_single);
    match output {
        Some(path) => {
            rebuilt.to_json_file(path)?;
            println!(
                "{} {} edits -> {}",
                "Applied".green().bold(),
                applied,
                path.display()
            );
        }
        None => println!("{}", rebuilt.to_json_string()?),
    }
    Ok(())
}

/// Parse a "page.seq" group key.
fn parse_group_key(key: &str) -> Option<(usize, usize)> {
    let (page, seq) = key.split_once('.')?;
    Some((page.parse().ok()?, seq.parse().ok()?))
}

fn preview(text: &str) -> String {
    let flat = text.replace('\n', " / ");
    let mut chars = flat.chars();
    let short: String = chars.by_ref().take(60).collect();
    if chars.next().is_some() {
        format!("{short}...")
    } else {
        short
    }
}
