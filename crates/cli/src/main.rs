// docgrid CLI - headless section grid operations

mod exit_codes;

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use docgrid_config::Settings;
use docgrid_engine::ops::{apply_ops, Op};
use docgrid_engine::{export_sections, Editor, Section};
use docgrid_io::{DocError, Document};

use exit_codes::{
    apply_exit_code, EXIT_ERROR, EXIT_IO, EXIT_PARSE, EXIT_SUCCESS, EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "docgrid")]
#[command(about = "Document section tables: normalize, edit and preview (headless)")]
#[command(long_version = long_version())]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Settings file (default: <config dir>/docgrid/settings.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load sections in any saved shape and print them in the current shape
    #[command(after_help = "\
Examples:
  docgrid normalize old-sections.json
  docgrid normalize document.json -o sections.json
  cat sections.json | docgrid normalize -")]
    Normalize {
        /// Sections file (array, {\"sections\": [...]}, or one section); - for stdin
        input: String,

        /// Write here instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Run editor operations against sections and print the saved result
    #[command(after_help = "\
Ops file is a JSON array or one JSON object per line:
  [
    {\"op\": \"add_row\", \"section\": 0, \"at\": 2},
    {\"op\": \"select\", \"section\": 0, \"start_row\": 1, \"start_col\": 0, \"end_row\": 2, \"end_col\": 0},
    {\"op\": \"merge\"},
    {\"op\": \"color\", \"property\": \"background\", \"value\": \"#DBEAFE\"},
    {\"op\": \"toggle_summary\", \"section\": 0}
  ]

Examples:
  docgrid apply sections.json --ops edits.json
  docgrid apply - --ops edits.jsonl --no-atomic < sections.json")]
    Apply {
        /// Sections file; - for stdin (use an empty array to start from a new section)
        input: String,

        /// Ops file (JSON array or JSONL); - for stdin
        #[arg(long)]
        ops: String,

        /// Keep ops applied before a failing op instead of rolling back
        #[arg(long)]
        no_atomic: bool,

        /// Write here instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Render a print preview as standalone HTML
    #[command(after_help = "\
Examples:
  docgrid render sections.json -o preview.html
  docgrid render document.json --document document.json -o preview.html")]
    Render {
        /// Sections file; - for stdin
        input: String,

        /// Document record for the page header
        #[arg(long)]
        document: Option<PathBuf>,

        /// Write here instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// List the color picker swatches from settings
    Palette {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the settings file path
    ConfigPath,
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nengine:  docgrid-engine ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   debug",
            "\ntarget:  ", env!("TARGET"),
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nengine:  docgrid-engine ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   release",
            "\ntarget:  ", env!("TARGET"),
        )
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // stdout carries command output
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).without_time())
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        None => {
            // No subcommand = show help
            eprintln!("Usage: docgrid <command> [options]");
            eprintln!("       docgrid --help for more information");
            Ok(())
        }
        Some(Commands::Normalize { input, output }) => cmd_normalize(&input, output),
        Some(Commands::Apply { input, ops, no_atomic, output }) => {
            let settings = load_settings(cli.config.as_deref());
            cmd_apply(&input, &ops, !no_atomic, output, &settings)
        }
        Some(Commands::Render { input, document, output }) => cmd_render(&input, document, output),
        Some(Commands::Palette { json }) => {
            let settings = load_settings(cli.config.as_deref());
            cmd_palette(&settings, json)
        }
        Some(Commands::ConfigPath) => {
            match cli.config {
                Some(path) => println!("{}", path.display()),
                None => println!("{}", Settings::config_path_display()),
            }
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self { code: EXIT_PARSE, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Error from a file or document operation, labelled with its source.
    fn doc(source: &str, err: DocError) -> Self {
        let message = format!("{}: {}", source, err);
        match err {
            DocError::Io(_) => Self::io(message),
            DocError::Parse(_) | DocError::Shape(_) => Self::parse(message),
            DocError::Validation(_) => Self { code: EXIT_ERROR, message, hint: None },
        }
    }
}

// ============================================================================
// Helpers

fn load_settings(path: Option<&Path>) -> Settings {
    match path {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
}

fn source_name(arg: &str) -> &str {
    if arg == "-" { "<stdin>" } else { arg }
}

/// Read a file argument, `-` meaning stdin.
fn read_arg(arg: &str) -> Result<String, CliError> {
    if arg == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| CliError::io(format!("failed to read stdin: {}", e)))?;
        if buf.trim().is_empty() {
            return Err(CliError::parse("no input received on stdin")
                .with_hint("cat sections.json | docgrid normalize -"));
        }
        Ok(buf)
    } else {
        std::fs::read_to_string(arg).map_err(|e| CliError::io(format!("failed to read {}: {}", arg, e)))
    }
}

fn read_sections(input: &str) -> Result<Vec<Section>, CliError> {
    let text = read_arg(input)?;
    let sections = docgrid_io::parse_sections(&text)
        .map_err(|e| CliError::doc(source_name(input), e))?;
    log::info!("loaded {} section(s) from {}", sections.len(), source_name(input));
    Ok(sections)
}

/// Parse ops: JSON array, or one op object per line.
fn parse_ops(text: &str) -> Result<Vec<Op>, CliError> {
    if text.trim_start().starts_with('[') {
        serde_json::from_str(text)
            .map_err(|e| CliError::parse(format!("failed to parse ops JSON: {}", e)))
    } else {
        text.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(n, line)| {
                serde_json::from_str(line)
                    .map_err(|e| CliError::parse(format!("ops line {}: {}", n + 1, e)))
            })
            .collect()
    }
}

fn write_output(output: Option<&Path>, text: &str) -> Result<(), CliError> {
    match output {
        Some(path) if path.as_os_str() != "-" => {
            std::fs::write(path, text)
                .map_err(|e| CliError::io(format!("failed to write {}: {}", path.display(), e)))?;
            log::info!("wrote {}", path.display());
            Ok(())
        }
        _ => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|_| if text.ends_with('\n') { Ok(()) } else { stdout.write_all(b"\n") })
                .map_err(|e| CliError::io(e.to_string()))
        }
    }
}

// ============================================================================
// Commands

fn cmd_normalize(input: &str, output: Option<PathBuf>) -> Result<(), CliError> {
    let sections = read_sections(input)?;
    let json = docgrid_io::to_json_string(&export_sections(&sections))
        .map_err(|e| CliError::doc("output", e))?;
    write_output(output.as_deref(), &json)
}

fn cmd_apply(
    input: &str,
    ops_arg: &str,
    atomic: bool,
    output: Option<PathBuf>,
    settings: &Settings,
) -> Result<(), CliError> {
    if input == "-" && ops_arg == "-" {
        return Err(CliError::args("sections and ops cannot both come from stdin"));
    }

    let sections = read_sections(input)?;
    let ops = parse_ops(&read_arg(ops_arg)?)?;

    let mut editor = Editor::new(settings.section_template());
    editor.open_sections(sections);
    let result = apply_ops(&mut editor, &ops, atomic);
    log::info!(
        "applied {}/{} op(s), {} changed the grid",
        result.applied,
        ops.len(),
        result.changed
    );

    if let Some(err) = &result.error {
        if atomic {
            return Err(CliError {
                code: apply_exit_code(err, atomic),
                message: err.to_string(),
                hint: Some("no changes were written; use --no-atomic to keep earlier ops".to_string()),
            });
        }
    }

    let mut saved = Vec::new();
    editor.save(|sections| saved = sections);
    editor.finish_close();

    let json = docgrid_io::to_json_string(&saved).map_err(|e| CliError::doc("output", e))?;
    write_output(output.as_deref(), &json)?;

    match result.error {
        Some(err) => Err(CliError {
            code: apply_exit_code(&err, atomic),
            message: err.to_string(),
            hint: Some(format!("output holds the first {} op(s)", result.applied)),
        }),
        None => Ok(()),
    }
}

fn cmd_render(input: &str, document: Option<PathBuf>, output: Option<PathBuf>) -> Result<(), CliError> {
    let sections = read_sections(input)?;

    let document: Option<Document> = match document {
        Some(path) => {
            let doc = docgrid_io::load_document(&path)
                .map_err(|e| CliError::doc(&path.display().to_string(), e))?;
            if let Err(e) = doc.validate() {
                log::warn!("{}: {}", path.display(), e);
            }
            Some(doc)
        }
        None => None,
    };

    let html = docgrid_io::render_html(document.as_ref(), &sections);
    write_output(output.as_deref(), &html)
}

fn cmd_palette(settings: &Settings, json: bool) -> Result<(), CliError> {
    if json {
        let value = serde_json::json!({
            "background": settings.background_palette,
            "text": settings.text_palette,
        });
        let text = serde_json::to_string_pretty(&value).map_err(|e| CliError::io(e.to_string()))?;
        return write_output(None, &text);
    }

    let mut out = String::new();
    for (title, swatches) in [
        ("background", &settings.background_palette),
        ("text", &settings.text_palette),
    ] {
        out.push_str(title);
        out.push('\n');
        for swatch in swatches.iter() {
            let value = if swatch.is_none() { "(none)" } else { swatch.value.as_str() };
            out.push_str(&format!("  {:<8} {}\n", value, swatch.label));
        }
    }
    write_output(None, &out)
}
