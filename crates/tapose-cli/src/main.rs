//! Command-line front end for `tapose-core`.
//!
//! Prints two documents side by side with their structural differences
//! marked, outlines a single document, or pretty-prints one in place.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use tapose_core::{
    build_tree, compare, document, process, render_side_by_side, render_tree, DiffStats, Format,
    RenderConfig, ViewOptions,
};
use tracing_subscriber::EnvFilter;

const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");
const VERSION_BANNER: &str = concat!("tapose version ", env!("CARGO_PKG_VERSION"));

const EXIT_SAME: i32 = 0;
const EXIT_DIFFERENT: i32 = 1;
const EXIT_ERROR: i32 = 2;

const HELP_TEMPLATE: &str = r#"Usage: tapose [OPTION]... FILE1 [FILE2]
Compare JSON and YAML documents side by side.

Prints FILE1 and FILE2 as two aligned panels with changed lines marked.
When FILE2 is omitted the second input is read from STDIN.

Options:
  --yaml            Read YAML instead of JSON (also detected from .yaml/.yml).
  --all             Show every line instead of collapsing unchanged runs.
  -C, --context=N   Unchanged lines kept around each change: 0, 1, 2, 3, 5 or 10.
  --opts=JSON       View options, e.g. '{"showOnlyDiff":false,"contextLines":5}'.
  --color           Print color diff.
  -f, --format=FMT  Output "side" (default) or "json".
  -o, --output=FILE Write to FILE instead of STDOUT.
  -v, --verbose     Log debug details to STDERR.

Other modes:
  --tree FILE       Print an outline of FILE. Add --expand-all or --collapse-all.
  --fmt FILE        Pretty-print FILE.

Exit status is 0 when the documents match, 1 when they differ and 2 on error.

Examples:
  tapose a.json b.json
  cat b.json | tapose a.json
  tapose --all --color old.yaml new.yaml
  tapose --tree --expand-all config.json

Version: {version}
"#;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    /// Two aligned text panels.
    #[default]
    Side,
    /// The processed lines as JSON.
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "tapose",
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true,
    override_usage = "tapose [OPTION]... FILE1 [FILE2]"
)]
struct Cli {
    #[arg(long = "help", short = 'h', action = ArgAction::SetTrue, hide = true)]
    help: bool,

    #[arg(long = "version", action = ArgAction::SetTrue, hide = true)]
    version: bool,

    /// Render diff output using ANSI colors.
    #[arg(long = "color", action = ArgAction::SetTrue)]
    color: bool,

    /// Select output format (`side` or `json`).
    #[arg(short = 'f', long = "format", value_enum, default_value = "side")]
    format: OutputFormat,

    /// Write output to FILE instead of STDOUT.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// JSON-encoded view options.
    #[arg(long = "opts")]
    opts: Option<String>,

    /// Read YAML instead of JSON.
    #[arg(long = "yaml", action = ArgAction::SetTrue)]
    yaml: bool,

    /// Show all lines instead of only the changes.
    #[arg(long = "all", action = ArgAction::SetTrue)]
    all: bool,

    /// Number of unchanged lines around each change.
    #[arg(short = 'C', long = "context")]
    context: Option<usize>,

    /// Outline a single document.
    #[arg(long = "tree", action = ArgAction::SetTrue, conflicts_with = "fmt")]
    tree: bool,

    /// Expand every node of the outline.
    #[arg(long = "expand-all", action = ArgAction::SetTrue, requires = "tree")]
    expand_all: bool,

    /// Collapse every node of the outline.
    #[arg(
        long = "collapse-all",
        action = ArgAction::SetTrue,
        requires = "tree",
        conflicts_with = "expand_all"
    )]
    collapse_all: bool,

    /// Pretty-print a single document.
    #[arg(long = "fmt", action = ArgAction::SetTrue)]
    fmt: bool,

    /// Log debug details to STDERR.
    #[arg(short = 'v', long = "verbose", action = ArgAction::SetTrue)]
    verbose: bool,

    /// Positional inputs (FILE1 \[FILE2]).
    #[arg()]
    inputs: Vec<PathBuf>,
}

fn main() {
    match try_main() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            let _ = writeln!(io::stderr(), "{err:#}");
            std::process::exit(EXIT_ERROR);
        }
    }
}

fn try_main() -> Result<i32> {
    let cli = Cli::try_parse().map_err(|err| anyhow!(err.to_string().trim_end().to_string()))?;

    if cli.help {
        print!("{}", help_text());
        return Ok(EXIT_SAME);
    }

    if cli.version {
        println!("{VERSION_BANNER}");
        return Ok(EXIT_SAME);
    }

    init_tracing(cli.verbose);

    let mode = if cli.tree {
        Mode::Tree
    } else if cli.fmt {
        Mode::Fmt
    } else {
        Mode::Diff
    };
    tracing::debug!(?mode, inputs = cli.inputs.len(), "starting");

    match mode {
        Mode::Diff => run_diff(&cli),
        Mode::Tree => run_tree(&cli),
        Mode::Fmt => run_fmt(&cli),
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Mode {
    Diff,
    Tree,
    Fmt,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn run_diff(cli: &Cli) -> Result<i32> {
    let (first, second) = match cli.inputs.as_slice() {
        [first] => (InputSource::File(path_from(first)?), InputSource::Stdin),
        [first, second] => {
            (InputSource::File(path_from(first)?), InputSource::File(path_from(second)?))
        }
        _ => bail!("{}", help_text()),
    };

    let format = detect_format(cli, &first);
    let lhs_text = read_input(&first)?;
    let rhs_text = read_input(&second)?;

    let nodes = compare(&lhs_text, &rhs_text, format)?;
    let stats = DiffStats::from_nodes(&nodes);
    tracing::debug!(
        added = stats.added,
        removed = stats.removed,
        changed = stats.changed,
        unchanged = stats.unchanged,
        "diff summary"
    );

    let options = build_options(cli)?;
    let lines = process(&nodes, &options);

    let rendered = match cli.format {
        OutputFormat::Side => {
            render_side_by_side(&lines, &RenderConfig::default().with_color(cli.color))
        }
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(&lines).context("failed to serialize lines")?;
            json.push('\n');
            json
        }
    };
    write_output(cli.output.as_deref(), &rendered)?;

    Ok(if stats.is_empty() { EXIT_SAME } else { EXIT_DIFFERENT })
}

fn run_tree(cli: &Cli) -> Result<i32> {
    let source = single_input(cli)?;
    let format = detect_format(cli, &source);
    let text = read_input(&source)?;
    let value = document::parse(&text, format)
        .with_context(|| format!("invalid {format} in {}", source.describe()))?;

    let expand_all = match (cli.expand_all, cli.collapse_all) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    };
    let tree = build_tree(&value, expand_all);

    let rendered = match cli.format {
        OutputFormat::Side => render_tree(&tree),
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(&tree).context("failed to serialize tree")?;
            json.push('\n');
            json
        }
    };
    write_output(cli.output.as_deref(), &rendered)?;
    Ok(EXIT_SAME)
}

fn run_fmt(cli: &Cli) -> Result<i32> {
    let source = single_input(cli)?;
    let format = detect_format(cli, &source);
    let text = read_input(&source)?;
    let mut formatted = document::format_document(&text, format)
        .with_context(|| format!("invalid {format} in {}", source.describe()))?;
    if !formatted.ends_with('\n') {
        formatted.push('\n');
    }
    write_output(cli.output.as_deref(), &formatted)?;
    Ok(EXIT_SAME)
}

#[derive(Debug)]
enum InputSource {
    File(PathBuf),
    Stdin,
}

impl InputSource {
    fn describe(&self) -> String {
        match self {
            InputSource::File(path) => path.display().to_string(),
            InputSource::Stdin => "STDIN".to_string(),
        }
    }
}

fn single_input(cli: &Cli) -> Result<InputSource> {
    match cli.inputs.as_slice() {
        [] => Ok(InputSource::Stdin),
        [path] => Ok(InputSource::File(path_from(path)?)),
        _ => bail!("expected a single FILE"),
    }
}

fn path_from(input: &Path) -> Result<PathBuf> {
    if input.as_os_str().is_empty() {
        bail!("expected file path; got empty string");
    }
    Ok(input.to_path_buf())
}

fn detect_format(cli: &Cli, source: &InputSource) -> Format {
    if cli.yaml {
        return Format::Yaml;
    }
    match source {
        InputSource::File(path) => Format::from_path(path),
        InputSource::Stdin => Format::Json,
    }
}

fn read_input(source: &InputSource) -> Result<String> {
    match source {
        InputSource::File(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        InputSource::Stdin => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).context("failed to read STDIN")?;
            Ok(buffer)
        }
    }
}

fn write_output(output: Option<&Path>, rendered: &str) -> Result<()> {
    if let Some(path) = output {
        fs::write(path, rendered.as_bytes())
            .with_context(|| format!("failed to write output to {}", path.display()))?;
    } else {
        print!("{rendered}");
        io::stdout().flush().ok();
    }
    Ok(())
}

fn build_options(cli: &Cli) -> Result<ViewOptions> {
    let mut options = match &cli.opts {
        Some(raw) => parse_opts_json(raw)?,
        None => ViewOptions::default(),
    };

    if cli.all {
        options = options.with_show_only_diff(false);
    }

    if let Some(context) = cli.context {
        options = options.with_context_lines(context)?;
    }

    Ok(options)
}

fn parse_opts_json(raw: &str) -> Result<ViewOptions> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        bail!("--opts requires a JSON object");
    }
    ViewOptions::from_json_str(trimmed)
        .with_context(|| format!("failed to parse --opts: {trimmed}"))
}

fn help_text() -> String {
    HELP_TEMPLATE.replace("{version}", VERSION_NUMBER)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tapose").chain(args.iter().copied()))
            .expect("arguments parse")
    }

    #[test]
    fn output_format_default_is_side() {
        assert_eq!(OutputFormat::default(), OutputFormat::Side);
        assert_eq!(cli(&["a.json"]).format, OutputFormat::Side);
    }

    #[test]
    fn flags_override_opts() {
        let opts = r#"{"showOnlyDiff":true,"contextLines":5}"#;
        let parsed = cli(&["--opts", opts, "--all", "-C", "1"]);
        let options = build_options(&parsed).unwrap();
        assert!(!options.show_only_diff());
        assert_eq!(options.context_lines(), 1);
    }

    #[test]
    fn unsupported_context_is_rejected() {
        let parsed = cli(&["-C", "4", "a.json", "b.json"]);
        let err = build_options(&parsed).unwrap_err();
        assert!(err.to_string().contains("context lines must be one of"));
    }

    #[test]
    fn blank_opts_are_rejected() {
        assert!(parse_opts_json("  ").is_err());
        assert!(parse_opts_json("[]").is_err());
    }

    #[test]
    fn yaml_is_detected_from_the_first_file() {
        let parsed = cli(&["old.yml", "new.yml"]);
        let source = InputSource::File(PathBuf::from("old.yml"));
        assert_eq!(detect_format(&parsed, &source), Format::Yaml);
        assert_eq!(detect_format(&parsed, &InputSource::Stdin), Format::Json);
        assert_eq!(detect_format(&cli(&["--yaml"]), &InputSource::Stdin), Format::Yaml);
    }

    #[test]
    fn tree_flags_conflict() {
        let result = Cli::try_parse_from(["tapose", "--tree", "--expand-all", "--collapse-all"]);
        assert!(result.is_err());
        assert!(Cli::try_parse_from(["tapose", "--expand-all", "a.json"]).is_err());
        assert!(Cli::try_parse_from(["tapose", "--tree", "--fmt", "a.json"]).is_err());
    }

    #[test]
    fn help_mentions_the_version() {
        assert!(help_text().contains(VERSION_NUMBER));
    }
}
