use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::render::GridConfig;
use crate::services::{PngSink, RenderService};
use crate::tui;
use crate::types::{WeekSummary, WeekgridError};

/// Render one 24h x 7-day heat-map PNG per calendar week
#[derive(Parser)]
#[command(name = "weekgrid")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render week images from schedule files
    Render(RenderArgs),

    /// List the week blocks a schedule would produce
    Weeks {
        /// Schedule files or glob patterns
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct RenderArgs {
    /// Schedule files or glob patterns
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Directory for the PNG files
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Prepended to every output file name
    #[arg(long, default_value = "")]
    prefix: String,

    /// Image width in pixels
    #[arg(long, default_value_t = GridConfig::default().width)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = GridConfig::default().height)]
    height: u32,

    /// Grid line width in pixels
    #[arg(long, default_value_t = GridConfig::default().border_width)]
    border: u32,

    /// Show the final week in the terminal after saving it
    #[arg(long)]
    preview: bool,
}

impl RenderArgs {
    fn grid_config(&self) -> GridConfig {
        GridConfig {
            width: self.width,
            height: self.height,
            border_width: self.border,
        }
    }
}

impl Cli {
    /// Initialize env_logger: warn by default, raised by -v flags
    pub fn init_logging(&self) {
        let default_level = match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .format_timestamp(None)
            .init();
    }

    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Commands::Render(args) => run_render(args),
            Commands::Weeks { inputs, json } => run_weeks(&inputs, json),
        }
    }
}

fn run_render(args: RenderArgs) -> anyhow::Result<()> {
    let files = expand_inputs(&args.inputs)?;
    let service = RenderService::new(args.grid_config(), args.prefix.as_str())?;

    for file in &files {
        let out_dir = output_dir_for(&args.out_dir, file, files.len() > 1);
        let mut sink = PngSink::new(&out_dir);
        if args.preview {
            sink = sink.with_final_week_hook(|image, path| {
                let title = format!("{} (week of {})", path.display(), image.week_start);
                tui::show_in_terminal(image.canvas.image(), &title)
            });
        }

        let summary = service
            .render_file(file, &mut sink)
            .with_context(|| format!("failed to render {}", file.display()))?;

        println!(
            "{}: {} days -> {} week image(s) in {}",
            file.display(),
            summary.days,
            summary.weeks,
            out_dir.display()
        );
    }

    Ok(())
}

fn run_weeks(inputs: &[String], json: bool) -> anyhow::Result<()> {
    let files = expand_inputs(inputs)?;
    let service = RenderService::new(GridConfig::default(), "")?;

    let mut listing: Vec<(String, Vec<WeekSummary>)> = Vec::with_capacity(files.len());
    for file in &files {
        let weeks = service
            .list_weeks(file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        listing.push((file.display().to_string(), weeks));
    }

    if json {
        let value: serde_json::Map<String, serde_json::Value> = listing
            .into_iter()
            .map(|(file, weeks)| serde_json::to_value(weeks).map(|v| (file, v)))
            .collect::<serde_json::Result<_>>()?;
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        for (file, weeks) in listing {
            println!("{}", file);
            for week in weeks {
                println!(
                    "  {:<12} {:<16} {} day(s){}",
                    week.start,
                    format!("{}.png", week.file_stem),
                    week.days.len(),
                    if week.is_final { "  [final]" } else { "" }
                );
            }
        }
    }

    Ok(())
}

/// Resolve file paths and glob patterns, in sorted order without duplicates
fn expand_inputs(inputs: &[String]) -> Result<Vec<PathBuf>, WeekgridError> {
    let mut files = Vec::new();

    for input in inputs {
        let path = Path::new(input);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }

        let mut matches: Vec<PathBuf> = glob::glob(input)
            .map_err(|e| WeekgridError::Config(format!("invalid pattern '{}': {}", input, e)))?
            .filter_map(|entry| entry.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            return Err(WeekgridError::Config(format!(
                "no input files match '{}'",
                input
            )));
        }
        matches.sort();
        files.extend(matches);
    }

    let mut seen = std::collections::HashSet::new();
    files.retain(|f| seen.insert(f.clone()));
    Ok(files)
}

/// Images of several inputs go into one subdirectory per input file
fn output_dir_for(out_dir: &Path, input: &Path, multiple_inputs: bool) -> PathBuf {
    match input.file_stem() {
        Some(stem) if multiple_inputs => out_dir.join(stem),
        _ => out_dir.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, "{}").unwrap();
        path
    }

    // ========== argument parsing tests ==========

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["weekgrid"]).is_err());
    }

    #[test]
    fn test_cli_parse_render_defaults() {
        let cli = Cli::try_parse_from(["weekgrid", "render", "data.json"]).unwrap();
        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.inputs, vec!["data.json".to_string()]);
                assert_eq!(args.out_dir, PathBuf::from("."));
                assert_eq!(args.grid_config(), GridConfig::default());
                assert!(args.prefix.is_empty());
                assert!(!args.preview);
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn test_cli_parse_render_options() {
        let cli = Cli::try_parse_from([
            "weekgrid", "-vv", "render", "a.json", "b.json", "--out-dir", "out", "--width", "1980",
            "--border", "2", "--prefix", "data_vis_", "--preview",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.inputs.len(), 2);
                assert_eq!(args.out_dir, PathBuf::from("out"));
                assert_eq!(
                    args.grid_config(),
                    GridConfig {
                        width: 1980,
                        height: 1080,
                        border_width: 2
                    }
                );
                assert_eq!(args.prefix, "data_vis_");
                assert!(args.preview);
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn test_cli_parse_weeks_json() {
        let cli = Cli::try_parse_from(["weekgrid", "weeks", "data.json", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Weeks { json: true, .. }));
    }

    #[test]
    fn test_cli_render_requires_input() {
        assert!(Cli::try_parse_from(["weekgrid", "render"]).is_err());
    }

    // ========== input expansion tests ==========

    #[test]
    fn test_expand_plain_path() {
        let dir = TempDir::new().unwrap();
        let file = touch(dir.path(), "a.json");
        let files = expand_inputs(&[file.display().to_string()]).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn test_expand_glob_sorted_and_deduplicated() {
        let dir = TempDir::new().unwrap();
        let b = touch(dir.path(), "b.json");
        let a = touch(dir.path(), "a.json");
        touch(dir.path(), "notes.txt");

        let pattern = dir.path().join("*.json").display().to_string();
        let files = expand_inputs(&[pattern, a.display().to_string()]).unwrap();
        assert_eq!(files, vec![a, b]);
    }

    #[test]
    fn test_expand_no_match() {
        let dir = TempDir::new().unwrap();
        let pattern = dir.path().join("*.json").display().to_string();
        let err = expand_inputs(&[pattern]).unwrap_err();
        assert!(matches!(err, WeekgridError::Config(_)));
    }

    // ========== output directory tests ==========

    #[test]
    fn test_output_dir_single_input() {
        let dir = output_dir_for(Path::new("out"), Path::new("data/sleep.json"), false);
        assert_eq!(dir, PathBuf::from("out"));
    }

    #[test]
    fn test_output_dir_multiple_inputs() {
        let dir = output_dir_for(Path::new("out"), Path::new("data/sleep.json"), true);
        assert_eq!(dir, PathBuf::from("out").join("sleep"));
    }

    // ========== end-to-end ==========

    #[test]
    fn test_run_render_writes_images() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("data_vis.json");
        std::fs::write(
            &input,
            r#"{"01 Jan 2024": {"0800": [["1-red","1-blue"]], "1800": [["green"]]}}"#,
        )
        .unwrap();
        let out = dir.path().join("out");

        let cli = Cli::try_parse_from([
            "weekgrid".to_string(),
            "render".to_string(),
            input.display().to_string(),
            "--out-dir".to_string(),
            out.display().to_string(),
        ])
        .unwrap();
        cli.run().unwrap();

        assert!(out.join("01Jan2024.png").exists());
    }

    #[test]
    fn test_run_render_malformed_input_fails() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("bad.json");
        std::fs::write(&input, r#"{"Jan 1st": {"2400": [["red"]]}}"#).unwrap();

        let cli = Cli::try_parse_from([
            "weekgrid".to_string(),
            "render".to_string(),
            input.display().to_string(),
            "--out-dir".to_string(),
            dir.path().join("out").display().to_string(),
        ])
        .unwrap();
        let err = cli.run().unwrap_err();
        assert!(format!("{:#}", err).contains("malformed date"));
    }
}
