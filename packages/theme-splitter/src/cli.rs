//! Command-line interface for the splitter.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{
    ThemeOptions, TokenOptions, DEFAULT_COMPONENT_PREFIX, DEFAULT_MAX_SIZE, DEFAULT_THEME_EXTENSION,
    DEFAULT_THEME_OUTPUT, DEFAULT_THEME_SOURCE, DEFAULT_TOKENS_OUTPUT, DEFAULT_TOKENS_SOURCE,
};
use crate::error::Result;
use crate::output::{SplitReport, WrittenFile};
use crate::theme::split_theme;
use crate::tokens::split_tokens;

/// Theme Splitter - Split oversized theme and token sources into small files.
#[derive(Parser)]
#[command(name = "theme-splitter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a theme definition into one module per section and component.
    Theme {
        /// Theme source file
        #[arg(short, long, default_value = DEFAULT_THEME_SOURCE)]
        source: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = DEFAULT_THEME_OUTPUT)]
        output: PathBuf,

        /// Size in bytes above which a component module is reported
        #[arg(short, long, default_value_t = DEFAULT_MAX_SIZE)]
        max_size: usize,

        /// Identifier prefix of component entries
        #[arg(long, default_value = DEFAULT_COMPONENT_PREFIX)]
        component_prefix: String,

        /// Extension of the generated modules
        #[arg(long, default_value = DEFAULT_THEME_EXTENSION)]
        extension: String,
    },

    /// Split a JSON token dictionary into size-bounded category files.
    Tokens {
        /// Token source file
        #[arg(short, long, default_value = DEFAULT_TOKENS_SOURCE)]
        source: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = DEFAULT_TOKENS_OUTPUT)]
        output: PathBuf,

        /// Maximum size in bytes of one output file
        #[arg(short, long, default_value_t = DEFAULT_MAX_SIZE)]
        max_size: usize,

        /// JSON or YAML file replacing the built-in category table
        #[arg(short, long)]
        categories: Option<PathBuf>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Theme {
            source,
            output,
            max_size,
            component_prefix,
            extension,
        } => {
            let options = ThemeOptions::new(source, output)
                .with_max_size(max_size)
                .with_component_prefix(component_prefix)
                .with_extension(extension);
            theme_command(&options)
        }
        Commands::Tokens {
            source,
            output,
            max_size,
            categories,
        } => {
            let mut options = TokenOptions::new(source, output).with_max_size(max_size);
            if let Some(path) = categories {
                options = options.with_categories(path);
            }
            tokens_command(&options)
        }
    }
}

/// Create the spinner shown while files are written.
fn create_spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Format one report line for a written file.
fn written_line(file: &WrittenFile) -> String {
    let details = match file.entries {
        Some(keys) => format!("({} bytes, {keys} keys)", file.bytes),
        None => format!("({} bytes)", file.bytes),
    };
    format!(
        "  {} {} {}",
        style("✓").green(),
        file.relative_path.display(),
        style(details).dim()
    )
}

/// Print one written file to stdout above the spinner.
///
/// The spinner is hidden when stdout is not a terminal; the line is printed
/// either way.
fn report_written(pb: &ProgressBar, file: &WrittenFile) {
    pb.suspend(|| println!("{}", written_line(file)));
}

/// Print the warning summary and the final banner.
fn finish(report: &SplitReport, banner: &str) {
    if !report.warnings.is_empty() {
        println!();
        println!(
            "  Warnings: {}",
            style(report.warnings.len()).yellow().bold()
        );
        for warning in &report.warnings {
            println!("    {}", style(warning).yellow());
        }
    }

    println!();
    println!("{}", style(banner).green().bold());
}

/// Execute the theme command.
fn theme_command(options: &ThemeOptions) -> Result<()> {
    println!(
        "{} {} into {}",
        style("Splitting").bold(),
        style(options.source.display()).cyan(),
        style(options.output_dir.display()).green()
    );
    println!();

    let pb = create_spinner("Writing theme modules...");
    let report = match split_theme(options, |file| report_written(&pb, file)) {
        Ok(report) => report,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };
    pb.finish_and_clear();

    finish(&report, "Theme split successfully");
    Ok(())
}

/// Execute the tokens command.
fn tokens_command(options: &TokenOptions) -> Result<()> {
    println!(
        "{} {} into {}",
        style("Splitting").bold(),
        style(options.source.display()).cyan(),
        style(options.output_dir.display()).green()
    );
    println!();

    let pb = create_spinner("Writing token files...");
    let report = match split_tokens(options, |file| report_written(&pb, file)) {
        Ok(report) => report,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };
    pb.finish_and_clear();

    finish(&report, "Tokens split successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_theme_defaults() {
        let cli = Cli::parse_from(["theme-splitter", "theme"]);

        let Commands::Theme {
            source,
            output,
            max_size,
            component_prefix,
            extension,
        } = cli.command
        else {
            panic!("expected theme command");
        };
        assert_eq!(source, PathBuf::from("source/base/baseTheme.ts"));
        assert_eq!(output, PathBuf::from("baseTheme"));
        assert_eq!(max_size, 10240);
        assert_eq!(component_prefix, "Mui");
        assert_eq!(extension, "ts");
    }

    #[test]
    fn test_cli_parse_tokens_with_options() {
        let cli = Cli::parse_from([
            "theme-splitter",
            "tokens",
            "--source",
            "in/Tokens.json",
            "--output",
            "out",
            "--max-size",
            "4096",
            "--categories",
            "categories.yaml",
        ]);

        let Commands::Tokens {
            source,
            output,
            max_size,
            categories,
        } = cli.command
        else {
            panic!("expected tokens command");
        };
        assert_eq!(source, PathBuf::from("in/Tokens.json"));
        assert_eq!(output, PathBuf::from("out"));
        assert_eq!(max_size, 4096);
        assert_eq!(categories, Some(PathBuf::from("categories.yaml")));
    }

    #[test]
    fn test_cli_rejects_non_numeric_max_size() {
        let result = Cli::try_parse_from(["theme-splitter", "tokens", "--max-size", "big"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_written_line_mentions_size_and_keys() {
        let line = written_line(&WrittenFile {
            relative_path: PathBuf::from("Palette.json"),
            bytes: 120,
            entries: Some(3),
        });
        assert!(line.contains("Palette.json"));
        assert!(line.contains("120 bytes, 3 keys"));
    }
}
