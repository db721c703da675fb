//! CLI entry point. The only place that turns pipeline errors into
//! user-facing messages and a non-zero exit status; the core itself never
//! prints to the console.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;

use vscode_theme_parser::services::acquire::Acquirer;
use vscode_theme_parser::services::events::ProgressSink;
use vscode_theme_parser::services::render;
use vscode_theme_parser::types::AcquireResult;

#[derive(Parser)]
#[command(
    name = "vscode-theme-parser",
    version,
    about = "Generate HTML reports from VS Code theme files"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a VS Code theme file and generate an HTML report
    Parse {
        /// The input file path (.json or .vsix)
        #[arg(short, long)]
        input: PathBuf,

        /// The output HTML file path
        #[arg(short, long)]
        output: PathBuf,

        /// Handlebars template overriding the built-in report
        #[arg(long)]
        template: Option<PathBuf>,

        /// Show progress details and info-level diagnostics
        #[arg(short, long)]
        verbose: bool,
    },
    /// Display information about this tool
    About,
}

/// Progress sink that prints pipeline steps to the console.
struct ConsoleProgress {
    verbose: bool,
}

impl ProgressSink for ConsoleProgress {
    fn step(&self, message: &str) {
        println!("{} {message}", "›".cyan());
    }

    fn detail(&self, message: &str) {
        if self.verbose {
            println!("  {}", message.dimmed());
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            input,
            output,
            template,
            verbose,
        } => {
            init_logger(verbose);
            match run_parse(&input, &output, template.as_deref(), verbose) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("{} Failed to process theme: {e}", "ERROR:".red().bold());
                    ExitCode::FAILURE
                }
            }
        }
        Commands::About => {
            print_about();
            ExitCode::SUCCESS
        }
    }
}

fn init_logger(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn run_parse(
    input: &Path,
    output: &Path,
    template: Option<&Path>,
    verbose: bool,
) -> AcquireResult<()> {
    println!(
        "\n{}{}",
        "VSCode Theme Parser".green().bold(),
        " - Generating report...".dimmed()
    );
    println!("{}", "─".repeat(50).dimmed());

    let template_source = match template {
        Some(path) => fs::read_to_string(path)?,
        None => render::DEFAULT_TEMPLATE.to_string(),
    };

    let sink = ConsoleProgress { verbose };
    let result = Acquirer::new().acquire(input, &sink)?;

    sink.step("Generating HTML report...");
    let html = render::render_report(&template_source, &result)?;
    fs::write(output, html)?;

    println!("{}", "─".repeat(50).dimmed());
    println!("{}", "Success!".green().bold());
    println!(
        "{}",
        format!("Report generated at: {}", output.display()).green()
    );
    println!(
        "\n{}",
        "Open the HTML file in your browser to view the report.".yellow()
    );
    Ok(())
}

fn print_about() {
    println!();
    println!("{}", "VSCODE THEME PARSER".green().bold());
    println!("{}", "Generate HTML reports from VS Code theme files".dimmed());
    println!();
    println!("  {}  Dave Williams", "Author:".cyan());
    println!("  {}   dave@dave.io", "Email:".cyan());
    println!("  {} https://dave.io", "Website:".cyan());
    println!("  {}  https://github.com/daveio", "GitHub:".cyan());
    println!();
}
