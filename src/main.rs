use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use sx_codemod::discovery::find_source_files;
use sx_codemod::options::TransformOptions;
use sx_codemod::runner::run;

/// Moves styled-system props on component library elements into a single `sx` prop.
#[derive(Debug, Parser)]
#[command(name = "sx-codemod", version)]
struct Cli {
    /// Files or directories to migrate
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Report what would change without writing any file
    #[arg(long)]
    dry_run: bool,

    /// JSON file with transform options
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the batch report as JSON on stdout
    #[arg(long)]
    json: bool,

    /// More logging; repeat for trace output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = match &cli.config {
        Some(path) => match TransformOptions::from_file(path) {
            Ok(options) => options,
            Err(e) => {
                eprintln!("[sx-codemod] {}", e);
                return ExitCode::from(2);
            }
        },
        None => TransformOptions::default(),
    };

    let files = find_source_files(&cli.paths);
    if files.is_empty() {
        eprintln!("[sx-codemod] No source files found");
        return ExitCode::SUCCESS;
    }

    let report = run(&files, &options, cli.dry_run);

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("[sx-codemod] Failed to serialize report: {}", e);
                return ExitCode::from(2);
            }
        }
    } else {
        for file in &report.files {
            for diagnostic in &file.diagnostics {
                println!("{}", diagnostic);
            }
        }
        for file in report.failed_files() {
            println!("{}: {}", file.path, file.error.as_deref().unwrap_or("failed"));
        }
        println!(
            "{} file(s) scanned, {} changed{}, {} element(s) migrated, {} diagnostic(s)",
            report.files.len(),
            report.changed_files(),
            if cli.dry_run { " (dry run)" } else { "" },
            report.migrated_elements(),
            report.diagnostic_count()
        );
    }

    if report.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
