use clap::{ArgGroup, Parser};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tasksheet::prelude::*;
use tasksheet::render::layout::sheet_name;

/// Renders a task sequence definition into a reviewable spreadsheet
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(group(ArgGroup::new("input").required(true).args(["xml", "file", "package"])))]
struct Cli {
    /// Raw task sequence XML
    #[arg(long)]
    xml: Option<String>,
    /// Path to a task sequence XML file
    #[arg(short, long)]
    file: Option<PathBuf>,
    /// Path to an exported task sequence package (JSON with Name, LastRefreshTime, Sequence)
    #[arg(short, long)]
    package: Option<PathBuf>,

    /// Output workbook path (.xlsx or .xlsm)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Display name used in the title (ignored for packages)
    #[arg(short, long)]
    name: Option<String>,
    /// Keep the generated document for review after export
    #[arg(long)]
    show: bool,
    /// Add expand/collapse buttons per group (requires .xlsm output)
    #[arg(long)]
    expand_controls: bool,
    /// Outline group rows with native row grouping
    #[arg(long)]
    row_grouping: bool,
    /// Leave out the "Continue on Error" column
    #[arg(long)]
    no_continue_column: bool,
    /// Compiled vbaProject.bin; required for .xlsm output and --expand-controls
    #[arg(long)]
    vba_project: Option<PathBuf>,
    /// Suppress progress and informational output
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    let default_filter = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    run(cli);
}

fn run(cli: Cli) {
    let start = Instant::now();

    let source = if let Some(xml) = cli.xml {
        InputSource::Xml(xml)
    } else if let Some(path) = cli.file {
        InputSource::File(path)
    } else if let Some(path) = cli.package {
        let package = TaskSequencePackage::from_file(&path).unwrap_or_else(|e| {
            exit_with_error(&format!(
                "Failed to load package '{}': {}",
                path.display(),
                e
            ))
        });
        InputSource::Package(package)
    } else {
        exit_with_error("One of --xml, --file or --package is required.");
    };

    let mut engine = XlsxEngine::new();
    if let Some(project) = &cli.vba_project {
        engine = engine.with_vba_project(project);
    }

    let mut builder = Exporter::builder(engine)
        .show(cli.show)
        .expand_controls(cli.expand_controls)
        .row_grouping(cli.row_grouping)
        .hide_progress(cli.quiet)
        .continue_on_error_column(!cli.no_continue_column);
    if let Some(output) = &cli.output {
        builder = builder.export_path(output);
    }
    if let Some(name) = &cli.name {
        builder = builder.display_name(name);
    }
    let exporter = builder.build();

    let outcome = exporter
        .export(source)
        .unwrap_or_else(|e| exit_with_error(&format!("Export failed: {}", e)));

    let review_path = match (outcome.document, &outcome.saved_to) {
        (Some(mut document), None) => {
            let format = if cli.expand_controls {
                FileFormat::Xlsm
            } else {
                FileFormat::Xlsx
            };
            let path = scratch_path(&outcome.title, format);
            document
                .save(&path, format)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to save document: {}", e)));
            document.close();
            Some(path)
        }
        (Some(mut document), Some(saved)) => {
            document.close();
            Some(saved.clone())
        }
        (None, _) => None,
    };

    println!("\nExport Finished!");
    println!("  -> Title: {}", outcome.title);
    println!(
        "  -> Rows: {} ({} groups, {} steps, {} disabled)",
        outcome.summary.groups + outcome.summary.steps,
        outcome.summary.groups,
        outcome.summary.steps,
        outcome.summary.disabled
    );
    if let Some(saved) = &outcome.saved_to {
        println!("  -> Saved to: {}", saved.display());
    }
    if let Some(path) = review_path {
        println!("  -> Open for review: {}", path.display());
    }
    for warning in &outcome.warnings {
        println!("  -> Warning: {}", warning);
    }
    println!("Total Execution: {:?}", start.elapsed());
}

/// Where a document without an export path is kept for the user.
fn scratch_path(title: &str, format: FileFormat) -> PathBuf {
    let stem: String = sheet_name(title)
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    Path::new(&std::env::temp_dir()).join(format!("{}.{}", stem, format.extension()))
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
