use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use pdf_duplex::{BackendPreference, Pass, PrintBackend, PrintOptions};
use std::path::PathBuf;

/// Print PDFs front/back with 2 pages per landscape sheet
#[derive(Parser)]
#[command(
    name = "pdfd",
    version,
    after_help = "Run with --list-printers to find your exact printer name."
)]
struct Cli {
    /// Directory containing PDF files
    #[arg(required_unless_present = "list_printers")]
    directory: Option<PathBuf>,

    /// Side to print
    #[arg(required_unless_present = "list_printers", value_enum)]
    side: Option<PassArg>,

    /// Printer name (overrides the config file)
    #[arg(long)]
    printer: Option<String>,

    /// JSON options file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print backend (overrides the config file)
    #[arg(long, value_enum)]
    backend: Option<BackendArg>,

    /// Show the page plan for every file, don't print
    #[arg(long)]
    dry_run: bool,

    /// List all available printers and exit
    #[arg(long)]
    list_printers: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum PassArg {
    Front,
    Back,
}

#[derive(Clone, Copy, ValueEnum)]
enum BackendArg {
    Auto,
    Sumatra,
    System,
}

impl From<PassArg> for Pass {
    fn from(arg: PassArg) -> Self {
        match arg {
            PassArg::Front => Self::Front,
            PassArg::Back => Self::Back,
        }
    }
}

impl From<BackendArg> for BackendPreference {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Auto => Self::Auto,
            BackendArg::Sumatra => Self::Sumatra,
            BackendArg::System => Self::System,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if cli.list_printers {
        let printers = pdf_duplex::list_printers()
            .await
            .context("Could not list printers")?;
        println!("Available printers:");
        for printer in printers {
            println!("  - {}", printer);
        }
        return Ok(());
    }

    let (Some(directory), Some(side)) = (cli.directory, cli.side) else {
        bail!("A directory and a side are required");
    };
    let pass: Pass = side.into();

    let mut options = match &cli.config {
        Some(path) => PrintOptions::load(path)
            .await
            .with_context(|| format!("Could not load config {}", path.display()))?,
        None => PrintOptions::default(),
    };
    if let Some(printer) = cli.printer {
        options.printer = printer;
    }
    if let Some(backend) = cli.backend {
        options.backend = backend.into();
    }
    options.validate()?;
    log::debug!("Print options: {:?}", options);

    let documents = pdf_duplex::discover_documents(&directory)?;
    if documents.is_empty() {
        println!("No PDF files found in '{}'.", directory.display());
        return Ok(());
    }

    println!(
        "Found {} PDF file(s) in '{}'",
        documents.len(),
        directory.display()
    );
    println!("Printer  : {}", options.printer);
    println!("Side     : {}", pass);
    println!("Mode     : Black & White, 2 PDF pages per landscape sheet");

    if cli.dry_run {
        return dry_run(&documents, pass).await;
    }

    let backend = PrintBackend::probe(&options)?;
    println!("Backend  : {}", backend);

    let report = pdf_duplex::run_documents(&documents, pass, &options, &backend).await?;

    println!();
    println!(
        "Printed {} file(s), skipped {}, failed {}",
        report.printed(),
        report.skipped(),
        report.failed().len()
    );
    for failure in report.failed() {
        if let Err(e) = &failure.result {
            println!("  {}: {}", failure.path.display(), e);
        }
    }

    if !report.is_success() {
        bail!("{} file(s) could not be printed", report.failed().len());
    }
    println!("All done!");
    Ok(())
}

async fn dry_run(documents: &[PathBuf], pass: Pass) -> Result<()> {
    for path in documents {
        match pdf_duplex::plan_document(path, pass).await {
            Ok(plan) => {
                let stats = pdf_duplex::statistics_for_plan(&plan);
                println!("{}:", path.display());
                println!(
                    "  Source pages: {}  |  Physical sheets: {}",
                    stats.source_pages, stats.physical_sheets
                );
                println!("  Pages selected: {:?}", stats.selected_pages);
                println!("  Output sheets: {}", stats.output_sheets);
                println!("  Blank sheets added: {}", stats.blank_sheets_added);
            }
            Err(e) => println!("{}: {}", path.display(), e),
        }
    }
    Ok(())
}
