use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use panres_json::app::{Converter, LogSink, RunOptions};
use panres_json::config::{ConfigLoader, ConfigOverrides};
use panres_json::download::OntologyHttpClient;
use panres_json::error::PanresError;
use panres_json::output::{JsonOutput, OutputMode, TextOutput};

#[derive(Parser)]
#[command(name = "panres-json")]
#[command(about = "Convert the PanRes OWL ontology into a JSON document for static web apps")]
#[command(version, author)]
struct Cli {
    /// Print the run summary as JSON on stdout
    #[arg(long)]
    non_interactive: bool,

    /// JSON config file (defaults to ./panres-json.json when present)
    #[arg(long)]
    config: Option<String>,

    /// Use the ontology file on disk instead of downloading it
    #[arg(long)]
    offline: bool,

    #[arg(long)]
    url: Option<String>,

    #[arg(long)]
    owl: Option<Utf8PathBuf>,

    #[arg(long, short)]
    output: Option<Utf8PathBuf>,

    #[arg(long)]
    genes: Option<Utf8PathBuf>,

    #[arg(long)]
    proteins: Option<Utf8PathBuf>,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(error) = report.downcast_ref::<PanresError>() {
            return ExitCode::from(error.exit_code());
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_mode = if cli.non_interactive {
        OutputMode::NonInteractive
    } else {
        OutputMode::Interactive
    };

    let config = ConfigLoader::resolve(cli.config.as_deref())?.with_overrides(ConfigOverrides {
        ontology_url: cli.url,
        owl_file: cli.owl,
        json_output: cli.output,
        genes_fasta: cli.genes,
        proteins_fasta: cli.proteins,
    });

    let client = OntologyHttpClient::new()?;
    let converter = Converter::new(config, client);
    let options = RunOptions {
        offline: cli.offline,
    };

    match output_mode {
        OutputMode::NonInteractive => {
            let stats = converter.run(options, &JsonOutput)?;
            JsonOutput::print_stats(&stats).into_diagnostic()?;
        }
        OutputMode::Interactive => {
            let stats = converter.run(options, &LogSink)?;
            TextOutput::print_stats(&stats).into_diagnostic()?;
        }
    }
    Ok(())
}
