//! Convert command - render a saved export file offline.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use payable_core::{AnnotationExport, DocumentMapper, InvoiceParser, InvoiceRecord, XmlSerializer};

use super::load_config;

/// Arguments for the convert command.
#[derive(Args)]
pub struct ConvertArgs {
    /// Export JSON file as returned by the annotations export endpoint
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "xml")]
    format: OutputFormat,

    /// Report validation issues on stderr
    #[arg(long)]
    validate: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Payable invoice XML
    Xml,
    /// Extracted invoice record as JSON
    Json,
}

pub fn run(args: ConvertArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Converting export: {}", args.input.display());

    let export = AnnotationExport::from_json(&fs::read_to_string(&args.input)?)?;
    let record = DocumentMapper::new().parse(&export)?;

    if args.validate {
        let issues = record.validate();
        if !issues.is_empty() {
            eprintln!("{}", style("Validation issues:").yellow());
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
        }
    }

    let output = format_record(&record, args.format, &config.xml.encoding)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn format_record(
    record: &InvoiceRecord,
    format: OutputFormat,
    encoding: &str,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Xml => Ok(XmlSerializer::new(encoding).render(&record.to_xml_tree())?),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
    }
}
