//! Run command - fetch, convert and upload one annotation.

use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info, warn};

use payable_core::{DocumentMapper, InvoiceParser, XmlSerializer};

use super::load_config;
use crate::transport::Transport;

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Annotation to process (overrides DOCUMENT_ID)
    #[arg(short, long)]
    document_id: Option<String>,

    /// Print the XML instead of uploading it
    #[arg(long)]
    dry_run: bool,
}

pub async fn run(args: RunArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let document_id = match args.document_id.as_deref() {
        Some(id) => id,
        None => config.require_document_id()?,
    };

    for issue in config.placeholder_issues() {
        warn!("{}", issue);
    }

    info!("Processing annotation {}", document_id);

    let transport = Transport::new(&config)?;
    let export = transport.fetch_export(document_id).await?;
    debug!("Fetched export with {} results", export.results.len());

    let record = DocumentMapper::new().parse(&export)?;
    debug!("Parsed document: {:?}", record);

    for issue in record.validate() {
        warn!("Validation: {}", issue);
    }

    let xml = XmlSerializer::new(config.xml.encoding.as_str()).render(&record.to_xml_tree())?;
    debug!("XML data: {}", xml);

    if args.dry_run {
        println!("{}", xml);
        return Ok(());
    }

    let response = transport.upload(document_id, &xml).await?;
    debug!("Upload response: {}", response);

    println!(
        "{} Uploaded annotation {} to {}",
        style("✓").green(),
        document_id,
        config.target.endpoint
    );

    debug!("Total processing time: {:?}", start.elapsed());
    info!("Done");

    Ok(())
}
