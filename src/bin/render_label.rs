//! Render a saved DOX extraction result as a ZPL label, optionally fetching
//! the PDF from Labelary. Handy for adjusting the layout without submitting
//! new documents.

use std::path::PathBuf;

use clap::Parser;
use po_label_print::{
    models::extraction::ExtractionResult,
    services::{
        label::render_label,
        labelary::{LabelSpec, LabelaryClient},
    },
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "render-label", version, about)]
struct Cli {
    /// Extraction result JSON as returned by the DOX jobs endpoint
    result: PathBuf,

    /// QR code payload
    #[arg(long, env = "QR_DATA", default_value = "")]
    qr_data: String,

    /// Also render the label to this PDF file
    #[arg(long)]
    pdf: Option<PathBuf>,

    #[arg(long, env = "LABELARY_URL", default_value = "http://api.labelary.com")]
    labelary_url: String,

    /// Printer density in dots per millimetre
    #[arg(long, default_value_t = 8)]
    dpmm: u32,

    /// Label width in inches
    #[arg(long, default_value_t = 4.0)]
    width: f64,

    /// Label height in inches
    #[arg(long, default_value_t = 6.0)]
    height: f64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .with_writer(std::io::stderr)
        .init();

    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let raw = tokio::fs::read_to_string(&cli.result).await?;
    let result: ExtractionResult = serde_json::from_str(&raw)?;

    let label = render_label(&result, &cli.qr_data);
    println!("{}", label.to_zpl());

    if let Some(pdf) = cli.pdf {
        let client = LabelaryClient::new(reqwest::Client::new(), &cli.labelary_url);
        let spec = LabelSpec {
            dpmm: cli.dpmm,
            width: cli.width,
            height: cli.height,
        };
        client.render_to_file(&label, spec, &pdf).await?;
    }

    Ok(())
}
