//! Thumbnail extraction job.
//!
//! Standalone batch process: reads the pin collection, extracts the first
//! embedded image from each pin's PDF where the thumbnail is still missing,
//! and rewrites the collection. Run it from the site root (the server
//! invokes it that way) so the stored root-relative paths resolve.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pinboard_server::extraction::{run_extraction, ExtractionContext, PdfiumSource};
use pinboard_server::pins::PinStore;

/// Extract missing pin thumbnails from their PDFs.
#[derive(Parser)]
struct Args {
    /// Path to the pin collection file.
    #[arg(long, default_value = "data/pins.json")]
    pins_file: PathBuf,

    /// Directory that root-relative pin paths resolve against.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Root-relative directory to write extracted images into.
    #[arg(long, default_value = "assets/images")]
    images_dir: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Extraction job failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let store = PinStore::new(&args.pins_file);
    let mut pins = store.load().await?;
    tracing::info!(
        pins = pins.len(),
        file = %args.pins_file.display(),
        "Loaded pin collection"
    );

    let source = PdfiumSource::new()?;
    let ctx = ExtractionContext {
        root: args.root,
        images_dir: args.images_dir,
    };

    let summary = run_extraction(&mut pins, &source, &ctx);

    // The collection is rewritten even when nothing changed, keeping the
    // same read-modify-write discipline as the server.
    store.save(&pins).await?;

    tracing::info!(
        extracted = summary.extracted,
        skipped = summary.skipped,
        failed = summary.failed,
        "Image extraction completed"
    );

    Ok(())
}
