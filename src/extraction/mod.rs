//! Thumbnail extraction from pin PDFs.
//!
//! The extraction itself is one deterministic pass over the collection
//! (`run_extraction`). The server never runs it in-process: it invokes the
//! companion `pinboard-extract` binary as a subprocess (`run_job`) so a
//! crash inside the PDF library cannot take the server down with it.

mod job;
mod pdf;
mod trigger;

pub use job::{run_extraction, ExtractionContext, ExtractionSummary};
pub use pdf::{ExtractionError, PdfiumSource, ThumbnailSource};
pub use trigger::run_job;
