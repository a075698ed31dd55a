//! PDF access for thumbnail extraction.
//!
//! Pinboard needs exactly one thing from a PDF: the first embedded image,
//! in page order. `ThumbnailSource` is the seam; the production
//! implementation walks page objects through Pdfium.

use std::path::Path;

use image::DynamicImage;
use pdfium_render::prelude::{Pdfium, PdfiumError, PdfPageObjectsCommon};
use thiserror::Error;

/// Extraction errors
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfiumError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Source of thumbnail images for pin PDFs
pub trait ThumbnailSource {
    /// First embedded image of the document in page order, if any.
    ///
    /// Scanning stops at the first page that contains an image; later pages
    /// are never touched.
    fn first_embedded_image(
        &self,
        pdf_path: &Path,
    ) -> Result<Option<DynamicImage>, ExtractionError>;
}

/// Pdfium-backed implementation
pub struct PdfiumSource {
    pdfium: Pdfium,
}

impl PdfiumSource {
    /// Bind to a Pdfium library next to the executable, falling back to the
    /// system library.
    pub fn new() -> Result<Self, ExtractionError> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())?;
        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }
}

impl ThumbnailSource for PdfiumSource {
    fn first_embedded_image(
        &self,
        pdf_path: &Path,
    ) -> Result<Option<DynamicImage>, ExtractionError> {
        let path = pdf_path.to_path_buf();
        let document = self.pdfium.load_pdf_from_file(&path, None)?;

        for page in document.pages().iter() {
            for object in page.objects().iter() {
                if let Some(image) = object.as_image_object() {
                    return Ok(Some(image.get_raw_image()?));
                }
            }
        }

        Ok(None)
    }
}
