//! The extraction pass: one deterministic sweep over the pin collection.
//!
//! Each pin is handled independently; an error while processing one PDF is
//! logged against that pin and the sweep continues.

use std::path::{Path, PathBuf};

use super::pdf::{ExtractionError, ThumbnailSource};
use crate::pins::Pin;

/// Where extracted thumbnails are written
pub struct ExtractionContext {
    /// Directory that root-relative pin paths resolve against
    pub root: PathBuf,
    /// Root-relative directory for extracted images
    pub images_dir: PathBuf,
}

/// Counters for one extraction pass
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    pub extracted: usize,
    pub skipped: usize,
    pub failed: usize,
}

enum PinOutcome {
    Extracted,
    Skipped,
    Failed,
}

/// Sweep the collection and fill in missing thumbnails.
///
/// Pins that already have an image, have no PDF, or whose PDF file is
/// missing are skipped with a log line. The caller persists the updated
/// collection.
pub fn run_extraction(
    pins: &mut [Pin],
    source: &dyn ThumbnailSource,
    ctx: &ExtractionContext,
) -> ExtractionSummary {
    let mut summary = ExtractionSummary::default();

    for pin in pins.iter_mut() {
        match extract_for_pin(pin, source, ctx) {
            PinOutcome::Extracted => summary.extracted += 1,
            PinOutcome::Skipped => summary.skipped += 1,
            PinOutcome::Failed => summary.failed += 1,
        }
    }

    summary
}

fn extract_for_pin(
    pin: &mut Pin,
    source: &dyn ThumbnailSource,
    ctx: &ExtractionContext,
) -> PinOutcome {
    if !pin.image.is_empty() {
        tracing::info!(id = pin.id, "Image already set");
        return PinOutcome::Skipped;
    }

    if pin.pdf.is_empty() {
        tracing::info!(id = pin.id, "PDF not specified");
        return PinOutcome::Skipped;
    }

    let pdf_path = ctx.root.join(&pin.pdf);
    if !pdf_path.is_file() {
        tracing::warn!(id = pin.id, pdf = %pin.pdf, "PDF not found");
        return PinOutcome::Skipped;
    }

    match extract_thumbnail(pin.id, &pdf_path, source, ctx) {
        Ok(Some(relative)) => {
            tracing::info!(id = pin.id, image = %relative, "Extracted thumbnail");
            pin.image = relative;
            PinOutcome::Extracted
        }
        Ok(None) => {
            tracing::info!(id = pin.id, "No images found in PDF");
            PinOutcome::Skipped
        }
        Err(e) => {
            tracing::warn!(id = pin.id, "Error processing PDF: {}", e);
            PinOutcome::Failed
        }
    }
}

/// Pull the first embedded image out of the PDF and write it as
/// `pin_<id>.png` under the images directory (created if absent). Returns
/// the root-relative path to store on the pin.
fn extract_thumbnail(
    id: u64,
    pdf_path: &Path,
    source: &dyn ThumbnailSource,
    ctx: &ExtractionContext,
) -> Result<Option<String>, ExtractionError> {
    let Some(image) = source.first_embedded_image(pdf_path)? else {
        return Ok(None);
    };

    let image_name = format!("pin_{}.png", id);
    let images_path = ctx.root.join(&ctx.images_dir);
    std::fs::create_dir_all(&images_path)?;
    image.save(images_path.join(&image_name))?;

    Ok(Some(format!("{}/{}", ctx.images_dir.display(), image_name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::DynamicImage;
    use tempfile::TempDir;

    /// Canned source standing in for Pdfium
    struct StubSource {
        image: Option<DynamicImage>,
    }

    impl ThumbnailSource for StubSource {
        fn first_embedded_image(
            &self,
            _pdf_path: &Path,
        ) -> Result<Option<DynamicImage>, ExtractionError> {
            Ok(self.image.clone())
        }
    }

    fn stub_with_image() -> StubSource {
        StubSource {
            image: Some(DynamicImage::new_rgba8(2, 2)),
        }
    }

    fn pin(id: u64, image: &str, pdf: &str) -> Pin {
        Pin {
            id,
            title: format!("pin {}", id),
            image: image.to_string(),
            tags: Vec::new(),
            pdf: pdf.to_string(),
            used_materials: Vec::new(),
            difficulty: String::new(),
            creation_date: "2026-08-01".to_string(),
            time: String::new(),
            production_cost: String::new(),
        }
    }

    fn ctx(root: &Path) -> ExtractionContext {
        ExtractionContext {
            root: root.to_path_buf(),
            images_dir: PathBuf::from("assets/images"),
        }
    }

    fn place_pdf(root: &Path, relative: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"%PDF-1.4 fake").unwrap();
    }

    #[test]
    fn leaves_existing_thumbnails_untouched() {
        let dir = TempDir::new().unwrap();
        place_pdf(dir.path(), "assets/pdf/a.pdf");
        let mut pins = vec![pin(1, "assets/images/pin_1.png", "assets/pdf/a.pdf")];

        let summary = run_extraction(&mut pins, &stub_with_image(), &ctx(dir.path()));

        assert_eq!(pins[0].image, "assets/images/pin_1.png");
        assert_eq!(summary.extracted, 0);
        assert_eq!(summary.skipped, 1);
    }

    #[test]
    fn skips_pins_without_a_pdf() {
        let dir = TempDir::new().unwrap();
        let mut pins = vec![pin(1, "", "")];

        let summary = run_extraction(&mut pins, &stub_with_image(), &ctx(dir.path()));

        assert_eq!(pins[0].image, "");
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 0);
    }

    #[test]
    fn skips_pins_whose_pdf_file_is_missing() {
        let dir = TempDir::new().unwrap();
        let mut pins = vec![pin(1, "", "assets/pdf/gone.pdf")];

        let summary = run_extraction(&mut pins, &stub_with_image(), &ctx(dir.path()));

        assert_eq!(pins[0].image, "");
        assert_eq!(summary.skipped, 1);
    }

    #[test]
    fn extracts_and_records_the_thumbnail_path() {
        let dir = TempDir::new().unwrap();
        place_pdf(dir.path(), "assets/pdf/a.pdf");
        let mut pins = vec![pin(3, "", "assets/pdf/a.pdf")];

        let summary = run_extraction(&mut pins, &stub_with_image(), &ctx(dir.path()));

        assert_eq!(pins[0].image, "assets/images/pin_3.png");
        assert!(dir.path().join("assets/images/pin_3.png").is_file());
        assert_eq!(summary.extracted, 1);
    }

    #[test]
    fn pdf_without_images_leaves_the_field_empty() {
        let dir = TempDir::new().unwrap();
        place_pdf(dir.path(), "assets/pdf/a.pdf");
        let mut pins = vec![pin(1, "", "assets/pdf/a.pdf")];

        let summary = run_extraction(&mut pins, &StubSource { image: None }, &ctx(dir.path()));

        assert_eq!(pins[0].image, "");
        assert_eq!(summary.extracted, 0);
        assert_eq!(summary.skipped, 1);
    }

    #[test]
    fn one_failure_does_not_stop_the_pass() {
        struct FailingSource;

        impl ThumbnailSource for FailingSource {
            fn first_embedded_image(
                &self,
                _pdf_path: &Path,
            ) -> Result<Option<DynamicImage>, ExtractionError> {
                Err(ExtractionError::Io(std::io::Error::other("boom")))
            }
        }

        let dir = TempDir::new().unwrap();
        place_pdf(dir.path(), "assets/pdf/a.pdf");
        place_pdf(dir.path(), "assets/pdf/b.pdf");
        let mut pins = vec![
            pin(1, "", "assets/pdf/a.pdf"),
            pin(2, "already.png", "assets/pdf/b.pdf"),
        ];

        let summary = run_extraction(&mut pins, &FailingSource, &ctx(dir.path()));

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(pins[0].image, "");
        assert_eq!(pins[1].image, "already.png");
    }
}
