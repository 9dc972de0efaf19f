use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::detection::domain::face_annotator::FaceAnnotator;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::rendering::domain::overlay_writer::OverlayWriter;
use crate::reporting::emotion_reporter::EmotionReporter;
use crate::shared::face::FaceRecord;

/// Outcome of one [`AnalyzeImageUseCase::execute`] run.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisSummary {
    pub faces: Vec<FaceRecord>,
    pub output_path: PathBuf,
}

impl AnalysisSummary {
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

/// Single-image pipeline: read, annotate once, print the count, write the
/// overlay, then print the per-face report.
pub struct AnalyzeImageUseCase {
    annotator: Box<dyn FaceAnnotator>,
    overlay_writer: Box<dyn OverlayWriter>,
    reporter: EmotionReporter,
    logger: Box<dyn PipelineLogger>,
    max_results: u32,
}

impl AnalyzeImageUseCase {
    pub fn new(
        annotator: Box<dyn FaceAnnotator>,
        overlay_writer: Box<dyn OverlayWriter>,
        reporter: EmotionReporter,
        logger: Box<dyn PipelineLogger>,
        max_results: u32,
    ) -> Self {
        Self {
            annotator,
            overlay_writer,
            reporter,
            logger,
            max_results,
        }
    }

    /// Analyses `image_path`, writes the overlay to `output_path` and the
    /// console report to `out`.
    pub fn execute(
        &mut self,
        image_path: &Path,
        output_path: &Path,
        out: &mut dyn Write,
    ) -> Result<AnalysisSummary, Box<dyn std::error::Error>> {
        let image = std::fs::read(image_path)
            .map_err(|e| format!("failed to read image {}: {e}", image_path.display()))?;

        let started = Instant::now();
        let faces = self.annotator.annotate(&image, self.max_results)?;
        self.logger.timing("annotate", elapsed_ms(started));

        self.reporter.write_count(out, faces.len())?;

        let started = Instant::now();
        self.overlay_writer.write(&image, &faces, output_path)?;
        self.logger.timing("render", elapsed_ms(started));
        self.logger
            .info(&format!("Overlay written to {}", output_path.display()));

        let started = Instant::now();
        self.reporter.write_faces(out, &faces)?;
        self.logger.timing("report", elapsed_ms(started));

        self.logger.summary();
        Ok(AnalysisSummary {
            faces,
            output_path: output_path.to_path_buf(),
        })
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
