mod settings;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use facemood_core::detection::domain::face_annotator::FaceAnnotator;
use facemood_core::detection::infrastructure::credentials::Credentials;
use facemood_core::detection::infrastructure::vision_api_annotator::{
    VisionApiAnnotator, VisionConfig,
};
use facemood_core::pipeline::analyze_image_use_case::{AnalysisSummary, AnalyzeImageUseCase};
use facemood_core::pipeline::pipeline_logger::LogPipelineLogger;
use facemood_core::rendering::domain::overlay_renderer::OverlayRenderer;
use facemood_core::rendering::infrastructure::font_resolver;
use facemood_core::rendering::infrastructure::image_overlay_writer::ImageOverlayWriter;
use facemood_core::reporting::emotion_reporter::EmotionReporter;
use facemood_core::reporting::locale::Locale;
use facemood_core::shared::constants::{DEFAULT_OUTPUT_FILENAME, IMAGE_EXTENSIONS};

use settings::Settings;

/// Detect faces in a photo and report the emotions they show.
#[derive(Parser)]
#[command(name = "facemood")]
struct Cli {
    /// Image to analyze. Opens the webcam preview when omitted.
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// Annotated output image.
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILENAME)]
    output: PathBuf,

    /// Maximum number of faces to detect.
    #[arg(long)]
    max_results: Option<u32>,

    /// Report language: fr or en.
    #[arg(long)]
    lang: Option<Locale>,

    /// TrueType font used for the face labels.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Webcam device index.
    #[arg(long)]
    camera: Option<i32>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;
    let settings = apply_overrides(Settings::load(), &cli);

    // Captured frames only live for the duration of the run.
    let capture_dir = tempfile::Builder::new().prefix("facemood-").tempdir()?;
    let image_path = match cli.path {
        Some(path) => Some(path),
        None => capture(capture_dir.path(), settings.camera_index)?,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Some(summary) =
        analyze(image_path, &cli.output, &settings, vision_annotator, &mut out)?
    {
        log::info!(
            "{} face(s) annotated in {}",
            summary.face_count(),
            summary.output_path.display()
        );
    }
    Ok(())
}

/// Runs the analysis on `image_path`, or does nothing when no picture was
/// taken. The annotator is only built once there is an image to send.
fn analyze(
    image_path: Option<PathBuf>,
    output: &Path,
    settings: &Settings,
    build_annotator: impl FnOnce(
        &Settings,
    ) -> Result<Box<dyn FaceAnnotator>, Box<dyn std::error::Error>>,
    out: &mut dyn Write,
) -> Result<Option<AnalysisSummary>, Box<dyn std::error::Error>> {
    let Some(image_path) = image_path else {
        log::info!("No picture taken, nothing to analyze");
        return Ok(None);
    };

    let annotator = build_annotator(settings)?;
    let font = font_resolver::resolve(settings.font.as_deref())?;
    let overlay_writer = ImageOverlayWriter::new(OverlayRenderer::default(), font);

    let mut use_case = AnalyzeImageUseCase::new(
        annotator,
        Box::new(overlay_writer),
        EmotionReporter::new(settings.locale),
        Box::new(LogPipelineLogger::new()),
        settings.max_results,
    );
    let summary = use_case.execute(&image_path, output, out)?;
    out.flush()?;
    Ok(Some(summary))
}

fn vision_annotator(
    settings: &Settings,
) -> Result<Box<dyn FaceAnnotator>, Box<dyn std::error::Error>> {
    let annotator = VisionApiAnnotator::new(
        VisionConfig::new(Credentials::resolve()?)
            .with_endpoint(settings.endpoint.as_str())
            .with_timeout(settings.timeout()),
    )?;
    Ok(Box::new(annotator))
}

#[cfg(feature = "camera")]
fn capture(
    store_dir: &Path,
    camera_index: i32,
) -> Result<Option<PathBuf>, Box<dyn std::error::Error>> {
    use facemood_core::capture::infrastructure::opencv_camera::OpencvCamera;
    use facemood_core::pipeline::capture_image_use_case::CaptureImageUseCase;

    let camera = OpencvCamera::new(camera_index)?;
    CaptureImageUseCase::new(Box::new(camera)).execute(store_dir)
}

#[cfg(not(feature = "camera"))]
fn capture(
    _store_dir: &Path,
    _camera_index: i32,
) -> Result<Option<PathBuf>, Box<dyn std::error::Error>> {
    use facemood_core::capture::domain::capture_error::CaptureError;

    Err(CaptureError::Unsupported.into())
}

/// Command-line flags win over the settings file.
fn apply_overrides(mut settings: Settings, cli: &Cli) -> Settings {
    if let Some(max_results) = cli.max_results {
        settings.max_results = max_results;
    }
    if let Some(locale) = cli.lang {
        settings.locale = locale;
    }
    if let Some(font) = &cli.font {
        settings.font = Some(font.clone());
    }
    if let Some(index) = cli.camera {
        settings.camera_index = index;
    }
    settings
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = &cli.path {
        if !path.exists() {
            return Err(format!("Input file not found: {}", path.display()).into());
        }
    }
    if cli.max_results == Some(0) {
        return Err("Max results must be at least 1".into());
    }
    if !is_image(&cli.output) {
        return Err(format!(
            "Output must be an image file ({}), got {}",
            IMAGE_EXTENSIONS.join(", "),
            cli.output.display()
        )
        .into());
    }
    if let Some(font) = &cli.font {
        if !font.exists() {
            return Err(format!("Font file not found: {}", font.display()).into());
        }
    }
    if cli.camera.is_some_and(|index| index < 0) {
        return Err("Camera index must not be negative".into());
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
