use std::path::Path;

use ab_glyph::FontArc;

use crate::rendering::domain::overlay_renderer::OverlayRenderer;
use crate::rendering::domain::overlay_writer::OverlayWriter;
use crate::rendering::infrastructure::image_canvas::ImageCanvas;
use crate::shared::face::FaceRecord;

/// Decodes with the `image` crate, draws through [`ImageCanvas`] and saves.
pub struct ImageOverlayWriter {
    renderer: OverlayRenderer,
    font: Option<FontArc>,
}

impl ImageOverlayWriter {
    pub fn new(renderer: OverlayRenderer, font: Option<FontArc>) -> Self {
        if font.is_none() {
            log::warn!("No label font available; overlay will contain outlines only");
        }
        Self { renderer, font }
    }
}

impl OverlayWriter for ImageOverlayWriter {
    fn write(
        &self,
        image: &[u8],
        faces: &[FaceRecord],
        output: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut rgb = image::load_from_memory(image)?.to_rgb8();

        let mut canvas = ImageCanvas::new(&mut rgb, self.font.as_ref());
        let drawn = self.renderer.draw(&mut canvas, faces);
        log::debug!("Drew {drawn} face overlays");

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        rgb.save(output)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::face::Vertex;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn encode_png(img: &RgbImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn writer() -> ImageOverlayWriter {
        ImageOverlayWriter::new(OverlayRenderer::default(), None)
    }

    #[test]
    fn test_zero_faces_writes_unmodified_image() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.png");
        let src = RgbImage::from_pixel(32, 24, Rgb([10, 20, 30]));

        writer().write(&encode_png(&src), &[], &out).unwrap();

        let written = image::open(&out).unwrap().to_rgb8();
        assert_eq!(written, src);
    }

    #[test]
    fn test_outline_is_painted() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.png");
        let src = RgbImage::from_pixel(60, 60, Rgb([0, 0, 0]));
        let face = FaceRecord::with_polygon(
            vec![
                Vertex::new(10, 10),
                Vertex::new(50, 10),
                Vertex::new(50, 50),
                Vertex::new(10, 50),
            ],
            0.9,
        );

        writer().write(&encode_png(&src), &[face], &out).unwrap();

        let written = image::open(&out).unwrap().to_rgb8();
        assert_eq!(*written.get_pixel(30, 10), Rgb([0, 255, 0]));
        assert_eq!(*written.get_pixel(10, 30), Rgb([0, 255, 0]));
        assert_eq!(*written.get_pixel(30, 30), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_jpeg_output_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("found-faces.jpg");
        let src = RgbImage::from_pixel(16, 16, Rgb([200, 200, 200]));

        writer().write(&encode_png(&src), &[], &out).unwrap();

        let bytes = std::fs::read(&out).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn test_creates_missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("out.png");
        let src = RgbImage::from_pixel(4, 4, Rgb([1, 2, 3]));

        writer().write(&encode_png(&src), &[], &out).unwrap();

        assert!(out.exists());
    }

    #[test]
    fn test_undecodable_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.png");
        assert!(writer().write(b"not an image", &[], &out).is_err());
        assert!(!out.exists());
    }
}
