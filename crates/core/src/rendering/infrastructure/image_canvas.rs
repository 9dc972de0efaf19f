use ab_glyph::{FontArc, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_line_segment_mut, draw_text_mut};

use crate::rendering::domain::overlay_canvas::OverlayCanvas;
use crate::shared::constants::LABEL_SCALE;
use crate::shared::face::Vertex;

/// [`OverlayCanvas`] over an in-memory RGB buffer, drawn with `imageproc`.
///
/// Without a font, labels are silently dropped; outlines are always drawn.
pub struct ImageCanvas<'a> {
    image: &'a mut RgbImage,
    font: Option<&'a FontArc>,
    scale: PxScale,
}

impl<'a> ImageCanvas<'a> {
    pub fn new(image: &'a mut RgbImage, font: Option<&'a FontArc>) -> Self {
        Self {
            image,
            font,
            scale: PxScale::from(LABEL_SCALE),
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = PxScale::from(scale);
        self
    }

    /// A `width`-pixel stroke made of 1px segments shifted along the segment
    /// normal in half-pixel steps. Shifts snap to whole pixels, so diagonals
    /// stay gap-free.
    fn draw_thick_segment(&mut self, from: Vertex, to: Vertex, color: Rgb<u8>, width: u32) {
        let (dx, dy) = ((to.x - from.x) as f32, (to.y - from.y) as f32);
        let length = dx.hypot(dy);
        let (nx, ny) = if length > 0.0 {
            (-dy / length, dx / length)
        } else {
            (0.0, 1.0)
        };

        let width = width.max(1);
        let first = -((width - 1) as f32) / 2.0;
        for step in 0..(2 * width - 1) {
            let offset = first + step as f32 * 0.5;
            let (ox, oy) = ((nx * offset).floor(), (ny * offset).floor());
            draw_line_segment_mut(
                self.image,
                (from.x as f32 + ox, from.y as f32 + oy),
                (to.x as f32 + ox, to.y as f32 + oy),
                color,
            );
        }
    }
}

impl OverlayCanvas for ImageCanvas<'_> {
    fn draw_polyline(&mut self, points: &[Vertex], color: Rgb<u8>, width: u32) {
        for pair in points.windows(2) {
            self.draw_thick_segment(pair[0], pair[1], color, width);
        }
    }

    fn draw_label(&mut self, origin: Vertex, text: &str, color: Rgb<u8>) {
        if let Some(font) = self.font {
            draw_text_mut(self.image, color, origin.x, origin.y, self.scale, font, text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    fn square_path() -> Vec<Vertex> {
        vec![
            Vertex::new(10, 10),
            Vertex::new(30, 10),
            Vertex::new(30, 30),
            Vertex::new(10, 30),
            Vertex::new(10, 10),
        ]
    }

    #[test]
    fn test_polyline_paints_every_edge() {
        let mut img = RgbImage::from_pixel(40, 40, BLACK);
        ImageCanvas::new(&mut img, None).draw_polyline(&square_path(), GREEN, 1);

        assert_eq!(*img.get_pixel(20, 10), GREEN); // top
        assert_eq!(*img.get_pixel(30, 20), GREEN); // right
        assert_eq!(*img.get_pixel(20, 30), GREEN); // bottom
        assert_eq!(*img.get_pixel(10, 20), GREEN); // left (closing segment)
        assert_eq!(*img.get_pixel(20, 20), BLACK); // interior untouched
    }

    #[test]
    fn test_stroke_width_spreads_outline() {
        let mut img = RgbImage::from_pixel(40, 40, BLACK);
        ImageCanvas::new(&mut img, None).draw_polyline(&square_path(), GREEN, 5);

        assert_eq!(*img.get_pixel(20, 8), GREEN);
        assert_eq!(*img.get_pixel(20, 12), GREEN);
        assert_eq!(*img.get_pixel(20, 14), BLACK);
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(4)]
    #[case(5)]
    fn test_stroke_covers_exactly_width_rows(#[case] width: u32) {
        let mut img = RgbImage::from_pixel(40, 40, BLACK);
        let path = vec![Vertex::new(5, 20), Vertex::new(35, 20)];
        ImageCanvas::new(&mut img, None).draw_polyline(&path, GREEN, width);

        let painted = (0..40).filter(|&y| *img.get_pixel(20, y) == GREEN).count();
        assert_eq!(painted, width as usize);
    }

    #[test]
    fn test_diagonal_stroke_has_no_gaps() {
        let mut img = RgbImage::from_pixel(40, 40, BLACK);
        let path = vec![Vertex::new(5, 5), Vertex::new(35, 35)];
        ImageCanvas::new(&mut img, None).draw_polyline(&path, GREEN, 3);

        for i in 6..35 {
            assert_eq!(*img.get_pixel(i, i), GREEN);
            assert_eq!(*img.get_pixel(i + 1, i), GREEN);
            assert_eq!(*img.get_pixel(i, i + 1), GREEN);
        }
    }

    #[test]
    fn test_out_of_bounds_points_are_clipped() {
        let mut img = RgbImage::from_pixel(20, 20, BLACK);
        let path = vec![Vertex::new(-50, 5), Vertex::new(100, 5)];
        ImageCanvas::new(&mut img, None).draw_polyline(&path, GREEN, 1);

        assert_eq!(*img.get_pixel(0, 5), GREEN);
        assert_eq!(*img.get_pixel(19, 5), GREEN);
    }

    #[test]
    fn test_label_without_font_is_noop() {
        let mut img = RgbImage::from_pixel(20, 20, BLACK);
        let before = img.clone();
        ImageCanvas::new(&mut img, None).draw_label(Vertex::new(0, 0), "0.900 | 0", GREEN);
        assert_eq!(img, before);
    }

    #[test]
    fn test_single_point_path_draws_nothing_extra() {
        let mut img = RgbImage::from_pixel(10, 10, BLACK);
        ImageCanvas::new(&mut img, None).draw_polyline(&[Vertex::new(5, 5)], GREEN, 1);
        assert!(img.pixels().all(|p| *p == BLACK));
    }
}
