use image::Rgb;

use crate::shared::face::Vertex;

/// Drawing surface for face overlays.
///
/// Implementations paint in place; coordinates are image pixels and may fall
/// outside the surface, in which case the drawing is clipped.
pub trait OverlayCanvas {
    /// Draws straight segments between consecutive points.
    fn draw_polyline(&mut self, points: &[Vertex], color: Rgb<u8>, width: u32);

    /// Draws `text` with its top-left corner at `origin`.
    fn draw_label(&mut self, origin: Vertex, text: &str, color: Rgb<u8>);
}
