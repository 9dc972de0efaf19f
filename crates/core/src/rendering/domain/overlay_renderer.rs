use image::Rgb;

use crate::rendering::domain::overlay_canvas::OverlayCanvas;
use crate::shared::constants::{LABEL_COLOR, LABEL_OFFSET_Y, OUTLINE_COLOR, OUTLINE_WIDTH};
use crate::shared::face::{FaceRecord, Vertex};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayStyle {
    pub outline_color: Rgb<u8>,
    pub outline_width: u32,
    pub label_color: Rgb<u8>,
    /// Vertical distance between the first polygon vertex and the label.
    pub label_offset_y: i32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            outline_color: Rgb(OUTLINE_COLOR),
            outline_width: OUTLINE_WIDTH,
            label_color: Rgb(LABEL_COLOR),
            label_offset_y: LABEL_OFFSET_Y,
        }
    }
}

/// Draws one closed outline and one confidence label per face.
#[derive(Clone, Debug, Default)]
pub struct OverlayRenderer {
    style: OverlayStyle,
}

impl OverlayRenderer {
    pub fn new(style: OverlayStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    /// Draws faces in input order and returns how many were drawn.
    ///
    /// Faces without vertices have nothing to outline or anchor a label to;
    /// they are skipped.
    pub fn draw(&self, canvas: &mut dyn OverlayCanvas, faces: &[FaceRecord]) -> usize {
        let mut drawn = 0;
        for (index, face) in faces.iter().enumerate() {
            let vertices = &face.bounding_poly.vertices;
            let Some(anchor) = vertices.first() else {
                log::warn!("Face {index} has an empty bounding polygon, skipping");
                continue;
            };

            canvas.draw_polyline(
                &closed_path(vertices),
                self.style.outline_color,
                self.style.outline_width,
            );
            canvas.draw_label(
                Vertex::new(anchor.x, anchor.y - self.style.label_offset_y),
                &label_text(index, face.detection_confidence),
                self.style.label_color,
            );
            drawn += 1;
        }
        drawn
    }
}

/// The vertices followed by the first one again, so the outline closes.
pub fn closed_path(vertices: &[Vertex]) -> Vec<Vertex> {
    let mut path = Vec::with_capacity(vertices.len() + 1);
    path.extend_from_slice(vertices);
    if let Some(&first) = vertices.first() {
        path.push(first);
    }
    path
}

pub fn label_text(index: usize, confidence: f32) -> String {
    format!("{confidence:.3} | {index}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq)]
    enum DrawCall {
        Polyline(Vec<Vertex>, Rgb<u8>, u32),
        Label(Vertex, String, Rgb<u8>),
    }

    #[derive(Default)]
    struct RecordingCanvas {
        calls: Vec<DrawCall>,
    }

    impl RecordingCanvas {
        fn polylines(&self) -> Vec<&Vec<Vertex>> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    DrawCall::Polyline(points, _, _) => Some(points),
                    _ => None,
                })
                .collect()
        }

        fn labels(&self) -> Vec<&str> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    DrawCall::Label(_, text, _) => Some(text.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    impl OverlayCanvas for RecordingCanvas {
        fn draw_polyline(&mut self, points: &[Vertex], color: Rgb<u8>, width: u32) {
            self.calls
                .push(DrawCall::Polyline(points.to_vec(), color, width));
        }

        fn draw_label(&mut self, origin: Vertex, text: &str, color: Rgb<u8>) {
            self.calls
                .push(DrawCall::Label(origin, text.to_string(), color));
        }
    }

    fn square(x: i32, y: i32, size: i32, confidence: f32) -> FaceRecord {
        FaceRecord::with_polygon(
            vec![
                Vertex::new(x, y),
                Vertex::new(x + size, y),
                Vertex::new(x + size, y + size),
                Vertex::new(x, y + size),
            ],
            confidence,
        )
    }

    #[test]
    fn test_closed_path_returns_to_origin() {
        let face = square(0, 0, 10, 0.5);
        let path = closed_path(&face.bounding_poly.vertices);
        assert_eq!(
            path,
            vec![
                Vertex::new(0, 0),
                Vertex::new(10, 0),
                Vertex::new(10, 10),
                Vertex::new(0, 10),
                Vertex::new(0, 0),
            ]
        );
    }

    #[test]
    fn test_closed_path_of_empty_is_empty() {
        assert!(closed_path(&[]).is_empty());
    }

    #[test]
    fn test_closed_path_single_vertex() {
        let path = closed_path(&[Vertex::new(4, 4)]);
        assert_eq!(path, vec![Vertex::new(4, 4), Vertex::new(4, 4)]);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(3)]
    #[case(12)]
    fn test_one_outline_and_label_per_face(#[case] count: usize) {
        let faces: Vec<FaceRecord> = (0..count)
            .map(|i| square(i as i32 * 50, 40, 20, 0.9))
            .collect();
        let mut canvas = RecordingCanvas::default();

        let drawn = OverlayRenderer::default().draw(&mut canvas, &faces);

        assert_eq!(drawn, count);
        assert_eq!(canvas.polylines().len(), count);
        assert_eq!(canvas.labels().len(), count);
    }

    #[test]
    fn test_faces_drawn_in_input_order() {
        let faces = vec![square(100, 100, 10, 0.1), square(0, 50, 10, 0.2)];
        let mut canvas = RecordingCanvas::default();

        OverlayRenderer::default().draw(&mut canvas, &faces);

        let polylines = canvas.polylines();
        assert_eq!(polylines[0][0], Vertex::new(100, 100));
        assert_eq!(polylines[1][0], Vertex::new(0, 50));
        assert_eq!(canvas.labels(), vec!["0.100 | 0", "0.200 | 1"]);
    }

    #[test]
    fn test_outline_then_label_for_each_face() {
        let faces = vec![square(0, 40, 10, 0.98765)];
        let mut canvas = RecordingCanvas::default();

        OverlayRenderer::default().draw(&mut canvas, &faces);

        let style = OverlayStyle::default();
        assert_eq!(
            canvas.calls,
            vec![
                DrawCall::Polyline(
                    closed_path(&faces[0].bounding_poly.vertices),
                    style.outline_color,
                    5
                ),
                DrawCall::Label(Vertex::new(0, 10), "0.988 | 0".into(), style.label_color),
            ]
        );
    }

    #[test]
    fn test_label_may_sit_above_image_top() {
        let faces = vec![square(5, 0, 10, 0.5)];
        let mut canvas = RecordingCanvas::default();

        OverlayRenderer::default().draw(&mut canvas, &faces);

        match &canvas.calls[1] {
            DrawCall::Label(origin, _, _) => assert_eq!(*origin, Vertex::new(5, -30)),
            other => panic!("expected label, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_polygon_is_skipped() {
        let faces = vec![
            FaceRecord::default(),
            square(0, 0, 10, 0.5),
        ];
        let mut canvas = RecordingCanvas::default();

        let drawn = OverlayRenderer::default().draw(&mut canvas, &faces);

        assert_eq!(drawn, 1);
        assert_eq!(canvas.labels(), vec!["0.500 | 1"]);
    }

    #[rstest]
    #[case(0, 0.0, "0.000 | 0")]
    #[case(2, 0.12345, "0.123 | 2")]
    #[case(7, 1.0, "1.000 | 7")]
    fn test_label_text(#[case] index: usize, #[case] confidence: f32, #[case] expected: &str) {
        assert_eq!(label_text(index, confidence), expected);
    }

    #[test]
    fn test_default_style_colors() {
        let style = OverlayStyle::default();
        assert_eq!(style.outline_color, Rgb([0, 255, 0]));
        assert_eq!(style.label_color, Rgb([255, 0, 0]));
        assert_eq!(style.outline_width, 5);
        assert_eq!(style.label_offset_y, 30);
    }
}
