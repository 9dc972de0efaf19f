use crate::shared::likelihood::Likelihood;

/// Integer pixel coordinate as returned by the annotation service.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vertex {
    pub x: i32,
    pub y: i32,
}

impl Vertex {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Vertex {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Ordered outline of a detected face region.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoundingPoly {
    pub vertices: Vec<Vertex>,
}

impl BoundingPoly {
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self { vertices }
    }

    pub fn first(&self) -> Option<Vertex> {
        self.vertices.first().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// One detected face. Produced by a [`FaceAnnotator`] and only read locally.
///
/// [`FaceAnnotator`]: crate::detection::domain::face_annotator::FaceAnnotator
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FaceRecord {
    pub bounding_poly: BoundingPoly,
    /// Tighter polygon around the skin area only.
    pub fd_bounding_poly: BoundingPoly,
    pub detection_confidence: f32,
    pub landmarking_confidence: f32,
    pub joy: Likelihood,
    pub sorrow: Likelihood,
    pub anger: Likelihood,
    pub surprise: Likelihood,
    pub headwear: Likelihood,
}

impl FaceRecord {
    /// Face outlined by `vertices` with every likelihood left at `Unknown`.
    pub fn with_polygon(vertices: Vec<Vertex>, detection_confidence: f32) -> Self {
        Self {
            bounding_poly: BoundingPoly::new(vertices),
            detection_confidence,
            ..Self::default()
        }
    }
}
