//! Request and response bodies of the Vision `images:annotate` endpoint.
//!
//! Only the face-detection subset is modelled. Proto3 JSON omits zero and
//! default values, so almost every field carries `#[serde(default)]`.

use serde::{Deserialize, Serialize};

use crate::shared::face::{BoundingPoly, FaceRecord, Vertex};
use crate::shared::likelihood::Likelihood;

pub(crate) const FACE_DETECTION: &str = "FACE_DETECTION";

#[derive(Debug, Serialize)]
pub(crate) struct AnnotateRequestBody {
    pub requests: Vec<AnnotateImageRequest>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AnnotateImageRequest {
    pub image: WireImage,
    pub features: Vec<WireFeature>,
}

#[derive(Debug, Serialize)]
pub(crate) struct WireImage {
    /// Base64 of the encoded image file.
    pub content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireFeature {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub max_results: u32,
}

impl AnnotateRequestBody {
    pub(crate) fn face_detection(content: String, max_results: u32) -> Self {
        Self {
            requests: vec![AnnotateImageRequest {
                image: WireImage { content },
                features: vec![WireFeature {
                    kind: FACE_DETECTION,
                    max_results,
                }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnnotateResponseBody {
    #[serde(default)]
    pub responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnnotateImageResponse {
    #[serde(default)]
    pub face_annotations: Vec<WireFaceAnnotation>,
    pub error: Option<WireStatus>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireStatus {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireFaceAnnotation {
    #[serde(default)]
    bounding_poly: WireBoundingPoly,
    #[serde(default)]
    fd_bounding_poly: WireBoundingPoly,
    #[serde(default)]
    detection_confidence: f32,
    #[serde(default)]
    landmarking_confidence: f32,
    #[serde(default)]
    joy_likelihood: String,
    #[serde(default)]
    sorrow_likelihood: String,
    #[serde(default)]
    anger_likelihood: String,
    #[serde(default)]
    surprise_likelihood: String,
    #[serde(default)]
    headwear_likelihood: String,
}

#[derive(Debug, Default, Deserialize)]
struct WireBoundingPoly {
    #[serde(default)]
    vertices: Vec<WireVertex>,
}

#[derive(Debug, Deserialize)]
struct WireVertex {
    #[serde(default)]
    x: i32,
    #[serde(default)]
    y: i32,
}

impl From<WireBoundingPoly> for BoundingPoly {
    fn from(poly: WireBoundingPoly) -> Self {
        BoundingPoly::new(
            poly.vertices
                .into_iter()
                .map(|v| Vertex::new(v.x, v.y))
                .collect(),
        )
    }
}

impl WireFaceAnnotation {
    pub(crate) fn into_face_record(self) -> FaceRecord {
        FaceRecord {
            bounding_poly: self.bounding_poly.into(),
            fd_bounding_poly: self.fd_bounding_poly.into(),
            detection_confidence: self.detection_confidence,
            landmarking_confidence: self.landmarking_confidence,
            joy: Likelihood::from_wire_name(&self.joy_likelihood),
            sorrow: Likelihood::from_wire_name(&self.sorrow_likelihood),
            anger: Likelihood::from_wire_name(&self.anger_likelihood),
            surprise: Likelihood::from_wire_name(&self.surprise_likelihood),
            headwear: Likelihood::from_wire_name(&self.headwear_likelihood),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> AnnotateResponseBody {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_request_body_shape() {
        let body = AnnotateRequestBody::face_detection("AAAA".into(), 12);
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            json!({
                "requests": [{
                    "image": { "content": "AAAA" },
                    "features": [{ "type": "FACE_DETECTION", "maxResults": 12 }]
                }]
            })
        );
    }

    #[test]
    fn test_decodes_full_face() {
        let body = decode(json!({
            "responses": [{
                "faceAnnotations": [{
                    "boundingPoly": { "vertices": [
                        { "x": 10, "y": 20 }, { "x": 110, "y": 20 },
                        { "x": 110, "y": 140 }, { "x": 10, "y": 140 }
                    ]},
                    "fdBoundingPoly": { "vertices": [{ "x": 15, "y": 30 }] },
                    "detectionConfidence": 0.9876,
                    "landmarkingConfidence": 0.5,
                    "joyLikelihood": "VERY_LIKELY",
                    "sorrowLikelihood": "VERY_UNLIKELY",
                    "angerLikelihood": "UNLIKELY",
                    "surpriseLikelihood": "POSSIBLE",
                    "headwearLikelihood": "LIKELY"
                }]
            }]
        }));

        let face = body
            .responses
            .into_iter()
            .next()
            .unwrap()
            .face_annotations
            .into_iter()
            .next()
            .unwrap()
            .into_face_record();

        assert_eq!(face.bounding_poly.vertices.len(), 4);
        assert_eq!(face.bounding_poly.vertices[2], Vertex::new(110, 140));
        assert_eq!(face.fd_bounding_poly.vertices, vec![Vertex::new(15, 30)]);
        assert_relative_eq!(face.detection_confidence, 0.9876);
        assert_relative_eq!(face.landmarking_confidence, 0.5);
        assert_eq!(face.joy, Likelihood::VeryLikely);
        assert_eq!(face.sorrow, Likelihood::VeryUnlikely);
        assert_eq!(face.anger, Likelihood::Unlikely);
        assert_eq!(face.surprise, Likelihood::Possible);
        assert_eq!(face.headwear, Likelihood::Likely);
    }

    #[test]
    fn test_missing_coordinates_decode_as_zero() {
        let record = decode(json!({
            "responses": [{
                "faceAnnotations": [{
                    "boundingPoly": { "vertices": [{}, { "x": 5 }, { "y": 7 }] }
                }]
            }]
        }))
        .responses
        .remove(0)
        .face_annotations
        .remove(0)
        .into_face_record();

        assert_eq!(
            record.bounding_poly.vertices,
            vec![Vertex::new(0, 0), Vertex::new(5, 0), Vertex::new(0, 7)]
        );
        assert_eq!(record.joy, Likelihood::Unknown);
        assert_relative_eq!(record.detection_confidence, 0.0);
    }

    #[test]
    fn test_absent_face_annotations_means_no_faces() {
        let body = decode(json!({ "responses": [{}] }));
        assert!(body.responses[0].face_annotations.is_empty());
        assert!(body.responses[0].error.is_none());
    }

    #[test]
    fn test_decodes_per_image_error() {
        let body = decode(json!({
            "responses": [{ "error": { "code": 3, "message": "Bad image data." } }]
        }));
        let error = body.responses[0].error.as_ref().unwrap();
        assert_eq!(error.code, 3);
        assert_eq!(error.message, "Bad image data.");
    }
}
