use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use thiserror::Error;

use crate::detection::domain::face_annotator::FaceAnnotator;
use crate::detection::infrastructure::credentials::Credentials;
use crate::detection::infrastructure::vision_wire::{AnnotateRequestBody, AnnotateResponseBody};
use crate::shared::constants::VISION_ENDPOINT;
use crate::shared::face::FaceRecord;

#[derive(Error, Debug)]
pub enum AnnotateError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("annotation service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("annotation service rejected the image (code {code}): {message}")]
    Api { code: i32, message: String },
    #[error("failed to decode annotation response: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("annotation response contained no result for the image")]
    EmptyResponse,
}

/// Connection settings for the Vision annotation endpoint.
#[derive(Clone, Debug)]
pub struct VisionConfig {
    pub endpoint: String,
    pub credentials: Credentials,
    /// `None` leaves the request unbounded.
    pub timeout: Option<Duration>,
}

impl VisionConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            endpoint: VISION_ENDPOINT.to_string(),
            credentials,
            timeout: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// [`FaceAnnotator`] backed by the Google Cloud Vision REST API.
///
/// Holds one blocking HTTP client for its whole lifetime; build it once and
/// share it between stages.
pub struct VisionApiAnnotator {
    client: reqwest::blocking::Client,
    config: VisionConfig,
}

impl VisionApiAnnotator {
    pub fn new(config: VisionConfig) -> Result<Self, AnnotateError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(AnnotateError::Client)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &VisionConfig {
        &self.config
    }

    /// Typed variant of [`FaceAnnotator::annotate`].
    pub fn annotate_faces(
        &self,
        image: &[u8],
        max_results: u32,
    ) -> Result<Vec<FaceRecord>, AnnotateError> {
        let body = AnnotateRequestBody::face_detection(BASE64.encode(image), max_results);
        let request = self.client.post(&self.config.endpoint).json(&body);
        let request = match &self.config.credentials {
            Credentials::ApiKey(key) => request.query(&[("key", key)]),
            Credentials::AccessToken(token) => request.bearer_auth(token),
        };

        log::debug!(
            "Sending {} bytes to {} (max_results={max_results})",
            image.len(),
            self.config.endpoint
        );
        let response = request.send().map_err(|e| AnnotateError::Transport {
            endpoint: self.config.endpoint.clone(),
            source: e,
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AnnotateError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: AnnotateResponseBody = response.json().map_err(AnnotateError::Decode)?;
        let result = parsed
            .responses
            .into_iter()
            .next()
            .ok_or(AnnotateError::EmptyResponse)?;

        if let Some(error) = result.error.filter(|e| e.code != 0) {
            return Err(AnnotateError::Api {
                code: error.code,
                message: error.message,
            });
        }

        let faces: Vec<FaceRecord> = result
            .face_annotations
            .into_iter()
            .map(|f| f.into_face_record())
            .collect();
        log::debug!("Annotation service returned {} faces", faces.len());
        Ok(faces)
    }
}

impl FaceAnnotator for VisionApiAnnotator {
    fn annotate(
        &self,
        image: &[u8],
        max_results: u32,
    ) -> Result<Vec<FaceRecord>, Box<dyn std::error::Error>> {
        Ok(self.annotate_faces(image, max_results)?)
    }
}
