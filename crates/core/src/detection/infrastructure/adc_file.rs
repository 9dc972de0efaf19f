//! Application Default Credentials files, as downloaded for a service account
//! or written by `gcloud auth application-default login`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

const ADC_FILE_NAME: &str = "application_default_credentials.json";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: u64 = 3600;

#[derive(Error, Debug)]
pub enum AdcError {
    #[error("failed to read credentials file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("credentials file {path} is not usable: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to sign service account assertion: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("token request to {uri} failed: {source}")]
    Transport {
        uri: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("token endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode token response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Contents of an ADC JSON file, keyed by its `type` field.
#[derive(Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AdcFile {
    ServiceAccount {
        client_email: String,
        private_key: String,
        #[serde(default = "default_token_uri")]
        token_uri: String,
    },
    AuthorizedUser {
        client_id: String,
        client_secret: String,
        refresh_token: String,
        #[serde(default = "default_token_uri")]
        token_uri: String,
    },
}

impl std::fmt::Debug for AdcFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdcFile::ServiceAccount { client_email, .. } => {
                write!(f, "ServiceAccount({client_email})")
            }
            AdcFile::AuthorizedUser { client_id, .. } => write!(f, "AuthorizedUser({client_id})"),
        }
    }
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: u64,
    exp: u64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl AdcFile {
    pub fn load(path: &Path) -> Result<Self, AdcError> {
        let json = fs::read_to_string(path).map_err(|e| AdcError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&json).map_err(|e| AdcError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn token_uri(&self) -> &str {
        match self {
            AdcFile::ServiceAccount { token_uri, .. } | AdcFile::AuthorizedUser { token_uri, .. } => {
                token_uri
            }
        }
    }

    /// Form fields of the OAuth token request. Service account assertions
    /// are signed as issued at `issued_at` (Unix seconds).
    pub fn token_request_form(
        &self,
        issued_at: u64,
    ) -> Result<Vec<(&'static str, String)>, AdcError> {
        match self {
            AdcFile::ServiceAccount {
                client_email,
                private_key,
                token_uri,
            } => {
                let claims = AssertionClaims {
                    iss: client_email,
                    scope: CLOUD_PLATFORM_SCOPE,
                    aud: token_uri,
                    iat: issued_at,
                    exp: issued_at + ASSERTION_LIFETIME_SECS,
                };
                let key =
                    EncodingKey::from_rsa_pem(private_key.as_bytes()).map_err(AdcError::Signing)?;
                let assertion = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key)
                    .map_err(AdcError::Signing)?;
                Ok(vec![
                    ("grant_type", JWT_BEARER_GRANT.to_string()),
                    ("assertion", assertion),
                ])
            }
            AdcFile::AuthorizedUser {
                client_id,
                client_secret,
                refresh_token,
                ..
            } => Ok(vec![
                ("grant_type", "refresh_token".to_string()),
                ("client_id", client_id.clone()),
                ("client_secret", client_secret.clone()),
                ("refresh_token", refresh_token.clone()),
            ]),
        }
    }

    /// Exchanges the file's credentials for a short-lived access token.
    pub fn fetch_access_token(&self, timeout: Option<Duration>) -> Result<String, AdcError> {
        let form = self.token_request_form(unix_now())?;
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(AdcError::Client)?;

        log::debug!("Requesting access token from {}", self.token_uri());
        let response = client
            .post(self.token_uri())
            .form(&form)
            .send()
            .map_err(|e| AdcError::Transport {
                uri: self.token_uri().to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AdcError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let token: TokenResponse = response.json().map_err(AdcError::Decode)?;
        Ok(token.access_token)
    }
}

/// Where `gcloud auth application-default login` stores its file.
pub fn well_known_path() -> Option<PathBuf> {
    let base = if cfg!(windows) {
        dirs::config_dir()
    } else {
        dirs::home_dir().map(|home| home.join(".config"))
    };
    base.map(|dir| dir.join("gcloud").join(ADC_FILE_NAME))
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
