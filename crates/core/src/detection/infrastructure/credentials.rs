use std::path::PathBuf;
use std::process::Command;

use thiserror::Error;

use crate::detection::infrastructure::adc_file::{self, AdcError, AdcFile};
use crate::shared::constants::{ACCESS_TOKEN_ENV, API_KEY_ENV, APPLICATION_CREDENTIALS_ENV};

#[derive(Error, Debug)]
pub enum CredentialsError {
    #[error(
        "no Vision API credentials found: set {}, {} or {}, \
         or log in with `gcloud auth application-default login`",
        API_KEY_ENV,
        ACCESS_TOKEN_ENV,
        APPLICATION_CREDENTIALS_ENV
    )]
    NotFound,
    #[error("application default credentials: {0}")]
    Adc(#[from] AdcError),
    #[error("failed to run gcloud: {0}")]
    Gcloud(#[source] std::io::Error),
}

/// How requests to the annotation endpoint are authenticated.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Sent as the `key` query parameter.
    ApiKey(String),
    /// Sent as an `Authorization: Bearer` header.
    AccessToken(String),
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::ApiKey(_) => f.write_str("ApiKey(***)"),
            Credentials::AccessToken(_) => f.write_str("AccessToken(***)"),
        }
    }
}

/// Where credentials come from, before any token exchange happens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CredentialSource {
    Ready(Credentials),
    AdcFile(PathBuf),
}

impl CredentialSource {
    /// Picks the first configured source. Blank values are treated as unset.
    ///
    /// Resolution order:
    /// 1. `GOOGLE_API_KEY`
    /// 2. `GOOGLE_OAUTH_ACCESS_TOKEN`
    /// 3. `GOOGLE_APPLICATION_CREDENTIALS`
    /// 4. `well_known`, the gcloud ADC file when it exists
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        well_known: Option<PathBuf>,
    ) -> Option<Self> {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        non_blank(API_KEY_ENV)
            .map(|key| Self::Ready(Credentials::ApiKey(key)))
            .or_else(|| {
                non_blank(ACCESS_TOKEN_ENV).map(|token| Self::Ready(Credentials::AccessToken(token)))
            })
            .or_else(|| non_blank(APPLICATION_CREDENTIALS_ENV).map(|p| Self::AdcFile(PathBuf::from(p))))
            .or_else(|| well_known.map(Self::AdcFile))
    }
}

impl Credentials {
    /// Resolve credentials from the ambient environment, falling back to
    /// `gcloud auth application-default print-access-token` when no source
    /// from [`CredentialSource::from_lookup`] is configured.
    pub fn resolve() -> Result<Self, CredentialsError> {
        let well_known = adc_file::well_known_path().filter(|p| p.is_file());
        match CredentialSource::from_lookup(|name| std::env::var(name).ok(), well_known) {
            Some(CredentialSource::Ready(credentials)) => Ok(credentials),
            Some(CredentialSource::AdcFile(path)) => {
                log::debug!("Using application default credentials from {}", path.display());
                let token = AdcFile::load(&path)?.fetch_access_token(None)?;
                Ok(Credentials::AccessToken(token))
            }
            None => {
                log::debug!("No credentials configured, asking gcloud");
                gcloud_access_token()?
                    .map(Credentials::AccessToken)
                    .ok_or(CredentialsError::NotFound)
            }
        }
    }
}

fn gcloud_access_token() -> Result<Option<String>, CredentialsError> {
    let output = match Command::new("gcloud")
        .args(["auth", "application-default", "print-access-token"])
        .output()
    {
        Ok(output) => output,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(CredentialsError::Gcloud(e)),
    };
    if !output.status.success() {
        log::debug!(
            "gcloud exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
        return Ok(None);
    }
    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok((!token.is_empty()).then_some(token))
}
