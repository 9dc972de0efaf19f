use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::shared::likelihood::Likelihood;

/// Language of the console report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fr,
    En,
}

impl Locale {
    pub const ALL: &[Locale] = &[Locale::Fr, Locale::En];

    /// Label for each likelihood level, indexed by ordinal.
    pub fn likelihood_labels(self) -> &'static [&'static str; 6] {
        match self {
            Locale::Fr => &FR_LIKELIHOOD_LABELS,
            Locale::En => &EN_LIKELIHOOD_LABELS,
        }
    }

    pub fn likelihood_label(self, likelihood: Likelihood) -> &'static str {
        self.likelihood_labels()[likelihood.ordinal() as usize]
    }

    pub fn face_heading(self, index: usize) -> String {
        match self {
            Locale::Fr => format!("Visage {index}"),
            Locale::En => format!("Face {index}"),
        }
    }

    pub fn faces_found(self, count: usize) -> String {
        let plural = if count == 1 { "" } else { "s" };
        match self {
            Locale::Fr => format!("{count} visage{plural} trouvé{plural}"),
            Locale::En => format!("{count} face{plural} found"),
        }
    }
}

const FR_LIKELIHOOD_LABELS: [&str; 6] = [
    "Inconnu",
    "Pas du tout",
    "Un petit peu",
    "Probablement",
    "Tout à fait",
    "Carrément !",
];

const EN_LIKELIHOOD_LABELS: [&str; 6] = [
    "Unknown",
    "Not at all",
    "A little",
    "Probably",
    "Very likely",
    "Certainly",
];

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fr" => Ok(Locale::Fr),
            "en" => Ok(Locale::En),
            other => Err(format!("unsupported language '{other}', expected 'fr' or 'en'")),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Fr => write!(f, "fr"),
            Locale::En => write!(f, "en"),
        }
    }
}
