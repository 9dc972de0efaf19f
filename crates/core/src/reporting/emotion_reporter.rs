use std::io::{self, Write};

use crate::reporting::locale::Locale;
use crate::shared::face::FaceRecord;
use crate::shared::likelihood::Likelihood;

/// Emotions printed per face, in print order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmotionCategory {
    Anger,
    Joy,
    Surprise,
    Sorrow,
}

impl EmotionCategory {
    pub const ALL: [EmotionCategory; 4] = [
        EmotionCategory::Anger,
        EmotionCategory::Joy,
        EmotionCategory::Surprise,
        EmotionCategory::Sorrow,
    ];

    pub fn likelihood(self, face: &FaceRecord) -> Likelihood {
        match self {
            EmotionCategory::Anger => face.anger,
            EmotionCategory::Joy => face.joy,
            EmotionCategory::Surprise => face.surprise,
            EmotionCategory::Sorrow => face.sorrow,
        }
    }

    pub fn name(self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::Fr, EmotionCategory::Anger) => "Colère",
            (Locale::Fr, EmotionCategory::Joy) => "Joie",
            (Locale::Fr, EmotionCategory::Surprise) => "Surprise",
            (Locale::Fr, EmotionCategory::Sorrow) => "Tristesse",
            (Locale::En, EmotionCategory::Anger) => "Anger",
            (Locale::En, EmotionCategory::Joy) => "Joy",
            (Locale::En, EmotionCategory::Surprise) => "Surprise",
            (Locale::En, EmotionCategory::Sorrow) => "Sorrow",
        }
    }
}

/// Prints the face count and per-face emotion likelihoods.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmotionReporter {
    locale: Locale,
}

impl EmotionReporter {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn write_count(&self, out: &mut dyn Write, count: usize) -> io::Result<()> {
        writeln!(out, "{}", self.locale.faces_found(count))
    }

    pub fn write_faces(&self, out: &mut dyn Write, faces: &[FaceRecord]) -> io::Result<()> {
        for (index, face) in faces.iter().enumerate() {
            writeln!(out, "{}", self.locale.face_heading(index))?;
            for category in EmotionCategory::ALL {
                writeln!(
                    out,
                    "{}: {}",
                    category.name(self.locale),
                    self.locale.likelihood_label(category.likelihood(face))
                )?;
            }
        }
        Ok(())
    }
}
