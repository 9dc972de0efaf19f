use std::fmt;

/// Six-level ordinal scale the annotation service uses for every
/// per-face attribute (emotions, headwear, exposure).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Likelihood {
    #[default]
    Unknown = 0,
    VeryUnlikely = 1,
    Unlikely = 2,
    Possible = 3,
    Likely = 4,
    VeryLikely = 5,
}

impl Likelihood {
    pub const ALL: [Likelihood; 6] = [
        Likelihood::Unknown,
        Likelihood::VeryUnlikely,
        Likelihood::Unlikely,
        Likelihood::Possible,
        Likelihood::Likely,
        Likelihood::VeryLikely,
    ];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Parses the service's wire name (`"VERY_LIKELY"` etc.).
    ///
    /// Anything unrecognised maps to `Unknown` so a schema addition on the
    /// remote side never fails a whole response.
    pub fn from_wire_name(name: &str) -> Self {
        match name {
            "VERY_UNLIKELY" => Likelihood::VeryUnlikely,
            "UNLIKELY" => Likelihood::Unlikely,
            "POSSIBLE" => Likelihood::Possible,
            "LIKELY" => Likelihood::Likely,
            "VERY_LIKELY" => Likelihood::VeryLikely,
            _ => Likelihood::Unknown,
        }
    }
}

impl TryFrom<u8> for Likelihood {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Likelihood::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| format!("likelihood ordinal out of range: {value}"))
    }
}

impl fmt::Display for Likelihood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Likelihood::Unknown => "Unknown",
            Likelihood::VeryUnlikely => "VeryUnlikely",
            Likelihood::Unlikely => "Unlikely",
            Likelihood::Possible => "Possible",
            Likelihood::Likely => "Likely",
            Likelihood::VeryLikely => "VeryLikely",
        };
        f.write_str(name)
    }
}
