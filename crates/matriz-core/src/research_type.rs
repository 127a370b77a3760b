use serde::{Deserialize, Serialize};

/// The top-level branch of the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResearchType {
    #[serde(rename = "Cualitativa")]
    Qualitative,
    #[serde(rename = "Cuantitativa")]
    Quantitative,
    #[serde(rename = "Mixta")]
    Mixed,
}

impl ResearchType {
    pub const ALL: [ResearchType; 3] = [
        ResearchType::Qualitative,
        ResearchType::Quantitative,
        ResearchType::Mixed,
    ];

    /// Label shown to the user and stored in exports
    pub fn label(&self) -> &'static str {
        match self {
            ResearchType::Qualitative => "Cualitativa",
            ResearchType::Quantitative => "Cuantitativa",
            ResearchType::Mixed => "Mixta",
        }
    }

    /// Whether variables and hypotheses are part of the sequence
    pub fn has_quantitative_block(&self) -> bool {
        matches!(self, ResearchType::Quantitative | ResearchType::Mixed)
    }

    /// Parse a user-facing label. Exact labels only, ignoring surrounding
    /// whitespace, the same way the choice validator compares options.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|rt| rt.label() == label)
    }
}

impl std::fmt::Display for ResearchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ResearchType {
    type Err = String;

    /// Accepts the Spanish labels and the English names used on the CLI
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(rt) = Self::from_label(s) {
            return Ok(rt);
        }
        match s.trim().to_lowercase().as_str() {
            "qualitative" | "cualitativa" | "cual" => Ok(ResearchType::Qualitative),
            "quantitative" | "cuantitativa" | "cuan" => Ok(ResearchType::Quantitative),
            "mixed" | "mixta" | "mixto" => Ok(ResearchType::Mixed),
            _ => Err(format!("Unknown research type: {}", s)),
        }
    }
}
