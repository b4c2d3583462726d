use serde::{Deserialize, Serialize};

use super::catalog::Locale;

/// Risk tier derived from the overall score percentage. Bands are
/// inclusive on their lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn classify(percentage: f64) -> Self {
        if percentage >= 80.0 {
            Self::Low
        } else if percentage >= 60.0 {
            Self::Medium
        } else if percentage >= 40.0 {
            Self::High
        } else {
            Self::Critical
        }
    }

    pub const fn label_fr(self) -> &'static str {
        match self {
            Self::Low => "Risque Faible",
            Self::Medium => "Risque Modéré",
            Self::High => "Risque Élevé",
            Self::Critical => "Risque Critique",
        }
    }

    pub const fn label_en(self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::Medium => "Medium Risk",
            Self::High => "High Risk",
            Self::Critical => "Critical Risk",
        }
    }

    pub fn label(self, locale: Locale) -> &'static str {
        match locale {
            Locale::Fr => self.label_fr(),
            Locale::En => self.label_en(),
        }
    }

    /// Fixed display color for badges and spreadsheet cells.
    pub const fn color(self) -> &'static str {
        match self {
            Self::Low => "#10b981",
            Self::Medium => "#f59e0b",
            Self::High => "#ef4444",
            Self::Critical => "#dc2626",
        }
    }

    pub fn view(self) -> RiskLevelView {
        RiskLevelView {
            level: self,
            fr: self.label_fr(),
            en: self.label_en(),
            color: self.color(),
        }
    }
}

/// Presentation payload pairing the tier with its fixed display metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskLevelView {
    pub level: RiskLevel,
    pub fr: &'static str,
    pub en: &'static str,
    pub color: &'static str,
}
