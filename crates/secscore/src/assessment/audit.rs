use serde::{Deserialize, Serialize};

use super::catalog::Locale;
use super::score::CategoryScore;

/// How intensive the follow-up security review should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditRecommendation {
    FullAuditRequired,
    TargetedAuditRecommended,
    LightReview,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditPriority {
    High,
    Medium,
    Low,
}

impl AuditRecommendation {
    /// Derive the recommendation from the overall percentage and the
    /// per-category breakdown. A category under 50% counts as critical.
    /// Branches are ordered; the first match wins, so a full audit takes
    /// precedence even when the targeted conditions also hold.
    pub fn recommend(overall_percentage: f64, categories: &[CategoryScore]) -> Self {
        let critical_categories = categories
            .iter()
            .filter(|category| category.percentage < 50.0)
            .count();

        if overall_percentage < 50.0 || critical_categories >= 3 {
            Self::FullAuditRequired
        } else if overall_percentage < 70.0 || critical_categories >= 1 {
            Self::TargetedAuditRecommended
        } else {
            Self::LightReview
        }
    }

    pub const fn priority(self) -> AuditPriority {
        match self {
            Self::FullAuditRequired => AuditPriority::High,
            Self::TargetedAuditRecommended => AuditPriority::Medium,
            Self::LightReview => AuditPriority::Low,
        }
    }

    pub const fn label_fr(self) -> &'static str {
        match self {
            Self::FullAuditRequired => "Audit Complet Requis",
            Self::TargetedAuditRecommended => "Audit Ciblé Recommandé",
            Self::LightReview => "Revue Légère Suffisante",
        }
    }

    pub const fn label_en(self) -> &'static str {
        match self {
            Self::FullAuditRequired => "Full Audit Required",
            Self::TargetedAuditRecommended => "Targeted Audit Recommended",
            Self::LightReview => "Light Review Sufficient",
        }
    }

    pub fn label(self, locale: Locale) -> &'static str {
        match locale {
            Locale::Fr => self.label_fr(),
            Locale::En => self.label_en(),
        }
    }

    pub fn view(self) -> AuditRecommendationView {
        AuditRecommendationView {
            recommendation: self,
            fr: self.label_fr(),
            en: self.label_en(),
            priority: self.priority(),
        }
    }
}

/// Presentation payload pairing the recommendation with its metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuditRecommendationView {
    pub recommendation: AuditRecommendation,
    pub fr: &'static str,
    pub en: &'static str,
    pub priority: AuditPriority,
}
