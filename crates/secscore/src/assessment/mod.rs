//! Security posture assessment core: a static question catalog scored
//! against a respondent's answers, yielding a risk tier, an audit
//! recommendation, and a prioritized remediation list.
//!
//! Everything here is a pure function over the immutable catalog and a
//! response map; callers may share one catalog across concurrent
//! assessments freely.

pub mod audit;
pub mod catalog;
pub mod export;
pub mod recommend;
pub mod risk;
pub mod score;

pub use audit::{AuditPriority, AuditRecommendation, AuditRecommendationView};
pub use catalog::{AnswerOption, Catalog, CatalogError, Category, Locale, LocalizedText, Question};
pub use export::{AppInfo, ExportError};
pub use recommend::{recommendations, RecommendationItem, Severity};
pub use risk::{RiskLevel, RiskLevelView};
pub use score::{score, CategoryScore, ResponseSet, ScoreResult};
