use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use utoipa::ToSchema;

use crate::core::error::AppError;

/// Which taxonomy a category belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Risk,
    Event,
}

const DEFAULT_RISK_CATEGORIES: &[&str] = &[
    "Tadilat Gerektiren Araçlar",
    "Elektrik Kaçağı",
    "Kaygan Zemin",
    "Gaz Sızıntısı",
    "Madde Sızıntısı",
];

const DEFAULT_EVENT_CATEGORIES: &[&str] = &[
    "Yangın",
    "Elektrikle Temas",
    "Yük Altında Kalma",
    "Patlama",
    "Hırsızlık",
    "Şiddet/Kavga",
];

impl CategoryKind {
    pub const ALL: [CategoryKind; 2] = [CategoryKind::Risk, CategoryKind::Event];

    /// Table holding this kind. Never built from user input.
    pub fn table(&self) -> &'static str {
        match self {
            CategoryKind::Risk => "riskcategories",
            CategoryKind::Event => "eventcategories",
        }
    }

    pub fn defaults(&self) -> &'static [&'static str] {
        match self {
            CategoryKind::Risk => DEFAULT_RISK_CATEGORIES,
            CategoryKind::Event => DEFAULT_EVENT_CATEGORIES,
        }
    }
}

impl FromStr for CategoryKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "risk" => Ok(CategoryKind::Risk),
            "event" => Ok(CategoryKind::Event),
            other => Err(AppError::BadRequest(format!(
                "Invalid category type '{}', expected 'risk' or 'event'",
                other
            ))),
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryKind::Risk => write!(f, "risk"),
            CategoryKind::Event => write!(f, "event"),
        }
    }
}
