use serde::{Deserialize, Serialize};

/// Which form schema the prediction page runs with.
///
/// The two schemas disagree on how gender is spelled and on the casing of
/// the fallback pair. They are kept as separate profiles; matching is
/// case-sensitive under both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictorProfile {
    /// Gender "M"/"F", fallback ("speeding", "warning").
    #[default]
    Ledger,
    /// Gender "male"/"female", fallback ("Speeding", "Warning").
    NaturalLanguage,
}

impl PredictorProfile {
    pub fn gender_options(&self) -> &'static [&'static str] {
        match self {
            Self::Ledger => &["M", "F"],
            Self::NaturalLanguage => &["male", "female"],
        }
    }

    pub fn fallback_violation(&self) -> &'static str {
        match self {
            Self::Ledger => "speeding",
            Self::NaturalLanguage => "Speeding",
        }
    }

    pub fn fallback_outcome(&self) -> &'static str {
        match self {
            Self::Ledger => "warning",
            Self::NaturalLanguage => "Warning",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ledger => "ledger",
            Self::NaturalLanguage => "natural_language",
        }
    }
}

/// Youngest and oldest driver age the prediction form accepts.
pub const FORM_MIN_AGE: i64 = 16;
pub const FORM_MAX_AGE: i64 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// SQLite file (or `file:` URI) holding `traffic_stops`.
    pub database_path: String,
    /// Rows shown by the overview page.
    #[serde(default = "default_preview_limit")]
    pub table_preview_limit: usize,
    #[serde(default)]
    pub predictor: PredictorProfile,
}

fn default_preview_limit() -> usize {
    50
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            database_path: "securecheck.db".into(),
            table_preview_limit: default_preview_limit(),
            predictor: PredictorProfile::Ledger,
        }
    }
}

impl DashboardConfig {
    /// Load from a JSON file.
    /// In tests, use DashboardConfig::default_test().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: DashboardConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        Ok(config)
    }

    /// Config pointing at `database_path` with every other field defaulted.
    pub fn default_test(database_path: &str) -> Self {
        Self {
            database_path: database_path.into(),
            ..Self::default()
        }
    }
}
