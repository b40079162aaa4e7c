use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::core::errors::{AdminError, Result};
use crate::core::models::report::{ReportFilterState, parse_department};
use crate::core::models::selection::Selection;
use crate::core::services::token::{self, DEFAULT_SCHEME_TAG};

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "kenja.toml";

/// Top-level configuration. Every section is optional.
///
/// ```toml
/// [keys]
/// scheme_tag = "kenja_live_"
///
/// [audit]
/// source = "exports/audit.jsonl"
///
/// [report]
/// start = "2024-04-01"
/// end = "2025-03-31"
/// department = "開発部"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub keys: KeysSection,
    pub audit: AuditSection,
    pub report: ReportSection,
}

impl AppConfig {
    /// Load the configuration.
    ///
    /// An explicit path must exist. Without one, `./kenja.toml` and then
    /// `<config dir>/kenja-admin/config.toml` are tried; if neither exists
    /// the defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) if !p.exists() => {
                return Err(AdminError::ConfigNotFound {
                    path: p.to_path_buf(),
                });
            }
            Some(p) => Some(p.to_path_buf()),
            None => Self::discover(),
        };

        let Some(path) = path else {
            tracing::debug!("no config file found, using defaults");
            return Ok(Self::default());
        };

        tracing::debug!(path = %path.display(), "loading config");
        let content = std::fs::read_to_string(&path)?;
        Self::parse(&content)
    }

    /// Parse and validate TOML content.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| AdminError::InvalidConfig {
            detail: format!("Failed to parse config: {e}"),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn discover() -> Option<PathBuf> {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Some(local);
        }
        dirs::config_dir()
            .map(|d| d.join("kenja-admin").join("config.toml"))
            .filter(|p| p.exists())
    }

    fn validate(&self) -> Result<()> {
        if !token::is_valid_scheme_tag(&self.keys.scheme_tag) {
            return Err(AdminError::InvalidConfig {
                detail: format!(
                    "keys.scheme_tag '{}' must be non-empty ASCII letters, digits or '_'",
                    self.keys.scheme_tag
                ),
            });
        }

        let defaults = self.report_defaults();
        if defaults.start > defaults.end {
            return Err(AdminError::InvalidConfig {
                detail: format!(
                    "report.start {} is after report.end {} (unset bounds default to {} … {})",
                    defaults.start,
                    defaults.end,
                    ReportFilterState::default().start,
                    ReportFilterState::default().end,
                ),
            });
        }

        if let Some(department) = &self.report.department
            && department != "all"
        {
            parse_department(department).map_err(|e| AdminError::InvalidConfig {
                detail: format!("report.department: {e}"),
            })?;
        }

        Ok(())
    }

    /// Initial reporting state with configured overrides applied.
    pub fn report_defaults(&self) -> ReportFilterState {
        let base = ReportFilterState::default();
        ReportFilterState {
            report: base.report,
            start: self.report.start.unwrap_or(base.start),
            end: self.report.end.unwrap_or(base.end),
            department: match self.report.department.as_deref() {
                None | Some("all") => Selection::All,
                Some(d) => Selection::Only(d.to_string()),
            },
        }
    }
}

/// The `[keys]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeysSection {
    pub scheme_tag: String,
}

impl Default for KeysSection {
    fn default() -> Self {
        Self {
            scheme_tag: DEFAULT_SCHEME_TAG.to_string(),
        }
    }
}

/// The `[audit]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditSection {
    /// JSON-lines trail to browse instead of the built-in sample.
    pub source: Option<PathBuf>,
}

/// The `[report]` section. Dates are quoted `YYYY-MM-DD` strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportSection {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub department: Option<String>,
}
