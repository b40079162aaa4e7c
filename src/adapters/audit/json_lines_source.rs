use std::fs;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use crate::core::errors::{AdminError, Result};
use crate::core::models::audit_entry::AuditEntry;
use crate::core::services::audit_filter::AuditFilter;
use crate::core::traits::audit_source::AuditSource;

/// Audit source reading an exported trail, one JSON object per line.
///
/// Field names follow the export format (`userName`, `ipAddress`,
/// `result`, ...). Blank lines are skipped; a malformed line aborts the
/// read with its line number.
pub struct JsonLinesAuditSource {
    path: PathBuf,
}

impl JsonLinesAuditSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AuditSource for JsonLinesAuditSource {
    fn fetch(&self, filter: &AuditFilter) -> Result<Vec<AuditEntry>> {
        let file = fs::File::open(&self.path).map_err(|e| AdminError::AuditSource {
            detail: format!("Cannot read {}: {e}", self.path.display()),
        })?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| AdminError::AuditSource {
                detail: format!("Error reading line {}: {e}", line_num + 1),
            })?;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let entry: AuditEntry =
                serde_json::from_str(trimmed).map_err(|e| AdminError::AuditSource {
                    detail: format!("Malformed audit entry at line {}: {e}", line_num + 1),
                })?;

            if filter.matches(&entry) {
                entries.push(entry);
            }
        }

        tracing::debug!(
            path = %self.path.display(),
            matched = entries.len(),
            "audit entries loaded"
        );
        Ok(entries)
    }
}
