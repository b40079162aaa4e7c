use std::path::PathBuf;

/// All domain errors for kenja-admin.
///
/// Validation failures are surfaced to the user immediately and never
/// retried. Each variant carries enough context to fix the input.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("{message}")]
    Validation { message: String },

    #[error(
        "API key '{id}' not found\n\n  \
         Run 'list' in the api-management view to see existing keys."
    )]
    KeyNotFound { id: String },

    #[error("Audit entry '{id}' not found")]
    EntryNotFound { id: String },

    #[error(
        "Unknown view '{name}'\n\n  \
         Available views: {available}"
    )]
    UnknownView { name: String, available: String },

    #[error(
        "Unknown report type '{name}'\n\n  \
         Available report types: {available}"
    )]
    UnknownReportType { name: String, available: String },

    #[error(
        "Unknown audit action '{code}'\n\n  \
         Use 'all' or one of: {available}"
    )]
    UnknownAction { code: String, available: String },

    #[error(
        "Unknown permission '{code}'\n\n  \
         Available permissions: {available}"
    )]
    UnknownPermission { code: String, available: String },

    #[error(
        "Unknown department '{name}'\n\n  \
         Use 'all' or one of: {available}"
    )]
    UnknownDepartment { name: String, available: String },

    #[error("Unknown export format '{format}'. Expected one of: csv, excel, pdf")]
    UnknownExportFormat { format: String },

    #[error(
        "Invalid date: '{input}'\n\n  \
         Expected YYYY-MM-DD (e.g. 2024-07-20) or an RFC 3339 timestamp \
         (e.g. 2024-07-20T14:30:00Z)."
    )]
    InvalidDate { input: String },

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: String, end: String },

    #[error("Nothing to confirm: no deletion is pending")]
    NoPendingConfirmation,

    #[error("Could not generate a unique API key after {attempts} attempts")]
    TokenCollision { attempts: usize },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error(
        "Config file not found: {path}\n\n  \
         Check the --config flag or the KENJA_CONFIG variable."
    )]
    ConfigNotFound { path: PathBuf },

    #[error("Audit source error: {detail}")]
    AuditSource { detail: String },

    #[error("Clipboard error: {detail}")]
    Clipboard { detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AdminError {
    /// Shorthand for a user-facing validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// True for failures caused by user input rather than the environment.
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            Self::Io(_)
                | Self::Clipboard { .. }
                | Self::AuditSource { .. }
                | Self::ConfigNotFound { .. }
                | Self::InvalidConfig { .. }
                | Self::TokenCollision { .. }
        )
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AdminError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_classified() {
        assert!(AdminError::validation("name required").is_validation());
        assert!(
            AdminError::KeyNotFound { id: "9".into() }.is_validation()
        );
        assert!(
            !AdminError::Clipboard {
                detail: "closed".into()
            }
            .is_validation()
        );
    }

    #[test]
    fn validation_message_is_displayed_verbatim() {
        let err = AdminError::validation("名前と権限を設定してください");
        assert_eq!(
            err.to_string(),
            "名前と権限を設定してください"
        );
    }
}
