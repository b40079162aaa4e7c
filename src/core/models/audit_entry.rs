use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::errors::AdminError;

/// Audit event categories recorded by the expense system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    UserLogin,
    UserLogout,
    LoginFailed,
    ApplicationCreated,
    ApplicationApproved,
    ApplicationRejected,
    RegulationCreated,
    RegulationUpdated,
    UserInvited,
    SettingsChanged,
}

/// Display classification of an action code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionTone {
    Danger,
    Positive,
    Session,
    Neutral,
}

impl AuditAction {
    pub const ALL: [AuditAction; 10] = [
        AuditAction::UserLogin,
        AuditAction::UserLogout,
        AuditAction::LoginFailed,
        AuditAction::ApplicationCreated,
        AuditAction::ApplicationApproved,
        AuditAction::ApplicationRejected,
        AuditAction::RegulationCreated,
        AuditAction::RegulationUpdated,
        AuditAction::UserInvited,
        AuditAction::SettingsChanged,
    ];

    /// The wire code, e.g. `USER_LOGIN`.
    pub fn code(&self) -> &'static str {
        match self {
            AuditAction::UserLogin => "USER_LOGIN",
            AuditAction::UserLogout => "USER_LOGOUT",
            AuditAction::LoginFailed => "LOGIN_FAILED",
            AuditAction::ApplicationCreated => "APPLICATION_CREATED",
            AuditAction::ApplicationApproved => "APPLICATION_APPROVED",
            AuditAction::ApplicationRejected => "APPLICATION_REJECTED",
            AuditAction::RegulationCreated => "REGULATION_CREATED",
            AuditAction::RegulationUpdated => "REGULATION_UPDATED",
            AuditAction::UserInvited => "USER_INVITED",
            AuditAction::SettingsChanged => "SETTINGS_CHANGED",
        }
    }

    /// Human-readable label shown in listings.
    pub fn label(&self) -> &'static str {
        match self {
            AuditAction::UserLogin => "ユーザーログイン",
            AuditAction::UserLogout => "ユーザーログアウト",
            AuditAction::LoginFailed => "ログイン失敗",
            AuditAction::ApplicationCreated => "申請作成",
            AuditAction::ApplicationApproved => "申請承認",
            AuditAction::ApplicationRejected => "申請否認",
            AuditAction::RegulationCreated => "規程作成",
            AuditAction::RegulationUpdated => "規程更新",
            AuditAction::UserInvited => "ユーザー招待",
            AuditAction::SettingsChanged => "設定変更",
        }
    }

    /// Classify by keyword in the code. First match wins.
    pub fn tone(&self) -> ActionTone {
        let code = self.code();
        if code.contains("FAILED") || code.contains("REJECTED") {
            ActionTone::Danger
        } else if code.contains("APPROVED") || code.contains("SUCCESS") {
            ActionTone::Positive
        } else if code.contains("LOGIN") || code.contains("LOGOUT") {
            ActionTone::Session
        } else {
            ActionTone::Neutral
        }
    }

    /// Comma-separated list of all codes, for error messages.
    pub fn catalog() -> String {
        Self::ALL
            .iter()
            .map(|a| a.code())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for AuditAction {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AdminError::UnknownAction {
                code: wanted.to_string(),
                available: Self::catalog(),
            })
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Result of the audited operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditOutcome {
    Success,
    Failure,
}

impl AuditOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            AuditOutcome::Success => "成功",
            AuditOutcome::Failure => "失敗",
        }
    }
}

/// A single immutable audit trail record (JSON lines format).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub user_id: String,
    pub user_name: String,
    pub action: AuditAction,
    pub resource: String,
    pub resource_id: String,
    pub ip_address: String,
    pub user_agent: String,
    #[serde(rename = "result")]
    pub outcome: AuditOutcome,
    pub details: String,
}

impl AuditEntry {
    /// Text surfaced by the "show detail" action.
    pub fn detail_text(&self) -> String {
        format!("詳細: {}\nUser Agent: {}", self.details, self.user_agent)
    }
}
