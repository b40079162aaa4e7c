use chrono::{TimeZone, Utc};

use crate::core::errors::Result;
use crate::core::models::audit_entry::{AuditAction, AuditEntry, AuditOutcome};
use crate::core::services::audit_filter::AuditFilter;
use crate::core::traits::audit_source::AuditSource;

/// Audit source backed by an in-memory collection.
pub struct FixtureAuditSource {
    entries: Vec<AuditEntry>,
}

impl FixtureAuditSource {
    pub fn new(entries: Vec<AuditEntry>) -> Self {
        Self { entries }
    }

    /// The built-in sample trail.
    pub fn sample() -> Self {
        Self::new(sample_entries())
    }
}

impl AuditSource for FixtureAuditSource {
    fn fetch(&self, filter: &AuditFilter) -> Result<Vec<AuditEntry>> {
        Ok(filter.apply(&self.entries).into_iter().cloned().collect())
    }
}

#[allow(clippy::too_many_arguments)]
fn entry(
    id: &str,
    (y, mo, d, h, mi): (i32, u32, u32, u32, u32),
    user: (&str, &str),
    action: AuditAction,
    resource: (&str, &str),
    ip_address: &str,
    user_agent: &str,
    outcome: AuditOutcome,
    details: &str,
) -> AuditEntry {
    AuditEntry {
        id: id.to_string(),
        timestamp: Utc
            .with_ymd_and_hms(y, mo, d, h, mi, 0)
            .single()
            .unwrap_or_default(),
        user_id: user.0.to_string(),
        user_name: user.1.to_string(),
        action,
        resource: resource.0.to_string(),
        resource_id: resource.1.to_string(),
        ip_address: ip_address.to_string(),
        user_agent: user_agent.to_string(),
        outcome,
        details: details.to_string(),
    }
}

/// Four sample records spanning 2024-07-19 and 2024-07-20, newest first.
pub fn sample_entries() -> Vec<AuditEntry> {
    vec![
        entry(
            "1",
            (2024, 7, 20, 14, 30),
            ("user-001", "田中太郎"),
            AuditAction::ApplicationApproved,
            ("business_trip_application", "BT-2024-001"),
            "192.168.1.100",
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
            AuditOutcome::Success,
            "東京出張申請を承認",
        ),
        entry(
            "2",
            (2024, 7, 20, 10, 15),
            ("user-002", "佐藤花子"),
            AuditAction::UserLogin,
            ("authentication", "auth-session-001"),
            "192.168.1.105",
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36",
            AuditOutcome::Success,
            "ユーザーログイン成功",
        ),
        entry(
            "3",
            (2024, 7, 20, 9, 45),
            ("user-003", "鈴木次郎"),
            AuditAction::RegulationUpdated,
            ("travel_regulation", "REG-2024-001"),
            "192.168.1.110",
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
            AuditOutcome::Success,
            "出張規程v3.0を更新",
        ),
        entry(
            "4",
            (2024, 7, 19, 16, 20),
            ("user-004", "高橋美咲"),
            AuditAction::LoginFailed,
            ("authentication", "auth-attempt-001"),
            "203.0.113.1",
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15",
            AuditOutcome::Failure,
            "パスワード認証失敗（3回目）",
        ),
    ]
}
