use std::str::FromStr;

use crate::core::errors::AdminError;

/// Screens reachable through navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    AdvancedReporting,
    ApiManagement,
    AuditLogs,
}

impl View {
    pub const ALL: [View; 4] = [
        View::Dashboard,
        View::AdvancedReporting,
        View::ApiManagement,
        View::AuditLogs,
    ];

    /// Navigation identifier.
    pub fn id(&self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::AdvancedReporting => "advanced-reporting",
            View::ApiManagement => "api-management",
            View::AuditLogs => "audit-logs",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Dashboard => "ダッシュボード",
            View::AdvancedReporting => "高度なレポート",
            View::ApiManagement => "API管理",
            View::AuditLogs => "監査ログ",
        }
    }
}

impl FromStr for View {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|v| v.id() == wanted)
            .ok_or_else(|| AdminError::UnknownView {
                name: wanted.to_string(),
                available: Self::ALL
                    .iter()
                    .map(|v| v.id())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
