use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::errors::AdminError;
use crate::core::services::token;

/// Capabilities grantable to an API key.
///
/// Declaration order is catalog order; permission sets sort by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Permission {
    #[serde(rename = "read:applications")]
    ReadApplications,
    #[serde(rename = "write:applications")]
    WriteApplications,
    #[serde(rename = "read:users")]
    ReadUsers,
    #[serde(rename = "write:users")]
    WriteUsers,
    #[serde(rename = "read:expenses")]
    ReadExpenses,
    #[serde(rename = "write:expenses")]
    WriteExpenses,
    #[serde(rename = "read:reports")]
    ReadReports,
    #[serde(rename = "admin:all")]
    AdminAll,
}

impl Permission {
    pub const ALL: [Permission; 8] = [
        Permission::ReadApplications,
        Permission::WriteApplications,
        Permission::ReadUsers,
        Permission::WriteUsers,
        Permission::ReadExpenses,
        Permission::WriteExpenses,
        Permission::ReadReports,
        Permission::AdminAll,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Permission::ReadApplications => "read:applications",
            Permission::WriteApplications => "write:applications",
            Permission::ReadUsers => "read:users",
            Permission::WriteUsers => "write:users",
            Permission::ReadExpenses => "read:expenses",
            Permission::WriteExpenses => "write:expenses",
            Permission::ReadReports => "read:reports",
            Permission::AdminAll => "admin:all",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Permission::ReadApplications => "申請データ読み取り",
            Permission::WriteApplications => "申請データ書き込み",
            Permission::ReadUsers => "ユーザー情報読み取り",
            Permission::WriteUsers => "ユーザー情報書き込み",
            Permission::ReadExpenses => "経費データ読み取り",
            Permission::WriteExpenses => "経費データ書き込み",
            Permission::ReadReports => "レポートデータ読み取り",
            Permission::AdminAll => "管理者権限（全操作）",
        }
    }
}

impl FromStr for Permission {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.code() == wanted)
            .ok_or_else(|| AdminError::UnknownPermission {
                code: wanted.to_string(),
                available: Self::ALL
                    .iter()
                    .map(|p| p.code())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// An API key issued to an external integration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiKeyRecord {
    pub id: String,
    pub name: String,
    pub secret: String,
    pub permissions: BTreeSet<Permission>,
    pub created_at: DateTime<Utc>,
    pub last_used: Option<DateTime<Utc>>,
    pub active: bool,
    pub usage_count: u64,
}

impl ApiKeyRecord {
    /// The secret as shown when not revealed.
    pub fn masked_secret(&self) -> String {
        token::mask_secret(&self.secret)
    }

    /// Status label for listings.
    pub fn status_label(&self) -> &'static str {
        if self.active { "アクティブ" } else { "無効" }
    }
}

impl std::fmt::Display for ApiKeyRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
