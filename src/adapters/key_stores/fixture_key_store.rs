use std::collections::BTreeSet;

use chrono::{DateTime, TimeZone, Utc};

use crate::core::errors::Result;
use crate::core::models::api_key::{ApiKeyRecord, Permission};
use crate::core::traits::key_store::KeyStore;

/// Seeds a session with the two integration keys of the sample tenant.
#[derive(Clone, Copy, Default)]
pub struct FixtureKeyStore;

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .unwrap_or_default()
}

impl KeyStore for FixtureKeyStore {
    fn load(&self) -> Result<Vec<ApiKeyRecord>> {
        Ok(vec![
            ApiKeyRecord {
                id: "1".to_string(),
                name: "メインAPI".to_string(),
                secret: "kenja_live_1234567890abcdef1234567890abcdef".to_string(),
                permissions: BTreeSet::from([
                    Permission::ReadApplications,
                    Permission::WriteApplications,
                    Permission::ReadUsers,
                ]),
                created_at: at(2024, 7, 1, 10, 0),
                last_used: Some(at(2024, 7, 20, 14, 30)),
                active: true,
                usage_count: 1250,
            },
            ApiKeyRecord {
                id: "2".to_string(),
                name: "会計ソフト連携".to_string(),
                secret: "kenja_live_abcdef1234567890abcdef1234567890".to_string(),
                permissions: BTreeSet::from([
                    Permission::ReadApplications,
                    Permission::ReadExpenses,
                ]),
                created_at: at(2024, 6, 15, 9, 0),
                last_used: Some(at(2024, 7, 19, 16, 45)),
                active: true,
                usage_count: 856,
            },
        ])
    }
}
