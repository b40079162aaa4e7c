use crate::core::errors::Result;
use crate::core::models::api_key::ApiKeyRecord;

/// Port for seeding the API key collection at the start of a session.
pub trait KeyStore: Send + Sync {
    /// Load the initial set of keys.
    fn load(&self) -> Result<Vec<ApiKeyRecord>>;
}
