use rand::Rng;

use crate::core::services::token::{self, DEFAULT_SCHEME_TAG, SECRET_BYTES};
use crate::core::traits::token_generator::TokenGenerator;

/// Token generator drawing from the thread-local CSPRNG (OS-seeded).
pub struct SecureTokenGenerator {
    scheme_tag: String,
}

impl SecureTokenGenerator {
    pub fn new(scheme_tag: impl Into<String>) -> Self {
        Self {
            scheme_tag: scheme_tag.into(),
        }
    }
}

impl Default for SecureTokenGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SCHEME_TAG)
    }
}

impl TokenGenerator for SecureTokenGenerator {
    fn secret(&self) -> String {
        let bytes: [u8; SECRET_BYTES] = rand::rng().random();
        token::format_secret(&self.scheme_tag, &bytes)
    }

    fn key_id(&self) -> String {
        let bytes: [u8; 8] = rand::rng().random();
        hex::encode(bytes)
    }
}
