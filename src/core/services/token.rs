/// Scheme tag every secret starts with unless configured otherwise.
pub const DEFAULT_SCHEME_TAG: &str = "kenja_live_";

/// Random bytes behind each secret (hex-encoded to 32 chars).
pub const SECRET_BYTES: usize = 16;

const VISIBLE_HEAD: usize = 12;
const VISIBLE_TAIL: usize = 8;

/// Number of mask characters, independent of the hidden length.
pub const MASK_WIDTH: usize = 20;

/// Format a secret from its scheme tag and random bytes.
pub fn format_secret(scheme_tag: &str, bytes: &[u8]) -> String {
    format!("{scheme_tag}{}", hex::encode(bytes))
}

/// Mask a secret for display.
///
/// Keeps the first 12 and last 8 characters and replaces the interior with
/// exactly [`MASK_WIDTH`] asterisks. Secrets too short to keep both ends
/// are masked completely.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    let mask = "*".repeat(MASK_WIDTH);
    if chars.len() < VISIBLE_HEAD + VISIBLE_TAIL {
        return mask;
    }

    let head: String = chars[..VISIBLE_HEAD].iter().collect();
    let tail: String = chars[chars.len() - VISIBLE_TAIL..].iter().collect();
    format!("{head}{mask}{tail}")
}

/// Validate a configured scheme tag.
pub fn is_valid_scheme_tag(tag: &str) -> bool {
    !tag.is_empty() && tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_keeps_head_and_tail() {
        let secret = "kenja_live_1234567890abcdef1234567890abcdef";
        let masked = mask_secret(secret);
        assert_eq!(masked, "kenja_live_1********************90abcdef");
    }

    #[test]
    fn mask_width_is_fixed_regardless_of_length() {
        let short = "abcdefghijkl12345678";
        let long = format!("abcdefghijkl{}12345678", "x".repeat(200));
        let masked_short = mask_secret(short);
        let masked_long = mask_secret(&long);

        assert_eq!(masked_short.len(), VISIBLE_HEAD + MASK_WIDTH + VISIBLE_TAIL);
        assert_eq!(masked_long.len(), masked_short.len());
        assert!(masked_long.starts_with("abcdefghijkl"));
        assert!(masked_long.ends_with("12345678"));
    }

    #[test]
    fn mask_hides_short_secrets_entirely() {
        assert_eq!(mask_secret("tiny"), "*".repeat(MASK_WIDTH));
    }

    #[test]
    fn format_secret_hex_encodes_bytes() {
        let secret = format_secret(DEFAULT_SCHEME_TAG, &[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(secret, "kenja_live_deadbeef");
    }

    #[test]
    fn scheme_tag_validation() {
        assert!(is_valid_scheme_tag("kenja_test_"));
        assert!(!is_valid_scheme_tag(""));
        assert!(!is_valid_scheme_tag("bad tag"));
    }
}
