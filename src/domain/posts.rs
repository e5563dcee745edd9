//! Post content limits.

use thiserror::Error;

pub const DEFAULT_MAX_TEXT_BYTES: usize = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("post text is {len} bytes, limit is {limit} bytes")]
pub struct TextTooLarge {
    pub len: usize,
    pub limit: usize,
}

/// The limit is measured in UTF-8 bytes and is inclusive.
pub fn ensure_text_within(text: &str, limit: usize) -> Result<(), TextTooLarge> {
    let len = text.len();
    if len > limit {
        return Err(TextTooLarge { len, limit });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_is_inclusive() {
        let exact = "a".repeat(DEFAULT_MAX_TEXT_BYTES);
        assert!(ensure_text_within(&exact, DEFAULT_MAX_TEXT_BYTES).is_ok());

        let over = "a".repeat(DEFAULT_MAX_TEXT_BYTES + 1);
        let err = ensure_text_within(&over, DEFAULT_MAX_TEXT_BYTES).unwrap_err();
        assert_eq!(err.len, DEFAULT_MAX_TEXT_BYTES + 1);
        assert_eq!(err.limit, DEFAULT_MAX_TEXT_BYTES);
    }

    #[test]
    fn multibyte_text_is_measured_in_bytes() {
        // 3 bytes per character
        let text = "€".repeat(4);
        assert!(ensure_text_within(&text, 12).is_ok());
        assert!(ensure_text_within(&text, 11).is_err());
    }
}
