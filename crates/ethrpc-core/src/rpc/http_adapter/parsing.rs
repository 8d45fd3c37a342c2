use crate::error::{CoreError, RpcError};

/// Why a hex quantity could not be decoded. Messages follow the wording
/// Ethereum nodes use for the same violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HexError {
    #[error("empty hex string")]
    Empty,

    #[error("hex string without 0x prefix")]
    MissingPrefix,

    #[error("hex string \"0x\"")]
    EmptyNumber,

    #[error("hex number with leading zero digits")]
    LeadingZero,

    #[error("invalid hex string")]
    InvalidDigit,

    #[error("hex number > 64 bits")]
    Overflow,
}

/// Decode a `0x`-prefixed hex quantity into a `u64`.
///
/// Quantities are minimal: `0x0` is valid, `0x00` and `0x01` are not.
pub fn parse_hex_u64(input: &str) -> Result<u64, HexError> {
    if input.is_empty() {
        return Err(HexError::Empty);
    }
    let digits = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .ok_or(HexError::MissingPrefix)?;
    if digits.is_empty() {
        return Err(HexError::EmptyNumber);
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(HexError::LeadingZero);
    }

    // Left to right: whichever violation comes first wins.
    digits.chars().try_fold(0u64, |value, c| {
        let digit = c.to_digit(16).ok_or(HexError::InvalidDigit)?;
        value
            .checked_mul(16)
            .and_then(|v| v.checked_add(u64::from(digit)))
            .ok_or(HexError::Overflow)
    })
}

/// Decode a result that must be a JSON string, returned verbatim.
pub(super) fn decode_string_result(
    method: &'static str,
    raw: serde_json::Value,
) -> Result<String, CoreError> {
    match raw {
        serde_json::Value::String(s) => Ok(s),
        other => Err(RpcError::InvalidResult {
            method,
            message: format!("expected JSON string, got: {other}"),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_u64_zero() {
        assert_eq!(parse_hex_u64("0x0"), Ok(0));
    }

    #[test]
    fn parse_hex_u64_mixed_case() {
        assert_eq!(parse_hex_u64("0x1aF"), Ok(0x1af));
        assert_eq!(parse_hex_u64("0X10"), Ok(16));
    }

    #[test]
    fn parse_hex_u64_max() {
        assert_eq!(parse_hex_u64("0xffffffffffffffff"), Ok(u64::MAX));
    }

    #[test]
    fn parse_hex_u64_overflow() {
        assert_eq!(parse_hex_u64("0x10000000000000000"), Err(HexError::Overflow));
    }

    #[test]
    fn parse_hex_u64_reports_first_violation() {
        assert_eq!(parse_hex_u64("0x10000000000000000z"), Err(HexError::Overflow));
        assert_eq!(parse_hex_u64("0xz0000000000000000"), Err(HexError::InvalidDigit));
        assert_eq!(parse_hex_u64("0xfz"), Err(HexError::InvalidDigit));
    }

    #[test]
    fn parse_hex_u64_rejects_malformed() {
        assert_eq!(parse_hex_u64(""), Err(HexError::Empty));
        assert_eq!(parse_hex_u64("12"), Err(HexError::MissingPrefix));
        assert_eq!(parse_hex_u64("0x"), Err(HexError::EmptyNumber));
        assert_eq!(parse_hex_u64("0x00"), Err(HexError::LeadingZero));
        assert_eq!(parse_hex_u64("0xzz"), Err(HexError::InvalidDigit));
        assert_eq!(parse_hex_u64("0x+1"), Err(HexError::InvalidDigit));
    }

    #[test]
    fn hex_error_wording_matches_node() {
        assert!(HexError::MissingPrefix
            .to_string()
            .contains("without 0x prefix"));
    }

    #[test]
    fn decode_string_result_passthrough() {
        let raw = serde_json::json!("0x56bc75e2d63100000");
        let decoded = decode_string_result("eth_getBalance", raw).expect("should decode");
        assert_eq!(decoded, "0x56bc75e2d63100000");
    }

    #[test]
    fn decode_string_result_rejects_null() {
        let err = decode_string_result("eth_getBalance", serde_json::Value::Null)
            .expect_err("null is not a string");
        assert!(matches!(
            err,
            CoreError::Rpc(RpcError::InvalidResult { method: "eth_getBalance", .. })
        ));
    }
}
