//! Per-field canonicalization of JSON-RPC values.
//!
//! Endpoints disagree on how they print numbers: `"0x1c9c380"`, `"30000000"`
//! and `30000000` all show up for the same gas limit depending on the client
//! and the field. Every value goes through exactly one function here, chosen
//! by the field's declared [`FieldKind`], before it reaches the encoder.
//! Anything that cannot be canonicalized is an `EncodingMismatch` naming the
//! field.

use std::fmt;

use alloy_primitives::{Address, Bloom, Bytes, B256, B64, U256};
use bridgeproof_core::UnlockError;
use serde::{Deserialize, Serialize};

/// A numeric value as it appeared in the JSON: a number or a string that is
/// either `0x`-prefixed hex or plain decimal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawQuantity {
    Number(serde_json::Number),
    Text(String),
}

impl From<u64> for RawQuantity {
    fn from(value: u64) -> Self {
        RawQuantity::Number(value.into())
    }
}

impl From<&str> for RawQuantity {
    fn from(value: &str) -> Self {
        RawQuantity::Text(value.to_string())
    }
}

/// How a field must be canonicalized before encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// 32 bytes, fixed width.
    Hash,
    /// 20 bytes, fixed width.
    Address,
    /// 256 bytes, fixed width.
    Bloom,
    /// Arbitrary length byte string.
    Bytes,
    /// Unsigned integer, minimal big-endian on the wire.
    Integer,
    /// Integer that older blocks do not carry.
    OptionalInteger,
    /// Integer that newer blocks may leave out, meaning zero.
    DefaultedInteger,
    /// 8-byte proof-of-work nonce, fixed width.
    Nonce,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Hash => "32-byte hash",
            FieldKind::Address => "20-byte address",
            FieldKind::Bloom => "256-byte bloom",
            FieldKind::Bytes => "hex bytes",
            FieldKind::Integer => "unsigned integer",
            FieldKind::OptionalInteger => "optional unsigned integer",
            FieldKind::DefaultedInteger => "unsigned integer or null",
            FieldKind::Nonce => "8-byte nonce",
        };
        f.write_str(name)
    }
}

fn mismatch(field: &str, kind: FieldKind, reason: impl fmt::Display) -> UnlockError {
    UnlockError::encoding(field, format!("expected {kind}: {reason}"))
}

fn decode_hex(field: &str, kind: FieldKind, s: &str) -> Result<Vec<u8>, UnlockError> {
    let s = s.trim();
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .ok_or_else(|| mismatch(field, kind, format!("{s:?} has no 0x prefix")))?;
    hex::decode(digits).map_err(|e| mismatch(field, kind, format!("{s:?}: {e}")))
}

fn decode_fixed<const N: usize>(
    field: &str,
    kind: FieldKind,
    s: &str,
) -> Result<[u8; N], UnlockError> {
    let bytes = decode_hex(field, kind, s)?;
    <[u8; N]>::try_from(bytes.as_slice())
        .map_err(|_| mismatch(field, kind, format!("got {} bytes", bytes.len())))
}

pub fn hash(field: &str, s: &str) -> Result<B256, UnlockError> {
    decode_fixed::<32>(field, FieldKind::Hash, s).map(B256::from)
}

pub fn optional_hash(field: &str, s: Option<&str>) -> Result<Option<B256>, UnlockError> {
    s.map(|s| hash(field, s)).transpose()
}

pub fn address(field: &str, s: &str) -> Result<Address, UnlockError> {
    decode_fixed::<20>(field, FieldKind::Address, s).map(Address::from)
}

pub fn bloom(field: &str, s: &str) -> Result<Bloom, UnlockError> {
    decode_fixed::<256>(field, FieldKind::Bloom, s).map(Bloom::from)
}

pub fn bytes(field: &str, s: &str) -> Result<Bytes, UnlockError> {
    decode_hex(field, FieldKind::Bytes, s).map(Bytes::from)
}

/// Parse a quantity of any supported form into a 256-bit integer.
pub fn integer(field: &str, value: &RawQuantity) -> Result<U256, UnlockError> {
    parse_quantity(field, FieldKind::Integer, value)
}

/// [`integer`] for fields the header stores as 64-bit values.
pub fn integer_u64(field: &str, value: &RawQuantity) -> Result<u64, UnlockError> {
    narrow(field, FieldKind::Integer, integer(field, value)?)
}

/// Absent and `null` both mean the block predates the field.
pub fn optional_integer(field: &str, value: Option<&RawQuantity>) -> Result<Option<u64>, UnlockError> {
    value
        .map(|v| {
            let wide = parse_quantity(field, FieldKind::OptionalInteger, v)?;
            narrow(field, FieldKind::OptionalInteger, wide)
        })
        .transpose()
}

/// Absent and `null` both mean zero, as for post-merge difficulty.
pub fn integer_or_zero(field: &str, value: Option<&RawQuantity>) -> Result<U256, UnlockError> {
    value.map_or(Ok(U256::ZERO), |v| {
        parse_quantity(field, FieldKind::DefaultedInteger, v)
    })
}

/// The header nonce is a fixed 8-byte string, but some endpoints print it as
/// a trimmed quantity. Both forms are left-padded to 8 bytes.
pub fn nonce(field: &str, value: &RawQuantity) -> Result<B64, UnlockError> {
    let wide = parse_quantity(field, FieldKind::Nonce, value)?;
    let narrow = narrow(field, FieldKind::Nonce, wide)?;
    Ok(B64::from(narrow.to_be_bytes()))
}

fn parse_quantity(field: &str, kind: FieldKind, value: &RawQuantity) -> Result<U256, UnlockError> {
    match value {
        RawQuantity::Number(n) => n
            .as_u64()
            .map(U256::from)
            .ok_or_else(|| mismatch(field, kind, format!("{n} is not a non-negative integer"))),
        RawQuantity::Text(s) => {
            let s = s.trim();
            let (digits, radix) = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
                Some(hex_digits) => (hex_digits, 16),
                None => (s, 10),
            };
            if digits.is_empty() {
                // "0x" alone is how some clients print zero
                return if radix == 16 {
                    Ok(U256::ZERO)
                } else {
                    Err(mismatch(field, kind, "empty string"))
                };
            }
            U256::from_str_radix(digits, radix)
                .map_err(|e| mismatch(field, kind, format!("{s:?}: {e}")))
        }
    }
}

fn narrow(field: &str, kind: FieldKind, value: U256) -> Result<u64, UnlockError> {
    if value > U256::from(u64::MAX) {
        return Err(mismatch(field, kind, format!("{value} does not fit in 64 bits")));
    }
    Ok(value.as_limbs()[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_accepts_all_forms() {
        let forms = [
            RawQuantity::from(30_000_000),
            RawQuantity::from("30000000"),
            RawQuantity::from("0x1c9c380"),
            RawQuantity::from("0X1C9C380"),
            RawQuantity::from(" 0x1c9c380 "),
        ];
        for form in &forms {
            assert_eq!(integer_u64("gasLimit", form).unwrap(), 30_000_000);
        }
    }

    #[test]
    fn test_integer_zero_forms() {
        for form in ["0x0", "0x", "0", "0x00"] {
            assert_eq!(integer("difficulty", &RawQuantity::from(form)).unwrap(), U256::ZERO);
        }
    }

    #[test]
    fn test_integer_rejects_garbage() {
        for form in ["", "0xzz", "-1", "1.5", "twelve"] {
            let err = integer("gasUsed", &RawQuantity::from(form)).unwrap_err();
            assert!(matches!(err, UnlockError::EncodingMismatch { ref field, .. } if field == "gasUsed"));
        }
        let negative: RawQuantity = serde_json::from_str("-5").unwrap();
        assert!(integer("gasUsed", &negative).is_err());
        let float: RawQuantity = serde_json::from_str("1.5").unwrap();
        assert!(integer("gasUsed", &float).is_err());
    }

    #[test]
    fn test_integer_u64_overflow() {
        let too_big = RawQuantity::from("0x10000000000000000");
        assert!(integer("timestamp", &too_big).is_ok());
        assert!(integer_u64("timestamp", &too_big).is_err());
    }

    #[test]
    fn test_optional_integer() {
        assert_eq!(optional_integer("baseFeePerGas", None).unwrap(), None);
        assert_eq!(
            optional_integer("baseFeePerGas", Some(&RawQuantity::from("0x7"))).unwrap(),
            Some(7)
        );
    }

    #[test]
    fn test_integer_or_zero() {
        assert_eq!(integer_or_zero("difficulty", None).unwrap(), U256::ZERO);
        assert_eq!(
            integer_or_zero("difficulty", Some(&RawQuantity::from("0x20000"))).unwrap(),
            U256::from(0x20000u64)
        );
        let err = integer_or_zero("difficulty", Some(&RawQuantity::from("zero"))).unwrap_err();
        assert!(err.to_string().contains("unsigned integer or null"));
    }

    #[test]
    fn test_fixed_width_lengths() {
        let h = format!("0x{}", "11".repeat(32));
        assert_eq!(hash("stateRoot", &h).unwrap(), B256::repeat_byte(0x11));
        assert!(hash("stateRoot", &format!("0x{}", "11".repeat(31))).is_err());
        assert!(hash("stateRoot", &"11".repeat(32)).is_err());

        let a = format!("0x{}", "95222290dd7278aa3ddd389cc1e1d165cc4bafe5");
        assert_eq!(address("miner", &a).unwrap().as_slice()[0], 0x95);
        assert!(address("miner", "0x1234").is_err());

        assert_eq!(bloom("logsBloom", &format!("0x{}", "00".repeat(256))).unwrap(), Bloom::ZERO);
        assert!(bloom("logsBloom", "0x00").is_err());
    }

    #[test]
    fn test_nonce_forms() {
        assert_eq!(nonce("nonce", &RawQuantity::from("0x0000000000000000")).unwrap(), B64::ZERO);
        assert_eq!(nonce("nonce", &RawQuantity::from("0x0")).unwrap(), B64::ZERO);
        assert_eq!(
            nonce("nonce", &RawQuantity::from("0x0000000000000042")).unwrap(),
            B64::from([0, 0, 0, 0, 0, 0, 0, 0x42])
        );
    }

    #[test]
    fn test_bytes_and_empty() {
        assert_eq!(bytes("extraData", "0x").unwrap(), Bytes::new());
        assert_eq!(bytes("extraData", "0x6265").unwrap(), Bytes::from(vec![0x62, 0x65]));
        assert!(bytes("extraData", "0x6").is_err());
    }
}
