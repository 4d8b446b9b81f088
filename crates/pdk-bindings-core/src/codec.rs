//! JSON wire encoding.
//!
//! Every typed value crosses the boundary as UTF-8 JSON. Records serialize as
//! field-keyed objects, enums as their wire name (see [`crate::WireEnum`]) and
//! byte buffers as arrays of integers.

use serde::Serialize;
use serde::de::DeserializeOwned;

use pdk_bindings_common::CodecError;

/// Serialize `value` to JSON bytes.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(value).map_err(|e| CodecError::serialize(e.to_string()))
}

/// Deserialize a JSON buffer.
///
/// An empty buffer is reported as [`CodecError::Empty`] rather than as a
/// parse error, so callers can tell "nothing" from "garbage".
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    if bytes.is_empty() {
        return Err(CodecError::Empty);
    }
    serde_json::from_slice(bytes).map_err(|e| CodecError::malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_primitives() {
        assert_eq!(encode("hello").unwrap(), br#""hello""#);
        assert_eq!(encode(&[true, false]).unwrap(), b"[true,false]");
        assert_eq!(encode(&vec![1u8, 2, 3]).unwrap(), b"[1,2,3]");
    }

    #[test]
    fn test_decode_empty() {
        let result = decode::<bool>(b"");
        assert!(matches!(result, Err(CodecError::Empty)));
    }

    #[test]
    fn test_decode_malformed() {
        let result = decode::<String>(b"not json");
        assert!(matches!(result, Err(CodecError::Malformed { .. })));
    }

    #[test]
    fn test_decode_wrong_type() {
        let result = decode::<bool>(br#""true""#);
        assert!(matches!(result, Err(CodecError::Malformed { .. })));
    }

    #[test]
    fn test_decode_values() {
        assert!(decode::<bool>(b"true").unwrap());
        assert_eq!(decode::<String>(br#""hi""#).unwrap(), "hi");
        assert_eq!(decode::<Vec<u8>>(b"[118,97]").unwrap(), b"va");
    }
}
