//! Schema types.

use serde::{Deserialize, Serialize};

use pdk_bindings_core::wire_enum;

wire_enum! {
    /// A set of available fruits you can consume.
    pub enum Fruit {
        Apple => "apple",
        Orange => "orange",
        Banana => "banana",
        Strawberry => "strawberry",
    }
}

wire_enum! {
    /// A set of all the enemies of pac-man.
    pub enum GhostGang {
        Blinky => "blinky",
        Pinky => "pinky",
        Inky => "inky",
        Clyde => "clyde",
    }
}

/// Parameters to write to the kv store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteParams {
    /// The key.
    pub key: String,
    /// The value, serialized as an array of byte values.
    pub value: Vec<u8>,
}

/// A complex json object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexObject {
    /// A set of parameters for a kv write.
    pub write_params: WriteParams,
    /// A free-form string.
    pub a_string: String,
    /// A date-time string, omitted from the JSON when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub an_optional_date: Option<String>,
    /// A ghost, sent by name.
    pub ghost: GhostGang,
    /// A 32-bit signed integer.
    pub an_int: i32,
    /// A flag.
    pub a_boolean: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdk_bindings_core::{WireEnum, codec};

    fn sample(ghost: GhostGang, date: Option<&str>) -> ComplexObject {
        ComplexObject {
            write_params: WriteParams {
                key: "k".into(),
                value: vec![0, 127, 255],
            },
            a_string: "s".into(),
            an_optional_date: date.map(String::from),
            ghost,
            an_int: -7,
            a_boolean: false,
        }
    }

    #[test]
    fn test_enum_names() {
        assert_eq!(Fruit::NAMES, ["apple", "orange", "banana", "strawberry"]);
        assert_eq!(GhostGang::NAMES, ["blinky", "pinky", "inky", "clyde"]);
    }

    #[test]
    fn test_every_enum_variant_round_trips() {
        for fruit in Fruit::VARIANTS {
            let bytes = codec::encode(fruit).unwrap();
            assert_eq!(bytes, format!("\"{}\"", fruit.name()).into_bytes());
            assert_eq!(codec::decode::<Fruit>(&bytes).unwrap(), *fruit);
        }
        for ghost in GhostGang::VARIANTS {
            let bytes = codec::encode(ghost).unwrap();
            assert_eq!(codec::decode::<GhostGang>(&bytes).unwrap(), *ghost);
        }
    }

    #[test]
    fn test_record_field_combinations_round_trip() {
        for ghost in GhostGang::VARIANTS {
            for date in [None, Some("2024-01-01T00:00:00Z")] {
                let value = sample(*ghost, date);
                let bytes = codec::encode(&value).unwrap();
                assert_eq!(codec::decode::<ComplexObject>(&bytes).unwrap(), value);
            }
        }
    }

    #[test]
    fn test_wire_shape() {
        let value = sample(GhostGang::Inky, Some("date"));
        let json: serde_json::Value = serde_json::from_slice(&codec::encode(&value).unwrap()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "writeParams": {"key": "k", "value": [0, 127, 255]},
                "aString": "s",
                "anOptionalDate": "date",
                "ghost": "inky",
                "anInt": -7,
                "aBoolean": false,
            })
        );
    }

    #[test]
    fn test_optional_field_may_be_absent() {
        let json = br#"{"writeParams":{"key":"","value":[]},"aString":"","ghost":"clyde","anInt":0,"aBoolean":true}"#;
        let value: ComplexObject = codec::decode(json).unwrap();

        assert_eq!(value.an_optional_date, None);
        assert_eq!(value.ghost, GhostGang::Clyde);
    }

    #[test]
    fn test_unknown_enum_name_is_rejected() {
        assert!(codec::decode::<Fruit>(br#""kiwi""#).is_err());
        assert!(codec::decode::<Fruit>(br#""Apple""#).is_err());
    }
}
