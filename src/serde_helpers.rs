//! Serde helpers for amino JSON field encodings
//!
//! Legacy amino JSON renders 64-bit integers as decimal strings and raw
//! bytes as standard base64. These modules plug into `#[serde(with = ...)]`.

use serde::{Deserialize, Deserializer, Serializer};

/// Serialize/deserialize u64 as a decimal string
pub mod u64_string {
    use super::*;

    pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<u64>().map_err(serde::de::Error::custom)
    }
}

/// Serialize/deserialize Vec<u8> as standard base64
pub mod base64_bytes {
    use super::*;
    use base64::{engine::general_purpose::STANDARD, Engine as _};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(s).map_err(serde::de::Error::custom)
    }
}

/// Used with `skip_serializing_if` for amino `omitempty` integer fields
pub fn is_zero(value: &u64) -> bool {
    *value == 0
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        #[serde(with = "super::u64_string")]
        gas: u64,
        #[serde(with = "super::base64_bytes")]
        key: Vec<u8>,
    }

    #[test]
    fn test_u64_and_bytes_as_strings() {
        let sample = Sample {
            gas: 30000,
            key: vec![0xde, 0xad, 0xbe, 0xef],
        };
        let json = serde_json::to_string(&sample).unwrap();
        assert_eq!(json, r#"{"gas":"30000","key":"3q2+7w=="}"#);

        let back: Sample = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample);
    }

    #[test]
    fn test_rejects_non_numeric_gas() {
        let result: Result<Sample, _> = serde_json::from_str(r#"{"gas":"-1","key":""}"#);
        assert!(result.is_err());
    }
}
