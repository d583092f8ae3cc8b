//! Serde adapters that write `BigInt` values as decimal strings.
//!
//! JSON consumers frequently parse numbers into doubles, which silently
//! rounds anything past 2^53. Strings keep every digit.
//!
//! ```rust
//! use num_bigint::BigInt;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Wrapper {
//!     #[serde(with = "calc_core::bigint_serde")]
//!     value: BigInt,
//! }
//!
//! let json = serde_json::to_string(&Wrapper { value: BigInt::from(105) }).unwrap();
//! assert_eq!(json, r#"{"value":"105"}"#);
//! ```

use num_bigint::BigInt;
use serde::{de, Deserialize, Deserializer, Serializer};

pub fn serialize<S>(value: &BigInt, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_str_radix(10))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<BigInt, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    BigInt::parse_bytes(text.trim().as_bytes(), 10)
        .ok_or_else(|| de::Error::custom(format!("invalid integer string: {text}")))
}

/// Same encoding for `Vec<BigInt>`.
pub mod vec {
    use num_bigint::BigInt;
    use serde::{de, ser::SerializeSeq, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(values: &[BigInt], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(values.len()))?;
        for value in values {
            seq.serialize_element(&value.to_str_radix(10))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<BigInt>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let texts = Vec::<String>::deserialize(deserializer)?;
        texts
            .iter()
            .map(|text| {
                BigInt::parse_bytes(text.trim().as_bytes(), 10)
                    .ok_or_else(|| de::Error::custom(format!("invalid integer string: {text}")))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigInt;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        #[serde(with = "crate::bigint_serde")]
        value: BigInt,
        #[serde(with = "crate::bigint_serde::vec")]
        values: Vec<BigInt>,
    }

    #[test]
    fn test_large_values_keep_every_digit() {
        let big: BigInt = "123456789012345678901234567890".parse().unwrap();
        let sample = Sample {
            value: big.clone(),
            values: vec![BigInt::from(-7), big],
        };
        let json = serde_json::to_string(&sample).unwrap();
        assert!(json.contains("\"123456789012345678901234567890\""));
        assert!(json.contains("\"-7\""));

        let roundtrip: Sample = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, sample);
    }

    #[test]
    fn test_rejects_non_integer_strings() {
        let result: Result<Sample, _> = serde_json::from_str(r#"{"value":"1.5","values":[]}"#);
        assert!(result.is_err());
    }
}
