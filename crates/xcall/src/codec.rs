//! Big integer wire format.
//!
//! Sequence numbers, request ids and fees can exceed what a JSON number holds
//! exactly, so they are written as a tagged object:
//!
//! ```json
//! {"__type": "bigint", "value": "340282366920938463463374607431768211456"}
//! ```
//!
//! Plain JSON integers are accepted on read for state written by older
//! versions.

use num_bigint::BigInt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

const BIGINT_TAG: &str = "bigint";

#[derive(Serialize, Deserialize)]
struct Tagged {
    #[serde(rename = "__type")]
    kind: String,
    value: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Repr {
    Tagged(Tagged),
    Unsigned(u64),
    Signed(i64),
}

fn from_repr(repr: Repr) -> Result<BigInt, String> {
    match repr {
        Repr::Tagged(tagged) if tagged.kind == BIGINT_TAG => {
            BigInt::from_str(&tagged.value).map_err(|e| format!("bigint {:?}: {e}", tagged.value))
        }
        Repr::Tagged(tagged) => Err(format!("unexpected tag {:?}", tagged.kind)),
        Repr::Unsigned(v) => Ok(BigInt::from(v)),
        Repr::Signed(v) => Ok(BigInt::from(v)),
    }
}

/// `#[serde(with = "codec::bigint")]`
pub mod bigint {
    use super::*;
    use serde::de::Error as _;

    pub fn serialize<S: Serializer>(value: &BigInt, serializer: S) -> Result<S::Ok, S::Error> {
        Tagged {
            kind: BIGINT_TAG.to_string(),
            value: value.to_string(),
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigInt, D::Error> {
        from_repr(Repr::deserialize(deserializer)?).map_err(D::Error::custom)
    }
}

/// `#[serde(with = "codec::option_bigint")]`
pub mod option_bigint {
    use super::*;
    use serde::de::Error as _;

    pub fn serialize<S: Serializer>(value: &Option<BigInt>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => super::bigint::serialize(v, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<BigInt>, D::Error> {
        match Option::<Repr>::deserialize(deserializer)? {
            Some(repr) => from_repr(repr).map(Some).map_err(D::Error::custom),
            None => Ok(None),
        }
    }
}
