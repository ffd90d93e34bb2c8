//! Serde for costs and utilities that use `±∞` as the "no path" sentinel.
//!
//! JSON has no infinity (serde_json writes it as `null`, which does not read
//! back into `f64`), so `+∞` is written as `"inf"` and `−∞` as `"-inf"`.
//! Finite values stay plain numbers. Use with `#[serde(with = "unbounded")]`.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

const POSITIVE: &str = "inf";
const NEGATIVE: &str = "-inf";

pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if *value == f64::INFINITY {
        serializer.serialize_str(POSITIVE)
    } else if *value == f64::NEG_INFINITY {
        serializer.serialize_str(NEGATIVE)
    } else {
        serializer.serialize_f64(*value)
    }
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    match Repr::deserialize(deserializer)? {
        Repr::Number(v) => Ok(v),
        Repr::Text(t) if t == POSITIVE => Ok(f64::INFINITY),
        Repr::Text(t) if t == NEGATIVE => Ok(f64::NEG_INFINITY),
        Repr::Text(t) => Err(D::Error::custom(format!(
            "expected a number, \"{POSITIVE}\" or \"{NEGATIVE}\", got \"{t}\""
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Costed {
        #[serde(with = "crate::model::unbounded")]
        cost: f64,
    }

    #[test]
    fn infinities_round_trip_through_json() {
        for cost in [f64::INFINITY, f64::NEG_INFINITY, 0.0, 12.5, -3.0] {
            let json = serde_json::to_string(&Costed { cost }).unwrap();
            assert_eq!(serde_json::from_str::<Costed>(&json).unwrap(), Costed { cost });
        }
        assert_eq!(serde_json::to_string(&Costed { cost: f64::INFINITY }).unwrap(), r#"{"cost":"inf"}"#);
    }

    #[test]
    fn integers_and_bad_text() {
        assert_eq!(serde_json::from_str::<Costed>(r#"{"cost":7}"#).unwrap().cost, 7.0);
        assert!(serde_json::from_str::<Costed>(r#"{"cost":"lots"}"#).is_err());
    }
}
