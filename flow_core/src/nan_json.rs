//! JSON encoding of undefined samples
//!
//! JSON has no NaN or infinity. Non-finite values are written as `null` and
//! read back as NaN, so gaps in a trace survive a round trip. Use with
//! `#[serde(with = "crate::nan_json::values")]` on `Vec<f64>` fields and
//! `#[serde(with = "crate::nan_json::value")]` on `f64` fields.

/// `Vec<f64>` with `null` entries for non-finite values
pub mod values {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(values.iter().map(|v| v.is_finite().then_some(*v)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
        let raw = Vec::<Option<f64>>::deserialize(deserializer)?;
        Ok(raw.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    }
}

/// Single `f64`, `null` when non-finite
pub mod value {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        value.is_finite().then_some(*value).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}
