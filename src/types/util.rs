//! Small serde helpers shared by the wire types.

use serde::{de, Deserialize, Deserializer};

/// Discord IDs are snowflakes transmitted as strings in JSON.
pub type Snowflake = String;

/// Extension trait on [`serde_json::Value`] that provides
/// `.deserialize_into::<T>()`, so decoders can consume a wire dictionary
/// without spelling out `serde_json::from_value` each time.
pub(crate) trait ValueExt: Sized {
    /// Consume this value and attempt to deserialize it into `T`.
    fn deserialize_into<T: serde::de::DeserializeOwned>(self) -> Result<T, serde_json::Error>;
}

impl ValueExt for serde_json::Value {
    fn deserialize_into<T: serde::de::DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self)
    }
}

pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn default_one() -> u8 {
    1
}

/// Accept a snowflake as either a JSON string or a JSON integer.
pub(crate) fn snowflake<'de, D>(deserializer: D) -> Result<Snowflake, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(u64),
    }

    match Raw::deserialize(deserializer) {
        Ok(Raw::Str(s)) => Ok(s),
        Ok(Raw::Int(n)) => Ok(n.to_string()),
        Err(_) => Err(de::Error::custom("expected a snowflake string or integer")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(deserialize_with = "snowflake")]
        id: Snowflake,
    }

    #[test]
    fn snowflake_accepts_strings_and_integers() {
        let a: Holder = json!({ "id": "175928847299117063" }).deserialize_into().unwrap();
        let b: Holder = json!({ "id": 175928847299117063u64 }).deserialize_into().unwrap();
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn snowflake_rejects_other_shapes() {
        let res: Result<Holder, _> = json!({ "id": [1] }).deserialize_into();
        assert!(res.is_err());
    }
}
