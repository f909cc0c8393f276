//! Serde adapters for byte fields carried as standard padded base64.

pub(crate) mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{de, Deserialize, Deserializer, Serializer};

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
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| de::Error::custom(format!("invalid base64: {}", e)))
    }
}

pub(crate) mod base64_map {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::ser::SerializeMap;
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S>(map: &BTreeMap<String, Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_map(Some(map.len()))?;
        for (key, bytes) in map {
            state.serialize_entry(key, &STANDARD.encode(bytes))?;
        }
        state.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<String, Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = BTreeMap::<String, String>::deserialize(deserializer)?;
        encoded
            .into_iter()
            .map(|(key, value)| {
                let bytes = STANDARD.decode(value.as_bytes()).map_err(|e| {
                    de::Error::custom(format!("invalid base64 for signer {}: {}", key, e))
                })?;
                Ok((key, bytes))
            })
            .collect()
    }
}
