use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrInt {
    String(String),
    Int(i64),
}

/// Off-chain metadata document a jetton's content uri points to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JettonMetadata {
    pub name: String,
    pub symbol: String,
    /// Serialized as a string, the form wallets expect
    #[serde(with = "decimals_as_string")]
    pub decimals: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

mod decimals_as_string {
    use super::StringOrInt;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u8, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
        match StringOrInt::deserialize(deserializer)? {
            StringOrInt::String(s) => s.parse().map_err(D::Error::custom),
            StringOrInt::Int(i) => u8::try_from(i).map_err(D::Error::custom),
        }
    }
}
