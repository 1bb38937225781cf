// SPDX-License-Identifier: MIT

//!
//! Functions for ID management (create a globally unique one, or parse an
//! existing one)
//!

use uuid::Uuid;

/// The Monolift ID type is a UUIDv4
#[rustfmt::skip]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(derive_more::Display, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct MonoliftId(Uuid);

impl MonoliftId {
    /// Create a new `MonoliftId`
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an ID from a string if the string is a valid ID
    pub fn from<S: ToString>(string: S) -> Result<Self, uuid::Error> {
        let string = string.to_string();
        Ok(Self(Uuid::parse_str(&string)?))
    }
}

impl Default for MonoliftId {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_id_deserialization() {
        let uuid_str = r#""7f1d6e52-9b3a-4c08-9d2e-1a5b8c0f4e77""#;
        let id: MonoliftId = serde_json::from_str(uuid_str).expect("Failed to deserialize");
        assert_eq!(
            id,
            MonoliftId(Uuid::parse_str("7f1d6e52-9b3a-4c08-9d2e-1a5b8c0f4e77").unwrap())
        );

        // Truncated UUIDs are not valid
        let uuid_str = r#""7f1d6e52-9b3a-4c08-9d2e-1a5b8c0f4e7""#;
        assert!(serde_json::from_str::<MonoliftId>(uuid_str).is_err());
    }

    #[test]
    fn test_id_round_trip() {
        let id = MonoliftId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(serde_json::from_str::<MonoliftId>(&json).unwrap(), id);
        assert_eq!(json, format!(r#""{id}""#));
    }
}
