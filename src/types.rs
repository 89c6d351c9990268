//! Data types for the item service client

use hyper::Method;
use serde::{Deserialize, Serialize};

/// A single item as served by the item endpoint.
///
/// Value object: construct it, send it, drop it — fields are never mutated
/// client-side, and `id` is assigned by the server. The JSON field names are
/// fixed by the service (`descricao`, `imagem`) and must match exactly for
/// decoding to succeed; the binary `image` payload travels as base64.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    /// Server-assigned unique identifier
    pub id: i64,
    /// Human-readable description, shown in the list UI
    #[serde(rename = "descricao")]
    pub description: String,
    /// Raw image bytes, base64-encoded on the wire
    #[serde(rename = "imagem", with = "base64_bytes")]
    pub image: Vec<u8>,
}

impl Item {
    /// Create an item with the given id, description and image payload.
    pub fn new(id: i64, description: impl Into<String>, image: Vec<u8>) -> Self {
        Self {
            id,
            description: description.into(),
            image,
        }
    }
}

/// REST operation against the item collection.
///
/// A stateless tag selecting the URL shape and HTTP verb; see
/// [`ItemClient::apply`](crate::ItemClient::apply) for the mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// GET the whole collection
    Fetch,
    /// POST a new item to the collection
    Create,
    /// PUT an item to its id-addressed URL
    Update,
    /// DELETE an item at its id-addressed URL
    Delete,
}

impl Operation {
    /// The HTTP verb this operation is issued with.
    pub fn method(self) -> Method {
        match self {
            Operation::Fetch => Method::GET,
            Operation::Create => Method::POST,
            Operation::Update => Method::PUT,
            Operation::Delete => Method::DELETE,
        }
    }

    /// Whether requests for this operation carry an encoded item body.
    pub fn has_body(self) -> bool {
        !matches!(self, Operation::Fetch)
    }
}

/// Serde adapter carrying `Vec<u8>` as a base64 string.
mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

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
        STANDARD.decode(encoded.as_bytes()).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_serializes_with_legacy_field_names() {
        let item = Item::new(7, "Caneca", vec![0xde, 0xad, 0xbe, 0xef]);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["descricao"], "Caneca");
        // 0xDEADBEEF in base64
        assert_eq!(json["imagem"], "3q2+7w==");
    }

    #[test]
    fn item_roundtrips_through_json() {
        let item = Item::new(42, "Round trip", vec![1, 2, 3, 4, 5]);
        let json = serde_json::to_string(&item).unwrap();
        let back: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn item_with_empty_image_roundtrips() {
        let item = Item::new(0, "", Vec::new());
        let json = serde_json::to_string(&item).unwrap();
        let back: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn item_rejects_renamed_fields() {
        // English field names are not the wire format
        let result: Result<Item, _> =
            serde_json::from_str(r#"{"id":1,"description":"x","image":""}"#);
        assert!(result.is_err());
    }

    #[test]
    fn item_rejects_invalid_base64_image() {
        let result: Result<Item, _> =
            serde_json::from_str(r#"{"id":1,"descricao":"x","imagem":"not base64!"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn item_list_decodes_in_order() {
        let json = r#"[
            {"id":1,"descricao":"a","imagem":""},
            {"id":2,"descricao":"b","imagem":""},
            {"id":3,"descricao":"c","imagem":""}
        ]"#;
        let items: Vec<Item> = serde_json::from_str(json).unwrap();
        let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn operation_verb_mapping() {
        assert_eq!(Operation::Fetch.method(), Method::GET);
        assert_eq!(Operation::Create.method(), Method::POST);
        assert_eq!(Operation::Update.method(), Method::PUT);
        assert_eq!(Operation::Delete.method(), Method::DELETE);
    }

    #[test]
    fn only_fetch_goes_without_a_body() {
        assert!(!Operation::Fetch.has_body());
        assert!(Operation::Create.has_body());
        assert!(Operation::Update.has_body());
        assert!(Operation::Delete.has_body());
    }
}
