//! Decoding of token URIs that embed their metadata document

use std::fmt::{self, Display};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::{
    constants::{IPFS_GATEWAY, IPFS_SCHEME, JSON_DATA_URI_PREFIX},
    errors::ScriptError,
};

/// The metadata document of a token
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Display description
    #[serde(default)]
    pub description: Option<String>,
    /// Image link, possibly an `ipfs://` link
    #[serde(default)]
    pub image: Option<String>,
    /// Display attributes
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

/// A single `{ trait_type, value }` attribute
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// The attribute's name
    pub trait_type: String,
    /// The attribute's value
    pub value: AttributeValue,
}

/// An attribute value, which the metadata standard allows to be a string or a number
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A numeric value
    Number(serde_json::Number),
    /// A textual value
    Text(String),
}

impl Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Number(n) => write!(f, "{n}"),
            AttributeValue::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Decode a `data:application/json;base64,` token URI
///
/// Any other URI yields `None`. A data URI whose payload is not base64
/// encoded JSON is an error.
pub fn decode_token_uri(uri: &str) -> Result<Option<TokenMetadata>, ScriptError> {
    let payload = match uri.strip_prefix(JSON_DATA_URI_PREFIX) {
        Some(payload) => payload,
        None => return Ok(None),
    };

    let json = STANDARD
        .decode(payload.trim())
        .map_err(|e| ScriptError::MetadataDecoding(e.to_string()))?;
    let metadata =
        serde_json::from_slice(&json).map_err(|e| ScriptError::MetadataDecoding(e.to_string()))?;

    Ok(Some(metadata))
}

/// Rewrite an `ipfs://` image link to the HTTP gateway, leave others untouched
pub fn resolve_image_url(image: &str) -> String {
    match image.strip_prefix(IPFS_SCHEME) {
        Some(cid) => format!("{IPFS_GATEWAY}{cid}"),
        None => image.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_uri(json: &str) -> String {
        format!("{JSON_DATA_URI_PREFIX}{}", STANDARD.encode(json))
    }

    #[test]
    fn test_decode_embedded_metadata() {
        let uri = data_uri(
            r#"{
                "name": "Aria",
                "description": "A wandering mage",
                "image": "ipfs://bafyaria",
                "attributes": [
                    { "trait_type": "Class", "value": "Mage" },
                    { "trait_type": "Level", "value": 3 }
                ]
            }"#,
        );

        let metadata = decode_token_uri(&uri).unwrap().unwrap();
        assert_eq!(metadata.name.as_deref(), Some("Aria"));
        assert_eq!(metadata.attributes.len(), 2);
        assert_eq!(metadata.attributes[0].value, AttributeValue::Text("Mage".to_string()));
        assert_eq!(metadata.attributes[1].value.to_string(), "3");
    }

    #[test]
    fn test_missing_fields_default() {
        let metadata = decode_token_uri(&data_uri(r#"{ "name": "Bran" }"#)).unwrap().unwrap();
        assert_eq!(metadata.description, None);
        assert!(metadata.attributes.is_empty());
    }

    #[test]
    fn test_plain_uri_is_not_decoded() {
        assert_eq!(decode_token_uri("https://yourgame.com/images/characters/1").unwrap(), None);
        assert_eq!(decode_token_uri("").unwrap(), None);
    }

    #[test]
    fn test_malformed_payloads() {
        let not_base64 = format!("{JSON_DATA_URI_PREFIX}!!!");
        assert!(matches!(
            decode_token_uri(&not_base64),
            Err(ScriptError::MetadataDecoding(_))
        ));
        assert!(matches!(
            decode_token_uri(&data_uri("not json")),
            Err(ScriptError::MetadataDecoding(_))
        ));
    }

    #[test]
    fn test_ipfs_images_use_the_gateway() {
        assert_eq!(resolve_image_url("ipfs://bafyaria"), "https://ipfs.io/ipfs/bafyaria");
        assert_eq!(resolve_image_url("https://cdn/a.png"), "https://cdn/a.png");
    }
}
