//! Decoding of the contract's `uri(tokenId)` data URIs.

use serde::{Deserialize, Serialize};

use crate::error::MetadataError;

/// Prefix of a token URI carrying inline JSON.
pub const JSON_URI_PREFIX: &str = "data:application/json;utf8,";
/// Prefix of the `image` field carrying inline SVG.
pub const SVG_URI_PREFIX: &str = "data:image/svg+xml;utf8,";

/// SVG markup taken verbatim from token metadata.
///
/// The markup is NOT sanitized. It is only safe to inject into a document
/// when the metadata comes from a contract you control; content from any
/// other source must be sanitized before rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrustedSvg(String);

impl TrustedSvg {
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Token metadata with every field optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenMetadata {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Inline SVG with the data-URI prefix removed.
    pub image: Option<TrustedSvg>,
}

/// Wire shape of the JSON document; unknown keys are ignored.
#[derive(Deserialize)]
struct RawMetadata {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    image: Option<String>,
}

/// Parse a `data:application/json;utf8,` token URI.
///
/// Missing fields come back as `None`. Only a missing prefix, invalid
/// JSON, or wrongly typed known fields fail. A repeated `name`,
/// `description` or `image` key is invalid JSON here rather than
/// last-one-wins.
pub fn decode_token_uri(uri: &str) -> Result<TokenMetadata, MetadataError> {
    let json = uri
        .strip_prefix(JSON_URI_PREFIX)
        .ok_or(MetadataError::MissingPrefix)?;
    let raw: RawMetadata =
        serde_json::from_str(json).map_err(|e| MetadataError::InvalidJson(e.to_string()))?;

    Ok(TokenMetadata {
        name: raw.name,
        description: raw.description,
        image: raw.image.map(|image| TrustedSvg::new(strip_svg_prefix(&image))),
    })
}

/// Like [`decode_token_uri`], but degrades to empty metadata on failure.
pub fn decode_token_uri_or_default(uri: &str) -> TokenMetadata {
    decode_token_uri(uri).unwrap_or_else(|err| {
        tracing::warn!(%err, "error parsing token uri");
        TokenMetadata::default()
    })
}

/// Remove the SVG data-URI prefix once; values without it pass through.
fn strip_svg_prefix(image: &str) -> &str {
    image.strip_prefix(SVG_URI_PREFIX).unwrap_or(image)
}

/// Build a token URI in the contract's format. Used for previews and tests.
pub fn encode_token_uri(name: &str, description: &str, svg: &str) -> String {
    let doc = serde_json::json!({
        "name": name,
        "description": description,
        "image": format!("{SVG_URI_PREFIX}{svg}"),
    });
    format!("{JSON_URI_PREFIX}{doc}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_known_key_is_invalid() {
        let uri = format!(r#"{JSON_URI_PREFIX}{{"name":"a","name":"b"}}"#);
        assert!(matches!(
            decode_token_uri(&uri),
            Err(MetadataError::InvalidJson(_))
        ));
        let unknown = format!(r#"{JSON_URI_PREFIX}{{"x":1,"x":2,"name":"a"}}"#);
        assert_eq!(decode_token_uri(&unknown).unwrap().name.as_deref(), Some("a"));
    }

    #[test]
    fn decodes_name_and_strips_image_prefix() {
        let uri = r#"data:application/json;utf8,{"name":"A","image":"data:image/svg+xml;utf8,<svg></svg>"}"#;
        let meta = decode_token_uri(uri).unwrap();
        assert_eq!(meta.name.as_deref(), Some("A"));
        assert_eq!(meta.description, None);
        assert_eq!(meta.image.as_ref().map(TrustedSvg::as_str), Some("<svg></svg>"));
    }

    #[test]
    fn garbage_is_malformed() {
        assert_eq!(decode_token_uri("garbage"), Err(MetadataError::MissingPrefix));
        assert!(matches!(
            decode_token_uri("data:application/json;utf8,{not json"),
            Err(MetadataError::InvalidJson(_))
        ));
    }

    #[test]
    fn non_object_json_is_malformed() {
        assert!(matches!(
            decode_token_uri("data:application/json;utf8,[1,2]"),
            Err(MetadataError::InvalidJson(_))
        ));
        assert!(matches!(
            decode_token_uri(r#"data:application/json;utf8,{"name":7}"#),
            Err(MetadataError::InvalidJson(_))
        ));
    }

    #[test]
    fn missing_fields_are_none() {
        let meta = decode_token_uri("data:application/json;utf8,{}").unwrap();
        assert_eq!(meta, TokenMetadata::default());

        let meta = decode_token_uri(
            r#"data:application/json;utf8,{"name":"B","description":"d","extra":1}"#,
        )
        .unwrap();
        assert_eq!(meta.name.as_deref(), Some("B"));
        assert_eq!(meta.description.as_deref(), Some("d"));
        assert!(meta.image.is_none());
    }

    #[test]
    fn null_fields_are_none() {
        let meta =
            decode_token_uri(r#"data:application/json;utf8,{"name":null,"image":null}"#).unwrap();
        assert_eq!(meta, TokenMetadata::default());
    }

    #[test]
    fn image_prefix_is_stripped_only_once() {
        let uri = format!(
            r#"data:application/json;utf8,{{"image":"{p}{p}<svg/>"}}"#,
            p = SVG_URI_PREFIX
        );
        let meta = decode_token_uri(&uri).unwrap();
        assert_eq!(
            meta.image.unwrap().as_str(),
            format!("{SVG_URI_PREFIX}<svg/>")
        );
    }

    #[test]
    fn image_without_prefix_passes_through() {
        let meta =
            decode_token_uri(r#"data:application/json;utf8,{"image":"<svg/>"}"#).unwrap();
        assert_eq!(meta.image.unwrap().as_str(), "<svg/>");
    }

    #[test]
    fn or_default_swallows_errors() {
        assert_eq!(decode_token_uri_or_default("garbage"), TokenMetadata::default());
    }

    #[test]
    fn encode_then_decode_keeps_quotes_in_markup() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="16"></svg>"#;
        let uri = encode_token_uri("Pixel #1", "tiny", svg);
        let meta = decode_token_uri(&uri).unwrap();
        assert_eq!(meta.name.as_deref(), Some("Pixel #1"));
        assert_eq!(meta.description.as_deref(), Some("tiny"));
        assert_eq!(meta.image.unwrap().as_str(), svg);
    }
}
