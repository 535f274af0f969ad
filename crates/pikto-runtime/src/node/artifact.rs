//! Opaque media artifact produced by a node.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::Bytes;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An opaque encoded media blob produced or consumed by a node.
///
/// The engine never inspects the payload content. On the wire (and in
/// serialized workflow definitions) an artifact is carried as a data
/// URL: `data:<mime>;base64,<payload>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// MIME type of the payload, e.g. `image/png`.
    pub mime_type: String,
    /// Raw encoded media bytes.
    pub payload: Bytes,
}

impl Artifact {
    /// Creates a new artifact.
    pub fn new(mime_type: impl Into<String>, payload: impl Into<Bytes>) -> Self {
        Self {
            mime_type: mime_type.into(),
            payload: payload.into(),
        }
    }

    /// Encodes the artifact as a `data:` URL.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            BASE64.encode(&self.payload)
        )
    }

    /// Parses an artifact from a `data:` URL.
    ///
    /// Returns `None` if the string is not a well-formed
    /// `data:<mime>;base64,<payload>` URL.
    pub fn from_data_url(url: &str) -> Option<Self> {
        let rest = url.strip_prefix("data:")?;
        let (header, data) = rest.split_once(',')?;
        let mime_type = header.strip_suffix(";base64")?;
        let payload = BASE64.decode(data).ok()?;
        Some(Self::new(mime_type, payload))
    }

    /// Returns the payload length in bytes.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Returns whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

impl Serialize for Artifact {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_data_url())
    }
}

impl<'de> Deserialize<'de> for Artifact {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let url = String::deserialize(deserializer)?;
        Self::from_data_url(&url)
            .ok_or_else(|| D::Error::custom("expected a base64 data URL"))
    }
}
