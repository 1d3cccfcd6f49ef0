//! Opaque image input with a declared media type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An uploaded image: raw bytes plus the media type declared by the caller.
///
/// The engine never decodes the bytes; the only inspection it performs is the
/// `image/*` media-type check in [`ImageBlob::is_image`].
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageBlob {
    media_type: String,
    bytes: Vec<u8>,
}

impl ImageBlob {
    pub fn new(media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            media_type: media_type.into(),
            bytes,
        }
    }

    /// The declared media type, e.g. `image/jpeg`.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether the declared media type is an image type.
    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }
}

impl fmt::Debug for ImageBlob {
    // Keep raw bytes out of logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageBlob")
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}
