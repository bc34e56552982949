pub mod image;
pub mod submission;

pub use image::{FilePart, ImageSource, InlineImage};
pub use submission::{ChildItems, GalleryMode, RawBody, Submission};

/// A stored row plus derived keys (`url`, `tags`, ...), serialized as-is.
pub type Record = serde_json::Map<String, serde_json::Value>;
