use thiserror::Error;

/// Errors surfaced by the editor's fallible operations.
///
/// None of these are fatal to a session: input handlers absorb them
/// locally (a bad asset is dropped, a bad color literal falls back to
/// the last valid one). They only propagate through the explicitly
/// fallible public surface: decoding, export, and color parsing.
#[derive(Debug, Error)]
pub enum EditorError {
    /// An image payload could not be decoded; no sticker is created.
    #[error("failed to decode image asset: {0}")]
    AssetDecode(#[source] image::ImageError),

    /// The composited frame could not be encoded for export.
    #[error("failed to encode export image: {0}")]
    ExportEncode(#[source] image::ImageError),

    /// A color literal was not a valid `#rgb`/`#rrggbb` hex string.
    #[error("invalid color literal {0:?}")]
    InvalidColor(String),
}
