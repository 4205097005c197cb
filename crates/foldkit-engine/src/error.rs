use thiserror::Error;

/// Errors surfaced by engine primitives.
///
/// None of these are fatal for the fold layer: callers log them and fall back
/// to drawing content directly.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The allocator could not provide `width × height` RGBA pixels.
    #[error("cannot allocate {width}x{height} bitmap")]
    BitmapAlloc { width: u32, height: u32 },

    /// A bitmap with a zero dimension was requested.
    #[error("bitmap dimensions must be non-zero")]
    EmptyBitmap,

    /// Image encode/decode failure when converting to or from `image` buffers.
    #[error(transparent)]
    Image(#[from] image::ImageError),
}
