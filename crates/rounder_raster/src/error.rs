//! Rasterizer error types

use thiserror::Error;

/// Errors that can occur when rasterizing a corner atlas
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    /// A tile size of zero has no pixels to draw into
    #[error("corner tile size must be > 0")]
    EmptyTile,

    /// The tile is larger than [`MAX_TILE_SIZE`](crate::MAX_TILE_SIZE)
    #[error("corner tile size {size} exceeds the maximum of {max}")]
    TooLarge { size: u32, max: u32 },

    /// The pixmap could not be allocated
    #[error("failed to allocate a {side}x{side} pixmap")]
    Allocation { side: u32 },
}
