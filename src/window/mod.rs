//! Windowing engine: disjoint and moving windows over a token sequence.

mod disjoint;
mod moving;

pub use disjoint::{disjoint_windows, DisjointWindows, Strategy, MIN_RELIABLE_WINDOWS};
pub use moving::{moving_windows, MovingWindows};

use crate::error::{ComplexityError, Result};

/// Validate a window size against a text length.
pub(crate) fn check_window(window_size: usize, text_length: usize) -> Result<()> {
    if window_size == 0 {
        return Err(ComplexityError::InvalidParameter(
            "window size must be positive".to_string(),
        ));
    }
    if window_size > text_length {
        return Err(ComplexityError::InvalidWindow {
            window_size,
            text_length,
        });
    }
    Ok(())
}
