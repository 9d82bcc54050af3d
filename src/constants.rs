//! Constants for board geometry and opponent parameters.
//!
//! Unlike a fixed-size engine, the board size here is chosen at runtime per
//! match. The rules only require that a five-line fits on the board, so the
//! engine accepts any size from [`MIN_SIZE`] upward while the interactive
//! front end restricts itself to [`SUPPORTED_SIZES`].

use std::ops::RangeInclusive;

// =============================================================================
// Board Geometry
// =============================================================================

/// Number of consecutive same-symbol cells Order needs to win.
pub const WIN_LENGTH: usize = 5;

/// Smallest board on which a five-line can exist.
pub const MIN_SIZE: usize = WIN_LENGTH;

/// Board sizes offered by the front end.
pub const SUPPORTED_SIZES: RangeInclusive<usize> = 6..=9;

/// Board size used when none is given.
pub const DEFAULT_SIZE: usize = 6;

// =============================================================================
// Move Policy Parameters
// =============================================================================

/// Number of center-most empty cells the positional fallback picks from.
pub const FALLBACK_CANDIDATES: usize = 3;

// =============================================================================
// Text Rendering
// =============================================================================

/// Character for an empty cell in board diagrams.
pub const EMPTY_CHAR: char = '.';
