//! Celestial Module - Constellation Synthesis
//!
//! Turns a Sky Address into a drawable constellation.
//!
//! # Architecture
//!
//! ```text
//! (P, L) → select_stars → generate_lines → stars + lines
//!             ↓                ↓
//!       anchors + bright   prime step + band filter
//! ```
//!
//! # The Celestial Metaphor
//!
//! - **Anchors**: Stars bound to the active gate, always drawn
//! - **Secondaries**: The brightest stars of the sky, count set by the Lunar Month
//! - **Lines**: Prime-step chords between stars, kept when 10°-120° long

pub mod lines;
pub mod selector;
pub mod sphere;

pub use lines::{
    connect_with_step, generate_lines, is_valid_connection, Connection, MAX_LINES,
    MAX_LINE_DEGREES, MIN_LINE_DEGREES,
};
pub use selector::{secondary_count, select_stars, MIN_SECONDARY_STARS};
pub use sphere::angular_distance;
