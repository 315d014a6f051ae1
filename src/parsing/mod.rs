//! Line-level parsing primitives.
//!
//! - [`header`] - decides whether a line opens a new message and extracts
//!   its date, time and remainder
//! - [`sender`] - splits a header remainder into sender and content
//!
//! Both are pure functions over a single line. The [`parser`](crate::parser)
//! module stitches lines together into records.

pub mod header;
pub mod sender;

pub use header::{HeaderFields, Meridian, is_header, match_header};
pub use sender::{Attribution, is_punctuation_only, split_sender};
