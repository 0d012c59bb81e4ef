#![forbid(unsafe_code)]

//! Core: display width measurement and terminal escape scanning.
//!
//! # Role in stringwrap
//! `stringwrap-core` is the measurement layer. It answers two questions the
//! wrapping engine never decides on its own:
//!
//! - **How wide is this?** [`text_width`] maps grapheme clusters and scalars
//!   to terminal columns using Unicode data tables.
//! - **Is this an escape sequence?** [`escape`] recognizes CSI, OSC and the
//!   other ESC-introduced control strings so they can be copied through
//!   without contributing width.
//!
//! # How it fits in the system
//! The engine (`stringwrap`) walks its input once and consults these helpers
//! at every position. Both modules are stateless apart from the lazily
//! detected [`text_width::WidthPolicy`], which is read-only after first use.

pub mod escape;
pub mod text_width;

pub use escape::{EscapeSequence, visible_width};
pub use text_width::{WidthPolicy, char_width, display_width, grapheme_width};
