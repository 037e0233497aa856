#![forbid(unsafe_code)]

//! Reading systems from text and rendering solve results as text.
//!
//! | Module | Contents |
//! |---|---|
//! | [`format`] | augmented/split layouts, [`parse_system`], [`render_system`] |
//! | [`report`] | [`render_report`] |
//! | [`error`] | [`ParseError`] |

pub mod error;
pub mod format;
pub mod report;

pub use error::ParseError;
pub use format::{
    Layout, LinearSystem, MAX_DIMENSION, MIN_DIMENSION, parse_system, render_system,
};
pub use report::{Report, render_report};
