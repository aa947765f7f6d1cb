//! Module dedicated to template parsing.
//!
//! Rendered templates come in two shapes: simple ones, where the
//! first non-blank line is the subject, and embedded-header ones,
//! where leading directive lines carry the addressing. The [`header`]
//! module classifies individual lines, [`simple`] and [`embedded`]
//! parse whole templates on top of it.

pub mod embedded;
pub mod header;
pub mod simple;

pub use embedded::Directives;
pub use header::{classify, HeaderKey};
