//! Embedded definition literals for design-sync.
//!
//! A component file is hand-written source code that also carries the
//! definition last synchronized from the design service, embedded as the
//! second argument of a factory call:
//!
//! ```text
//! export const style = createStyle('card', { ... })
//! ```
//!
//! - [`literal`] normalizes the loosely written object literal to strict JSON
//! - [`anchor`] finds the factory call and extracts the literal
//! - [`template`] renders a file around a definition, in the exact shape
//!   [`anchor`] reads back
//!
//! [`anchor`] and [`template`] are two halves of one format. Changing the
//! call shape in one requires the same change in the other.

pub mod anchor;
pub mod error;
pub mod literal;
pub mod template;

pub use anchor::{Anchor, Embedded};
pub use error::{Error, Result};
pub use literal::{Token, format, parse_literal, tokenize};
pub use template::{DEFAULT_PACKAGE, Flavor, Render, Template, to_pretty_json};
