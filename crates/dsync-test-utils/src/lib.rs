//! Shared test utilities for the design-sync workspace.
//!
//! Dev-dependency only. [`project::TestProject`] gives every crate the same
//! way of laying out a scratch project with component files in it.

pub mod project;

pub use project::{TestProject, component_source};
