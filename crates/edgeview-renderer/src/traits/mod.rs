//! Collaborator traits.
//!
//! The dispatcher never talks to a concrete loader, window or renderer.
//! Hosts plug their implementations in through these traits.

mod loader;
mod surface;

pub use loader::*;
pub use surface::*;
