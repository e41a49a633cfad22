//! Trait definitions for the reconciler's external collaborators
//!
//! The loop talks to the outside world through exactly two seams: an
//! [`IpSource`] that discovers the current public IP, and a [`Registrar`]
//! that lists and updates DNS records. Both are implemented against real
//! HTTP APIs in sibling crates and faked in the contract tests.

mod ip_source;
mod registrar;

pub use ip_source::IpSource;
pub use registrar::Registrar;
