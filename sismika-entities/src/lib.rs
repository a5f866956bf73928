#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(test, deny(warnings))]

//! # sismika-entities
//!
//! Reusable, agnostic domain entities for the sismika earthquake portal.
//!
//! The entities only contain generic functionality that does not reveal any
//! application-specific business logic.

pub mod evac;
pub mod event;
pub mod geo;
pub mod id;
pub mod location;
pub mod nonce;
pub mod session;
pub mod station;
pub mod time;
pub mod user;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
