#![deny(missing_debug_implementations)]
#![cfg_attr(test, deny(warnings))]

//! # sismika-core
//!
//! Domain logic of the sismika earthquake portal: storage traits, catalog
//! queries and the use cases that tie them together. Everything talks to
//! the store through the repository traits in [`repositories`], so the
//! actual database engine stays an implementation detail of the caller.

pub mod authorization;
pub mod db;
pub mod query;
pub mod repositories;
pub mod seismo;
pub mod usecases;
pub mod util;

pub mod entities {
    pub use sismika_entities::{
        evac::*, event::*, geo::*, id::*, location::*, nonce::*, session::*, station::*, time::*,
        user::*,
    };
}
