#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # geocodr-entities
//!
//! Reusable, agnostic domain entities for geocodr.
//!
//! The entities only contain generic functionality that does not reveal any
//! provider-specific details.

pub mod address;
pub mod geocode;
