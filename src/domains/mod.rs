//! Domains module containing business logic organized by bounded contexts.
//!
//! The server has a single domain: the Falcon tools.

pub mod tools;
