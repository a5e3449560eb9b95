//! viewgate-core
//!
//! Filter/predicate engine and result cache for SQL-backed views exposed
//! as HTTP resources. Untrusted textual request parameters become safe,
//! parametrized filter predicates ([`criteria`]); identical resolved
//! queries are answered from a content-addressed, TTL-based cache
//! ([`cache`]).
//!
//! HTTP routing, view metadata repositories, database drivers and
//! authentication are external collaborators: they hand this crate a
//! per-view column allow-list, raw parameter strings and a blob store,
//! and get back validated parametrized SQL and cached payloads.

pub mod cache;
pub mod core;
pub mod criteria;
pub mod utils;
