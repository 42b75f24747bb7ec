//! # opal-core — Foundational Types for the Opal Object Store
//!
//! This crate is the leaf of the Opal workspace DAG. It defines the naming
//! primitives shared by every other crate: the closed [`NamingPolicy`] enum,
//! its pure transform function, and the identifier well-formedness rules
//! that gate what may enter the schema at all.
//!
//! ## Key Design Principles
//!
//! 1. **Transforms are pure and total.** [`NamingPolicy::apply`] is a plain
//!    string function with no side effects, defined for every well-formed
//!    identifier. It never fails; malformed *input* is rejected earlier by
//!    the schema build, not by the transform.
//!
//! 2. **"Unset" is not a policy.** The enum deliberately has no variant
//!    meaning "nothing was declared". Callers that need fall-through
//!    semantics wrap the policy in `Option` — `NamingPolicy::None` is a
//!    *declared* no-op and terminates precedence chains.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `opal-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod ident;
pub mod policy;

pub use ident::{ensure_well_formed, is_well_formed_identifier, IdentError};
pub use policy::NamingPolicy;
