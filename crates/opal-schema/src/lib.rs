//! # opal-schema — Naming Resolution for the Opal Object Store
//!
//! Decides, for every persisted class and every persisted field, which name
//! the storage engine uses versus which name the application API exposes.
//! Naming policies declare the transform at three scopes — module, class,
//! field — with explicit literal overrides taking highest precedence, and
//! the result is a bidirectional, collision-checked registry built once per
//! schema-open.
//!
//! ## Pipeline
//!
//! ```text
//! SchemaSource ──▶ NameResolver ──▶ SchemaRegistry ──▶ query translation,
//!  (declarations)   (precedence)     (collision-checked   schema introspection
//!                                     bidirectional table)
//! ```
//!
//! - [`declare`]: the declaration data model and the [`SchemaSource`]
//!   input boundary, including the serializable [`SchemaDescriptor`].
//! - [`resolve`]: the precedence algorithm. Infallible; produces one
//!   [`ResolvedName`] per class and per field.
//! - [`registry`]: the [`SchemaRegistry`] built atomically at schema-open
//!   time. Immutable and lock-free to read once built.
//! - [`error`]: the structured [`SchemaError`] that aborts schema-open.
//!
//! ## Example
//!
//! ```
//! use opal_core::NamingPolicy;
//! use opal_schema::{
//!     ClassDeclaration, FieldDeclaration, PolicyDeclaration, SchemaDescriptor, SchemaRegistry,
//! };
//!
//! let descriptor = SchemaDescriptor::new()
//!     .with_module(
//!         "app",
//!         PolicyDeclaration::unset()
//!             .with_field_name_policy(NamingPolicy::LowerCaseUnderscore),
//!     )
//!     .with_class(
//!         ClassDeclaration::new("Person")
//!             .in_module("app")
//!             .with_field(FieldDeclaration::new("firstName")),
//!     );
//!
//! let registry = SchemaRegistry::build(&descriptor)?;
//! assert_eq!(registry.internal_field_name("Person", "firstName"), Some("first_name"));
//! assert_eq!(registry.public_field_name("Person", "first_name"), Some("firstName"));
//! # Ok::<(), opal_schema::SchemaError>(())
//! ```

pub mod declare;
pub mod error;
pub mod registry;
pub mod resolve;

pub use declare::{
    ClassDeclaration, FieldDeclaration, PolicyDeclaration, SchemaDescriptor, SchemaSource,
};
pub use error::{NameNamespace, SchemaError};
pub use registry::{ClassMapping, SchemaRegistry};
pub use resolve::{NameResolver, ResolvedClass, ResolvedName};
