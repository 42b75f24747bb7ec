//! # Schema Build Errors
//!
//! Errors surfaced by registry construction at schema-open time. The build
//! is atomic: any error here means no registry exists and the schema must
//! not open. A malformed name mapping would silently corrupt persisted
//! data or query results, so these are hard stops, never logged-and-ignored.

use opal_core::IdentError;
use thiserror::Error;

/// The namespace in which a name conflict occurred.
///
/// Class names are unique across the whole schema; field names are unique
/// within their owning class's internal name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameNamespace {
    /// The schema-wide class namespace.
    Classes,
    /// The field namespace of one class, identified by its internal name.
    Fields {
        /// Internal name of the owning class.
        class: String,
    },
}

impl std::fmt::Display for NameNamespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Classes => f.write_str("class namespace"),
            Self::Fields { class } => write!(f, "field namespace of class {class:?}"),
        }
    }
}

/// Error during schema name registry construction.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// Two distinct public names resolved to the same internal name.
    ///
    /// This includes coincidental collisions where two different policies
    /// happen to transform different source names to one internal string;
    /// no precedence rule disambiguates those, so they fail the build.
    #[error(
        "duplicate internal name {internal_name:?} in {namespace}: \
         {first:?} and {second:?} both resolve to it"
    )]
    DuplicateInternalName {
        /// Namespace the collision occurred in.
        namespace: NameNamespace,
        /// The colliding internal name.
        internal_name: String,
        /// Public name of the first declaration that claimed the name.
        first: String,
        /// Public name of the second declaration that collided with it.
        second: String,
    },

    /// The same public name was declared twice in one namespace.
    #[error("duplicate public name {public_name:?} in {namespace}")]
    DuplicatePublicName {
        /// Namespace the duplicate occurred in.
        namespace: NameNamespace,
        /// The duplicated public name.
        public_name: String,
    },

    /// A declared source identifier failed well-formedness validation.
    #[error("invalid identifier for {context}: {source}")]
    InvalidIdentifier {
        /// Human-readable position of the offender, e.g. `class "Person"`
        /// or `field "age" of class "Person"`.
        context: String,
        /// The underlying well-formedness violation.
        #[source]
        source: IdentError,
    },

    /// An explicit name override was declared but empty.
    ///
    /// Explicit names are verbatim literals and may contain characters a
    /// source identifier cannot, but an empty internal name is never valid.
    #[error("explicit name override on {context} is empty")]
    EmptyExplicitName {
        /// Human-readable position of the offending declaration.
        context: String,
    },
}
