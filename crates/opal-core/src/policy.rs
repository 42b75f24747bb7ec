//! # Naming Policies — Public-to-Internal Name Transforms
//!
//! A [`NamingPolicy`] decides how a public identifier (the name the schema
//! author wrote) is turned into the internal identifier the storage engine
//! uses. The transform is externally observable — it determines the physical
//! table/column name — so each rule is specified exactly.
//!
//! ## Fall-Through vs Declared No-Op
//!
//! `NamingPolicy::None` and `NamingPolicy::Identity` produce the same
//! output, but they are *declared* decisions: when either appears at a
//! scope, lower-priority scopes are not consulted. The absence of any
//! declaration is modelled as `Option::None` at the declaration layer,
//! never as a variant of this enum.

use serde::{Deserialize, Serialize};

/// A naming transformation policy, declarable at module, class, or field
/// scope.
///
/// The set is closed: the storage engine's physical names must be
/// computable from the policy alone, with no user-supplied transform code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingPolicy {
    /// Keep the public identifier unchanged.
    Identity,
    /// Split on case boundaries and underscores, lower-case every segment,
    /// join with `_`: `myFieldName` → `my_field_name`.
    LowerCaseUnderscore,
    /// Alias of [`NamingPolicy::LowerCaseUnderscore`] for schemas whose
    /// source identifiers are known to be camelCase. The transform is
    /// identical; the distinction exists so descriptors document intent.
    LowerCaseUnderscoreFromCamel,
    /// Lower-case the leading upper-case run, leave the remainder
    /// unchanged: `MyClassName` → `myClassName`.
    CamelCaseFromPascal,
    /// Upper-case the leading character, leave the remainder unchanged:
    /// `myClassName` → `MyClassName`.
    PascalCaseLeading,
    /// Declared no-op. Output-equivalent to [`NamingPolicy::Identity`] but
    /// signals "explicitly unset" in descriptors, and terminates precedence
    /// fall-through exactly like any other declared policy.
    None,
}

impl NamingPolicy {
    /// Apply this policy's transform to a public identifier.
    ///
    /// Pure and total: defined for every well-formed identifier (non-empty,
    /// ASCII alphanumerics plus underscore), including single-character and
    /// already-correctly-cased inputs. Applying a policy twice is *not*
    /// guaranteed to be a no-op and callers must not assume idempotence.
    pub fn apply(&self, identifier: &str) -> String {
        match self {
            Self::Identity | Self::None => identifier.to_owned(),
            Self::LowerCaseUnderscore | Self::LowerCaseUnderscoreFromCamel => {
                lower_case_underscore(identifier)
            }
            Self::CamelCaseFromPascal => camel_case_from_pascal(identifier),
            Self::PascalCaseLeading => pascal_case_leading(identifier),
        }
    }

    /// Whether this policy leaves every identifier unchanged.
    pub fn is_identity(&self) -> bool {
        matches!(self, Self::Identity | Self::None)
    }
}

impl std::fmt::Display for NamingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Identity => "identity",
            Self::LowerCaseUnderscore => "lower_case_underscore",
            Self::LowerCaseUnderscoreFromCamel => "lower_case_underscore_from_camel",
            Self::CamelCaseFromPascal => "camel_case_from_pascal",
            Self::PascalCaseLeading => "pascal_case_leading",
            Self::None => "none",
        };
        f.write_str(s)
    }
}

// ─── Transform Functions ─────────────────────────────────────────────

/// Split on lower→upper transitions and existing underscores, lower-case
/// every segment, join with `_`.
///
/// An identifier with no case boundary is returned lower-cased without any
/// underscore being inserted. Consecutive upper-case characters are one
/// run, not several boundaries: `HTTPServer` → `httpserver`.
fn lower_case_underscore(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len() + 4);
    let mut prev_was_lower = false;
    for ch in identifier.chars() {
        if ch == '_' {
            out.push('_');
            prev_was_lower = false;
            continue;
        }
        if ch.is_ascii_uppercase() && prev_was_lower {
            out.push('_');
        }
        out.push(ch.to_ascii_lowercase());
        prev_was_lower = ch.is_ascii_lowercase();
    }
    out
}

/// Lower-case only the leading upper-case run, leaving the remainder
/// unchanged.
fn camel_case_from_pascal(identifier: &str) -> String {
    let run_len = identifier
        .chars()
        .take_while(|c| c.is_ascii_uppercase())
        .count();
    if run_len == 0 {
        return identifier.to_owned();
    }
    let (head, tail) = identifier.split_at(run_len);
    let mut out = head.to_ascii_lowercase();
    out.push_str(tail);
    out
}

/// Upper-case the leading character, leaving the remainder unchanged.
fn pascal_case_leading(identifier: &str) -> String {
    let mut chars = identifier.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(identifier.len());
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}
