//! # Name Resolution — The Precedence Algorithm
//!
//! Computes exactly one public/internal name pair for every class and every
//! field, applying a strict override chain, highest priority first:
//!
//! ```text
//! class name:  class explicit_name  ▶ class class_name_policy
//!              ▶ module class_name_policy ▶ Identity
//! field name:  field explicit_name  ▶ class field_name_policy
//!              ▶ module field_name_policy ▶ Identity
//! ```
//!
//! Once a level supplies a value for a name-kind, lower-priority levels are
//! ignored entirely for that name-kind — there is no partial merging across
//! levels. A declared `NamingPolicy::None` terminates the chain like any
//! other policy; only true absence (`Option::None`) falls through.
//!
//! Resolution cannot fail. Collisions between resolved internal names are
//! detected by the registry, not here.

use opal_core::NamingPolicy;
use serde::{Deserialize, Serialize};

use crate::declare::{ClassDeclaration, FieldDeclaration, PolicyDeclaration, SchemaSource};

/// An immutable public/internal name pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedName {
    public_name: String,
    internal_name: String,
}

impl ResolvedName {
    /// Create a resolved pair.
    pub fn new(public_name: impl Into<String>, internal_name: impl Into<String>) -> Self {
        Self {
            public_name: public_name.into(),
            internal_name: internal_name.into(),
        }
    }

    /// The identifier the schema author wrote.
    pub fn public_name(&self) -> &str {
        &self.public_name
    }

    /// The identifier the storage engine uses.
    pub fn internal_name(&self) -> &str {
        &self.internal_name
    }
}

impl std::fmt::Display for ResolvedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.public_name, self.internal_name)
    }
}

/// The fully resolved names of one class: its own pair plus one pair per
/// field, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedClass {
    name: ResolvedName,
    fields: Vec<ResolvedName>,
}

impl ResolvedClass {
    /// Assemble a resolved class from its name pair and field pairs.
    pub fn new(name: ResolvedName, fields: Vec<ResolvedName>) -> Self {
        Self { name, fields }
    }

    /// The class's own name pair.
    pub fn name(&self) -> &ResolvedName {
        &self.name
    }

    /// The field name pairs, in declaration order.
    pub fn fields(&self) -> &[ResolvedName] {
        &self.fields
    }
}

/// Applies the precedence algorithm over one [`SchemaSource`] snapshot.
pub struct NameResolver<'a, S: SchemaSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: SchemaSource + ?Sized> NameResolver<'a, S> {
    /// Create a resolver over a schema snapshot.
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Resolve every declared class and all of its fields.
    pub fn resolve(&self) -> Vec<ResolvedClass> {
        self.source
            .classes()
            .iter()
            .map(|class| self.resolve_class(class))
            .collect()
    }

    /// Resolve one class and all of its fields.
    pub fn resolve_class(&self, class: &ClassDeclaration) -> ResolvedClass {
        let module_policy = class
            .module
            .as_deref()
            .and_then(|m| self.source.module_policy(m));

        let name = ResolvedName::new(
            class.name.clone(),
            resolve_class_name(class, module_policy),
        );
        let fields = class
            .fields
            .iter()
            .map(|field| {
                ResolvedName::new(
                    field.name.clone(),
                    resolve_field_name(field, class, module_policy),
                )
            })
            .collect();

        ResolvedClass::new(name, fields)
    }
}

/// Resolve a class's internal name against its own and its module's
/// declarations.
fn resolve_class_name(
    class: &ClassDeclaration,
    module_policy: Option<&PolicyDeclaration>,
) -> String {
    if let Some(explicit) = class.policy.as_ref().and_then(|p| p.explicit_name.as_deref()) {
        return explicit.to_owned();
    }
    if let Some(policy) = class.policy.as_ref().and_then(|p| p.class_name_policy) {
        return policy.apply(&class.name);
    }
    if let Some(policy) = module_policy.and_then(|p| p.class_name_policy) {
        return policy.apply(&class.name);
    }
    NamingPolicy::Identity.apply(&class.name)
}

/// Resolve a field's internal name against its own, its class's, and its
/// module's declarations.
fn resolve_field_name(
    field: &FieldDeclaration,
    class: &ClassDeclaration,
    module_policy: Option<&PolicyDeclaration>,
) -> String {
    if let Some(explicit) = field.policy.as_ref().and_then(|p| p.explicit_name.as_deref()) {
        return explicit.to_owned();
    }
    if let Some(policy) = class.policy.as_ref().and_then(|p| p.field_name_policy) {
        return policy.apply(&field.name);
    }
    if let Some(policy) = module_policy.and_then(|p| p.field_name_policy) {
        return policy.apply(&field.name);
    }
    NamingPolicy::Identity.apply(&field.name)
}
