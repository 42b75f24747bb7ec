//! # Schema Declarations — The Resolver's Input Boundary
//!
//! Plain data describing what the schema author declared: classes, their
//! owning modules, their fields, and the naming policies or explicit name
//! overrides attached at each scope. The original binding discovered these
//! through runtime annotation scanning; here they are explicit static data
//! assembled at init time (hand-built, generated, or deserialized from a
//! descriptor document) and handed to the resolver through the
//! [`SchemaSource`] trait.
//!
//! ## Unset vs Declared
//!
//! Every policy slot is an `Option<NamingPolicy>`. `Option::None` means the
//! scope declared nothing and precedence falls through to the next level.
//! `Some(NamingPolicy::None)` is a *declared* no-op that terminates the
//! chain. The resolver depends on this distinction; do not collapse it.

use std::collections::BTreeMap;

use opal_core::NamingPolicy;
use serde::{Deserialize, Serialize};

/// Naming directives attached to one scope (module, class, or field).
///
/// Which slots are meaningful depends on the scope: `class_name_policy`
/// at module/class scope, `field_name_policy` at module/class scope
/// (covering all fields of classes in that scope), `explicit_name` at
/// class/field scope. Slots that are meaningless for a scope are ignored
/// by the resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyDeclaration {
    /// Transform applied to class names in this scope.
    pub class_name_policy: Option<NamingPolicy>,
    /// Transform applied to field names of classes in this scope.
    pub field_name_policy: Option<NamingPolicy>,
    /// Literal internal-name override. Verbatim, no transform applied, and
    /// not subject to source-identifier well-formedness rules.
    pub explicit_name: Option<String>,
}

impl PolicyDeclaration {
    /// A declaration with every slot unset.
    pub fn unset() -> Self {
        Self::default()
    }

    /// Set the class-name policy.
    pub fn with_class_name_policy(mut self, policy: NamingPolicy) -> Self {
        self.class_name_policy = Some(policy);
        self
    }

    /// Set the field-name policy.
    pub fn with_field_name_policy(mut self, policy: NamingPolicy) -> Self {
        self.field_name_policy = Some(policy);
        self
    }

    /// Set the explicit literal name override.
    pub fn with_explicit_name(mut self, name: impl Into<String>) -> Self {
        self.explicit_name = Some(name.into());
        self
    }

    /// Whether no slot is declared at all.
    pub fn is_unset(&self) -> bool {
        self.class_name_policy.is_none()
            && self.field_name_policy.is_none()
            && self.explicit_name.is_none()
    }
}

/// One declared field of a class.
///
/// Only `explicit_name` is meaningful in a field-scope policy; the two
/// policy slots are ignored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    /// The source field name as the author wrote it.
    pub name: String,
    /// Field-scope naming directives, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<PolicyDeclaration>,
}

impl FieldDeclaration {
    /// A field with no declared policy.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            policy: None,
        }
    }

    /// Attach a field-scope policy declaration.
    pub fn with_policy(mut self, policy: PolicyDeclaration) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Shorthand for attaching an explicit name override.
    pub fn with_explicit_name(self, name: impl Into<String>) -> Self {
        self.with_policy(PolicyDeclaration::unset().with_explicit_name(name))
    }
}

/// One declared class: its source name, owning module (zero or one), its
/// own policy declaration, and its ordered fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDeclaration {
    /// The source class name as the author wrote it.
    pub name: String,
    /// Name of the owning module, if the class belongs to one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    /// Class-scope naming directives, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<PolicyDeclaration>,
    /// The class's fields, in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldDeclaration>,
}

impl ClassDeclaration {
    /// A class with no module, no policy, and no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: None,
            policy: None,
            fields: Vec::new(),
        }
    }

    /// Associate the class with its owning module.
    pub fn in_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    /// Attach a class-scope policy declaration.
    pub fn with_policy(mut self, policy: PolicyDeclaration) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Append a field declaration.
    pub fn with_field(mut self, field: FieldDeclaration) -> Self {
        self.fields.push(field);
        self
    }
}

/// The input boundary between schema authoring and name resolution.
///
/// Implementors enumerate the declared classes and answer module-policy
/// lookups. The resolver makes no assumption about how the declarations
/// were produced — only that the snapshot is complete and stable for the
/// duration of one registry build.
pub trait SchemaSource {
    /// All declared classes, in a stable order.
    fn classes(&self) -> &[ClassDeclaration];

    /// The policy declaration attached to the named module, if any.
    fn module_policy(&self, module_name: &str) -> Option<&PolicyDeclaration>;
}

/// An in-memory, serializable [`SchemaSource`].
///
/// This is the descriptor-document form of a schema: module policies keyed
/// by module name plus the class list. Authored by hand in tests, or
/// deserialized from JSON produced by whatever tooling replaces the
/// original annotation processor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaDescriptor {
    /// Module-scope policy declarations, keyed by module name.
    pub modules: BTreeMap<String, PolicyDeclaration>,
    /// All declared classes.
    pub classes: Vec<ClassDeclaration>,
}

impl SchemaDescriptor {
    /// An empty descriptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a module-scope policy.
    pub fn with_module(mut self, name: impl Into<String>, policy: PolicyDeclaration) -> Self {
        self.modules.insert(name.into(), policy);
        self
    }

    /// Append a class declaration.
    pub fn with_class(mut self, class: ClassDeclaration) -> Self {
        self.classes.push(class);
        self
    }
}

impl SchemaSource for SchemaDescriptor {
    fn classes(&self) -> &[ClassDeclaration] {
        &self.classes
    }

    fn module_policy(&self, module_name: &str) -> Option<&PolicyDeclaration> {
        self.modules.get(module_name)
    }
}
