//! # Schema Registry — The Bidirectional Name Table
//!
//! Aggregates every resolved name pair into a collision-checked table with
//! O(1) lookups in both directions, per namespace: class names schema-wide,
//! field names scoped by their owning class.
//!
//! ## Lifecycle
//!
//! `Unbuilt → Building → {Valid, Failed}`. "Building" is the body of
//! [`SchemaRegistry::build`] / [`SchemaRegistry::from_resolved`]; "Valid"
//! is a returned [`SchemaRegistry`] value; "Failed" is the [`SchemaError`]
//! in the `Err` arm. There is no partially-populated registry: the build
//! either completes whole or returns nothing but the diagnostic, and the
//! schema-open operation that requested it must abort.
//!
//! Once built, the registry is immutable. It has no interior mutability and
//! is `Send + Sync`, so query translators and introspection consumers may
//! read it concurrently without locking. Each build owns its registry —
//! independently opened schemas never share one.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use opal_core::ensure_well_formed;

use crate::declare::SchemaSource;
use crate::error::{NameNamespace, SchemaError};
use crate::resolve::{NameResolver, ResolvedClass, ResolvedName};

/// The resolved name table of one class: the class's own pair plus both
/// lookup directions over its fields.
#[derive(Debug, Clone)]
pub struct ClassMapping {
    name: ResolvedName,
    fields: Vec<ResolvedName>,
    fields_by_public: HashMap<String, usize>,
    fields_by_internal: HashMap<String, usize>,
}

impl ClassMapping {
    fn build(class: ResolvedClass) -> Result<Self, SchemaError> {
        let name = class.name().clone();
        let fields = class.fields().to_vec();
        let mut fields_by_public = HashMap::with_capacity(fields.len());
        let mut fields_by_internal = HashMap::with_capacity(fields.len());

        for (idx, field) in fields.iter().enumerate() {
            match fields_by_public.entry(field.public_name().to_owned()) {
                Entry::Occupied(_) => {
                    return Err(SchemaError::DuplicatePublicName {
                        namespace: NameNamespace::Fields {
                            class: name.internal_name().to_owned(),
                        },
                        public_name: field.public_name().to_owned(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(idx);
                }
            }
            if let Some(prev) = fields_by_internal.insert(field.internal_name().to_owned(), idx)
            {
                let first: &ResolvedName = &fields[prev];
                return Err(SchemaError::DuplicateInternalName {
                    namespace: NameNamespace::Fields {
                        class: name.internal_name().to_owned(),
                    },
                    internal_name: field.internal_name().to_owned(),
                    first: first.public_name().to_owned(),
                    second: field.public_name().to_owned(),
                });
            }
        }

        Ok(Self {
            name,
            fields,
            fields_by_public,
            fields_by_internal,
        })
    }

    /// The class's public name.
    pub fn public_name(&self) -> &str {
        self.name.public_name()
    }

    /// The class's internal (storage) name.
    pub fn internal_name(&self) -> &str {
        self.name.internal_name()
    }

    /// The class's resolved name pair.
    pub fn name(&self) -> &ResolvedName {
        &self.name
    }

    /// The field name pairs, in declaration order.
    pub fn fields(&self) -> &[ResolvedName] {
        &self.fields
    }

    /// Number of fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Look up a field's internal name by its public name.
    pub fn internal_field_name(&self, public_name: &str) -> Option<&str> {
        self.fields_by_public
            .get(public_name)
            .map(|&idx| self.fields[idx].internal_name())
    }

    /// Look up a field's public name by its internal name.
    pub fn public_field_name(&self, internal_name: &str) -> Option<&str> {
        self.fields_by_internal
            .get(internal_name)
            .map(|&idx| self.fields[idx].public_name())
    }

    /// Whether a field with this public name exists. For introspection
    /// consumers surfacing the names the schema author wrote.
    pub fn has_public_field(&self, public_name: &str) -> bool {
        self.fields_by_public.contains_key(public_name)
    }

    /// Whether a field with this internal name exists. For query
    /// translation consumers working in storage-engine names.
    pub fn has_internal_field(&self, internal_name: &str) -> bool {
        self.fields_by_internal.contains_key(internal_name)
    }
}

/// The immutable, bidirectional name table of one open schema.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    classes: Vec<ClassMapping>,
    by_public: HashMap<String, usize>,
    by_internal: HashMap<String, usize>,
}

impl SchemaRegistry {
    /// Resolve a schema snapshot and build its registry.
    ///
    /// Validates the declared source identifiers, runs the precedence
    /// resolver over every class and field, and ingests the result. This is
    /// the schema-open entry point.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] if any source identifier is malformed, any
    /// explicit override is empty, or two distinct names resolve to one
    /// internal name within a namespace. The failure is atomic; no registry
    /// exists afterwards.
    pub fn build<S: SchemaSource + ?Sized>(source: &S) -> Result<Self, SchemaError> {
        validate_declarations(source)?;
        let resolved = NameResolver::new(source).resolve();
        tracing::debug!(classes = resolved.len(), "resolved schema names");
        Self::from_resolved(resolved).map_err(|err| {
            tracing::error!(error = %err, "schema name registry build failed");
            err
        })
    }

    /// Build a registry from pre-resolved classes.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateInternalName`] or
    /// [`SchemaError::DuplicatePublicName`] on any collision, and
    /// [`SchemaError::InvalidIdentifier`] if a resolved internal name is
    /// empty. The failure is atomic.
    pub fn from_resolved(resolved: Vec<ResolvedClass>) -> Result<Self, SchemaError> {
        let mut classes = Vec::with_capacity(resolved.len());
        let mut by_public = HashMap::with_capacity(resolved.len());
        let mut by_internal = HashMap::with_capacity(resolved.len());

        for class in resolved {
            ensure_non_empty_internal(&class)?;
            let mapping = ClassMapping::build(class)?;
            let idx = classes.len();

            match by_public.entry(mapping.public_name().to_owned()) {
                Entry::Occupied(_) => {
                    return Err(SchemaError::DuplicatePublicName {
                        namespace: NameNamespace::Classes,
                        public_name: mapping.public_name().to_owned(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(idx);
                }
            }
            if let Some(prev) = by_internal.insert(mapping.internal_name().to_owned(), idx) {
                let first: &ClassMapping = &classes[prev];
                return Err(SchemaError::DuplicateInternalName {
                    namespace: NameNamespace::Classes,
                    internal_name: mapping.internal_name().to_owned(),
                    first: first.public_name().to_owned(),
                    second: mapping.public_name().to_owned(),
                });
            }
            classes.push(mapping);
        }

        Ok(Self {
            classes,
            by_public,
            by_internal,
        })
    }

    // ─── Class Namespace Lookups ─────────────────────────────────────

    /// Look up a class's internal name by its public name.
    pub fn internal_class_name(&self, public_name: &str) -> Option<&str> {
        self.class_by_public(public_name)
            .map(ClassMapping::internal_name)
    }

    /// Look up a class's public name by its internal name.
    pub fn public_class_name(&self, internal_name: &str) -> Option<&str> {
        self.class_by_internal(internal_name)
            .map(ClassMapping::public_name)
    }

    /// Whether a class with this public name exists. Schema-introspection
    /// consumers, which surface the names the author wrote, check here.
    pub fn contains_public(&self, public_name: &str) -> bool {
        self.by_public.contains_key(public_name)
    }

    /// Whether a class with this internal name exists. Query-translation
    /// consumers, which work in pre-resolved storage names, check here.
    pub fn contains_internal(&self, internal_name: &str) -> bool {
        self.by_internal.contains_key(internal_name)
    }

    /// The full mapping of a class, by public name.
    pub fn class_by_public(&self, public_name: &str) -> Option<&ClassMapping> {
        self.by_public.get(public_name).map(|&idx| &self.classes[idx])
    }

    /// The full mapping of a class, by internal name.
    pub fn class_by_internal(&self, internal_name: &str) -> Option<&ClassMapping> {
        self.by_internal
            .get(internal_name)
            .map(|&idx| &self.classes[idx])
    }

    // ─── Field Namespace Lookups ─────────────────────────────────────

    /// Look up a field's internal name, scoping by the owning class's
    /// public name. The public-to-internal direction used when translating
    /// an application-level query predicate.
    pub fn internal_field_name(&self, public_class: &str, public_field: &str) -> Option<&str> {
        self.class_by_public(public_class)?
            .internal_field_name(public_field)
    }

    /// Look up a field's public name, scoping by the owning class's
    /// internal name. The reverse direction used when surfacing storage
    /// names back to the application.
    pub fn public_field_name(&self, internal_class: &str, internal_field: &str) -> Option<&str> {
        self.class_by_internal(internal_class)?
            .public_field_name(internal_field)
    }

    // ─── Introspection ───────────────────────────────────────────────

    /// All class mappings, in declaration order.
    pub fn classes(&self) -> impl Iterator<Item = &ClassMapping> {
        self.classes.iter()
    }

    /// Number of classes in the schema.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the schema declares no classes.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Reject resolved classes whose internal name (or any field's internal
/// name) is empty. Cannot happen through [`SchemaRegistry::build`], which
/// validates declarations first, but [`SchemaRegistry::from_resolved`] is
/// public and accepts caller-constructed pairs.
fn ensure_non_empty_internal(class: &ResolvedClass) -> Result<(), SchemaError> {
    if class.name().internal_name().is_empty() {
        return Err(SchemaError::InvalidIdentifier {
            context: format!("class {:?}", class.name().public_name()),
            source: opal_core::IdentError::Empty,
        });
    }
    for field in class.fields() {
        if field.internal_name().is_empty() {
            return Err(SchemaError::InvalidIdentifier {
                context: format!(
                    "field {:?} of class {:?}",
                    field.public_name(),
                    class.name().public_name()
                ),
                source: opal_core::IdentError::Empty,
            });
        }
    }
    Ok(())
}

/// Validate every declared source identifier and explicit override before
/// resolution runs.
fn validate_declarations<S: SchemaSource + ?Sized>(source: &S) -> Result<(), SchemaError> {
    for class in source.classes() {
        let class_context = || format!("class {:?}", class.name);
        ensure_well_formed(&class.name).map_err(|err| SchemaError::InvalidIdentifier {
            context: class_context(),
            source: err,
        })?;
        if let Some(explicit) = class.policy.as_ref().and_then(|p| p.explicit_name.as_deref())
        {
            if explicit.is_empty() {
                return Err(SchemaError::EmptyExplicitName {
                    context: class_context(),
                });
            }
        }

        for field in &class.fields {
            let field_context = || format!("field {:?} of class {:?}", field.name, class.name);
            ensure_well_formed(&field.name).map_err(|err| SchemaError::InvalidIdentifier {
                context: field_context(),
                source: err,
            })?;
            if let Some(explicit) =
                field.policy.as_ref().and_then(|p| p.explicit_name.as_deref())
            {
                if explicit.is_empty() {
                    return Err(SchemaError::EmptyExplicitName {
                        context: field_context(),
                    });
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declare::{ClassDeclaration, FieldDeclaration, PolicyDeclaration, SchemaDescriptor};
    use opal_core::NamingPolicy;

    fn two_field_schema() -> SchemaDescriptor {
        SchemaDescriptor::new()
            .with_module(
                "store",
                PolicyDeclaration::unset()
                    .with_class_name_policy(NamingPolicy::LowerCaseUnderscore)
                    .with_field_name_policy(NamingPolicy::LowerCaseUnderscore),
            )
            .with_class(
                ClassDeclaration::new("PersonRecord")
                    .in_module("store")
                    .with_field(FieldDeclaration::new("firstName"))
                    .with_field(FieldDeclaration::new("lastName")),
            )
            .with_class(
                ClassDeclaration::new("AuditEvent")
                    .in_module("store")
                    .with_field(FieldDeclaration::new("recordedAt")),
            )
    }

    #[test]
    fn lookups_work_in_both_directions() {
        let registry = SchemaRegistry::build(&two_field_schema()).unwrap();

        assert_eq!(
            registry.internal_class_name("PersonRecord"),
            Some("person_record")
        );
        assert_eq!(
            registry.public_class_name("person_record"),
            Some("PersonRecord")
        );
        assert_eq!(
            registry.internal_field_name("PersonRecord", "firstName"),
            Some("first_name")
        );
        assert_eq!(
            registry.public_field_name("person_record", "first_name"),
            Some("firstName")
        );
        assert!(registry.contains_public("AuditEvent"));
        assert!(registry.contains_internal("audit_event"));
        assert!(!registry.contains_public("audit_event"));
        assert!(!registry.contains_internal("AuditEvent"));
    }

    #[test]
    fn missing_names_return_none() {
        let registry = SchemaRegistry::build(&two_field_schema()).unwrap();
        assert_eq!(registry.internal_class_name("Nope"), None);
        assert_eq!(registry.public_class_name("nope"), None);
        assert_eq!(registry.internal_field_name("PersonRecord", "nope"), None);
        assert_eq!(registry.internal_field_name("Nope", "firstName"), None);
        assert_eq!(registry.public_field_name("person_record", "nope"), None);
    }

    #[test]
    fn class_collision_fails_the_whole_build() {
        // Both class names transform to "shared_name" by coincidence of the
        // module policy; no precedence rule disambiguates, so build fails.
        let descriptor = SchemaDescriptor::new()
            .with_module(
                "store",
                PolicyDeclaration::unset()
                    .with_class_name_policy(NamingPolicy::LowerCaseUnderscore),
            )
            .with_class(ClassDeclaration::new("SharedName").in_module("store"))
            .with_class(ClassDeclaration::new("Shared_Name").in_module("store"));

        let err = SchemaRegistry::build(&descriptor).unwrap_err();
        match err {
            SchemaError::DuplicateInternalName {
                namespace,
                internal_name,
                first,
                second,
            } => {
                assert_eq!(namespace, NameNamespace::Classes);
                assert_eq!(internal_name, "shared_name");
                assert_eq!(first, "SharedName");
                assert_eq!(second, "Shared_Name");
            }
            other => panic!("expected DuplicateInternalName, got: {other}"),
        }
    }

    #[test]
    fn explicit_name_colliding_with_transform_fails() {
        let descriptor = SchemaDescriptor::new()
            .with_class(
                ClassDeclaration::new("First")
                    .with_policy(PolicyDeclaration::unset().with_explicit_name("clash")),
            )
            .with_class(
                ClassDeclaration::new("Clash").with_policy(
                    PolicyDeclaration::unset()
                        .with_class_name_policy(NamingPolicy::LowerCaseUnderscore),
                ),
            );
        assert!(matches!(
            SchemaRegistry::build(&descriptor).unwrap_err(),
            SchemaError::DuplicateInternalName { .. }
        ));
    }

    #[test]
    fn field_collision_is_scoped_to_its_class() {
        let descriptor = SchemaDescriptor::new().with_class(
            ClassDeclaration::new("Doc")
                .with_policy(
                    PolicyDeclaration::unset()
                        .with_field_name_policy(NamingPolicy::LowerCaseUnderscore),
                )
                .with_field(FieldDeclaration::new("someValue"))
                .with_field(FieldDeclaration::new("some_value")),
        );
        let err = SchemaRegistry::build(&descriptor).unwrap_err();
        match err {
            SchemaError::DuplicateInternalName {
                namespace: NameNamespace::Fields { class },
                internal_name,
                ..
            } => {
                assert_eq!(class, "Doc");
                assert_eq!(internal_name, "some_value");
            }
            other => panic!("expected field DuplicateInternalName, got: {other}"),
        }
    }

    #[test]
    fn same_internal_field_name_in_different_classes_is_fine() {
        let descriptor = SchemaDescriptor::new()
            .with_class(ClassDeclaration::new("A").with_field(FieldDeclaration::new("id")))
            .with_class(ClassDeclaration::new("B").with_field(FieldDeclaration::new("id")));
        let registry = SchemaRegistry::build(&descriptor).unwrap();
        assert_eq!(registry.internal_field_name("A", "id"), Some("id"));
        assert_eq!(registry.internal_field_name("B", "id"), Some("id"));
    }

    #[test]
    fn duplicate_public_class_name_is_rejected() {
        let descriptor = SchemaDescriptor::new()
            .with_class(
                ClassDeclaration::new("Twin")
                    .with_policy(PolicyDeclaration::unset().with_explicit_name("one")),
            )
            .with_class(
                ClassDeclaration::new("Twin")
                    .with_policy(PolicyDeclaration::unset().with_explicit_name("two")),
            );
        assert!(matches!(
            SchemaRegistry::build(&descriptor).unwrap_err(),
            SchemaError::DuplicatePublicName {
                namespace: NameNamespace::Classes,
                ..
            }
        ));
    }

    #[test]
    fn malformed_source_identifier_is_rejected() {
        let descriptor =
            SchemaDescriptor::new().with_class(ClassDeclaration::new("bad-name"));
        assert!(matches!(
            SchemaRegistry::build(&descriptor).unwrap_err(),
            SchemaError::InvalidIdentifier { .. }
        ));
    }

    #[test]
    fn empty_explicit_override_is_rejected() {
        let descriptor = SchemaDescriptor::new().with_class(
            ClassDeclaration::new("Ok")
                .with_field(FieldDeclaration::new("value").with_explicit_name("")),
        );
        assert!(matches!(
            SchemaRegistry::build(&descriptor).unwrap_err(),
            SchemaError::EmptyExplicitName { .. }
        ));
    }

    #[test]
    fn explicit_override_may_contain_non_identifier_characters() {
        // Verbatim literals are not held to source-identifier rules.
        let descriptor = SchemaDescriptor::new().with_class(
            ClassDeclaration::new("DefaultPolicyFromModule")
                .with_policy(
                    PolicyDeclaration::unset().with_explicit_name("default-policy-from-module"),
                )
                .with_field(FieldDeclaration::new("camelCase").with_explicit_name("camel-case")),
        );
        let registry = SchemaRegistry::build(&descriptor).unwrap();
        assert!(registry.contains_internal("default-policy-from-module"));
        assert_eq!(
            registry.internal_field_name("DefaultPolicyFromModule", "camelCase"),
            Some("camel-case")
        );
    }

    #[test]
    fn empty_schema_builds_to_empty_registry() {
        let registry = SchemaRegistry::build(&SchemaDescriptor::new()).unwrap();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn registry_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SchemaRegistry>();
    }

    #[test]
    fn from_resolved_rejects_empty_internal_names() {
        let resolved = vec![ResolvedClass::new(
            ResolvedName::new("Public", ""),
            Vec::new(),
        )];
        assert!(matches!(
            SchemaRegistry::from_resolved(resolved).unwrap_err(),
            SchemaError::InvalidIdentifier { .. }
        ));
    }
}
