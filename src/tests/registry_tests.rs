use pretty_assertions::assert_eq;

use super::fixtures::{blog_registry, star_wars_definitions, star_wars_registry, star_wars_wiring};
use crate::{
    ast::{
        Definition, FieldDefinition, ObjectTypeDefinition, ScalarTypeDefinition,
        SchemaDefinition, Type, TypeDefinition, TypeExtensionDefinition,
    },
    error::{SchemaError, SchemaRedefinitionError, TypeRedefinitionError},
    parser::SourcePosition,
    schema::{generator::assemble, registry::TypeDefinitionRegistry, wiring::RuntimeWiring},
};

fn object_at(name: &str, line: usize) -> TypeDefinition {
    TypeDefinition::from(ObjectTypeDefinition::new(name)).at(SourcePosition::new(line, 1))
}

#[test]
fn redefinition_is_rejected_but_extensions_accumulate() {
    let mut registry = TypeDefinitionRegistry::new();
    registry
        .add(
            TypeDefinition::from(
                ObjectTypeDefinition::new("Foo")
                    .field(FieldDefinition::new("a", Type::named("Int"))),
            )
            .at(SourcePosition::new(1, 1)),
        )
        .unwrap();

    let problem = registry
        .add(object_at("Foo", 9))
        .unwrap_err();
    assert_eq!(
        problem.errors(),
        [SchemaError::from(TypeRedefinitionError {
            name: "Foo".into(),
            location: SourcePosition::new(9, 1),
            existing_location: SourcePosition::new(1, 1),
        })],
    );

    for field in ["b", "c"] {
        registry
            .add(
                TypeExtensionDefinition::new("Foo")
                    .field(FieldDefinition::new(field, Type::named("Int"))),
            )
            .unwrap();
    }
    assert_eq!(registry.extensions_of("Foo").len(), 2);
    assert!(registry.extensions_of("Bar").is_empty());
}

#[test]
fn scalars_and_types_share_one_namespace() {
    let mut registry = TypeDefinitionRegistry::new();
    registry.add(ScalarTypeDefinition::new("Date")).unwrap();

    let problem = registry.add(ObjectTypeDefinition::new("Date")).unwrap_err();

    assert!(matches!(
        problem.errors(),
        [SchemaError::TypeRedefinition(e)] if e.name.as_str() == "Date",
    ));
    assert!(registry.scalars().contains_key("Date"));
    assert!(registry.scalars().contains_key("String"));
    assert!(!registry.types().contains_key("Date"));
}

#[test]
fn merging_disjoint_registries_assembles_as_one() {
    fn is_droid(def: &Definition) -> bool {
        matches!(def, Definition::Type(d) if d.name().as_str() == "Droid")
    }

    let mut registry = TypeDefinitionRegistry::from_definitions(
        star_wars_definitions().into_iter().filter(|d| !is_droid(d)),
    )
    .unwrap();
    let droids = TypeDefinitionRegistry::from_definitions(
        star_wars_definitions().into_iter().filter(is_droid),
    )
    .unwrap();
    assert!(droids.schema_definition().is_none());

    registry.merge(droids).unwrap();

    let merged = assemble(&registry, &star_wars_wiring()).unwrap();
    let reference = assemble(&star_wars_registry(), &star_wars_wiring()).unwrap();
    assert_eq!(
        merged.type_names().collect::<Vec<_>>(),
        reference.type_names().collect::<Vec<_>>(),
    );
}

#[test]
fn merge_reports_every_conflict_and_changes_nothing() {
    let mut registry = star_wars_registry();
    let before = registry.types().keys().cloned().collect::<Vec<_>>();

    let other = TypeDefinitionRegistry::from_definitions([
        Definition::from(SchemaDefinition::query("Query").at(SourcePosition::new(1, 1))),
        object_at("Human", 3).into(),
        object_at("Post", 5).into(),
        object_at("Droid", 7).into(),
    ])
    .unwrap();

    let problem = registry.merge(other).unwrap_err();

    assert_eq!(
        problem.errors(),
        [
            SchemaError::from(TypeRedefinitionError {
                name: "Human".into(),
                location: SourcePosition::new(3, 1),
                existing_location: SourcePosition::unknown(),
            }),
            TypeRedefinitionError {
                name: "Droid".into(),
                location: SourcePosition::new(7, 1),
                existing_location: SourcePosition::unknown(),
            }
            .into(),
            SchemaRedefinitionError {
                location: SourcePosition::new(1, 1),
                existing_location: SourcePosition::unknown(),
            }
            .into(),
        ],
    );
    assert_eq!(registry.types().keys().cloned().collect::<Vec<_>>(), before);
    assert!(registry.get_type_by_name("Post").is_none());
}

#[test]
fn two_schema_definitions_cannot_be_merged() {
    let mut registry = blog_registry();
    let other = TypeDefinitionRegistry::from_definitions([SchemaDefinition::query("Other")])
        .unwrap();

    let problem = registry.merge(other).unwrap_err();

    assert!(matches!(
        problem.errors(),
        [SchemaError::SchemaRedefinition(_)],
    ));
    assert_eq!(
        problem.to_string(),
        "SchemaProblem{errors=[There is already a schema defined [@unknown]. \
         The offending new one is here [@unknown]]}",
    );
    assert!(assemble(&registry, &RuntimeWiring::default()).is_ok());
}
