use std::sync::Arc;

use indexmap::IndexMap;
use pretty_assertions::assert_eq;

use super::fixtures::{blog_registry, luke, r2d2, star_wars_registry, star_wars_wiring};
use crate::{
    ast::{
        Definition, FieldDefinition, ObjectTypeDefinition, SchemaDefinition, Type,
        TypeExtensionDefinition, TypeKind,
    },
    schema::{
        factory::StaticWiringFactory,
        generator::{SchemaGenerator, assemble},
        meta::{MetaType, TypeType},
        model::TypeGraph,
        registry::TypeDefinitionRegistry,
        resolvers::{
            DataFetchingEnvironment, FieldResolver, FieldResult, TypeResolutionEnvironment,
        },
        wiring::{RuntimeWiring, TypeRuntimeWiring},
    },
    value::Value,
};

fn names(graph: &TypeGraph) -> Vec<&str> {
    graph.type_names().map(|n| n.as_str()).collect()
}

fn resolve(graph: &TypeGraph, type_name: &str, field_name: &str, source: &Value) -> FieldResult {
    let field = graph
        .type_by_name(type_name)
        .and_then(|t| t.field_by_name(field_name))
        .unwrap_or_else(|| panic!("no field `{type_name}.{field_name}`"));
    let arguments = IndexMap::new();
    field.resolver.resolve(&DataFetchingEnvironment {
        source,
        arguments: &arguments,
        field_name,
    })
}

fn hello_registry() -> TypeDefinitionRegistry {
    TypeDefinitionRegistry::from_definitions([
        Definition::from(SchemaDefinition::query("Query")),
        ObjectTypeDefinition::new("Query")
            .field(FieldDefinition::new("hello", Type::named("String")))
            .field(FieldDefinition::new("greeting", Type::named("String")))
            .into(),
    ])
    .unwrap()
}

#[test]
fn star_wars_types_in_first_reach_order() {
    let graph = assemble(&star_wars_registry(), &star_wars_wiring()).unwrap();

    assert_eq!(
        names(&graph),
        ["Query", "Episode", "Character", "ID", "String", "Human", "Droid", "SearchResult"],
    );
    assert_eq!(graph.query_type().name().as_str(), "Query");
    assert!(graph.mutation_type().is_none());
    assert!(graph.subscription_type().is_none());

    let search = graph.query_type().field_by_name("search").unwrap();
    assert_eq!(search.field_type.to_string(), "[SearchResult!]!");
    assert_eq!(
        graph
            .concrete_type(&search.field_type)
            .map(|t| t.type_kind()),
        Some(TypeKind::Union),
    );

    let human = graph.type_by_name("Human").unwrap();
    assert_eq!(
        human.interface_names().iter().map(|n| n.as_str()).collect::<Vec<_>>(),
        ["Character"],
    );
    assert_eq!(
        graph
            .type_by_name("SearchResult")
            .unwrap()
            .possible_type_names()
            .iter()
            .map(|n| n.as_str())
            .collect::<Vec<_>>(),
        ["Human", "Droid"],
    );
}

#[test]
fn interface_refers_to_itself_through_a_placeholder() {
    let graph = assemble(&star_wars_registry(), &star_wars_wiring()).unwrap();

    let character = graph.type_by_name("Character").unwrap();
    let friends = &character.field_by_name("friends").unwrap().field_type;
    assert!(friends.is_list());
    assert!(friends.of_type().unwrap().is_placeholder());
    assert!(Arc::ptr_eq(graph.concrete_type(friends).unwrap(), character));

    // Built after `Character` was finished, so no placeholder here.
    let human_friends = &graph
        .type_by_name("Human")
        .and_then(|h| h.field_by_name("friends"))
        .unwrap()
        .field_type;
    assert!(Arc::ptr_eq(human_friends.innermost_concrete().unwrap(), character));
}

#[test]
fn repeated_assembly_is_deterministic() {
    let registry = star_wars_registry();
    let wiring = star_wars_wiring();

    let first = assemble(&registry, &wiring).unwrap();
    let second = SchemaGenerator::new()
        .make_executable_schema(&registry, &wiring)
        .unwrap();

    assert_eq!(names(&first), names(&second));
    for (name, meta) in first.types() {
        let other = second.type_by_name(name).unwrap();
        assert_eq!(meta.type_kind(), other.type_kind());
        for (a, b) in meta.fields().iter().zip(other.fields()) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.field_type.to_string(), b.field_type.to_string());
            match (&a.resolver, &b.resolver) {
                (FieldResolver::Fetcher(x), FieldResolver::Fetcher(y)) => {
                    assert!(Arc::ptr_eq(x, y), "`{name}.{}` rebound", a.name);
                }
                (FieldResolver::Property(x), FieldResolver::Property(y)) => assert_eq!(x, y),
                _ => panic!("`{name}.{}` resolved differently", a.name),
            }
        }
    }
}

#[test]
fn wired_fetchers_and_type_resolvers_run_end_to_end() {
    let graph = assemble(&star_wars_registry(), &star_wars_wiring()).unwrap();

    let hero = resolve(&graph, "Query", "hero", &Value::Null).unwrap();
    assert_eq!(hero, r2d2());

    let character = graph.type_by_name("Character").unwrap();
    let concrete = character
        .type_resolver()
        .unwrap()
        .resolve_type(&TypeResolutionEnvironment {
            value: &hero,
            abstract_type: "Character",
        })
        .unwrap();
    assert_eq!(concrete.as_str(), "Droid");

    // Unwired fields fall back to reading same-named properties.
    assert_eq!(
        resolve(&graph, concrete.as_str(), "primaryFunction", &hero),
        Ok(Value::from("Astromech")),
    );
    assert_eq!(
        resolve(&graph, "Human", "homePlanet", &luke()),
        Ok(Value::from("Tatooine")),
    );
    assert_eq!(resolve(&graph, "Human", "friends", &luke()), Ok(Value::Null));

    let found = resolve(&graph, "Query", "search", &Value::Null).unwrap();
    let Value::List(found) = found else {
        panic!("`search` should resolve to a list");
    };
    let union = graph.type_by_name("SearchResult").unwrap();
    let kinds = found
        .iter()
        .map(|value| {
            union.type_resolver().unwrap().resolve_type(&TypeResolutionEnvironment {
                value,
                abstract_type: "SearchResult",
            })
        })
        .collect::<Vec<_>>();
    assert_eq!(
        kinds,
        [Some(arcstr::literal!("Human")), Some(arcstr::literal!("Droid"))],
    );
}

#[test]
fn hello_resolves_to_hi() {
    let wiring = RuntimeWiring::builder()
        .type_wiring(
            TypeRuntimeWiring::new_type_wiring("Query")
                .data_fetcher("hello", |_: &DataFetchingEnvironment<'_>| -> FieldResult {
                    Ok(Value::from("hi"))
                })
                .build(),
        )
        .build();

    let graph = assemble(&hello_registry(), &wiring).unwrap();

    assert_eq!(names(&graph), ["Query", "String"]);
    assert_eq!(
        resolve(&graph, "Query", "hello", &Value::Null),
        Ok(Value::from("hi")),
    );
}

#[test]
fn single_hello_field_is_bound_to_its_wired_fetcher() {
    let registry = TypeDefinitionRegistry::from_definitions([
        Definition::from(SchemaDefinition::query("Query")),
        ObjectTypeDefinition::new("Query")
            .field(FieldDefinition::new("hello", Type::named("String")))
            .into(),
    ])
    .unwrap();
    let wiring = RuntimeWiring::builder()
        .type_wiring(
            TypeRuntimeWiring::new_type_wiring("Query")
                .data_fetcher("hello", |_: &DataFetchingEnvironment<'_>| -> FieldResult {
                    Ok(Value::from("hi"))
                })
                .build(),
        )
        .build();

    let graph = assemble(&registry, &wiring).unwrap();

    let query = graph.query_type();
    assert_eq!(query.fields().len(), 1);
    let hello = &query.fields()[0];
    assert_eq!(hello.name.as_str(), "hello");
    assert_eq!(hello.field_type.to_string(), "String");
    assert_eq!(
        graph.concrete_type(&hello.field_type).map(|t| t.type_kind()),
        Some(TypeKind::Scalar),
    );
    assert!(
        hello
            .resolver
            .is_fetcher(wiring.data_fetcher("Query", "hello").unwrap())
    );
}

#[test]
fn extension_parts_assembly_cannot_use_are_ignored() {
    let mut registry = star_wars_registry();
    registry
        .add(TypeExtensionDefinition::new("Character").implements("Ghost"))
        .unwrap();
    registry
        .add(
            TypeExtensionDefinition::new("Episode")
                .field(FieldDefinition::new("ghost", Type::named("Ghost"))),
        )
        .unwrap();

    let graph = assemble(&registry, &star_wars_wiring()).unwrap();

    assert!(graph.type_by_name("Ghost").is_none());
    assert!(graph.type_by_name("Character").unwrap().interface_names().is_empty());
    let episode = graph.type_by_name("Episode").unwrap();
    assert!(episode.fields().is_empty());
    let MetaType::Enum(episode) = &**episode else {
        panic!("`Episode` should be an enum");
    };
    assert_eq!(episode.values.len(), 3);
}

#[test]
fn unwired_field_reads_its_property() {
    let graph = assemble(&hello_registry(), &RuntimeWiring::default()).unwrap();

    let greeting = graph.query_type().field_by_name("greeting").unwrap();
    assert_eq!(greeting.resolver.property_name(), Some("greeting"));
    assert_eq!(
        resolve(
            &graph,
            "Query",
            "greeting",
            &Value::object([("greeting", Value::from("hello"))]),
        ),
        Ok(Value::from("hello")),
    );
    assert_eq!(
        resolve(&graph, "Query", "greeting", &Value::Null),
        Ok(Value::Null),
    );
}

#[test]
fn factory_serves_fields_of_every_type() {
    let wiring = RuntimeWiring::builder()
        .wiring_factory(StaticWiringFactory::new().data_fetcher(
            "name",
            |env: &DataFetchingEnvironment<'_>| -> FieldResult {
                Ok(Value::from(format!("factory {}", env.field_name)))
            },
        ))
        .build();

    let graph = assemble(&star_wars_registry(), &wiring).unwrap();

    for type_name in ["Human", "Droid", "Character"] {
        assert_eq!(
            resolve(&graph, type_name, "name", &luke()),
            Ok(Value::from("factory name")),
        );
    }
    assert!(
        !graph
            .type_by_name("Character")
            .unwrap()
            .type_resolver()
            .unwrap()
            .is_wired(),
    );
}

#[test]
fn self_referencing_type_assembles() {
    let registry = TypeDefinitionRegistry::from_definitions([
        Definition::from(SchemaDefinition::query("Query")),
        ObjectTypeDefinition::new("Query")
            .field(FieldDefinition::new("node", Type::named("Node")))
            .into(),
        ObjectTypeDefinition::new("Node")
            .field(FieldDefinition::new("self", Type::named("Node")))
            .into(),
    ])
    .unwrap();

    let graph = assemble(&registry, &RuntimeWiring::default()).unwrap();

    assert_eq!(names(&graph), ["Query", "Node"]);
    let node = graph.type_by_name("Node").unwrap();
    let own = &node.field_by_name("self").unwrap().field_type;
    assert!(matches!(own, TypeType::Placeholder(name) if name.as_str() == "Node"));
    assert!(Arc::ptr_eq(graph.concrete_type(own).unwrap(), node));
}

#[test]
fn blog_assembles_with_mutual_references_and_input_defaults() {
    let graph = assemble(&blog_registry(), &RuntimeWiring::default()).unwrap();

    assert_eq!(
        names(&graph),
        ["Query", "Int", "PostFilter", "String", "Boolean", "Post", "ID", "Author"],
    );

    let posts = graph.query_type().field_by_name("posts").unwrap();
    assert_eq!(posts.field_type.to_string(), "[Post!]!");
    assert_eq!(
        posts.argument_by_name("first").unwrap().default_value,
        Some(Value::from(10)),
    );

    let filter = graph.type_by_name("PostFilter").unwrap();
    assert!(filter.is_input());
    assert_eq!(
        filter.input_field_by_name("published").unwrap().default_value,
        Some(Value::from(true)),
    );
    assert_eq!(filter.input_field_by_name("tag").unwrap().default_value, None);

    let post = graph.type_by_name("Post").unwrap();
    let author = graph.type_by_name("Author").unwrap();
    assert_eq!(
        post.field_by_name("author").unwrap().field_type.to_string(),
        "Author!",
    );
    let back = &author.field_by_name("posts").unwrap().field_type;
    assert!(back.of_type().unwrap().is_placeholder());
    assert!(Arc::ptr_eq(graph.concrete_type(back).unwrap(), post));
    assert!(matches!(
        author
            .field_by_name("posts")
            .unwrap()
            .argument_by_name("filter")
            .unwrap()
            .arg_type
            .as_concrete()
            .map(|t| &**t),
        Some(MetaType::InputObject(_)),
    ));
}

#[test]
fn extensions_added_later_show_up_in_the_graph() {
    let mut registry = hello_registry();
    registry
        .add(
            TypeExtensionDefinition::new("Query")
                .field(FieldDefinition::new("answer", Type::named("Int"))),
        )
        .unwrap();
    registry
        .add(
            TypeExtensionDefinition::new("Query")
                .field(FieldDefinition::new("hello", Type::named("Boolean")))
                .field(FieldDefinition::new("ready", Type::named("Boolean"))),
        )
        .unwrap();

    let graph = assemble(&registry, &RuntimeWiring::default()).unwrap();

    assert_eq!(
        graph
            .query_type()
            .fields()
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>(),
        ["hello", "greeting", "answer", "ready"],
    );
    assert_eq!(
        graph
            .query_type()
            .field_by_name("hello")
            .unwrap()
            .field_type
            .to_string(),
        "String",
    );
}
