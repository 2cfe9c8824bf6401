//! Schemas shared by the library tests

use arcstr::ArcStr;

use crate::{
    ast::{
        Definition, EnumTypeDefinition, FieldDefinition, InputObjectTypeDefinition, InputValue,
        InputValueDefinition, InterfaceTypeDefinition, ObjectTypeDefinition, SchemaDefinition,
        Type, UnionTypeDefinition,
    },
    schema::{
        registry::TypeDefinitionRegistry,
        resolvers::{DataFetchingEnvironment, FieldResult, TypeResolutionEnvironment},
        wiring::{RuntimeWiring, TypeRuntimeWiring},
    },
    value::Value,
};

fn character_fields<T>(def: T, field: impl Fn(T, FieldDefinition) -> T) -> T {
    [
        FieldDefinition::new("id", Type::named("ID").non_null()),
        FieldDefinition::new("name", Type::named("String")),
        FieldDefinition::new("friends", Type::list(Type::named("Character"))),
        FieldDefinition::new("appearsIn", Type::list(Type::named("Episode"))),
    ]
    .into_iter()
    .fold(def, field)
}

/// The Star Wars schema:
///
/// ```graphql
/// schema { query: Query }
///
/// enum Episode { NEW_HOPE EMPIRE JEDI }
///
/// interface Character {
///     id: ID!
///     name: String
///     friends: [Character]
///     appearsIn: [Episode]
/// }
///
/// type Human implements Character { ...Character homePlanet: String }
/// type Droid implements Character { ...Character primaryFunction: String }
///
/// union SearchResult = Human | Droid
///
/// type Query {
///     hero(episode: Episode = JEDI): Character
///     human(id: String!): Human
///     droid(id: String!): Droid
///     search(text: String!): [SearchResult!]!
/// }
/// ```
pub(crate) fn star_wars_definitions() -> Vec<Definition> {
    vec![
        SchemaDefinition::query("Query").into(),
        EnumTypeDefinition::new("Episode", ["NEW_HOPE", "EMPIRE", "JEDI"]).into(),
        character_fields(
            InterfaceTypeDefinition::new("Character"),
            InterfaceTypeDefinition::field,
        )
        .into(),
        character_fields(
            ObjectTypeDefinition::new("Human").implements("Character"),
            ObjectTypeDefinition::field,
        )
        .field(FieldDefinition::new("homePlanet", Type::named("String")))
        .into(),
        character_fields(
            ObjectTypeDefinition::new("Droid").implements("Character"),
            ObjectTypeDefinition::field,
        )
        .field(FieldDefinition::new("primaryFunction", Type::named("String")))
        .into(),
        UnionTypeDefinition::new("SearchResult", ["Human", "Droid"]).into(),
        ObjectTypeDefinition::new("Query")
            .field(
                FieldDefinition::new("hero", Type::named("Character")).argument(
                    InputValueDefinition::new("episode", Type::named("Episode"))
                        .default_value(InputValue::enum_value("JEDI")),
                ),
            )
            .field(
                FieldDefinition::new("human", Type::named("Human"))
                    .argument(InputValueDefinition::new("id", Type::named("String").non_null())),
            )
            .field(
                FieldDefinition::new("droid", Type::named("Droid"))
                    .argument(InputValueDefinition::new("id", Type::named("String").non_null())),
            )
            .field(
                FieldDefinition::new(
                    "search",
                    Type::list(Type::named("SearchResult").non_null()).non_null(),
                )
                .argument(InputValueDefinition::new("text", Type::named("String").non_null())),
            )
            .into(),
    ]
}

pub(crate) fn star_wars_registry() -> TypeDefinitionRegistry {
    TypeDefinitionRegistry::from_definitions(star_wars_definitions())
        .expect("Star Wars definitions don't conflict")
}

pub(crate) fn r2d2() -> Value {
    Value::object([
        ("id", Value::from("2001")),
        ("name", Value::from("R2-D2")),
        ("primaryFunction", Value::from("Astromech")),
        ("appearsIn", Value::List(vec![Value::Enum("NEW_HOPE".into())])),
    ])
}

pub(crate) fn luke() -> Value {
    Value::object([
        ("id", Value::from("1000")),
        ("name", Value::from("Luke Skywalker")),
        ("homePlanet", Value::from("Tatooine")),
    ])
}

fn hero(_: &DataFetchingEnvironment<'_>) -> FieldResult {
    Ok(r2d2())
}

fn search(_: &DataFetchingEnvironment<'_>) -> FieldResult {
    Ok(Value::List(vec![luke(), r2d2()]))
}

/// Tells humans and droids apart by their type-specific properties.
pub(crate) fn character_type(env: &TypeResolutionEnvironment<'_>) -> Option<ArcStr> {
    if env.value.property("primaryFunction").is_some() {
        Some(arcstr::literal!("Droid"))
    } else if env.value.property("homePlanet").is_some() {
        Some(arcstr::literal!("Human"))
    } else {
        None
    }
}

pub(crate) fn star_wars_wiring() -> RuntimeWiring {
    RuntimeWiring::builder()
        .type_wiring(
            TypeRuntimeWiring::new_type_wiring("Query")
                .data_fetcher("hero", hero)
                .data_fetcher("search", search)
                .build(),
        )
        .type_wiring(
            TypeRuntimeWiring::new_type_wiring("Character")
                .type_resolver(character_type)
                .build(),
        )
        .type_wiring(
            TypeRuntimeWiring::new_type_wiring("SearchResult")
                .type_resolver(character_type)
                .build(),
        )
        .build()
}

/// A small blog, where posts and authors refer to each other:
///
/// ```graphql
/// schema { query: Query }
///
/// input PostFilter { tag: String, published: Boolean = true }
///
/// type Post { id: ID! title: String! author: Author! tags: [String!] }
/// type Author { name: String posts(filter: PostFilter): [Post] }
///
/// type Query { posts(first: Int = 10, filter: PostFilter): [Post!]! }
/// ```
pub(crate) fn blog_registry() -> TypeDefinitionRegistry {
    let filter = || InputValueDefinition::new("filter", Type::named("PostFilter"));

    TypeDefinitionRegistry::from_definitions([
        Definition::from(SchemaDefinition::query("Query")),
        InputObjectTypeDefinition::new("PostFilter")
            .field(InputValueDefinition::new("tag", Type::named("String")))
            .field(
                InputValueDefinition::new("published", Type::named("Boolean"))
                    .default_value(InputValue::Boolean(true)),
            )
            .into(),
        ObjectTypeDefinition::new("Post")
            .field(FieldDefinition::new("id", Type::named("ID").non_null()))
            .field(FieldDefinition::new("title", Type::named("String").non_null()))
            .field(FieldDefinition::new("author", Type::named("Author").non_null()))
            .field(FieldDefinition::new(
                "tags",
                Type::list(Type::named("String").non_null()),
            ))
            .into(),
        ObjectTypeDefinition::new("Author")
            .field(FieldDefinition::new("name", Type::named("String")))
            .field(
                FieldDefinition::new("posts", Type::list(Type::named("Post"))).argument(filter()),
            )
            .into(),
        ObjectTypeDefinition::new("Query")
            .field(
                FieldDefinition::new("posts", Type::list(Type::named("Post").non_null()).non_null())
                    .argument(
                        InputValueDefinition::new("first", Type::named("Int"))
                            .default_value(InputValue::Int(10)),
                    )
                    .argument(filter()),
            )
            .into(),
    ])
    .expect("blog definitions don't conflict")
}
