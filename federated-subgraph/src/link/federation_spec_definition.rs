//! Definitions and applications of the Apollo Federation v2 directives.
//!
//! The constructors for applied directives do not check where the result ends up: attaching
//! `@key` to a field, say, only fails once the schema is validated.
use apollo_compiler::Name;
use apollo_compiler::Node;
use apollo_compiler::ast::Argument;
use apollo_compiler::ast::Directive;
use apollo_compiler::ast::DirectiveDefinition;
use apollo_compiler::ast::DirectiveLocation;
use apollo_compiler::ast::Value;
use apollo_compiler::name;
use apollo_compiler::ty;

use crate::link::argument_definition;
use crate::link::spec::Url;

pub const FEDERATION_COMPOSE_DIRECTIVE_NAME: Name = name!("composeDirective");
pub const FEDERATION_CONTACT_DIRECTIVE_NAME: Name = name!("contact");
pub const FEDERATION_EXTERNAL_DIRECTIVE_NAME: Name = name!("external");
pub const FEDERATION_INACCESSIBLE_DIRECTIVE_NAME: Name = name!("inaccessible");
pub const FEDERATION_KEY_DIRECTIVE_NAME: Name = name!("key");
pub const FEDERATION_LINK_DIRECTIVE_NAME: Name = name!("link");
pub const FEDERATION_OVERRIDE_DIRECTIVE_NAME: Name = name!("override");
pub const FEDERATION_PROVIDES_DIRECTIVE_NAME: Name = name!("provides");
pub const FEDERATION_REQUIRES_DIRECTIVE_NAME: Name = name!("requires");
pub const FEDERATION_SHAREABLE_DIRECTIVE_NAME: Name = name!("shareable");
pub const FEDERATION_TAG_DIRECTIVE_NAME: Name = name!("tag");
/// Federation v1 marker for types that only extend an entity owned by another subgraph.
pub const FEDERATION_EXTENDS_DIRECTIVE_NAME: Name = name!("extends");

pub(crate) const FEDERATION_FIELDS_ARGUMENT_NAME: Name = name!("fields");
pub(crate) const FEDERATION_RESOLVABLE_ARGUMENT_NAME: Name = name!("resolvable");
pub(crate) const FEDERATION_NAME_ARGUMENT_NAME: Name = name!("name");
pub(crate) const FEDERATION_FROM_ARGUMENT_NAME: Name = name!("from");
pub(crate) const FEDERATION_URL_ARGUMENT_NAME: Name = name!("url");
pub(crate) const FEDERATION_IMPORT_ARGUMENT_NAME: Name = name!("import");
pub(crate) const FEDERATION_DESCRIPTION_ARGUMENT_NAME: Name = name!("description");

/// Names imported by the `@link` the composer puts on every subgraph schema.
pub const FEDERATION_IMPORTS: [&str; 10] = [
    "@composeDirective",
    "@external",
    "@inaccessible",
    "@key",
    "@override",
    "@provides",
    "@requires",
    "@shareable",
    "@tag",
    "FieldSet",
];

/// The ten directive definitions registered on every federated subgraph, in declaration order.
///
/// `@contact` is part of the catalog but is not registered by default.
pub fn federation_directive_definitions() -> Vec<Node<DirectiveDefinition>> {
    vec![
        compose_directive_definition(),
        external_directive_definition(),
        inaccessible_directive_definition(),
        key_directive_definition(),
        link_directive_definition(),
        override_directive_definition(),
        provides_directive_definition(),
        requires_directive_definition(),
        shareable_directive_definition(),
        tag_directive_definition(),
    ]
}

/// `directive @composeDirective(name: String!) repeatable on SCHEMA`
pub fn compose_directive_definition() -> Node<DirectiveDefinition> {
    Node::new(DirectiveDefinition {
        description: None,
        name: FEDERATION_COMPOSE_DIRECTIVE_NAME,
        arguments: vec![argument_definition(
            FEDERATION_NAME_ARGUMENT_NAME,
            ty!(String!),
            None,
        )],
        repeatable: true,
        locations: vec![DirectiveLocation::Schema],
    })
}

/// `directive @contact(name: String!, url: String, description: String) on SCHEMA`
pub fn contact_directive_definition() -> Node<DirectiveDefinition> {
    let described = |name, ty, description: &str| {
        let mut argument = argument_definition(name, ty, None);
        argument.make_mut().description = Some(description.into());
        argument
    };
    Node::new(DirectiveDefinition {
        description: Some(
            "Provides contact information of the owner responsible for this subgraph schema."
                .into(),
        ),
        name: FEDERATION_CONTACT_DIRECTIVE_NAME,
        arguments: vec![
            described(
                FEDERATION_NAME_ARGUMENT_NAME,
                ty!(String!),
                "Contact title of the subgraph owner",
            ),
            described(
                FEDERATION_URL_ARGUMENT_NAME,
                ty!(String),
                "URL where the subgraph's owner can be reached",
            ),
            described(
                FEDERATION_DESCRIPTION_ARGUMENT_NAME,
                ty!(String),
                "Other relevant notes can be included here; supports markdown links",
            ),
        ],
        repeatable: false,
        locations: vec![DirectiveLocation::Schema],
    })
}

/// `directive @external on FIELD_DEFINITION`
pub fn external_directive_definition() -> Node<DirectiveDefinition> {
    Node::new(DirectiveDefinition {
        description: Some(
            "Marks target field as external meaning it will be resolved by federated schema"
                .into(),
        ),
        name: FEDERATION_EXTERNAL_DIRECTIVE_NAME,
        arguments: Vec::new(),
        repeatable: false,
        locations: vec![DirectiveLocation::FieldDefinition],
    })
}

pub fn inaccessible_directive_definition() -> Node<DirectiveDefinition> {
    Node::new(DirectiveDefinition {
        description: Some(
            "Marks location within schema as inaccessible from the GraphQL Gateway".into(),
        ),
        name: FEDERATION_INACCESSIBLE_DIRECTIVE_NAME,
        arguments: Vec::new(),
        repeatable: false,
        locations: vec![
            DirectiveLocation::FieldDefinition,
            DirectiveLocation::Object,
            DirectiveLocation::Interface,
            DirectiveLocation::Union,
            DirectiveLocation::Enum,
            DirectiveLocation::EnumValue,
            DirectiveLocation::Scalar,
            DirectiveLocation::InputObject,
            DirectiveLocation::InputFieldDefinition,
            DirectiveLocation::ArgumentDefinition,
        ],
    })
}

/// `directive @key(fields: FieldSet!, resolvable: Boolean = true) repeatable on OBJECT | INTERFACE`
pub fn key_directive_definition() -> Node<DirectiveDefinition> {
    Node::new(DirectiveDefinition {
        description: Some(
            "Space separated list of primary keys needed to access federated object".into(),
        ),
        name: FEDERATION_KEY_DIRECTIVE_NAME,
        arguments: vec![
            argument_definition(FEDERATION_FIELDS_ARGUMENT_NAME, ty!(FieldSet!), None),
            argument_definition(
                FEDERATION_RESOLVABLE_ARGUMENT_NAME,
                ty!(Boolean),
                Some(Value::Boolean(true)),
            ),
        ],
        repeatable: true,
        locations: vec![DirectiveLocation::Object, DirectiveLocation::Interface],
    })
}

/// `directive @link(url: String!, import: [String]) repeatable on SCHEMA`
pub fn link_directive_definition() -> Node<DirectiveDefinition> {
    Node::new(DirectiveDefinition {
        description: None,
        name: FEDERATION_LINK_DIRECTIVE_NAME,
        arguments: vec![
            argument_definition(FEDERATION_URL_ARGUMENT_NAME, ty!(String!), None),
            argument_definition(FEDERATION_IMPORT_ARGUMENT_NAME, ty!([String]), None),
        ],
        repeatable: true,
        locations: vec![DirectiveLocation::Schema],
    })
}

pub fn override_directive_definition() -> Node<DirectiveDefinition> {
    Node::new(DirectiveDefinition {
        description: Some(
            "Overrides fields resolution logic from other subgraph. \
             Used for migrating fields from one subgraph to another."
                .into(),
        ),
        name: FEDERATION_OVERRIDE_DIRECTIVE_NAME,
        arguments: vec![argument_definition(
            FEDERATION_FROM_ARGUMENT_NAME,
            ty!(String!),
            None,
        )],
        repeatable: false,
        locations: vec![DirectiveLocation::FieldDefinition],
    })
}

pub fn provides_directive_definition() -> Node<DirectiveDefinition> {
    Node::new(DirectiveDefinition {
        description: Some("Specifies locally selectable fields on a given entity".into()),
        name: FEDERATION_PROVIDES_DIRECTIVE_NAME,
        arguments: vec![argument_definition(
            FEDERATION_FIELDS_ARGUMENT_NAME,
            ty!(FieldSet!),
            None,
        )],
        repeatable: false,
        locations: vec![DirectiveLocation::FieldDefinition],
    })
}

pub fn requires_directive_definition() -> Node<DirectiveDefinition> {
    Node::new(DirectiveDefinition {
        description: Some(
            "Specifies external federated fields required for computing this field value".into(),
        ),
        name: FEDERATION_REQUIRES_DIRECTIVE_NAME,
        arguments: vec![argument_definition(
            FEDERATION_FIELDS_ARGUMENT_NAME,
            ty!(FieldSet!),
            None,
        )],
        repeatable: false,
        locations: vec![DirectiveLocation::FieldDefinition],
    })
}

pub fn shareable_directive_definition() -> Node<DirectiveDefinition> {
    Node::new(DirectiveDefinition {
        description: Some(
            "Indicates that given object and/or field can be resolved by multiple subgraphs"
                .into(),
        ),
        name: FEDERATION_SHAREABLE_DIRECTIVE_NAME,
        arguments: Vec::new(),
        repeatable: false,
        locations: vec![DirectiveLocation::FieldDefinition, DirectiveLocation::Object],
    })
}

pub fn tag_directive_definition() -> Node<DirectiveDefinition> {
    Node::new(DirectiveDefinition {
        description: Some(
            "Allows users to annotate fields and types with additional metadata information"
                .into(),
        ),
        name: FEDERATION_TAG_DIRECTIVE_NAME,
        arguments: vec![argument_definition(
            FEDERATION_NAME_ARGUMENT_NAME,
            ty!(String!),
            None,
        )],
        repeatable: true,
        locations: vec![
            DirectiveLocation::FieldDefinition,
            DirectiveLocation::Object,
            DirectiveLocation::Interface,
            DirectiveLocation::Union,
            DirectiveLocation::ArgumentDefinition,
            DirectiveLocation::Scalar,
            DirectiveLocation::Enum,
            DirectiveLocation::EnumValue,
            DirectiveLocation::InputObject,
            DirectiveLocation::InputFieldDefinition,
        ],
    })
}

fn string_argument(name: Name, value: &str) -> Node<Argument> {
    Node::new(Argument {
        name,
        value: Node::new(Value::String(value.to_owned())),
    })
}

/// `@composeDirective(name: "@myDirective")`
pub fn compose_directive(name: &str) -> Directive {
    Directive {
        name: FEDERATION_COMPOSE_DIRECTIVE_NAME,
        arguments: vec![string_argument(FEDERATION_NAME_ARGUMENT_NAME, name)],
    }
}

/// `@contact(name: "my team", url: "https://…", description: "…")`, leaving out absent arguments.
pub fn contact(name: &str, url: Option<&str>, description: Option<&str>) -> Directive {
    let mut arguments = vec![string_argument(FEDERATION_NAME_ARGUMENT_NAME, name)];
    if let Some(url) = url {
        arguments.push(string_argument(FEDERATION_URL_ARGUMENT_NAME, url));
    }
    if let Some(description) = description {
        arguments.push(string_argument(
            FEDERATION_DESCRIPTION_ARGUMENT_NAME,
            description,
        ));
    }
    Directive {
        name: FEDERATION_CONTACT_DIRECTIVE_NAME,
        arguments,
    }
}

pub fn external() -> Directive {
    Directive {
        name: FEDERATION_EXTERNAL_DIRECTIVE_NAME,
        arguments: Vec::new(),
    }
}

pub fn inaccessible() -> Directive {
    Directive {
        name: FEDERATION_INACCESSIBLE_DIRECTIVE_NAME,
        arguments: Vec::new(),
    }
}

/// `@key(fields: "id", resolvable: true)`
pub fn key(fields: &str, resolvable: bool) -> Directive {
    Directive {
        name: FEDERATION_KEY_DIRECTIVE_NAME,
        arguments: vec![
            string_argument(FEDERATION_FIELDS_ARGUMENT_NAME, fields),
            Node::new(Argument {
                name: FEDERATION_RESOLVABLE_ARGUMENT_NAME,
                value: Node::new(Value::Boolean(resolvable)),
            }),
        ],
    }
}

/// `@link(url: "https://specs.apollo.dev/…", import: ["@key"])`
pub fn link(url: &Url, imports: &[&str]) -> Directive {
    Directive {
        name: FEDERATION_LINK_DIRECTIVE_NAME,
        arguments: vec![
            string_argument(FEDERATION_URL_ARGUMENT_NAME, &url.to_string()),
            Node::new(Argument {
                name: FEDERATION_IMPORT_ARGUMENT_NAME,
                value: Node::new(Value::List(
                    imports
                        .iter()
                        .map(|import| Node::new(Value::String((*import).to_owned())))
                        .collect(),
                )),
            }),
        ],
    }
}

/// The `@link` to federation v2.1 with [`FEDERATION_IMPORTS`].
pub fn federation_link_directive() -> Directive {
    link(&Url::federation_v2_1(), &FEDERATION_IMPORTS)
}

/// `@override(from: "subgraphA")`
pub fn override_from(from: &str) -> Directive {
    Directive {
        name: FEDERATION_OVERRIDE_DIRECTIVE_NAME,
        arguments: vec![string_argument(FEDERATION_FROM_ARGUMENT_NAME, from)],
    }
}

pub fn provides(fields: &str) -> Directive {
    Directive {
        name: FEDERATION_PROVIDES_DIRECTIVE_NAME,
        arguments: vec![string_argument(FEDERATION_FIELDS_ARGUMENT_NAME, fields)],
    }
}

pub fn requires(fields: &str) -> Directive {
    Directive {
        name: FEDERATION_REQUIRES_DIRECTIVE_NAME,
        arguments: vec![string_argument(FEDERATION_FIELDS_ARGUMENT_NAME, fields)],
    }
}

pub fn shareable() -> Directive {
    Directive {
        name: FEDERATION_SHAREABLE_DIRECTIVE_NAME,
        arguments: Vec::new(),
    }
}

/// `@tag(name: "team-a")`
pub fn tag(name: &str) -> Directive {
    Directive {
        name: FEDERATION_TAG_DIRECTIVE_NAME,
        arguments: vec![string_argument(FEDERATION_NAME_ARGUMENT_NAME, name)],
    }
}
