use std::fmt;

use apollo_compiler::Name;
use apollo_compiler::collections::IndexMap;
use apollo_compiler::collections::IndexSet;
use apollo_compiler::schema::Component;
use apollo_compiler::schema::ComponentName;
use apollo_compiler::schema::DirectiveList;
use apollo_compiler::schema::EnumType;
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::schema::FieldDefinition;
use apollo_compiler::schema::InputObjectType;
use apollo_compiler::schema::ScalarType;
use apollo_compiler::schema::UnionType;
use itertools::Itertools;

use super::directives::component_directive;
use super::directives::node_directive;
use super::directives::write_applied_directives;
use super::directives::write_argument_definitions;
use super::directives::write_input_value_definition;
use super::PrintOptions;
use crate::display_helpers::State;
use crate::display_helpers::write_description;
use crate::display_helpers::write_indented_lines;

pub(super) fn write_type(
    state: &mut State<'_, '_>,
    options: PrintOptions,
    ty: &ExtendedType,
) -> fmt::Result {
    match ty {
        ExtendedType::Scalar(scalar) => write_scalar(state, scalar)?,
        ExtendedType::Object(object) => write_fields_type(
            state,
            options,
            FieldsType {
                keyword: "type",
                description: object.description.as_deref(),
                name: &object.name,
                implements_interfaces: &object.implements_interfaces,
                directives: &object.directives,
                fields: &object.fields,
            },
        )?,
        ExtendedType::Interface(interface) => write_fields_type(
            state,
            options,
            FieldsType {
                keyword: "interface",
                description: interface.description.as_deref(),
                name: &interface.name,
                implements_interfaces: &interface.implements_interfaces,
                directives: &interface.directives,
                fields: &interface.fields,
            },
        )?,
        ExtendedType::Union(union_) => write_union(state, union_)?,
        ExtendedType::Enum(enum_) => write_enum(state, enum_)?,
        ExtendedType::InputObject(input_object) => {
            write_input_object(state, options, input_object)?
        }
    }
    state.end_definition()
}

/// What object and interface types have in common.
struct FieldsType<'a> {
    keyword: &'static str,
    description: Option<&'a str>,
    name: &'a Name,
    implements_interfaces: &'a IndexSet<ComponentName>,
    directives: &'a DirectiveList,
    fields: &'a IndexMap<Name, Component<FieldDefinition>>,
}

fn write_fields_type(
    state: &mut State<'_, '_>,
    options: PrintOptions,
    ty: FieldsType<'_>,
) -> fmt::Result {
    write_header(state, ty.description, ty.keyword, ty.name)?;
    if !ty.implements_interfaces.is_empty() {
        let interfaces = ty
            .implements_interfaces
            .iter()
            .map(|interface| interface.name.as_str())
            .sorted()
            .join(" & ");
        write!(state, " implements {interfaces}")?;
    }
    write_type_directives(state, ty.directives)?;
    state.write(" {")?;
    let fields = sorted_by_name(ty.fields);
    write_indented_lines(state, &fields, |state, field| write_field(state, options, field))?;
    state.write("}")
}

fn write_field(
    state: &mut State<'_, '_>,
    options: PrintOptions,
    field: &FieldDefinition,
) -> fmt::Result {
    if let Some(description) = field.description.as_deref() {
        write_description(state, description)?;
    }
    state.write(&field.name)?;
    write_argument_definitions(state, options, &field.arguments)?;
    write!(state, ": {}", field.ty)?;
    write_applied_directives(state, field.directives.iter().map(node_directive))
}

fn write_input_object(
    state: &mut State<'_, '_>,
    options: PrintOptions,
    input_object: &InputObjectType,
) -> fmt::Result {
    write_header(
        state,
        input_object.description.as_deref(),
        "input",
        &input_object.name,
    )?;
    write_type_directives(state, &input_object.directives)?;
    state.write(" {")?;
    let fields = sorted_by_name(&input_object.fields);
    write_indented_lines(state, &fields, |state, field| {
        if let Some(description) = field.description.as_deref() {
            write_description(state, description)?;
        }
        write_input_value_definition(state, options, field)
    })?;
    state.write("}")
}

fn write_enum(state: &mut State<'_, '_>, enum_: &EnumType) -> fmt::Result {
    write_header(state, enum_.description.as_deref(), "enum", &enum_.name)?;
    write_type_directives(state, &enum_.directives)?;
    state.write(" {")?;
    let values = sorted_by_name(&enum_.values);
    write_indented_lines(state, &values, |state, value| {
        if let Some(description) = value.description.as_deref() {
            write_description(state, description)?;
        }
        state.write(&value.value)?;
        write_applied_directives(state, value.directives.iter().map(node_directive))
    })?;
    state.write("}")
}

fn write_union(state: &mut State<'_, '_>, union_: &UnionType) -> fmt::Result {
    write_header(state, union_.description.as_deref(), "union", &union_.name)?;
    write_type_directives(state, &union_.directives)?;
    if !union_.members.is_empty() {
        let members = union_
            .members
            .iter()
            .map(|member| member.name.as_str())
            .sorted()
            .join(" | ");
        write!(state, " = {members}")?;
    }
    Ok(())
}

fn write_scalar(state: &mut State<'_, '_>, scalar: &ScalarType) -> fmt::Result {
    write_header(state, scalar.description.as_deref(), "scalar", &scalar.name)?;
    write_type_directives(state, &scalar.directives)
}

fn write_header(
    state: &mut State<'_, '_>,
    description: Option<&str>,
    keyword: &str,
    name: &Name,
) -> fmt::Result {
    if let Some(description) = description {
        write_description(state, description)?;
    }
    write!(state, "{keyword} {name}")
}

fn write_type_directives(state: &mut State<'_, '_>, directives: &DirectiveList) -> fmt::Result {
    write_applied_directives(state, directives.iter().map(component_directive))
}

fn sorted_by_name<V>(definitions: &IndexMap<Name, V>) -> Vec<&V> {
    definitions
        .iter()
        .sorted_by(|(a, _), (b, _)| a.as_str().cmp(b.as_str()))
        .map(|(_, definition)| definition)
        .collect()
}

#[cfg(test)]
mod tests {
    use apollo_compiler::Schema;
    use pretty_assertions::assert_eq;

    use super::*;

    struct PrintedType<'a>(&'a ExtendedType, PrintOptions);

    impl fmt::Display for PrintedType<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write_type(&mut State::new(f), self.1, self.0)
        }
    }

    fn print_type_with(sdl: &str, name: &str, options: PrintOptions) -> String {
        let schema = Schema::parse(sdl, "types.graphql").unwrap();
        let ty = schema.types.get(name).unwrap();
        PrintedType(ty, options).to_string().trim_end().to_owned()
    }

    fn print_type(sdl: &str, name: &str) -> String {
        print_type_with(sdl, name, PrintOptions::default())
    }

    #[test]
    fn prints_object_with_keys_and_deprecations() {
        let printed = print_type(
            r#"
            directive @key(fields: String!, resolvable: Boolean = true) repeatable on OBJECT
            type Product @key(fields: "upc", resolvable: true) @key(fields: "id") {
              upc: String!
              id: ID!
              name: String @deprecated(reason: "use title") @tag(name: "public")
            }
            "#,
            "Product",
        );
        insta::assert_snapshot!(printed, @r#"
type Product @key(fields: "upc", resolvable: true) @key(fields: "id") {
  id: ID!
  name: String @deprecated(reason: "use title") @tag(name: "public")
  upc: String!
}
"#);
    }

    #[test]
    fn prints_sorted_interfaces() {
        let printed = print_type(
            r#"
            interface Node { id: ID! }
            interface Entity { id: ID! }
            type User implements Node & Entity { id: ID! }
            "#,
            "User",
        );
        assert_eq!(
            printed,
            "type User implements Entity & Node {\n  id: ID!\n}"
        );
    }

    #[test]
    fn prints_descriptions() {
        let printed = print_type(
            r#"
            "A thing for \"sale\""
            type Product {
              """
              Long form
              description
              """
              name(
                "not printed"
                locale: String = "en"
              ): String
            }
            "#,
            "Product",
        );
        insta::assert_snapshot!(printed, @r#"
"A thing for \"sale\""
type Product {
  """
  Long form
  description
  """
  name(locale: String): String
}
"#);
    }

    #[test]
    fn skips_empty_descriptions() {
        let printed = print_type(r#""" type Query { "" a: Int }"#, "Query");
        assert_eq!(printed, "type Query {\n  a: Int\n}");
    }

    #[test]
    fn prints_enum_values_sorted() {
        let printed = print_type(
            r#"
            enum Color {
              RED
              "Fresh"
              GREEN @deprecated(reason: "use LIME")
              BLUE
            }
            "#,
            "Color",
        );
        insta::assert_snapshot!(printed, @r#"
enum Color {
  BLUE
  "Fresh"
  GREEN @deprecated(reason: "use LIME")
  RED
}
"#);
    }

    #[test]
    fn prints_input_fields_with_defaults_on_request() {
        let sdl = r#"
            input Page { size: Int = 10 after: String tags: [String!] = ["new"] }
        "#;
        insta::assert_snapshot!(print_type(sdl, "Page"), @r#"
input Page {
  after: String
  size: Int
  tags: [String!]
}
"#);
        let options = PrintOptions {
            include_default_values: true,
            ..PrintOptions::default()
        };
        insta::assert_snapshot!(print_type_with(sdl, "Page", options), @r#"
input Page {
  after: String
  size: Int = 10
  tags: [String!] = ["new"]
}
"#);
    }

    #[test]
    fn prints_unions_and_scalars() {
        let sdl = r#"
            type B { a: Int }
            type A { a: Int }
            union Either = B | A
            scalar Date @specifiedBy(url: "https://example.com/date")
        "#;
        assert_eq!(print_type(sdl, "Either"), "union Either = A | B");
        assert_eq!(
            print_type(sdl, "Date"),
            "scalar Date @specifiedBy(url: \"https://example.com/date\")"
        );
    }
}
