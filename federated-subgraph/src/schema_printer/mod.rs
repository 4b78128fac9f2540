//! Canonical SDL printing.
//!
//! The output only depends on the content of the schema, never on the order in which types,
//! fields, values or directives were inserted: every collection is sorted by name before it is
//! printed. Sections come in a fixed order (schema definition, directive definitions, enums,
//! input objects, interfaces, objects, unions, scalars), separated by an empty line.
use std::fmt;

use apollo_compiler::Name;
use apollo_compiler::Schema;
use apollo_compiler::schema::ComponentName;
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::schema::SchemaDefinition;
use itertools::Itertools;
use serde::Deserialize;

use crate::display_helpers::State;
use crate::subgraph::spec::DEFAULT_MUTATION_TYPE_NAME;
use crate::subgraph::spec::DEFAULT_QUERY_TYPE_NAME;
use crate::subgraph::spec::DEFAULT_SUBSCRIPTION_TYPE_NAME;

mod directives;
mod types;

const BUILT_IN_SCALAR_NAMES: [&str; 5] = ["Boolean", "Float", "ID", "Int", "String"];

/// Directives every schema implicitly knows and a subgraph never advertises.
const IMPLICIT_DIRECTIVE_NAMES: [&str; 2] = ["specifiedBy", "oneOf"];

/// Built-in scalars and introspection types.
pub(crate) fn is_built_in_type_name(name: &str) -> bool {
    name.starts_with("__") || BUILT_IN_SCALAR_NAMES.contains(&name)
}

pub(crate) fn is_built_in_directive_name(name: &str) -> bool {
    IMPLICIT_DIRECTIVE_NAMES.contains(&name)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrintOptions {
    /// Print the definitions of the directives registered on the schema.
    pub include_directive_definitions: bool,
    /// Print the `schema { ... }` block even when every root type has its default name.
    pub include_schema_definition: bool,
    /// Print ` = <default>` after arguments and input fields that have a default value.
    pub include_default_values: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            include_directive_definitions: true,
            include_schema_definition: true,
            include_default_values: false,
        }
    }
}

impl PrintOptions {
    /// Only the type definitions, plus the schema block when root types are renamed.
    pub fn none() -> Self {
        Self {
            include_directive_definitions: false,
            include_schema_definition: false,
            include_default_values: false,
        }
    }
}

/// Prints `schema` as canonical SDL.
///
/// The schema does not need to be valid. Printing the same schema twice gives the same text.
pub fn print_schema(schema: &Schema, options: PrintOptions) -> String {
    SchemaPrinter { schema, options }.to_string().trim().to_owned()
}

struct SchemaPrinter<'schema> {
    schema: &'schema Schema,
    options: PrintOptions,
}

impl fmt::Display for SchemaPrinter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = &mut State::new(f);
        let schema = self.schema;

        if self.options.include_schema_definition || has_renamed_root(&schema.schema_definition) {
            write_schema_definition(state, &schema.schema_definition)?;
        }

        if self.options.include_directive_definitions {
            let definitions = schema
                .directive_definitions
                .values()
                .filter(|definition| !is_built_in_directive_name(&definition.name))
                .sorted_by(|a, b| a.name.as_str().cmp(b.name.as_str()));
            for definition in definitions {
                directives::write_directive_definition(state, self.options, definition)?;
            }
        }

        let types = schema
            .types
            .values()
            .filter(|ty| !is_built_in_type_name(ty.name()))
            .sorted_by(|a, b| {
                kind_rank(a)
                    .cmp(&kind_rank(b))
                    .then_with(|| a.name().as_str().cmp(b.name().as_str()))
            });
        for ty in types {
            types::write_type(state, self.options, ty)?;
        }
        Ok(())
    }
}

fn kind_rank(ty: &ExtendedType) -> u8 {
    match ty {
        ExtendedType::Enum(_) => 0,
        ExtendedType::InputObject(_) => 1,
        ExtendedType::Interface(_) => 2,
        ExtendedType::Object(_) => 3,
        ExtendedType::Union(_) => 4,
        ExtendedType::Scalar(_) => 5,
    }
}

fn has_renamed_root(definition: &SchemaDefinition) -> bool {
    let renamed = |root: &Option<ComponentName>, default: Name| {
        root.as_ref().is_some_and(|root| root.name != default)
    };
    renamed(&definition.query, DEFAULT_QUERY_TYPE_NAME)
        || renamed(&definition.mutation, DEFAULT_MUTATION_TYPE_NAME)
        || renamed(&definition.subscription, DEFAULT_SUBSCRIPTION_TYPE_NAME)
}

fn write_schema_definition(
    state: &mut State<'_, '_>,
    definition: &SchemaDefinition,
) -> fmt::Result {
    state.write("schema")?;
    directives::write_applied_directives(
        state,
        definition.directives.iter().map(directives::component_directive),
    )?;
    state.write(" {")?;
    state.indent_no_new_line();
    let roots = [
        ("query", &definition.query),
        ("mutation", &definition.mutation),
        ("subscription", &definition.subscription),
    ];
    for (operation, root) in roots {
        if let Some(root) = root {
            state.new_line()?;
            write!(state, "{operation}: {}", root.name)?;
        }
    }
    state.dedent()?;
    state.write("}")?;
    state.end_definition()
}
