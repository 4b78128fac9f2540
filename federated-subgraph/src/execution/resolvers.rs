use std::cell::RefCell;

use apollo_compiler::Name;
use apollo_compiler::resolvers::FieldError;
use apollo_compiler::resolvers::ObjectValue;
use apollo_compiler::resolvers::ResolveInfo;
use apollo_compiler::resolvers::ResolvedValue;
use apollo_compiler::response::GraphQLError;
use apollo_compiler::response::ResponseDataPathSegment;
use serde_json_bytes::Value;

use super::response::JsonMap;
use crate::subgraph::FederatedSchema;
use crate::subgraph::Representation;
use crate::subgraph::spec::ENTITIES_QUERY;
use crate::subgraph::spec::REPRESENTATIONS_ARGUMENT_NAME;
use crate::subgraph::spec::SDL_FIELD_NAME;
use crate::subgraph::spec::SERVICE_SDL_QUERY;

/// Resolves the fields the federation layer adds to the query root.
///
/// Entities that cannot be completed become `null` items of `_entities`, and their errors are
/// collected in `item_errors`.
pub(super) struct FederationRoot<'schema> {
    pub(super) schema: &'schema FederatedSchema,
    pub(super) type_name: &'schema str,
    pub(super) item_errors: &'schema RefCell<Vec<GraphQLError>>,
}

impl ObjectValue for FederationRoot<'_> {
    fn type_name(&self) -> &str {
        self.type_name
    }

    fn resolve_field<'a>(
        &'a self,
        info: &'a ResolveInfo<'a>,
    ) -> Result<ResolvedValue<'a>, FieldError> {
        let field_name = info.field_name();
        if field_name == SERVICE_SDL_QUERY.as_str() {
            Ok(ResolvedValue::object(ServiceValue {
                sdl: self.schema.sdl(),
            }))
        } else if field_name == ENTITIES_QUERY.as_str() {
            self.resolve_entities(info)
        } else {
            Err(FieldError {
                message: format!(
                    "field '{field_name}' of type '{}' is not resolvable by the federation layer",
                    self.type_name
                ),
            })
        }
    }
}

impl FederationRoot<'_> {
    fn resolve_entities<'a>(
        &'a self,
        info: &'a ResolveInfo<'a>,
    ) -> Result<ResolvedValue<'a>, FieldError> {
        let representations = info
            .arguments()
            .get(REPRESENTATIONS_ARGUMENT_NAME.as_str())
            .and_then(Value::as_array)
            .ok_or_else(|| FieldError {
                message: "expected array `representations`".to_owned(),
            })?
            .iter()
            .enumerate()
            .map(|(index, representation)| {
                Representation::from_value(representation).ok_or_else(|| FieldError {
                    message: format!(
                        "representation {index} must be an object with a string `__typename`"
                    ),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let entities = self
            .schema
            .resolver()
            .resolve_entities(&representations)
            .map_err(|error| {
                tracing::warn!(
                    representations = representations.len(),
                    error = %error,
                    "entity resolver failed"
                );
                FieldError {
                    message: format!("failed to resolve entities: {error}"),
                }
            })?;

        let entities = entities
            .into_iter()
            .enumerate()
            .map(move |(index, entity)| match self.entity_value(entity) {
                Ok(value) => Ok(value),
                Err(message) => {
                    self.item_errors
                        .borrow_mut()
                        .push(item_error(info, index, message));
                    Ok(ResolvedValue::leaf(Value::Null))
                }
            });
        Ok(ResolvedValue::List(Box::new(entities)))
    }

    /// Pairs a value returned by the resolver with its member of `_Entity`.
    fn entity_value<'a>(&self, entity: Value) -> Result<ResolvedValue<'a>, String> {
        if matches!(entity, Value::Null) {
            return Ok(ResolvedValue::leaf(Value::Null));
        }
        let type_name = self.schema.resolver().resolve_entity_type(&entity);
        let entity_types = self.schema.entity_types();
        let Some(type_name) = type_name.filter(|name| entity_types.contains(name)) else {
            tracing::warn!(entity = ?entity, "resolved entity is not a member of _Entity");
            return Err("resolved entity type is not a member of _Entity".to_owned());
        };
        let Value::Object(fields) = entity else {
            return Err(format!("entity of type '{type_name}' must be a JSON object"));
        };
        Ok(ResolvedValue::object(EntityValue { type_name, fields }))
    }
}

/// A field error for item `index` of the list `info` resolves.
fn item_error(info: &ResolveInfo<'_>, index: usize, message: String) -> GraphQLError {
    let field = info.field_selections().first();
    let location = field.and_then(|field| field.name.location());
    let response_key = field.map_or(ENTITIES_QUERY, |field| field.response_key().clone());
    let mut error = GraphQLError::new(message, location, &info.document().sources);
    error.path = vec![
        ResponseDataPathSegment::Field(response_key),
        ResponseDataPathSegment::ListIndex(index),
    ];
    error
}

/// `_service { sdl }`
struct ServiceValue<'schema> {
    sdl: &'schema str,
}

impl ObjectValue for ServiceValue<'_> {
    fn type_name(&self) -> &str {
        "_Service"
    }

    fn resolve_field<'a>(
        &'a self,
        info: &'a ResolveInfo<'a>,
    ) -> Result<ResolvedValue<'a>, FieldError> {
        if info.field_name() == SDL_FIELD_NAME.as_str() {
            Ok(ResolvedValue::leaf(Value::from(self.sdl)))
        } else {
            Err(FieldError {
                message: format!("unexpected field '{}' on _Service", info.field_name()),
            })
        }
    }
}

/// An entity returned by the [`EntityResolver`](crate::subgraph::EntityResolver).
struct EntityValue {
    type_name: Name,
    fields: JsonMap,
}

impl ObjectValue for EntityValue {
    fn type_name(&self) -> &str {
        self.type_name.as_str()
    }

    fn resolve_field<'a>(
        &'a self,
        info: &'a ResolveInfo<'a>,
    ) -> Result<ResolvedValue<'a>, FieldError> {
        resolve_json_field(&self.fields, info)
    }
}

/// A JSON object nested in an entity.
struct JsonObject<'a> {
    type_name: &'a str,
    fields: &'a JsonMap,
}

impl ObjectValue for JsonObject<'_> {
    fn type_name(&self) -> &str {
        self.type_name
    }

    fn resolve_field<'a>(
        &'a self,
        info: &'a ResolveInfo<'a>,
    ) -> Result<ResolvedValue<'a>, FieldError> {
        resolve_json_field(self.fields, info)
    }
}

fn resolve_json_field<'a>(
    fields: &'a JsonMap,
    info: &'a ResolveInfo<'a>,
) -> Result<ResolvedValue<'a>, FieldError> {
    match fields.get(info.field_name()) {
        Some(value) => resolve_json_value(value, info),
        None => Ok(ResolvedValue::leaf(Value::Null)),
    }
}

fn resolve_json_value<'a>(
    value: &'a Value,
    info: &'a ResolveInfo<'a>,
) -> Result<ResolvedValue<'a>, FieldError> {
    match value {
        Value::Object(fields) => Ok(ResolvedValue::object(JsonObject {
            type_name: fields
                .get("__typename")
                .and_then(Value::as_str)
                .unwrap_or_else(|| info.field_definition().ty.inner_named_type()),
            fields,
        })),
        Value::Array(items) => Ok(ResolvedValue::List(Box::new(
            items.iter().map(move |item| resolve_json_value(item, info)),
        ))),
        leaf => Ok(ResolvedValue::leaf(leaf.clone())),
    }
}
