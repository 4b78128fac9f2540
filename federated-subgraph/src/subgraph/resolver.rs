use apollo_compiler::Name;
use serde_json_bytes::ByteString;
use serde_json_bytes::Map;
use serde_json_bytes::Value;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The subgraph owner's side of the `_entities` field.
///
/// Implementations turn representations sent by the router into entity values, and tell which
/// member of `_Entity` each of those values is.
pub trait EntityResolver: Send + Sync + 'static {
    /// Resolves a batch of representations.
    ///
    /// The returned values are matched with the representations by position; `null` stands for
    /// an entity that could not be found.
    fn resolve_entities(&self, representations: &[Representation]) -> Result<Vec<Value>, BoxError>;

    /// The concrete object type of a value returned by
    /// [`resolve_entities`](Self::resolve_entities).
    fn resolve_entity_type(&self, value: &Value) -> Option<Name>;
}

/// An entity representation: an `_Any` object naming its type in `__typename`, along with the
/// key fields identifying the entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Representation {
    typename: String,
    fields: Map<ByteString, Value>,
}

impl Representation {
    /// Returns `None` unless `value` is an object with a string `__typename`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let fields = value.as_object()?;
        let typename = fields.get("__typename")?.as_str()?.to_owned();
        Some(Self {
            typename,
            fields: fields.clone(),
        })
    }

    pub fn typename(&self) -> &str {
        &self.typename
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// All fields, `__typename` included.
    pub fn fields(&self) -> &Map<ByteString, Value> {
        &self.fields
    }
}
