//! Read-only views over a GraphQL introspection result.
//!
//! Only the members the search needs are modelled. Optional members that are missing or
//! `null` in the document deserialize to `None` or an empty list rather than failing.

use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A parsed introspection response: `{ "data": { "__schema": { "types": [...] } } }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaDocument {
    #[serde(default)]
    data: Option<IntrospectionData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct IntrospectionData {
    #[serde(rename = "__schema", default)]
    schema: Option<SchemaDescriptor>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SchemaDescriptor {
    #[serde(default)]
    types: Option<Vec<TypeDescriptor>>,
}

impl SchemaDocument {
    /// Build a document directly from a list of types.
    pub fn from_types(types: Vec<TypeDescriptor>) -> Self {
        Self {
            data: Some(IntrospectionData {
                schema: Some(SchemaDescriptor { types: Some(types) }),
            }),
        }
    }

    /// The `data.__schema.types` list, if the document has one.
    pub fn types(&self) -> Option<&[TypeDescriptor]> {
        self.data.as_ref()?.schema.as_ref()?.types.as_deref()
    }

    /// Find a type by its exact name.
    pub fn find_type(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types()?
            .iter()
            .find(|ty| ty.name.as_deref() == Some(name))
    }
}

/// The kind of an entry in the schema's `types` list.
///
/// Introspection results only list named kinds, but `LIST` and `NON_NULL` entries are
/// accepted so one odd entry does not reject the whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Scalar => "SCALAR",
            TypeKind::Object => "OBJECT",
            TypeKind::Interface => "INTERFACE",
            TypeKind::Union => "UNION",
            TypeKind::Enum => "ENUM",
            TypeKind::InputObject => "INPUT_OBJECT",
            TypeKind::List => "LIST",
            TypeKind::NonNull => "NON_NULL",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entry of the schema's `types` list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDescriptor {
    pub kind: TypeKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub interfaces: Vec<InterfaceRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fields: Vec<FieldDescriptor>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub input_fields: Vec<InputValueDescriptor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InterfaceRef {
    #[serde(default)]
    pub name: Option<String>,
}

/// A field of an object or interface type. Fields of the query and mutation root types are
/// the schema's top-level operations.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub args: Vec<InputValueDescriptor>,
    #[serde(rename = "type", default)]
    pub ty: Option<TypeRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_deprecated: bool,
    #[serde(default)]
    pub deprecation_reason: Option<String>,
}

/// A field argument or an input object field.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputValueDescriptor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub ty: Option<TypeRef>,
    #[serde(default)]
    pub default_value: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_deprecated: bool,
    #[serde(default)]
    pub deprecation_reason: Option<String>,
}

/// A possibly wrapped reference to a named type.
///
/// A wrapper whose `ofType` is missing keeps `None` so it can still be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawTypeRef")]
pub enum TypeRef {
    NonNull(Option<Box<TypeRef>>),
    List(Option<Box<TypeRef>>),
    Named(Option<String>),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(Some(name.into()))
    }

    pub fn non_null(of_type: TypeRef) -> Self {
        TypeRef::NonNull(Some(Box::new(of_type)))
    }

    pub fn list(of_type: TypeRef) -> Self {
        TypeRef::List(Some(Box::new(of_type)))
    }
}

/// The wire shape of a type reference: `{ kind, name, ofType }`
#[derive(Deserialize)]
struct RawTypeRef {
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "ofType", default)]
    of_type: Option<Box<RawTypeRef>>,
}

impl From<RawTypeRef> for TypeRef {
    fn from(raw: RawTypeRef) -> Self {
        let of_type = raw.of_type.map(|inner| Box::new(TypeRef::from(*inner)));
        match raw.kind.as_deref() {
            Some("NON_NULL") => TypeRef::NonNull(of_type),
            Some("LIST") => TypeRef::List(of_type),
            _ => TypeRef::Named(raw.name),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
