use serde::{ Deserialize, Serialize };
use serde_json::{ Map, Value };

/// A single field definition as the remote managed schema reports it.
///
/// Only `name` is modelled; every other attribute (type, stored, indexed,
/// multiValued, ...) rides along in the flattened bag so server-defined
/// attributes survive a round trip untouched.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FieldSpec {
    /// The field name, unique within a collection's schema.
    pub name: String,
    /// Remaining attributes, passed through opaquely.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), attributes: Map::new() }
    }

    /// Sets one attribute, builder style.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// A named field type and its analysis configuration. Same open shape as
/// [`FieldSpec`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FieldTypeSpec {
    /// The field type name, referenced by fields' `type` attribute.
    pub name: String,
    /// Analysis/indexing configuration, passed through opaquely.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl FieldTypeSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), attributes: Map::new() }
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// A copy-field rule: duplicate `source` into `dest` at index time.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CopyFieldSpec {
    pub source: String,
    pub dest: String,
}

impl CopyFieldSpec {
    pub fn new(source: impl Into<String>, dest: impl Into<String>) -> Self {
        Self { source: source.into(), dest: dest.into() }
    }
}
