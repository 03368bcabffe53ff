use std::sync::Arc;
use serde_json::{ json, Value };
use log::{ debug, info };

use crate::error::{ ElementKind, SchemaError };
use crate::schema::{ CopyFieldSpec, FieldSpec, FieldTypeSpec };
use crate::transport::{ RequestMethod, Transport };

const SCHEMA_ENDPOINT: &str = "schema/";

/// Client for a collection's managed-schema HTTP API.
///
/// Every method is a single stateless round trip through the injected
/// [`Transport`]; existence checks always re-fetch the remote snapshot, the
/// remote engine is the sole source of truth. Mutating methods return the
/// server's response body unchanged.
pub struct SchemaClient {
    transport: Arc<dyn Transport>,
    devel: bool,
}

impl SchemaClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport, devel: false }
    }

    /// Enables extra diagnostic traces, builder style.
    pub fn with_devel(mut self, devel: bool) -> Self {
        self.devel = devel;
        self
    }

    /// Returns the fields currently defined on the collection's schema.
    pub async fn get_fields(&self, collection: &str) -> Result<Vec<FieldSpec>, SchemaError> {
        let (res, _con_info) = self.transport.send_request(
            RequestMethod::Get,
            "schema/fields",
            collection,
            None
        ).await?;
        Ok(serde_json::from_value(res.get("fields").cloned().unwrap_or(Value::Null))?)
    }

    /// Returns the copy-field rules currently defined on the collection's schema.
    pub async fn get_copy_fields(
        &self,
        collection: &str
    ) -> Result<Vec<CopyFieldSpec>, SchemaError> {
        let (res, _con_info) = self.transport.send_request(
            RequestMethod::Get,
            "schema/copyfields",
            collection,
            None
        ).await?;
        Ok(serde_json::from_value(res.get("copyFields").cloned().unwrap_or(Value::Null))?)
    }

    /// Returns the field types currently defined on the collection's schema.
    pub async fn get_field_types(
        &self,
        collection: &str
    ) -> Result<Vec<FieldTypeSpec>, SchemaError> {
        let (res, _con_info) = self.transport.send_request(
            RequestMethod::Get,
            "schema/fieldtypes",
            collection,
            None
        ).await?;
        Ok(serde_json::from_value(res.get("fieldTypes").cloned().unwrap_or(Value::Null))?)
    }

    /// Checks whether a field exists. Always a fresh fetch plus linear search.
    pub async fn field_exists(&self, collection: &str, name: &str) -> Result<bool, SchemaError> {
        let fields = self.get_fields(collection).await?;
        Ok(fields.iter().any(|field| field.name == name))
    }

    /// Checks whether a field type exists.
    pub async fn field_type_exists(
        &self,
        collection: &str,
        name: &str
    ) -> Result<bool, SchemaError> {
        let field_types = self.get_field_types(collection).await?;
        Ok(field_types.iter().any(|field_type| field_type.name == name))
    }

    /// Checks whether a copy-field rule from `source` to `dest` exists.
    pub async fn copy_field_exists(
        &self,
        collection: &str,
        source: &str,
        dest: &str
    ) -> Result<bool, SchemaError> {
        let copy_fields = self.get_copy_fields(collection).await?;
        Ok(copy_fields.iter().any(|rule| rule.source == source && rule.dest == dest))
    }

    /// Fetches a single field by name.
    pub async fn get_field(&self, collection: &str, name: &str) -> Result<FieldSpec, SchemaError> {
        let fields = self.get_fields(collection).await?;
        fields
            .into_iter()
            .find(|field| field.name == name)
            .ok_or_else(|| not_found(ElementKind::Field, name, collection))
    }

    /// Fetches a single field type by name.
    pub async fn get_field_type(
        &self,
        collection: &str,
        name: &str
    ) -> Result<FieldTypeSpec, SchemaError> {
        let field_types = self.get_field_types(collection).await?;
        field_types
            .into_iter()
            .find(|field_type| field_type.name == name)
            .ok_or_else(|| not_found(ElementKind::FieldType, name, collection))
    }

    /// Adds a field to the schema. Fails with
    /// [`SchemaError::AlreadyExists`] if the name is already taken, before any
    /// mutating request goes out.
    pub async fn create_field(
        &self,
        collection: &str,
        spec: &FieldSpec
    ) -> Result<Value, SchemaError> {
        if self.field_exists(collection, &spec.name).await? {
            return Err(already_exists(ElementKind::Field, &spec.name, collection));
        }
        self.post_patch(collection, "add-field", serde_json::to_value(spec)?).await
    }

    /// Replaces a field definition. Fails with [`SchemaError::NotFound`] if
    /// the name is absent.
    pub async fn replace_field(
        &self,
        collection: &str,
        spec: &FieldSpec
    ) -> Result<Value, SchemaError> {
        if !self.field_exists(collection, &spec.name).await? {
            return Err(not_found(ElementKind::Field, &spec.name, collection));
        }
        self.post_patch(collection, "replace-field", serde_json::to_value(spec)?).await
    }

    /// Deletes a field by name. Fails with [`SchemaError::NotFound`] if the
    /// name is absent.
    pub async fn delete_field(&self, collection: &str, name: &str) -> Result<Value, SchemaError> {
        if !self.field_exists(collection, name).await? {
            return Err(not_found(ElementKind::Field, name, collection));
        }
        self.post_patch(collection, "delete-field", json!({ "name": name })).await
    }

    /// Adds a field type to the schema. Fails with
    /// [`SchemaError::AlreadyExists`] if the name is already taken.
    pub async fn create_field_type(
        &self,
        collection: &str,
        spec: &FieldTypeSpec
    ) -> Result<Value, SchemaError> {
        if self.field_type_exists(collection, &spec.name).await? {
            return Err(already_exists(ElementKind::FieldType, &spec.name, collection));
        }
        self.post_patch(collection, "add-field-type", serde_json::to_value(spec)?).await
    }

    /// Replaces a field type definition. Fails with [`SchemaError::NotFound`]
    /// if the name is absent.
    pub async fn replace_field_type(
        &self,
        collection: &str,
        spec: &FieldTypeSpec
    ) -> Result<Value, SchemaError> {
        if !self.field_type_exists(collection, &spec.name).await? {
            return Err(not_found(ElementKind::FieldType, &spec.name, collection));
        }
        self.post_patch(collection, "replace-field-type", serde_json::to_value(spec)?).await
    }

    /// Deletes a field type by name. Fails with [`SchemaError::NotFound`] if
    /// the name is absent.
    pub async fn delete_field_type(
        &self,
        collection: &str,
        name: &str
    ) -> Result<Value, SchemaError> {
        if !self.field_type_exists(collection, name).await? {
            return Err(not_found(ElementKind::FieldType, name, collection));
        }
        self.post_patch(collection, "delete-field-type", json!({ "name": name })).await
    }

    /// Adds a copy-field rule. No existence precheck and no dedup: an
    /// identical rule already on the schema does not stop the request.
    pub async fn create_copy_field(
        &self,
        collection: &str,
        spec: &CopyFieldSpec
    ) -> Result<Value, SchemaError> {
        self.post_patch(collection, "add-copy-field", serde_json::to_value(spec)?).await
    }

    /// Deletes a copy-field rule. Unlike the field and field-type deletes,
    /// a missing rule is not an error: it is logged and the delete request is
    /// issued regardless.
    pub async fn delete_copy_field(
        &self,
        collection: &str,
        spec: &CopyFieldSpec
    ) -> Result<Value, SchemaError> {
        if self.devel {
            debug!("Deleting copy field {:?} from collection '{}'", spec, collection);
        }
        if !self.copy_field_exists(collection, &spec.source, &spec.dest).await? {
            info!(
                "Copy field rule {} -> {} not present in collection '{}', issuing delete anyway",
                spec.source,
                spec.dest,
                collection
            );
        }
        self.post_patch(collection, "delete-copy-field", serde_json::to_value(spec)?).await
    }

    async fn post_patch(
        &self,
        collection: &str,
        operation: &str,
        payload: Value
    ) -> Result<Value, SchemaError> {
        let mut body = serde_json::Map::new();
        body.insert(operation.to_string(), payload);
        let body = Value::Object(body);
        let (res, _con_info) = self.transport.send_request(
            RequestMethod::Post,
            SCHEMA_ENDPOINT,
            collection,
            Some(body.to_string())
        ).await?;
        Ok(res)
    }
}

fn already_exists(kind: ElementKind, name: &str, collection: &str) -> SchemaError {
    SchemaError::AlreadyExists {
        kind,
        name: name.to_string(),
        collection: collection.to_string(),
    }
}

fn not_found(kind: ElementKind, name: &str, collection: &str) -> SchemaError {
    SchemaError::NotFound {
        kind,
        name: name.to_string(),
        collection: collection.to_string(),
    }
}
