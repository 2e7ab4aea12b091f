use crate::apply::Source;
use crate::entity::Entity;
use crate::error::ModelResult;
use chrono::{DateTime, Utc};
use quarry_types::{are_objects_of, cast, ObjectId, RawObject};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// A record schema inside a namespace.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Module {
    #[serde(rename = "moduleID")]
    pub module_id: ObjectId,
    #[serde(rename = "namespaceID")]
    pub namespace_id: ObjectId,
    pub name: String,
    pub handle: String,
    pub fields: Vec<ModuleField>,

    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "deletedAt", skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,

    #[serde(rename = "canUpdateModule")]
    pub can_update_module: bool,
    #[serde(rename = "canDeleteModule")]
    pub can_delete_module: bool,
    #[serde(rename = "canCreateRecord")]
    pub can_create_record: bool,
}

impl Module {
    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&ModuleField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields that must be filled in on every record.
    pub fn required_fields(&self) -> impl Iterator<Item = &ModuleField> {
        self.fields.iter().filter(|f| f.is_required)
    }

    fn build_fields(raw: &Value) -> ModelResult<Option<Vec<ModuleField>>> {
        if !are_objects_of(raw, "name") {
            debug!("module fields: not every element carries a name, dropping");
            return Ok(None);
        }
        raw.as_array()
            .into_iter()
            .flatten()
            .map(ModuleField::from_value)
            .collect::<ModelResult<Vec<_>>>()
            .map(Some)
    }
}

impl Entity for Module {
    const RESOURCE: &'static str = "module";
    const ID_FIELD: &'static str = "moduleID";

    fn id(&self) -> ObjectId {
        self.module_id
    }

    fn apply(&mut self, src: &Source<'_>) -> ModelResult<()> {
        let fields = match src.get("fields") {
            Some(raw) => Self::build_fields(raw)?,
            None => None,
        };

        src.apply("moduleID", &mut self.module_id, cast::id);
        src.apply("namespaceID", &mut self.namespace_id, cast::id);
        src.apply("name", &mut self.name, cast::string);
        src.apply("handle", &mut self.handle, cast::string);
        src.apply("createdAt", &mut self.created_at, cast::date);
        src.apply("updatedAt", &mut self.updated_at, cast::date);
        src.apply("deletedAt", &mut self.deleted_at, cast::date);
        src.apply("canUpdateModule", &mut self.can_update_module, cast::boolean);
        src.apply("canDeleteModule", &mut self.can_delete_module, cast::boolean);
        src.apply("canCreateRecord", &mut self.can_create_record, cast::boolean);

        if let Some(fields) = fields {
            self.fields = fields;
        }
        Ok(())
    }
}

/// One field of a module.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleField {
    #[serde(rename = "fieldID")]
    pub field_id: ObjectId,
    pub name: String,
    /// Field type, e.g. "String", "Number", "Select".
    pub kind: String,
    pub label: String,
    #[serde(rename = "isRequired")]
    pub is_required: bool,
    #[serde(rename = "isMulti")]
    pub is_multi: bool,
    pub options: RawObject,
    #[serde(rename = "defaultValue")]
    pub default_value: Value,
}

impl Default for ModuleField {
    fn default() -> Self {
        Self {
            field_id: ObjectId::NONE,
            name: String::new(),
            kind: "String".to_string(),
            label: String::new(),
            is_required: false,
            is_multi: false,
            options: RawObject::new(),
            default_value: Value::Null,
        }
    }
}

impl Entity for ModuleField {
    const RESOURCE: &'static str = "module field";
    const ID_FIELD: &'static str = "fieldID";

    fn id(&self) -> ObjectId {
        self.field_id
    }

    fn apply(&mut self, src: &Source<'_>) -> ModelResult<()> {
        src.apply("fieldID", &mut self.field_id, cast::id);
        src.apply("name", &mut self.name, cast::string);
        src.apply("kind", &mut self.kind, cast::string);
        src.apply("label", &mut self.label, cast::string);
        src.apply("isRequired", &mut self.is_required, cast::boolean);
        src.apply("isMulti", &mut self.is_multi, cast::boolean);
        src.apply("options", &mut self.options, cast::object);
        src.apply("defaultValue", &mut self.default_value, cast::json);
        Ok(())
    }
}
