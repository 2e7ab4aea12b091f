use super::{block_boilerplate, BlockBase, BlockRegistry, PageBlock};
use crate::apply::Source;
use crate::error::ModelResult;
use quarry_types::{cast, ObjectId, RawObject};
use serde_json::Value;

/// Default number of records per page.
pub const DEFAULT_PER_PAGE: i64 = 20;

/// A paged list of records from one module.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordList {
    pub base: BlockBase,
    pub options: RecordListOptions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordListOptions {
    pub module_id: ObjectId,
    /// Names of the module fields shown as columns.
    pub fields: Vec<String>,
    pub per_page: i64,
}

impl Default for RecordListOptions {
    fn default() -> Self {
        Self {
            module_id: ObjectId::NONE,
            fields: Vec::new(),
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl RecordListOptions {
    fn apply(&mut self, src: &Source<'_>) {
        src.apply("moduleID", &mut self.module_id, cast::id);
        src.apply("fields", &mut self.fields, cast::string_list);
        src.apply("perPage", &mut self.per_page, cast::integer);
    }

    fn to_raw(&self) -> RawObject {
        let mut raw = RawObject::new();
        raw.insert("moduleID".into(), Value::from(self.module_id.to_string()));
        raw.insert("fields".into(), Value::from(self.fields.clone()));
        raw.insert("perPage".into(), Value::from(self.per_page));
        raw
    }
}

impl RecordList {
    pub const KIND: &'static str = "RecordList";

    pub fn from_source(src: &Source<'_>) -> ModelResult<Self> {
        let mut block = Self::default();
        block.base.apply(src);
        if let Some(options) = src.nested("options") {
            block.options.apply(&options);
        }
        Ok(block)
    }
}

impl PageBlock for RecordList {
    block_boilerplate!(RecordList);

    fn validate(&self) -> Vec<String> {
        let mut messages = self.base.validate(Self::KIND);
        if !self.options.module_id.is_saved() {
            messages.push(format!("{} block: module not selected", Self::KIND));
        }
        messages
    }
}

pub(super) fn register(registry: &BlockRegistry) {
    registry.set(RecordList::KIND, |src| {
        Ok(Box::new(RecordList::from_source(src)?) as Box<dyn PageBlock>)
    });
}
