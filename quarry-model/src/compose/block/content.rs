use super::{block_boilerplate, BlockBase, BlockRegistry, PageBlock};
use crate::apply::Source;
use crate::error::ModelResult;
use quarry_types::{cast, RawObject};
use serde_json::Value;

/// Static rich-text content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Content {
    pub base: BlockBase,
    pub options: ContentOptions,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentOptions {
    /// HTML body.
    pub body: String,
}

impl ContentOptions {
    fn apply(&mut self, src: &Source<'_>) {
        src.apply("body", &mut self.body, cast::string);
    }

    fn to_raw(&self) -> RawObject {
        let mut raw = RawObject::new();
        raw.insert("body".into(), Value::from(self.body.as_str()));
        raw
    }
}

impl Content {
    pub const KIND: &'static str = "Content";

    pub fn from_source(src: &Source<'_>) -> ModelResult<Self> {
        let mut block = Self::default();
        block.base.apply(src);
        if let Some(options) = src.nested("options") {
            block.options.apply(&options);
        }
        Ok(block)
    }
}

impl PageBlock for Content {
    block_boilerplate!(Content);
}

pub(super) fn register(registry: &BlockRegistry) {
    registry.set(Content::KIND, |src| {
        Ok(Box::new(Content::from_source(src)?) as Box<dyn PageBlock>)
    });
}
