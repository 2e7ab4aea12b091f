use super::{block_boilerplate, BlockBase, BlockRegistry, PageBlock};
use crate::apply::Source;
use crate::error::ModelResult;
use quarry_types::{cast, RawObject};
use serde_json::Value;

/// Embeds an external page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IFrame {
    pub base: BlockBase,
    pub options: IFrameOptions,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IFrameOptions {
    pub src: String,
    /// Render inside the block frame instead of full width.
    pub wrap: bool,
}

impl IFrameOptions {
    fn apply(&mut self, src: &Source<'_>) {
        src.apply("src", &mut self.src, cast::string);
        src.apply("wrap", &mut self.wrap, cast::boolean);
    }

    fn to_raw(&self) -> RawObject {
        let mut raw = RawObject::new();
        raw.insert("src".into(), Value::from(self.src.as_str()));
        raw.insert("wrap".into(), Value::from(self.wrap));
        raw
    }
}

impl IFrame {
    pub const KIND: &'static str = "IFrame";

    pub fn from_source(src: &Source<'_>) -> ModelResult<Self> {
        let mut block = Self::default();
        block.base.apply(src);
        if let Some(options) = src.nested("options") {
            block.options.apply(&options);
        }
        Ok(block)
    }
}

impl PageBlock for IFrame {
    block_boilerplate!(IFrame);

    fn validate(&self) -> Vec<String> {
        let mut messages = self.base.validate(Self::KIND);
        if self.options.src.trim().is_empty() {
            messages.push(format!("{} block: source URL not set", Self::KIND));
        }
        messages
    }
}

pub(super) fn register(registry: &BlockRegistry) {
    registry.set(IFrame::KIND, |src| {
        Ok(Box::new(IFrame::from_source(src)?) as Box<dyn PageBlock>)
    });
}
