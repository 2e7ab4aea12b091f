use super::{block_boilerplate, BlockBase, BlockRegistry, PageBlock};
use crate::apply::Source;
use crate::error::ModelResult;
use quarry_types::{cast, ObjectId, RawObject};
use serde_json::Value;

/// Embeds a saved chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chart {
    pub base: BlockBase,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartOptions {
    pub chart_id: ObjectId,
}

impl ChartOptions {
    fn apply(&mut self, src: &Source<'_>) {
        src.apply("chartID", &mut self.chart_id, cast::id);
    }

    fn to_raw(&self) -> RawObject {
        let mut raw = RawObject::new();
        raw.insert("chartID".into(), Value::from(self.chart_id.to_string()));
        raw
    }
}

impl Chart {
    pub const KIND: &'static str = "Chart";

    pub fn from_source(src: &Source<'_>) -> ModelResult<Self> {
        let mut block = Self::default();
        block.base.apply(src);
        if let Some(options) = src.nested("options") {
            block.options.apply(&options);
        }
        Ok(block)
    }
}

impl PageBlock for Chart {
    block_boilerplate!(Chart);

    fn validate(&self) -> Vec<String> {
        let mut messages = self.base.validate(Self::KIND);
        if !self.options.chart_id.is_saved() {
            messages.push(format!("{} block: chart not selected", Self::KIND));
        }
        messages
    }
}

pub(super) fn register(registry: &BlockRegistry) {
    registry.set(Chart::KIND, |src| {
        Ok(Box::new(Chart::from_source(src)?) as Box<dyn PageBlock>)
    });
}
