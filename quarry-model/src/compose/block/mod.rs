//! Page blocks.
//!
//! A page lays out a heterogeneous list of blocks. Each raw block carries a
//! `kind` discriminant and is built through the process-wide [`registry`],
//! which starts out with every built-in kind registered by its own module.

/// Implements the boilerplate half of [`PageBlock`] for a block struct with
/// `base` and `options` fields and an `options.to_raw()` method.
macro_rules! block_boilerplate {
    ($ty:ty) => {
        fn kind(&self) -> &'static str {
            <$ty>::KIND
        }

        fn base(&self) -> &$crate::compose::block::BlockBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut $crate::compose::block::BlockBase {
            &mut self.base
        }

        fn options_raw(&self) -> quarry_types::RawObject {
            self.options.to_raw()
        }

        fn clone_block(&self) -> Box<dyn $crate::compose::block::PageBlock> {
            Box::new(self.clone())
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    };
}

pub(crate) use block_boilerplate;

mod chart;
mod content;
mod iframe;
mod record_list;

pub use chart::{Chart, ChartOptions};
pub use content::{Content, ContentOptions};
pub use iframe::{IFrame, IFrameOptions};
pub use record_list::{RecordList, RecordListOptions};

use crate::apply::Source;
use crate::registry::{VariantRegistry, KIND_FIELD};
use quarry_types::{cast, ObjectId, RawObject};
use serde::Serialize;
use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::sync::LazyLock;

/// Registry of page-block constructors.
pub type BlockRegistry = VariantRegistry<Box<dyn PageBlock>>;

static BLOCKS: LazyLock<BlockRegistry> = LazyLock::new(|| {
    let registry = VariantRegistry::new("page block");
    content::register(&registry);
    record_list::register(&registry);
    chart::register(&registry);
    iframe::register(&registry);
    registry
});

/// The process-wide page-block registry.
pub fn registry() -> &'static BlockRegistry {
    &BLOCKS
}

/// Default block placement: top-left corner, 3x3 grid cells.
pub const DEFAULT_XYWH: [i64; 4] = [0, 0, 3, 3];

/// Fields shared by every block kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockBase {
    #[serde(rename = "blockID")]
    pub block_id: ObjectId,
    pub title: String,
    pub description: String,
    /// Grid placement as `[x, y, width, height]`.
    pub xywh: [i64; 4],
    pub style: RawObject,
}

impl Default for BlockBase {
    fn default() -> Self {
        Self {
            block_id: ObjectId::NONE,
            title: String::new(),
            description: String::new(),
            xywh: DEFAULT_XYWH,
            style: RawObject::new(),
        }
    }
}

impl BlockBase {
    pub(crate) fn apply(&mut self, src: &Source<'_>) {
        src.apply("blockID", &mut self.block_id, cast::id);
        src.apply("title", &mut self.title, cast::string);
        src.apply("description", &mut self.description, cast::string);
        src.apply("xywh", &mut self.xywh, xywh);
        src.apply("style", &mut self.style, cast::object);
    }

    /// Messages common to every kind.
    pub fn validate(&self, kind: &str) -> Vec<String> {
        let [_, _, w, h] = self.xywh;
        if w <= 0 || h <= 0 {
            vec![format!("{kind} block: invalid size")]
        } else {
            Vec::new()
        }
    }
}

/// Coerces a four-element numeric array. Anything else keeps the current value.
fn xywh(value: &Value, current: &[i64; 4]) -> [i64; 4] {
    let Some(items) = value.as_array().filter(|items| items.len() == 4) else {
        return *current;
    };
    let mut out = [0; 4];
    for (slot, item) in out.iter_mut().zip(items) {
        match item.as_i64().or_else(|| item.as_f64().map(|f| f.trunc() as i64)) {
            Some(n) => *slot = n,
            None => return *current,
        }
    }
    out
}

/// Behaviour common to every block kind.
pub trait PageBlock: fmt::Debug + Send + Sync {
    /// The discriminant this block is registered under.
    fn kind(&self) -> &'static str;

    fn base(&self) -> &BlockBase;

    fn base_mut(&mut self) -> &mut BlockBase;

    /// Kind-specific options as raw JSON.
    fn options_raw(&self) -> RawObject;

    /// Human-readable configuration problems; empty when the block is usable.
    fn validate(&self) -> Vec<String> {
        self.base().validate(self.kind())
    }

    fn clone_block(&self) -> Box<dyn PageBlock>;

    /// Downcasting support.
    fn as_any(&self) -> &dyn Any;

    /// The raw representation, including `kind` and `options`.
    fn to_raw(&self) -> RawObject {
        let mut raw = match serde_json::to_value(self.base()) {
            Ok(Value::Object(raw)) => raw,
            _ => RawObject::new(),
        };
        raw.insert(KIND_FIELD.to_string(), Value::from(self.kind()));
        raw.insert("options".to_string(), Value::Object(self.options_raw()));
        raw
    }
}

impl dyn PageBlock {
    /// Downcasts to a concrete block kind.
    pub fn downcast_ref<T: PageBlock + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

impl Clone for Box<dyn PageBlock> {
    fn clone(&self) -> Self {
        self.clone_block()
    }
}

impl PartialEq for Box<dyn PageBlock> {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.to_raw() == other.to_raw()
    }
}

pub(crate) fn serialize_blocks<S>(blocks: &[Box<dyn PageBlock>], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeSeq;
    let mut seq = serializer.serialize_seq(Some(blocks.len()))?;
    for block in blocks {
        seq.serialize_element(&block.to_raw())?;
    }
    seq.end()
}
