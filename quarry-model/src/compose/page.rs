//! Composite pages.
//!
//! A page owns an ordered list of heterogeneous blocks and an ordered list of
//! sub-pages. Ownership is strictly downward: children never point back at
//! their parent, the parent relation is only recorded as `selfID`.

use super::block::{self, serialize_blocks, BlockRegistry, PageBlock};
use crate::apply::Source;
use crate::entity::Entity;
use crate::error::ModelResult;
use crate::registry::KIND_FIELD;
use chrono::{DateTime, Utc};
use quarry_types::{are_objects_of, cast, sort_objects_where, ObjectId, RawObject};
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, warn};

/// How a page treats a raw block array containing elements without a
/// string `kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockGuard {
    /// Any element without a string `kind` drops the whole array; the page keeps
    /// its previous blocks.
    #[default]
    AllOrNothing,
    /// Elements without a string `kind` are dropped one by one; the rest are built.
    PerElement,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    #[serde(rename = "pageID")]
    pub page_id: ObjectId,
    /// Parent page, [`ObjectId::NONE`] for root pages.
    #[serde(rename = "selfID")]
    pub self_id: ObjectId,
    #[serde(rename = "namespaceID")]
    pub namespace_id: ObjectId,
    /// Set on record pages, which render a single record of this module.
    #[serde(rename = "moduleID")]
    pub module_id: ObjectId,

    pub title: String,
    pub handle: String,
    pub description: String,
    pub weight: i64,
    pub visible: bool,
    pub labels: BTreeMap<String, String>,

    #[serde(serialize_with = "serialize_blocks")]
    pub blocks: Vec<Box<dyn PageBlock>>,
    pub children: Vec<Page>,

    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "deletedAt", skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,

    #[serde(rename = "canUpdatePage")]
    pub can_update_page: bool,
    #[serde(rename = "canDeletePage")]
    pub can_delete_page: bool,
    #[serde(rename = "canGrant")]
    pub can_grant: bool,
}

impl Page {
    /// Builds a page with an explicit guard mode and block registry.
    pub fn hydrate(raw: &RawObject, guard: BlockGuard, registry: &BlockRegistry) -> ModelResult<Self> {
        let mut page = Self::default();
        page.apply_with(&Source::new(raw), guard, registry)?;
        Ok(page)
    }

    /// Applies `src`, building blocks through `registry`.
    ///
    /// Blocks and children are constructed before any field is assigned, so
    /// a construction failure leaves the page untouched.
    pub fn apply_with(
        &mut self,
        src: &Source<'_>,
        guard: BlockGuard,
        registry: &BlockRegistry,
    ) -> ModelResult<()> {
        let blocks = match src.get("blocks") {
            Some(raw) => Self::build_blocks(raw, guard, registry)?,
            None => None,
        };
        let children = match src.get("children") {
            Some(raw) => Self::build_children(raw, guard, registry)?,
            None => None,
        };

        src.apply("pageID", &mut self.page_id, cast::id);
        src.apply("selfID", &mut self.self_id, cast::id);
        src.apply("namespaceID", &mut self.namespace_id, cast::id);
        src.apply("moduleID", &mut self.module_id, cast::id);
        src.apply("title", &mut self.title, cast::string);
        src.apply("handle", &mut self.handle, cast::string);
        src.apply("description", &mut self.description, cast::string);
        src.apply("weight", &mut self.weight, cast::integer);
        src.apply("visible", &mut self.visible, cast::boolean);
        src.apply("labels", &mut self.labels, cast::labels);
        src.apply("createdAt", &mut self.created_at, cast::date);
        src.apply("updatedAt", &mut self.updated_at, cast::date);
        src.apply("deletedAt", &mut self.deleted_at, cast::date);
        src.apply("canUpdatePage", &mut self.can_update_page, cast::boolean);
        src.apply("canDeletePage", &mut self.can_delete_page, cast::boolean);
        src.apply("canGrant", &mut self.can_grant, cast::boolean);

        if let Some(blocks) = blocks {
            self.blocks = blocks;
        }
        if let Some(children) = children {
            self.children = children;
        }
        Ok(())
    }

    /// `None` means the guard rejected the array and the field stays as is.
    fn build_blocks(
        raw: &Value,
        guard: BlockGuard,
        registry: &BlockRegistry,
    ) -> ModelResult<Option<Vec<Box<dyn PageBlock>>>> {
        let sorted = sort_objects_where(raw, |block| {
            block.get(KIND_FIELD).is_some_and(Value::is_string)
        });
        if !raw.is_array() {
            debug!("page blocks: expected an array, dropping");
            return Ok(None);
        }
        if !sorted.is_clean() {
            debug!(rejected = ?sorted.rejected, ?guard, "page blocks: elements without a string kind");
            if guard == BlockGuard::AllOrNothing {
                return Ok(None);
            }
        }

        sorted
            .accepted
            .into_iter()
            .map(|raw| registry.make(raw))
            .collect::<ModelResult<Vec<_>>>()
            .map(Some)
    }

    fn build_children(
        raw: &Value,
        guard: BlockGuard,
        registry: &BlockRegistry,
    ) -> ModelResult<Option<Vec<Page>>> {
        if !are_objects_of(raw, <Page as Entity>::ID_FIELD) {
            debug!("page children: not every element carries pageID, dropping");
            return Ok(None);
        }

        raw.as_array()
            .into_iter()
            .flatten()
            .filter_map(Value::as_object)
            .map(|child| Page::hydrate(child, guard, registry))
            .collect::<ModelResult<Vec<_>>>()
            .map(Some)
    }

    /// True for top-level pages.
    pub fn is_root(&self) -> bool {
        !self.self_id.is_saved()
    }

    /// True for pages that render a single record of a module.
    pub fn is_record_page(&self) -> bool {
        self.module_id.is_saved()
    }

    /// Collects block messages in block order, then each sub-page's messages
    /// in child order.
    pub fn validate(&self) -> Vec<String> {
        let mut messages: Vec<String> = self.blocks.iter().flat_map(|b| b.validate()).collect();
        for child in &self.children {
            messages.extend(child.validate());
        }
        messages
    }

    /// Pre-order traversal of this page and every page below it.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Finds a page by id in this subtree.
    pub fn find(&self, page_id: ObjectId) -> Option<&Page> {
        if !page_id.is_saved() {
            return None;
        }
        self.walk().find(|p| p.page_id == page_id)
    }

    /// Assembles a flat list of pages into a forest using `selfID`.
    ///
    /// Pages whose parent is not in the list become roots. Siblings are
    /// ordered by `weight`, then by input order. Pages caught in a parent
    /// cycle are appended as roots.
    pub fn assemble(pages: Vec<Page>) -> Vec<Page> {
        let known: HashSet<ObjectId> = pages
            .iter()
            .map(|p| p.page_id)
            .filter(ObjectId::is_saved)
            .collect();

        let mut roots = Vec::new();
        let mut by_parent: HashMap<ObjectId, Vec<(usize, Page)>> = HashMap::new();
        for (idx, page) in pages.into_iter().enumerate() {
            if page.is_root() || !known.contains(&page.self_id) || page.self_id == page.page_id {
                roots.push(page);
            } else {
                by_parent.entry(page.self_id).or_default().push((idx, page));
            }
        }

        roots.sort_by_key(|p| p.weight);
        for root in &mut roots {
            attach_children(root, &mut by_parent);
        }

        if !by_parent.is_empty() {
            let mut stranded: Vec<(usize, Page)> = by_parent.into_values().flatten().collect();
            warn!(count = stranded.len(), "pages with cyclic parents promoted to roots");
            stranded.sort_by_key(|(idx, p)| (p.weight, *idx));
            roots.extend(stranded.into_iter().map(|(_, p)| p));
        }
        roots
    }
}

fn attach_children(page: &mut Page, by_parent: &mut HashMap<ObjectId, Vec<(usize, Page)>>) {
    if let Some(children) = by_parent.remove(&page.page_id) {
        let mut children: Vec<Page> = children.into_iter().map(|(_, p)| p).collect();
        children.sort_by_key(|p| p.weight);
        for child in &mut children {
            attach_children(child, by_parent);
        }
        page.children.extend(children);
    }
}

impl Entity for Page {
    const RESOURCE: &'static str = "page";
    const ID_FIELD: &'static str = "pageID";

    fn id(&self) -> ObjectId {
        self.page_id
    }

    fn apply(&mut self, source: &Source<'_>) -> ModelResult<()> {
        self.apply_with(source, BlockGuard::default(), block::registry())
    }
}

/// Iterator returned by [`Page::walk`].
#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<&'a Page>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Page;

    fn next(&mut self) -> Option<Self::Item> {
        let page = self.stack.pop()?;
        self.stack.extend(page.children.iter().rev());
        Some(page)
    }
}
