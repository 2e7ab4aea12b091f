use pretty_assertions::assert_eq;
use quarry_model::compose::block::{
    self, BlockBase, BlockRegistry, Chart, Content, IFrame, PageBlock, RecordList,
};
use quarry_model::compose::{BlockGuard, Page};
use quarry_model::{Entity, ModelError, ModelResult, Source, VariantRegistry};
use quarry_types::{cast, ObjectId, RawObject};
use serde_json::{json, Value};

fn raw(value: Value) -> RawObject {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

/// Minimal custom block used to exercise registration.
#[derive(Debug, Clone, Default)]
struct Marker {
    base: BlockBase,
    label: String,
}

impl Marker {
    const KIND: &'static str = "X";

    fn make(src: &Source<'_>) -> ModelResult<Box<dyn PageBlock>> {
        let mut m = Marker::default();
        src.apply("title", &mut m.base.title, cast::string);
        src.apply("xywh", &mut m.base.xywh, |v, cur| {
            serde_json::from_value(v.clone()).unwrap_or(*cur)
        });
        if let Some(opts) = src.nested("options") {
            opts.apply("label", &mut m.label, cast::string);
        }
        Ok(Box::new(m))
    }
}

impl PageBlock for Marker {
    fn kind(&self) -> &'static str {
        Self::KIND
    }
    fn base(&self) -> &BlockBase {
        &self.base
    }
    fn base_mut(&mut self) -> &mut BlockBase {
        &mut self.base
    }
    fn options_raw(&self) -> RawObject {
        raw(json!({"label": self.label}))
    }
    fn validate(&self) -> Vec<String> {
        if self.label.is_empty() {
            vec![format!("marker {} unlabeled", self.base.title)]
        } else {
            Vec::new()
        }
    }
    fn clone_block(&self) -> Box<dyn PageBlock> {
        Box::new(self.clone())
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

fn local_registry() -> BlockRegistry {
    let registry = VariantRegistry::new("test blocks");
    registry.set(Marker::KIND, Marker::make);
    registry
}

// ── Scalar fields & derived predicates ───────────────────────────

#[test]
fn page_scalars() {
    let page = Page::from_value(&json!({
        "pageID": "100",
        "namespaceID": "1",
        "title": "Leads",
        "handle": "leads",
        "weight": "3",
        "visible": true,
        "canUpdatePage": true
    }))
    .unwrap();

    assert_eq!(page.page_id, ObjectId::new(100));
    assert_eq!(page.weight, 3);
    assert!(page.visible);
    assert!(page.is_root());
    assert!(!page.is_record_page());
    assert!(page.can_update_page);
    assert!(!page.can_grant);
}

#[test]
fn record_page_and_sub_page() {
    let page = Page::from_value(&json!({"pageID": "2", "selfID": "1", "moduleID": "9"})).unwrap();
    assert!(!page.is_root());
    assert!(page.is_record_page());
}

// ── Blocks through the global registry ───────────────────────────

#[test]
fn builtin_blocks_are_registered() {
    let kinds = block::registry().kinds();
    for kind in ["Chart", "Content", "IFrame", "RecordList"] {
        assert!(kinds.iter().any(|k| k == kind), "missing {kind}");
    }
}

#[test]
fn blocks_are_built_by_kind() {
    let page = Page::from_value(&json!({
        "pageID": "1",
        "blocks": [
            {"kind": "Content", "title": "Intro", "options": {"body": "<p>hi</p>"}},
            {"kind": "RecordList", "xywh": [0, 3, 12, 6], "options": {"moduleID": "55", "fields": ["name"], "perPage": 50}},
            {"kind": "Chart", "options": {"chartID": "8"}}
        ]
    }))
    .unwrap();

    assert_eq!(page.blocks.len(), 3);
    let content = page.blocks[0].downcast_ref::<Content>().unwrap();
    assert_eq!(content.base.title, "Intro");
    assert_eq!(content.options.body, "<p>hi</p>");

    let list = page.blocks[1].downcast_ref::<RecordList>().unwrap();
    assert_eq!(list.base.xywh, [0, 3, 12, 6]);
    assert_eq!(list.options.module_id, ObjectId::new(55));
    assert_eq!(list.options.per_page, 50);

    let chart = page.blocks[2].downcast_ref::<Chart>().unwrap();
    assert_eq!(chart.options.chart_id, ObjectId::new(8));
    assert!(page.blocks[2].downcast_ref::<IFrame>().is_none());
}

#[test]
fn record_list_defaults() {
    let page = Page::from_value(&json!({"blocks": [{"kind": "RecordList"}]})).unwrap();
    let list = page.blocks[0].downcast_ref::<RecordList>().unwrap();
    assert_eq!(list.options.per_page, 20);
    assert_eq!(list.base.xywh, [0, 0, 3, 3]);
}

#[test]
fn unregistered_kind_fails_construction() {
    let err = Page::from_value(&json!({"blocks": [{"kind": "Hologram"}]})).unwrap_err();
    match err {
        ModelError::UnknownKind { registry, kind } => {
            assert_eq!(registry, "page block");
            assert_eq!(kind, "Hologram");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn construction_failure_leaves_page_untouched() {
    let mut page = Page::from_value(&json!({"title": "Before", "blocks": [{"kind": "Content"}]})).unwrap();
    let before = page.clone();

    let result = page.apply_raw(&raw(json!({"title": "After", "blocks": [{"kind": "Nope"}]})));
    assert!(result.unwrap_err().is_unknown_kind());
    assert_eq!(page, before);
}

#[test]
fn empty_kind_fails_like_any_unregistered_kind() {
    let named = Page::from_value(&json!({"blocks": [{"kind": "Nope"}]})).unwrap_err();
    let empty = Page::from_value(&json!({"blocks": [{"kind": ""}]})).unwrap_err();
    assert!(named.is_unknown_kind());
    assert!(empty.is_unknown_kind());
}

// ── Guard drops ──────────────────────────────────────────────────

#[test]
fn block_without_kind_drops_whole_array() {
    let page = Page::from_value(&json!({
        "blocks": [{"kind": "Content"}, {"title": "no kind"}]
    }))
    .unwrap();
    assert!(page.blocks.is_empty());
}

#[test]
fn guard_failure_keeps_previous_blocks() {
    let mut page = Page::from_value(&json!({"blocks": [{"kind": "Content"}, {"kind": "Chart"}]})).unwrap();
    page.apply_raw(&raw(json!({"blocks": [{"kind": "Content"}, 3]}))).unwrap();
    assert_eq!(page.blocks.len(), 2);
}

#[test]
fn non_string_kind_is_dropped_by_guard() {
    let mut page = Page::from_value(&json!({"blocks": [{"kind": "Content"}]})).unwrap();
    page.apply_raw(&raw(json!({"blocks": [{"kind": "Chart"}, {"kind": 4}]})))
        .unwrap();
    assert_eq!(page.blocks.len(), 1);
    assert_eq!(page.blocks[0].kind(), "Content");

    let registry = local_registry();
    let input = raw(json!({"blocks": [{"kind": "X"}, {"kind": true}, {"kind": null}]}));
    let page = Page::hydrate(&input, BlockGuard::PerElement, &registry).unwrap();
    assert_eq!(page.blocks.len(), 1);
}

#[test]
fn non_array_blocks_are_dropped() {
    let page = Page::from_value(&json!({"blocks": {"kind": "Content"}})).unwrap();
    assert!(page.blocks.is_empty());
}

#[test]
fn explicit_empty_blocks_reset() {
    let mut page = Page::from_value(&json!({"blocks": [{"kind": "Content"}]})).unwrap();
    page.apply_raw(&raw(json!({"blocks": []}))).unwrap();
    assert!(page.blocks.is_empty());
}

#[test]
fn per_element_guard_keeps_valid_blocks() {
    let registry = local_registry();
    let input = raw(json!({
        "blocks": [{"kind": "X", "xywh": [0, 0, 1, 1]}, {"no-kind-field": true}]
    }));

    let page = Page::hydrate(&input, BlockGuard::PerElement, &registry).unwrap();
    assert_eq!(page.blocks.len(), 1);
    assert_eq!(page.blocks[0].kind(), "X");
    assert_eq!(page.blocks[0].base().xywh, [0, 0, 1, 1]);

    let strict = Page::hydrate(&input, BlockGuard::AllOrNothing, &registry).unwrap();
    assert!(strict.blocks.is_empty());
}

#[test]
fn global_registry_accepts_late_registration() {
    block::registry().set(Marker::KIND, Marker::make);
    let page = Page::from_value(&json!({"blocks": [{"kind": "X", "title": "m"}]})).unwrap();
    assert_eq!(page.blocks[0].kind(), "X");
}

// ── Children ─────────────────────────────────────────────────────

#[test]
fn children_hydrate_recursively() {
    let page = Page::from_value(&json!({
        "pageID": "1",
        "children": [
            {"pageID": "2", "selfID": "1", "children": [{"pageID": "4", "selfID": "2"}]},
            {"pageID": "3", "selfID": "1", "blocks": [{"kind": "Content"}]}
        ]
    }))
    .unwrap();

    assert_eq!(page.children.len(), 2);
    assert_eq!(page.children[0].children[0].page_id, ObjectId::new(4));
    assert_eq!(page.children[1].blocks.len(), 1);
    assert!(!page.children[0].is_root());

    let order: Vec<u64> = page.walk().map(|p| p.page_id.as_u64()).collect();
    assert_eq!(order, vec![1, 2, 4, 3]);
    assert_eq!(page.find(ObjectId::new(4)).unwrap().self_id, ObjectId::new(2));
    assert!(page.find(ObjectId::new(99)).is_none());
    assert!(page.find(ObjectId::NONE).is_none());
}

#[test]
fn children_without_ids_are_dropped() {
    let page = Page::from_value(&json!({
        "children": [{"pageID": "2"}, {"title": "orphan"}]
    }))
    .unwrap();
    assert!(page.children.is_empty());
}

// ── Validation ───────────────────────────────────────────────────

#[test]
fn validate_concatenates_in_order() {
    let registry = local_registry();
    let input = raw(json!({
        "blocks": [
            {"kind": "X", "title": "c1"},
            {"kind": "X", "title": "c2", "options": {"label": "ok"}},
            {"kind": "X", "title": "c3"}
        ]
    }));
    let page = Page::hydrate(&input, BlockGuard::default(), &registry).unwrap();
    assert_eq!(page.validate(), vec!["marker c1 unlabeled", "marker c3 unlabeled"]);
}

#[test]
fn validate_walks_builtin_blocks_and_children() {
    let page = Page::from_value(&json!({
        "blocks": [
            {"kind": "RecordList"},
            {"kind": "Content"},
            {"kind": "IFrame", "xywh": [0, 0, 0, 2]}
        ],
        "children": [{"pageID": "2", "blocks": [{"kind": "Chart"}]}]
    }))
    .unwrap();

    assert_eq!(
        page.validate(),
        vec![
            "RecordList block: module not selected",
            "IFrame block: invalid size",
            "IFrame block: source URL not set",
            "Chart block: chart not selected",
        ]
    );
}

// ── Raw round trip ───────────────────────────────────────────────

#[test]
fn page_rebuilds_from_its_raw_form() {
    let page = Page::from_value(&json!({
        "pageID": "1",
        "title": "Home",
        "labels": {"icon": "home"},
        "createdAt": "2024-05-06T07:08:09Z",
        "blocks": [{"kind": "IFrame", "blockID": "77", "options": {"src": "https://example.com", "wrap": true}}],
        "children": [{"pageID": "2", "selfID": "1", "weight": 2}]
    }))
    .unwrap();

    let copy = Page::from_raw(&page.to_raw()).unwrap();
    assert_eq!(copy, page);
    assert_eq!(copy.blocks[0].base().block_id, ObjectId::new(77));
}

// ── Forest assembly ──────────────────────────────────────────────

#[test]
fn assemble_builds_forest() {
    let flat: Vec<Page> = [
        json!({"pageID": "3", "selfID": "1", "weight": 2}),
        json!({"pageID": "1", "weight": 1}),
        json!({"pageID": "2", "selfID": "1", "weight": 1}),
        json!({"pageID": "5", "selfID": "404"}),
        json!({"pageID": "4", "selfID": "2"}),
    ]
    .iter()
    .map(|v| Page::from_value(v).unwrap())
    .collect();

    let forest = Page::assemble(flat);
    let roots: Vec<u64> = forest.iter().map(|p| p.page_id.as_u64()).collect();
    assert_eq!(roots, vec![5, 1]);

    let home = &forest[1];
    let order: Vec<u64> = home.walk().map(|p| p.page_id.as_u64()).collect();
    assert_eq!(order, vec![1, 2, 4, 3]);
}

#[test]
fn assemble_promotes_cycles() {
    let flat: Vec<Page> = [
        json!({"pageID": "1", "selfID": "2"}),
        json!({"pageID": "2", "selfID": "1"}),
        json!({"pageID": "3", "selfID": "4"}),
        json!({"pageID": "4", "selfID": "3"}),
        json!({"pageID": "5", "selfID": "6", "weight": -1}),
        json!({"pageID": "6", "selfID": "5"}),
    ]
    .iter()
    .map(|v| Page::from_value(v).unwrap())
    .collect();

    // Equal weights keep input order regardless of hashing.
    for _ in 0..8 {
        let forest = Page::assemble(flat.clone());
        let roots: Vec<u64> = forest.iter().map(|p| p.page_id.as_u64()).collect();
        assert_eq!(roots, vec![5, 1, 2, 3, 4, 6]);
    }
}
