//! End-to-end resolution scenarios over delivery-shaped JSON.

use cda_model::{link_placeholder, Batch, FieldValue, Locale, ResourceKind, SpaceContext};
use cda_resolver::{resolve_batch, ResolveContext};
use serde_json::{json, Value};
use std::sync::Arc;

fn context(nullify: bool) -> ResolveContext {
    ResolveContext::new(Arc::new(SpaceContext::new(
        "s1",
        vec![Locale::new("en-US").as_default()],
    )))
    .with_nullify_unresolved(nullify)
}

fn query_response(field: Value, included_assets: Value) -> Batch {
    Batch::from_json(
        json!({
            "sys": {"type": "Array"},
            "total": 1,
            "skip": 0,
            "limit": 100,
            "items": [{
                "sys": {"id": "e1", "type": "Entry", "locale": "en-US"},
                "fields": {"title": "Post", "linkedAsset": field}
            }],
            "includes": {"Asset": included_assets}
        }),
        "en-US",
    )
    .unwrap()
}

fn asset(id: &str) -> Value {
    json!({"sys": {"id": id, "type": "Asset"}, "fields": {"title": "Photo"}})
}

#[test]
fn included_asset_replaces_the_link() {
    let mut batch = query_response(
        link_placeholder(ResourceKind::Asset, "a1"),
        json!([asset("a1")]),
    );

    let stats = resolve_batch(&mut batch, &context(false)).unwrap();

    let Batch::Paginated(page) = &batch else {
        panic!("expected a paginated batch");
    };
    let entry = page.items[0].read();
    let link = entry.field("en-US", "linkedAsset").unwrap().as_link().unwrap();
    assert_eq!(link.kind(), ResourceKind::Asset);
    assert_eq!(link.id(), "a1");

    let included = &page.includes.as_ref().unwrap().assets[0];
    assert!(link.points_to(included));
    let target = link.upgrade().unwrap();
    assert_eq!(target.read().id(), "a1");
    assert_eq!(stats.resolved, 1);
}

#[test]
fn missing_asset_is_dropped_under_nullify() {
    let mut batch = query_response(link_placeholder(ResourceKind::Asset, "a1"), json!([]));

    resolve_batch(&mut batch, &context(true)).unwrap();

    let entry = batch.items()[0].read();
    assert!(entry.field("en-US", "linkedAsset").is_none());
    assert!(entry.field("en-US", "title").is_some());
}

#[test]
fn missing_asset_keeps_the_placeholder_without_nullify() {
    let placeholder = link_placeholder(ResourceKind::Asset, "a1");
    let mut batch = query_response(placeholder.clone(), json!([asset("other")]));

    let stats = resolve_batch(&mut batch, &context(false)).unwrap();

    let entry = batch.items()[0].read();
    assert_eq!(
        entry.field("en-US", "linkedAsset"),
        Some(&FieldValue::Json(placeholder))
    );
    assert_eq!(stats.unresolved, 1);
}

#[test]
fn unresolvable_middle_element_is_dropped() {
    let mut batch = query_response(
        json!([
            link_placeholder(ResourceKind::Asset, "a1"),
            link_placeholder(ResourceKind::Asset, "missing"),
            link_placeholder(ResourceKind::Asset, "a3"),
        ]),
        json!([asset("a1"), asset("a3")]),
    );

    resolve_batch(&mut batch, &context(true)).unwrap();

    let entry = batch.items()[0].read();
    let items = entry.field("en-US", "linkedAsset").unwrap().as_list().unwrap();
    let ids: Vec<&str> = items.iter().map(|item| item.as_link().unwrap().id()).collect();
    assert_eq!(ids, ["a1", "a3"]);
}

#[test]
fn root_item_wins_over_included_entry() {
    let mut batch = Batch::from_json(
        json!({
            "sys": {"type": "Array"},
            "items": [
                {"sys": {"id": "e1", "type": "Entry"}, "fields": {"next": link_placeholder(ResourceKind::Entry, "e2")}},
                {"sys": {"id": "e2", "type": "Entry"}, "fields": {"title": "root"}}
            ],
            "includes": {"Entry": [
                {"sys": {"id": "e2", "type": "Entry"}, "fields": {"title": "included"}}
            ]}
        }),
        "en-US",
    )
    .unwrap();

    resolve_batch(&mut batch, &context(false)).unwrap();

    let entry = batch.items()[0].read();
    let target = entry
        .field("en-US", "next")
        .unwrap()
        .as_link()
        .unwrap()
        .upgrade()
        .unwrap();
    assert!(Arc::ptr_eq(&target, &batch.items()[1]));
    assert_eq!(
        target.read().field("en-US", "title"),
        Some(&FieldValue::Json(json!("root")))
    );
}

#[test]
fn included_entries_are_resolved_too() {
    let mut batch = Batch::from_json(
        json!({
            "sys": {"type": "Array"},
            "items": [
                {"sys": {"id": "e1", "type": "Entry"}, "fields": {"author": link_placeholder(ResourceKind::Entry, "p1")}}
            ],
            "includes": {
                "Entry": [
                    {"sys": {"id": "p1", "type": "Entry"}, "fields": {"avatar": link_placeholder(ResourceKind::Asset, "a1")}}
                ],
                "Asset": [asset("a1")]
            }
        }),
        "en-US",
    )
    .unwrap();

    let stats = resolve_batch(&mut batch, &context(false)).unwrap();

    assert_eq!(stats.entries, 2);
    assert_eq!(stats.resolved, 2);

    let author = batch.items()[0]
        .read()
        .field("en-US", "author")
        .unwrap()
        .as_link()
        .unwrap()
        .upgrade()
        .unwrap();
    let avatar = author.read().field("en-US", "avatar").cloned().unwrap();
    assert_eq!(avatar.as_link().unwrap().id(), "a1");
}

#[test]
fn cyclic_entries_resolve_and_serialize() {
    let mut batch = Batch::from_json(
        json!({
            "sys": {"type": "Array"},
            "items": [
                {"sys": {"id": "e1", "type": "Entry"}, "fields": {"other": link_placeholder(ResourceKind::Entry, "e2")}},
                {"sys": {"id": "e2", "type": "Entry"}, "fields": {"other": link_placeholder(ResourceKind::Entry, "e1")}}
            ]
        }),
        "en-US",
    )
    .unwrap();

    let stats = resolve_batch(&mut batch, &context(false)).unwrap();
    assert_eq!(stats.resolved, 2);

    let value = serde_json::to_value(&batch).unwrap();
    assert_eq!(
        value["items"][0]["localized"]["en-US"]["other"],
        json!({"sys": {"type": "Entry", "id": "e2"}})
    );
    assert_eq!(
        value["items"][1]["localized"]["en-US"]["other"],
        json!({"sys": {"type": "Entry", "id": "e1"}})
    );
}

#[test]
fn assets_are_not_scanned_for_links() {
    let placeholder = link_placeholder(ResourceKind::Entry, "e1");
    let mut batch = Batch::from_json(
        json!({
            "sys": {"type": "Array"},
            "items": [
                {"sys": {"id": "e1", "type": "Entry"}, "fields": {}},
                {"sys": {"id": "a1", "type": "Asset"}, "fields": {"owner": placeholder.clone()}}
            ]
        }),
        "en-US",
    )
    .unwrap();

    resolve_batch(&mut batch, &context(true)).unwrap();

    let asset = batch.items()[1].read();
    assert_eq!(
        asset.field("en-US", "owner"),
        Some(&FieldValue::Json(placeholder))
    );
}

#[test]
fn sync_feed_resolves_across_locales() {
    let mut batch = Batch::from_json(
        json!({
            "sys": {"type": "Array"},
            "items": [
                {
                    "sys": {"id": "e1", "type": "Entry"},
                    "fields": {
                        "title": {"en-US": "Hello", "de-DE": "Hallo"},
                        "images": {
                            "en-US": [link_placeholder(ResourceKind::Asset, "a1")],
                            "de-DE": [link_placeholder(ResourceKind::Asset, "a1"), link_placeholder(ResourceKind::Asset, "gone")]
                        }
                    }
                },
                {"sys": {"id": "a1", "type": "Asset"}, "fields": {"title": {"en-US": "Photo"}}},
                {"sys": {"id": "x1", "type": "DeletedEntry"}}
            ],
            "nextSyncUrl": "https://cdn.example.com/spaces/s1/sync?sync_token=t"
        }),
        "en-US",
    )
    .unwrap();
    let ctx = ResolveContext::new(Arc::new(SpaceContext::new(
        "s1",
        vec![Locale::new("en-US").as_default(), Locale::new("de-DE")],
    )))
    .with_nullify_unresolved(true);

    let stats = resolve_batch(&mut batch, &ctx).unwrap();

    let entry = batch.items()[0].read();
    assert_eq!(entry.field("de-DE", "title"), Some(&FieldValue::Json(json!("Hallo"))));
    assert_eq!(entry.field("en-US", "images").unwrap().as_list().unwrap().len(), 1);
    assert_eq!(entry.field("de-DE", "images").unwrap().as_list().unwrap().len(), 1);
    assert_eq!((stats.resolved, stats.nullified), (2, 1));
}

#[test]
fn rerunning_a_sync_pass_gives_the_same_result() {
    let document = json!({
        "sys": {"type": "Array"},
        "items": [
            {
                "sys": {"id": "e1", "type": "Entry"},
                "fields": {"hero": {"en-US": link_placeholder(ResourceKind::Asset, "a1")}}
            },
            {"sys": {"id": "a1", "type": "Asset"}, "fields": {}}
        ],
        "nextSyncUrl": "https://cdn.example.com/spaces/s1/sync?sync_token=t"
    });
    let mut batch = Batch::from_json(document, "en-US").unwrap();
    let ctx = context(false);

    resolve_batch(&mut batch, &ctx).unwrap();
    let first = batch.items()[0].read().localized.clone();
    resolve_batch(&mut batch, &ctx).unwrap();
    let second = batch.items()[0].read().localized.clone();

    assert_eq!(first, second);
    // Raw fields are never touched by a pass.
    assert_eq!(
        batch.items()[0].read().raw_fields["hero"],
        json!({"en-US": link_placeholder(ResourceKind::Asset, "a1")})
    );
}
