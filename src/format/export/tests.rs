// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Talaria-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Talaria and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::{fixture, rstest};
use serde_json::json;
use time::macros::datetime;
use time::OffsetDateTime;

use crate::format::import::normalize_document;
use crate::model::fixtures::{linked_button, rich_embed, select_with_send_ref, send_embed_button};
use crate::model::{Embed, Field, Message};
use crate::store::test_utils::TempDir;
use crate::store::MessageStore;

use super::{
    build_complete_payload_at, build_simple_payload, build_webhook_payload_at, slugify,
};

const GENERATED_AT: OffsetDateTime = datetime!(2026-03-04 05:06:07 UTC);

struct ExportCtx {
    _tmp: TempDir,
    store: MessageStore,
}

impl ExportCtx {
    fn new() -> Self {
        let tmp = TempDir::new("export");
        let store = MessageStore::new(tmp.path().join("saved"));
        Self { _tmp: tmp, store }
    }
}

#[fixture]
fn ctx() -> ExportCtx {
    ExportCtx::new()
}

/// Start empty, set a title, add one filled field, export: exactly the
/// documented wire object, nothing else present.
#[rstest]
fn minimal_embed_exports_exactly_the_documented_shape(ctx: ExportCtx) {
    let mut embed = Embed::new();
    embed.title = "Hello".to_owned();
    embed.fields.push(Field { name: "A".to_owned(), value: "B".to_owned(), inline: true });
    let messages = vec![Message::with_embeds(vec![embed])];

    let payload = build_complete_payload_at(&messages, &ctx.store, GENERATED_AT);
    let value = serde_json::to_value(&payload).unwrap();

    assert_eq!(
        value["messages"][0]["embeds"][0],
        json!({
            "title": "Hello",
            "fields": [{"name": "A", "value": "B", "inline": true}],
            "buttons": [],
            "selects": []
        })
    );
    assert_eq!(value["metadata"]["total_messages"], json!(1));
    assert_eq!(value["metadata"]["total_embeds"], json!(1));
    assert_eq!(value["metadata"]["has_actions"], json!(false));
    assert_eq!(value["metadata"]["generated_at"], json!("2026-03-04T05:06:07Z"));
    assert_eq!(value["metadata"]["version"], json!("2.0"));
    assert_eq!(value["referenced_messages"], json!({}));
}

#[rstest]
fn field_filter_drops_fully_empty_and_substitutes_half_empty(ctx: ExportCtx) {
    let mut embed = Embed::new();
    embed.title = "t".to_owned();
    embed.fields.push(Field { name: String::new(), value: String::new(), inline: false });
    embed.fields.push(Field { name: "x".to_owned(), value: String::new(), inline: false });
    embed.fields.push(Field { name: String::new(), value: "y".to_owned(), inline: true });
    let messages = vec![Message::with_embeds(vec![embed])];

    let payload = build_complete_payload_at(&messages, &ctx.store, GENERATED_AT);
    let fields = &payload.messages[0].embeds[0].fields;
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].name, "x");
    assert_eq!(fields[0].value, "\u{200b}");
    assert_eq!(fields[1].name, "\u{200b}");
    assert_eq!(fields[1].value, "y");
}

#[rstest]
fn color_round_trips_through_integer(ctx: ExportCtx) {
    let mut embed = Embed::new();
    embed.title = "t".to_owned();
    embed.color = "7289da".to_owned();
    let messages = vec![Message::with_embeds(vec![embed])];

    let payload = build_complete_payload_at(&messages, &ctx.store, GENERATED_AT);
    assert_eq!(payload.messages[0].embeds[0].color, Some(0x7289da));

    let value = serde_json::to_value(&payload).unwrap();
    let reimported = normalize_document(&value);
    assert_eq!(reimported[0].embeds[0].color, "7289da");
}

#[rstest]
fn unparseable_color_elides_the_key(ctx: ExportCtx) {
    let mut embed = Embed::new();
    embed.title = "t".to_owned();
    embed.color = "not-hex".to_owned();
    let messages = vec![Message::with_embeds(vec![embed])];

    let payload = build_complete_payload_at(&messages, &ctx.store, GENERATED_AT);
    let value = serde_json::to_value(&payload).unwrap();
    assert!(value["messages"][0]["embeds"][0].get("color").is_none());
}

/// Export then normalize reconstructs an equivalent model for reference-free
/// content (actions are not part of the import surface).
#[rstest]
fn export_normalize_round_trip(ctx: ExportCtx) {
    let embed = rich_embed();
    let messages = vec![Message::with_embeds(vec![embed.clone()])];

    let payload = build_complete_payload_at(&messages, &ctx.store, GENERATED_AT);
    let value = serde_json::to_value(&payload).unwrap();
    let reimported = normalize_document(&value);

    assert_eq!(reimported, messages);
}

#[rstest]
fn builder_is_idempotent_for_a_fixed_instant(ctx: ExportCtx) {
    let messages = vec![Message::with_embeds(vec![rich_embed()])];
    let first = build_complete_payload_at(&messages, &ctx.store, GENERATED_AT);
    let second = build_complete_payload_at(&messages, &ctx.store, GENERATED_AT);
    assert_eq!(first, second);
}

#[rstest]
fn buttons_split_by_kind(ctx: ExportCtx) {
    let mut embed = rich_embed();
    embed.actions.push(linked_button());
    embed.actions.push(send_embed_button("rules"));
    let messages = vec![Message::with_embeds(vec![embed])];

    let payload = build_complete_payload_at(&messages, &ctx.store, GENERATED_AT);
    let value = serde_json::to_value(&payload).unwrap();
    let buttons = &value["messages"][0]["embeds"][0]["buttons"];

    assert_eq!(
        buttons[0],
        json!({"type": "link", "label": "Website", "url": "https://example.com"})
    );
    assert_eq!(
        buttons[1],
        json!({"type": "send_embed", "label": "Show", "target": "send:rules", "ephemeral": true})
    );
}

#[rstest]
fn select_names_are_slugified_placeholders(ctx: ExportCtx) {
    let mut embed = rich_embed();
    embed.actions.push(select_with_send_ref("welcome"));
    let messages = vec![Message::with_embeds(vec![embed])];

    let payload = build_complete_payload_at(&messages, &ctx.store, GENERATED_AT);
    let select = &payload.messages[0].embeds[0].selects.as_ref().unwrap()[0];
    assert_eq!(select.placeholder, "Pick a topic");
    assert_eq!(select.name, "pick_a_topic");
    assert_eq!(select.options[0].value, "send:welcome");
    assert_eq!(select.options[1].value, "link:https://example.com/docs");
}

#[test]
fn slugify_collapses_whitespace_runs_without_trimming() {
    assert_eq!(slugify("Pick a topic"), "pick_a_topic");
    assert_eq!(slugify("  Mixed\tCase  Runs "), "_mixed_case_runs_");
    assert_eq!(slugify(""), "");
}

#[rstest]
fn select_references_resolve_against_the_store(ctx: ExportCtx) {
    let mut saved = Embed::new();
    saved.title = "Saved".to_owned();
    ctx.store.save("abc", &[saved]).unwrap();

    let mut embed = rich_embed();
    embed.actions.push(select_with_send_ref("abc"));
    let messages = vec![Message::with_embeds(vec![embed])];

    let payload = build_complete_payload_at(&messages, &ctx.store, GENERATED_AT);
    let value = serde_json::to_value(&payload).unwrap();
    assert_eq!(value["referenced_messages"]["abc"]["embeds"][0]["title"], json!("Saved"));
}

#[rstest]
fn send_embed_button_targets_resolve_too(ctx: ExportCtx) {
    let mut saved = Embed::new();
    saved.title = "From button".to_owned();
    ctx.store.save("rules", &[saved]).unwrap();

    let mut embed = rich_embed();
    embed.actions.push(send_embed_button("rules"));
    let messages = vec![Message::with_embeds(vec![embed])];

    let payload = build_complete_payload_at(&messages, &ctx.store, GENERATED_AT);
    assert_eq!(payload.referenced_messages["rules"].embeds[0].title, "From button");
}

#[rstest]
fn reference_misses_are_silently_skipped(ctx: ExportCtx) {
    let mut embed = rich_embed();
    embed.actions.push(select_with_send_ref("never-saved"));
    let messages = vec![Message::with_embeds(vec![embed])];

    let payload = build_complete_payload_at(&messages, &ctx.store, GENERATED_AT);
    assert!(payload.referenced_messages.is_empty());
}

#[rstest]
fn malformed_store_entries_do_not_fail_the_export(ctx: ExportCtx) {
    std::fs::create_dir_all(ctx.store.root()).unwrap();
    std::fs::write(ctx.store.root().join("message_bad.json"), "{broken").unwrap();

    let mut embed = rich_embed();
    embed.actions.push(select_with_send_ref("bad"));
    let messages = vec![Message::with_embeds(vec![embed])];

    let payload = build_complete_payload_at(&messages, &ctx.store, GENERATED_AT);
    assert!(payload.referenced_messages.is_empty());
}

#[test]
fn simple_payload_flattens_messages_and_carries_no_actions() {
    let mut embed = rich_embed();
    embed.actions.push(select_with_send_ref("abc"));
    let messages = vec![
        Message::with_embeds(vec![embed]),
        Message::with_embeds(vec![{
            let mut e = Embed::new();
            e.title = "second".to_owned();
            e
        }]),
    ];

    let payload = build_simple_payload(&messages);
    assert_eq!(payload.embeds.len(), 2);

    let value = serde_json::to_value(&payload).unwrap();
    assert_eq!(value.as_object().unwrap().keys().collect::<Vec<_>>(), vec!["embeds"]);
    let embed = value["embeds"][0].as_object().unwrap();
    assert!(!embed.contains_key("buttons"));
    assert!(!embed.contains_key("selects"));
}

#[test]
fn webhook_payload_carries_identity_only_when_set() {
    let messages = vec![Message::with_embeds(vec![rich_embed()])];

    let payload = build_webhook_payload_at(&messages, Some("Herald"), None, GENERATED_AT);
    let value = serde_json::to_value(&payload).unwrap();
    assert_eq!(value["username"], json!("Herald"));
    assert!(value.get("avatar_url").is_none());
    assert_eq!(value["metadata"]["total_embeds"], json!(1));
    assert!(value["embeds"][0].get("buttons").is_some());

    let payload = build_webhook_payload_at(&messages, None, None, GENERATED_AT);
    let value = serde_json::to_value(&payload).unwrap();
    assert!(value.get("username").is_none());
}
