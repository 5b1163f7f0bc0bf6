// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Talaria-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Talaria and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! End-to-end composition flow over the public API: build a session through
//! ops, wire it to a saved message, and check the exported document.

use std::path::PathBuf;

use serde_json::json;
use time::macros::datetime;

use talaria::format::{build_complete_payload_at, normalize_document, parse_document};
use talaria::model::{Action, EditorSession, Embed, OptionValue};
use talaria::ops::{apply_op, EditOp, EmbedPatch, FieldPatch, OpOutcome, OptionPatch};
use talaria::store::MessageStore;
use talaria::validate::check_message;

struct TempStore {
    root: PathBuf,
    store: MessageStore,
}

impl TempStore {
    fn new(tag: &str) -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let root = std::env::temp_dir().join(format!(
            "talaria-compose-{tag}-{}-{nanos}",
            std::process::id()
        ));
        let store = MessageStore::new(&root);
        Self { root, store }
    }
}

impl Drop for TempStore {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

#[test]
fn compose_edit_export_round_trip() {
    let tmp = TempStore::new("edit");

    // Start from the seed session and edit through ops only.
    let mut session = EditorSession::new();
    let outcome = apply_op(
        &mut session,
        &EditOp::UpdateEmbed {
            message: 0,
            embed: 0,
            patch: EmbedPatch { title: Some("Hello".to_owned()), ..EmbedPatch::default() },
        },
    );
    assert_eq!(outcome, OpOutcome::Applied);

    apply_op(&mut session, &EditOp::AddField { message: 0, embed: 0 });
    apply_op(
        &mut session,
        &EditOp::UpdateField {
            message: 0,
            embed: 0,
            field: 0,
            patch: FieldPatch {
                name: Some("A".to_owned()),
                value: Some("B".to_owned()),
                inline: Some(true),
            },
        },
    );

    for message in session.messages() {
        check_message(message).expect("session is export-valid");
    }

    let payload = build_complete_payload_at(
        session.messages(),
        &tmp.store,
        datetime!(2026-03-04 05:06:07 UTC),
    );
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
    assert_eq!(value["metadata"]["total_embeds"], json!(1));

    // The exported document reimports to the same model.
    let reimported = normalize_document(&value);
    assert_eq!(reimported, session.messages());
}

#[test]
fn saved_references_inline_into_the_export() {
    let tmp = TempStore::new("refs");

    let mut saved = Embed::new();
    saved.title = "Saved".to_owned();
    tmp.store.save("abc", &[saved]).unwrap();

    let mut session = EditorSession::new();
    apply_op(
        &mut session,
        &EditOp::UpdateEmbed {
            message: 0,
            embed: 0,
            patch: EmbedPatch { title: Some("Menu".to_owned()), ..EmbedPatch::default() },
        },
    );
    apply_op(&mut session, &EditOp::AddSelect { message: 0, embed: 0 });
    apply_op(&mut session, &EditOp::AddOption { message: 0, embed: 0, action: 0 });
    apply_op(
        &mut session,
        &EditOp::UpdateOption {
            message: 0,
            embed: 0,
            action: 0,
            option: 0,
            patch: OptionPatch {
                label: Some("abc".to_owned()),
                value: Some(OptionValue::parse("send:abc")),
                ..OptionPatch::default()
            },
        },
    );

    let Action::Select(select) = &session.messages()[0].embeds[0].actions[0] else {
        panic!("expected select");
    };
    assert_eq!(select.options[0].value, OptionValue::SendRef("abc".to_owned()));

    let payload = build_complete_payload_at(
        session.messages(),
        &tmp.store,
        datetime!(2026-03-04 05:06:07 UTC),
    );
    assert_eq!(payload.referenced_messages["abc"].embeds[0].title, "Saved");
}

#[test]
fn import_accepts_every_documented_shape() {
    for text in [
        r#"{"title": "x"}"#,
        r#"[{"title": "x"}]"#,
        r#"{"embeds": [{"title": "x"}]}"#,
        r#"{"messages": [{"embeds": [{"title": "x"}]}]}"#,
    ] {
        let messages = parse_document(text).expect("accepted shape");
        assert_eq!(messages.len(), 1, "shape: {text}");
        assert_eq!(messages[0].embeds.len(), 1, "shape: {text}");
        assert_eq!(messages[0].embeds[0].title, "x", "shape: {text}");
    }
}
