// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Talaria-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Talaria and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Export projection.
//!
//! Walks the canonical model and produces the wire shapes. The wire form
//! differs from the internal one in three ways: empty optionals are elided
//! instead of present-as-empty, `color` goes out as an integer, and actions
//! are split into per-embed `buttons`/`selects` arrays. Three entry points
//! with different completeness:
//!
//! - [`build_complete_payload`]: messages + resolved references + metadata;
//! - [`build_simple_payload`]: flat `{embeds}` only, no actions (legacy);
//! - [`build_webhook_payload`]: flat embeds with actions + metadata, plus
//!   the optional webhook identity fields.
//!
//! Builders are permissive by design; export-validity gating happens at the
//! I/O boundary (see `validate`).

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::model::{Action, Button, ButtonKind, Embed, Message, Select};
use crate::store::MessageStore;

pub const FORMAT_VERSION: &str = "2.0";

/// Zero-width space; keeps a half-filled field renderable on the wire.
const BLANK_SUBSTITUTE: &str = "\u{200b}";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletePayload {
    pub messages: Vec<MessageOut>,
    pub referenced_messages: BTreeMap<String, ReferencedMessage>,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageOut {
    pub embeds: Vec<EmbedOut>,
}

/// Legacy export: embeds only, no actions, no metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimplePayload {
    pub embeds: Vec<EmbedOut>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookPayload {
    pub embeds: Vec<EmbedOut>,
    pub metadata: Metadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedOut {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorOut>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<MediaOut>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<MediaOut>,
    pub fields: Vec<FieldOut>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<FooterOut>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buttons: Option<Vec<ButtonOut>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selects: Option<Vec<SelectOut>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorOut {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaOut {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldOut {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FooterOut {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ButtonOut {
    Link { label: String, url: String },
    SendEmbed { label: String, target: String, ephemeral: bool },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOut {
    pub placeholder: String,
    pub name: String,
    pub options: Vec<OptionOut>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionOut {
    pub label: String,
    pub value: String,
    pub description: String,
    pub icon: String,
}

/// Saved-message content inlined next to the payload, keyed by store key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferencedMessage {
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metadata {
    pub total_messages: usize,
    pub total_embeds: usize,
    pub has_actions: bool,
    pub has_buttons: bool,
    pub has_selects: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
    pub version: String,
}

pub fn build_complete_payload(messages: &[Message], store: &MessageStore) -> CompletePayload {
    build_complete_payload_at(messages, store, OffsetDateTime::now_utc())
}

pub fn build_complete_payload_at(
    messages: &[Message],
    store: &MessageStore,
    generated_at: OffsetDateTime,
) -> CompletePayload {
    CompletePayload {
        messages: messages
            .iter()
            .map(|message| MessageOut {
                embeds: message.embeds.iter().map(|embed| embed_out(embed, true)).collect(),
            })
            .collect(),
        referenced_messages: collect_referenced(messages, store),
        metadata: build_metadata(messages, generated_at),
    }
}

pub fn build_simple_payload(messages: &[Message]) -> SimplePayload {
    SimplePayload {
        embeds: messages
            .iter()
            .flat_map(|message| message.embeds.iter())
            .map(|embed| embed_out(embed, false))
            .collect(),
    }
}

pub fn build_webhook_payload(
    messages: &[Message],
    username: Option<&str>,
    avatar_url: Option<&str>,
) -> WebhookPayload {
    build_webhook_payload_at(messages, username, avatar_url, OffsetDateTime::now_utc())
}

pub fn build_webhook_payload_at(
    messages: &[Message],
    username: Option<&str>,
    avatar_url: Option<&str>,
    generated_at: OffsetDateTime,
) -> WebhookPayload {
    WebhookPayload {
        embeds: messages
            .iter()
            .flat_map(|message| message.embeds.iter())
            .map(|embed| embed_out(embed, true))
            .collect(),
        metadata: build_metadata(messages, generated_at),
        username: username.filter(|name| !name.is_empty()).map(str::to_owned),
        avatar_url: avatar_url.filter(|url| !url.is_empty()).map(str::to_owned),
    }
}

fn build_metadata(messages: &[Message], generated_at: OffsetDateTime) -> Metadata {
    let embeds = || messages.iter().flat_map(|message| message.embeds.iter());
    Metadata {
        total_messages: messages.len(),
        total_embeds: embeds().count(),
        has_actions: embeds().any(|embed| !embed.actions.is_empty()),
        has_buttons: embeds().any(|embed| embed.actions.iter().any(Action::is_button)),
        has_selects: embeds().any(|embed| embed.actions.iter().any(Action::is_select)),
        generated_at,
        version: FORMAT_VERSION.to_owned(),
    }
}

fn embed_out(embed: &Embed, with_actions: bool) -> EmbedOut {
    let (buttons, selects) = if with_actions {
        let buttons = embed
            .actions
            .iter()
            .filter_map(|action| match action {
                Action::Button(button) => Some(button_out(button)),
                Action::Select(_) => None,
            })
            .collect();
        let selects = embed
            .actions
            .iter()
            .filter_map(|action| match action {
                Action::Select(select) => Some(select_out(select)),
                Action::Button(_) => None,
            })
            .collect();
        (Some(buttons), Some(selects))
    } else {
        (None, None)
    };

    EmbedOut {
        title: non_empty(&embed.title),
        description: non_empty(&embed.description),
        color: color_to_int(&embed.color),
        url: non_empty(&embed.url),
        author: (!embed.author.name.is_empty()).then(|| AuthorOut {
            name: embed.author.name.clone(),
            url: non_empty(&embed.author.url),
            icon_url: non_empty(&embed.author.icon_url),
        }),
        thumbnail: non_empty(&embed.thumbnail.url).map(|url| MediaOut { url }),
        image: non_empty(&embed.image.url).map(|url| MediaOut { url }),
        fields: field_outs(embed),
        footer: (!embed.footer.text.is_empty()).then(|| FooterOut {
            text: embed.footer.text.clone(),
            icon_url: non_empty(&embed.footer.icon_url),
        }),
        buttons,
        selects,
    }
}

/// Fields with neither name nor value are dropped; a field keeping only one
/// side gets a zero-width space on the empty side.
fn field_outs(embed: &Embed) -> Vec<FieldOut> {
    embed
        .fields
        .iter()
        .filter(|field| !field.name.is_empty() || !field.value.is_empty())
        .map(|field| FieldOut {
            name: if field.name.is_empty() { BLANK_SUBSTITUTE.to_owned() } else { field.name.clone() },
            value: if field.value.is_empty() {
                BLANK_SUBSTITUTE.to_owned()
            } else {
                field.value.clone()
            },
            inline: field.inline,
        })
        .collect()
}

fn button_out(button: &Button) -> ButtonOut {
    match button.kind {
        ButtonKind::Link => ButtonOut::Link {
            label: button.label.clone(),
            url: button.url.clone(),
        },
        ButtonKind::SendEmbed => ButtonOut::SendEmbed {
            label: button.label.clone(),
            target: button.target.encode(),
            ephemeral: button.ephemeral,
        },
    }
}

fn select_out(select: &Select) -> SelectOut {
    SelectOut {
        placeholder: select.placeholder.clone(),
        name: slugify(&select.placeholder),
        options: select
            .options
            .iter()
            .map(|option| OptionOut {
                label: option.label.clone(),
                value: option.value.encode(),
                description: option.description.clone(),
                icon: option.icon.clone(),
            })
            .collect(),
    }
}

/// Resolve every `send:<key>` reference in select options and send-embed
/// button targets against the store. Misses are skipped, not errors.
fn collect_referenced(
    messages: &[Message],
    store: &MessageStore,
) -> BTreeMap<String, ReferencedMessage> {
    let mut referenced = BTreeMap::new();

    for message in messages {
        for embed in &message.embeds {
            for action in &embed.actions {
                match action {
                    Action::Select(select) => {
                        for option in &select.options {
                            if let Some(key) = option.value.send_ref() {
                                resolve_reference(store, key, &mut referenced);
                            }
                        }
                    }
                    Action::Button(button) => {
                        if button.kind == ButtonKind::SendEmbed {
                            if let Some(key) = button.target.send_ref() {
                                resolve_reference(store, key, &mut referenced);
                            }
                        }
                    }
                }
            }
        }
    }

    referenced
}

fn resolve_reference(
    store: &MessageStore,
    key: &str,
    referenced: &mut BTreeMap<String, ReferencedMessage>,
) {
    if referenced.contains_key(key) {
        return;
    }
    match store.get(key) {
        Ok(Some(entry)) => {
            referenced.insert(key.to_owned(), ReferencedMessage { embeds: entry.embeds });
        }
        Ok(None) => {
            debug!(key, "referenced message not found, skipping");
        }
        Err(err) => {
            warn!(key, error = %err, "failed to load referenced message, skipping");
        }
    }
}

/// Select wire names are the placeholder lowered with whitespace runs
/// collapsed to single underscores. No trimming.
pub(crate) fn slugify(raw: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let whitespace =
        WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("hard-coded regex is valid"));
    whitespace.replace_all(&raw.to_lowercase(), "_").into_owned()
}

/// Hex color to wire integer; empty or unparseable strings elide the key.
fn color_to_int(hex: &str) -> Option<u32> {
    if hex.is_empty() {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

fn non_empty(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_owned())
    }
}

#[cfg(test)]
mod tests;
