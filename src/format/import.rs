// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Talaria-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Talaria and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Import normalization.
//!
//! Accepts loosely-shaped external JSON and coerces it into the canonical
//! message list. Four top-level shapes are recognized, tried in order:
//!
//! 1. an array: each element is a message if it carries an `embeds` array,
//!    otherwise it is wrapped as a single-embed message;
//! 2. an object with an `embeds` array: one message;
//! 3. an object with a `messages` array: the message list itself;
//! 4. anything else: treated as one bare embed.
//!
//! No shape is ever rejected; unknown keys are ignored and missing ones get
//! their zero values. Only malformed JSON text is an error.

use std::fmt;

use serde_json::Value;

use crate::model::{Embed, Field, Message};

#[derive(Debug)]
pub enum ImportError {
    Json(serde_json::Error),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(source) => write!(f, "invalid json: {source}"),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(source) => Some(source),
        }
    }
}

/// Parse raw JSON text into the canonical message list.
pub fn parse_document(text: &str) -> Result<Vec<Message>, ImportError> {
    let value: Value = serde_json::from_str(text).map_err(ImportError::Json)?;
    Ok(normalize_document(&value))
}

/// Coerce already-parsed JSON into the canonical message list.
pub fn normalize_document(value: &Value) -> Vec<Message> {
    if let Value::Array(items) = value {
        return items.iter().map(normalize_message_entry).collect();
    }
    if let Some(embeds) = value.get("embeds").and_then(Value::as_array) {
        return vec![message_from_embeds(embeds)];
    }
    if let Some(messages) = value.get("messages").and_then(Value::as_array) {
        return messages.iter().map(normalize_message_entry).collect();
    }
    vec![Message::with_embeds(vec![normalize_embed(value)])]
}

fn normalize_message_entry(value: &Value) -> Message {
    match value.get("embeds").and_then(Value::as_array) {
        Some(embeds) => message_from_embeds(embeds),
        None => Message::with_embeds(vec![normalize_embed(value)]),
    }
}

fn message_from_embeds(embeds: &[Value]) -> Message {
    Message::with_embeds(embeds.iter().map(normalize_embed).collect())
}

/// Field-map one embed object, defaulting every absent piece to its zero
/// shape. Actions are not part of the import surface and come back empty.
pub fn normalize_embed(value: &Value) -> Embed {
    let mut embed = Embed::new();
    embed.title = string_at(value, "title");
    embed.description = string_at(value, "description");
    embed.color = normalize_color(value.get("color"));
    embed.url = string_at(value, "url");

    if let Some(author) = value.get("author") {
        embed.author.name = string_at(author, "name");
        embed.author.url = string_at(author, "url");
        embed.author.icon_url = string_at(author, "icon_url");
    }
    if let Some(thumbnail) = value.get("thumbnail") {
        embed.thumbnail.url = string_at(thumbnail, "url");
    }
    if let Some(image) = value.get("image") {
        embed.image.url = string_at(image, "url");
    }
    if let Some(fields) = value.get("fields").and_then(Value::as_array) {
        embed.fields = fields.iter().filter_map(normalize_field).collect();
    }
    if let Some(footer) = value.get("footer") {
        embed.footer.text = string_at(footer, "text");
        embed.footer.icon_url = string_at(footer, "icon_url");
    }

    embed
}

/// Accept a field as `[name, value, inline?]` or `{name, value, inline}`.
fn normalize_field(value: &Value) -> Option<Field> {
    match value {
        Value::Array(parts) => {
            if parts.len() < 2 {
                return None;
            }
            Some(Field {
                name: scalar_string(&parts[0]),
                value: scalar_string(&parts[1]),
                inline: parts.get(2).map(coerce_bool).unwrap_or(false),
            })
        }
        Value::Object(_) => Some(Field {
            name: string_at(value, "name"),
            value: string_at(value, "value"),
            inline: value.get("inline").map(coerce_bool).unwrap_or(false),
        }),
        _ => None,
    }
}

/// Numeric colors become 6-digit lowercase hex (24-bit); strings lose any
/// leading `#`; everything else is the unset zero value.
fn normalize_color(value: Option<&Value>) -> String {
    match value {
        Some(Value::Number(number)) => match number.as_u64() {
            Some(n) => format!("{:06x}", n & 0x00ff_ffff),
            None => String::new(),
        },
        Some(Value::String(raw)) => raw.trim().trim_start_matches('#').to_owned(),
        _ => String::new(),
    }
}

fn string_at(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_default()
}

fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(raw) => raw.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => String::new(),
    }
}

/// Truthiness for the `inline` flag across the shapes observed in stored
/// documents: booleans, `"true"` strings, and 0/1 numbers.
fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::String(raw) => raw.eq_ignore_ascii_case("true"),
        Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(false),
        _ => false,
    }
}
