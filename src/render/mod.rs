// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Talaria-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Talaria and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Text preview projection.
//!
//! [`render_preview`] is a pure function of the session: message list,
//! current embed as a card, and the position counter, in one string. Callers
//! re-render wholesale after every mutation; there is no incremental
//! contract, so form, list, and preview always reflect the same snapshot.

use crate::model::{Action, ButtonKind, Embed, EditorSession, OptionValue};

pub fn render_preview(session: &EditorSession) -> String {
    let mut out = String::new();

    let message_count = session.messages().len();
    let embed_count = session.current_message().embeds.len();
    out.push_str(&format!(
        "Message {} of {} · Embed {} of {}\n\n",
        session.current_message_index() + 1,
        message_count,
        session.current_embed_index() + 1,
        embed_count,
    ));

    for (index, message) in session.messages().iter().enumerate() {
        let marker = if index == session.current_message_index() { '>' } else { ' ' };
        let title = message
            .embeds
            .first()
            .map(|embed| embed_label(embed))
            .unwrap_or_else(|| "(untitled)".to_owned());
        let embeds = message.embeds.len();
        let noun = if embeds == 1 { "embed" } else { "embeds" };
        out.push_str(&format!("{marker} {}. {title} ({embeds} {noun})\n", index + 1));
    }
    out.push('\n');

    render_embed_card(&mut out, session.current_embed());
    out
}

fn embed_label(embed: &Embed) -> String {
    if embed.title.is_empty() {
        "(untitled)".to_owned()
    } else {
        embed.title.clone()
    }
}

fn render_embed_card(out: &mut String, embed: &Embed) {
    out.push_str(&format!("=== {} ===\n", embed_label(embed)));

    if !embed.description.is_empty() {
        out.push_str(&embed.description);
        out.push('\n');
    }
    if !embed.color.is_empty() {
        out.push_str(&format!("color: #{}\n", embed.color));
    }
    if !embed.url.is_empty() {
        out.push_str(&format!("url: {}\n", embed.url));
    }
    if !embed.author.name.is_empty() {
        out.push_str(&format!("author: {}\n", embed.author.name));
    }
    if !embed.thumbnail.url.is_empty() {
        out.push_str(&format!("thumbnail: {}\n", embed.thumbnail.url));
    }
    if !embed.image.url.is_empty() {
        out.push_str(&format!("image: {}\n", embed.image.url));
    }

    for field in &embed.fields {
        let inline = if field.inline { " [inline]" } else { "" };
        out.push_str(&format!("• {}{inline}: {}\n", field.name, field.value));
    }

    if !embed.footer.text.is_empty() {
        out.push_str(&format!("footer: {}\n", embed.footer.text));
    }

    for action in &embed.actions {
        match action {
            Action::Button(button) => {
                let label = if button.label.is_empty() { "(button)" } else { button.label.as_str() };
                match button.kind {
                    ButtonKind::Link => {
                        out.push_str(&format!("[{label}] -> {}\n", button.url));
                    }
                    ButtonKind::SendEmbed => {
                        let ephemeral = if button.ephemeral { ", ephemeral" } else { "" };
                        out.push_str(&format!(
                            "[{label}] -> {}{ephemeral}\n",
                            describe_target(&button.target)
                        ));
                    }
                }
            }
            Action::Select(select) => {
                let placeholder = if select.placeholder.is_empty() {
                    "(select)"
                } else {
                    select.placeholder.as_str()
                };
                out.push_str(&format!("select \"{placeholder}\":\n"));
                for option in &select.options {
                    let label =
                        if option.label.is_empty() { "(option)" } else { option.label.as_str() };
                    out.push_str(&format!("  - {label} -> {}\n", describe_target(&option.value)));
                }
            }
        }
    }
}

/// Human summary of a decoded option value / button target.
fn describe_target(value: &OptionValue) -> String {
    match value {
        OptionValue::SendRef(key) => format!("saved message \"{key}\""),
        OptionValue::SendJson(_) => match value.inline_document() {
            Some(Ok(document)) => {
                let title = document
                    .get("title")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or("untitled");
                format!("inline message ({title})")
            }
            _ => "inline message (undecodable)".to_owned(),
        },
        OptionValue::Link(url) => format!("link {url}"),
        OptionValue::Opaque(raw) if raw.is_empty() => "(unset)".to_owned(),
        OptionValue::Opaque(raw) => raw.clone(),
    }
}
