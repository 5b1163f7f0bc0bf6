// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Talaria-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Talaria and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::action::{Action, Button, ButtonKind, OptionValue, Select, SelectOption};
use super::message::{Embed, Field, Message};
use super::session::EditorSession;

pub(crate) fn rich_embed() -> Embed {
    let mut embed = Embed::new();
    embed.title = "Server Rules".to_owned();
    embed.description = "Read before posting.".to_owned();
    embed.color = "7289da".to_owned();
    embed.url = "https://example.com/rules".to_owned();
    embed.author.name = "Moderation Team".to_owned();
    embed.author.icon_url = "https://example.com/mod.png".to_owned();
    embed.thumbnail.url = "https://example.com/thumb.png".to_owned();
    embed.image.url = "https://example.com/banner.png".to_owned();
    embed.footer.text = "Last updated yesterday".to_owned();
    embed.fields.push(Field {
        name: "Rule 1".to_owned(),
        value: "Be kind".to_owned(),
        inline: true,
    });
    embed.fields.push(Field {
        name: "Rule 2".to_owned(),
        value: "No spam".to_owned(),
        inline: false,
    });
    embed
}

pub(crate) fn linked_button() -> Action {
    let mut button = Button::new();
    button.label = "Website".to_owned();
    button.url = "https://example.com".to_owned();
    Action::Button(button)
}

pub(crate) fn send_embed_button(key: &str) -> Action {
    let mut button = Button::new();
    button.label = "Show".to_owned();
    button.kind = ButtonKind::SendEmbed;
    button.target = OptionValue::SendRef(key.to_owned());
    button.ephemeral = true;
    Action::Button(button)
}

pub(crate) fn select_with_send_ref(key: &str) -> Action {
    let mut select = Select::new();
    select.placeholder = "Pick a topic".to_owned();
    select.options.push(SelectOption {
        label: key.to_owned(),
        value: OptionValue::SendRef(key.to_owned()),
        description: format!("Send saved message: {key}"),
        icon: String::new(),
    });
    select.options.push(SelectOption {
        label: "Docs".to_owned(),
        value: OptionValue::Link("https://example.com/docs".to_owned()),
        description: String::new(),
        icon: String::new(),
    });
    Action::Select(select)
}

pub(crate) fn rich_session() -> EditorSession {
    let mut embed = rich_embed();
    embed.actions.push(linked_button());
    embed.actions.push(select_with_send_ref("welcome"));

    let mut second = Embed::new();
    second.title = "Second card".to_owned();

    let mut trailing = Message::new();
    trailing.embeds[0].description = "Trailing message".to_owned();

    EditorSession::with_messages(vec![Message::with_embeds(vec![embed, second]), trailing])
}
