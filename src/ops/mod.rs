// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Talaria-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Talaria and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutation operations for the editing session.
//!
//! Every operation addresses its target by index path
//! `(message, embed[, field/action[, option]])`. An out-of-range path, an
//! empty target collection, or an action-kind mismatch makes the operation a
//! reported no-op ([`OpOutcome::Skipped`]) rather than an error; the bounds
//! checks live in the session accessors and callers decide to ignore the
//! skip. Operations that restructure the message list also keep the cursor
//! inside the invariants documented on [`EditorSession`].

use crate::model::{
    Action, Button, ButtonKind, EditorSession, Embed, Field, Message, OptionValue, Select,
    SelectOption,
};

#[derive(Debug, Clone, PartialEq)]
pub enum EditOp {
    AddMessage,
    DeleteMessage { message: usize },
    AddEmbed { message: usize },
    DeleteEmbed { message: usize, embed: usize },
    DuplicateEmbed { message: usize, embed: usize },
    UpdateEmbed { message: usize, embed: usize, patch: EmbedPatch },
    AddField { message: usize, embed: usize },
    UpdateField { message: usize, embed: usize, field: usize, patch: FieldPatch },
    DeleteField { message: usize, embed: usize, field: usize },
    AddButton { message: usize, embed: usize },
    AddSelect { message: usize, embed: usize },
    UpdateButton { message: usize, embed: usize, action: usize, patch: ButtonPatch },
    UpdateSelect { message: usize, embed: usize, action: usize, patch: SelectPatch },
    DeleteAction { message: usize, embed: usize, action: usize },
    AddOption { message: usize, embed: usize, action: usize },
    UpdateOption { message: usize, embed: usize, action: usize, option: usize, patch: OptionPatch },
    DeleteOption { message: usize, embed: usize, action: usize, option: usize },
    MoveOptionUp { message: usize, embed: usize, action: usize, option: usize },
    MoveOptionDown { message: usize, embed: usize, action: usize, option: usize },
}

/// Whether an operation mutated the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpOutcome {
    Applied,
    Skipped,
}

impl OpOutcome {
    pub fn applied(self) -> bool {
        self == Self::Applied
    }
}

/// Form-level patch over an embed; `None` leaves the target field untouched.
///
/// A patched color has any leading `#` stripped, matching the form input
/// coercion; no other normalization happens on write.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbedPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub url: Option<String>,
    pub author_name: Option<String>,
    pub author_url: Option<String>,
    pub author_icon_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub image_url: Option<String>,
    pub footer_text: Option<String>,
    pub footer_icon_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldPatch {
    pub name: Option<String>,
    pub value: Option<String>,
    pub inline: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ButtonPatch {
    pub label: Option<String>,
    pub kind: Option<ButtonKind>,
    pub url: Option<String>,
    pub target: Option<OptionValue>,
    pub ephemeral: Option<bool>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectPatch {
    pub placeholder: Option<String>,
    pub name: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionPatch {
    pub label: Option<String>,
    pub value: Option<OptionValue>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

pub fn apply_op(session: &mut EditorSession, op: &EditOp) -> OpOutcome {
    match op {
        EditOp::AddMessage => {
            session.messages_mut().push(Message::new());
            let last = session.messages().len() - 1;
            session.set_cursor(last, 0);
            OpOutcome::Applied
        }
        EditOp::DeleteMessage { message } => delete_message(session, *message),
        EditOp::AddEmbed { message } => add_embed(session, *message),
        EditOp::DeleteEmbed { message, embed } => delete_embed(session, *message, *embed),
        EditOp::DuplicateEmbed { message, embed } => duplicate_embed(session, *message, *embed),
        EditOp::UpdateEmbed { message, embed, patch } => {
            let Some(target) = session.embed_at_mut(*message, *embed) else {
                return OpOutcome::Skipped;
            };
            apply_embed_patch(target, patch);
            OpOutcome::Applied
        }
        EditOp::AddField { message, embed } => {
            let Some(target) = session.embed_at_mut(*message, *embed) else {
                return OpOutcome::Skipped;
            };
            target.fields.push(Field::new());
            OpOutcome::Applied
        }
        EditOp::UpdateField { message, embed, field, patch } => {
            let Some(target) = field_at_mut(session, *message, *embed, *field) else {
                return OpOutcome::Skipped;
            };
            if let Some(name) = &patch.name {
                target.name = name.clone();
            }
            if let Some(value) = &patch.value {
                target.value = value.clone();
            }
            if let Some(inline) = patch.inline {
                target.inline = inline;
            }
            OpOutcome::Applied
        }
        EditOp::DeleteField { message, embed, field } => {
            let Some(target) = session.embed_at_mut(*message, *embed) else {
                return OpOutcome::Skipped;
            };
            if *field >= target.fields.len() {
                return OpOutcome::Skipped;
            }
            target.fields.remove(*field);
            OpOutcome::Applied
        }
        EditOp::AddButton { message, embed } => {
            add_action(session, *message, *embed, Action::Button(Button::new()))
        }
        EditOp::AddSelect { message, embed } => {
            add_action(session, *message, *embed, Action::Select(Select::new()))
        }
        EditOp::UpdateButton { message, embed, action, patch } => {
            let Some(Action::Button(button)) = action_at_mut(session, *message, *embed, *action)
            else {
                return OpOutcome::Skipped;
            };
            apply_button_patch(button, patch);
            OpOutcome::Applied
        }
        EditOp::UpdateSelect { message, embed, action, patch } => {
            let Some(Action::Select(select)) = action_at_mut(session, *message, *embed, *action)
            else {
                return OpOutcome::Skipped;
            };
            if let Some(placeholder) = &patch.placeholder {
                select.placeholder = placeholder.clone();
            }
            if let Some(name) = &patch.name {
                select.name = name.clone();
            }
            if let Some(icon) = &patch.icon {
                select.icon = icon.clone();
            }
            OpOutcome::Applied
        }
        EditOp::DeleteAction { message, embed, action } => {
            let Some(target) = session.embed_at_mut(*message, *embed) else {
                return OpOutcome::Skipped;
            };
            if *action >= target.actions.len() {
                return OpOutcome::Skipped;
            }
            target.actions.remove(*action);
            OpOutcome::Applied
        }
        EditOp::AddOption { message, embed, action } => {
            let Some(select) = select_at_mut(session, *message, *embed, *action) else {
                return OpOutcome::Skipped;
            };
            select.options.push(SelectOption::new());
            OpOutcome::Applied
        }
        EditOp::UpdateOption { message, embed, action, option, patch } => {
            let Some(select) = select_at_mut(session, *message, *embed, *action) else {
                return OpOutcome::Skipped;
            };
            let Some(target) = select.options.get_mut(*option) else {
                return OpOutcome::Skipped;
            };
            if let Some(label) = &patch.label {
                target.label = label.clone();
            }
            if let Some(value) = &patch.value {
                target.value = value.clone();
            }
            if let Some(description) = &patch.description {
                target.description = description.clone();
            }
            if let Some(icon) = &patch.icon {
                target.icon = icon.clone();
            }
            OpOutcome::Applied
        }
        EditOp::DeleteOption { message, embed, action, option } => {
            let Some(select) = select_at_mut(session, *message, *embed, *action) else {
                return OpOutcome::Skipped;
            };
            if *option >= select.options.len() {
                return OpOutcome::Skipped;
            }
            select.options.remove(*option);
            OpOutcome::Applied
        }
        EditOp::MoveOptionUp { message, embed, action, option } => {
            let Some(select) = select_at_mut(session, *message, *embed, *action) else {
                return OpOutcome::Skipped;
            };
            if *option == 0 || *option >= select.options.len() {
                return OpOutcome::Skipped;
            }
            select.options.swap(*option - 1, *option);
            OpOutcome::Applied
        }
        EditOp::MoveOptionDown { message, embed, action, option } => {
            let Some(select) = select_at_mut(session, *message, *embed, *action) else {
                return OpOutcome::Skipped;
            };
            if option + 1 >= select.options.len() {
                return OpOutcome::Skipped;
            }
            select.options.swap(*option, *option + 1);
            OpOutcome::Applied
        }
    }
}

fn delete_message(session: &mut EditorSession, message: usize) -> OpOutcome {
    if session.messages().len() <= 1 || message >= session.messages().len() {
        return OpOutcome::Skipped;
    }
    session.messages_mut().remove(message);
    let clamped = session.current_message_index().min(session.messages().len() - 1);
    session.set_cursor(clamped, 0);
    OpOutcome::Applied
}

fn add_embed(session: &mut EditorSession, message: usize) -> OpOutcome {
    let Some(target) = session.message_at_mut(message) else {
        return OpOutcome::Skipped;
    };
    target.embeds.push(Embed::new());
    let last = target.embeds.len() - 1;
    session.set_cursor(message, last);
    OpOutcome::Applied
}

fn delete_embed(session: &mut EditorSession, message: usize, embed: usize) -> OpOutcome {
    let Some(target) = session.message_at_mut(message) else {
        return OpOutcome::Skipped;
    };
    // Deleting the last embed of a message is a no-op, not an error.
    if target.embeds.len() <= 1 || embed >= target.embeds.len() {
        return OpOutcome::Skipped;
    }
    target.embeds.remove(embed);
    session.clamp_cursor();
    OpOutcome::Applied
}

fn duplicate_embed(session: &mut EditorSession, message: usize, embed: usize) -> OpOutcome {
    let Some(target) = session.message_at_mut(message) else {
        return OpOutcome::Skipped;
    };
    if embed >= target.embeds.len() {
        return OpOutcome::Skipped;
    }
    // Deep copy; the duplicate shares no state with its source.
    let copy = target.embeds[embed].clone();
    target.embeds.insert(embed + 1, copy);
    session.set_cursor(message, embed + 1);
    OpOutcome::Applied
}

fn add_action(
    session: &mut EditorSession,
    message: usize,
    embed: usize,
    action: Action,
) -> OpOutcome {
    let Some(target) = session.embed_at_mut(message, embed) else {
        return OpOutcome::Skipped;
    };
    target.actions.push(action);
    OpOutcome::Applied
}

fn apply_embed_patch(embed: &mut Embed, patch: &EmbedPatch) {
    if let Some(title) = &patch.title {
        embed.title = title.clone();
    }
    if let Some(description) = &patch.description {
        embed.description = description.clone();
    }
    if let Some(color) = &patch.color {
        embed.color = color.trim_start_matches('#').to_owned();
    }
    if let Some(url) = &patch.url {
        embed.url = url.clone();
    }
    if let Some(name) = &patch.author_name {
        embed.author.name = name.clone();
    }
    if let Some(url) = &patch.author_url {
        embed.author.url = url.clone();
    }
    if let Some(icon_url) = &patch.author_icon_url {
        embed.author.icon_url = icon_url.clone();
    }
    if let Some(url) = &patch.thumbnail_url {
        embed.thumbnail.url = url.clone();
    }
    if let Some(url) = &patch.image_url {
        embed.image.url = url.clone();
    }
    if let Some(text) = &patch.footer_text {
        embed.footer.text = text.clone();
    }
    if let Some(icon_url) = &patch.footer_icon_url {
        embed.footer.icon_url = icon_url.clone();
    }
}

fn apply_button_patch(button: &mut Button, patch: &ButtonPatch) {
    if let Some(label) = &patch.label {
        button.label = label.clone();
    }
    if let Some(kind) = patch.kind {
        button.kind = kind;
    }
    if let Some(url) = &patch.url {
        button.url = url.clone();
    }
    if let Some(target) = &patch.target {
        button.target = target.clone();
    }
    if let Some(ephemeral) = patch.ephemeral {
        button.ephemeral = ephemeral;
    }
    if let Some(icon) = &patch.icon {
        button.icon = icon.clone();
    }
}

fn field_at_mut<'a>(
    session: &'a mut EditorSession,
    message: usize,
    embed: usize,
    field: usize,
) -> Option<&'a mut Field> {
    session.embed_at_mut(message, embed)?.fields.get_mut(field)
}

fn action_at_mut<'a>(
    session: &'a mut EditorSession,
    message: usize,
    embed: usize,
    action: usize,
) -> Option<&'a mut Action> {
    session.embed_at_mut(message, embed)?.actions.get_mut(action)
}

fn select_at_mut<'a>(
    session: &'a mut EditorSession,
    message: usize,
    embed: usize,
    action: usize,
) -> Option<&'a mut Select> {
    match action_at_mut(session, message, embed, action) {
        Some(Action::Select(select)) => Some(select),
        _ => None,
    }
}
