// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Talaria-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Talaria and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::message::{Embed, Message};

/// The single in-memory editing session: the message list plus the cursor.
///
/// Cursor invariants: `current_message < messages.len()` and
/// `current_embed < messages[current_message].embeds.len()` at all times;
/// every mutation that can invalidate the cursor re-clamps it. The session
/// always holds at least one message, and every message at least one embed,
/// so the cursor never needs an empty state.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorSession {
    messages: Vec<Message>,
    current_message: usize,
    current_embed: usize,
}

impl EditorSession {
    pub fn new() -> Self {
        Self {
            messages: vec![Message::new()],
            current_message: 0,
            current_embed: 0,
        }
    }

    /// Session over an already-normalized message list, cursor at `(0, 0)`.
    pub fn with_messages(messages: Vec<Message>) -> Self {
        let mut session = Self::new();
        session.replace_messages(messages);
        session
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn messages_mut(&mut self) -> &mut Vec<Message> {
        &mut self.messages
    }

    pub fn current_message_index(&self) -> usize {
        self.current_message
    }

    pub fn current_embed_index(&self) -> usize {
        self.current_embed
    }

    pub fn current_message(&self) -> &Message {
        &self.messages[self.current_message]
    }

    pub fn current_embed(&self) -> &Embed {
        &self.messages[self.current_message].embeds[self.current_embed]
    }

    pub fn message_at(&self, message_index: usize) -> Option<&Message> {
        self.messages.get(message_index)
    }

    pub fn message_at_mut(&mut self, message_index: usize) -> Option<&mut Message> {
        self.messages.get_mut(message_index)
    }

    pub fn embed_at(&self, message_index: usize, embed_index: usize) -> Option<&Embed> {
        self.messages.get(message_index)?.embeds.get(embed_index)
    }

    pub fn embed_at_mut(
        &mut self,
        message_index: usize,
        embed_index: usize,
    ) -> Option<&mut Embed> {
        self.messages.get_mut(message_index)?.embeds.get_mut(embed_index)
    }

    /// Replace the whole message list (the import path) and reset the cursor.
    ///
    /// An empty list is reseeded with one zero-value message, and any message
    /// imported without embeds gets one, keeping the session invariants.
    pub fn replace_messages(&mut self, messages: Vec<Message>) {
        self.messages = if messages.is_empty() { vec![Message::new()] } else { messages };
        for message in &mut self.messages {
            if message.embeds.is_empty() {
                message.embeds.push(Embed::new());
            }
        }
        self.current_message = 0;
        self.current_embed = 0;
    }

    /// Move the cursor, clamping both coordinates into range.
    pub fn set_cursor(&mut self, message_index: usize, embed_index: usize) {
        self.current_message = message_index.min(self.messages.len() - 1);
        let embed_count = self.messages[self.current_message].embeds.len();
        self.current_embed = embed_index.min(embed_count - 1);
    }

    /// Re-clamp after external mutation of the message list.
    pub fn clamp_cursor(&mut self) {
        self.set_cursor(self.current_message, self.current_embed);
    }

    pub fn jump_to_message(&mut self, message_index: usize) {
        self.set_cursor(message_index, 0);
    }

    pub fn jump_to_embed(&mut self, embed_index: usize) {
        self.set_cursor(self.current_message, embed_index);
    }

    pub fn next_message(&mut self) {
        self.jump_to_message(self.current_message.saturating_add(1));
    }

    pub fn prev_message(&mut self) {
        self.jump_to_message(self.current_message.saturating_sub(1));
    }

    pub fn next_embed(&mut self) {
        self.jump_to_embed(self.current_embed.saturating_add(1));
    }

    pub fn prev_embed(&mut self) {
        self.jump_to_embed(self.current_embed.saturating_sub(1));
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}
