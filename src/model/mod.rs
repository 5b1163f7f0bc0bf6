// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Talaria-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Talaria and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A session edits messages; a message owns embeds; an embed owns fields and
//! actions (buttons/select menus with options). Records serialize to the
//! persisted/imported shape; the export wire shape lives in `format::export`.

pub mod action;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod message;
pub mod session;

pub use action::{
    decode_send_json, Action, Button, ButtonKind, OptionValue, Select, SelectOption,
    SendJsonError,
};
pub use message::{Embed, EmbedAuthor, EmbedFooter, EmbedMedia, Field, Message};
pub use session::EditorSession;
