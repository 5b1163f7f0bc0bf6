// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Talaria-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Talaria and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::action::Action;

/// Top-level sendable unit: an ordered run of embeds.
///
/// A message always holds at least one embed while it is being edited; the
/// editing operations refuse (as a silent no-op) to remove the last one.
/// Serialization is the persisted/imported shape (`{"embeds": [...]}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    pub embeds: Vec<Embed>,
}

impl Message {
    /// A fresh message seeded with a single zero-value embed.
    pub fn new() -> Self {
        Self { embeds: vec![Embed::new()] }
    }

    pub fn with_embeds(embeds: Vec<Embed>) -> Self {
        let embeds = if embeds.is_empty() { vec![Embed::new()] } else { embeds };
        Self { embeds }
    }
}

/// A single rich-content card.
///
/// Every string field defaults to empty and every nested record is always
/// present in memory; empties are elided only at the export boundary.
/// `color` is a 6-hex-digit string without a leading `#` (empty = unset);
/// it becomes an integer only in exported payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: String,
    pub url: String,
    pub author: EmbedAuthor,
    pub thumbnail: EmbedMedia,
    pub image: EmbedMedia,
    pub fields: Vec<Field>,
    pub footer: EmbedFooter,
    pub actions: Vec<Action>,
}

impl Embed {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the embed would render as an empty card: no title, no
    /// description, no image.
    pub fn is_blank(&self) -> bool {
        self.title.is_empty() && self.description.is_empty() && self.image.url.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedAuthor {
    pub name: String,
    pub url: String,
    pub icon_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedMedia {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedFooter {
    pub text: String,
    pub icon_url: String,
}

/// A name/value pair within an embed, optionally laid out inline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Field {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl Field {
    pub fn new() -> Self {
        Self::default()
    }
}
