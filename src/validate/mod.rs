// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Talaria-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Talaria and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Export-validity checks.
//!
//! Validation never mutates and never blocks editing; it gates the export
//! and webhook-send boundaries. [`embed_violations`] enumerates every rule an
//! embed breaks; [`check_message`] reports the first failing embed with its
//! 1-based index.

use std::fmt;

use url::Url;

use crate::model::{Embed, Message};

pub const TITLE_MAX: usize = 256;
pub const DESCRIPTION_MAX: usize = 4096;
pub const FIELDS_MAX: usize = 25;
pub const FIELD_NAME_MAX: usize = 256;
pub const FIELD_VALUE_MAX: usize = 1024;
pub const FOOTER_TEXT_MAX: usize = 2048;
pub const AUTHOR_NAME_MAX: usize = 256;
pub const EMBEDS_MAX: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Embed has no title, no description, and no image URL.
    NoVisibleContent,
    TitleTooLong { len: usize },
    DescriptionTooLong { len: usize },
    TooManyFields { count: usize },
    FieldNameEmpty { field: usize },
    FieldValueEmpty { field: usize },
    FieldNameTooLong { field: usize, len: usize },
    FieldValueTooLong { field: usize, len: usize },
    FooterTextTooLong { len: usize },
    AuthorNameTooLong { len: usize },
    ThumbnailUrlInvalid { url: String },
    ImageUrlInvalid { url: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoVisibleContent => {
                write!(f, "embed needs a title, a description, or an image")
            }
            Self::TitleTooLong { len } => {
                write!(f, "title is {len} characters (limit {TITLE_MAX})")
            }
            Self::DescriptionTooLong { len } => {
                write!(f, "description is {len} characters (limit {DESCRIPTION_MAX})")
            }
            Self::TooManyFields { count } => {
                write!(f, "embed has {count} fields (limit {FIELDS_MAX})")
            }
            Self::FieldNameEmpty { field } => write!(f, "field {field} has an empty name"),
            Self::FieldValueEmpty { field } => write!(f, "field {field} has an empty value"),
            Self::FieldNameTooLong { field, len } => {
                write!(f, "field {field} name is {len} characters (limit {FIELD_NAME_MAX})")
            }
            Self::FieldValueTooLong { field, len } => {
                write!(f, "field {field} value is {len} characters (limit {FIELD_VALUE_MAX})")
            }
            Self::FooterTextTooLong { len } => {
                write!(f, "footer text is {len} characters (limit {FOOTER_TEXT_MAX})")
            }
            Self::AuthorNameTooLong { len } => {
                write!(f, "author name is {len} characters (limit {AUTHOR_NAME_MAX})")
            }
            Self::ThumbnailUrlInvalid { url } => {
                write!(f, "thumbnail url is not an absolute url: {url}")
            }
            Self::ImageUrlInvalid { url } => {
                write!(f, "image url is not an absolute url: {url}")
            }
        }
    }
}

impl std::error::Error for Violation {}

/// Enumerate every rule `embed` breaks, in a stable order.
pub fn embed_violations(embed: &Embed) -> Vec<Violation> {
    let mut violations = Vec::new();

    if embed.is_blank() {
        violations.push(Violation::NoVisibleContent);
    }

    let title_len = embed.title.chars().count();
    if title_len > TITLE_MAX {
        violations.push(Violation::TitleTooLong { len: title_len });
    }

    let description_len = embed.description.chars().count();
    if description_len > DESCRIPTION_MAX {
        violations.push(Violation::DescriptionTooLong { len: description_len });
    }

    if embed.fields.len() > FIELDS_MAX {
        violations.push(Violation::TooManyFields { count: embed.fields.len() });
    }

    for (index, field) in embed.fields.iter().enumerate() {
        let field_no = index + 1;
        if field.name.is_empty() {
            violations.push(Violation::FieldNameEmpty { field: field_no });
        }
        if field.value.is_empty() {
            violations.push(Violation::FieldValueEmpty { field: field_no });
        }
        let name_len = field.name.chars().count();
        if name_len > FIELD_NAME_MAX {
            violations.push(Violation::FieldNameTooLong { field: field_no, len: name_len });
        }
        let value_len = field.value.chars().count();
        if value_len > FIELD_VALUE_MAX {
            violations.push(Violation::FieldValueTooLong { field: field_no, len: value_len });
        }
    }

    let footer_len = embed.footer.text.chars().count();
    if footer_len > FOOTER_TEXT_MAX {
        violations.push(Violation::FooterTextTooLong { len: footer_len });
    }

    let author_len = embed.author.name.chars().count();
    if author_len > AUTHOR_NAME_MAX {
        violations.push(Violation::AuthorNameTooLong { len: author_len });
    }

    if !embed.thumbnail.url.is_empty() && Url::parse(&embed.thumbnail.url).is_err() {
        violations.push(Violation::ThumbnailUrlInvalid { url: embed.thumbnail.url.clone() });
    }

    if !embed.image.url.is_empty() && Url::parse(&embed.image.url).is_err() {
        violations.push(Violation::ImageUrlInvalid { url: embed.image.url.clone() });
    }

    violations
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageViolation {
    NoEmbeds,
    TooManyEmbeds { count: usize },
    /// First violation of the first failing embed, `embed` is 1-based.
    Embed { embed: usize, violation: Violation },
}

impl fmt::Display for MessageViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoEmbeds => write!(f, "message has no embeds"),
            Self::TooManyEmbeds { count } => {
                write!(f, "message has {count} embeds (limit {EMBEDS_MAX})")
            }
            Self::Embed { embed, violation } => write!(f, "Embed {embed}: {violation}"),
        }
    }
}

impl std::error::Error for MessageViolation {}

/// A message is exportable iff it has 1..=10 embeds and every embed passes.
///
/// The first violation found wins; embeds are scanned in order.
pub fn check_message(message: &Message) -> Result<(), MessageViolation> {
    if message.embeds.is_empty() {
        return Err(MessageViolation::NoEmbeds);
    }
    if message.embeds.len() > EMBEDS_MAX {
        return Err(MessageViolation::TooManyEmbeds { count: message.embeds.len() });
    }

    for (index, embed) in message.embeds.iter().enumerate() {
        if let Some(violation) = embed_violations(embed).into_iter().next() {
            return Err(MessageViolation::Embed { embed: index + 1, violation });
        }
    }

    Ok(())
}
