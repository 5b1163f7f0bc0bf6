// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Talaria-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Talaria and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Interactive elements attached to an embed and the option-value protocol.
//!
//! Option values (and send-embed button targets) carry a string
//! mini-protocol: `send:<key>` references a saved message by store key,
//! `send_json:<base64>` inlines a whole document as base64 of UTF-8 JSON,
//! `link:<url>` is a literal link, and anything else is an opaque literal.
//! The prefix is decoded into [`OptionValue`] the moment a value enters the
//! model and encoded back to the exact same string only when serializing.

use std::fmt;

use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// An interactive element attached to an embed: a button or a select menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Button(Button),
    Select(Select),
}

impl Action {
    pub fn is_button(&self) -> bool {
        matches!(self, Self::Button(_))
    }

    pub fn is_select(&self) -> bool {
        matches!(self, Self::Select(_))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonKind {
    #[default]
    Link,
    SendEmbed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Button {
    pub label: String,
    pub kind: ButtonKind,
    pub url: String,
    pub target: OptionValue,
    pub ephemeral: bool,
    pub icon: String,
}

impl Button {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Select {
    pub placeholder: String,
    pub name: String,
    pub icon: String,
    pub options: Vec<SelectOption>,
}

impl Select {
    pub fn new() -> Self {
        Self::default()
    }
}

/// One selectable entry within a select menu.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectOption {
    pub label: String,
    pub value: OptionValue,
    pub description: String,
    pub icon: String,
}

impl SelectOption {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Decoded form of the option-value mini-protocol.
///
/// `parse` and `encode` are mutually inverse: any input string survives a
/// parse/encode round-trip byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OptionValue {
    /// `send:<key>`: reference to a saved message by store key.
    SendRef(String),
    /// `send_json:<base64>`: self-contained document, base64 of UTF-8 JSON.
    SendJson(String),
    /// `link:<url>`: literal link.
    Link(String),
    /// Anything without a recognized prefix.
    Opaque(String),
}

impl OptionValue {
    pub fn parse(raw: &str) -> Self {
        if let Some(key) = raw.strip_prefix("send:") {
            Self::SendRef(key.to_owned())
        } else if let Some(token) = raw.strip_prefix("send_json:") {
            Self::SendJson(token.to_owned())
        } else if let Some(url) = raw.strip_prefix("link:") {
            Self::Link(url.to_owned())
        } else {
            Self::Opaque(raw.to_owned())
        }
    }

    /// The exact wire string this value came from (or will go out as).
    pub fn encode(&self) -> String {
        match self {
            Self::SendRef(key) => format!("send:{key}"),
            Self::SendJson(token) => format!("send_json:{token}"),
            Self::Link(url) => format!("link:{url}"),
            Self::Opaque(raw) => raw.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Opaque(raw) if raw.is_empty())
    }

    /// Store key referenced by this value, if it is a `send:` reference.
    pub fn send_ref(&self) -> Option<&str> {
        match self {
            Self::SendRef(key) => Some(key),
            _ => None,
        }
    }

    /// Decode the inlined document of a `send_json:` value.
    ///
    /// Returns `None` for every other variant.
    pub fn inline_document(&self) -> Option<Result<serde_json::Value, SendJsonError>> {
        match self {
            Self::SendJson(token) => Some(decode_send_json(token)),
            _ => None,
        }
    }

    /// Build a `send_json:` value inlining `document`.
    pub fn inline(document: &serde_json::Value) -> Self {
        Self::SendJson(STANDARD.encode(document.to_string().as_bytes()))
    }
}

impl Default for OptionValue {
    fn default() -> Self {
        Self::Opaque(String::new())
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl From<String> for OptionValue {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<OptionValue> for String {
    fn from(value: OptionValue) -> Self {
        value.encode()
    }
}

/// Decode a `send_json` base64 token into parsed JSON.
///
/// Tokens produced by older frontends may arrive with stripped padding or in
/// the URL-safe alphabet; padding is repaired and both alphabets are tried
/// before giving up.
pub fn decode_send_json(token: &str) -> Result<serde_json::Value, SendJsonError> {
    let mut token = token.trim().to_owned();
    if token.is_empty() {
        return Err(SendJsonError::Empty);
    }

    let rem = token.len() % 4;
    if rem != 0 {
        token.extend(std::iter::repeat('=').take(4 - rem));
    }

    let raw = match STANDARD.decode(token.as_bytes()) {
        Ok(raw) => raw,
        Err(standard_err) => match URL_SAFE.decode(token.as_bytes()) {
            Ok(raw) => raw,
            Err(_) => return Err(SendJsonError::Base64(standard_err)),
        },
    };

    let text = String::from_utf8(raw).map_err(SendJsonError::Utf8)?;
    if text.trim().is_empty() {
        return Err(SendJsonError::Empty);
    }

    serde_json::from_str(&text).map_err(SendJsonError::Json)
}

#[derive(Debug)]
pub enum SendJsonError {
    Empty,
    Base64(base64::DecodeError),
    Utf8(std::string::FromUtf8Error),
    Json(serde_json::Error),
}

impl fmt::Display for SendJsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty inline payload"),
            Self::Base64(source) => write!(f, "base64 decode failed: {source}"),
            Self::Utf8(source) => write!(f, "utf-8 decode failed: {source}"),
            Self::Json(source) => write!(f, "json parse failed: {source}"),
        }
    }
}

impl std::error::Error for SendJsonError {}
