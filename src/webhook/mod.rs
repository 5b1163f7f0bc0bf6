// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Talaria-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Talaria and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Webhook delivery.
//!
//! One JSON POST per send; 2xx is success, everything else surfaces the raw
//! response text. No retries and no timeout policy beyond the client's
//! defaults. The caller's in-memory state is untouched on failure.

use std::fmt;

use reqwest::StatusCode;
use tracing::debug;

use crate::format::export::WebhookPayload;

pub async fn send(
    client: &reqwest::Client,
    url: &str,
    payload: &WebhookPayload,
) -> Result<(), WebhookError> {
    let response = client
        .post(url)
        .json(payload)
        .send()
        .await
        .map_err(WebhookError::Transport)?;

    let status = response.status();
    if status.is_success() {
        debug!(%status, "webhook delivered");
        return Ok(());
    }

    let body = response.text().await.unwrap_or_default();
    Err(WebhookError::Status { status, body })
}

#[derive(Debug)]
pub enum WebhookError {
    Transport(reqwest::Error),
    Status { status: StatusCode, body: String },
}

impl fmt::Display for WebhookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(source) => write!(f, "webhook request failed: {source}"),
            Self::Status { status, body } => {
                if body.is_empty() {
                    write!(f, "webhook returned {status}")
                } else {
                    write!(f, "webhook returned {status}: {body}")
                }
            }
        }
    }
}

impl std::error::Error for WebhookError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(source) => Some(source),
            Self::Status { .. } => None,
        }
    }
}
