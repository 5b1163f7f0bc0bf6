// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Talaria-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Talaria and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Wire formats: import normalization and export projection.

pub mod export;
pub mod import;

pub use export::{
    build_complete_payload, build_complete_payload_at, build_simple_payload,
    build_webhook_payload, build_webhook_payload_at, CompletePayload, EmbedOut, Metadata,
    SimplePayload, WebhookPayload, FORMAT_VERSION,
};
pub use import::{normalize_document, parse_document, ImportError};
