// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Talaria-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Talaria and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence: the saved-message store and the image catalog cache.

pub mod image_catalog;
pub mod message_store;
#[cfg(test)]
pub(crate) mod test_utils;

pub use image_catalog::{ImageCatalog, DEFAULT_FRESHNESS_WINDOW};
pub use message_store::{
    MessageStore, StoreError, StoredMessage, LEGACY_STORE_PREFIX, STORE_PREFIX,
};
