// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Scoped preview resources for pending uploads.
//!
//! A preview is acquired when a file is added to the gallery and released when the last
//! [`PreviewHandle`] referring to it is dropped: removing the pending attachment, reconciling it
//! into an existing one, or dropping the whole editing session all release it.

use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use smol_str::{format_smolstr, SmolStr};

#[derive(Debug, Default)]
struct RegistryInner {
    next: AtomicU64,
    live: AtomicUsize,
}

/// Issues preview handles and counts the ones still alive.
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    inner: Arc<RegistryInner>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self, file_name: &str) -> PreviewHandle {
        let serial = self.inner.next.fetch_add(1, Ordering::Relaxed) + 1;
        self.inner.live.fetch_add(1, Ordering::AcqRel);
        PreviewHandle {
            inner: Arc::new(PreviewInner {
                url: format_smolstr!("preview:{serial}/{file_name}"),
                registry: Arc::clone(&self.inner),
            }),
        }
    }

    /// Number of previews acquired and not yet released.
    pub fn live(&self) -> usize {
        self.inner.live.load(Ordering::Acquire)
    }
}

struct PreviewInner {
    url: SmolStr,
    registry: Arc<RegistryInner>,
}

impl Drop for PreviewInner {
    fn drop(&mut self) {
        self.registry.live.fetch_sub(1, Ordering::AcqRel);
    }
}

/// A shared reference to one live preview. Cloning does not acquire a new preview.
#[derive(Clone)]
pub struct PreviewHandle {
    inner: Arc<PreviewInner>,
}

impl PreviewHandle {
    pub fn url(&self) -> &str {
        &self.inner.url
    }
}

impl fmt::Debug for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PreviewHandle").field(&self.inner.url).finish()
    }
}

impl PartialEq for PreviewHandle {
    fn eq(&self, other: &Self) -> bool {
        self.inner.url == other.inner.url
    }
}

impl Eq for PreviewHandle {}
