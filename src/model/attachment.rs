// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::sync::Arc;

use smol_str::{format_smolstr, SmolStr};

use super::ids::{ImageId, LocalImageId};
use super::preview::PreviewHandle;

/// Accepted upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    Jpeg,
    Png,
}

impl ImageKind {
    /// Detects the kind from the file extension (`jpg`, `jpeg`, `png`; case-insensitive).
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, ext) = file_name.rsplit_once('.')?;
        if ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg") {
            Some(Self::Jpeg)
        } else if ext.eq_ignore_ascii_case("png") {
            Some(Self::Png)
        } else {
            None
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }
}

/// Handle to the raw bytes of a pending upload. Clones share the same buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct BinaryRef {
    file_name: SmolStr,
    bytes: Arc<[u8]>,
}

impl BinaryRef {
    pub fn new(file_name: impl Into<SmolStr>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self { file_name: file_name.into(), bytes: bytes.into() }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn kind(&self) -> Option<ImageKind> {
        ImageKind::from_file_name(&self.file_name)
    }

    /// True when both handles point at the same buffer.
    pub fn same_buffer(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.bytes, &other.bytes)
    }
}

impl fmt::Debug for BinaryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryRef")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// `<context>_<position>`, e.g. `Bali_3`.
pub fn derive_caption(context: &str, position: usize) -> SmolStr {
    format_smolstr!("{context}_{position}")
}

/// An image that is already stored server-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingAttachment {
    id: ImageId,
    path: String,
    caption: SmolStr,
    order: u32,
}

impl ExistingAttachment {
    pub fn new(
        id: ImageId,
        path: impl Into<String>,
        caption: impl Into<SmolStr>,
        order: u32,
    ) -> Self {
        Self { id, path: path.into(), caption: caption.into(), order }
    }

    pub fn id(&self) -> ImageId {
        self.id
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn order(&self) -> u32 {
        self.order
    }
}

/// A file picked in this session and not uploaded yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAttachment {
    local_id: LocalImageId,
    binary: BinaryRef,
    caption: SmolStr,
    order: u32,
    preview: PreviewHandle,
}

impl PendingAttachment {
    pub(crate) fn new(
        local_id: LocalImageId,
        binary: BinaryRef,
        caption: SmolStr,
        order: u32,
        preview: PreviewHandle,
    ) -> Self {
        Self { local_id, binary, caption, order, preview }
    }

    pub fn local_id(&self) -> LocalImageId {
        self.local_id
    }

    pub fn binary(&self) -> &BinaryRef {
        &self.binary
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn preview_url(&self) -> &str {
        self.preview.url()
    }
}
