// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Gallery reconciliation store: persisted images, pending uploads and removal marks.

use std::collections::BTreeSet;

use smol_str::SmolStr;

use crate::model::ids::ImageTag;
use crate::model::{
    derive_caption, BinaryRef, ExistingAttachment, ImageId, LocalIdAssigner, LocalImageId,
    PendingAttachment, PreviewRegistry, TourImageRecord,
};

#[derive(Debug, Clone)]
pub struct GalleryStore {
    existing: Vec<ExistingAttachment>,
    pending: Vec<PendingAttachment>,
    removed: BTreeSet<ImageId>,
    ids: LocalIdAssigner<ImageTag>,
    previews: PreviewRegistry,
}

impl Default for GalleryStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// A pending upload the server confirmed, with the identity it assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SavedUpload {
    pub local_id: LocalImageId,
    pub caption: SmolStr,
    pub order: u32,
    pub id: ImageId,
    pub path: String,
}

impl GalleryStore {
    pub fn new(existing: Vec<ExistingAttachment>) -> Self {
        Self {
            existing,
            pending: Vec::new(),
            removed: BTreeSet::new(),
            ids: LocalIdAssigner::new(),
            previews: PreviewRegistry::new(),
        }
    }

    /// Loads persisted images in `image_order`.
    pub fn from_records(records: &[TourImageRecord]) -> Self {
        let mut sorted = records.iter().collect::<Vec<_>>();
        sorted.sort_by_key(|record| record.image_order);
        Self::new(
            sorted
                .into_iter()
                .map(|record| {
                    ExistingAttachment::new(
                        ImageId::new(record.id),
                        record.image_path.clone(),
                        record.image_caption.as_str(),
                        record.image_order,
                    )
                })
                .collect(),
        )
    }

    /// Queues files for upload.
    ///
    /// Captions continue the running count of visible images (kept existing plus pending) at
    /// the time of the call and are never renumbered afterwards.
    pub fn add_files(
        &mut self,
        files: impl IntoIterator<Item = BinaryRef>,
        caption_context: &str,
    ) -> Vec<LocalImageId> {
        let base = self.kept().count() + self.pending.len();
        let mut added = Vec::new();
        for (offset, binary) in files.into_iter().enumerate() {
            let position = base + offset + 1;
            let local_id = self.ids.assign();
            let preview = self.previews.acquire(binary.file_name());
            let order = u32::try_from(position).unwrap_or(u32::MAX);
            self.pending.push(PendingAttachment::new(
                local_id,
                binary,
                derive_caption(caption_context, position),
                order,
                preview,
            ));
            added.push(local_id);
        }
        added
    }

    /// Marks a persisted image for deletion. Unknown ids and repeated removals do nothing.
    pub fn remove_existing(&mut self, id: ImageId) -> bool {
        if !self.existing.iter().any(|image| image.id() == id) {
            return false;
        }
        self.removed.insert(id)
    }

    /// Drops the pending upload at `index` and releases its preview.
    pub fn remove_new(&mut self, index: usize) -> bool {
        if index >= self.pending.len() {
            return false;
        }
        drop(self.pending.remove(index));
        true
    }

    /// Persisted ids to retain, in display order.
    pub fn kept_existing_ids(&self) -> Vec<ImageId> {
        self.kept().map(ExistingAttachment::id).collect()
    }

    pub fn kept(&self) -> impl Iterator<Item = &ExistingAttachment> {
        self.existing.iter().filter(|image| !self.removed.contains(&image.id()))
    }

    pub fn existing(&self) -> &[ExistingAttachment] {
        &self.existing
    }

    pub fn pending(&self) -> &[PendingAttachment] {
        &self.pending
    }

    pub fn removed_ids(&self) -> &BTreeSet<ImageId> {
        &self.removed
    }

    pub fn pending_index(&self, local_id: LocalImageId) -> Option<usize> {
        self.pending.iter().position(|image| image.local_id() == local_id)
    }

    /// Previews acquired by this gallery that are still alive.
    pub fn live_previews(&self) -> usize {
        self.previews.live()
    }

    pub fn previews(&self) -> &PreviewRegistry {
        &self.previews
    }

    /// Folds a confirmed save into the store.
    ///
    /// The persisted set becomes `submitted_kept` plus the saved uploads, carrying the caption
    /// and order the server stored. Removal marks made after the submission started are kept;
    /// an upload dropped locally while the request was in flight comes back as an existing
    /// image already marked for removal.
    pub(crate) fn apply_saved(&mut self, submitted_kept: &[ImageId], uploads: Vec<SavedUpload>) {
        self.existing.retain(|image| submitted_kept.contains(&image.id()));
        let existing = &self.existing;
        self.removed.retain(|id| existing.iter().any(|image| image.id() == *id));

        for upload in uploads {
            match self.pending_index(upload.local_id) {
                Some(index) => drop(self.pending.remove(index)),
                None => {
                    self.removed.insert(upload.id);
                }
            }
            self.existing.push(ExistingAttachment::new(
                upload.id,
                upload.path,
                upload.caption,
                upload.order,
            ));
        }
    }
}
