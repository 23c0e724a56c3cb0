// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutation operations for edit sessions.
//!
//! Operations are applied in batches with optimistic concurrency (revision checks) and produce a
//! minimal delta the UI can use to refresh derived state. A batch applies completely or not at
//! all.

use std::collections::HashSet;

use thiserror::Error;

use crate::editor::{Direction, EditSession};
use crate::model::{
    AssociationKind, BinaryRef, CatalogId, DetailsPatch, ImageId, LocalImageId, LocalStepId,
    StepPatch,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Step(StepOp),
    Gallery(GalleryOp),
    Assoc(AssocOp),
    Details(DetailsPatch),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOp {
    Add,
    Remove { step_id: LocalStepId },
    Move { index: usize, direction: Direction },
    Update { step_id: LocalStepId, patch: StepPatch },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryOp {
    AddFiles { files: Vec<BinaryRef>, caption_context: String },
    RemoveExisting { image_id: ImageId },
    RemoveNew { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssocOp {
    Add { kind: AssociationKind, id: CatalogId },
    Remove { kind: AssociationKind, id: CatalogId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    pub new_rev: u64,
    pub applied: usize,
    pub delta: Delta,
}

/// Something a delta can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EditRef {
    Details,
    Step(LocalStepId),
    ExistingImage(ImageId),
    PendingImage(LocalImageId),
    Association(AssociationKind, CatalogId),
}

/// Minimal delta describing what changed as the result of applying ops.
///
/// Refused no-ops (removing the last step, moving past either end, re-adding a selected
/// association) leave no trace here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delta {
    pub added: Vec<EditRef>,
    pub removed: Vec<EditRef>,
    pub updated: Vec<EditRef>,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }
}

#[derive(Debug, Default)]
struct DeltaBuilder {
    added: HashSet<EditRef>,
    removed: HashSet<EditRef>,
    updated: HashSet<EditRef>,
}

impl DeltaBuilder {
    /// A ref removed earlier in the same batch existed at `base_rev`; re-adding it is an update.
    fn record_added(&mut self, edit_ref: EditRef) {
        if self.removed.remove(&edit_ref) {
            self.updated.insert(edit_ref);
            return;
        }
        self.added.insert(edit_ref);
    }

    /// A ref added earlier in the same batch never existed at `base_rev` and leaves no trace.
    fn record_removed(&mut self, edit_ref: EditRef) {
        self.updated.remove(&edit_ref);
        if self.added.remove(&edit_ref) {
            return;
        }
        self.removed.insert(edit_ref);
    }

    fn record_updated(&mut self, edit_ref: EditRef) {
        if self.added.contains(&edit_ref) || self.removed.contains(&edit_ref) {
            return;
        }
        self.updated.insert(edit_ref);
    }

    fn finish(self) -> Delta {
        let mut added = self.added.into_iter().collect::<Vec<_>>();
        let mut removed = self.removed.into_iter().collect::<Vec<_>>();
        let mut updated = self.updated.into_iter().collect::<Vec<_>>();

        added.sort();
        removed.sort();
        updated.sort();

        Delta { added, removed, updated }
    }
}

pub fn apply_ops(
    session: &mut EditSession,
    base_rev: u64,
    ops: &[Op],
) -> Result<ApplyResult, ApplyError> {
    let current_rev = session.rev();
    if base_rev != current_rev {
        return Err(ApplyError::Conflict { base_rev, current_rev });
    }

    if ops.is_empty() {
        return Ok(ApplyResult { new_rev: current_rev, applied: 0, delta: Delta::default() });
    }

    let mut draft = session.clone();
    let mut delta = DeltaBuilder::default();

    for op in ops {
        match op {
            Op::Step(step_op) => apply_step_op(&mut draft, step_op, &mut delta)?,
            Op::Gallery(gallery_op) => apply_gallery_op(&mut draft, gallery_op, &mut delta),
            Op::Assoc(assoc_op) => apply_assoc_op(&mut draft, assoc_op, &mut delta),
            Op::Details(patch) => {
                if patch.apply(draft.details_mut()) {
                    delta.record_updated(EditRef::Details);
                }
            }
        }
    }

    let delta = delta.finish();
    if !delta.is_empty() {
        draft.bump_rev();
    }
    *session = draft;

    Ok(ApplyResult { new_rev: session.rev(), applied: ops.len(), delta })
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error("stale base_rev (base_rev={base_rev}, current_rev={current_rev})")]
    Conflict { base_rev: u64, current_rev: u64 },
    #[error("object not found ({target:?})")]
    NotFound { target: EditRef },
}

// Extracted op-application implementation for step/gallery/association mutations.
include!("ops_impl.rs");
