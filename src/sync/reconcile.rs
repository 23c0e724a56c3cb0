// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Folding a successful save back into the session.
//!
//! New ids are matched positionally: the n-th created step id belongs to the n-th step that was
//! submitted without an id, and likewise for uploads. The counts are checked before anything is
//! written; on mismatch the session keeps its unresolved ids until the next reload.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use thiserror::Error;
use tracing::{debug, warn};

use super::submit::SubmissionTicket;
use crate::editor::gallery::SavedUpload;
use crate::editor::EditSession;
use crate::model::{ImageId, ItineraryId, TourId};

/// A stored upload as reported by the persistence boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CreatedImage {
    pub id: u64,
    pub image_path: String,
    pub image_order: u32,
    pub image_caption: String,
}

/// Server confirmation of a save. Both lists are in submission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SubmissionReceipt {
    pub tour_id: u64,
    #[serde(default)]
    pub created_step_ids: Vec<u64>,
    #[serde(default)]
    pub created_images: Vec<CreatedImage>,
}

/// The receipt does not line up with what was submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconciliationMismatch {
    #[error("receipt names tour {actual}, session edits tour {expected}")]
    Tour { expected: u64, actual: u64 },
    #[error("expected {expected} created step id(s), receipt has {actual}")]
    Steps { expected: usize, actual: usize },
    #[error("expected {expected} created image(s), receipt has {actual}")]
    Images { expected: usize, actual: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciled {
    Applied { steps: usize, images: usize },
    /// Nothing was written; ids stay unresolved until the session is reloaded.
    Skipped(ReconciliationMismatch),
}

fn check(
    ticket: &SubmissionTicket,
    receipt: &SubmissionReceipt,
) -> Result<(), ReconciliationMismatch> {
    if let Some(expected) = ticket.tour_id {
        if expected.get() != receipt.tour_id {
            return Err(ReconciliationMismatch::Tour {
                expected: expected.get(),
                actual: receipt.tour_id,
            });
        }
    }
    if ticket.new_steps.len() != receipt.created_step_ids.len() {
        return Err(ReconciliationMismatch::Steps {
            expected: ticket.new_steps.len(),
            actual: receipt.created_step_ids.len(),
        });
    }
    if ticket.new_images.len() != receipt.created_images.len() {
        return Err(ReconciliationMismatch::Images {
            expected: ticket.new_images.len(),
            actual: receipt.created_images.len(),
        });
    }
    Ok(())
}

/// Applies `receipt` to the stores, all or nothing.
///
/// Steps that already had a server id are left untouched. Steps or uploads the user removed
/// while the request was in flight are skipped; a removed upload that the server stored anyway
/// comes back marked for deletion so the next save drops it.
pub fn reconcile_after_success(
    session: &mut EditSession,
    ticket: &SubmissionTicket,
    receipt: &SubmissionReceipt,
) -> Reconciled {
    if let Err(mismatch) = check(ticket, receipt) {
        warn!(
            tour_id = receipt.tour_id,
            error = %mismatch,
            "reconciliation skipped"
        );
        return Reconciled::Skipped(mismatch);
    }

    session.set_tour_id(TourId::new(receipt.tour_id));

    let mut steps = 0;
    for (local_id, id) in ticket.new_steps.iter().zip(&receipt.created_step_ids) {
        if session.steps_mut().assign_persisted_id(*local_id, ItineraryId::new(*id)) {
            steps += 1;
        }
    }

    let uploads = ticket
        .new_images
        .iter()
        .zip(&receipt.created_images)
        .map(|(local_id, created)| SavedUpload {
            local_id: *local_id,
            caption: SmolStr::new(&created.image_caption),
            order: created.image_order,
            id: ImageId::new(created.id),
            path: created.image_path.clone(),
        })
        .collect::<Vec<_>>();
    let images = uploads.len();
    session.gallery_mut().apply_saved(&ticket.kept_images, uploads);
    session.bump_rev();

    debug!(tour_id = receipt.tour_id, steps, images, "submission reconciled");
    Reconciled::Applied { steps, images }
}
