// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Step/gallery/association mutation helpers used by `apply_ops`.
/// Keeps `ops::mod` focused on public op types and orchestration.
fn apply_step_op(
    session: &mut EditSession,
    op: &StepOp,
    delta: &mut DeltaBuilder,
) -> Result<(), ApplyError> {
    match op {
        StepOp::Add => {
            let step_id = session.steps_mut().add_step();
            delta.record_added(EditRef::Step(step_id));
            Ok(())
        }
        StepOp::Remove { step_id } => {
            let before = step_orders(session);
            if session.steps_mut().remove_step(*step_id) {
                delta.record_removed(EditRef::Step(*step_id));
                record_reordered(session, &before, delta);
            }
            Ok(())
        }
        StepOp::Move { index, direction } => {
            let before = step_orders(session);
            if session.steps_mut().move_step(*index, *direction) {
                record_reordered(session, &before, delta);
            }
            Ok(())
        }
        StepOp::Update { step_id, patch } => {
            if !session.steps_mut().update_step(*step_id, patch) {
                return Err(ApplyError::NotFound { target: EditRef::Step(*step_id) });
            }
            if !patch.is_empty() {
                delta.record_updated(EditRef::Step(*step_id));
            }
            Ok(())
        }
    }
}

fn step_orders(session: &EditSession) -> Vec<(LocalStepId, u32)> {
    session.steps().steps().iter().map(|step| (step.local_id(), step.order())).collect()
}

fn record_reordered(
    session: &EditSession,
    before: &[(LocalStepId, u32)],
    delta: &mut DeltaBuilder,
) {
    for step in session.steps().steps() {
        let moved = before
            .iter()
            .find(|(local_id, _)| *local_id == step.local_id())
            .is_some_and(|(_, order)| *order != step.order());
        if moved {
            delta.record_updated(EditRef::Step(step.local_id()));
        }
    }
}

fn apply_gallery_op(session: &mut EditSession, op: &GalleryOp, delta: &mut DeltaBuilder) {
    match op {
        GalleryOp::AddFiles { files, caption_context } => {
            let added = session.gallery_mut().add_files(files.iter().cloned(), caption_context);
            for local_id in added {
                delta.record_added(EditRef::PendingImage(local_id));
            }
        }
        GalleryOp::RemoveExisting { image_id } => {
            if session.gallery_mut().remove_existing(*image_id) {
                delta.record_removed(EditRef::ExistingImage(*image_id));
            }
        }
        GalleryOp::RemoveNew { index } => {
            let local_id = session.gallery().pending().get(*index).map(|image| image.local_id());
            if let Some(local_id) = local_id {
                if session.gallery_mut().remove_new(*index) {
                    delta.record_removed(EditRef::PendingImage(local_id));
                }
            }
        }
    }
}

fn apply_assoc_op(session: &mut EditSession, op: &AssocOp, delta: &mut DeltaBuilder) {
    match op {
        AssocOp::Add { kind, id } => {
            if session.associations_mut().add(*kind, *id) {
                delta.record_added(EditRef::Association(*kind, *id));
            }
        }
        AssocOp::Remove { kind, id } => {
            if session.associations_mut().remove(*kind, *id) {
                delta.record_removed(EditRef::Association(*kind, *id));
            }
        }
    }
}
