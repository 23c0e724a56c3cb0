// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Single-in-flight submission protocol.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use super::encode::{build_submission, validate_submission, SubmissionPayload};
use super::reconcile::{reconcile_after_success, Reconciled, SubmissionReceipt};
use crate::editor::EditSession;
use crate::model::{ImageId, LocalImageId, LocalStepId, TourId, ValidationErrors};

/// Persistence boundary for a whole-tour save.
pub trait Submitter {
    fn submit(
        &mut self,
        payload: &SubmissionPayload,
    ) -> Result<SubmissionReceipt, SubmissionRejected>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RejectionKind {
    Validation,
    Forbidden,
    NotFound,
}

/// The boundary refused the payload. Local state is left as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("submission rejected ({kind:?}): {message}")]
pub struct SubmissionRejected {
    pub kind: RejectionKind,
    pub message: String,
    pub errors: ValidationErrors,
}

impl SubmissionRejected {
    pub fn validation(errors: ValidationErrors) -> Self {
        Self { kind: RejectionKind::Validation, message: errors.to_string(), errors }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self {
            kind: RejectionKind::Forbidden,
            message: message.into(),
            errors: ValidationErrors::new(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: RejectionKind::NotFound,
            message: message.into(),
            errors: ValidationErrors::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("a submission is already in flight")]
    AlreadyInFlight,
    #[error("no submission is in flight")]
    NotInFlight,
    #[error("submission failed local validation: {0}")]
    Invalid(ValidationErrors),
    #[error(transparent)]
    Rejected(SubmissionRejected),
}

/// What a submission carried that only the client can map back: the local ids of steps and
/// uploads sent without a server id (in payload order) and the kept image ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionTicket {
    pub(crate) tour_id: Option<TourId>,
    pub(crate) new_steps: Vec<LocalStepId>,
    pub(crate) new_images: Vec<LocalImageId>,
    pub(crate) kept_images: Vec<ImageId>,
}

impl SubmissionTicket {
    pub(crate) fn capture(session: &EditSession) -> Self {
        Self {
            tour_id: session.tour_id(),
            new_steps: session
                .steps()
                .steps()
                .iter()
                .filter(|step| step.persisted_id().is_none())
                .map(|step| step.local_id())
                .collect(),
            new_images: session.gallery().pending().iter().map(|image| image.local_id()).collect(),
            kept_images: session.gallery().kept_existing_ids(),
        }
    }

    pub fn new_step_count(&self) -> usize {
        self.new_steps.len()
    }

    pub fn new_image_count(&self) -> usize {
        self.new_images.len()
    }
}

impl EditSession {
    /// Validates and encodes the session, then marks it as processing.
    ///
    /// Edits stay allowed while the request is out; the ticket remembers which local objects
    /// the payload referred to.
    pub fn begin_submit(&mut self) -> Result<SubmissionPayload, SubmitError> {
        if self.is_processing() {
            return Err(SubmitError::AlreadyInFlight);
        }
        let payload = build_submission(self);
        validate_submission(&payload).map_err(SubmitError::Invalid)?;

        let ticket = SubmissionTicket::capture(self);
        debug!(
            tour_id = ?payload.id,
            new_steps = ticket.new_step_count(),
            new_images = ticket.new_image_count(),
            "submission started"
        );
        self.set_in_flight(ticket);
        Ok(payload)
    }

    /// Clears the processing flag and applies the outcome.
    ///
    /// A rejection leaves every store untouched.
    pub fn finish_submit(
        &mut self,
        outcome: Result<SubmissionReceipt, SubmissionRejected>,
    ) -> Result<Reconciled, SubmitError> {
        let ticket = self.take_in_flight().ok_or(SubmitError::NotInFlight)?;
        match outcome {
            Ok(receipt) => {
                let reconciled = reconcile_after_success(self, &ticket, &receipt);
                info!(tour_id = receipt.tour_id, "submission saved");
                Ok(reconciled)
            }
            Err(rejected) => {
                debug!(
                    kind = ?rejected.kind,
                    fields = rejected.errors.len(),
                    "submission rejected"
                );
                Err(SubmitError::Rejected(rejected))
            }
        }
    }

    /// Runs a whole submission against `submitter`.
    pub fn submit_with<S: Submitter + ?Sized>(
        &mut self,
        submitter: &mut S,
    ) -> Result<Reconciled, SubmitError> {
        let payload = self.begin_submit()?;
        let outcome = submitter.submit(&payload);
        self.finish_submit(outcome)
    }
}
