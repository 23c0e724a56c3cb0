// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Wire side of an edit session.
//!
//! [`encode`] turns the session stores into a [`SubmissionPayload`] with local ids stripped,
//! [`submit`] runs the single-in-flight protocol against a [`Submitter`], and [`reconcile`]
//! folds the server's [`SubmissionReceipt`] back into the stores.

pub mod encode;
pub mod reconcile;
pub mod submit;

pub use crate::model::ValidationErrors;
pub use encode::{
    build_submission, encode_steps, validate_submission, ItineraryEntry, NewImageUpload,
    SubmissionPayload,
};
pub use reconcile::{
    reconcile_after_success, CreatedImage, Reconciled, ReconciliationMismatch, SubmissionReceipt,
};
pub use submit::{RejectionKind, SubmissionRejected, SubmissionTicket, SubmitError, Submitter};
