// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Edited objects carry a dual key: a session-local id that is stable across reorders and a
//! server id that exists once the object has been saved.

pub mod association;
pub mod attachment;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod preview;
pub mod step;
pub mod tour;
pub mod validation;

pub use association::{AssociationKind, AssociationSet};
pub use attachment::{derive_caption, BinaryRef, ExistingAttachment, ImageKind, PendingAttachment};
pub use ids::{
    CatalogId, GuideId, ImageId, ItineraryId, LocalId, LocalIdAssigner, LocalImageId, LocalStepId,
    PersistedId, TourId,
};
pub use preview::{PreviewHandle, PreviewRegistry};
pub use step::{Step, StepFields, StepPatch};
pub use tour::{
    Catalog, CatalogEntry, DetailsPatch, ItineraryRecord, TourDetails, TourImageRecord,
    TourRecord, TourStatus,
};
pub use validation::ValidationErrors;
