// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::{ItineraryId, LocalStepId};

/// The user-editable part of an itinerary step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepFields {
    pub start_time: String,
    pub title: String,
    pub description: String,
}

impl StepFields {
    pub fn new(
        start_time: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self { start_time: start_time.into(), title: title.into(), description: description.into() }
    }
}

/// Partial update merged into a step by `StepStore::update_step`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepPatch {
    pub start_time: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl StepPatch {
    pub fn is_empty(&self) -> bool {
        self.start_time.is_none() && self.title.is_none() && self.description.is_none()
    }
}

/// One itinerary entry.
///
/// `order` is 1-based and owned by the store: it always equals the step's array position plus
/// one once a store operation returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    local_id: LocalStepId,
    persisted_id: Option<ItineraryId>,
    order: u32,
    fields: StepFields,
}

impl Step {
    pub(crate) fn new(
        local_id: LocalStepId,
        persisted_id: Option<ItineraryId>,
        order: u32,
        fields: StepFields,
    ) -> Self {
        Self { local_id, persisted_id, order, fields }
    }

    pub fn local_id(&self) -> LocalStepId {
        self.local_id
    }

    pub fn persisted_id(&self) -> Option<ItineraryId> {
        self.persisted_id
    }

    pub(crate) fn set_persisted_id(&mut self, persisted_id: ItineraryId) {
        self.persisted_id = Some(persisted_id);
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    pub(crate) fn set_order(&mut self, order: u32) {
        self.order = order;
    }

    pub fn fields(&self) -> &StepFields {
        &self.fields
    }

    pub fn start_time(&self) -> &str {
        &self.fields.start_time
    }

    pub fn title(&self) -> &str {
        &self.fields.title
    }

    pub fn description(&self) -> &str {
        &self.fields.description
    }

    pub(crate) fn apply_patch(&mut self, patch: &StepPatch) {
        if let Some(start_time) = &patch.start_time {
            self.fields.start_time.clone_from(start_time);
        }
        if let Some(title) = &patch.title {
            self.fields.title.clone_from(title);
        }
        if let Some(description) = &patch.description {
            self.fields.description.clone_from(description);
        }
    }
}
