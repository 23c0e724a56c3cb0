// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Ordered itinerary store.
//!
//! After every public mutation the step at position `i` has `order == i + 1`.

use crate::model::ids::StepTag;
use crate::model::{
    ItineraryId, ItineraryRecord, LocalIdAssigner, LocalStepId, Step, StepFields, StepPatch,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone)]
pub struct StepStore {
    steps: Vec<Step>,
    ids: LocalIdAssigner<StepTag>,
}

impl Default for StepStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StepStore {
    /// A store holding exactly one blank step.
    pub fn new() -> Self {
        let mut store = Self { steps: Vec::new(), ids: LocalIdAssigner::new() };
        store.add_step();
        store
    }

    /// Loads persisted itinerary rows, ordered by `step_number` and renumbered densely.
    /// An empty itinerary starts with one blank step.
    pub fn from_records(records: &[ItineraryRecord]) -> Self {
        let mut sorted = records.iter().collect::<Vec<_>>();
        sorted.sort_by_key(|record| record.step_number);

        let mut ids = LocalIdAssigner::new();
        let steps = sorted
            .into_iter()
            .map(|record| {
                Step::new(
                    ids.assign(),
                    Some(ItineraryId::new(record.id)),
                    record.step_number,
                    StepFields::new(
                        record.start_time.clone(),
                        record.activity.clone(),
                        record.description.clone(),
                    ),
                )
            })
            .collect::<Vec<_>>();

        let mut store = Self { steps, ids };
        if store.steps.is_empty() {
            store.add_step();
        }
        store.renumber();
        store
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, local_id: LocalStepId) -> Option<&Step> {
        self.steps.iter().find(|step| step.local_id() == local_id)
    }

    pub fn position(&self, local_id: LocalStepId) -> Option<usize> {
        self.steps.iter().position(|step| step.local_id() == local_id)
    }

    /// Appends a blank, unsaved step numbered `max + 1`.
    pub fn add_step(&mut self) -> LocalStepId {
        let local_id = self.ids.assign();
        let next_order = self.steps.iter().map(Step::order).max().map_or(1, |max| max + 1);
        self.steps.push(Step::new(local_id, None, next_order, StepFields::default()));
        local_id
    }

    /// Removes a step and renumbers the rest. Refuses to drop the last remaining step.
    pub fn remove_step(&mut self, local_id: LocalStepId) -> bool {
        if self.steps.len() <= 1 {
            return false;
        }
        let Some(index) = self.position(local_id) else {
            return false;
        };
        self.steps.remove(index);
        self.steps.sort_by_key(Step::order);
        self.renumber();
        true
    }

    /// Swaps the step at `index` with its neighbour. Out-of-range moves do nothing.
    pub fn move_step(&mut self, index: usize, direction: Direction) -> bool {
        let target = match direction {
            Direction::Up => index.checked_sub(1),
            Direction::Down => index.checked_add(1),
        };
        let Some(target) = target.filter(|target| *target < self.steps.len()) else {
            return false;
        };
        if index >= self.steps.len() {
            return false;
        }
        self.steps.swap(index, target);
        self.renumber();
        true
    }

    pub fn update_step(&mut self, local_id: LocalStepId, patch: &StepPatch) -> bool {
        let Some(step) = self.steps.iter_mut().find(|step| step.local_id() == local_id) else {
            return false;
        };
        step.apply_patch(patch);
        true
    }

    pub(crate) fn assign_persisted_id(
        &mut self,
        local_id: LocalStepId,
        persisted_id: ItineraryId,
    ) -> bool {
        match self.steps.iter_mut().find(|step| step.local_id() == local_id) {
            Some(step) => {
                step.set_persisted_id(persisted_id);
                true
            }
            None => false,
        }
    }

    /// `order` values are exactly `1..=len` and match array positions.
    pub fn is_dense(&self) -> bool {
        self.steps.iter().zip(1u32..).all(|(step, expected)| step.order() == expected)
    }

    fn renumber(&mut self) {
        for (step, order) in self.steps.iter_mut().zip(1u32..) {
            step.set_order(order);
        }
    }
}
