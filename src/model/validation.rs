// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Field-keyed validation messages (`tour_itineraries.0.activity` style keys).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Error)]
#[error("{} field(s) failed validation", .errors.len())]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(field.into()).or_default().push(message.into());
    }

    pub fn require_text(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.push(field, format!("The {} field is required.", humanize(field)));
        }
    }

    pub fn require_min(&mut self, field: &str, value: u64, min: u64) {
        if value < min {
            self.push(field, format!("The {} field must be at least {min}.", humanize(field)));
        }
    }

    pub fn require_max(&mut self, field: &str, value: u64, max: u64) {
        if value > max {
            self.push(
                field,
                format!("The {} field must not be greater than {max}.", humanize(field)),
            );
        }
    }

    /// Reports a reference to something that does not exist (or is not reachable from here).
    pub fn require_known(&mut self, field: &str, known: bool) {
        if !known {
            self.push(field, format!("The selected {} is invalid.", humanize(field)));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// `tour_itineraries.0.start_time` -> `tour itineraries.0.start time`
fn humanize(field: &str) -> String {
    field.replace('_', " ")
}
