// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tour details and the canonical records held by the persistence boundary.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::association::AssociationKind;
use super::ids::CatalogId;
use super::validation::ValidationErrors;

pub const MIN_TOUR_PRICE: u64 = 10_000;
pub const MIN_TOUR_DURATION: u32 = 2;
pub const MAX_PARTICIPANTS_CAP: u32 = 10;
pub const MIN_PARTICIPANTS_FLOOR: u32 = 1;

/// Scalar tour fields edited next to the itinerary and gallery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TourDetails {
    pub name: String,
    pub tour_location_id: u64,
    pub tour_meeting_point_id: u64,
    pub tour_description: String,
    pub tour_price: u64,
    pub tour_duration: u32,
    pub tour_start_time: String,
    pub tour_period_id: u64,
    pub tour_max_participants: u32,
    pub tour_min_participants: u32,
    pub featured: bool,
}

impl TourDetails {
    pub fn validate_into(&self, errors: &mut ValidationErrors) {
        errors.require_text("name", &self.name);
        errors.require_text("tour_description", &self.tour_description);
        errors.require_text("tour_start_time", &self.tour_start_time);
        errors.require_min("tour_price", self.tour_price, MIN_TOUR_PRICE);
        errors.require_min("tour_duration", self.tour_duration.into(), MIN_TOUR_DURATION.into());
        errors.require_max(
            "tour_max_participants",
            self.tour_max_participants.into(),
            MAX_PARTICIPANTS_CAP.into(),
        );
        errors.require_min(
            "tour_min_participants",
            self.tour_min_participants.into(),
            MIN_PARTICIPANTS_FLOOR.into(),
        );
        if self.tour_min_participants > self.tour_max_participants {
            errors.push(
                "tour_min_participants",
                "The tour min participants field must not exceed tour max participants.",
            );
        }
    }
}

/// Partial update of [`TourDetails`]; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailsPatch {
    pub name: Option<String>,
    pub tour_location_id: Option<u64>,
    pub tour_meeting_point_id: Option<u64>,
    pub tour_description: Option<String>,
    pub tour_price: Option<u64>,
    pub tour_duration: Option<u32>,
    pub tour_start_time: Option<String>,
    pub tour_period_id: Option<u64>,
    pub tour_max_participants: Option<u32>,
    pub tour_min_participants: Option<u32>,
    pub featured: Option<bool>,
}

impl DetailsPatch {
    pub(crate) fn apply(&self, details: &mut TourDetails) -> bool {
        let mut changed = false;
        macro_rules! merge {
            ($($field:ident),* $(,)?) => {
                $(
                    if let Some(value) = &self.$field {
                        if details.$field != *value {
                            details.$field = value.clone();
                            changed = true;
                        }
                    }
                )*
            };
        }
        merge!(
            name,
            tour_location_id,
            tour_meeting_point_id,
            tour_description,
            tour_price,
            tour_duration,
            tour_start_time,
            tour_period_id,
            tour_max_participants,
            tour_min_participants,
            featured,
        );
        changed
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TourStatus {
    #[default]
    Draft,
    Published,
    /// Withdrawn by the guide; set together with [`TourRecord::deleted`].
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ItineraryRecord {
    pub id: u64,
    pub step_number: u32,
    pub start_time: String,
    pub activity: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TourImageRecord {
    pub id: u64,
    pub image_path: String,
    pub image_order: u32,
    pub image_caption: String,
}

/// A tour as stored by the persistence boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TourRecord {
    pub id: u64,
    pub tour_guide_id: u64,
    pub tour_status: TourStatus,
    /// Soft-deleted: hidden from listings but still editable and restorable by its guide.
    #[serde(default)]
    pub deleted: bool,
    #[serde(flatten)]
    pub details: TourDetails,
    pub itineraries: Vec<ItineraryRecord>,
    pub images: Vec<TourImageRecord>,
    pub categories: Vec<u64>,
    pub tags: Vec<u64>,
    pub items: Vec<u64>,
}

impl TourRecord {
    pub fn association(&self, kind: AssociationKind) -> &[u64] {
        match kind {
            AssociationKind::Category => &self.categories,
            AssociationKind::Tag => &self.tags,
            AssociationKind::Item => &self.items,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogEntry {
    pub id: u64,
    pub name: String,
}

impl CatalogEntry {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

/// Reference data a tour points at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Catalog {
    pub locations: Vec<CatalogEntry>,
    pub meeting_points: Vec<CatalogEntry>,
    pub day_phases: Vec<CatalogEntry>,
    pub categories: Vec<CatalogEntry>,
    pub tags: Vec<CatalogEntry>,
    pub items: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn entries(&self, kind: AssociationKind) -> &[CatalogEntry] {
        match kind {
            AssociationKind::Category => &self.categories,
            AssociationKind::Tag => &self.tags,
            AssociationKind::Item => &self.items,
        }
    }

    /// Candidate pool for an association, in catalog order.
    pub fn pool(&self, kind: AssociationKind) -> Vec<CatalogId> {
        self.entries(kind).iter().map(|entry| CatalogId::new(entry.id)).collect()
    }

    pub fn location_name(&self, location_id: u64) -> Option<&str> {
        find_name(&self.locations, location_id)
    }

    pub fn has_meeting_point(&self, id: u64) -> bool {
        find_name(&self.meeting_points, id).is_some()
    }

    pub fn has_day_phase(&self, id: u64) -> bool {
        find_name(&self.day_phases, id).is_some()
    }

    pub fn contains(&self, kind: AssociationKind, id: u64) -> bool {
        find_name(self.entries(kind), id).is_some()
    }

    /// A small catalog used by `--demo` and tests.
    pub fn demo() -> Self {
        let entries = |names: &[&str]| {
            names
                .iter()
                .zip(1u64..)
                .map(|(name, id)| CatalogEntry::new(id, *name))
                .collect::<Vec<_>>()
        };
        Self {
            locations: entries(&["Bali", "Jakarta", "Lombok", "Yogyakarta"]),
            meeting_points: entries(&["Hotel Lobby", "Old Town Square", "Harbour Gate"]),
            day_phases: entries(&["Morning", "Afternoon", "Evening"]),
            categories: entries(&["City", "Culture", "Beach", "Nature", "Food"]),
            tags: entries(&["Family", "Photography", "Hiking", "History"]),
            items: entries(&["Guide", "Water", "Lunch", "Transport", "Tickets"]),
        }
    }
}

fn find_name(entries: &[CatalogEntry], id: u64) -> Option<&str> {
    entries.iter().find(|entry| entry.id == id).map(|entry| entry.name.as_str())
}

#[cfg(test)]
mod tests {
    use super::{Catalog, DetailsPatch, TourDetails};
    use crate::model::ValidationErrors;

    fn valid_details() -> TourDetails {
        TourDetails {
            name: "Ubud Highlands".to_owned(),
            tour_location_id: 1,
            tour_meeting_point_id: 1,
            tour_description: "Rice terraces and temples".to_owned(),
            tour_price: 850_000,
            tour_duration: 6,
            tour_start_time: "08:00".to_owned(),
            tour_period_id: 1,
            tour_max_participants: 8,
            tour_min_participants: 2,
            featured: false,
        }
    }

    #[test]
    fn valid_details_pass() {
        let mut errors = ValidationErrors::new();
        valid_details().validate_into(&mut errors);
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn details_bounds_follow_listing_rules() {
        let details = TourDetails {
            tour_price: 5_000,
            tour_duration: 1,
            tour_max_participants: 12,
            tour_min_participants: 0,
            ..valid_details()
        };
        let mut errors = ValidationErrors::new();
        details.validate_into(&mut errors);
        let fields =
            ["tour_price", "tour_duration", "tour_max_participants", "tour_min_participants"];
        for field in fields {
            assert!(errors.contains(field), "missing error for {field}");
        }
    }

    #[test]
    fn min_participants_cannot_exceed_max() {
        let details =
            TourDetails { tour_max_participants: 3, tour_min_participants: 4, ..valid_details() };
        let mut errors = ValidationErrors::new();
        details.validate_into(&mut errors);
        assert!(errors.contains("tour_min_participants"));
    }

    #[test]
    fn patch_reports_only_real_changes() {
        let mut details = valid_details();
        let same = DetailsPatch { tour_price: Some(850_000), ..DetailsPatch::default() };
        assert!(!same.apply(&mut details));

        let changed = DetailsPatch { featured: Some(true), ..DetailsPatch::default() };
        assert!(changed.apply(&mut details));
        assert!(details.featured);
    }

    #[test]
    fn demo_catalog_resolves_location_names() {
        let catalog = Catalog::demo();
        assert_eq!(catalog.location_name(1), Some("Bali"));
        assert_eq!(catalog.location_name(99), None);
    }
}
