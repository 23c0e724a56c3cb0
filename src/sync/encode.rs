// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Submission payload encoding.
//!
//! The payload mirrors the tour form post: flattened details, the itinerary as
//! `tour_itineraries`, the kept image ids, new uploads and the three association arrays.
//! Local ids never appear on the wire.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::editor::{EditSession, StepStore};
use crate::model::{AssociationKind, ImageKind, PersistedId, TourDetails, ValidationErrors};

/// One itinerary entry as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ItineraryEntry {
    /// Server id, `null` for steps created in this session.
    #[serde(default)]
    pub id: Option<u64>,
    pub step_number: u32,
    pub start_time: String,
    pub activity: String,
    pub description: String,
}

/// A new image. Caption and order are derived server-side from its position.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NewImageUpload {
    pub file_name: String,
    /// Raw file bytes, base64 (standard alphabet).
    #[serde(with = "base64_bytes")]
    #[schemars(with = "String")]
    pub data: Arc<[u8]>,
}

impl NewImageUpload {
    pub fn kind(&self) -> Option<ImageKind> {
        ImageKind::from_file_name(&self.file_name)
    }
}

impl std::fmt::Debug for NewImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewImageUpload")
            .field("file_name", &self.file_name)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Body of a create (`id` absent) or update post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SubmissionPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(flatten)]
    pub details: TourDetails,
    #[serde(default)]
    pub tour_itineraries: Vec<ItineraryEntry>,
    #[serde(default)]
    pub existing_image_ids: Vec<u64>,
    #[serde(default)]
    pub tour_images: Vec<NewImageUpload>,
    pub tour_categories: Vec<u64>,
    pub tour_tags: Vec<u64>,
    pub tour_items: Vec<u64>,
}

impl SubmissionPayload {
    pub fn association(&self, kind: AssociationKind) -> &[u64] {
        match kind {
            AssociationKind::Category => &self.tour_categories,
            AssociationKind::Tag => &self.tour_tags,
            AssociationKind::Item => &self.tour_items,
        }
    }

    /// Itinerary entries without a server id, in submission order.
    pub fn new_step_count(&self) -> usize {
        self.tour_itineraries.iter().filter(|entry| entry.id.is_none()).count()
    }
}

/// Steps in display order, `step_number` taken from the store's dense order.
pub fn encode_steps(steps: &StepStore) -> Vec<ItineraryEntry> {
    steps
        .steps()
        .iter()
        .map(|step| ItineraryEntry {
            id: step.persisted_id().map(PersistedId::get),
            step_number: step.order(),
            start_time: step.start_time().to_owned(),
            activity: step.title().to_owned(),
            description: step.description().to_owned(),
        })
        .collect()
}

/// Serializes the current session state. Pending uploads keep sharing their buffers.
pub fn build_submission(session: &EditSession) -> SubmissionPayload {
    let gallery = session.gallery();
    let associations = session.associations();
    let ids = |kind: AssociationKind| {
        associations.selected(kind).iter().map(|id| id.get()).collect::<Vec<_>>()
    };

    SubmissionPayload {
        id: session.tour_id().map(PersistedId::get),
        details: session.details().clone(),
        tour_itineraries: encode_steps(session.steps()),
        existing_image_ids: gallery.kept_existing_ids().into_iter().map(PersistedId::get).collect(),
        tour_images: gallery
            .pending()
            .iter()
            .map(|image| NewImageUpload {
                file_name: image.binary().file_name().to_owned(),
                data: image.binary().shared_bytes(),
            })
            .collect(),
        tour_categories: ids(AssociationKind::Category),
        tour_tags: ids(AssociationKind::Tag),
        tour_items: ids(AssociationKind::Item),
    }
}

/// Form-level rules shared by the editor and the persistence boundary: detail bounds,
/// required itinerary fields and accepted image types.
pub fn validate_submission(payload: &SubmissionPayload) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    payload.details.validate_into(&mut errors);

    for (index, entry) in payload.tour_itineraries.iter().enumerate() {
        for (field, value) in [
            ("start_time", &entry.start_time),
            ("activity", &entry.activity),
            ("description", &entry.description),
        ] {
            errors.require_text(&format!("tour_itineraries.{index}.{field}"), value);
        }
    }

    for (index, upload) in payload.tour_images.iter().enumerate() {
        if upload.kind().is_none() {
            errors.push(
                format!("tour_images.{index}"),
                "The tour images field must be a file of type: jpg, jpeg, png.",
            );
        }
    }

    errors.into_result()
}

mod base64_bytes {
    use std::sync::Arc;

    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &Arc<[u8]>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Arc<[u8]>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded.as_bytes()).map(Arc::from).map_err(serde::de::Error::custom)
    }
}
