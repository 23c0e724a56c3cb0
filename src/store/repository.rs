// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! In-memory tour repository.
//!
//! Applies whole-tour saves the way the guide listing forms expect: details replaced,
//! associations replace-synced, images kept by id list, itinerary upserted by position.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::UploadLimits;
use crate::model::{
    AssociationKind, Catalog, GuideId, ImageKind, ItineraryRecord, TourDetails, TourId,
    TourImageRecord, TourRecord, TourStatus, ValidationErrors,
};
use crate::sync::{
    validate_submission, CreatedImage, NewImageUpload, SubmissionPayload, SubmissionReceipt,
    SubmissionRejected, Submitter,
};

const IMAGE_DIR: &str = "tour_images";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SaveMode {
    Create,
    Update,
}

#[derive(Debug, Clone)]
pub struct TourRepository {
    catalog: Catalog,
    tours: BTreeMap<u64, TourRecord>,
    blobs: BTreeMap<String, Arc<[u8]>>,
    limits: UploadLimits,
    next_tour_id: u64,
    next_itinerary_id: u64,
    next_image_id: u64,
}

impl TourRepository {
    pub fn new(catalog: Catalog, limits: UploadLimits) -> Self {
        Self {
            catalog,
            tours: BTreeMap::new(),
            blobs: BTreeMap::new(),
            limits,
            next_tour_id: 1,
            next_itinerary_id: 1,
            next_image_id: 1,
        }
    }

    /// Demo catalog plus one published tour owned by guide 1.
    pub fn demo(limits: UploadLimits) -> Self {
        let mut repository = Self::new(Catalog::demo(), limits);
        let tour_id = repository.allocate_tour_id();
        let itineraries = [
            ("08:00", "Hotel pickup", "Meet at the lobby and drive up to Ubud"),
            ("09:30", "Monkey Forest", "Walk through the sanctuary"),
            ("12:00", "Rice terrace lunch", "Lunch overlooking Tegallalang"),
        ]
        .into_iter()
        .zip(1u32..)
        .map(|((start_time, activity, description), step_number)| ItineraryRecord {
            id: repository.allocate_itinerary_id(),
            step_number,
            start_time: start_time.to_owned(),
            activity: activity.to_owned(),
            description: description.to_owned(),
        })
        .collect::<Vec<_>>();
        let images = (1u32..=2)
            .map(|order| {
                let id = repository.allocate_image_id();
                let image_path = format!("{IMAGE_DIR}/{id}.jpg");
                repository.blobs.insert(image_path.clone(), Arc::from(&b"\xFF\xD8\xFF"[..]));
                TourImageRecord {
                    id,
                    image_path,
                    image_order: order,
                    image_caption: format!("Bali_{order}"),
                }
            })
            .collect::<Vec<_>>();

        repository.tours.insert(
            tour_id,
            TourRecord {
                id: tour_id,
                tour_guide_id: 1,
                tour_status: TourStatus::Published,
                deleted: false,
                details: TourDetails {
                    name: "Ubud Highlands Cultural Trip".to_owned(),
                    tour_location_id: 1,
                    tour_meeting_point_id: 1,
                    tour_description: "Temples, forest and rice terraces in one day.".to_owned(),
                    tour_price: 1_100_000,
                    tour_duration: 8,
                    tour_start_time: "08:00".to_owned(),
                    tour_period_id: 1,
                    tour_max_participants: 8,
                    tour_min_participants: 2,
                    featured: true,
                },
                itineraries,
                images,
                categories: vec![2, 4],
                tags: vec![2, 3],
                items: vec![1, 2, 3],
            },
        );
        repository
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn limits(&self) -> UploadLimits {
        self.limits
    }

    pub fn tour(&self, tour_id: TourId) -> Option<&TourRecord> {
        self.tours.get(&tour_id.get())
    }

    pub fn tours(&self) -> impl Iterator<Item = &TourRecord> {
        self.tours.values()
    }

    /// Stored bytes for an `image_path`.
    pub fn blob(&self, image_path: &str) -> Option<&[u8]> {
        self.blobs.get(image_path).map(|bytes| &bytes[..])
    }

    pub fn blob_count(&self) -> usize {
        self.blobs.len()
    }

    /// The record a guide's edit session starts from.
    pub fn edit_snapshot(
        &self,
        guide: GuideId,
        tour_id: TourId,
    ) -> Result<TourRecord, SubmissionRejected> {
        let record = self.owned_tour(guide, tour_id)?;
        Ok(record.clone())
    }

    pub fn create_tour(
        &mut self,
        guide: GuideId,
        payload: &SubmissionPayload,
    ) -> Result<SubmissionReceipt, SubmissionRejected> {
        let mut errors = self.form_errors(payload, SaveMode::Create);
        for (index, entry) in payload.tour_itineraries.iter().enumerate() {
            if entry.id.is_some() {
                errors.require_known(&format!("tour_itineraries.{index}.id"), false);
            }
        }
        errors.into_result().map_err(SubmissionRejected::validation)?;

        let tour_id = self.allocate_tour_id();
        let mut record = TourRecord {
            id: tour_id,
            tour_guide_id: guide.get(),
            tour_status: TourStatus::Draft,
            deleted: false,
            details: payload.details.clone(),
            itineraries: Vec::new(),
            images: Vec::new(),
            categories: Vec::new(),
            tags: Vec::new(),
            items: Vec::new(),
        };
        sync_associations(&mut record, payload);
        let created_images = self.append_images(&mut record, &payload.tour_images);
        let created_step_ids = self.upsert_itinerary(&mut record, payload);
        self.tours.insert(tour_id, record);

        info!(
            tour_id,
            guide_id = guide.get(),
            steps = created_step_ids.len(),
            images = created_images.len(),
            "tour created"
        );
        Ok(SubmissionReceipt { tour_id, created_step_ids, created_images })
    }

    pub fn update_tour(
        &mut self,
        guide: GuideId,
        payload: &SubmissionPayload,
    ) -> Result<SubmissionReceipt, SubmissionRejected> {
        let mut errors = self.form_errors(payload, SaveMode::Update);
        let Some(raw_id) = payload.id else {
            errors.push("id", "The id field is required.");
            return Err(SubmissionRejected::validation(errors));
        };
        errors.into_result().map_err(SubmissionRejected::validation)?;

        let tour_id = TourId::new(raw_id);
        let current = self.owned_tour(guide, tour_id)?;

        let mut errors = ValidationErrors::new();
        let step_ids = current.itineraries.iter().map(|step| step.id).collect::<BTreeSet<_>>();
        for (index, entry) in payload.tour_itineraries.iter().enumerate() {
            if let Some(id) = entry.id {
                errors.require_known(
                    &format!("tour_itineraries.{index}.id"),
                    step_ids.contains(&id),
                );
            }
        }
        let image_ids = current.images.iter().map(|image| image.id).collect::<BTreeSet<_>>();
        for (index, id) in payload.existing_image_ids.iter().enumerate() {
            errors.require_known(&format!("existing_image_ids.{index}"), image_ids.contains(id));
        }
        errors.into_result().map_err(SubmissionRejected::validation)?;

        let mut record = current.clone();
        record.details = payload.details.clone();
        sync_associations(&mut record, payload);

        let (kept, dropped): (Vec<_>, Vec<_>) = record
            .images
            .drain(..)
            .partition(|image| payload.existing_image_ids.contains(&image.id));
        for image in &dropped {
            self.blobs.remove(&image.image_path);
        }
        record.images = kept;
        let created_images = self.append_images(&mut record, &payload.tour_images);
        let created_step_ids = self.upsert_itinerary(&mut record, payload);
        self.tours.insert(raw_id, record);

        info!(
            tour_id = raw_id,
            guide_id = guide.get(),
            deleted_images = dropped.len(),
            created_steps = created_step_ids.len(),
            created_images = created_images.len(),
            "tour updated"
        );
        Ok(SubmissionReceipt { tour_id: raw_id, created_step_ids, created_images })
    }

    /// Every tour of `guide` in id order, soft-deleted ones included.
    pub fn guide_tours(&self, guide: GuideId) -> Vec<TourRecord> {
        self.tours.values().filter(|record| record.tour_guide_id == guide.get()).cloned().collect()
    }

    /// Disables the tour and moves it to the trash. An already trashed tour is not found.
    pub fn soft_delete(
        &mut self,
        guide: GuideId,
        tour_id: TourId,
    ) -> Result<(), SubmissionRejected> {
        if self.owned_tour(guide, tour_id)?.deleted {
            return Err(SubmissionRejected::not_found(format!("tour {tour_id} not found")));
        }
        if let Some(record) = self.tours.get_mut(&tour_id.get()) {
            record.tour_status = TourStatus::Disabled;
            record.deleted = true;
        }
        info!(tour_id = tour_id.get(), guide_id = guide.get(), "tour disabled");
        Ok(())
    }

    /// Takes the tour out of the trash and publishes it again.
    pub fn restore(&mut self, guide: GuideId, tour_id: TourId) -> Result<(), SubmissionRejected> {
        self.owned_tour(guide, tour_id)?;
        if let Some(record) = self.tours.get_mut(&tour_id.get()) {
            record.tour_status = TourStatus::Published;
            record.deleted = false;
        }
        info!(tour_id = tour_id.get(), guide_id = guide.get(), "tour restored");
        Ok(())
    }

    fn owned_tour(
        &self,
        guide: GuideId,
        tour_id: TourId,
    ) -> Result<&TourRecord, SubmissionRejected> {
        let record = self
            .tours
            .get(&tour_id.get())
            .ok_or_else(|| SubmissionRejected::not_found(format!("tour {tour_id} not found")))?;
        if record.tour_guide_id != guide.get() {
            debug!(tour_id = tour_id.get(), guide_id = guide.get(), "tour owned by another guide");
            return Err(SubmissionRejected::forbidden("Unauthorized"));
        }
        Ok(record)
    }

    /// Rules that need no stored tour: form rules, catalog references and upload sizes.
    fn form_errors(&self, payload: &SubmissionPayload, mode: SaveMode) -> ValidationErrors {
        let mut errors = validate_submission(payload).err().unwrap_or_default();
        let details = &payload.details;
        errors.require_known(
            "tour_location_id",
            self.catalog.location_name(details.tour_location_id).is_some(),
        );
        errors.require_known(
            "tour_meeting_point_id",
            self.catalog.has_meeting_point(details.tour_meeting_point_id),
        );
        errors.require_known("tour_period_id", self.catalog.has_day_phase(details.tour_period_id));

        for kind in AssociationKind::ALL {
            for (index, id) in payload.association(kind).iter().enumerate() {
                errors.require_known(
                    &format!("{}.{index}", kind.field_name()),
                    self.catalog.contains(kind, *id),
                );
            }
        }

        let limit_kib = match mode {
            SaveMode::Create => self.limits.create_kib,
            SaveMode::Update => self.limits.update_kib,
        };
        for (index, upload) in payload.tour_images.iter().enumerate() {
            if upload.data.len() > limit_kib.saturating_mul(1024) {
                errors.push(
                    format!("tour_images.{index}"),
                    format!(
                        "The tour images field must not be greater than {limit_kib} kilobytes."
                    ),
                );
            }
        }
        errors
    }

    /// Appends uploads after the kept images: order continues from `kept + 1`, caption is
    /// `<location name>_<order>`.
    fn append_images(
        &mut self,
        record: &mut TourRecord,
        uploads: &[NewImageUpload],
    ) -> Vec<CreatedImage> {
        let location = self
            .catalog
            .location_name(record.details.tour_location_id)
            .unwrap_or("tour")
            .to_owned();
        let mut image_order = u32::try_from(record.images.len()).unwrap_or(u32::MAX);
        let mut created = Vec::with_capacity(uploads.len());

        for upload in uploads {
            image_order = image_order.saturating_add(1);
            let id = self.allocate_image_id();
            let extension = upload.kind().map_or("bin", ImageKind::extension);
            let image_path = format!("{IMAGE_DIR}/{id}.{extension}");
            let image_caption = format!("{location}_{image_order}");
            self.blobs.insert(image_path.clone(), Arc::clone(&upload.data));
            record.images.push(TourImageRecord {
                id,
                image_path: image_path.clone(),
                image_order,
                image_caption: image_caption.clone(),
            });
            created.push(CreatedImage { id, image_path, image_order, image_caption });
        }
        created
    }

    /// Upserts the submitted itinerary with `step_number = index + 1` and drops persisted steps
    /// that are no longer listed. An empty list leaves the itinerary as it was.
    fn upsert_itinerary(
        &mut self,
        record: &mut TourRecord,
        payload: &SubmissionPayload,
    ) -> Vec<u64> {
        if payload.tour_itineraries.is_empty() {
            return Vec::new();
        }

        let mut previous = std::mem::take(&mut record.itineraries)
            .into_iter()
            .map(|step| (step.id, step))
            .collect::<BTreeMap<_, _>>();
        let mut created = Vec::new();

        for (entry, step_number) in payload.tour_itineraries.iter().zip(1u32..) {
            let id = match entry.id.and_then(|id| previous.remove(&id)) {
                Some(existing) => existing.id,
                None => {
                    let id = self.allocate_itinerary_id();
                    created.push(id);
                    id
                }
            };
            record.itineraries.push(ItineraryRecord {
                id,
                step_number,
                start_time: entry.start_time.clone(),
                activity: entry.activity.clone(),
                description: entry.description.clone(),
            });
        }
        created
    }

    fn allocate_tour_id(&mut self) -> u64 {
        let id = self.next_tour_id;
        self.next_tour_id += 1;
        id
    }

    fn allocate_itinerary_id(&mut self) -> u64 {
        let id = self.next_itinerary_id;
        self.next_itinerary_id += 1;
        id
    }

    fn allocate_image_id(&mut self) -> u64 {
        let id = self.next_image_id;
        self.next_image_id += 1;
        id
    }
}

/// Replace-sync: the submitted arrays become the complete association lists.
fn sync_associations(record: &mut TourRecord, payload: &SubmissionPayload) {
    let dedup = |ids: &[u64]| {
        let mut seen = BTreeSet::new();
        ids.iter().copied().filter(|id| seen.insert(*id)).collect::<Vec<_>>()
    };
    record.categories = dedup(&payload.tour_categories);
    record.tags = dedup(&payload.tour_tags);
    record.items = dedup(&payload.tour_items);
}

/// A repository bound to the signed-in guide.
#[derive(Debug)]
pub struct GuideSubmitter<'a> {
    repository: &'a mut TourRepository,
    guide: GuideId,
}

impl<'a> GuideSubmitter<'a> {
    pub fn new(repository: &'a mut TourRepository, guide: GuideId) -> Self {
        Self { repository, guide }
    }
}

impl Submitter for GuideSubmitter<'_> {
    fn submit(
        &mut self,
        payload: &SubmissionPayload,
    ) -> Result<SubmissionReceipt, SubmissionRejected> {
        match payload.id {
            Some(_) => self.repository.update_tour(self.guide, payload),
            None => self.repository.create_tour(self.guide, payload),
        }
    }
}
