// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use tracing::debug;

use super::associations::AssociationEditor;
use super::gallery::GalleryStore;
use super::itinerary::StepStore;
use crate::model::{Catalog, TourDetails, TourId, TourRecord};
use crate::sync::SubmissionTicket;

const FALLBACK_CAPTION_CONTEXT: &str = "tour";

/// One create-or-edit session for a tour.
///
/// Constructed when the editor opens and dropped (or [`EditSession::cancel`]led) when it
/// closes; nothing reaches the persistence boundary except through a submission.
#[derive(Debug, Clone)]
pub struct EditSession {
    tour_id: Option<TourId>,
    details: TourDetails,
    steps: StepStore,
    gallery: GalleryStore,
    associations: AssociationEditor,
    rev: u64,
    in_flight: Option<SubmissionTicket>,
}

impl EditSession {
    /// Create flow: one blank step, no images, nothing selected.
    pub fn new_tour(details: TourDetails, catalog: &Catalog) -> Self {
        Self {
            tour_id: None,
            details,
            steps: StepStore::new(),
            gallery: GalleryStore::default(),
            associations: AssociationEditor::from_catalog(catalog),
            rev: 0,
            in_flight: None,
        }
    }

    /// Edit flow, seeded from the canonical record.
    pub fn from_record(record: &TourRecord, catalog: &Catalog) -> Self {
        Self {
            tour_id: Some(TourId::new(record.id)),
            details: record.details.clone(),
            steps: StepStore::from_records(&record.itineraries),
            gallery: GalleryStore::from_records(&record.images),
            associations: AssociationEditor::from_record(catalog, record),
            rev: 0,
            in_flight: None,
        }
    }

    pub fn tour_id(&self) -> Option<TourId> {
        self.tour_id
    }

    pub(crate) fn set_tour_id(&mut self, tour_id: TourId) {
        self.tour_id = Some(tour_id);
    }

    pub fn details(&self) -> &TourDetails {
        &self.details
    }

    pub(crate) fn details_mut(&mut self) -> &mut TourDetails {
        &mut self.details
    }

    pub fn steps(&self) -> &StepStore {
        &self.steps
    }

    pub fn steps_mut(&mut self) -> &mut StepStore {
        &mut self.steps
    }

    pub fn gallery(&self) -> &GalleryStore {
        &self.gallery
    }

    pub fn gallery_mut(&mut self) -> &mut GalleryStore {
        &mut self.gallery
    }

    pub fn associations(&self) -> &AssociationEditor {
        &self.associations
    }

    pub fn associations_mut(&mut self) -> &mut AssociationEditor {
        &mut self.associations
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub(crate) fn bump_rev(&mut self) {
        self.rev = self.rev.saturating_add(1);
    }

    /// True while a submission is outstanding; the submit control stays disabled.
    pub fn is_processing(&self) -> bool {
        self.in_flight.is_some()
    }

    pub(crate) fn set_in_flight(&mut self, ticket: SubmissionTicket) {
        self.in_flight = Some(ticket);
    }

    pub(crate) fn take_in_flight(&mut self) -> Option<SubmissionTicket> {
        self.in_flight.take()
    }

    /// Caption prefix for new photos: the name of the tour's current location.
    pub fn caption_context<'a>(&self, catalog: &'a Catalog) -> &'a str {
        catalog.location_name(self.details.tour_location_id).unwrap_or(FALLBACK_CAPTION_CONTEXT)
    }

    /// Discards the session without contacting the persistence boundary.
    pub fn cancel(self) {
        debug!(
            tour_id = ?self.tour_id.map(TourId::get),
            pending_uploads = self.gallery.pending().len(),
            "edit session cancelled"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::EditSession;
    use crate::model::fixtures;
    use crate::model::{Catalog, ImageId, ItineraryId, TourId};

    #[test]
    fn new_tour_starts_blank() {
        let session = EditSession::new_tour(fixtures::details(), &Catalog::demo());
        assert_eq!(session.tour_id(), None);
        assert_eq!(session.steps().len(), 1);
        assert!(session.gallery().existing().is_empty());
        assert!(!session.is_processing());
        assert_eq!(session.rev(), 0);
    }

    #[test]
    fn from_record_loads_all_collections() {
        let session = EditSession::from_record(&fixtures::record(), &Catalog::demo());
        assert_eq!(session.tour_id(), Some(TourId::new(7)));
        assert_eq!(
            session.steps().steps().iter().map(|s| s.persisted_id()).collect::<Vec<_>>(),
            vec![Some(ItineraryId::new(11)), Some(ItineraryId::new(12))]
        );
        assert_eq!(session.gallery().kept_existing_ids(), vec![ImageId::new(21), ImageId::new(22)]);
    }

    #[test]
    fn caption_context_uses_location_name() {
        let catalog = Catalog::demo();
        let mut session = EditSession::from_record(&fixtures::record(), &catalog);
        assert_eq!(session.caption_context(&catalog), "Bali");

        session.details_mut().tour_location_id = 404;
        assert_eq!(session.caption_context(&catalog), "tour");
    }

    #[test]
    fn cancel_releases_previews() {
        let catalog = Catalog::demo();
        let mut session = EditSession::new_tour(fixtures::details(), &catalog);
        session.gallery_mut().add_files([fixtures::jpeg("a.jpg")], "Bali");
        let registry = session.gallery().previews().clone();
        assert_eq!(registry.live(), 1);

        session.cancel();
        assert_eq!(registry.live(), 0);
    }
}
