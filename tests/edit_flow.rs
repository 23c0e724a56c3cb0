// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use tourdesk::config::UploadLimits;
use tourdesk::editor::{Direction, EditSession};
use tourdesk::model::{AssociationKind, BinaryRef, CatalogId, GuideId, ImageId, StepPatch, TourId};
use tourdesk::ops::{apply_ops, ApplyError, AssocOp, EditRef, GalleryOp, Op, StepOp};
use tourdesk::store::{GuideSubmitter, TourRepository};
use tourdesk::sync::Reconciled;

const OWNER: GuideId = GuideId::new(1);

fn patch(start_time: &str, title: &str) -> StepPatch {
    StepPatch {
        start_time: Some(start_time.to_owned()),
        title: Some(title.to_owned()),
        description: Some(format!("{title} with the group")),
    }
}

fn stored_activities(repository: &TourRepository, tour_id: TourId) -> Vec<(u64, u32, String)> {
    repository
        .tour(tour_id)
        .expect("stored tour")
        .itineraries
        .iter()
        .map(|step| (step.id, step.step_number, step.activity.clone()))
        .collect()
}

#[test]
fn edit_save_and_reopen_keeps_order_and_identity() {
    let mut repository = TourRepository::demo(UploadLimits::default());
    let catalog = repository.catalog().clone();
    let record = repository.edit_snapshot(OWNER, TourId::new(1)).expect("snapshot");
    let mut session = EditSession::from_record(&record, &catalog);

    let added = apply_ops(&mut session, 0, &[Op::Step(StepOp::Add)]).expect("add step");
    let [EditRef::Step(new_step)] = added.delta.added[..] else {
        panic!("expected one added step, got {:?}", added.delta.added);
    };

    let caption_context = session.caption_context(&catalog).to_owned();
    let ops = [
        Op::Step(StepOp::Update {
            step_id: new_step,
            patch: patch("15:00", "Sunset at Tanah Lot"),
        }),
        Op::Step(StepOp::Move { index: 0, direction: Direction::Down }),
        Op::Gallery(GalleryOp::RemoveExisting { image_id: ImageId::new(1) }),
        Op::Gallery(GalleryOp::AddFiles {
            files: vec![BinaryRef::new("sunset.png", vec![0x89, 0x50, 0x4E, 0x47])],
            caption_context,
        }),
        Op::Assoc(AssocOp::Add { kind: AssociationKind::Category, id: CatalogId::new(5) }),
    ];
    let result = apply_ops(&mut session, added.new_rev, &ops).expect("edit batch");
    assert_eq!(result.applied, ops.len());
    assert_eq!(session.gallery().pending()[0].caption(), "Bali_2");

    let outcome =
        session.submit_with(&mut GuideSubmitter::new(&mut repository, OWNER)).expect("save");
    assert_eq!(outcome, Reconciled::Applied { steps: 1, images: 1 });
    assert!(!session.is_processing());

    assert_eq!(
        stored_activities(&repository, TourId::new(1)),
        vec![
            (2, 1, "Monkey Forest".to_owned()),
            (1, 2, "Hotel pickup".to_owned()),
            (3, 3, "Rice terrace lunch".to_owned()),
            (4, 4, "Sunset at Tanah Lot".to_owned()),
        ]
    );
    let stored = repository.tour(TourId::new(1)).expect("stored tour");
    assert_eq!(stored.images.iter().map(|image| image.id).collect::<Vec<_>>(), vec![2, 3]);
    assert_eq!(stored.images[1].image_caption, "Bali_2");
    assert!(stored.categories.contains(&5));

    let session_ids = session
        .steps()
        .steps()
        .iter()
        .map(|step| step.persisted_id().map(|id| id.get()))
        .collect::<Vec<_>>();
    assert_eq!(session_ids, vec![Some(2), Some(1), Some(3), Some(4)]);
    assert!(session.gallery().pending().is_empty());

    let reopened = EditSession::from_record(
        &repository.edit_snapshot(OWNER, TourId::new(1)).expect("snapshot"),
        &catalog,
    );
    let reopened_ids = reopened
        .steps()
        .steps()
        .iter()
        .map(|step| step.persisted_id().map(|id| id.get()))
        .collect::<Vec<_>>();
    assert_eq!(reopened_ids, session_ids);
    assert_eq!(reopened.gallery().kept_existing_ids(), session.gallery().kept_existing_ids());
}

#[test]
fn resubmitting_after_reconcile_creates_nothing_new() {
    let mut repository = TourRepository::demo(UploadLimits::default());
    let catalog = repository.catalog().clone();
    let record = repository.edit_snapshot(OWNER, TourId::new(1)).expect("snapshot");
    let mut session = EditSession::from_record(&record, &catalog);

    let step_id = session.steps_mut().add_step();
    session.steps_mut().update_step(step_id, &patch("17:00", "Dinner"));
    session.submit_with(&mut GuideSubmitter::new(&mut repository, OWNER)).expect("first save");
    let after_first = stored_activities(&repository, TourId::new(1));

    let outcome =
        session.submit_with(&mut GuideSubmitter::new(&mut repository, OWNER)).expect("resave");
    assert_eq!(outcome, Reconciled::Applied { steps: 0, images: 0 });
    assert_eq!(stored_activities(&repository, TourId::new(1)), after_first);
}

#[test]
fn stale_batches_are_refused_without_touching_the_session() {
    let repository = TourRepository::demo(UploadLimits::default());
    let record = repository.edit_snapshot(OWNER, TourId::new(1)).expect("snapshot");
    let mut session = EditSession::from_record(&record, repository.catalog());

    apply_ops(&mut session, 0, &[Op::Step(StepOp::Add)]).expect("first batch");
    let err = apply_ops(&mut session, 0, &[Op::Step(StepOp::Add)]).unwrap_err();
    assert_eq!(err, ApplyError::Conflict { base_rev: 0, current_rev: 1 });
    assert_eq!(session.steps().len(), 4);
}

#[test]
fn new_tour_is_created_and_adopts_server_ids() {
    let mut repository = TourRepository::demo(UploadLimits::default());
    let catalog = repository.catalog().clone();
    let details = repository.tour(TourId::new(1)).expect("demo tour").details.clone();
    let mut session = EditSession::new_tour(details, &catalog);
    assert_eq!(session.tour_id(), None);

    let first = session.steps().steps()[0].local_id();
    session.steps_mut().update_step(first, &patch("07:00", "Batur sunrise trek"));
    let guide = GuideId::new(7);
    let outcome =
        session.submit_with(&mut GuideSubmitter::new(&mut repository, guide)).expect("create");

    assert_eq!(outcome, Reconciled::Applied { steps: 1, images: 0 });
    let tour_id = session.tour_id().expect("tour id adopted");
    assert_eq!(tour_id, TourId::new(2));
    assert_eq!(
        stored_activities(&repository, tour_id),
        vec![(4, 1, "Batur sunrise trek".to_owned())]
    );
    assert_eq!(repository.tour(tour_id).expect("created").tour_guide_id, 7);
}

#[test]
fn saved_gallery_matches_stored_images() {
    let mut repository = TourRepository::demo(UploadLimits::default());
    let catalog = repository.catalog().clone();
    let record = repository.edit_snapshot(OWNER, TourId::new(1)).expect("snapshot");
    let mut session = EditSession::from_record(&record, &catalog);

    let caption_context = session.caption_context(&catalog).to_owned();
    session.gallery_mut().add_files([BinaryRef::new("n.jpg", vec![0xFF, 0xD8])], &caption_context);
    assert_eq!(session.gallery().pending()[0].caption(), "Bali_3");
    session.gallery_mut().remove_existing(ImageId::new(1));

    session.submit_with(&mut GuideSubmitter::new(&mut repository, OWNER)).expect("save");

    let in_session = session
        .gallery()
        .kept()
        .map(|image| (image.id().get(), image.caption().to_owned(), image.order()))
        .collect::<Vec<_>>();
    let stored = repository
        .tour(TourId::new(1))
        .expect("stored tour")
        .images
        .iter()
        .map(|image| (image.id, image.image_caption.clone(), image.image_order))
        .collect::<Vec<_>>();
    assert_eq!(in_session, stored);
    assert_eq!(stored[1], (3, "Bali_2".to_owned(), 2));
}
