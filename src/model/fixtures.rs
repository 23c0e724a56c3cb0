// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::attachment::BinaryRef;
use super::tour::{ItineraryRecord, TourDetails, TourImageRecord, TourRecord, TourStatus};

pub(crate) fn details() -> TourDetails {
    TourDetails {
        name: "Ubud Highlands Cultural Trip".to_owned(),
        tour_location_id: 1,
        tour_meeting_point_id: 2,
        tour_description: "A trip to the cultural heart of Bali.".to_owned(),
        tour_price: 1_100_000,
        tour_duration: 8,
        tour_start_time: "09:00".to_owned(),
        tour_period_id: 1,
        tour_max_participants: 8,
        tour_min_participants: 2,
        featured: false,
    }
}

pub(crate) fn itinerary(id: u64, step_number: u32, activity: &str) -> ItineraryRecord {
    ItineraryRecord {
        id,
        step_number,
        start_time: format!("{:02}:00", 8 + step_number),
        activity: activity.to_owned(),
        description: format!("{activity} with the group"),
    }
}

pub(crate) fn image(id: u64, order: u32) -> TourImageRecord {
    TourImageRecord {
        id,
        image_path: format!("tour_images/{id}.jpg"),
        image_order: order,
        image_caption: format!("Bali_{order}"),
    }
}

/// Tour 7 owned by guide 3: two steps (ids 11, 12), two images (ids 21, 22), categories
/// `[2, 5]`, tags `[1]`, items `[1, 2]`.
pub(crate) fn record() -> TourRecord {
    TourRecord {
        id: 7,
        tour_guide_id: 3,
        tour_status: TourStatus::Published,
        deleted: false,
        details: details(),
        itineraries: vec![itinerary(11, 1, "Monkey Forest"), itinerary(12, 2, "Rice Terrace")],
        images: vec![image(21, 1), image(22, 2)],
        categories: vec![2, 5],
        tags: vec![1],
        items: vec![1, 2],
    }
}

pub(crate) fn jpeg(name: &str) -> BinaryRef {
    BinaryRef::new(name, vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10])
}
