// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence boundary for tour saves.
//!
//! The repository keeps tours, their itinerary and image rows and the stored image bytes in
//! memory. It is what the HTTP layer serves and what an edit session submits to in tests.

pub mod repository;

pub use repository::{GuideSubmitter, TourRepository};
