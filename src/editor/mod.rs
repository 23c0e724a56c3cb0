// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Client-side editing state: itinerary, gallery and association stores bundled into an
//! [`EditSession`].

pub mod associations;
pub mod gallery;
pub mod itinerary;
pub mod session;

pub use associations::AssociationEditor;
pub use gallery::GalleryStore;
pub use itinerary::{Direction, StepStore};
pub use session::EditSession;
