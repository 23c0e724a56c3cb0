// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tourdesk: guide-side tour editing core.
//!
//! An [`editor::EditSession`] holds the itinerary, the gallery and the association sets of one
//! tour. Edits arrive as [`ops::Op`] batches or direct store calls, a save is encoded by
//! [`sync`] and applied by a [`sync::Submitter`] (the in-memory [`store::TourRepository`] or
//! the HTTP surface in [`http`]), and the server's answer is reconciled back into the session.

pub mod config;
pub mod editor;
pub mod http;
pub mod model;
pub mod ops;
pub mod store;
pub mod sync;
