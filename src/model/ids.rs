// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::marker::PhantomData;

/// A client-session identity for an object that may not exist server-side yet.
///
/// Local ids are handed out by a [`LocalIdAssigner`] and never leave the editing session: they
/// do not appear in submission payloads and are unrelated to the object's position or to its
/// [`PersistedId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalId<T> {
    value: u64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> LocalId<T> {
    pub fn get(self) -> u64 {
        self.value
    }
}

impl<T> fmt::Display for LocalId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "local:{}", self.value)
    }
}

/// Monotonic per-session source of [`LocalId`]s. Ids are never reused.
#[derive(Debug, Clone)]
pub struct LocalIdAssigner<T> {
    next: u64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Default for LocalIdAssigner<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LocalIdAssigner<T> {
    pub fn new() -> Self {
        Self { next: 1, _marker: PhantomData }
    }

    pub fn assign(&mut self) -> LocalId<T> {
        let value = self.next;
        self.next = self.next.saturating_add(1);
        LocalId { value, _marker: PhantomData }
    }
}

/// A server-assigned identity (database key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PersistedId<T> {
    value: u64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> PersistedId<T> {
    pub const fn new(value: u64) -> Self {
        Self { value, _marker: PhantomData }
    }

    pub const fn get(self) -> u64 {
        self.value
    }
}

impl<T> fmt::Display for PersistedId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<u64> for PersistedId<T> {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StepTag {}
pub type LocalStepId = LocalId<StepTag>;
pub type ItineraryId = PersistedId<StepTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ImageTag {}
pub type LocalImageId = LocalId<ImageTag>;
pub type ImageId = PersistedId<ImageTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TourTag {}
pub type TourId = PersistedId<TourTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GuideTag {}
pub type GuideId = PersistedId<GuideTag>;

/// Any catalog entry: location, meeting point, day phase, category, tag or item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CatalogTag {}
pub type CatalogId = PersistedId<CatalogTag>;
