// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use super::ids::CatalogId;

/// The many-to-many relations edited alongside a tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssociationKind {
    Category,
    Tag,
    Item,
}

impl AssociationKind {
    pub const ALL: [Self; 3] = [Self::Category, Self::Tag, Self::Item];

    /// Wire field carrying the complete id list for this relation.
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Category => "tour_categories",
            Self::Tag => "tour_tags",
            Self::Item => "tour_items",
        }
    }
}

impl fmt::Display for AssociationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Category => "category",
            Self::Tag => "tag",
            Self::Item => "item",
        })
    }
}

/// Selected members of one relation plus the pool they are drawn from.
///
/// Selection keeps insertion order and never holds duplicates. The set is submitted whole:
/// the receiving side replaces the relation rather than diffing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssociationSet {
    pool: Vec<CatalogId>,
    selected: Vec<CatalogId>,
}

impl AssociationSet {
    pub fn new(pool: Vec<CatalogId>, selected: impl IntoIterator<Item = CatalogId>) -> Self {
        let mut set = Self { pool, selected: Vec::new() };
        for id in selected {
            if !set.selected.contains(&id) {
                set.selected.push(id);
            }
        }
        set
    }

    /// Adds `id` when it is in the pool and not yet selected.
    pub fn add(&mut self, id: CatalogId) -> bool {
        if !self.pool.contains(&id) || self.selected.contains(&id) {
            return false;
        }
        self.selected.push(id);
        true
    }

    pub fn remove(&mut self, id: CatalogId) -> bool {
        let before = self.selected.len();
        self.selected.retain(|selected| *selected != id);
        self.selected.len() != before
    }

    pub fn contains(&self, id: CatalogId) -> bool {
        self.selected.contains(&id)
    }

    pub fn selected(&self) -> &[CatalogId] {
        &self.selected
    }

    pub fn pool(&self) -> &[CatalogId] {
        &self.pool
    }

    /// `pool - selected`, in pool order.
    pub fn available(&self) -> Vec<CatalogId> {
        self.pool.iter().copied().filter(|id| !self.selected.contains(id)).collect()
    }
}
