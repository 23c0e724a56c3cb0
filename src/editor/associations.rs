// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{AssociationKind, AssociationSet, Catalog, CatalogId, TourRecord};

/// Category, tag and included-item selections of one tour.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssociationEditor {
    categories: AssociationSet,
    tags: AssociationSet,
    items: AssociationSet,
}

impl AssociationEditor {
    /// Empty selections drawing from the catalog pools.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self::from_parts(catalog, |_| Vec::new())
    }

    pub fn from_record(catalog: &Catalog, record: &TourRecord) -> Self {
        Self::from_parts(catalog, |kind| {
            record.association(kind).iter().copied().map(CatalogId::new).collect()
        })
    }

    fn from_parts(catalog: &Catalog, selected: impl Fn(AssociationKind) -> Vec<CatalogId>) -> Self {
        let set = |kind: AssociationKind| AssociationSet::new(catalog.pool(kind), selected(kind));
        Self {
            categories: set(AssociationKind::Category),
            tags: set(AssociationKind::Tag),
            items: set(AssociationKind::Item),
        }
    }

    pub fn set(&self, kind: AssociationKind) -> &AssociationSet {
        match kind {
            AssociationKind::Category => &self.categories,
            AssociationKind::Tag => &self.tags,
            AssociationKind::Item => &self.items,
        }
    }

    fn set_mut(&mut self, kind: AssociationKind) -> &mut AssociationSet {
        match kind {
            AssociationKind::Category => &mut self.categories,
            AssociationKind::Tag => &mut self.tags,
            AssociationKind::Item => &mut self.items,
        }
    }

    pub fn add(&mut self, kind: AssociationKind, id: CatalogId) -> bool {
        self.set_mut(kind).add(id)
    }

    pub fn remove(&mut self, kind: AssociationKind, id: CatalogId) -> bool {
        self.set_mut(kind).remove(id)
    }

    pub fn selected(&self, kind: AssociationKind) -> &[CatalogId] {
        self.set(kind).selected()
    }

    pub fn available(&self, kind: AssociationKind) -> Vec<CatalogId> {
        self.set(kind).available()
    }
}
