//! Category toggles and the visibility they imply.

use std::collections::BTreeSet;

use crate::timeline::{Category, ItemRef, TimelineItem};

/// One on/off switch per [`Category`].
///
/// Stored as the set of enabled categories; a category missing from the
/// set is switched off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggles {
    enabled: BTreeSet<Category>,
}

impl Default for Toggles {
    fn default() -> Self {
        Self::all()
    }
}

impl Toggles {
    /// Every category enabled.
    pub fn all() -> Self {
        Self {
            enabled: Category::all().collect(),
        }
    }

    /// Every category disabled.
    pub fn none() -> Self {
        Self {
            enabled: BTreeSet::new(),
        }
    }

    pub fn is_enabled(&self, category: Category) -> bool {
        self.enabled.contains(&category)
    }

    pub fn set(&mut self, category: Category, on: bool) {
        if on {
            self.enabled.insert(category);
        } else {
            self.enabled.remove(&category);
        }
    }

    pub fn toggle(&mut self, category: Category) {
        let on = self.is_enabled(category);
        self.set(category, !on);
    }

    /// Builder form of [`Toggles::set`].
    pub fn with(mut self, category: Category, on: bool) -> Self {
        self.set(category, on);
        self
    }

    pub fn is_visible(&self, item: &TimelineItem) -> bool {
        self.is_enabled(item.category)
    }
}

/// Items whose category is enabled, in their original order.
pub fn visible_items<'a>(
    items: &'a [TimelineItem],
    toggles: &'a Toggles,
) -> impl Iterator<Item = &'a TimelineItem> + 'a {
    items.iter().filter(move |it| toggles.is_visible(it))
}

/// Ids of the visible items.
pub fn visible_ids(items: &[TimelineItem], toggles: &Toggles) -> BTreeSet<ItemRef> {
    visible_items(items, toggles).map(|it| it.id.clone()).collect()
}
