//! Working tag set for the item under construction.

use cataloger_inventory::{Tag, TagSet};

use crate::error::EntryError;

/// Tag chips the user has added to the draft so far.
#[derive(Debug, Clone, Default)]
pub struct TagEditor {
    tags: TagSet,
    max_tags: Option<usize>,
}

impl TagEditor {
    pub fn new(max_tags: Option<usize>) -> Self {
        Self {
            tags: TagSet::new(),
            max_tags,
        }
    }

    /// Add the tag typed as `raw`.
    ///
    /// Blank input is ignored (`Ok(None)`). A tag equal to an existing one ignoring case
    /// is refused with [`EntryError::DuplicateTag`] and leaves the set untouched.
    pub fn add(&mut self, raw: &str) -> Result<Option<Tag>, EntryError> {
        let Ok(tag) = Tag::new(raw) else {
            return Ok(None);
        };
        if self.tags.contains(&tag) {
            return Err(EntryError::DuplicateTag(tag.to_string()));
        }
        if let Some(max) = self.max_tags {
            if self.tags.len() >= max {
                return Err(EntryError::TagLimit(max));
            }
        }
        self.tags.insert(tag.clone());
        Ok(Some(tag))
    }

    /// Remove the tag named `raw`. Absent tags are not an error.
    pub fn remove(&mut self, raw: &str) -> bool {
        match Tag::new(raw) {
            Ok(tag) => self.tags.remove(&tag),
            Err(_) => false,
        }
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// Current tags, in the order they were added.
    pub fn snapshot(&self) -> TagSet {
        self.tags.clone()
    }
}
