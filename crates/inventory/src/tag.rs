use core::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use cataloger_core::{DomainError, DomainResult, ValueObject};

/// A user-supplied label attached to an item.
///
/// The text is stored trimmed and as typed; comparison and hashing use the case-folded
/// form, so `"Wood"` and `"WOOD"` are the same tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tag {
    text: String,
    folded: String,
}

impl ValueObject for Tag {}

impl Tag {
    pub fn new(raw: impl AsRef<str>) -> DomainResult<Self> {
        let text = raw.as_ref().trim();
        if text.is_empty() {
            return Err(DomainError::validation("tag cannot be empty"));
        }
        Ok(Self {
            text: text.to_string(),
            folded: text.to_lowercase(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether `other` names this tag (case-insensitive, surrounding whitespace ignored).
    pub fn matches(&self, other: &str) -> bool {
        self.folded == other.trim().to_lowercase()
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.folded == other.folded
    }
}

impl Eq for Tag {}

impl Hash for Tag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.folded.hash(state);
    }
}

impl core::fmt::Display for Tag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.text)
    }
}

impl TryFrom<String> for Tag {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Tag::new(value)
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        tag.text
    }
}

/// Insertion-ordered set of tags.
///
/// Invariant: no two members are equal (case-insensitively).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Tag>", into = "Vec<Tag>")]
pub struct TagSet {
    tags: Vec<Tag>,
}

impl ValueObject for TagSet {}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `tag` unless an equal tag is already present. Returns whether it was added.
    pub fn insert(&mut self, tag: Tag) -> bool {
        if self.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Remove the tag equal to `tag`, if any. Returns whether something was removed.
    pub fn remove(&mut self, tag: &Tag) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    pub fn contains(&self, tag: &Tag) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Tag> {
        self.tags.iter()
    }

    pub fn as_slice(&self) -> &[Tag] {
        &self.tags
    }
}

impl TryFrom<Vec<Tag>> for TagSet {
    type Error = DomainError;

    fn try_from(tags: Vec<Tag>) -> Result<Self, Self::Error> {
        let mut set = TagSet::new();
        for tag in tags {
            let text = tag.to_string();
            if !set.insert(tag) {
                return Err(DomainError::invariant(format!("duplicate tag: {text}")));
            }
        }
        Ok(set)
    }
}

impl From<TagSet> for Vec<Tag> {
    fn from(set: TagSet) -> Self {
        set.tags
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a Tag;
    type IntoIter = core::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(s: &str) -> Tag {
        Tag::new(s).unwrap()
    }

    #[test]
    fn tag_is_trimmed_and_keeps_case() {
        let t = tag("  Lighting ");
        assert_eq!(t.as_str(), "Lighting");
        assert!(t.matches("lighting"));
    }

    #[test]
    fn blank_tag_is_rejected() {
        assert!(Tag::new("   ").is_err());
        assert!(Tag::new("").is_err());
    }

    #[test]
    fn tags_compare_case_insensitively() {
        assert_eq!(tag("wood"), tag("WOOD"));
        assert_ne!(tag("wood"), tag("woods"));
    }

    #[test]
    fn set_keeps_insertion_order_and_rejects_duplicates() {
        let mut set = TagSet::new();
        assert!(set.insert(tag("Lighting")));
        assert!(set.insert(tag("office")));
        assert!(!set.insert(tag("LIGHTING")));

        let texts: Vec<&str> = set.iter().map(Tag::as_str).collect();
        assert_eq!(texts, vec!["Lighting", "office"]);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut set = TagSet::new();
        set.insert(tag("wood"));
        assert!(set.remove(&tag("Wood")));
        assert!(!set.remove(&tag("wood")));
        assert!(set.is_empty());
    }

    #[test]
    fn deserializing_duplicates_fails() {
        let err = serde_json::from_str::<TagSet>(r#"["a","A"]"#).unwrap_err();
        assert!(err.to_string().contains("duplicate tag"));

        let ok: TagSet = serde_json::from_str(r#"["a","b"]"#).unwrap();
        assert_eq!(ok.len(), 2);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: no sequence of inserts leaves two case-folded-equal members.
            #[test]
            fn members_stay_unique(raw in prop::collection::vec("[a-cA-C]{1,2}", 0..30)) {
                let mut set = TagSet::new();
                for r in &raw {
                    set.insert(Tag::new(r).unwrap());
                }
                let folded: Vec<String> = set.iter().map(|t| t.as_str().to_lowercase()).collect();
                let mut deduped = folded.clone();
                deduped.sort();
                deduped.dedup();
                prop_assert_eq!(folded.len(), deduped.len());
            }
        }
    }
}
