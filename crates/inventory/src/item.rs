use serde::{Deserialize, Serialize};

use cataloger_core::{DomainError, DomainResult, ValueObject};

use crate::{Price, PurchaseDate, TagSet};

/// Character limits for the free-text fields of an item.
pub mod limits {
    pub const NAME_MAX_CHARS: usize = 15;
    pub const DESCRIPTION_MAX_CHARS: usize = 50;
    pub const MAKE_MAX_CHARS: usize = 20;
    pub const MODEL_MAX_CHARS: usize = 20;
    pub const COMMENTS_MAX_CHARS: usize = 25;
}

/// Normalized inputs for [`Item::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemParts {
    pub name: String,
    pub description: String,
    pub make: String,
    pub model: String,
    pub serial: u64,
    pub purchase_date: PurchaseDate,
    pub price: Price,
    pub comments: String,
    pub tags: TagSet,
}

/// A catalogued item, as produced by one successful form submission.
///
/// Immutable: fields are only readable, and the only constructor re-checks every
/// text limit so an out-of-range item cannot exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ItemRecord", into = "ItemRecord")]
pub struct Item {
    name: String,
    description: String,
    make: String,
    model: String,
    serial: u64,
    purchase_date: PurchaseDate,
    price: Price,
    comments: String,
    tags: TagSet,
}

impl ValueObject for Item {}

impl Item {
    pub fn new(parts: ItemParts) -> DomainResult<Self> {
        check_text("name", &parts.name, limits::NAME_MAX_CHARS)?;
        check_text("description", &parts.description, limits::DESCRIPTION_MAX_CHARS)?;
        check_text("make", &parts.make, limits::MAKE_MAX_CHARS)?;
        check_text("model", &parts.model, limits::MODEL_MAX_CHARS)?;
        check_text("comments", &parts.comments, limits::COMMENTS_MAX_CHARS)?;

        Ok(Self {
            name: parts.name,
            description: parts.description,
            make: parts.make,
            model: parts.model,
            serial: parts.serial,
            purchase_date: parts.purchase_date,
            price: parts.price,
            comments: parts.comments,
            tags: parts.tags,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn make(&self) -> &str {
        &self.make
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub fn purchase_date(&self) -> PurchaseDate {
        self.purchase_date
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn comments(&self) -> &str {
        &self.comments
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }
}

fn check_text(field: &str, value: &str, max_chars: usize) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    if value.trim() != value {
        return Err(DomainError::validation(format!(
            "{field} has surrounding whitespace"
        )));
    }
    if value.chars().count() > max_chars {
        return Err(DomainError::validation(format!(
            "{field} exceeds {max_chars} characters"
        )));
    }
    Ok(())
}

/// Wire shape of an item; deserialization goes back through [`Item::new`].
#[derive(Serialize, Deserialize)]
struct ItemRecord {
    name: String,
    description: String,
    make: String,
    model: String,
    serial: u64,
    purchase_date: PurchaseDate,
    price: Price,
    comments: String,
    tags: TagSet,
}

impl TryFrom<ItemRecord> for Item {
    type Error = DomainError;

    fn try_from(r: ItemRecord) -> Result<Self, Self::Error> {
        Item::new(ItemParts {
            name: r.name,
            description: r.description,
            make: r.make,
            model: r.model,
            serial: r.serial,
            purchase_date: r.purchase_date,
            price: r.price,
            comments: r.comments,
            tags: r.tags,
        })
    }
}

impl From<Item> for ItemRecord {
    fn from(i: Item) -> Self {
        Self {
            name: i.name,
            description: i.description,
            make: i.make,
            model: i.model,
            serial: i.serial,
            purchase_date: i.purchase_date,
            price: i.price,
            comments: i.comments,
            tags: i.tags,
        }
    }
}
