//! Turning validated field text into an [`Item`].

use cataloger_inventory::{Item, ItemParts, PurchaseDate, TagSet};

use crate::draft::FieldValues;
use crate::error::{Annotations, EntryError, SubmitError};
use crate::field::Field;
use crate::validate;

/// Annotation for every field that fails, required-before-format.
pub fn validate_all(values: &FieldValues) -> Annotations {
    let mut annotations = Annotations::new();
    for field in Field::ALL {
        if let Some(error) = validate::annotation(field, values.get(field)) {
            annotations.insert(error);
        }
    }
    annotations
}

/// Validate `values` and, if everything passes, compose the item.
///
/// The purchase date is composed under a strict calendar after the per-field checks;
/// an impossible date is reported on the day field.
pub fn assemble(values: &FieldValues, tags: TagSet) -> Result<Item, SubmitError> {
    let annotations = validate_all(values);
    if !annotations.is_empty() {
        return Err(SubmitError::Rejected(annotations));
    }

    let day = parsed(Field::Day, validate::day(values.get(Field::Day)))?;
    let month = parsed(Field::Month, validate::month(values.get(Field::Month)))?;
    let year = parsed(Field::Year, validate::year(values.get(Field::Year)))?;
    let purchase_date =
        PurchaseDate::from_parts(year, month, day).map_err(|_| rejected(EntryError::DateImpossible))?;

    let price = parsed(Field::Price, validate::price(values.get(Field::Price)))?;
    let serial = parsed(Field::Serial, validate::serial(values.get(Field::Serial)))?;

    let item = Item::new(ItemParts {
        name: values.get(Field::Name).to_string(),
        description: values.get(Field::Description).to_string(),
        make: values.get(Field::Make).to_string(),
        model: values.get(Field::Model).to_string(),
        serial,
        purchase_date,
        price,
        comments: values.get(Field::Comments).to_string(),
        tags,
    })?;
    Ok(item)
}

fn parsed<T>(field: Field, result: Result<T, crate::error::Rule>) -> Result<T, SubmitError> {
    result.map_err(|rule| rejected(EntryError::FieldFormat(field, rule)))
}

fn rejected(error: EntryError) -> SubmitError {
    let mut annotations = Annotations::new();
    annotations.insert(error);
    SubmitError::Rejected(annotations)
}
