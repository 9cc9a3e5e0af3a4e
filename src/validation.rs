use crate::category::{classify, standardize, Category};
use crate::SelectionSet;

pub const MANDATORY_CATEGORIES: [Category; 3] =
    [Category::Protagonist, Category::Genre, Category::Setting];

/// Mandatory categories with no selected tag. A non-empty result is a warning, not a failure.
pub fn missing_categories(selection: &SelectionSet) -> Vec<Category> {
    let mut present = [false; MANDATORY_CATEGORIES.len()];

    for tag_id in selection.iter() {
        let category = standardize(&classify(tag_id));
        if let Some(index) = MANDATORY_CATEGORIES
            .iter()
            .position(|mandatory| *mandatory == category)
        {
            present[index] = true;
        }
    }

    MANDATORY_CATEGORIES
        .iter()
        .zip(present.iter())
        .filter(|(_, present)| !**present)
        .map(|(category, _)| category.clone())
        .collect()
}
