//! Natural-language lookup queries
//!
//! The lookup service resolves text like "120g chicken breast" into parsed
//! nutrients, so a query is just the weight in grams followed by the name.

/// Build the query for `grams` of `ingredient`
///
/// Whole weights print without a decimal point ("120g rice"); fractional
/// weights keep their shortest exact form ("33.5g rice"). Surrounding
/// whitespace in the name is dropped.
pub fn format_query(ingredient: &str, grams: f64) -> String {
    format!("{}g {}", grams, ingredient.trim())
}

/// Recover the ingredient name from a query built by [`format_query`]
pub fn ingredient_from_query(query: &str) -> Option<&str> {
    let (weight, name) = query.split_once(' ')?;
    if !weight.ends_with('g') || name.is_empty() {
        return None;
    }
    Some(name)
}
