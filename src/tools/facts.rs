//! Nutrition facts label rendering

use crate::models::NutritionTotals;

/// Format a nutrient amount for display: at most two decimals, no trailing zeros
pub fn format_amount(value: f64) -> String {
    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Render a plain-text nutrition facts label for the whole batch
pub fn render_nutrition_facts(serving_size: f64, totals: &NutritionTotals) -> String {
    let rule = "-".repeat(32);
    let lines = [
        "Nutritional Facts".to_string(),
        format!("Serving Size: {}g", format_amount(serving_size)),
        "Amount Per Serving".to_string(),
        format!("Calories: {}", format_amount(totals.calories)),
        rule.clone(),
        format!("Total Fat: {}g", format_amount(totals.total_fat)),
        format!("  Saturated Fat: {}g", format_amount(totals.saturated_fat)),
        format!("  Trans Fat: {}g", format_amount(totals.trans_fat)),
        format!("Cholesterol: {}mg", format_amount(totals.cholesterol)),
        format!("Sodium: {}mg", format_amount(totals.sodium)),
        rule.clone(),
        format!("Total Carbohydrate: {}g", format_amount(totals.total_carbohydrate)),
        format!("  Dietary Fiber: {}g", format_amount(totals.dietary_fiber)),
        format!("  Sugars: {}g", format_amount(totals.sugars)),
        rule.clone(),
        format!("Protein: {}g", format_amount(totals.protein)),
        rule,
        format!("Vitamin A: {}    Vitamin C: {}", totals.vitamin_a, totals.vitamin_c),
        format!("Calcium: {}    Iron: {}", totals.calcium, totals.iron),
        "*Percent Daily Values (DV) are based on a 2,000 calorie diet.".to_string(),
    ];
    lines.join("\n")
}
