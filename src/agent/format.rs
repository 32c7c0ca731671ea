//! Markdown rendering of tool results

use crate::convert::Conversion;
use crate::kitchen::{CookingTimeAnswer, MealPlan, NutritionReport, SubstituteSource, Substitutes};
use crate::types::{title_case, CookingTime, Recipe, Technique};

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// A full recipe: header, ingredients, steps, tips and nutrition
pub fn recipe(recipe: &Recipe) -> String {
    let mut out = format!("# {}\n\n*{}*\n\n", recipe.name, recipe.description);

    out.push_str(&format!(
        "**Cuisine:** {} | **Difficulty:** {}\n",
        title_case(recipe.cuisine.as_str()),
        title_case(recipe.difficulty.as_str())
    ));
    out.push_str(&format!(
        "**Prep Time:** {} min | **Cook Time:** {} min | **Servings:** {}\n\n",
        recipe.prep_time_min, recipe.cook_time_min, recipe.servings
    ));

    if !recipe.dietary_tags.is_empty() {
        let tags: Vec<String> = recipe
            .dietary_tags
            .iter()
            .map(|t| title_case(t.as_str()))
            .collect();
        out.push_str(&format!("**Dietary:** {}\n\n", tags.join(", ")));
    }

    out.push_str("## Ingredients\n\n");
    for ing in &recipe.ingredients {
        out.push_str(&format!("- {}\n", ing.display_line()));
    }

    out.push_str("\n## Instructions\n\n");
    for (i, step) in recipe.instructions.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, step));
    }

    if !recipe.tips.is_empty() {
        out.push_str("\n## Tips\n\n");
        for tip in &recipe.tips {
            out.push_str(&format!("- {}\n", tip));
        }
    }

    if let Some(n) = &recipe.nutrition {
        out.push_str("\n## Nutrition (per serving)\n\n");
        out.push_str(&format!("- Calories: {}\n", n.calories));
        out.push_str(&format!("- Protein: {}g\n", n.protein_g));
        out.push_str(&format!("- Carbs: {}g\n", n.carbs_g));
        out.push_str(&format!("- Fat: {}g\n", n.fat_g));
    }

    out
}

/// A titled list of recipes, at most `limit` shown
pub fn recipe_list(recipes: &[&Recipe], title: &str, limit: usize) -> String {
    if recipes.is_empty() {
        return format!("# {}\n\nNo recipes found. Try a different search!", title);
    }

    let mut out = format!("# {}\n\nFound {} recipe(s):\n\n", title, recipes.len());

    for recipe in recipes.iter().take(limit) {
        out.push_str(&format!("### {}\n", recipe.name));
        out.push_str(&format!("{}\n", truncate(&recipe.description, 100)));
        out.push_str(&format!(
            "{} min | {} | {} servings\n\n",
            recipe.total_time_min(),
            title_case(recipe.difficulty.as_str()),
            recipe.servings
        ));
    }

    if recipes.len() > limit {
        out.push_str(&format!("*...and {} more*\n", recipes.len() - limit));
    }

    out.push_str("\n---\n*Ask me for the full recipe of any dish!*");
    out
}

pub fn technique(technique: &Technique) -> String {
    let mut out = format!(
        "# Cooking Techniques\n\n## {}\n\n{}\n\n**Best for:**\n",
        technique.name, technique.description
    );
    for item in &technique.best_for {
        out.push_str(&format!("- {}\n", item));
    }

    if !technique.tips.is_empty() {
        out.push_str("\n**Tips:**\n");
        for tip in &technique.tips {
            out.push_str(&format!("- {}\n", tip));
        }
    }

    out
}

pub fn technique_list(techniques: &[Technique]) -> String {
    let mut out = String::from("# Cooking Techniques\n\n");
    for t in techniques {
        out.push_str(&format!("### {}\n{}\n\n", t.name, t.description));
    }
    out.push_str("*Ask about any technique for detailed tips!*");
    out
}

/// One "## Substitutes for ..." section
pub fn substitutes(subs: &Substitutes) -> String {
    let mut out = format!("## Substitutes for {}\n\n", title_case(&subs.ingredient));
    for s in &subs.substitutes {
        out.push_str(&format!("- {}\n", s));
    }

    match subs.source {
        SubstituteSource::Pantry => {
            if let Some(tips) = &subs.storage_tips {
                out.push_str(&format!("\n*Storage:* {}\n", tips));
            }
        }
        SubstituteSource::Recipe => {
            if let Some(recipe) = &subs.from_recipe {
                out.push_str(&format!("\n*As suggested in {}*\n", recipe));
            }
        }
        SubstituteSource::Common => {
            if let Some(note) = &subs.note {
                out.push_str(&format!("\n*{}*\n", note));
            }
        }
    }

    out.push('\n');
    out
}

pub fn conversion(c: &Conversion) -> String {
    format!(
        "**{} {}** = **{} {}**\n",
        c.original.amount, c.original.unit, c.converted.amount, c.converted.unit
    )
}

pub fn meal_plan(plan: &MealPlan) -> String {
    let mut out = String::from("# Meal Plan\n\nHere's a suggested meal plan with variety:\n\n");

    for entry in &plan.meal_plan {
        let label = if plan.total_days <= WEEKDAYS.len() {
            WEEKDAYS[(entry.day as usize - 1) % WEEKDAYS.len()].to_string()
        } else {
            format!("Day {}", entry.day)
        };
        out.push_str(&format!("### {}: {}\n", label, entry.recipe.name));
        out.push_str(&format!(
            "*{}* | {} min | {}\n\n",
            title_case(entry.recipe.cuisine.as_str()),
            entry.recipe.total_time,
            title_case(entry.recipe.difficulty.as_str())
        ));
    }

    out.push_str("---\n");
    out.push_str("*Ask for any full recipe, or tell me your dietary preferences for a customized plan!*");
    out
}

pub fn nutrition(report: &NutritionReport) -> String {
    let mut out = String::from("# Nutrition Information\n\n");

    let Some(n) = &report.nutrition else {
        out.push_str(&format!("{}: {}\n", report.recipe, report.note));
        return out;
    };

    let portion = if report.servings_calculated == 1 {
        "per serving".to_string()
    } else {
        format!("{} servings", report.servings_calculated)
    };
    out.push_str(&format!("## {} ({})\n\n", report.recipe, portion));
    out.push_str(&format!("- **Calories:** {}\n", n.calories));
    out.push_str(&format!("- **Protein:** {}g\n", n.protein_g));
    out.push_str(&format!("- **Carbohydrates:** {}g\n", n.carbs_g));
    out.push_str(&format!("- **Fat:** {}g\n", n.fat_g));
    out.push_str(&format!("- **Fiber:** {}g\n", n.fiber_g));
    out.push_str(&format!("- **Sodium:** {}mg\n", n.sodium_mg));
    out
}

/// Per-serving macros of every recipe that has them
pub fn nutrition_overview(recipes: &[Recipe]) -> String {
    let mut out = String::from("# Nutrition Information\n\nHere's nutrition info for our recipes:\n\n");
    for recipe in recipes {
        if let Some(n) = &recipe.nutrition {
            out.push_str(&format!("**{}** ({} servings)\n", recipe.name, recipe.servings));
            out.push_str(&format!(
                "Per serving: {} cal | {}g protein | {}g carbs | {}g fat\n\n",
                n.calories, n.protein_g, n.carbs_g, n.fat_g
            ));
        }
    }
    out
}

pub fn cooking_time(answer: &CookingTimeAnswer) -> String {
    match answer {
        CookingTimeAnswer::Timing {
            food,
            method,
            cooking_info,
        } => {
            let mut out = format!(
                "# Cooking Time: {} ({})\n\n",
                title_case(food),
                title_case(method)
            );
            for (label, value) in cooking_info {
                out.push_str(&format!("- **{}:** {}\n", title_case(label), value));
            }
            out.push_str("\n*Always use a meat thermometer for safety!*");
            out
        }
        CookingTimeAnswer::Methods {
            food,
            available_methods,
            tip,
        } => {
            let mut out = format!("# Cooking Time: {}\n\n{}:\n\n", title_case(food), tip);
            for m in available_methods {
                out.push_str(&format!("- {}\n", title_case(m)));
            }
            out
        }
    }
}

/// Every food, method and detail in the timing table
pub fn timing_guide(times: &[CookingTime]) -> String {
    let mut out = String::from("# Cooking Times Guide\n\n");
    for entry in times {
        out.push_str(&format!("## {}\n\n", title_case(&entry.food)));
        for (method, details) in &entry.methods {
            let details: Vec<String> = details
                .iter()
                .map(|(label, value)| format!("{}: {}", title_case(label), value))
                .collect();
            out.push_str(&format!("- **{}:** {}\n", title_case(method), details.join("; ")));
        }
        out.push('\n');
    }
    out.push_str("*Always use a meat thermometer for safety!*");
    out
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let cut: String = s.chars().take(max_chars).collect();
        format!("{}...", cut.trim_end())
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("sautéed onions", 6), "sautée...");
    }
}
