use std::fmt::Write;

use time::macros::format_description;

use super::state::ViewState;
use crate::meals::{Filter, Meal};

const CARD_WIDTH: usize = 38;

/// Renders the whole screen. The detail overlay, when open, covers the list.
pub fn render(view: &ViewState) -> String {
    if let Some(meal) = &view.selected {
        return render_detail(meal);
    }
    if view.show_spinner() {
        return "\n   ... loading recipes ...\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "== MealDB Browser ==");
    let _ = writeln!(out, "search: [{}]", view.search_input);
    let _ = writeln!(out, "{}", category_chips(view));
    out.push('\n');

    let _ = write!(out, "{}", result_count(view.meals.len(), &view.filter));
    // A typed but unsubmitted search counts as something to clear.
    if view.filter.is_active() || !view.search_input.trim().is_empty() {
        let _ = write!(out, "   (type `all` to clear filters)");
    }
    out.push('\n');

    if view.refreshing {
        let _ = writeln!(out, "~ refreshing ~");
    }
    if let Some(err) = &view.last_error {
        let _ = writeln!(out, "! could not update recipes: {err} (type `refresh` to retry)");
    }
    out.push('\n');

    if view.show_empty() {
        out.push_str(&empty_state(&view.filter));
    } else {
        out.push_str(&meal_grid(&view.meals));
    }

    if let Some(at) = view.last_updated {
        let fmt = format_description!("[hour]:[minute]:[second]");
        if let Ok(stamp) = at.format(fmt) {
            let _ = writeln!(out, "\nupdated {stamp} UTC");
        }
    }
    out
}

/// `"3 recipes found in Beef"`, `"1 recipe found for \"soup\""`.
pub fn result_count(count: usize, filter: &Filter) -> String {
    let plural = if count == 1 { "" } else { "s" };
    let mut text = format!("{count} recipe{plural} found");
    if let Some(category) = filter.category() {
        let _ = write!(text, " in {category}");
    }
    if let Some(query) = filter.query() {
        let _ = write!(text, " for \"{query}\"");
    }
    text
}

fn category_chips(view: &ViewState) -> String {
    let active = view.filter.category();
    let chip = |name: &str, on: bool| {
        if on {
            format!("[{name}]")
        } else {
            format!(" {name} ")
        }
    };

    let mut chips = vec![chip("All", active.is_none())];
    chips.extend(
        view.categories
            .iter()
            .map(|c| chip(&c.name, active == Some(c.name.as_str()))),
    );
    chips.join(" ")
}

fn empty_state(filter: &Filter) -> String {
    let hint = match filter.query() {
        Some(query) => format!("Try a search term other than \"{query}\""),
        None => "Try selecting a different category".to_string(),
    };
    format!("   No recipes found\n   {hint}\n   Type `all` to see every recipe\n")
}

fn meal_grid(meals: &[Meal]) -> String {
    let mut out = String::new();
    for (row, pair) in meals.chunks(2).enumerate() {
        let cells: Vec<[String; 2]> = pair
            .iter()
            .enumerate()
            .map(|(col, meal)| card(row * 2 + col + 1, meal))
            .collect();
        for line in 0..2 {
            let text: Vec<String> = cells
                .iter()
                .map(|c| format!("{:<width$}", c[line], width = CARD_WIDTH))
                .collect();
            let _ = writeln!(out, "{}", text.join("  ").trim_end());
        }
        out.push('\n');
    }
    out
}

fn card(number: usize, meal: &Meal) -> [String; 2] {
    [
        truncate(&format!("{number:>2}. {}", meal.name), CARD_WIDTH),
        truncate(&format!("    {} · {}", meal.category, meal.area), CARD_WIDTH),
    ]
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn render_detail(meal: &Meal) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[x] close");
    let _ = writeln!(out, "== {} ==", meal.name);
    let _ = writeln!(out, "image: {}", meal.thumbnail);
    let _ = writeln!(out, "<{}> <{}>", meal.category, meal.area);

    let tags = meal.tag_list();
    if !tags.is_empty() {
        let _ = writeln!(out, "\nTags: {}", tags.join(", "));
    }

    let _ = writeln!(out, "\nIngredients:");
    for item in &meal.ingredients {
        let _ = writeln!(out, "  • {:<30} {}", item.name, item.measure);
    }

    let _ = writeln!(out, "\nInstructions:\n{}", meal.instructions.trim());

    if let Some(video) = &meal.youtube {
        let _ = writeln!(out, "\nWatch on YouTube: {video}");
    }
    if let Some(source) = &meal.source {
        let _ = writeln!(out, "Source: {source}");
    }
    out
}
