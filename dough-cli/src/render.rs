use comfy_table::{presets::UTF8_FULL, Attribute, Cell, ContentArrangement, Table};
use dough_core::{round_weight, BatchResult, InclusionDoughWeight};

/// Grams, rounded the way the engine rounds weights.
pub fn fmt_g(x: f64) -> String {
    let v = round_weight(x);
    if v.fract() == 0.0 {
        format!("{v:.0} g")
    } else {
        format!("{v:.1} g")
    }
}

fn fmt_pct(x: f64) -> String {
    let v = (x * 100.0).round() / 100.0;
    format!("{v}%")
}

fn new_table<const N: usize>(headers: [&str; N]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.map(|h| Cell::new(h).add_attribute(Attribute::Bold)));
    table
}

fn summary_table(result: &BatchResult) -> Table {
    let mut table = new_table(["Batch", "Value"]);
    table.add_row(vec![Cell::new("Portion"), Cell::new(fmt_g(result.portion))]);
    table.add_row(vec![
        Cell::new("Hydration"),
        Cell::new(fmt_pct(result.total_hydration_percent)),
    ]);
    table.add_row(vec![Cell::new("Scale"), Cell::new(format!("{}×", result.scale))]);
    table
}

fn main_dough_table(result: &BatchResult) -> Table {
    let mut table = new_table(["Ingredient", "Amount", "Notes"]);
    table.add_row(vec![
        Cell::new("Flour"),
        Cell::new(fmt_g(result.flour_weight)),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("Water"),
        Cell::new(fmt_g(result.liquid_weight)),
        Cell::new(""),
    ]);
    for ingredient in &result.ingredients {
        table.add_row(vec![
            Cell::new(&ingredient.name),
            Cell::new(fmt_g(ingredient.weight)),
            Cell::new(""),
        ]);
    }
    table
}

fn inclusion_table(dough: &InclusionDoughWeight) -> Table {
    let mut table = new_table([dough.name.as_str(), "Amount", "Notes"]);
    table.add_row(vec![
        Cell::new("Total"),
        Cell::new(fmt_g(dough.weight)),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("Flour"),
        Cell::new(fmt_g(dough.flour_weight)),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("Water"),
        Cell::new(fmt_g(dough.liquid_weight)),
        Cell::new(format!("H={}", fmt_pct(dough.hydration_percent))),
    ]);
    for ingredient in &dough.ingredients {
        table.add_row(vec![
            Cell::new(&ingredient.name),
            Cell::new(fmt_g(ingredient.weight)),
            Cell::new(""),
        ]);
    }
    table
}

/// Full breakdown of a batch, one table per section.
pub fn render(result: &BatchResult) -> String {
    let mut out = String::new();

    let title = if result.name.trim().is_empty() {
        "Dough batch"
    } else {
        result.name.as_str()
    };
    out.push_str(&format!("\n=== {title} ===\n"));
    out.push_str(&format!("{}\n", summary_table(result)));

    out.push_str("\n=== Main dough ===\n");
    out.push_str(&format!("{}\n", main_dough_table(result)));

    for dough in &result.inclusion_doughs {
        out.push_str(&format!("\n=== {} ===\n", dough.name));
        out.push_str(&format!("{}\n", inclusion_table(dough)));
    }

    out
}

/* ===========================
Unit tests
=========================== */
