use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    aggregate::{PriceBreakdown, PriceResult},
    validation::{ValidationOutcome, Verdict},
};

pub fn build_breakdown_table(breakdown: &PriceBreakdown) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table.set_header(vec!["Component", "Low", "High"]);
    for (component, low, high) in [
        ("Network usage", breakdown.network_usage, breakdown.network_usage),
        ("Energy supply", breakdown.energy_supply, breakdown.energy_supply),
        ("Levies", breakdown.min_levy, breakdown.max_levy),
        ("Grid surcharge", breakdown.grid_surcharge, breakdown.grid_surcharge),
        ("Strategic reserve", breakdown.strategic_reserve, breakdown.strategic_reserve),
    ] {
        table.add_row(vec![
            Cell::new(component),
            Cell::new(low).set_alignment(CellAlignment::Right),
            Cell::new(high).set_alignment(CellAlignment::Right).fg(if high > low {
                Color::DarkYellow
            } else {
                Color::Reset
            }),
        ]);
    }
    let PriceResult { low, high } = breakdown.to_result();
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(low).set_alignment(CellAlignment::Right).add_attribute(Attribute::Bold),
        Cell::new(high).set_alignment(CellAlignment::Right).add_attribute(Attribute::Bold),
    ]);
    table
}

pub fn build_validation_table(computed: PriceResult, outcome: ValidationOutcome) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table.set_header(vec!["Bound", "Computed", "Reference"]);
    for (bound, price, verdict) in
        [("Lowest", computed.low, outcome.low), ("Highest", computed.high, outcome.high)]
    {
        table.add_row(vec![
            Cell::new(bound),
            Cell::new(price).set_alignment(CellAlignment::Right),
            match verdict {
                Verdict::Match => Cell::new("match").fg(Color::Green),
                Verdict::Mismatch => Cell::new("mismatch").fg(Color::Red),
                Verdict::Unknown => Cell::new("unknown").add_attribute(Attribute::Dim),
            },
        ]);
    }
    table
}
