use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::{
        CurveFamilyYield,
        FrequencyDistribution,
        Histogram,
        OptimalRatedSpeed,
        SweepYield,
    },
    fmt::FormattedPercentage,
    io::catalogue::NodeLocation,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

#[must_use]
pub fn build_catalogue_table(locations: &[NodeLocation]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Tag", "Latitude", "Longitude"]);
    for location in locations {
        table.add_row(vec![
            Cell::new(&location.tag),
            Cell::new(format!("{:.5}", location.latitude)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.5}", location.longitude)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Count and frequency of every node per bin, skipping the bins where no node has any samples.
#[must_use]
pub fn build_histogram_table(histogram: &Histogram, distribution: &FrequencyDistribution) -> Table {
    let mut table = new_table();
    let mut header = vec![Cell::new("From"), Cell::new("To")];
    header.extend(histogram.columns().iter().map(|column| Cell::new(&column.node)));
    table.set_header(header);

    let edges = histogram.edges();
    for bin in 0..histogram.n_bins() {
        if histogram.columns().iter().all(|column| column.counts[bin] == 0) {
            continue;
        }
        let mut row = vec![
            Cell::new(edges[bin]).add_attribute(Attribute::Dim),
            Cell::new(edges[bin + 1]),
        ];
        row.extend(histogram.columns().iter().zip(distribution.columns()).map(
            |(counts, frequencies)| {
                Cell::new(format!(
                    "{} ({})",
                    counts.counts[bin],
                    FormattedPercentage(frequencies.frequencies[bin]),
                ))
                .set_alignment(CellAlignment::Right)
                .fg(if counts.counts[bin] == 0 { Color::DarkGrey } else { Color::Reset })
            },
        ));
        table.add_row(row);
    }
    table
}

#[must_use]
pub fn build_curve_family_table(family_yield: &CurveFamilyYield, hourly_data_points: f64) -> Table {
    let best_index = family_yield.best().map(|(index, _)| index);
    let mut table = new_table();
    table.set_header(vec!["Cut-in", "Cut-out", "Hourly energy"]);
    for (index, entry) in family_yield.entries().iter().enumerate() {
        let color = if Some(index) == best_index { Color::Green } else { Color::Reset };
        table.add_row(vec![
            Cell::new(entry.shape.cut_in).fg(color),
            Cell::new(entry.shape.cut_out).fg(color),
            Cell::new(entry.energy.to_watt_hours(hourly_data_points))
                .set_alignment(CellAlignment::Right)
                .fg(color),
        ]);
    }
    table
}

#[must_use]
pub fn build_sweep_table(sweep_yield: &SweepYield, hourly_data_points: f64) -> Table {
    let best_index = sweep_yield.best().map(|(index, _)| index);
    let mut table = new_table();
    table.set_header(vec!["Rated speed", "Energy", "Ideal", "Capacity factor"]);
    for (index, point) in sweep_yield.points().iter().enumerate() {
        let color = if Some(index) == best_index { Color::Green } else { Color::Reset };
        table.add_row(vec![
            Cell::new(point.rated_speed).fg(color),
            Cell::new(point.energy.to_watt_hours(hourly_data_points))
                .set_alignment(CellAlignment::Right)
                .fg(color),
            Cell::new(point.ideal_energy.to_watt_hours(hourly_data_points))
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            Cell::new(FormattedPercentage(point.capacity_factor))
                .set_alignment(CellAlignment::Right)
                .fg(color),
        ]);
    }
    table
}

#[must_use]
pub fn build_optimum_table(optima: &[OptimalRatedSpeed], hourly_data_points: f64) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Node", "Rated speed", "Energy"]);
    for optimum in optima {
        table.add_row(vec![
            Cell::new(&optimum.node),
            Cell::new(optimum.rated_speed).set_alignment(CellAlignment::Right),
            Cell::new(optimum.energy.to_watt_hours(hourly_data_points))
                .set_alignment(CellAlignment::Right),
        ]);
    }
    table
}
