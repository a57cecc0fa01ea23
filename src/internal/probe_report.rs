#![allow(
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
//! Measures probe lengths of `ProbingMap` across load factors and plots them.
//!
//! Each run fills a map of fixed capacity with random keys, records its probe
//! statistics, then removes every other key and refills the map to the same
//! size so the cost of tombstones shows up in a second series.

use std::error::Error;

use plotters::prelude::*;
use probing_map::{ProbeStats, ProbingMap};
use rand::Rng;

/// Slots in every measured map; the load factor of 1.0 keeps it from growing
const TABLE_SIZE: usize = 1 << 16;
/// Number of load factors sampled between 0.1 and 0.95
const NUM_LOAD_FACTORS: usize = 10;
/// Font used for every chart label
const FONT: &str = "sans-serif";
/// Series colors, assigned in order
const COLORS: [RGBColor; 2] = [RGBColor(220, 50, 50), RGBColor(50, 90, 220)];

/// Probe statistics of one run before and after churn
struct Run {
    /// Load factor the map was filled to
    load_factor: f64,
    /// Statistics right after the initial fill
    fresh: ProbeStats,
    /// Statistics after removing half the keys and refilling
    churned: ProbeStats,
}

/// Fills a map to `n_keys` live entries, then churns half of them
fn measure(rng: &mut impl Rng, load_factor: f64, n_keys: usize) -> Run {
    let mut map = ProbingMap::with_capacity_and_load_factor(TABLE_SIZE, 1.0);

    while map.size() < n_keys {
        map.put(rng.random::<u64>(), ());
    }
    let fresh = map.probe_stats();

    let keys: Vec<u64> = map.keys().copied().collect();
    for key in keys.iter().step_by(2) {
        map.remove(key);
    }
    while map.size() < n_keys {
        map.put(rng.random::<u64>(), ());
    }
    let churned = map.probe_stats();

    Run { load_factor, fresh, churned }
}

/// Splits one statistic of every run into the fresh and churned series
fn series(runs: &[Run], select: fn(&ProbeStats) -> f64) -> Vec<(&'static str, Vec<(f64, f64)>)> {
    vec![
        ("Fresh inserts", runs.iter().map(|run| (run.load_factor, select(&run.fresh))).collect()),
        ("After churn", runs.iter().map(|run| (run.load_factor, select(&run.churned))).collect()),
    ]
}

/// Draws one line chart with a series per label
fn draw_chart(
    path: &str,
    caption: &str,
    y_desc: &str,
    series: &[(&str, Vec<(f64, f64)>)],
) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let y_max = series
        .iter()
        .flat_map(|(_, points)| points.iter().map(|&(_, y)| y))
        .fold(1.0, f64::max) *
        1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (FONT, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0.0..1.0, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Load Factor")
        .y_desc(y_desc)
        .axis_desc_style((FONT, 16))
        .draw()?;

    for ((label, points), &color) in series.iter().zip(COLORS.iter().cycle()) {
        let line_style = ShapeStyle::from(&color).stroke_width(2);

        chart
            .draw_series(LineSeries::new(points.iter().copied(), line_style))?
            .label(*label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series(points.iter().map(|&point| Circle::new(point, 4, color.filled())))?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let load_factors: Vec<f64> = (0..NUM_LOAD_FACTORS)
        .map(|i| 0.1 + (0.95 - 0.1) * (i as f64) / ((NUM_LOAD_FACTORS - 1) as f64))
        .collect();

    let mut rng = rand::rng();
    let mut runs = Vec::with_capacity(load_factors.len());

    for &load_factor in &load_factors {
        let n_keys = (TABLE_SIZE as f64 * load_factor) as usize;
        println!("Testing with {n_keys} keys (load factor {load_factor:.2})");

        let run = measure(&mut rng, load_factor, n_keys);
        println!(
            "  Fresh: Avg probes = {:.2}, Worst = {}",
            run.fresh.mean_probe_length, run.fresh.max_probe_length
        );
        println!(
            "  Churned: Avg probes = {:.2}, Worst = {}, Tombstones = {}",
            run.churned.mean_probe_length, run.churned.max_probe_length, run.churned.tombstones
        );
        runs.push(run);
    }

    if let Some(last) = runs.last() {
        println!("Final churned map:\n{}", last.churned);
    }

    draw_chart(
        "average_probe_length.png",
        "Average Probe Length by Load Factor",
        "Average Probe Length (slots)",
        &series(&runs, |stats| stats.mean_probe_length),
    )?;
    draw_chart(
        "worst_case_probes.png",
        "Worst-Case Probe Length by Load Factor",
        "Worst-Case Probe Length (slots)",
        &series(&runs, |stats| stats.max_probe_length as f64),
    )?;

    println!("Generated plot images: average_probe_length.png, worst_case_probes.png");

    Ok(())
}
