#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::pedantic)]
#![allow(warnings)]

use chainmap::{ChainMetrics, ChainedHashMap};
use plotters::prelude::*;
use rand::Rng;

// Experiment dimensions
const TOTAL_KEYS: usize = 100_000;
const SAMPLES: usize = 20;
const INITIAL_CAPACITY: usize = 16;

// Growth policies to compare
const LOAD_FACTORS: [f64; 3] = [0.5, 0.75, 1.0];

// Rough per-map memory estimate (in bytes): bucket headers plus entries
fn estimate_memory(capacity: usize, entries: usize) -> usize {
    let bucket_headers = capacity * std::mem::size_of::<Vec<(u64, u64, usize)>>();
    let entry_payload = entries * std::mem::size_of::<(u64, u64, usize)>();
    bucket_headers + entry_payload
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let checkpoint = TOTAL_KEYS / SAMPLES;

    println!("Inserting {} random keys, sampling every {}", TOTAL_KEYS, checkpoint);
    println!("Load factors under test: {:?}", LOAD_FACTORS);

    // Shared key stream so every policy sees the same workload
    let mut rng = rand::rng();
    let keys: Vec<u64> = (0..TOTAL_KEYS).map(|_| rng.random::<u64>()).collect();

    // Results storage, one series per load factor
    let mut average_chain: Vec<Vec<f64>> = vec![Vec::new(); LOAD_FACTORS.len()];
    let mut longest_chain: Vec<Vec<f64>> = vec![Vec::new(); LOAD_FACTORS.len()];
    let mut bucket_counts: Vec<Vec<f64>> = vec![Vec::new(); LOAD_FACTORS.len()];

    for (policy_idx, &load_factor) in LOAD_FACTORS.iter().enumerate() {
        let mut map = ChainedHashMap::with_capacity_and_load_factor(INITIAL_CAPACITY, load_factor)?;

        for (inserted, &key) in keys.iter().enumerate() {
            map.insert(key, inserted);

            if (inserted + 1) % checkpoint == 0 {
                average_chain[policy_idx].push(map.average_chain());
                longest_chain[policy_idx].push(map.longest_chain() as f64);
                bucket_counts[policy_idx].push(map.capacity() as f64);
            }
        }

        let memory = estimate_memory(map.capacity(), map.len());
        println!(
            "  load factor {:.2}: {} entries in {} buckets, avg chain = {:.2}, longest = {}, ~{} bytes",
            load_factor,
            map.len(),
            map.capacity(),
            map.average_chain(),
            map.longest_chain(),
            memory
        );
    }

    // Enhanced plot configuration
    let font_family = "sans-serif";

    // Colors with decent contrast
    let colors = [
        RGBColor(220, 50, 50), // Bright red
        RGBColor(50, 90, 220), // Bright blue
        RGBColor(50, 180, 50), // Bright green
    ];

    let line_width = 2;
    let marker_size = 4;
    let text_size = 16;
    let title_size = 35;

    // Custom x-axis labels showing how many keys each checkpoint covers
    let x_labels: Vec<String> = (1..=SAMPLES).map(|i| (i * checkpoint).to_string()).collect();

    // Plot 1: Average chain length
    let root = BitMapBackend::new("average_chain_length.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_avg = average_chain
        .iter()
        .flat_map(|v| v.iter())
        .fold(0.0, |max, &x| if x > max { x } else { max }) *
        1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption("Average Chain Length by Growth Policy", (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0..(SAMPLES - 1), 0.0..max_avg)?;

    chart
        .configure_mesh()
        .x_labels(SAMPLES - 1)
        .x_label_formatter(&|x| {
            if *x < x_labels.len() { x_labels[*x].clone() } else { "".to_string() }
        })
        .x_desc("Number of Keys Inserted")
        .y_desc("Average Chain Length (entries)")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    for (policy_idx, &load_factor) in LOAD_FACTORS.iter().enumerate() {
        let color = &colors[policy_idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(line_width);
        let label = format!("load factor {load_factor:.2}");

        chart
            .draw_series(LineSeries::new(
                (0..SAMPLES - 1).map(|i| (i, average_chain[policy_idx][i])),
                line_style,
            ))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series((0..SAMPLES - 1).map(|i| {
            Circle::new((i, average_chain[policy_idx][i]), marker_size, color.filled())
        }))?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    // Plot 2: Longest chain
    let root = BitMapBackend::new("longest_chain.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_longest = longest_chain
        .iter()
        .flat_map(|v| v.iter())
        .fold(0.0, |max, &x| if x > max { x } else { max }) *
        1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption("Longest Chain by Growth Policy", (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0..(SAMPLES - 1), 0.0..max_longest)?;

    chart
        .configure_mesh()
        .x_labels(SAMPLES - 1)
        .x_label_formatter(&|x| {
            if *x < x_labels.len() { x_labels[*x].clone() } else { "".to_string() }
        })
        .x_desc("Number of Keys Inserted")
        .y_desc("Longest Chain (entries)")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    for (policy_idx, &load_factor) in LOAD_FACTORS.iter().enumerate() {
        let color = &colors[policy_idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(line_width);
        let label = format!("load factor {load_factor:.2}");

        chart
            .draw_series(LineSeries::new(
                (0..SAMPLES - 1).map(|i| (i, longest_chain[policy_idx][i])),
                line_style,
            ))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series((0..SAMPLES - 1).map(|i| {
            Circle::new((i, longest_chain[policy_idx][i]), marker_size, color.filled())
        }))?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    // Plot 3: Bucket array growth, showing where each policy rehashes
    let root = BitMapBackend::new("bucket_growth.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_buckets = bucket_counts
        .iter()
        .flat_map(|v| v.iter())
        .fold(0.0, |max, &x| if x > max { x } else { max }) *
        1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption("Bucket Array Growth by Growth Policy", (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0..(SAMPLES - 1), 0.0..max_buckets)?;

    chart
        .configure_mesh()
        .x_labels(SAMPLES - 1)
        .x_label_formatter(&|x| {
            if *x < x_labels.len() { x_labels[*x].clone() } else { "".to_string() }
        })
        .x_desc("Number of Keys Inserted")
        .y_desc("Bucket Count")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    for (policy_idx, &load_factor) in LOAD_FACTORS.iter().enumerate() {
        let color = &colors[policy_idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(line_width);
        let label = format!("load factor {load_factor:.2}");

        chart
            .draw_series(LineSeries::new(
                (0..SAMPLES - 1).map(|i| (i, bucket_counts[policy_idx][i])),
                line_style,
            ))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series((0..SAMPLES - 1).map(|i| {
            Circle::new((i, bucket_counts[policy_idx][i]), marker_size, color.filled())
        }))?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    println!(
        "Generated plot images: average_chain_length.png, longest_chain.png, bucket_growth.png"
    );

    Ok(())
}
