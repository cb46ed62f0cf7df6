use std::io::{self, Write};

use anyhow::bail;
use indicatif::{ProgressBar, ProgressStyle};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use rayon::prelude::*;
use rectpack::{all_packers, auto_pack_single, Packer, Point};

use crate::options::BenchOptions;

const MAX_SIDE: i32 = 1024;

pub fn bench(options: BenchOptions) -> anyhow::Result<()> {
    validate(&options)?;

    let iterations = iteration_count(&options);
    let progress = ProgressBar::new(iterations);
    progress.set_style(
        ProgressStyle::default_bar().template("{elapsed_precise} [{bar:40}] {pos}/{len} batches"),
    );

    let results = run_bench(&options, &progress);
    progress.finish_and_clear();

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_csv(&mut handle, &results)?;

    Ok(())
}

/// Mean overhead of one algorithm across every batch it managed to pack.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchResult {
    pub algorithm: String,
    pub overhead: Option<f64>,
}

fn validate(options: &BenchOptions) -> anyhow::Result<()> {
    if options.min_size < 1 || options.min_size > options.max_size || options.max_size > MAX_SIDE {
        bail!(
            "rectangle sizes must satisfy 1 <= min-size <= max-size <= {}, got {}..{}",
            MAX_SIDE,
            options.min_size,
            options.max_size
        );
    }

    Ok(())
}

// Every batch of identical squares is the same batch.
fn iteration_count(options: &BenchOptions) -> u64 {
    if options.min_size == options.max_size {
        options.iterations.min(1)
    } else {
        options.iterations
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Total {
    sum: f64,
    count: u64,
}

fn merge(mut a: Vec<Total>, b: Vec<Total>) -> Vec<Total> {
    for (a, b) in a.iter_mut().zip(b) {
        a.sum += b.sum;
        a.count += b.count;
    }
    a
}

fn run_bench(options: &BenchOptions, progress: &ProgressBar) -> Vec<BenchResult> {
    let names: Vec<String> = all_packers().iter().map(|packer| packer.name()).collect();
    let iterations = iteration_count(options);

    log::debug!(
        "Running {} batches of {} rectangles against {} algorithms",
        iterations,
        options.count,
        names.len()
    );

    let totals = (0..iterations)
        .into_par_iter()
        .fold(
            || (all_packers(), vec![Total::default(); names.len()]),
            |(mut packers, mut totals), iteration| {
                let sizes = random_batch(options, iteration);

                for (packer, total) in packers.iter_mut().zip(totals.iter_mut()) {
                    if let Some(overhead) = measure(packer, &sizes, iteration) {
                        total.sum += overhead;
                        total.count += 1;
                    }
                }

                progress.inc(1);
                (packers, totals)
            },
        )
        .map(|(_, totals)| totals)
        .reduce(|| vec![Total::default(); names.len()], merge);

    names
        .into_iter()
        .zip(totals)
        .map(|(algorithm, total)| BenchResult {
            algorithm,
            overhead: if total.count > 0 {
                Some(total.sum / total.count as f64)
            } else {
                None
            },
        })
        .collect()
}

fn random_batch(options: &BenchOptions, iteration: u64) -> Vec<Point> {
    let mut rng = SmallRng::seed_from_u64(options.seed.wrapping_add(iteration));

    (0..options.count)
        .map(|_| {
            Point::new(
                rng.random_range(options.min_size..=options.max_size),
                rng.random_range(options.min_size..=options.max_size),
            )
        })
        .collect()
}

/// Packs one batch and returns the fraction of the container that ended up
/// unused, relative to the area of the inputs.
fn measure<P>(packer: &mut P, sizes: &[Point], iteration: u64) -> Option<f64>
where
    P: Packer + ?Sized,
{
    let input_area: i64 = sizes.iter().map(|size| size.area()).sum();
    if input_area == 0 {
        return None;
    }

    match auto_pack_single(packer, sizes) {
        Ok(packing) => {
            let wasted = packing.bounds().area() - input_area;
            Some(wasted as f64 / input_area as f64)
        }
        Err(err) => {
            log::warn!("{} failed on batch {}: {}", packer.name(), iteration, err);
            None
        }
    }
}

fn write_csv<W: Write>(output: &mut W, results: &[BenchResult]) -> io::Result<()> {
    writeln!(output, "Algorithm,Overhead")?;

    for result in results {
        if let Some(overhead) = result.overhead {
            writeln!(output, "{},{:.5}", result.algorithm, overhead)?;
        }
    }

    Ok(())
}
