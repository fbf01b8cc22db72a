//! RBFit synthetic demo
//!
//! Generates standard and interleaved RB batches for a two-pattern
//! layout, fits them, and prints every report format.

use rbfit_bench::prelude::*;

fn main() -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════════════════════╗");
    println!("║                  RBFit Synthetic Randomized Benchmarking             ║");
    println!("╚══════════════════════════════════════════════════════════════════════╝\n");

    let lengths: Vec<u64> = vec![1, 10, 20, 50, 75, 100, 125, 150, 175, 200];
    let seeds = 0..5u64;
    let shots = 4096u64;

    let config = RbConfig::uniform(vec![vec![0, 1], vec![2]], lengths.clone());
    let reference_params = vec![
        DecayParams::new(0.72, 0.975, 0.26),
        DecayParams::new(0.48, 0.995, 0.51),
    ];
    let interleaved_params = vec![
        DecayParams::new(0.72, 0.955, 0.26),
        DecayParams::new(0.48, 0.991, 0.51),
    ];

    println!("Configuration:");
    println!("  • Patterns: {}", config.patterns);
    println!("  • Lengths: {:?}", lengths);
    println!("  • Seeds: {:?}", seeds);
    println!("  • Shots per circuit: {}", shots);
    println!();

    // =========================================================================
    // Standard RB
    // =========================================================================
    let reference = SyntheticRb::new(&config, reference_params)?
        .with_shots(shots)
        .with_seed_spread(0.005);
    let reference_batches = reference.generate(seeds.clone())?;

    let fitter = RbFitter::new(reference_batches.clone(), config.clone())?;
    println!("{}", fitter);

    let summary = RbSummary::from_fitter(&fitter);
    println!("{}", Reporter::report(&summary, ReportFormat::Text));
    println!("{}", Reporter::report(&summary, ReportFormat::Markdown));

    // =========================================================================
    // Interleaved RB
    // =========================================================================
    let interleaved = SyntheticRb::new(&config, interleaved_params)?
        .with_shots(shots)
        .with_seed_spread(0.005)
        .with_experiment_type(names::INTERLEAVED_TYPE)
        .with_rng_seed(7);

    let irb = InterleavedRbFitter::new(
        reference_batches,
        interleaved.generate(seeds)?,
        config,
    )?;
    println!("{}", irb);

    let irb_summary = RbSummary::from_interleaved(&irb);
    println!("{}", Reporter::report(&irb_summary, ReportFormat::Text));
    println!("{}", Reporter::report(&irb_summary, ReportFormat::Csv));

    // =========================================================================
    // Plot export
    // =========================================================================
    let plot = PlotData::from_interleaved(&irb, 0)?;
    println!("Plot series for pattern 0:");
    for series in &plot.series {
        println!("  {:<20} {:?} ({} points)", series.name, series.kind, series.x.len());
    }
    if let Some(label) = &plot.label {
        println!("  label: {}", label);
    }

    Ok(())
}
