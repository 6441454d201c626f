use anyhow::Context;
use clap::Parser;

use fc_cli::{logging, run, OptimizeArgs};

fn main() -> anyhow::Result<()> {
    logging::init_logging();
    let args = OptimizeArgs::parse();

    let report = run(&args)
        .with_context(|| format!("optimization with config {} failed", args.config.display()))?;

    report
        .write_to(&args.output)
        .with_context(|| format!("failed to write results to {}", args.output.display()))?;

    println!("{}", report.summary());
    println!("Saved results to: {}", args.output.display());
    Ok(())
}
