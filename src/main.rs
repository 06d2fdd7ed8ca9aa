use anyhow::ensure;
use infogain::{Baseline, GainOptions, Table};
use serde::Deserialize;
use structopt::StructOpt;

#[derive(Debug, Deserialize)]
struct Input {
    features: Vec<Vec<f64>>,
    labels: Vec<Vec<f64>>,
}

#[derive(Debug, StructOpt)]
struct Opt {
    /// Feature column to split on.
    #[structopt(long, default_value = "1")]
    split_column: usize,

    /// Label table column holding the class label.
    #[structopt(long, default_value = "1")]
    label_column: usize,

    /// Subtract from the entropy of all labels instead of one bit.
    #[structopt(long)]
    parent_entropy: bool,

    /// Search every feature column for the best split.
    #[structopt(long)]
    best: bool,

    #[structopt(long)]
    parallel: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_args();
    let input: Input = serde_json::from_reader(std::io::stdin().lock())?;
    let features = Table::new(input.features)?;
    let labels = Table::new(input.labels)?;
    ensure!(features.columns_len() > 1, "too few feature columns");

    let baseline = if opt.parent_entropy {
        Baseline::ParentEntropy
    } else {
        Baseline::OneBit
    };
    let options = GainOptions::new()
        .label_column(opt.label_column)
        .baseline(baseline)
        .parallel(opt.parallel);

    log::debug!("features:\n{}", features);
    let split = if opt.best {
        let columns = (1..features.columns_len()).collect::<Vec<_>>();
        options.best_split(&features, &labels, &columns)?
    } else {
        Some(options.evaluate(&features, &labels, opt.split_column)?)
    };
    ensure!(split.is_some(), "no feature column can be split");

    serde_json::to_writer_pretty(std::io::stdout().lock(), &split)?;
    println!();

    Ok(())
}
