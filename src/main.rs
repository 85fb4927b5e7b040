use anyhow::Context;
use simple_nn::{Trainer, TrainingConfig, LOSS_WINDOW};
use tracing_subscriber::EnvFilter;

/// Usage: simple-nn [config.json] [steps]
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => TrainingConfig::from_file(&path)
            .with_context(|| format!("loading training config from {}", path))?,
        None => TrainingConfig::default(),
    };
    let steps: usize = match args.next() {
        Some(s) => s.parse().with_context(|| format!("invalid step count: {}", s))?,
        None => 100,
    };

    println!("=== Feedforward Network Trainer ===\n");
    println!("Layer sizes: {:?}", config.layer_sizes());
    println!("Learning rate: {}", config.learning_rate);

    let mut trainer = Trainer::from_config(&config).context("building network")?;
    println!(
        "Activation: {} (requested \"{}\")",
        trainer.network().activation(),
        trainer.network().activation_name()
    );
    println!("Parameters: {}\n", trainer.network().num_parameters());

    let report_every = (steps / 10).max(1);
    for step in 1..=steps {
        let loss = trainer
            .train_step(&config.inputs, &config.targets, config.iterations_per_step)
            .context("training step")?;
        if step % report_every == 0 || step == steps {
            println!("step {:>5}  loss {:.6}", trainer.steps(), loss);
        }
    }

    let recent = trainer.recent_losses(LOSS_WINDOW);
    if let (Some(first), Some(last)) = (recent.first(), recent.last()) {
        println!(
            "\nLoss over the last {} updates: {:.6} -> {:.6}",
            recent.len(),
            first,
            last
        );
    }

    let output = trainer.network().predict(&config.inputs)?;
    println!("Output: {:?}", output);
    println!("Target: {:?}", config.targets);

    Ok(())
}
