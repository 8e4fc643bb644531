use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use wrep_core::{ColorWheel, Trial};
use wrep_experiment::{ExperimentConfig, build_block};

const USAGE: &str = "wrep-app [--config FILE] [--wheel FILE] [--seed N] [--out FILE]";

/// Headless front end: validates a configuration, then generates and saves
/// the full randomized protocol for one run, every block built from one
/// seed so a run can be reproduced exactly.
pub struct App {
    config_path: Option<PathBuf>,
    wheel_path: PathBuf,
    out_path: PathBuf,
    seed: Option<u64>,
}

impl App {
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut app = Self {
            config_path: None,
            wheel_path: PathBuf::from("assets/colors.json"),
            out_path: PathBuf::from("protocol.json"),
            seed: None,
        };
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => app.config_path = Some(value(&mut args, "--config")?.into()),
                "--wheel" => app.wheel_path = value(&mut args, "--wheel")?.into(),
                "--out" => app.out_path = value(&mut args, "--out")?.into(),
                "--seed" => {
                    app.seed = Some(
                        value(&mut args, "--seed")?
                            .parse()
                            .context("--seed expects an unsigned integer")?,
                    )
                }
                other => bail!("unknown argument {other}\nusage: {USAGE}"),
            }
        }
        Ok(app)
    }

    pub fn run(&self) -> Result<()> {
        let config = self.load_config()?;
        config.validate()?;

        let wheel = ColorWheel::load(&self.wheel_path)
            .with_context(|| format!("loading color wheel {}", self.wheel_path.display()))?;

        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = StdRng::seed_from_u64(seed);

        println!("=== WHOLE REPORT EXPERIMENT ===");
        println!("Platform: {}", std::env::consts::OS);
        println!("Seed: {}", seed);
        println!("Set sizes: {:?}", config.set_sizes);
        println!(
            "Blocks: {} x {} trials",
            config.number_of_blocks,
            config.trials_per_block()
        );

        let blocks: Vec<Vec<Trial>> = (0..config.number_of_blocks)
            .map(|_| build_block(&mut rng, &wheel, &config))
            .collect();

        let items: usize = blocks
            .iter()
            .flatten()
            .map(|trial| trial.set_size)
            .sum();
        println!("Generated {} items across {} blocks", items, blocks.len());

        let out = File::create(&self.out_path)
            .with_context(|| format!("creating {}", self.out_path.display()))?;
        serde_json::to_writer_pretty(out, &blocks)?;
        println!("Protocol written to {}", self.out_path.display());

        Ok(())
    }

    fn load_config(&self) -> Result<ExperimentConfig> {
        match &self.config_path {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("opening config {}", path.display()))?;
                serde_json::from_reader(file)
                    .with_context(|| format!("parsing config {}", path.display()))
            }
            None => Ok(ExperimentConfig::default()),
        }
    }
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .with_context(|| format!("{flag} expects a value\nusage: {USAGE}"))
}
