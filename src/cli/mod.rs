// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Three commands are supported:
//   1. `train`   — fits the forest on a CSV sample and saves it
//   2. `predict` — loads the bundle and reports one salary estimate
//   3. `vocab`   — lists each label with its code, and the forest's
//                  own training parameters
//
// All formatting of salaries for the terminal lives here.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use std::fmt::Write;
use commands::{Commands, PredictArgs, TrainArgs, VocabArgs};

use crate::application::predict_use_case::{PredictUseCase, SalaryReport};
use crate::application::train_use_case::TrainUseCase;
use crate::domain::schema::CategoricalColumn;
use crate::infra::artifact_store::ArtifactStore;

#[derive(Parser, Debug)]
#[command(
    name = "salary-predictor",
    version,
    about = "Train a random-forest salary model on a CSV sample, then estimate salaries."
)]
pub struct Cli {
    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the matching handler. Handlers only route and print.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)   => run_train(args),
            Commands::Predict(args) => run_predict(args),
            Commands::Vocab(args)   => run_vocab(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    tracing::info!("Starting training on sample: {}", args.dataset);

    let artifact_dir = args.artifact_dir.clone();
    let metrics      = TrainUseCase::new(args.into()).execute()?;

    println!("Training complete. Artifacts saved to '{artifact_dir}'.");
    println!(
        "  rows: {}   MAE: {:.2}   RMSE: {:.2}   R²: {:.4}",
        metrics.rows, metrics.mae, metrics.rmse, metrics.r2
    );
    Ok(())
}

fn run_predict(args: PredictArgs) -> Result<()> {
    let use_case = PredictUseCase::new(&args.artifact_dir)?;
    let profile  = args.to_profile(use_case.encoders())?;
    let report   = use_case.predict(&profile)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn run_vocab(args: VocabArgs) -> Result<()> {
    let store = ArtifactStore::new(&args.artifact_dir);
    print!("{}", vocab_report(&store)?);
    Ok(())
}

// ─── Presentation ─────────────────────────────────────────────────────────────
/// Every column's labels with their codes, then the parameters the
/// persisted forest reports for itself.
fn vocab_report(store: &ArtifactStore) -> Result<String> {
    let bundle  = store.load_bundle()?;
    let mut out = String::new();

    for column in CategoricalColumn::ALL {
        writeln!(out, "{column}:")?;
        let encoder = bundle.encoders().get(column)?;
        for code in 0..encoder.classes().len() {
            writeln!(out, "  {code:>3}  {}", encoder.inverse(code)?)?;
        }
    }

    // The dataset path only lives in train_config.json, which may be absent.
    let forest = bundle.model().config();
    let depth  = forest.max_depth.map_or_else(|| "unlimited".to_string(), |d| d.to_string());
    writeln!(
        out,
        "\nModel: {} trees, seed {}, max depth {}, min samples per split {}.",
        forest.n_trees, forest.seed, depth, forest.min_samples_split
    )?;
    if let Ok(cfg) = store.load_config() {
        writeln!(out, "Trained on '{}'.", cfg.dataset_path)?;
    }
    Ok(out)
}

fn print_report(report: &SalaryReport) {
    let p = &report.profile;
    let b = &report.breakdown;

    println!(
        "\nProfile: {} {} at {} ({}), {}, {} years old, {}",
        p.job_level, p.job_role, p.company_type, p.location, p.gender, p.age, p.education
    );
    println!("\nEstimated salary:  {}", currency(b.gross));
    if b.is_taxed() {
        println!("Tax (20%):         {}", currency(b.tax));
    }
    println!("In-hand salary:    {}", currency(b.net));

    println!("\nSalary vs. experience");
    println!("  {:>5}  {:>12}", "years", "salary");
    for point in &report.trend {
        println!("  {:>5}  {:>12}", point.experience, currency(point.salary));
    }

    println!("\nIndustry averages");
    for avg in &report.industry_averages {
        println!("  {:<12}{:>12}", avg.industry, currency(f64::from(avg.average_salary)));
    }
}

/// Round to whole units and group thousands: 62345.6 -> "₹62,346".
fn currency(amount: f64) -> String {
    let rounded  = amount.round();
    let digits   = format!("{:.0}", rounded.abs());
    let mut out  = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}₹{out}")
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    use crate::application::train_use_case::TrainConfig;
    use crate::data::dataset::fixtures::sample_records;
    use crate::ml::forest::ForestConfig;
    use crate::ml::trainer::run_training;

    #[test]
    fn test_vocab_lists_codes_and_model_parameters() {
        let dir    = tempfile::tempdir().unwrap();
        let store  = ArtifactStore::new(dir.path());
        let forest = ForestConfig { n_trees: 5, seed: 7, ..ForestConfig::default() };
        let bundle = run_training(&sample_records(40), forest).unwrap().bundle;
        let cfg    = TrainConfig { n_trees: 5, seed: 7, dataset_path: "sample.csv".into(), ..TrainConfig::default() };
        store.save_bundle(&bundle, &cfg).unwrap();

        let text = vocab_report(&store).unwrap();
        assert!(text.contains("remote_work:\n    0  No\n    1  Yes\n"));
        assert!(text.contains("Model: 5 trees, seed 7, max depth unlimited"));
        assert!(text.contains("Trained on 'sample.csv'."));

        // Without the config file the model still reports its parameters.
        std::fs::remove_file(dir.path().join("train_config.json")).unwrap();
        let text = vocab_report(&store).unwrap();
        assert!(text.contains("Model: 5 trees, seed 7"));
        assert!(!text.contains("Trained on"));
    }

    #[test]
    fn test_currency_groups_thousands() {
        assert_eq!(currency(0.0), "₹0");
        assert_eq!(currency(999.4), "₹999");
        assert_eq!(currency(62_000.0), "₹62,000");
        assert_eq!(currency(1_234_567.5), "₹1,234,568");
        assert_eq!(currency(-4_500.0), "-₹4,500");
    }
}
