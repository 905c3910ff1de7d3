use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use arbor_id3::{DecisionTree, DecisionTreeConfig, Importance, RankedAttribute, restaurant};
use arbor_io::{
    DEFAULT_LABEL_COLUMN, ExampleDataset, ExampleReader, ExperimentName, PredictionRecord,
    ReportWriter,
};

#[derive(Parser)]
#[command(name = "arbor")]
#[command(about = "ID3 decision trees over categorical examples")]
#[command(version)]
struct Cli {
    /// Defaults to `demo`
    #[command(subcommand)]
    command: Option<Command>,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,
}

/// Shared training parameters.
#[derive(Args, Debug, Clone)]
struct TrainArgs {
    /// Path to the training CSV file
    #[arg(long)]
    data: PathBuf,

    /// Header name of the label column
    #[arg(long, default_value = DEFAULT_LABEL_COLUMN)]
    label_column: String,

    /// Attribute selection: "gain" (information gain) or "first" (attribute order)
    #[arg(long, default_value = "gain")]
    importance: String,
}

#[derive(Subcommand)]
enum Command {
    /// Build a tree from the built-in restaurant dataset, print it, classify one visit
    Demo,

    /// Build a tree from a CSV file and print it with a JSON summary
    Train {
        #[command(flatten)]
        train: TrainArgs,
    },

    /// Build a tree from a CSV file and classify every row of a second CSV file
    Predict {
        #[command(flatten)]
        train: TrainArgs,

        /// Path to the CSV file of rows to classify
        #[arg(long)]
        queries: PathBuf,

        /// Experiment name for output files (must match [a-zA-Z0-9_-]+)
        #[arg(long)]
        experiment: String,

        /// Output directory for result files
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct TrainOutput {
    n_examples: usize,
    n_attributes: usize,
    n_nodes: usize,
    n_leaves: usize,
    depth: usize,
    training_accuracy: f64,
    attribute_importances: Vec<RankedAttribute>,
}

#[derive(Serialize)]
struct PredictOutput {
    experiment: String,
    n_queries: usize,
    n_unknown: usize,
    accuracy: Option<f64>,
    report: PathBuf,
}

fn parse_importance(s: &str) -> Result<Importance> {
    match s {
        "gain" => Ok(Importance::InformationGain),
        "first" => Ok(Importance::FirstAttribute),
        other => anyhow::bail!("unknown importance policy: {other} (expected gain or first)"),
    }
}

fn read_dataset(path: &Path, label_column: &str) -> Result<ExampleDataset> {
    ExampleReader::new(path)
        .with_label_column(label_column)
        .read()
        .with_context(|| format!("failed to read {}", path.display()))
}

fn fit(args: &TrainArgs) -> Result<(ExampleDataset, DecisionTree)> {
    let importance = parse_importance(&args.importance)?;
    let dataset = read_dataset(&args.data, &args.label_column)?;
    let tree = DecisionTreeConfig::new()
        .with_importance(importance)
        .fit(dataset.examples(), &dataset.attributes())
        .context("training failed")?;
    info!(
        n_nodes = tree.n_nodes(),
        depth = tree.depth(),
        "tree trained"
    );
    Ok((dataset, tree))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut stdout = std::io::stdout().lock();

    match cli.command.unwrap_or(Command::Demo) {
        Command::Demo => {
            let examples = restaurant::examples();
            let tree = DecisionTreeConfig::new()
                .fit(&examples, &restaurant::attributes())
                .context("training failed")?;

            writeln!(stdout, "Decision Tree:")?;
            arbor_id3::print_tree(tree.root(), "", &mut stdout)?;

            let query = restaurant::query();
            writeln!(stdout)?;
            writeln!(stdout, "Prediction for the new example: {}", tree.predict(&query))?;
        }

        Command::Train { train } => {
            let (dataset, tree) = fit(&train)?;
            let training = tree
                .evaluate(dataset.examples())
                .context("training set has no labeled rows")?;

            write!(stdout, "{tree}")?;
            let output = TrainOutput {
                n_examples: dataset.n_examples(),
                n_attributes: dataset.n_attributes(),
                n_nodes: tree.n_nodes(),
                n_leaves: tree.n_leaves(),
                depth: tree.depth(),
                training_accuracy: training.accuracy(),
                attribute_importances: tree.attribute_importances(),
            };
            writeln!(stdout, "{}", serde_json::to_string_pretty(&output)?)?;
        }

        Command::Predict {
            train,
            queries,
            experiment,
            output_dir,
        } => {
            let experiment_name = ExperimentName::new(experiment.clone())?;
            let (_, tree) = fit(&train)?;

            let queries = read_dataset(&queries, &train.label_column)?;
            let predicted = tree.predict_batch(queries.examples());
            let records: Vec<PredictionRecord<'_>> = queries
                .examples()
                .iter()
                .zip(&predicted)
                .map(|(example, label)| PredictionRecord::new(example, label))
                .collect();

            let writer = ReportWriter::new(&output_dir, experiment_name)?;
            let report = writer.write_predictions(&records)?;

            let n_labeled = records.iter().filter(|r| r.actual.is_some()).count();
            let n_correct = records.iter().filter(|r| r.is_correct()).count();
            let output = PredictOutput {
                experiment,
                n_queries: records.len(),
                n_unknown: predicted
                    .iter()
                    .filter(|&&label| label == tree.unknown_label())
                    .count(),
                accuracy: (n_labeled > 0).then(|| n_correct as f64 / n_labeled as f64),
                report,
            };
            writeln!(stdout, "{}", serde_json::to_string_pretty(&output)?)?;
        }
    }

    Ok(())
}
