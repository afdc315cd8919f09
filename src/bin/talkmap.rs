//! talkmap CLI — lay out a conference talk roster.
//!
//! Usage:
//!   talkmap layout <talks.csv> [--config file.yaml] [--seed N] [--perplexity P]
//!   talkmap replot <vectorised.csv> [--config file.yaml]
//!   talkmap taxonomy <topics.csv> [--config file.yaml]
//!   talkmap similar <talks.csv> --index I [--top K] [--config file.yaml]
//!
//! Datasets are written to stdout as JSON; logs go to stderr.

use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use talkmap::{
    nearest, read_precomputed_path, read_talks_path, read_taxonomy_path, similarity_matrix,
    Pipeline, PipelineConfig, TalkMapResult,
};

#[derive(Parser)]
#[command(
    name = "talkmap",
    version,
    about = "Semantic layout of conference talks grouped by session"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Path to a YAML pipeline configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log level written to stderr (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,
}

#[derive(Subcommand)]
enum Commands {
    /// Embed, project and order a talk roster
    Layout {
        /// Talks CSV with TITLE, ABSTRACT, TYPE, FIRST_NAME, LAST_NAME
        talks: PathBuf,
        /// Override the projector seed
        #[arg(long)]
        seed: Option<u64>,
        /// Override the projector perplexity
        #[arg(long)]
        perplexity: Option<f64>,
    },
    /// Re-order a pre-computed layout (x, y, TITLE, TYPE, Speaker)
    Replot {
        /// Pre-computed layout CSV
        layout: PathBuf,
    },
    /// Canonicalize and order a session taxonomy (MS Topic column)
    Taxonomy {
        /// Taxonomy CSV
        topics: PathBuf,
    },
    /// List the talks most similar to one talk
    Similar {
        /// Talks CSV
        talks: PathBuf,
        /// Row index of the talk to compare against
        #[arg(long)]
        index: usize,
        /// Number of neighbours to list
        #[arg(long, default_value_t = 5)]
        top: usize,
    },
}

fn load_config(path: Option<&Path>) -> TalkMapResult<PipelineConfig> {
    match path {
        Some(path) => PipelineConfig::load(path),
        None => Ok(PipelineConfig::default()),
    }
}

fn print_json(value: &impl serde::Serialize) -> TalkMapResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_layout(
    mut config: PipelineConfig,
    talks: &Path,
    seed: Option<u64>,
    perplexity: Option<f64>,
) -> TalkMapResult<()> {
    if let Some(seed) = seed {
        config.projector.seed = seed;
    }
    if let Some(perplexity) = perplexity {
        config.projector.perplexity = perplexity;
    }
    let pipeline = Pipeline::from_config(config)?;
    let dataset = pipeline.run(read_talks_path(talks)?)?;
    print_json(&dataset)
}

fn cmd_replot(config: PipelineConfig, layout: &Path) -> TalkMapResult<()> {
    let pipeline = Pipeline::from_config(config)?;
    let dataset = pipeline.replot(read_precomputed_path(layout)?)?;
    print_json(&dataset)
}

fn cmd_taxonomy(config: PipelineConfig, topics: &Path) -> TalkMapResult<()> {
    let taxonomy = read_taxonomy_path(topics, config.malformed_labels)?;
    print_json(&taxonomy)
}

fn cmd_similar(
    config: PipelineConfig,
    talks: &Path,
    index: usize,
    top: usize,
) -> TalkMapResult<()> {
    let pipeline = Pipeline::from_config(config)?;
    let talks = read_talks_path(talks)?;
    let Some(target) = talks.get(index) else {
        return Err(talkmap::TalkMapError::Config(format!(
            "--index {} is out of range for {} talks",
            index,
            talks.len()
        )));
    };
    let matrix = similarity_matrix(&pipeline.embed(&talks)?);
    let neighbours: Vec<_> = nearest(&matrix, index, top)
        .into_iter()
        .map(|(i, score)| {
            json!({
                "id": i,
                "TITLE": talks[i].title,
                "Speaker": talks[i].speaker_full_name,
                "similarity": score,
            })
        })
        .collect();
    print_json(&json!({
        "id": index,
        "TITLE": target.title,
        "neighbours": neighbours,
    }))
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(cli.log_level)
        .init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Layout {
            talks,
            seed,
            perplexity,
        } => cmd_layout(config, &talks, seed, perplexity),
        Commands::Replot { layout } => cmd_replot(config, &layout),
        Commands::Taxonomy { topics } => cmd_taxonomy(config, &topics),
        Commands::Similar { talks, index, top } => cmd_similar(config, &talks, index, top),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
