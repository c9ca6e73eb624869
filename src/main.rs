//! Roam - semantic travel-offer matching
//!
//! CLI front-end over the matching engine: build and persist the
//! vector index, run preference queries, inspect the catalogue. Uses
//! the bundled feature-hashing embedder; a deployment with a real
//! model injects its own `EmbeddingProvider` through the library API.

mod cli;

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use roam::catalog::{CorpusSource, JsonCatalog};
use roam::ui;
use roam::{FeatureHashEmbedder, MatchConfig, MatchEngine, MatchResult, OfferRecord, PreferenceSet};

use cli::{Cli, Command};

fn main() -> Result<()> {
	let cli = Cli::parse();
	ui::Log::set_verbose(cli.verbose);

	let config = match &cli.config {
		Some(path) => load_config(path)?,
		None => MatchConfig::default(),
	};

	match cli.command {
		Command::Index { catalog, output } => run_index(&catalog, &output, config),
		Command::Match {
			query,
			catalog,
			snapshot,
			destination,
			days,
			budget,
			style,
			group,
			month,
			top,
			keywords_only,
			json,
		} => {
			let prefs = PreferenceSet {
				destination,
				duration_days: days,
				budget,
				style,
				group_size: group,
				travel_month: month,
				free_text: query,
			};
			run_match(&catalog, &snapshot, prefs, top, keywords_only, json, config)
		}
		Command::Info { catalog } => run_info(&catalog),
	}
}

fn load_config(path: &Path) -> Result<MatchConfig> {
	let content = fs::read_to_string(path)
		.with_context(|| format!("Read config {}", path.display()))?;
	serde_json::from_str(&content).with_context(|| format!("Parse config {}", path.display()))
}

fn engine_with(config: MatchConfig) -> MatchEngine {
	MatchEngine::new(Arc::new(FeatureHashEmbedder::default()), config)
}

fn load_catalog(path: &Path) -> Result<Vec<OfferRecord>> {
	JsonCatalog::new(path).load_offers().context("Load catalogue")
}

fn run_index(catalog_path: &Path, output: &Path, config: MatchConfig) -> Result<()> {
	ui::print_logo();
	ui::header("Index");

	let start = Instant::now();
	let offers = load_catalog(catalog_path)?;
	ui::info(&format!("Loaded {} offers from {}", offers.len(), catalog_path.display()));

	let engine = engine_with(config);
	let count = offers.len();
	engine.rebuild(offers).context("Build index")?;

	if engine.index_ready() {
		engine.persist(output).context("Persist snapshot")?;
		ui::success(&format!(
			"Indexed {} offers in {:.2}s → {}",
			count,
			start.elapsed().as_secs_f32(),
			output.display()
		));
	} else {
		ui::warn("Nothing to index");
	}
	Ok(())
}

fn run_match(
	catalog_path: &Path,
	snapshot: &Path,
	prefs: PreferenceSet,
	top: usize,
	keywords_only: bool,
	json: bool,
	config: MatchConfig,
) -> Result<()> {
	if !json {
		ui::print_logo();
		ui::header("Match");
	}

	let offers = load_catalog(catalog_path)?;
	let engine = engine_with(config);

	if keywords_only {
		engine.set_corpus(offers);
	} else if snapshot.exists() {
		engine.load_or_build(snapshot, offers).context("Load or rebuild index")?;
	} else {
		engine.rebuild(offers).context("Build index")?;
	}

	let start = Instant::now();
	let results = engine.recommend(&prefs, top)?;

	if json {
		println!("{}", serde_json::to_string_pretty(&results)?);
		return Ok(());
	}

	if results.is_empty() {
		ui::warn("No matching offers");
		return Ok(());
	}

	for result in &results {
		print_result(result);
	}
	ui::debug(&format!("Matched in {:.0}ms", start.elapsed().as_secs_f64() * 1000.0));
	Ok(())
}

fn print_result(result: &MatchResult) {
	let places: Vec<&str> = result.destinations.iter().map(|d| d.city.as_str()).collect();
	println!(
		"{} {} {}",
		format!("{:>2}.", result.rank).bright_blue().bold(),
		result.name.bright_white().bold(),
		format!("({} days, {})", result.duration_days, places.join(" → ")).dimmed(),
	);
	println!(
		"     {} {}",
		result.reference.yellow(),
		format!(
			"fused {:.2} · similarity {:.2} · preference {:.2}",
			result.fused_score, result.similarity, result.preference_score
		)
		.dimmed(),
	);
}

fn run_info(catalog_path: &Path) -> Result<()> {
	ui::print_logo();
	ui::header("Catalogue");

	let offers = load_catalog(catalog_path)?;
	let with_price = offers.iter().filter(|o| o.price.is_some()).count();
	let avg_days: f64 = if offers.is_empty() {
		0.0
	} else {
		offers.iter().map(|o| o.duration_days as f64).sum::<f64>() / offers.len() as f64
	};

	let mut countries: Vec<&str> = offers.iter().flat_map(|o| o.country_codes()).collect();
	countries.sort_unstable();
	countries.dedup();

	ui::info(&format!("Offers:     {}", offers.len()));
	ui::info(&format!("Countries:  {}", countries.len()));
	ui::info(&format!("Priced:     {}/{}", with_price, offers.len()));
	ui::info(&format!("Avg length: {:.1} days", avg_days));
	Ok(())
}
