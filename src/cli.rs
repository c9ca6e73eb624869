use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

fn styles() -> Styles {
	let blue = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue)));
	Styles::styled()
		.header(blue.bold())
		.usage(blue.bold())
		.literal(blue)
		.placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))))
		.valid(blue)
		.invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))))
}

#[derive(Parser, Debug)]
#[command(
	name = "roam",
	author,
	version,
	about = "Semantic travel-offer matching",
	styles = styles(),
	disable_help_subcommand = true,
	after_help = format!(
		"{title}
  {roam} {index}  {index_args}      {index_desc}
  {roam} {find}   {find_args}   {find_desc}
  {roam} {find}   {find_pref_args}   {find_pref_desc}
  {roam} {info}   {info_args}      {info_desc}",
		title = "Examples:".bright_blue().bold(),
		roam = "roam".bright_blue(),
		index = "index".yellow(),
		index_args = "-c offers.json",
		index_desc = "Build the vector index".dimmed(),
		find = "match".yellow(),
		find_args = "-c offers.json \"temples and food\"",
		find_desc = "Free-text matching".dimmed(),
		find_pref_args = "-c offers.json -d japan -n 12",
		find_pref_desc = "Preference-driven matching".dimmed(),
		info = "info".yellow(),
		info_args = "-c offers.json",
		info_desc = "Catalogue statistics".dimmed(),
	),
)]
pub struct Cli {
	/// Enable verbose debug output
	#[arg(short = 'v', long = "verbose", global = true)]
	pub verbose: bool,

	/// Engine configuration file (JSON), defaults otherwise
	#[arg(long = "config", global = true)]
	pub config: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Build the vector index from a catalogue and persist it
	Index {
		/// Offer catalogue (JSON array)
		#[arg(short = 'c', long = "catalog")]
		catalog: PathBuf,

		/// Snapshot output path
		#[arg(short = 'o', long = "output", default_value = "roam-index.msgpack")]
		output: PathBuf,
	},

	/// Match offers against preferences and/or free text
	#[command(name = "match")]
	Match {
		/// Free-text wishes ("temples, street food, not too long")
		query: Option<String>,

		/// Offer catalogue (JSON array)
		#[arg(short = 'c', long = "catalog")]
		catalog: PathBuf,

		/// Persisted index snapshot; rebuilt when missing or stale
		#[arg(short = 's', long = "snapshot", default_value = "roam-index.msgpack")]
		snapshot: PathBuf,

		/// Preferred destination (country or city)
		#[arg(short = 'd', long = "destination")]
		destination: Option<String>,

		/// Preferred duration in days
		#[arg(short = 'n', long = "days")]
		days: Option<u32>,

		/// Budget per person
		#[arg(short = 'b', long = "budget")]
		budget: Option<f64>,

		/// Travel style (adventure, beach, culture, ...)
		#[arg(long = "style")]
		style: Option<String>,

		/// Group size
		#[arg(short = 'g', long = "group")]
		group: Option<u32>,

		/// Travel month
		#[arg(short = 'm', long = "month")]
		month: Option<String>,

		/// Number of results
		#[arg(short = 'k', long = "top", default_value_t = 5)]
		top: usize,

		/// Skip the vector index, force keyword matching
		#[arg(long = "keywords-only")]
		keywords_only: bool,

		/// Emit results as JSON instead of a table
		#[arg(long = "json")]
		json: bool,
	},

	/// Show catalogue statistics
	Info {
		/// Offer catalogue (JSON array)
		#[arg(short = 'c', long = "catalog")]
		catalog: PathBuf,
	},
}
