//! Unified logging system

use colored::*;
use rand::RngExt;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

const LOGO: &str = r#"
    ____
   / __ \____  ____ _____ ___
  / /_/ / __ \/ __ `/ __ `__ \
 / _, _/ /_/ / /_/ / / / / / /
/_/ |_|\____/\__,_/_/ /_/ /_/ "#;

const SLOGANS: &[&str] = &[
	"Itineraries, but make them vectors",
	"Where wanderlust meets cosine similarity",
	"BEEP. BOOP. Bon voyage!",
	"14 days of Japan, 12ms of ranking",
	"\"Somewhere warm with good food\", say less",
	"We read the brochure so you don't have to",
	"Because CTRL+F can't plan a honeymoon",
	"Your budget called, it wants band 0.75",
	"Packs light: no GPU required",
	"Not all who wander are unranked",
];

pub fn random_slogan() -> &'static str {
	let idx = rand::rng().random_range(0..SLOGANS.len());
	SLOGANS[idx]
}

pub fn print_logo() {
	println!("{}", LOGO.bright_blue().bold());
	println!("{}", random_slogan().dimmed().italic());
}

pub struct Log;

impl Log {
	pub fn set_verbose(enabled: bool) {
		VERBOSE.store(enabled, Ordering::Relaxed);
	}

	pub fn is_verbose() -> bool {
		VERBOSE.load(Ordering::Relaxed)
	}
}

pub fn info(msg: &str) {
	println!("{} {}", "ℹ".bright_blue().bold(), msg.bright_white());
}

pub fn success(msg: &str) {
	println!("{} {}", "✓".bright_green().bold(), msg.bright_white());
}

pub fn warn(msg: &str) {
	println!("{} {}", "⚠".bright_yellow().bold(), msg.bright_white());
}

pub fn error(msg: &str) {
	println!("{} {}", "✗".bright_red().bold(), msg.bright_white());
}

pub fn debug(msg: &str) {
	if Log::is_verbose() {
		println!("{} {}", "⚙".bright_black().bold(), msg.dimmed());
	}
}

pub fn header(text: &str) {
	println!("\n{}", text.bright_blue().bold());
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn slogan_comes_from_the_list() {
		for _ in 0..20 {
			assert!(SLOGANS.contains(&random_slogan()));
		}
	}
}
