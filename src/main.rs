use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pact_match::config::{
	EnvSource, LayeredSource, discover_settings, merge_settings, user_settings_path,
};
use pact_match::diagnostics::TracingDiagnostics;
use pact_match::matchers::{
	match_depth, matcher_defined, path_weight, select_best_matcher, wildcard_matcher_defined,
	wildcard_matching_enabled,
};
use pact_match::rules::{MatchingRules, parse_rules_file};

#[derive(Parser)]
#[command(name = "pact-match")]
#[command(
	author,
	version,
	about = "Select the matching rule that applies at a request or response path"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	/// Matching rules file in Pact JSON format
	#[arg(long, short, global = true, value_name = "FILE")]
	rules: Option<PathBuf>,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Args)]
struct PathArgs {
	/// Rule category: body, header, query, path, ...
	#[arg(long, short, default_value = "body")]
	category: String,

	/// Path components from the root, e.g. `$ items 0 name` or `Accept`
	#[arg(required = true, allow_hyphen_values = true)]
	path: Vec<String>,
}

#[derive(Args)]
struct ExpressionArgs {
	/// Path expression, e.g. `$.items[*].name`
	expression: String,

	/// Path components from the root
	#[arg(required = true, allow_hyphen_values = true)]
	path: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
	/// Print whether any rule applies at the path
	Defined(PathArgs),
	/// Print whether a `.*` rule covers exactly the path
	Wildcard(PathArgs),
	/// Print the most specific rule for the path and its matchers
	Select(PathArgs),
	/// Print how many trailing path components an expression covers
	Depth(ExpressionArgs),
	/// Print the specificity weight of an expression for a path
	Weight(ExpressionArgs),
	/// Settings management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display settings files in cascade order with their properties
	Show,
	/// Print whether wildcard matching is enabled
	Wildcard,
}

fn main() -> ExitCode {
	init_tracing();

	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn init_tracing() {
	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| "pact_match=warn".into()),
		)
		.with(
			tracing_subscriber::fmt::layer()
				.with_writer(std::io::stderr)
				.with_ansi(false),
		)
		.init();
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Defined(args) => {
			let rules = load_rules(cli.rules.as_deref())?;
			let path = components(&args.path);
			let defined = matcher_defined(&args.category, &path, rules.as_ref(), &TracingDiagnostics);
			println!("{defined}");
			Ok(ExitCode::SUCCESS)
		}
		Commands::Wildcard(args) => {
			let rules = load_rules(cli.rules.as_deref())?;
			let path = components(&args.path);
			let defined =
				wildcard_matcher_defined(&path, &args.category, rules.as_ref(), &TracingDiagnostics);
			println!("{defined}");
			Ok(ExitCode::SUCCESS)
		}
		Commands::Select(args) => handle_select(cli.rules.as_deref(), &args),
		Commands::Depth(args) => {
			let path = components(&args.path);
			println!("{}", match_depth(&args.expression, &path, &TracingDiagnostics));
			Ok(ExitCode::SUCCESS)
		}
		Commands::Weight(args) => {
			let path = components(&args.path);
			println!("{}", path_weight(&args.expression, &path, &TracingDiagnostics));
			Ok(ExitCode::SUCCESS)
		}
		Commands::Config { action } => match action {
			ConfigAction::Show => handle_config_show(),
			ConfigAction::Wildcard => handle_config_wildcard(),
		},
	}
}

fn components(path: &[String]) -> Vec<&str> {
	path.iter().map(String::as_str).collect()
}

fn load_rules(path: Option<&Path>) -> Result<Option<MatchingRules>> {
	path.map(|p| {
		parse_rules_file(p).with_context(|| format!("Failed to load rules from {}", p.display()))
	})
	.transpose()
}

fn handle_select(rules_path: Option<&Path>, args: &PathArgs) -> Result<ExitCode> {
	let rules = load_rules(rules_path)?
		.ok_or_else(|| anyhow::anyhow!("--rules is required to select a matcher"))?;
	let path = components(&args.path);

	let selected = select_best_matcher(&rules, &args.category, &path, &TracingDiagnostics)
		.context("Failed to select a matcher")?;

	println!("{}", selected.expression);
	println!(
		"{}",
		serde_json::to_string(&selected.group).context("Failed to render rule group")?
	);
	Ok(ExitCode::SUCCESS)
}

fn handle_config_show() -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let loaded = discover_settings(&cwd).context("Failed to discover settings files")?;

	if loaded.is_empty() {
		println!("No settings files found.");
	} else {
		println!("Settings files (in cascade order):\n");

		for settings in &loaded {
			println!("# Source: {}", settings.path.display());
			println!("# root: {}", settings.settings.root);
			for (key, value) in &settings.settings.properties {
				println!("  {key} = {value:?}");
			}
			println!();
		}
	}

	if let Ok(user_path) = user_settings_path() {
		println!("User settings path: {}", user_path.display());
		if user_path.exists() {
			println!("  (exists)");
		} else {
			println!("  (not found)");
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_wildcard() -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let loaded = discover_settings(&cwd).context("Failed to discover settings files")?;
	let merged = merge_settings(&loaded);

	// Environment overrides settings files
	let env = EnvSource;
	let source = LayeredSource::new().with(&env).with(&merged);

	let enabled = wildcard_matching_enabled(&source);
	println!("{enabled}");

	Ok(ExitCode::SUCCESS)
}
