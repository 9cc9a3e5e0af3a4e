use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use story_advisor::config::AdvisorConfig;
use story_advisor::scoring::{CompatibilityMatrix, MatrixCell};
use story_advisor::{format_float, Advisor, AdvisorError, ReferenceData, SelectionSet};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "story-advisor", about = "Story element marketing advisor")]
struct Cli {
    /// Path to the TOML config (defaults to STORY_ADVISOR_CONFIG_PATH or config/story-advisor.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Advertiser, release-date and positioning recommendations for a set of story elements
    Recommend(RecommendArgs),
    /// Compatibility of the selected story elements and the best additions
    Compat(CompatArgs),
    /// Write the effective configuration to disk
    InitConfig(InitConfigArgs),
}

#[derive(Args, Debug, Clone)]
struct RecommendArgs {
    #[arg(long = "tag", required = true, value_delimiter = ',')]
    tags: Vec<String>,
    #[arg(long)]
    details: bool,
}

#[derive(Args, Debug, Clone)]
struct CompatArgs {
    #[arg(long = "tag", required = true, value_delimiter = ',')]
    tags: Vec<String>,
    #[arg(long)]
    matrix: bool,
    #[arg(long)]
    limit: Option<usize>,
}

#[derive(Args, Debug, Clone)]
struct InitConfigArgs {
    #[arg(long)]
    path: Option<PathBuf>,
}

fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let (config, config_path) = AdvisorConfig::load(cli.config).map_err(|err| err.to_string())?;

    match cli.command {
        Command::Recommend(args) => run_recommend(&config, args),
        Command::Compat(args) => run_compat(&config, args),
        Command::InitConfig(args) => {
            let path = args
                .path
                .or(config_path)
                .unwrap_or_else(|| PathBuf::from("config/story-advisor.toml"));
            config.write(&path).map_err(|err| err.to_string())?;
            println!("Wrote config to {}", path.display());
            Ok(())
        }
    }
}

fn build_advisor(config: &AdvisorConfig) -> Advisor {
    let loaded = ReferenceData::load(&config.data);
    for err in &loaded.errors {
        eprintln!("Warning: {}", err);
    }
    Advisor::with_builtin_roster(loaded.data)
}

fn run_recommend(config: &AdvisorConfig, args: RecommendArgs) -> Result<(), String> {
    let advisor = build_advisor(config);
    let selection: SelectionSet = args.tags.into_iter().collect();

    let recommendation = match advisor.recommend(&selection) {
        Ok(recommendation) => recommendation,
        Err(AdvisorError::EmptySelection { .. }) => {
            println!("No valid story elements selected. Nothing to compute.");
            return Ok(());
        }
    };

    if !recommendation.missing_categories.is_empty() {
        let labels: Vec<String> = recommendation
            .missing_categories
            .iter()
            .map(|category| category.label())
            .collect();
        println!(
            "Warning: no story elements selected for mandatory categories: {}\n",
            labels.join(", ")
        );
    }

    println!("Selected story elements:");
    for tag in &recommendation.selected {
        println!("  {}: {}", tag.category.label(), tag.display_name);
    }
    for tag_id in &recommendation.ignored {
        println!("  (ignored, unknown) {}", tag_id);
    }

    println!("\nContent evaluation");
    println!(
        "  Commercial score: {}/5.0",
        format_float(recommendation.positioning.commercial, 2)
    );
    println!(
        "  Artistic score: {}/5.0",
        format_float(recommendation.positioning.artistic, 2)
    );

    println!("\nTarget audiences");
    let interested = &recommendation.advertisers.interested;
    if interested.codes.is_empty() {
        println!("  No audiences showed any interest (all weights = 0).");
    } else {
        for code in &interested.codes {
            println!(
                "  - {}: {}/5.0",
                code.label(),
                format_float(recommendation.profile.get(*code), 2)
            );
        }
        if interested.fallback {
            println!("  Note: no audience reached a weight of 2.5; showing the top audiences instead.");
        }
    }

    println!("\nBest advertisers");
    let shortlist = recommendation.advertisers.shortlist();
    if shortlist.fallback && !shortlist.advertisers.is_empty() {
        println!("  No advertisers met the quality threshold. Showing top advertisers:");
    }
    if shortlist.advertisers.is_empty() {
        println!("  No suitable advertisers found.");
    }
    for advertiser in shortlist.advertisers {
        println!(
            "  > {} (score: {})",
            advertiser.display_name,
            format_float(advertiser.match_score, 1)
        );
    }

    println!("\nBest holidays to release");
    if recommendation.holidays.is_empty() {
        println!("  No holiday recommendations available.");
    }
    for (index, holiday) in recommendation
        .holidays
        .iter()
        .take(config.display.holiday_limit)
        .enumerate()
    {
        let stars = holiday.star_rating() as usize;
        println!(
            "  {}. {} ({}): {}{}",
            index + 1,
            holiday.display_name,
            holiday.display_date,
            "★".repeat(stars),
            "☆".repeat(5 - stars)
        );
        if holiday.factors.is_empty() {
            continue;
        }
        let relevant = holiday.relevant_factors(&recommendation.profile, usize::MAX);
        if relevant.is_empty() {
            println!("     General audience appeal");
        } else {
            let mut shown: Vec<String> = relevant
                .iter()
                .take(config.display.holiday_match_limit)
                .map(|factor| factor.display())
                .collect();
            if relevant.len() > config.display.holiday_match_limit {
                shown.push("...".to_string());
            }
            println!("     Audience matches: {}", shown.join(", "));
        }
    }

    if args.details {
        println!("\nAudience profile:");
        for (code, weight) in recommendation.profile.iter() {
            println!("  {} ({}): {}", code.as_str(), code.label(), format_float(weight, 2));
        }
        println!("\nAll advertisers:");
        for advertiser in &recommendation.advertisers.matches {
            println!(
                "  {}: {}",
                advertiser.display_name,
                format_float(advertiser.match_score, 2)
            );
        }
        println!("\nReference data: {}", recommendation.data_fingerprint);
    }

    Ok(())
}

fn run_compat(config: &AdvisorConfig, args: CompatArgs) -> Result<(), String> {
    let advisor = build_advisor(config);
    let selection: SelectionSet = args.tags.into_iter().collect();
    let report = advisor.compatibility(&selection);

    if selection.len() < 2 {
        println!("Average compatibility: N/A");
    } else {
        println!("Average compatibility: {}", report.average);
    }

    let limit = args.limit.unwrap_or(config.display.candidate_limit);
    if !report.candidates.is_empty() {
        println!("\nMost compatible additions:");
    }
    for candidate in report.candidates.iter().take(limit) {
        let marker = if candidate.highly_compatible { "*" } else { " " };
        println!(
            "  {} {} ({})",
            marker,
            advisor.data().tags.display_name(&candidate.tag_id),
            format_float(candidate.score, 2)
        );
    }

    if args.matrix {
        if selection.len() < 2 {
            println!("\nSelect at least two story elements to show a compatibility matrix.");
        } else {
            print_matrix(&advisor, &advisor.compatibility_matrix(&selection));
        }
    }

    Ok(())
}

fn print_matrix(advisor: &Advisor, matrix: &CompatibilityMatrix) {
    let names: Vec<String> = matrix
        .tags
        .iter()
        .map(|tag_id| advisor.data().tags.display_name(tag_id))
        .collect();
    let width = names.iter().map(|name| name.chars().count()).max().unwrap_or(0);

    println!("\nCompatibility matrix:");
    for (name, row) in names.iter().zip(&matrix.cells) {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| match cell {
                MatrixCell::Diagonal => "  -  ".to_string(),
                MatrixCell::Score(score) => format!("{:>5}", format_float(*score, 1)),
                MatrixCell::NoData => " N/A ".to_string(),
            })
            .collect();
        println!("  {:<width$} {}", name, cells.join(" "), width = width);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
