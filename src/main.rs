use std::fmt::Write as _;
use std::io::Read as _;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pool_grader::api::{build_router, state::AppState};
use pool_grader::calculate::{
    detect_synergies, is_creature_or_generator, pool_overview, suggest_color_pairs, Analyzer,
};
use pool_grader::catalog::RankingsCatalog;
use pool_grader::config::AppConfig;
use pool_grader::ingest::resolve_pool;
use pool_grader::models::{
    ArchetypeAnalysis, CardRecord, ColorPair, PairStat, PoolCard, RatedCard, SplashDifficulty,
    Tier,
};
use pool_grader::session::AnalysisSession;

#[derive(Parser)]
#[command(name = "pool-grader")]
#[command(about = "Grade a draft/sealed pool against the two-color archetypes")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./pool-grader.toml")]
    config: PathBuf,

    /// Rankings JSON file (defaults to the built-in table)
    #[arg(long)]
    rankings: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a pool list
    Analyze {
        /// Pool list file, one "<quantity> <name>" per line (stdin when omitted)
        file: Option<PathBuf>,

        /// Print the full analysis as JSON
        #[arg(long)]
        json: bool,

        /// Show this archetype instead of the best two
        #[arg(long)]
        pair: Option<String>,

        /// Show every archetype
        #[arg(long)]
        all: bool,
    },

    /// Look up a card in the rankings
    Card {
        /// Exact or partial card name
        name: String,
    },

    /// Check a card's synergies against a pool
    Synergies {
        /// Card name
        card: String,

        /// Pool list file
        #[arg(long)]
        pool: PathBuf,
    },

    /// Suggest colors for a pool
    Suggest {
        /// Pool list file (stdin when omitted)
        file: Option<PathBuf>,

        /// Number of pairs to suggest
        #[arg(long, default_value = "2")]
        count: usize,
    },

    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config {:?}", cli.config))?;

    // Initialize tracing; logs go to stderr so reports stay clean on stdout
    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::debug!("Starting pool-grader v{}", env!("CARGO_PKG_VERSION"));

    let rankings_path = cli.rankings.or(config.rankings_path.clone());
    let catalog = RankingsCatalog::load_or_embedded(rankings_path.as_deref());
    let analyzer = Analyzer::new(config.scoring.clone());

    match cli.command {
        Commands::Analyze {
            file,
            json,
            pair,
            all,
        } => {
            let text = read_pool_text(file.as_deref())?;
            let mut session = AnalysisSession::new(&catalog, &analyzer, &text);

            if let Some(pair) = pair {
                let pair: ColorPair = pair.parse().map_err(anyhow::Error::msg)?;
                session.select(pair);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&session)?);
            } else {
                print!("{}", render_session(&session, &analyzer, all));
            }
        }
        Commands::Card { name } => match catalog.lookup(&name) {
            Some(card) => print!("{}", render_card(card)),
            None => bail!("Card not found in rankings: {}", name),
        },
        Commands::Synergies { card, pool } => {
            let text = read_pool_text(Some(&pool))?;
            let cards = resolve_pool(&catalog, &text).cards();
            let name = catalog
                .lookup(&card)
                .map(|c| c.name.clone())
                .unwrap_or(card);

            let hits = detect_synergies(&cards, &name);
            if hits.is_empty() {
                println!("{}: no synergies in this pool", name);
            }
            for hit in hits {
                println!("{} {} {}", name, hit.symbol(), hit.note);
            }
        }
        Commands::Suggest { file, count } => {
            let text = read_pool_text(file.as_deref())?;
            let cards = resolve_pool(&catalog, &text).cards();
            for suggestion in suggest_color_pairs(&cards, count) {
                println!("{}  {}", suggestion.pair, suggestion.score);
            }
        }
        Commands::Serve { host, port } => {
            let host = host.unwrap_or(config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            tracing::info!("Serving {} ranked cards", catalog.len());
            let state = AppState::new(catalog, analyzer).with_cors_origin(config.server.cors_origin);
            let app = build_router(state);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

/// Read a pool list from `path`, or stdin when no path is given.
fn read_pool_text(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read pool list {:?}", path)),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

/// Plain-text report for one analyzed pool.
fn render_session(session: &AnalysisSession, analyzer: &Analyzer, all: bool) -> String {
    let mut out = String::new();
    let cards = session.cards();

    let _ = writeln!(out, "Pool {}: {} cards", session.id, cards.len());
    if !session.pool.not_found.is_empty() {
        let missing: Vec<String> = session.pool.not_found.iter().map(|n| n.to_string()).collect();
        let _ = writeln!(out, "Cards not found in rankings: {}", missing.join(", "));
    }

    let overview = pool_overview(cards);
    let _ = writeln!(
        out,
        "Main cards (C and above): {}  Filler: {}",
        overview.main.len(),
        overview.filler.len()
    );

    let suggestions: Vec<String> = suggest_color_pairs(cards, 2)
        .iter()
        .map(|s| format!("{} ({})", s.pair, s.score))
        .collect();
    let _ = writeln!(out, "Suggested colors: {}", suggestions.join(", "));

    let _ = writeln!(out, "\nArchetype ranking:");
    for a in session.analysis.ranked() {
        let _ = writeln!(
            out,
            "  {}  {:>4}  (raw {}, creatures {}/{})",
            a.pair,
            a.score,
            a.raw_score,
            a.creature_count,
            analyzer.config().creature_target
        );
    }

    let shown: Vec<&ArchetypeAnalysis> = if all {
        session.analysis.ranked()
    } else if let Some(selected) = session.selected_analysis() {
        let mut shown = vec![selected];
        shown.extend(
            session
                .analysis
                .best(2)
                .into_iter()
                .filter(|a| a.pair != selected.pair)
                .take(1),
        );
        shown
    } else {
        session.analysis.best(2)
    };

    for analysis in shown {
        out.push('\n');
        out.push_str(&render_archetype(analysis, cards, analyzer));
    }

    let _ = writeln!(out, "\nLands:");
    if session.analysis.lands.is_empty() {
        let _ = writeln!(out, "  No lands found");
    }
    for land in &session.analysis.lands {
        let _ = writeln!(out, "  {}", card_line(land, None, cards));
    }

    out
}

fn render_archetype(analysis: &ArchetypeAnalysis, pool: &[PoolCard], analyzer: &Analyzer) -> String {
    let mut out = String::new();
    let config = analyzer.config();

    let _ = writeln!(
        out,
        "=== {} === Score: {} ({} cards)",
        analysis.pair,
        analysis.score,
        analysis.fitting_cards.len()
    );

    let mut creatures = format!(
        "Creatures/Threats: {}/{}",
        analysis.creature_count, config.creature_target
    );
    if analysis.creature_penalty > 0 {
        let _ = write!(creatures, " (Penalty: -{} points)", analysis.creature_penalty);
    }
    let _ = writeln!(out, "{}", creatures);

    let stats = &analysis.stats;
    let _ = writeln!(
        out,
        "Removal: {} in top {}, {} more",
        stats.removal_in_top, config.deck_size, stats.removal_outside_top
    );
    if let Some(stat) = &stats.pair_stat {
        let _ = writeln!(out, "{}", pair_stat_line(stat));
    }

    for (tier, heading) in [
        (Tier::Premium, "Premium"),
        (Tier::Playable, "Playable"),
        (Tier::Filler, "Filler"),
    ] {
        let _ = writeln!(out, "{}:", heading);
        let cards = analysis.in_tier(tier);
        if cards.is_empty() {
            let _ = writeln!(out, "  No {} cards", heading.to_lowercase());
        }
        for rated in cards {
            let _ = writeln!(out, "  {}", card_line(&rated.card, Some(rated), pool));
        }
    }

    let _ = writeln!(out, "Splash:");
    if analysis.splash_cards.is_empty() {
        let _ = writeln!(out, "  No splash options");
    }
    for rated in &analysis.splash_cards {
        let _ = writeln!(out, "  {}", card_line(&rated.card, Some(rated), pool));
    }

    out
}

fn pair_stat_line(stat: &PairStat) -> String {
    match stat {
        PairStat::Equipment { count } => format!("Equipment: {}", count),
        PairStat::BigSpells { count } => format!("Big spells: {}", count),
        PairStat::GoWide { count } => format!("Go-wide creatures: {}", count),
        PairStat::Artifacts { count } => format!("Artifacts: {}", count),
        PairStat::TownLands {
            fitting,
            non_fitting,
            total,
        } => format!(
            "Town lands: {} ({} fitting, {} off-color)",
            total, fitting, non_fitting
        ),
    }
}

/// `[B → B+] Bold Wolf* [+]⭐`, with `*` marking creatures and creature makers.
fn card_line(card: &CardRecord, rated: Option<&RatedCard>, pool: &[PoolCard]) -> String {
    let grade = match rated {
        Some(r) if r.is_adjusted() => format!("{} → {}", card.grade, r.adjusted_grade),
        _ => card.grade.to_string(),
    };
    let creature = if is_creature_or_generator(card) { "*" } else { "" };
    let indicator = rated.map(|r| r.indicator.marker()).unwrap_or("");
    let symbols: String = detect_synergies(pool, &card.name)
        .iter()
        .map(|s| s.symbol())
        .collect();

    let mut line = format!("[{}] {}{}", grade, card.name, creature);
    if !indicator.is_empty() {
        line.push(' ');
        line.push_str(indicator);
    }
    line.push_str(&symbols);

    if let Some(splash) = rated.and_then(|r| r.splash.as_ref()) {
        let extra: String = splash.extra_colors.iter().map(|c| c.symbol()).collect();
        let _ = write!(line, "  +{}", extra);
        if splash.difficulty == SplashDifficulty::Dangerous {
            line.push_str(" ⚠️");
        }
    }
    line
}

fn render_card(card: &CardRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", card.name, card.grade);
    let _ = writeln!(
        out,
        "  Cost: {}",
        card.cost.as_ref().map(|c| c.as_str()).unwrap_or("-")
    );
    let _ = writeln!(out, "  Type: {}", card.card_type);
    for (label, affinity) in [
        ("Best in", &card.best_in),
        ("Good in", &card.good_in),
        ("Poor in", &card.poor_in),
    ] {
        if let Some(text) = affinity.as_text() {
            let _ = writeln!(out, "  {}: {}", label, text);
        }
    }
    if let Some(thoughts) = &card.thoughts {
        let _ = writeln!(out, "  {}", thoughts);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pool_grader::models::Grade;

    fn catalog() -> RankingsCatalog {
        RankingsCatalog::new(vec![
            CardRecord::new("Bold Wolf", Grade::B, "1G".parse().ok(), "Creature — Wolf")
                .with_good_in("WG"),
            CardRecord::new("Azure Drake", Grade::BMinus, "2UR".parse().ok(), "Creature — Drake"),
            CardRecord::new("Tri-Color Sage", Grade::AMinus, "1WUB".parse().ok(), "Creature"),
            CardRecord::new("Starting Town", Grade::C, None, "Land — Town"),
        ])
    }

    #[test]
    fn test_card_line_grade_transition() {
        let wolf = CardRecord::new("Bold Wolf", Grade::B, "1G".parse().ok(), "Creature — Wolf")
            .with_good_in("WG");
        let pool = vec![PoolCard::from(wolf)];
        let wg = Analyzer::default().analyze_pair(&pool, ColorPair::WG);

        let line = card_line(&wg.fitting_cards[0].card, Some(&wg.fitting_cards[0]), &pool);
        assert_eq!(line, "[B → B+] Bold Wolf* [+]");
    }

    #[test]
    fn test_card_line_splash_markers() {
        let session = AnalysisSession::new(
            &catalog(),
            &Analyzer::default(),
            "1 Azure Drake\n1 Tri-Color Sage",
        );
        let ug = session.analysis.get(ColorPair::UG).unwrap();
        let lines: Vec<String> = ug
            .splash_cards
            .iter()
            .map(|r| card_line(&r.card, Some(r), session.cards()))
            .collect();

        assert_eq!(
            lines,
            vec![
                "[A-] Tri-Color Sage*  +WB ⚠️".to_string(),
                "[B-] Azure Drake*  +R".to_string(),
            ]
        );
    }

    #[test]
    fn test_render_session_sections() {
        let mut session = AnalysisSession::new(
            &catalog(),
            &Analyzer::default(),
            "4 Bold Wolf\n1 Starting Town\n2 Nonexistent Card",
        );
        session.select(ColorPair::WG);
        let report = render_session(&session, &Analyzer::default(), false);

        assert!(report.contains("Cards not found in rankings: 2 Nonexistent Card"));
        assert!(report.contains("Creatures/Threats: 4/13 (Penalty: -90 points)"));
        assert!(report.contains("Lands:\n  [C] Starting Town"));
        assert!(report.contains("No splash options"));
    }

    #[test]
    fn test_render_all_archetypes() {
        let session = AnalysisSession::new(&catalog(), &Analyzer::default(), "1 Bold Wolf");
        let report = render_session(&session, &Analyzer::default(), true);
        assert_eq!(report.matches(" === Score: ").count(), 10);
    }

    #[test]
    fn test_render_card() {
        let card = CardRecord::new("Bold Wolf", Grade::B, "1G".parse().ok(), "Creature — Wolf")
            .with_good_in("WG")
            .with_thoughts("Solid two-drop.");
        let text = render_card(&card);

        assert!(text.starts_with("Bold Wolf [B]\n"));
        assert!(text.contains("  Cost: 1G\n"));
        assert!(text.contains("  Good in: WG\n"));
        assert!(!text.contains("Best in"));
    }

    #[test]
    fn test_pair_stat_line() {
        let line = pair_stat_line(&PairStat::TownLands {
            fitting: 2,
            non_fitting: 1,
            total: 3,
        });
        assert_eq!(line, "Town lands: 3 (2 fitting, 1 off-color)");
    }
}
