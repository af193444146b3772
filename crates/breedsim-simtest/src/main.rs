//! Breedsim Headless Simulation Harness
//!
//! Validates the breeding engine without any presentation layer.
//! Runs entirely in-process: plays seeded sessions with a scripted
//! strategy and checks engine invariants along the way.
//!
//! Usage:
//!   cargo run -p breedsim-simtest
//!   cargo run -p breedsim-simtest -- --verbose --seed 7 --games 1000
//!   cargo run -p breedsim-simtest -- --config session.json --json
//!
//! Logging follows `RUST_LOG`, e.g. `RUST_LOG=breedsim_core=debug`.

use breedsim_core::catalog::{catalogs, roll_die, GoalKind, TraitKind};
use breedsim_core::components::{TraitCounts, TraitSet};
use breedsim_core::config::SessionConfig;
use breedsim_core::error::{ActionError, ConfigError};
use breedsim_core::session::{BreedingSession, Outcome};
use breedsim_core::simulation::{simulate, GenerationInput};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

// ── Command line ────────────────────────────────────────────────────────

struct Options {
    verbose: bool,
    json: bool,
    seed: u64,
    games: u64,
    config_path: Option<String>,
}

fn parse_options() -> Result<Options, String> {
    let mut options = Options {
        verbose: false,
        json: false,
        seed: 42,
        games: 500,
        config_path: None,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--verbose" => options.verbose = true,
            "--json" => options.json = true,
            "--seed" => options.seed = parse_value(&arg, args.next())?,
            "--games" => options.games = parse_value(&arg, args.next())?,
            "--config" => {
                options.config_path = Some(args.next().ok_or("--config needs a path")?);
            }
            other => return Err(format!("unknown argument: {}", other)),
        }
    }
    Ok(options)
}

fn parse_value(flag: &str, value: Option<String>) -> Result<u64, String> {
    let value = value.ok_or_else(|| format!("{} needs a value", flag))?;
    value
        .parse()
        .map_err(|e| format!("{} {}: {}", flag, value, e))
}

fn load_config(options: &Options) -> Result<SessionConfig, String> {
    let mut config = match &options.config_path {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?;
            SessionConfig::from_json_str(&text).map_err(|e| format!("{}: {}", path, e))?
        }
        None => SessionConfig::default(),
    };
    if config.seed.is_none() {
        config.seed = Some(options.seed);
    }
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: String) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail,
    }
}

fn main() {
    env_logger::init();

    let options = match parse_options() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };
    let config = match load_config(&options) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };
    let verbose = options.verbose;

    if options.json {
        if let Err(e) = dump_demo_game(&config) {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    println!("=== Breedsim Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Catalog consistency
    results.extend(validate_catalog(&config, verbose));

    // 2. Acquisition die rates
    results.extend(validate_acquisition(&config, verbose));

    // 3. Inheritance coin flips
    results.extend(validate_inheritance(&config, verbose));

    // 4. Selection budget bound
    match validate_selection(&config, verbose) {
        Ok(r) => results.extend(r),
        Err(e) => results.push(check("selection_setup", false, e.to_string())),
    }

    // 5. Full playthroughs
    match validate_playthroughs(&config, options.games, verbose) {
        Ok(r) => results.extend(r),
        Err(e) => results.push(check("playthrough_setup", false, e.to_string())),
    }

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Catalog ──────────────────────────────────────────────────────────

fn validate_catalog(config: &SessionConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Catalog ---");
    let mut results = Vec::new();
    let (traits, goals) = catalogs();

    results.push(check(
        "catalog_sizes",
        traits.len() == 12 && goals.len() == 4,
        format!("{} traits, {} goals", traits.len(), goals.len()),
    ));

    let unnamed = traits.iter().filter(|t| TraitKind::from_name(t.name) != Some(t.kind)).count();
    results.push(check(
        "trait_names_resolve",
        unnamed == 0,
        format!("{} traits fail name lookup", unnamed),
    ));

    for goal in goals {
        let cost: u32 = goal.required.iter().map(|k| k.cost()).sum();
        if verbose {
            println!("  {}: ${} for all four traits", goal.name, cost);
        }
        results.push(check(
            &format!("goal_affordable_{}", goal.name),
            cost <= config.starting_budget,
            format!("${} of ${}", cost, config.starting_budget),
        ));
    }

    results
}

// ── 2. Acquisition ──────────────────────────────────────────────────────

fn validate_acquisition(config: &SessionConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Acquisition rolls ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or(0));
    let trials = 100_000u32;

    for kind in TraitKind::ALL {
        let spec = kind.spec();
        let hits = (0..trials).filter(|_| spec.is_success(roll_die(&mut rng))).count();
        let rate = hits as f64 / trials as f64;
        let expected = spec.success_probability();
        if verbose {
            println!("  {:<18} {:.4} (expected {:.4})", spec.name, rate, expected);
        }
        results.push(check(
            &format!("acquisition_rate_{}", spec.name),
            (rate - expected).abs() < 0.01,
            format!("{:.4} vs {:.4} over {} rolls", rate, expected, trials),
        ));
    }

    results
}

// ── 3. Inheritance ──────────────────────────────────────────────────────

fn validate_inheritance(config: &SessionConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Inheritance flips ---");
    let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or(0).wrapping_add(1));
    let inherited: TraitSet = TraitKind::ALL.into_iter().collect();
    let counts = TraitCounts::new();
    let input = GenerationInput {
        goal: GoalKind::CuteDog,
        budget: config.starting_budget,
        selected: &[],
        inherited: &inherited,
        success_counts: &counts,
        population_size: config.population_size,
        inheritance_chance: config.inheritance_chance,
    };

    let rounds = 2_000;
    let mut carried = 0u64;
    for _ in 0..rounds {
        carried += simulate(&input, &mut rng).frequencies.total() as u64;
    }
    let slots = rounds as u64 * config.population_size as u64 * TraitKind::ALL.len() as u64;
    let rate = carried as f64 / slots as f64;
    if verbose {
        println!("  {} of {} slots inherited ({:.4})", carried, slots, rate);
    }

    vec![check(
        "inheritance_rate",
        (rate - config.inheritance_chance).abs() < 0.01,
        format!("{:.4} vs {:.4}", rate, config.inheritance_chance),
    )]
}

// ── 4. Selection ────────────────────────────────────────────────────────

fn validate_selection(
    config: &SessionConfig,
    verbose: bool,
) -> Result<Vec<TestResult>, ConfigError> {
    println!("--- Selection budget ---");
    let mut results = Vec::new();

    // $100, two $10 traits, one generation
    let mut session = BreedingSession::new(SessionConfig {
        starting_budget: 100,
        ..config.clone()
    })?;
    let picked = session.select_trait(TraitKind::FloppyEars).is_ok()
        && session.select_trait(TraitKind::BigEyes).is_ok();
    let ran = session.run_generation().is_ok();
    let snapshot_ok = session
        .history()
        .first()
        .map(|s| {
            s.iter().count() == TraitKind::ALL.len()
                && s.iter().all(|(_, n)| (n as usize) <= config.population_size)
        })
        .unwrap_or(false);
    results.push(check(
        "two_ten_dollar_traits",
        picked && ran && session.budget() == 80 && session.history().len() == 1 && snapshot_ok,
        format!("budget ${}, {} history entries", session.budget(), session.history().len()),
    ));

    // $15 only fits one of two $10 traits
    let mut session = BreedingSession::new(SessionConfig {
        starting_budget: 15,
        ..config.clone()
    })?;
    let first = session.select_trait(TraitKind::FloppyEars);
    let second = session.select_trait(TraitKind::BigEyes);
    if verbose {
        if let Err(e) = &second {
            println!("  rejected: {}", e);
        }
    }
    results.push(check(
        "over_budget_rejected",
        first.is_ok()
            && matches!(second, Err(ActionError::OverBudget { .. }))
            && session.selection() == [TraitKind::FloppyEars],
        format!("{} selected", session.selection().len()),
    ));

    // Empty selection is a no-op
    let mut session = BreedingSession::new(config.clone())?;
    let rejected = matches!(session.run_generation(), Err(ActionError::EmptySelection));
    results.push(check(
        "empty_selection_noop",
        rejected && session.generation() == 1 && session.history().is_empty(),
        format!("generation {}", session.generation()),
    ));

    Ok(results)
}

// ── 5. Playthroughs ─────────────────────────────────────────────────────

#[derive(Default)]
struct BatchStats {
    wins: u64,
    losses: u64,
    stalls: u64,
    generations: u64,
    violations: Vec<String>,
}

/// Pick goal traits first, cheapest first, skipping traits the litter
/// already carries everywhere. Falls back to the cheapest affordable trait.
fn choose_traits(session: &mut BreedingSession) {
    let saturated = |kind: TraitKind, session: &BreedingSession| {
        session
            .history()
            .last()
            .map(|s| s.get(kind) as usize == session.config().population_size)
            .unwrap_or(false)
    };

    let mut wanted: Vec<TraitKind> = session
        .goal_traits()
        .iter()
        .copied()
        .filter(|&k| !saturated(k, &*session))
        .collect();
    wanted.sort_by_key(|k| k.cost());
    for kind in wanted {
        let _ = session.select_trait(kind);
    }

    if session.selection().is_empty() {
        let mut affordable = session.affordable_traits();
        affordable.sort_by_key(|k| k.cost());
        if let Some(&kind) = affordable.first() {
            let _ = session.select_trait(kind);
        }
    }
}

fn play_game(session: &mut BreedingSession, stats: &mut BatchStats, game: u64) {
    let population = session.config().population_size;
    while !session.is_finished() {
        choose_traits(session);
        if !session.can_run() {
            stats.stalls += 1;
            return;
        }

        let budget_before = session.budget();
        let generation_before = session.generation();
        let cost = session.selected_cost();
        if cost > budget_before {
            stats.violations.push(format!(
                "game {}: selection ${} over budget ${}",
                game, cost, budget_before
            ));
        }

        let report = match session.run_generation() {
            Ok(r) => r,
            Err(e) => {
                stats.violations.push(format!("game {}: run rejected: {}", game, e));
                return;
            }
        };
        stats.generations += 1;

        if session.budget() >= budget_before {
            stats.violations.push(format!("game {}: budget did not decrease", game));
        }
        if session.generation() != generation_before + 1 {
            stats.violations.push(format!("game {}: generation skipped", game));
        }
        if session.litter().len() != population {
            stats.violations.push(format!("game {}: litter of {}", game, session.litter().len()));
        }
        if session.goal_achieved() && session.game_over() {
            stats.violations.push(format!("game {}: both terminal flags set", game));
        }

        match report.outcome {
            Outcome::GoalAchieved => stats.wins += 1,
            Outcome::GameOver => stats.losses += 1,
            Outcome::Continuing => {}
        }
    }

    // A finished session must refuse further generations.
    let frozen_budget = session.budget();
    let frozen_history = session.history().len();
    if session.run_generation().is_ok()
        || session.budget() != frozen_budget
        || session.history().len() != frozen_history
    {
        stats.violations.push(format!("game {}: finished session advanced", game));
    }
}

fn validate_playthroughs(
    config: &SessionConfig,
    games: u64,
    verbose: bool,
) -> Result<Vec<TestResult>, ConfigError> {
    println!("--- Playthroughs ---");
    let base_seed = config.seed.unwrap_or(0);
    let mut stats = BatchStats::default();
    let mut per_goal: Vec<(GoalKind, u64, u64)> =
        GoalKind::ALL.iter().map(|&g| (g, 0, 0)).collect();

    for game in 0..games {
        let mut session = BreedingSession::new(SessionConfig {
            seed: Some(base_seed.wrapping_add(game)),
            ..config.clone()
        })?;
        let goal = session.goal();
        let wins_before = stats.wins;
        play_game(&mut session, &mut stats, game);
        if let Some(entry) = per_goal.iter_mut().find(|(g, _, _)| *g == goal) {
            entry.1 += 1;
            entry.2 += stats.wins - wins_before;
        }

        session.restart();
        if session.generation() != 1
            || session.budget() != config.starting_budget
            || !session.history().is_empty()
            || session.is_finished()
        {
            stats.violations.push(format!("game {}: restart left stale state", game));
        }
    }

    if verbose {
        for (goal, played, won) in &per_goal {
            println!("  {:<12} {:>4} played, {:>4} won", goal.name(), played, won);
        }
        for v in stats.violations.iter().take(10) {
            println!("  ! {}", v);
        }
    }

    let mut results = Vec::new();
    results.push(check(
        "playthrough_invariants",
        stats.violations.is_empty(),
        format!("{} violations over {} games", stats.violations.len(), games),
    ));
    results.push(check(
        "playthrough_outcomes",
        stats.wins + stats.losses + stats.stalls == games,
        format!(
            "{} won, {} lost, {} stalled, {:.2} generations/game",
            stats.wins,
            stats.losses,
            stats.stalls,
            if games > 0 { stats.generations as f64 / games as f64 } else { 0.0 }
        ),
    ));
    Ok(results)
}

// ── JSON dump ───────────────────────────────────────────────────────────

#[derive(Serialize)]
struct DemoDump<'a> {
    state: &'a breedsim_core::session::SessionState,
    goal_progress: u32,
    trends: Vec<breedsim_core::progress::TrendSeries>,
}

/// Play one game and print its final snapshot as JSON.
fn dump_demo_game(config: &SessionConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = BreedingSession::new(config.clone())?;
    let mut stats = BatchStats::default();
    play_game(&mut session, &mut stats, 0);
    for v in &stats.violations {
        log::warn!("{}", v);
    }

    let dump = DemoDump {
        state: session.state(),
        goal_progress: session.goal_progress(),
        trends: session.trend_series(),
    };
    println!("{}", serde_json::to_string_pretty(&dump)?);
    Ok(())
}
