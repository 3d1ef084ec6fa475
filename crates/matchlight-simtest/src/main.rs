//! Matchlight Headless Scenario Harness
//!
//! Runs scripted multi-day economies against the engine — no UI, no disk
//! unless a scenario asks for it.
//!
//! Usage:
//!   cargo run -p matchlight-simtest
//!   cargo run -p matchlight-simtest -- --verbose

use matchlight_core::model::{GameState, Milestone};
use matchlight_core::prelude::*;
use matchlight_logic::{combo, costs, rewards};

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: impl Into<String>) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail: detail.into(),
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Matchlight Scenario Harness ===\n");

    let mut results = Vec::new();

    // 1. Formula layer sanity sweep
    results.extend(validate_formulas(verbose));

    // 2. A full simulated week
    results.extend(validate_week_scenario(verbose));

    // 3. Shop economy loop
    results.extend(validate_shop_economy(verbose));

    // 4. Persistence cycle
    results.extend(validate_persistence_cycle(verbose));

    // 5. Collapse and manual reset
    results.extend(validate_collapse_and_reset(verbose));

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

// ── 1. Formula layer ────────────────────────────────────────────────────

fn validate_formulas(_verbose: bool) -> Vec<TestResult> {
    println!("--- Formula Layer ---");
    let mut results = Vec::new();

    let full_day = costs::daily_energy_cost(costs::DAILY_REFERENCE_MINUTES);
    results.push(check(
        "full_day_costs_all_energy",
        full_day == 100,
        format!("480 min -> {full_day} energy"),
    ));

    let capped = combo::combo_bonus(50);
    results.push(check(
        "combo_bonus_capped",
        (capped - 0.75).abs() < f64::EPSILON,
        format!("50 stacks -> +{:.0}%", capped * 100.0),
    ));

    let boosted = rewards::early_finish_boost(10, 30, 60);
    results.push(check(
        "half_time_boosts_half_again",
        boosted == 15,
        format!("10 base at half time -> {boosted}"),
    ));

    let late = rewards::early_finish_boost(10, 120, 60);
    results.push(check(
        "late_work_never_penalized",
        late == 10,
        format!("10 base at double time -> {late}"),
    ));

    results
}

// ── 2. A simulated week ─────────────────────────────────────────────────

fn validate_week_scenario(verbose: bool) -> Vec<TestResult> {
    println!("--- Simulated Week ---");
    let mut results = Vec::new();

    let mut engine = Engine::with_state(MemoryStore::new(), GameState::default());
    let journal = engine
        .registry()
        .add_daily("journal", 30, Tier::Medium, Tier::High);
    let chores = engine
        .registry()
        .add_daily("chores", 48, Tier::High, Tier::Low);
    let thesis = engine.registry().add_project(
        "thesis",
        "2024-03-01".parse().unwrap(),
        2.0,
        Tier::High,
        Tier::Medium,
        vec![Milestone::new("outline", None), Milestone::new("draft", None)],
    );

    let mut completions = 0u32;
    for day in 0..7 {
        if engine.complete_daily_task(journal, 20 * 60, 5).is_ok() {
            completions += 1;
        }
        if engine.complete_daily_task(chores, 48 * 60, 4).is_ok() {
            completions += 1;
        }
        if day == 2 {
            let milestone = engine.complete_milestone(thesis, 3600);
            results.push(check(
                "milestone_paid_on_day_three",
                matches!(&milestone, Ok(m) if m.sawdust_reward == 60),
                format!("{milestone:?}"),
            ));
        }
        let summary = engine.end_day().expect("week should not extinguish");
        if verbose {
            println!(
                "  day {}: flame {} -> {}, ash +{}",
                day + 1,
                summary.flame.before,
                summary.flame.after,
                summary.ash.change()
            );
        }
    }

    results.push(check(
        "every_daily_completed_every_day",
        completions == 14,
        format!("{completions}/14 completions"),
    ));
    results.push(check(
        "week_advances_calendar",
        engine.stats().total_days == 8,
        format!("total_days = {}", engine.stats().total_days),
    ));
    let streak = engine.daily_tasks().iter().map(|t| t.streak_days).max();
    results.push(check(
        "streaks_grow_across_the_week",
        streak == Some(7),
        format!("longest streak {streak:?}"),
    ));
    results.push(check(
        "character_survived_the_week",
        engine.life() == LifeState::Alive,
        format!("{:?}", engine.life()),
    ));
    results.push(check(
        "logs_tagged_with_days",
        engine.logs().iter().all(|l| l.starts_with("[Day ")),
        format!("{} log lines", engine.logs().len()),
    ));

    results
}

// ── 3. Shop economy ─────────────────────────────────────────────────────

fn validate_shop_economy(_verbose: bool) -> Vec<TestResult> {
    println!("--- Shop Economy ---");
    let mut results = Vec::new();

    let mut engine = Engine::with_state(MemoryStore::new(), GameState::default());
    let ash_before = engine.stats().ash;

    let mut spent = 0;
    for item in [ShopItemId::Mirror, ShopItemId::FireStarter, ShopItemId::AshRune] {
        if engine.purchase_item(item).is_ok() {
            spent += item.cost();
        }
    }
    results.push(check(
        "overnight_bundle_purchased",
        engine.stats().ash == ash_before - spent,
        format!("spent {spent} ash"),
    ));

    let id = engine
        .registry()
        .add_daily("journal", 48, Tier::Medium, Tier::Medium);
    let summary = engine.complete_daily_task(id, 48 * 60, 5).unwrap();
    results.push(check(
        "mirror_doubles_the_flame",
        summary.flame_reward == 10,
        format!("flame reward {}", summary.flame_reward),
    ));

    let flame_before = engine.stats().flame;
    let day = engine.end_day().unwrap();
    results.push(check(
        "fire_starter_blocks_halving",
        day.flame.after == flame_before,
        format!("flame {} -> {}", day.flame.before, day.flame.after),
    ));
    results.push(check(
        "ash_rune_boosts_conversion",
        day.ash.change() == i64::from((flame_before / 2) * 11 / 10),
        format!("+{} ash", day.ash.change()),
    ));
    results.push(check(
        "overnight_effects_expired",
        !engine.shop().active_effects.mirror && !engine.shop().active_effects.fire_starter,
        "mirror and fire starter gone",
    ));

    results
}

// ── 4. Persistence cycle ────────────────────────────────────────────────

fn validate_persistence_cycle(_verbose: bool) -> Vec<TestResult> {
    println!("--- Persistence Cycle ---");
    let mut results = Vec::new();

    let mut engine = Engine::with_state(MemoryStore::new(), GameState::default());
    engine
        .registry()
        .add_todo("taxes", "2024-04-15".parse().unwrap(), 1.0, Tier::High, Tier::High);
    if let Err(e) = engine.save() {
        results.push(check("save", false, e.to_string()));
        return results;
    }

    let exported = match engine.export() {
        Ok(doc) => doc,
        Err(e) => {
            results.push(check("export", false, e.to_string()));
            return results;
        }
    };
    results.push(check(
        "export_is_valid_json",
        serde_json::from_str::<serde_json::Value>(&exported).is_ok(),
        format!("{} bytes", exported.len()),
    ));

    let mut other = Engine::with_state(MemoryStore::new(), GameState::default());
    let imported = other.import(&exported);
    results.push(check(
        "import_restores_tasks",
        imported.is_ok() && other.todos().len() == 1,
        format!("{} todos after import", other.todos().len()),
    ));

    results
}

// ── 5. Collapse and reset ───────────────────────────────────────────────

fn validate_collapse_and_reset(verbose: bool) -> Vec<TestResult> {
    println!("--- Collapse & Reset ---");
    let mut results = Vec::new();

    let mut engine = Engine::with_state(MemoryStore::new(), GameState::default());
    let mut days = 0;
    while engine.life() == LifeState::Alive && days < 32 {
        if let Ok(summary) = engine.end_day() {
            days += 1;
            if verbose {
                println!("  day {days}: flame {}", summary.flame.after);
            }
        } else {
            break;
        }
    }
    // 100 halves to 0 in 7 settlements
    results.push(check(
        "idle_flame_burns_out_in_a_week",
        engine.life() == LifeState::Extinguished && days == 7,
        format!("extinguished after {days} days"),
    ));
    results.push(check(
        "extinguished_rejects_commands",
        matches!(engine.purchase_item(ShopItemId::FlameTea), Err(EngineError::Extinguished)),
        "purchase rejected",
    ));

    engine.reset_to_initial();
    results.push(check(
        "reset_returns_to_initial",
        engine.life() == LifeState::Alive && engine.stats().flame == 100,
        format!("flame {}", engine.stats().flame),
    ));

    results
}
