//! Ordered reward/cost modifier pipeline.
//!
//! Every flame reward, spirit cost, and ash conversion flows through
//! here. The order is fixed and load-bearing: the sawdust multiplier is
//! floored before the per-task doublers, the oxygen chamber multiplies
//! the already-doubled value, an active vacation zeroes everything, and
//! the black-dog crit applies last to the final figure.

use matchlight_logic::{combo, rewards};

use crate::model::{GameState, TaskKind};

/// Which quantity is being modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    /// Flame from daily tasks and todos.
    FlameReward,
    /// Flame from milestone and project completion (the flame light
    /// consumes itself here).
    MilestoneReward,
    /// Spirit cost of a completion (negative costs restore and are never
    /// modified).
    SpiritCost,
    /// Flame-to-ash conversion at day end.
    AshConversionRate,
}

/// Per-completion facts the pipeline needs beyond the state itself.
#[derive(Debug, Clone, Copy)]
pub struct RewardContext {
    pub task_kind: TaskKind,
    pub black_dog: bool,
}

impl RewardContext {
    pub fn new(task_kind: TaskKind, black_dog: bool) -> Self {
        Self { task_kind, black_dog }
    }
}

/// Run `base` through the modifier chain for `domain`.
///
/// One-shot effects (flame light, whispering music box) are consumed as
/// a side effect, so call this exactly once per settled quantity.
pub fn apply_modifiers(
    state: &mut GameState,
    domain: Domain,
    ctx: &RewardContext,
    base: i64,
) -> i64 {
    match domain {
        Domain::FlameReward | Domain::MilestoneReward => {
            flame_chain(state, domain, ctx, base.max(0) as u32) as i64
        }
        Domain::SpiritCost => spirit_cost_chain(state, base as i32) as i64,
        Domain::AshConversionRate => ash_chain(state, base.max(0) as u32) as i64,
    }
}

fn flame_chain(state: &mut GameState, domain: Domain, ctx: &RewardContext, base: u32) -> u32 {
    let effects = &state.shop.active_effects;

    let mut flame =
        (f64::from(base) * rewards::sawdust_multiplier(state.stats.sawdust)).floor() as u32;
    if effects.mirror {
        flame *= 2;
    }
    if effects.glowing_pen && ctx.task_kind == TaskKind::Todo {
        flame = (f64::from(flame) * 1.05).floor() as u32;
    }
    if domain == Domain::MilestoneReward
        && effects.flame_light
        && !state.shop.effect_status.flame_light_used
    {
        flame *= 2;
        state.shop.active_effects.flame_light = false;
        state.shop.effect_status.flame_light_used = true;
    }
    if state.shop.active_effects.oxygen_chamber {
        flame *= 2;
    }
    if state.vacation.active {
        return 0;
    }
    if ctx.black_dog {
        flame = combo::black_dog_flame(flame, state.combo.combo);
    }
    flame
}

fn spirit_cost_chain(state: &mut GameState, base: i32) -> i32 {
    if base <= 0 {
        return base;
    }
    if state.shop.active_effects.whispering_music_box
        && !state.shop.effect_status.whispering_music_box_used
    {
        state.shop.effect_status.whispering_music_box_used = true;
        return 0;
    }
    if state.shop.active_effects.memory_chessboard {
        return (f64::from(base) * 0.9).floor() as i32;
    }
    base
}

fn ash_chain(state: &mut GameState, amount: u32) -> u32 {
    if state.shop.active_effects.ash_rune {
        (f64::from(amount) * 1.1).floor() as u32
    } else {
        amount
    }
}
