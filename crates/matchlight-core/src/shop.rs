//! The ash shop: catalog, purchase validation, and effect application.
//!
//! Instant items apply their stat gain immediately; overnight items set
//! an effect flag that `expire_overnight` clears at day end; the oxygen
//! chamber is permanent; the flame light persists until consumed by the
//! next milestone reward.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::model::GameState;

/// When a purchased effect applies and expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectClass {
    /// Stat gain on purchase, no lingering effect.
    Instant,
    /// Active until the next day-end settlement.
    Overnight,
    /// Active for the rest of the run.
    Permanent,
    /// Active until its trigger fires once.
    OneShot,
}

/// Everything purchasable with ash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShopItemId {
    FireStarter,
    Mirror,
    OxygenChamber,
    FlameTea,
    SparkCandy,
    SawdustCookie,
    MemoryChessboard,
    GlowingPen,
    WhisperingMusicBox,
    AshRune,
    BlackDogCollar,
    FlameLight,
}

impl ShopItemId {
    pub const ALL: [ShopItemId; 12] = [
        ShopItemId::FireStarter,
        ShopItemId::Mirror,
        ShopItemId::OxygenChamber,
        ShopItemId::FlameTea,
        ShopItemId::SparkCandy,
        ShopItemId::SawdustCookie,
        ShopItemId::MemoryChessboard,
        ShopItemId::GlowingPen,
        ShopItemId::WhisperingMusicBox,
        ShopItemId::AshRune,
        ShopItemId::BlackDogCollar,
        ShopItemId::FlameLight,
    ];

    pub fn cost(self) -> u32 {
        match self {
            ShopItemId::FireStarter => 100,
            ShopItemId::Mirror => 200,
            ShopItemId::OxygenChamber => 5_000,
            ShopItemId::FlameTea => 30,
            ShopItemId::SparkCandy => 20,
            ShopItemId::SawdustCookie => 50,
            ShopItemId::MemoryChessboard => 40,
            ShopItemId::GlowingPen => 60,
            ShopItemId::WhisperingMusicBox => 70,
            ShopItemId::AshRune => 100,
            ShopItemId::BlackDogCollar => 150,
            ShopItemId::FlameLight => 200,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShopItemId::FireStarter => "Fire Starter",
            ShopItemId::Mirror => "Mirror",
            ShopItemId::OxygenChamber => "Oxygen Chamber",
            ShopItemId::FlameTea => "Flame Tea",
            ShopItemId::SparkCandy => "Spark Candy",
            ShopItemId::SawdustCookie => "Sawdust Cookie",
            ShopItemId::MemoryChessboard => "Memory Chessboard",
            ShopItemId::GlowingPen => "Glowing Pen",
            ShopItemId::WhisperingMusicBox => "Whispering Music Box",
            ShopItemId::AshRune => "Ash Rune",
            ShopItemId::BlackDogCollar => "Black Dog Collar",
            ShopItemId::FlameLight => "Flame Light",
        }
    }

    pub fn class(self) -> EffectClass {
        match self {
            ShopItemId::FlameTea | ShopItemId::SparkCandy | ShopItemId::SawdustCookie => {
                EffectClass::Instant
            }
            ShopItemId::OxygenChamber => EffectClass::Permanent,
            ShopItemId::FlameLight => EffectClass::OneShot,
            _ => EffectClass::Overnight,
        }
    }
}

/// Check the purchase preconditions without touching the state.
pub fn validate_purchase(state: &GameState, item: ShopItemId) -> Result<(), EngineError> {
    if state.stats.ash < item.cost() {
        return Err(EngineError::InsufficientResources {
            reason: format!(
                "need {} ash for {}, have {}",
                item.cost(),
                item.name(),
                state.stats.ash
            ),
        });
    }
    let effects = &state.shop.active_effects;
    let already = match item {
        ShopItemId::FireStarter => effects.fire_starter,
        ShopItemId::Mirror => effects.mirror,
        ShopItemId::OxygenChamber => effects.oxygen_chamber,
        ShopItemId::MemoryChessboard => effects.memory_chessboard,
        ShopItemId::GlowingPen => effects.glowing_pen,
        ShopItemId::WhisperingMusicBox => effects.whispering_music_box,
        ShopItemId::AshRune => effects.ash_rune,
        ShopItemId::BlackDogCollar => effects.black_dog_collar,
        ShopItemId::FlameLight => effects.flame_light,
        // Instants can always be re-bought
        _ => false,
    };
    if already {
        return Err(EngineError::AlreadyActive(item.name()));
    }
    Ok(())
}

/// Deduct the cost and apply the item. Call after [`validate_purchase`].
pub(crate) fn apply_purchase(state: &mut GameState, item: ShopItemId) {
    state.stats.ash = state.stats.ash.saturating_sub(item.cost());
    let effects = &mut state.shop.active_effects;
    match item {
        ShopItemId::FlameTea => state.stats.restore_spirit(10),
        ShopItemId::SparkCandy => state.stats.restore_energy(5),
        ShopItemId::SawdustCookie => state.stats.sawdust += 10,
        ShopItemId::FireStarter => effects.fire_starter = true,
        ShopItemId::Mirror => effects.mirror = true,
        ShopItemId::OxygenChamber => effects.oxygen_chamber = true,
        ShopItemId::MemoryChessboard => effects.memory_chessboard = true,
        ShopItemId::GlowingPen => effects.glowing_pen = true,
        ShopItemId::AshRune => effects.ash_rune = true,
        ShopItemId::WhisperingMusicBox => {
            effects.whispering_music_box = true;
            state.shop.effect_status.whispering_music_box_used = false;
        }
        ShopItemId::BlackDogCollar => {
            effects.black_dog_collar = true;
            state.shop.effect_status.black_dog_collar_used = false;
        }
        ShopItemId::FlameLight => {
            effects.flame_light = true;
            state.shop.effect_status.flame_light_used = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purchase_needs_ash() {
        let mut state = GameState::default();
        state.stats.ash = 10;
        assert!(matches!(
            validate_purchase(&state, ShopItemId::Mirror),
            Err(EngineError::InsufficientResources { .. })
        ));
    }

    #[test]
    fn test_instant_items_apply_immediately() {
        let mut state = GameState::default();
        state.stats.spirit = 95;
        let before_ash = state.stats.ash;

        validate_purchase(&state, ShopItemId::FlameTea).unwrap();
        apply_purchase(&mut state, ShopItemId::FlameTea);

        // Spirit clamps at 100; ash fully deducted
        assert_eq!(state.stats.spirit, 100);
        assert_eq!(state.stats.ash, before_ash - 30);

        apply_purchase(&mut state, ShopItemId::SawdustCookie);
        assert_eq!(state.stats.sawdust, 110);
    }

    #[test]
    fn test_active_effect_blocks_repurchase() {
        let mut state = GameState::default();
        apply_purchase(&mut state, ShopItemId::Mirror);
        assert!(matches!(
            validate_purchase(&state, ShopItemId::Mirror),
            Err(EngineError::AlreadyActive(_))
        ));
        // Instants never block
        validate_purchase(&state, ShopItemId::FlameTea).unwrap();
    }

    #[test]
    fn test_one_shot_status_reset_on_purchase() {
        let mut state = GameState::default();
        state.shop.effect_status.whispering_music_box_used = true;
        apply_purchase(&mut state, ShopItemId::WhisperingMusicBox);
        assert!(state.shop.active_effects.whispering_music_box);
        assert!(!state.shop.effect_status.whispering_music_box_used);
    }

    #[test]
    fn test_catalog_classes() {
        assert_eq!(ShopItemId::FlameTea.class(), EffectClass::Instant);
        assert_eq!(ShopItemId::Mirror.class(), EffectClass::Overnight);
        assert_eq!(ShopItemId::OxygenChamber.class(), EffectClass::Permanent);
        assert_eq!(ShopItemId::FlameLight.class(), EffectClass::OneShot);
    }
}
