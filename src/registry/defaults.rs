//! Stock bindings, debuffs and healing items

use tracing::debug;

use crate::body::healer::PartHealer;
use crate::body::part::{DebuffSlot, EquipmentSlot, PlayerPart};
use crate::core::error::Result;
use crate::damage::standard::StandardDistribution;
use crate::debuff::DebuffBuilder;
use crate::registry::DamageRegistry;

/// Ticks per second of the host game
const TICKS_PER_SECOND: u32 = 20;

/// Register the stock setup. Must run before the registry is closed.
pub fn register_defaults(registry: &DamageRegistry) -> Result<()> {
    bind_sources(registry)?;
    register_debuffs(registry)?;
    register_healing_items(registry)?;
    debug!(target: "triage::registry", "stock registrations done");
    Ok(())
}

fn bind_sources(registry: &DamageRegistry) -> Result<()> {
    let feet_then_legs = vec![
        StandardDistribution::whole_slot(EquipmentSlot::Feet),
        StandardDistribution::whole_slot(EquipmentSlot::Legs),
    ];
    registry.bind_damage_source_standard("fall", feet_then_legs.clone(), false)?;
    registry.bind_damage_source_standard("hot_floor", feet_then_legs, false)?;

    registry.bind_damage_source_standard(
        "anvil",
        vec![
            StandardDistribution::whole_slot(EquipmentSlot::Head),
            (EquipmentSlot::Chest, vec![PlayerPart::LeftArm, PlayerPart::RightArm]),
        ],
        false,
    )?;
    registry.bind_damage_source_standard(
        "drown",
        vec![
            (EquipmentSlot::Chest, vec![PlayerPart::Body]),
            StandardDistribution::whole_slot(EquipmentSlot::Head),
        ],
        false,
    )?;
    registry.bind_damage_source_standard(
        "fly_into_wall",
        vec![StandardDistribution::whole_slot(EquipmentSlot::Head)],
        false,
    )?;

    registry.bind_damage_source_random("starve", false, true)?;
    registry.bind_damage_source_random("magic", false, false)?;
    registry.bind_damage_source_random("on_fire", false, false)?;
    Ok(())
}

fn register_debuffs(registry: &DamageRegistry) -> Result<()> {
    registry.register_debuff(
        DebuffSlot::Head,
        DebuffBuilder::on_hit("blindness")
            .condition(2.0, 8 * TICKS_PER_SECOND)
            .condition(1.0, 4 * TICKS_PER_SECOND)
            .sound("heartbeat"),
    )?;
    registry.register_debuff(
        DebuffSlot::Head,
        DebuffBuilder::on_hit("nausea")
            .condition(3.0, 16 * TICKS_PER_SECOND)
            .condition(2.0, 12 * TICKS_PER_SECOND),
    )?;

    registry.register_debuff(
        DebuffSlot::Body,
        DebuffBuilder::on_hit("nausea")
            .condition(4.0, 16 * TICKS_PER_SECOND)
            .condition(2.0, 8 * TICKS_PER_SECOND),
    )?;
    registry.register_debuff(
        DebuffSlot::Body,
        DebuffBuilder::constant("weakness").condition(0.25, 2).condition(0.5, 1),
    )?;

    registry.register_debuff(
        DebuffSlot::Arms,
        DebuffBuilder::constant("mining_fatigue")
            .condition(0.25, 3)
            .condition(0.5, 2)
            .condition(0.75, 1),
    )?;

    registry.register_debuff(
        DebuffSlot::LegsAndFeet,
        DebuffBuilder::constant("slowness")
            .condition(0.35, 3)
            .condition(0.6, 2)
            .condition(0.8, 1),
    )?;
    Ok(())
}

fn register_healing_items(registry: &DamageRegistry) -> Result<()> {
    registry.register_healing_type("bandage", || PartHealer::new(18 * TICKS_PER_SECOND, 4), 2500)?;
    registry.register_healing_type("plaster", || PartHealer::new(22 * TICKS_PER_SECOND, 2), 3000)?;
    Ok(())
}
