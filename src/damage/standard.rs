//! Fixed priority table distribution

use rand::seq::SliceRandom;

use crate::body::part::{EquipmentSlot, PlayerPart};
use crate::damage::distribution::{
    distribute_by_table, DamageContext, DamageDistribution, PriorityTable,
};
use crate::damage::source::DamageSource;

/// Damage walks an explicit table of (slot, parts) entries.
/// Parts may be drained to 0.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardDistribution {
    pub priority_table: PriorityTable,
    /// Shuffle the table's entries on every call
    pub shuffle: bool,
}

impl StandardDistribution {
    pub fn new(priority_table: PriorityTable, shuffle: bool) -> Self {
        Self { priority_table, shuffle }
    }

    /// Table entry covering every part of a slot
    pub fn whole_slot(slot: EquipmentSlot) -> (EquipmentSlot, Vec<PlayerPart>) {
        (slot, slot.parts().to_vec())
    }

    fn part_list(&self, ctx: &mut DamageContext<'_>) -> PriorityTable {
        let mut table = self.priority_table.clone();
        if self.shuffle {
            table.shuffle(&mut *ctx.rng);
        }
        table
    }
}

impl DamageDistribution for StandardDistribution {
    fn distribute_damage(
        &self,
        damage: f32,
        ctx: &mut DamageContext<'_>,
        source: &DamageSource,
        add_stat: bool,
    ) -> f32 {
        let table = self.part_list(ctx);
        distribute_by_table(&table, |_| 0.0, damage, ctx, source, add_stat)
    }

    fn name(&self) -> String {
        let entries: Vec<String> = self
            .priority_table
            .iter()
            .map(|(slot, parts)| {
                let parts: Vec<&str> = parts.iter().map(|part| part.id()).collect();
                format!("{:?}:{}", slot, parts.join("+"))
            })
            .collect();
        let shuffle = if self.shuffle { ", shuffled" } else { "" };
        format!("standard[{}{}]", entries.join(" > "), shuffle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::model::PlayerDamageModel;
    use crate::core::config::DamageConfig;
    use crate::events::EventBus;
    use crate::host::SimplePlayer;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fall_table() -> StandardDistribution {
        StandardDistribution::new(
            vec![
                StandardDistribution::whole_slot(EquipmentSlot::Feet),
                StandardDistribution::whole_slot(EquipmentSlot::Legs),
            ],
            false,
        )
    }

    #[test]
    fn test_feet_drain_before_legs() {
        let config = DamageConfig::default();
        let mut model = PlayerDamageModel::new(&config);
        let mut player = SimplePlayer::new();
        let events = EventBus::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ctx = DamageContext {
            model: &mut model,
            player: &mut player,
            events: &events,
            rng: &mut rng,
            config: &config,
        };

        let left = fall_table().distribute_damage(10.0, &mut ctx, &DamageSource::fall(), false);
        assert_eq!(left, 0.0);
        assert_eq!(model.part(PlayerPart::LeftFoot).current_health(), 0.0);
        assert_eq!(model.part(PlayerPart::RightFoot).current_health(), 0.0);
        let legs = model.part(PlayerPart::LeftLeg).current_health()
            + model.part(PlayerPart::RightLeg).current_health();
        assert_eq!(legs, 6.0);
    }

    #[test]
    fn test_unlisted_parts_are_untouched() {
        let config = DamageConfig::default();
        let mut model = PlayerDamageModel::new(&config);
        let mut player = SimplePlayer::new();
        let events = EventBus::new();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut ctx = DamageContext {
            model: &mut model,
            player: &mut player,
            events: &events,
            rng: &mut rng,
            config: &config,
        };

        let left = fall_table().distribute_damage(100.0, &mut ctx, &DamageSource::fall(), false);
        assert_eq!(left, 84.0);
        assert_eq!(model.part(PlayerPart::Head).current_health(), 4.0);
        assert_eq!(model.part(PlayerPart::Body).current_health(), 6.0);
    }

    #[test]
    fn test_name_lists_table() {
        assert_eq!(
            fall_table().name(),
            "standard[Feet:left_foot+right_foot > Legs:left_leg+right_leg]"
        );
    }
}
