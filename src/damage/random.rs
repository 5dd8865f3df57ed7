//! Random distributions: no fixed priority table
//!
//! Two independent switches give four stock strategies:
//! - nearest first: start at a random armor slot and spread to its
//!   neighbours, instead of hitting any single part at random
//! - no kill: death-capable parts keep a small floor of health

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::body::damageable::DamageablePart;
use crate::body::part::EquipmentSlot;
use crate::core::config::DamageConfig;
use crate::damage::distribution::{
    distribute_by_table, DamageContext, DamageDistribution, PriorityTable,
};
use crate::damage::source::DamageSource;

/// Default for sources without a binding
pub const NEAREST_KILL: RandomDistribution = RandomDistribution::new(true, false);
pub const NEAREST_NOKILL: RandomDistribution = RandomDistribution::new(true, true);
pub const ANY_KILL: RandomDistribution = RandomDistribution::new(false, false);
pub const ANY_NOKILL: RandomDistribution = RandomDistribution::new(false, true);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RandomDistribution {
    pub nearest_first: bool,
    pub try_no_kill: bool,
}

impl RandomDistribution {
    pub const fn new(nearest_first: bool, try_no_kill: bool) -> Self {
        Self {
            nearest_first,
            try_no_kill,
        }
    }

    pub fn min_health(&self, part: &DamageablePart, config: &DamageConfig) -> f32 {
        if self.try_no_kill && part.can_cause_death {
            config.no_kill_floor
        } else {
            0.0
        }
    }

    /// Build this call's priority table
    pub fn part_list(&self, rng: &mut dyn RngCore) -> PriorityTable {
        if self.nearest_first {
            nearest_slot_order(rng)
                .into_iter()
                .map(|slot| (slot, slot.parts().to_vec()))
                .collect()
        } else {
            let mut list: PriorityTable = EquipmentSlot::ARMOR_SLOTS
                .iter()
                .flat_map(|slot| slot.parts().iter().map(move |part| (*slot, vec![*part])))
                .collect();
            list.shuffle(&mut *rng);
            list
        }
    }
}

/// Random start slot, then outward one neighbour at a time.
/// When both neighbours are equally far the side is picked at random.
fn nearest_slot_order(rng: &mut dyn RngCore) -> Vec<EquipmentSlot> {
    let slots = EquipmentSlot::ARMOR_SLOTS;
    let start = rng.gen_range(0..slots.len());
    let mut order = vec![slots[start]];

    for distance in 1..slots.len() {
        let below = start.checked_sub(distance).map(|i| slots[i]);
        let above = slots.get(start + distance).copied();
        match (below, above) {
            (Some(below), Some(above)) => {
                if rng.gen_bool(0.5) {
                    order.extend([below, above]);
                } else {
                    order.extend([above, below]);
                }
            }
            (Some(slot), None) | (None, Some(slot)) => order.push(slot),
            (None, None) => break,
        }
    }
    order
}

impl DamageDistribution for RandomDistribution {
    fn distribute_damage(
        &self,
        damage: f32,
        ctx: &mut DamageContext<'_>,
        source: &DamageSource,
        add_stat: bool,
    ) -> f32 {
        let table = self.part_list(&mut *ctx.rng);
        let config = ctx.config;
        distribute_by_table(
            &table,
            |part| self.min_health(part, config),
            damage,
            ctx,
            source,
            add_stat,
        )
    }

    fn name(&self) -> String {
        let order = if self.nearest_first { "nearest" } else { "any" };
        let kill = if self.try_no_kill { "nokill" } else { "kill" };
        format!("random[{order}, {kill}]")
    }

    fn is_default(&self) -> bool {
        *self == NEAREST_KILL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::part::PlayerPart;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_nearest_order_visits_every_slot_once() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            let mut order = nearest_slot_order(&mut rng);
            assert_eq!(order.len(), 4);
            order.sort_by_key(|slot| slot.armor_index());
            assert_eq!(order, EquipmentSlot::ARMOR_SLOTS.to_vec());
        }
    }

    #[test]
    fn test_nearest_order_is_contiguous() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..50 {
            let order = nearest_slot_order(&mut rng);
            let mut low = order[0].armor_index();
            let mut high = low;
            for slot in &order[1..] {
                let i = slot.armor_index();
                assert!(i + 1 == low || i == high + 1, "slot {:?} is not a neighbour", slot);
                low = low.min(i);
                high = high.max(i);
            }
        }
    }

    #[test]
    fn test_any_order_has_single_part_groups() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let table = ANY_KILL.part_list(&mut rng);
        assert_eq!(table.len(), 8);
        for (slot, parts) in &table {
            assert_eq!(parts.len(), 1);
            assert_eq!(parts[0].slot(), *slot);
        }
    }

    #[test]
    fn test_no_kill_floor_only_for_lethal_parts() {
        let config = DamageConfig::default();
        let head = DamageablePart::new(PlayerPart::Head, 4.0, true);
        let arm = DamageablePart::new(PlayerPart::LeftArm, 4.0, false);
        assert_eq!(NEAREST_NOKILL.min_health(&head, &config), 1.0);
        assert_eq!(NEAREST_NOKILL.min_health(&arm, &config), 0.0);
        assert_eq!(NEAREST_KILL.min_health(&head, &config), 0.0);
    }

    #[test]
    fn test_names() {
        assert_eq!(NEAREST_KILL.name(), "random[nearest, kill]");
        assert_eq!(ANY_NOKILL.name(), "random[any, nokill]");
    }
}
