//! Spreading healing over the body

use rand::seq::SliceRandom;
use rand::RngCore;
use tracing::trace;

use crate::body::model::PlayerDamageModel;
use crate::body::part::PlayerPart;
use crate::host::PlayerHost;

/// Heal parts in uniformly random order until `amount` is spent.
///
/// Returns what no part had room for.
pub fn distribute_health(
    model: &mut PlayerDamageModel,
    amount: f32,
    player: &mut dyn PlayerHost,
    rng: &mut dyn RngCore,
) -> f32 {
    if amount <= 0.0 {
        return 0.0;
    }
    let mut order = PlayerPart::ALL;
    order.shuffle(rng);

    let mut amount = amount;
    for part in order {
        amount = model.heal_part(part, amount, player);
        if amount <= 0.0 {
            return 0.0;
        }
    }
    trace!(target: "triage::health", left = amount, "healing did not fit");
    amount
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DamageConfig;
    use crate::host::SimplePlayer;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_healing_fills_damaged_parts() {
        let config = DamageConfig::default();
        let mut model = PlayerDamageModel::new(&config);
        let mut player = SimplePlayer::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        model.part_mut(PlayerPart::Head).set_current_health(1.0);
        model.part_mut(PlayerPart::Body).set_current_health(2.0);

        let left = distribute_health(&mut model, 5.0, &mut player, &mut rng);
        assert_eq!(left, 0.0);
        assert_eq!(model.current_health_sum(), model.max_health_sum() - 2.0);
    }

    #[test]
    fn test_overflow_is_returned() {
        let config = DamageConfig::default();
        let mut model = PlayerDamageModel::new(&config);
        let mut player = SimplePlayer::new();
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        model.part_mut(PlayerPart::LeftArm).set_current_health(3.0);

        let left = distribute_health(&mut model, 4.0, &mut player, &mut rng);
        assert_eq!(left, 3.0);
        assert_eq!(model.current_health_sum(), model.max_health_sum());
    }

    #[test]
    fn test_non_positive_amount_is_ignored() {
        let config = DamageConfig::default();
        let mut model = PlayerDamageModel::new(&config);
        let mut player = SimplePlayer::new();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(distribute_health(&mut model, -1.0, &mut player, &mut rng), 0.0);
    }
}
