//! Damage distribution engine
//!
//! Incoming damage walks a priority table slot by slot: the slot's armor
//! and enchantments reduce it, listeners may modify it, and what is left
//! is spread over the slot's parts in random order.

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::RngCore;
use tracing::{debug, error, info};

use crate::body::damageable::DamageablePart;
use crate::body::model::PlayerDamageModel;
use crate::body::part::{EquipmentSlot, PlayerPart};
use crate::core::config::DamageConfig;
use crate::damage::armor;
use crate::damage::death::kill_player;
use crate::damage::random::{RandomDistribution, NEAREST_KILL};
use crate::damage::source::DamageSource;
use crate::damage::standard::StandardDistribution;
use crate::events::{EventBus, EventOutcome, PostDamageEvent};
use crate::host::PlayerHost;
use crate::network::DamageNotice;

/// Ordered (armor slot, part group) pairs
pub type PriorityTable = Vec<(EquipmentSlot, Vec<PlayerPart>)>;

/// Everything one damage call works on
pub struct DamageContext<'a> {
    pub model: &'a mut PlayerDamageModel,
    pub player: &'a mut dyn PlayerHost,
    pub events: &'a EventBus,
    pub rng: &'a mut dyn RngCore,
    pub config: &'a DamageConfig,
}

/// Strategy choosing which parts absorb a hit
pub trait DamageDistribution: Send + Sync {
    /// Distribute `damage` over the target's parts.
    ///
    /// Returns the damage that could not be absorbed.
    fn distribute_damage(
        &self,
        damage: f32,
        ctx: &mut DamageContext<'_>,
        source: &DamageSource,
        add_stat: bool,
    ) -> f32;

    /// Name for logs
    fn name(&self) -> String;

    /// Is this the strategy used for unbound sources?
    fn is_default(&self) -> bool {
        false
    }
}

/// A strategy bound to a damage source
#[derive(Clone)]
pub enum Distribution {
    Random(RandomDistribution),
    Standard(StandardDistribution),
    Custom(Arc<dyn DamageDistribution>),
}

impl Default for Distribution {
    fn default() -> Self {
        Distribution::Random(NEAREST_KILL)
    }
}

impl From<RandomDistribution> for Distribution {
    fn from(random: RandomDistribution) -> Self {
        Distribution::Random(random)
    }
}

impl From<StandardDistribution> for Distribution {
    fn from(standard: StandardDistribution) -> Self {
        Distribution::Standard(standard)
    }
}

impl DamageDistribution for Distribution {
    fn distribute_damage(
        &self,
        damage: f32,
        ctx: &mut DamageContext<'_>,
        source: &DamageSource,
        add_stat: bool,
    ) -> f32 {
        match self {
            Distribution::Random(random) => random.distribute_damage(damage, ctx, source, add_stat),
            Distribution::Standard(standard) => {
                standard.distribute_damage(damage, ctx, source, add_stat)
            }
            Distribution::Custom(custom) => custom.distribute_damage(damage, ctx, source, add_stat),
        }
    }

    fn name(&self) -> String {
        match self {
            Distribution::Random(random) => random.name(),
            Distribution::Standard(standard) => standard.name(),
            Distribution::Custom(custom) => custom.name(),
        }
    }

    fn is_default(&self) -> bool {
        match self {
            Distribution::Random(random) => random.is_default(),
            Distribution::Standard(standard) => standard.is_default(),
            Distribution::Custom(custom) => custom.is_default(),
        }
    }
}

impl std::fmt::Debug for Distribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

/// Run the slot-ordered pipeline over a priority table.
///
/// Any mitigation step that brings the damage to zero or below ends the
/// call with nothing left over.
pub fn distribute_by_table<F>(
    table: &[(EquipmentSlot, Vec<PlayerPart>)],
    min_health: F,
    damage: f32,
    ctx: &mut DamageContext<'_>,
    source: &DamageSource,
    add_stat: bool,
) -> f32
where
    F: Fn(&DamageablePart) -> f32,
{
    let mut damage = damage;
    for (slot, parts) in table {
        damage = armor::apply_armor(
            ctx.player.equipped(*slot),
            *slot,
            source,
            damage,
            &ctx.config.armor,
        );
        if damage <= 0.0 {
            return 0.0;
        }
        damage = armor::apply_enchantment_modifiers(
            ctx.player.equipped(*slot),
            source,
            damage,
            &ctx.config.armor,
        );
        if damage <= 0.0 {
            return 0.0;
        }
        damage = ctx.events.fire_living_damage(&*ctx.player, source, damage);
        if damage <= 0.0 {
            return 0.0;
        }

        damage = distribute_on_parts(damage, parts, &min_health, ctx, add_stat);
        if damage <= 0.0 {
            break;
        }
    }
    damage.max(0.0)
}

/// Spread damage over one part group in uniformly random order.
///
/// Each part takes as much as it can above its floor; the rest moves on to
/// the next part. Returns what no part in the group could take.
pub fn distribute_on_parts<F>(
    damage: f32,
    parts: &[PlayerPart],
    min_health: F,
    ctx: &mut DamageContext<'_>,
    add_stat: bool,
) -> f32
where
    F: Fn(&DamageablePart) -> f32,
{
    let mut damage = damage;
    let mut order = parts.to_vec();
    order.shuffle(&mut *ctx.rng);

    for part in order {
        let floor = ctx.model.effective_floor(min_health(ctx.model.part(part)));
        ctx.player.send_damage_notice(&DamageNotice {
            part,
            damage,
            min_health: floor,
        });

        let left = ctx.model.damage_part(part, damage, floor, &mut *ctx.player);
        let done = damage - left;
        if add_stat && done > 0.0 {
            let stat = (done * ctx.config.damage_stat_scale).round() as i32;
            ctx.player.add_damage_stat(stat);
        }

        damage -= done;
        if damage == 0.0 {
            break;
        } else if damage < 0.0 {
            error!(
                target: "triage::distribution",
                damage,
                %part,
                "negative damage left, logic error?"
            );
            break;
        }
    }
    damage
}

/// Apply one hit to a player: the full transaction around a distribution.
///
/// Takes a snapshot, applies resistance, tracks exhaustion and combat,
/// distributes (optionally redistributing leftovers with the default
/// strategy) and lets listeners veto. A veto restores the snapshot and
/// reports 0. Otherwise the death check runs and the leftover is returned.
pub fn handle_damage_taken(
    distribution: &dyn DamageDistribution,
    ctx: &mut DamageContext<'_>,
    damage: f32,
    source: &DamageSource,
    add_stat: bool,
    redistribute_if_left: bool,
) -> f32 {
    if ctx.config.debug {
        info!(
            target: "triage::distribution",
            damage,
            distribution = %distribution.name(),
            source = %source.kind,
            redistribute_if_left,
            add_stat,
            "damaging player"
        );
    }
    let before = ctx.model.snapshot();

    let damage =
        armor::apply_global_potion_modifiers(ctx.player.resistance_amplifier(), source, damage);
    if damage != 0.0 {
        ctx.player.add_exhaustion(source.hunger_cost);
        let health = ctx.player.health();
        ctx.player.track_damage(source, health, damage);
    }

    let mut left = distribution.distribute_damage(damage, ctx, source, add_stat);
    if left > 0.0 && redistribute_if_left {
        debug!(target: "triage::distribution", left, "redistributing leftover damage");
        left = NEAREST_KILL.distribute_damage(left, ctx, source, add_stat);
    }

    let outcome = {
        let event = PostDamageEvent {
            player: ctx.player.id(),
            after: &*ctx.model,
            before: &before,
            source,
            undistributed: left,
        };
        ctx.events.post_damage(&event)
    };
    if outcome == EventOutcome::Cancel {
        debug!(
            target: "triage::distribution",
            source = %source.kind,
            "damage vetoed, restoring model"
        );
        ctx.model.restore(&before);
        return 0.0;
    }

    if ctx.model.is_dead(ctx.config.death_rule) {
        kill_player(&mut *ctx.player, Some(source), ctx.config);
    }
    left
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::SimplePlayer;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    struct Fixture {
        model: PlayerDamageModel,
        player: SimplePlayer,
        events: EventBus,
        rng: ChaCha8Rng,
        config: DamageConfig,
    }

    impl Fixture {
        fn new() -> Self {
            let config = DamageConfig::default();
            Self {
                model: PlayerDamageModel::new(&config),
                player: SimplePlayer::new(),
                events: EventBus::new(),
                rng: ChaCha8Rng::seed_from_u64(42),
                config,
            }
        }

        fn ctx(&mut self) -> DamageContext<'_> {
            DamageContext {
                model: &mut self.model,
                player: &mut self.player,
                events: &self.events,
                rng: &mut self.rng,
                config: &self.config,
            }
        }
    }

    #[test]
    fn test_single_part_absorbs_hit() {
        let mut fx = Fixture::new();
        fx.model.part_mut(PlayerPart::LeftArm).set_current_health(4.0);
        let left = distribute_on_parts(3.0, &[PlayerPart::LeftArm], |_| 0.0, &mut fx.ctx(), false);
        assert_eq!(left, 0.0);
        assert_eq!(fx.model.part(PlayerPart::LeftArm).current_health(), 1.0);
    }

    #[test]
    fn test_group_spills_over_and_returns_remainder() {
        let mut fx = Fixture::new();
        fx.model.part_mut(PlayerPart::LeftLeg).set_current_health(2.0);
        fx.model.part_mut(PlayerPart::RightLeg).set_current_health(2.0);
        let left = distribute_on_parts(
            5.0,
            &[PlayerPart::LeftLeg, PlayerPart::RightLeg],
            |_| 0.0,
            &mut fx.ctx(),
            false,
        );
        assert_eq!(left, 1.0);
        assert_eq!(fx.model.part(PlayerPart::LeftLeg).current_health(), 0.0);
        assert_eq!(fx.model.part(PlayerPart::RightLeg).current_health(), 0.0);
    }

    #[test]
    fn test_notice_sent_before_each_part() {
        let mut fx = Fixture::new();
        distribute_on_parts(
            6.0,
            &[PlayerPart::LeftFoot, PlayerPart::RightFoot],
            |_| 0.0,
            &mut fx.ctx(),
            false,
        );
        assert_eq!(fx.player.notices.len(), 2);
        assert_eq!(fx.player.notices[0].damage, 6.0);
        assert_eq!(fx.player.notices[1].damage, 2.0);
    }

    #[test]
    fn test_stat_is_scaled_and_rounded() {
        let mut fx = Fixture::new();
        distribute_on_parts(1.26, &[PlayerPart::Body], |_| 0.0, &mut fx.ctx(), true);
        assert_eq!(fx.player.damage_stat, 13);
    }

    #[test]
    fn test_stops_once_damage_is_used_up() {
        let mut fx = Fixture::new();
        distribute_on_parts(
            1.0,
            &[PlayerPart::LeftArm, PlayerPart::RightArm, PlayerPart::Body],
            |_| 0.0,
            &mut fx.ctx(),
            false,
        );
        assert_eq!(fx.player.notices.len(), 1);
    }

    #[test]
    fn test_armor_stops_pipeline() {
        let mut fx = Fixture::new();
        fx.player.resistance = None;
        let mut ctx = fx.ctx();
        let table = vec![(EquipmentSlot::Head, vec![PlayerPart::Head])];
        let left = distribute_by_table(&table, |_| 0.0, 0.0, &mut ctx, &DamageSource::mob(), false);
        assert_eq!(left, 0.0);
        assert!(fx.player.notices.is_empty());
    }

    #[test]
    fn test_table_walks_slots_in_order() {
        let mut fx = Fixture::new();
        let table = vec![
            (EquipmentSlot::Feet, vec![PlayerPart::LeftFoot, PlayerPart::RightFoot]),
            (EquipmentSlot::Legs, vec![PlayerPart::LeftLeg, PlayerPart::RightLeg]),
        ];
        let left = distribute_by_table(
            &table,
            |_| 0.0,
            18.0,
            &mut fx.ctx(),
            &DamageSource::fall(),
            false,
        );
        assert_eq!(left, 2.0);
        for part in [
            PlayerPart::LeftFoot,
            PlayerPart::RightFoot,
            PlayerPart::LeftLeg,
            PlayerPart::RightLeg,
        ] {
            assert_eq!(fx.model.part(part).current_health(), 0.0);
        }
        assert_eq!(fx.model.part(PlayerPart::Body).current_health(), 6.0);
    }

    #[test]
    fn test_notices_replay_to_server_state_under_morphine() {
        let mut fx = Fixture::new();
        fx.model.apply_morphine(100);
        let left = crate::damage::random::NEAREST_NOKILL.distribute_damage(
            100.0,
            &mut fx.ctx(),
            &DamageSource::generic(),
            false,
        );
        assert!(left > 0.0);

        let mut client = PlayerDamageModel::new(&fx.config);
        for notice in &fx.player.notices {
            assert_eq!(notice.min_health, 0.0);
            client.apply_notice(notice);
        }
        for part in PlayerPart::ALL {
            assert_eq!(
                client.part(part).current_health(),
                fx.model.part(part).current_health(),
                "{} diverged",
                part
            );
        }
        assert_eq!(fx.model.part(PlayerPart::Head).current_health(), 0.0);
    }

    #[test]
    fn test_default_distribution() {
        assert!(Distribution::default().is_default());
        assert!(!Distribution::from(crate::damage::random::ANY_KILL).is_default());

        let wrapped: Arc<dyn DamageDistribution> = Arc::new(Distribution::default());
        assert!(Distribution::Custom(wrapped).is_default());
        let nearest: Arc<dyn DamageDistribution> = Arc::new(NEAREST_KILL);
        assert!(Distribution::Custom(nearest).is_default());
    }
}
