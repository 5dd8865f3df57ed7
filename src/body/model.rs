//! Per-player damage model: all body parts plus morphine and debuff state

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::body::damageable::DamageablePart;
use crate::body::healer::PartHealer;
use crate::body::part::{DebuffSlot, PlayerPart};
use crate::core::config::{DamageConfig, DeathRule};
use crate::core::error::Result;
use crate::core::types::Tick;
use crate::debuff::Debuff;
use crate::host::PlayerHost;
use crate::network::{DamageNotice, ModelSync};

/// Serialized form of a model, used for persistence and client sync
///
/// Debuff state is runtime-only and not part of the tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelTag {
    pub parts: Vec<DamageablePart>,
    pub morphine_ticks: Tick,
}

/// Immutable copy of the model's health state taken before a mutation
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSnapshot {
    parts: [DamageablePart; 8],
    morphine_ticks: Tick,
}

impl ModelSnapshot {
    pub fn part(&self, part: PlayerPart) -> &DamageablePart {
        &self.parts[part.index()]
    }

    pub fn morphine_ticks(&self) -> Tick {
        self.morphine_ticks
    }

    pub fn to_tag(&self) -> ModelTag {
        ModelTag {
            parts: self.parts.to_vec(),
            morphine_ticks: self.morphine_ticks,
        }
    }
}

/// All body parts of one player
pub struct PlayerDamageModel {
    parts: [DamageablePart; 8],
    morphine_ticks: Tick,
    /// Client-side model that has not received the server state yet
    pub is_temp: bool,
    debuffs: Vec<(DebuffSlot, Box<dyn Debuff>)>,
}

impl PlayerDamageModel {
    /// Fresh model at full health, without debuffs
    pub fn new(config: &DamageConfig) -> Self {
        let parts = PlayerPart::ALL.map(|part| {
            DamageablePart::new(
                part,
                config.parts.max_health(part),
                config.parts.can_cause_death(part),
            )
        });
        Self {
            parts,
            morphine_ticks: 0,
            is_temp: false,
            debuffs: Vec::new(),
        }
    }

    /// Placeholder model on the client until the first sync arrives
    pub fn new_temp(config: &DamageConfig) -> Self {
        let mut model = Self::new(config);
        model.is_temp = true;
        model
    }

    /// Attach debuff instances for a slot
    pub fn attach_debuffs(&mut self, slot: DebuffSlot, debuffs: Vec<Box<dyn Debuff>>) {
        self.debuffs.extend(debuffs.into_iter().map(|debuff| (slot, debuff)));
    }

    pub fn debuff_count(&self) -> usize {
        self.debuffs.len()
    }

    pub fn part(&self, part: PlayerPart) -> &DamageablePart {
        &self.parts[part.index()]
    }

    pub fn part_mut(&mut self, part: PlayerPart) -> &mut DamageablePart {
        &mut self.parts[part.index()]
    }

    pub fn parts(&self) -> &[DamageablePart] {
        &self.parts
    }

    pub fn morphine_ticks(&self) -> Tick {
        self.morphine_ticks
    }

    pub fn has_morphine(&self) -> bool {
        self.morphine_ticks > 0
    }

    pub fn apply_morphine(&mut self, ticks: Tick) {
        self.morphine_ticks = self.morphine_ticks.max(ticks);
    }

    /// Floor a part is actually held at; morphine drops it to zero
    pub fn effective_floor(&self, min_health: f32) -> f32 {
        if self.has_morphine() {
            0.0
        } else {
            min_health
        }
    }

    /// Damage one part.
    ///
    /// While morphine is active the floor is ignored and debuffs are not
    /// notified. Returns the damage that did not fit.
    pub fn damage_part(
        &mut self,
        part: PlayerPart,
        amount: f32,
        min_health: f32,
        player: &mut dyn PlayerHost,
    ) -> f32 {
        let morphine = self.has_morphine();
        let floor = self.effective_floor(min_health);

        let target = &mut self.parts[part.index()];
        let left = target.damage(amount, floor);
        let dealt = amount - left;
        let fraction = target.health_fraction();

        trace!(target: "triage::body", %part, dealt, left, floor, "part damaged");

        if !morphine && dealt > 0.0 {
            for (slot, debuff) in self.debuffs.iter_mut() {
                if slot.contains(part) {
                    debuff.handle_damage_taken(dealt, fraction, player);
                }
            }
        }
        left
    }

    /// Heal one part. Returns the amount that did not fit.
    pub fn heal_part(&mut self, part: PlayerPart, amount: f32, player: &mut dyn PlayerHost) -> f32 {
        let target = &mut self.parts[part.index()];
        let not_fitting = target.heal(amount);
        let healed = amount - not_fitting;
        let fraction = target.health_fraction();

        if healed > 0.0 {
            for (slot, debuff) in self.debuffs.iter_mut() {
                if slot.contains(part) {
                    debuff.handle_healing(healed, fraction, player);
                }
            }
        }
        not_fitting
    }

    /// Start a slow healer on a part, replacing any running one
    pub fn apply_healer(&mut self, part: PlayerPart, healer: PartHealer) {
        debug!(target: "triage::body", %part, max_heal = healer.max_heal, "healer applied");
        self.parts[part.index()].set_healer(Some(healer));
    }

    pub fn is_dead(&self, rule: DeathRule) -> bool {
        let mut lethal = self.parts.iter().filter(|p| p.can_cause_death).peekable();
        if lethal.peek().is_none() {
            return false;
        }
        match rule {
            DeathRule::Any => lethal.any(|p| p.current_health() <= 0.0),
            DeathRule::All => lethal.all(|p| p.current_health() <= 0.0),
        }
    }

    pub fn current_health_sum(&self) -> f32 {
        self.parts.iter().map(|p| p.current_health()).sum()
    }

    pub fn max_health_sum(&self) -> f32 {
        self.parts.iter().map(|p| p.max_health()).sum()
    }

    /// Whole-body health as a fraction of max
    pub fn health_fraction(&self) -> f32 {
        let max = self.max_health_sum();
        if max <= 0.0 {
            0.0
        } else {
            self.current_health_sum() / max
        }
    }

    /// Health fraction across the parts of a debuff slot
    pub fn slot_health_fraction(&self, slot: DebuffSlot) -> f32 {
        let (current, max) = slot.parts().iter().fold((0.0, 0.0), |(current, max), part| {
            let p = self.part(*part);
            (current + p.current_health(), max + p.max_health())
        });
        if max <= 0.0 {
            0.0
        } else {
            current / max
        }
    }

    /// Advance one tick: morphine, healers, debuffs, vanilla health bar
    pub fn tick(&mut self, player: &mut dyn PlayerHost) {
        if self.morphine_ticks > 0 {
            self.morphine_ticks -= 1;
        }

        for part in PlayerPart::ALL {
            let (heal_due, finished) = match self.parts[part.index()].healer_mut() {
                Some(healer) => {
                    let due = healer.tick();
                    (due, healer.has_finished())
                }
                None => continue,
            };
            if heal_due {
                self.heal_part(part, 1.0, player);
            }
            if finished {
                debug!(target: "triage::body", %part, "healer finished");
                self.parts[part.index()].set_healer(None);
            }
        }

        let fractions = DebuffSlot::ALL.map(|slot| (slot, self.slot_health_fraction(slot)));
        for (slot, debuff) in self.debuffs.iter_mut() {
            let fraction = fractions
                .iter()
                .find(|(s, _)| *s == *slot)
                .map(|(_, f)| *f)
                .unwrap_or(1.0);
            debuff.update(player, fraction);
        }

        let fraction = self.health_fraction();
        if player.is_alive() && fraction > 0.0 {
            player.set_health(fraction * player.max_health());
        }
    }

    pub fn snapshot(&self) -> ModelSnapshot {
        ModelSnapshot {
            parts: self.parts.clone(),
            morphine_ticks: self.morphine_ticks,
        }
    }

    /// Replace the health state wholesale; debuffs are kept
    pub fn restore(&mut self, snapshot: &ModelSnapshot) {
        self.parts = snapshot.parts.clone();
        self.morphine_ticks = snapshot.morphine_ticks;
    }

    pub fn to_tag(&self) -> ModelTag {
        ModelTag {
            parts: self.parts.to_vec(),
            morphine_ticks: self.morphine_ticks,
        }
    }

    /// Load health state from a tag. Parts missing from the tag are left unchanged.
    pub fn load_tag(&mut self, tag: &ModelTag) {
        for loaded in &tag.parts {
            let mut part = loaded.clone();
            part.sanitize();
            let index = part.part.index();
            self.parts[index] = part;
        }
        self.morphine_ticks = tag.morphine_ticks;
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.to_tag())?)
    }

    pub fn decode_into(&mut self, bytes: &[u8]) -> Result<()> {
        let tag: ModelTag = serde_json::from_slice(bytes)?;
        self.load_tag(&tag);
        Ok(())
    }

    pub fn sync_message(&self, player: &dyn PlayerHost) -> ModelSync {
        ModelSync {
            player: player.id(),
            tag: self.to_tag(),
        }
    }

    /// Accept authoritative server state on the client
    pub fn apply_sync(&mut self, sync: &ModelSync) {
        self.load_tag(&sync.tag);
        self.is_temp = false;
    }

    /// Predict a server-side part hit on the client
    pub fn apply_notice(&mut self, notice: &DamageNotice) -> f32 {
        self.parts[notice.part.index()].damage(notice.damage, notice.min_health)
    }
}

impl std::fmt::Debug for PlayerDamageModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerDamageModel")
            .field("parts", &self.parts)
            .field("morphine_ticks", &self.morphine_ticks)
            .field("is_temp", &self.is_temp)
            .field("debuffs", &self.debuffs.len())
            .finish()
    }
}
