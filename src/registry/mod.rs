//! Shared registry of distributions, debuffs and healing items
//!
//! Filled once during startup, then closed. After closing, every lookup is
//! a read-lock and every registration attempt is an error.

pub mod defaults;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};

use ahash::AHashMap;
use tracing::{debug, info, warn};

use crate::body::healer::PartHealer;
use crate::body::model::PlayerDamageModel;
use crate::body::part::{DebuffSlot, EquipmentSlot, PlayerPart};
use crate::core::config::DamageConfig;
use crate::core::error::{Result, TriageError};
use crate::damage::distribution::{DamageDistribution, Distribution};
use crate::damage::random::RandomDistribution;
use crate::damage::source::DamageSource;
use crate::damage::standard::StandardDistribution;
use crate::debuff::{Debuff, DebuffBuilder, DebuffFactory, SharedDebuff};

pub use defaults::register_defaults;

/// Creates the healer an item applies to a part
pub type HealerFactory = Arc<dyn Fn() -> PartHealer + Send + Sync>;

#[derive(Clone)]
struct HealingType {
    factory: HealerFactory,
    /// Time in milliseconds it takes to apply the item
    apply_time: u32,
}

/// Source bindings, debuff factories and healing items
pub struct DamageRegistry {
    distributions: RwLock<AHashMap<String, Distribution>>,
    healers: RwLock<AHashMap<String, HealingType>>,
    debuffs: RwLock<AHashMap<DebuffSlot, Vec<DebuffFactory>>>,
    open: AtomicBool,
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}

impl DamageRegistry {
    pub fn new() -> Self {
        Self {
            distributions: RwLock::new(AHashMap::new()),
            healers: RwLock::new(AHashMap::new()),
            debuffs: RwLock::new(AHashMap::new()),
            open: AtomicBool::new(true),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    fn ensure_open(&self, what: impl Into<String>) -> Result<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(TriageError::RegistrationClosed { what: what.into() })
        }
    }

    /// Bind a source to an explicit priority table
    pub fn bind_damage_source_standard(
        &self,
        kind: &str,
        priority_table: Vec<(EquipmentSlot, Vec<PlayerPart>)>,
        shuffle: bool,
    ) -> Result<()> {
        self.bind(kind, StandardDistribution::new(priority_table, shuffle).into())
    }

    /// Bind a source to one of the four random strategies
    pub fn bind_damage_source_random(
        &self,
        kind: &str,
        nearest_first: bool,
        try_no_kill: bool,
    ) -> Result<()> {
        self.bind(kind, RandomDistribution::new(nearest_first, try_no_kill).into())
    }

    /// Bind a source to a caller-provided strategy
    pub fn bind_damage_source_custom(
        &self,
        kind: &str,
        distribution: Arc<dyn DamageDistribution>,
    ) -> Result<()> {
        self.bind(kind, Distribution::Custom(distribution))
    }

    fn bind(&self, kind: &str, distribution: Distribution) -> Result<()> {
        let mut distributions = write(&self.distributions);
        self.ensure_open(format!("distribution for {kind}"))?;
        if distributions.contains_key(kind) {
            info!(
                target: "triage::registry",
                source = kind,
                "damage distribution override detected"
            );
        }
        if distribution.is_default() {
            distributions.remove(kind);
        } else {
            distributions.insert(kind.to_string(), distribution);
        }
        Ok(())
    }

    /// Strategy for a source; unbound sources get the default
    pub fn get_damage_distribution(&self, source: &DamageSource) -> Distribution {
        read(&self.distributions)
            .get(&source.kind)
            .cloned()
            .unwrap_or_default()
    }

    /// Kinds with an explicit binding, sorted
    pub fn bound_sources(&self) -> Vec<String> {
        let mut kinds: Vec<String> = read(&self.distributions).keys().cloned().collect();
        kinds.sort();
        kinds
    }

    /// Validate a builder and register its factory
    pub fn register_debuff(&self, slot: DebuffSlot, builder: DebuffBuilder) -> Result<()> {
        debug!(
            target: "triage::registry",
            ?slot,
            effect = %builder.effect(),
            kind = ?builder.kind(),
            "building debuff"
        );
        let factory = builder.build()?;
        self.register_debuff_factory(slot, factory)
    }

    /// Register a debuff factory. Slots with several parts get a shared wrapper.
    pub fn register_debuff_factory(&self, slot: DebuffSlot, factory: DebuffFactory) -> Result<()> {
        let mut debuffs = write(&self.debuffs);
        self.ensure_open(format!("debuff for {slot:?}"))?;
        let factory: DebuffFactory = if slot.parts().len() > 1 {
            Arc::new(move || Box::new(SharedDebuff::new(factory(), slot)) as Box<dyn Debuff>)
        } else {
            factory
        };
        debuffs.entry(slot).or_default().push(factory);
        Ok(())
    }

    /// Fresh debuff instances for one player
    pub fn get_debuffs(&self, slot: DebuffSlot) -> Vec<Box<dyn Debuff>> {
        read(&self.debuffs)
            .get(&slot)
            .map(|factories| factories.iter().map(|factory| factory()).collect())
            .unwrap_or_default()
    }

    /// Register a healing item
    pub fn register_healing_type(
        &self,
        item: &str,
        factory: impl Fn() -> PartHealer + Send + Sync + 'static,
        apply_time: u32,
    ) -> Result<()> {
        let mut healers = write(&self.healers);
        self.ensure_open(format!("healing type {item}"))?;
        if healers.contains_key(item) {
            warn!(target: "triage::registry", item, "healing type override detected");
        }
        healers.insert(
            item.to_string(),
            HealingType {
                factory: Arc::new(factory),
                apply_time,
            },
        );
        Ok(())
    }

    /// New healer for an item, if it is a healing item
    pub fn get_part_healer(&self, item: &str) -> Option<PartHealer> {
        read(&self.healers).get(item).map(|healing| (healing.factory)())
    }

    /// Application time of an item in milliseconds
    pub fn get_part_healing_time(&self, item: &str) -> Option<u32> {
        read(&self.healers).get(item).map(|healing| healing.apply_time)
    }

    /// Model for a new player with every registered debuff attached
    pub fn create_model(&self, config: &DamageConfig) -> PlayerDamageModel {
        let mut model = PlayerDamageModel::new(config);
        for slot in DebuffSlot::ALL {
            model.attach_debuffs(slot, self.get_debuffs(slot));
        }
        model
    }

    /// Stop accepting registrations.
    ///
    /// Holds every write lock while the gate flips, so a registration either
    /// lands before the close or fails.
    pub fn close(&self, config: &DamageConfig) {
        {
            let _distributions = write(&self.distributions);
            let _healers = write(&self.healers);
            let _debuffs = write(&self.debuffs);
            self.open.store(false, Ordering::Release);
        }
        if config.debug {
            info!(target: "triage::registry", "registry readout:");
            let distributions = read(&self.distributions);
            let mut entries: Vec<(&String, &Distribution)> = distributions.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            for (kind, distribution) in entries {
                info!(target: "triage::registry", "{} bound to {:?}", kind, distribution);
            }
        }
    }
}

impl Default for DamageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DamageRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DamageRegistry")
            .field("distributions", &read(&self.distributions).len())
            .field("healers", &read(&self.healers).len())
            .field("debuffs", &read(&self.debuffs).values().map(Vec::len).sum::<usize>())
            .field("open", &self.is_open())
            .finish()
    }
}

static REGISTRY: OnceLock<DamageRegistry> = OnceLock::new();

/// Process-wide registry
pub fn registry() -> &'static DamageRegistry {
    REGISTRY.get_or_init(DamageRegistry::new)
}
