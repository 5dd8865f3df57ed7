//! Registry integration tests
//!
//! Covers source binding overrides, the registration gate, debuff
//! validation and concurrent lookups.

use std::sync::Arc;
use std::thread;

use triage::body::part::{DebuffSlot, EquipmentSlot, PlayerPart};
use triage::body::PartHealer;
use triage::core::config::DamageConfig;
use triage::core::error::TriageError;
use triage::damage::distribution::{DamageContext, DamageDistribution, Distribution};
use triage::damage::random::{ANY_KILL, NEAREST_KILL};
use triage::damage::source::DamageSource;
use triage::damage::standard::StandardDistribution;
use triage::debuff::{Debuff, DebuffBuilder};
use triage::registry::{register_defaults, registry, DamageRegistry};

/// Puts all damage into the body, ignoring the tables
struct BodyOnly;

impl DamageDistribution for BodyOnly {
    fn distribute_damage(
        &self,
        damage: f32,
        ctx: &mut DamageContext<'_>,
        _source: &DamageSource,
        _add_stat: bool,
    ) -> f32 {
        ctx.model.damage_part(PlayerPart::Body, damage, 0.0, &mut *ctx.player)
    }

    fn name(&self) -> String {
        "body_only".to_string()
    }
}

#[test]
fn test_custom_binding_overrides_stock() {
    let registry = DamageRegistry::new();
    register_defaults(&registry).unwrap();
    registry
        .bind_damage_source_custom("fall", Arc::new(BodyOnly))
        .unwrap();

    let distribution = registry.get_damage_distribution(&DamageSource::fall());
    assert!(matches!(distribution, Distribution::Custom(_)));
    assert_eq!(distribution.name(), "body_only");
}

#[test]
fn test_rebinding_to_default_restores_fallback() {
    let registry = DamageRegistry::new();
    register_defaults(&registry).unwrap();
    assert!(!registry.get_damage_distribution(&DamageSource::fall()).is_default());

    registry
        .bind_damage_source_random("fall", NEAREST_KILL.nearest_first, NEAREST_KILL.try_no_kill)
        .unwrap();
    assert!(registry.get_damage_distribution(&DamageSource::fall()).is_default());
    assert!(!registry.bound_sources().contains(&"fall".to_string()));
}

#[test]
fn test_standard_binding_keeps_table() {
    let registry = DamageRegistry::new();
    let table = vec![
        (EquipmentSlot::Chest, vec![PlayerPart::Body]),
        StandardDistribution::whole_slot(EquipmentSlot::Head),
    ];
    registry
        .bind_damage_source_standard("sting", table.clone(), true)
        .unwrap();

    match registry.get_damage_distribution(&DamageSource::new("sting")) {
        Distribution::Standard(standard) => {
            assert_eq!(standard.priority_table, table);
            assert!(standard.shuffle);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_closed_registry_rejects_every_write() {
    let registry = DamageRegistry::new();
    register_defaults(&registry).unwrap();
    registry.close(&DamageConfig {
        debug: true,
        ..DamageConfig::default()
    });

    let closed = |result: triage::core::error::Result<()>| {
        matches!(result, Err(TriageError::RegistrationClosed { .. }))
    };
    assert!(closed(registry.bind_damage_source_random("magic", true, true)));
    assert!(closed(registry.bind_damage_source_standard("magic", Vec::new(), false)));
    assert!(closed(registry.bind_damage_source_custom("magic", Arc::new(BodyOnly))));
    assert!(closed(registry.register_debuff(
        DebuffSlot::Head,
        DebuffBuilder::on_hit("glowing").condition(1.0, 20)
    )));
    assert!(closed(registry.register_healing_type("gauze", || PartHealer::new(20, 1), 1000)));

    // lookups still work and bindings are unchanged
    assert!(matches!(
        registry.get_damage_distribution(&DamageSource::magic()),
        Distribution::Random(random) if random == ANY_KILL
    ));
    assert_eq!(registry.get_debuffs(DebuffSlot::Head).len(), 2);
}

#[test]
fn test_debuff_builder_validation() {
    let registry = DamageRegistry::new();

    let result = registry.register_debuff(DebuffSlot::Arms, DebuffBuilder::on_hit("blindness"));
    assert!(matches!(result, Err(TriageError::EmptyDebuffConditions { .. })));

    let result = registry.register_debuff(
        DebuffSlot::Body,
        DebuffBuilder::constant("weakness").condition(0.5, 1).sound("ding"),
    );
    assert!(matches!(result, Err(TriageError::ConstantDebuffWithSound { .. })));

    assert!(registry.get_debuffs(DebuffSlot::Arms).is_empty());
    assert!(registry.get_debuffs(DebuffSlot::Body).is_empty());
}

#[test]
fn test_disabled_debuff_does_nothing() {
    let registry = DamageRegistry::new();
    registry
        .register_debuff(
            DebuffSlot::Head,
            DebuffBuilder::on_hit("blindness").condition(1.0, 80).enabled_if(|| false),
        )
        .unwrap();

    let debuffs = registry.get_debuffs(DebuffSlot::Head);
    assert_eq!(debuffs.len(), 1);
    assert!(!debuffs[0].is_enabled());
}

#[test]
fn test_concurrent_lookups() {
    let registry = Arc::new(DamageRegistry::new());
    register_defaults(&registry).unwrap();
    registry.close(&DamageConfig::default());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for _ in 0..100 {
                    assert!(!registry.get_damage_distribution(&DamageSource::fall()).is_default());
                    assert!(registry.get_damage_distribution(&DamageSource::mob()).is_default());
                    assert_eq!(registry.get_debuffs(DebuffSlot::LegsAndFeet).len(), 1);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_registrations_racing_close_do_not_land_after_it() {
    for _ in 0..20 {
        let registry = Arc::new(DamageRegistry::new());
        let writers: Vec<_> = (0..4)
            .map(|worker| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    let mut accepted = 0;
                    for i in 0..50 {
                        let kind = format!("source_{worker}_{i}");
                        if registry.bind_damage_source_random(&kind, false, true).is_ok() {
                            accepted += 1;
                        }
                    }
                    accepted
                })
            })
            .collect();

        registry.close(&DamageConfig::default());
        let at_close = registry.bound_sources();

        let accepted: usize = writers.into_iter().map(|handle| handle.join().unwrap()).sum();
        assert_eq!(registry.bound_sources(), at_close);
        assert_eq!(at_close.len(), accepted);
    }
}

#[test]
fn test_global_registry_is_shared() {
    let first = registry() as *const DamageRegistry;
    let second = registry() as *const DamageRegistry;
    assert_eq!(first, second);
}
