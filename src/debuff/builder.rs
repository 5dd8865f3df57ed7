//! Declarative construction of debuffs for the registry

use std::collections::BTreeMap;
use std::sync::Arc;

use ordered_float::OrderedFloat;

use crate::core::error::{Result, TriageError};
use crate::core::types::EffectId;
use crate::debuff::{always_enabled, ConstantDebuff, Debuff, EnabledFn, OnHitDebuff};

/// Creates a fresh debuff instance for one player
pub type DebuffFactory = Arc<dyn Fn() -> Box<dyn Debuff> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebuffKind {
    /// Conditions are damage thresholds → effect duration in ticks
    OnHit,
    /// Conditions are health fractions → effect level
    Constant,
}

/// Builder for the stock debuff types
pub struct DebuffBuilder {
    effect: EffectId,
    kind: DebuffKind,
    conditions: BTreeMap<OrderedFloat<f32>, u32>,
    sound: Option<String>,
    enabled: Option<EnabledFn>,
}

impl DebuffBuilder {
    pub fn on_hit(effect: impl Into<String>) -> Self {
        Self::new(effect, DebuffKind::OnHit)
    }

    pub fn constant(effect: impl Into<String>) -> Self {
        Self::new(effect, DebuffKind::Constant)
    }

    fn new(effect: impl Into<String>, kind: DebuffKind) -> Self {
        Self {
            effect: EffectId::new(effect),
            kind,
            conditions: BTreeMap::new(),
            sound: None,
            enabled: None,
        }
    }

    pub fn condition(mut self, threshold: f32, value: u32) -> Self {
        self.conditions.insert(OrderedFloat(threshold), value);
        self
    }

    pub fn sound(mut self, sound: impl Into<String>) -> Self {
        self.sound = Some(sound.into());
        self
    }

    pub fn enabled_if(mut self, enabled: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.enabled = Some(Arc::new(enabled));
        self
    }

    pub fn effect(&self) -> &EffectId {
        &self.effect
    }

    pub fn kind(&self) -> DebuffKind {
        self.kind
    }

    /// Validate and turn into a factory
    pub fn build(self) -> Result<DebuffFactory> {
        if self.conditions.is_empty() {
            return Err(TriageError::EmptyDebuffConditions {
                effect: self.effect.to_string(),
            });
        }
        let enabled = self.enabled.unwrap_or_else(always_enabled);
        let effect = self.effect;
        let conditions = self.conditions;

        match self.kind {
            DebuffKind::OnHit => {
                let sound = self.sound;
                Ok(Arc::new(move || {
                    Box::new(OnHitDebuff::new(
                        effect.clone(),
                        conditions.clone(),
                        enabled.clone(),
                        sound.clone(),
                    )) as Box<dyn Debuff>
                }))
            }
            DebuffKind::Constant => {
                if self.sound.is_some() {
                    return Err(TriageError::ConstantDebuffWithSound {
                        effect: effect.to_string(),
                    });
                }
                Ok(Arc::new(move || {
                    Box::new(ConstantDebuff::new(
                        effect.clone(),
                        conditions.clone(),
                        enabled.clone(),
                    )) as Box<dyn Debuff>
                }))
            }
        }
    }
}
