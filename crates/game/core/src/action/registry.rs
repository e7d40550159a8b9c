//! Registry mapping action names to instance makers.
//!
//! Built once at startup (usually from loaded definitions) and handed to
//! whatever equips actors. Every call to [`ActionRegistry::make`] returns a
//! fresh instance with its own runtime state.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::action::{
    Action, ActionDefinition, ActionInstance, BasicAttack, InstanceSnapshot, RegistryError,
};
use crate::config::CombatConfig;

/// Produces a fresh instance of one action.
pub type ActionMaker = Arc<dyn Fn() -> ActionInstance + Send + Sync>;

#[derive(Clone, Default)]
pub struct ActionRegistry {
    makers: BTreeMap<String, ActionMaker>,
    definitions: BTreeMap<String, Arc<ActionDefinition>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every definition as a basic attack.
    pub fn from_definitions<I>(definitions: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = ActionDefinition>,
    {
        let mut registry = Self::new();
        for definition in definitions {
            registry.register_basic_attack(definition)?;
        }
        Ok(registry)
    }

    /// Registers a custom maker under `name`.
    pub fn register<F>(&mut self, name: impl Into<String>, maker: F) -> Result<(), RegistryError>
    where
        F: Fn() -> ActionInstance + Send + Sync + 'static,
    {
        let name = name.into();
        if self.makers.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }
        self.makers.insert(name, Arc::new(maker));
        Ok(())
    }

    /// Registers a basic attack keyed by the definition's name.
    pub fn register_basic_attack(
        &mut self,
        definition: ActionDefinition,
    ) -> Result<(), RegistryError> {
        let definition = Arc::new(definition);
        let shared = Arc::clone(&definition);
        self.register(definition.name.clone(), move || {
            BasicAttack::new(Arc::clone(&shared)).into()
        })?;
        self.definitions.insert(definition.name.clone(), definition);
        Ok(())
    }

    /// Fresh instance of `name`.
    pub fn make(&self, name: &str) -> Result<ActionInstance, RegistryError> {
        self.makers
            .get(name)
            .map(|maker| maker())
            .ok_or_else(|| RegistryError::Unknown(name.to_string()))
    }

    /// Rebuilds an instance from a snapshot, restoring its ammo.
    ///
    /// Unlimited actions only accept -1. Finite actions accept `0..=capacity`.
    pub fn restore(&self, snapshot: &InstanceSnapshot) -> Result<ActionInstance, RegistryError> {
        let instance = self.make(&snapshot.name)?;
        if instance.kind() != snapshot.kind {
            return Err(RegistryError::Unknown(format!(
                "{}:{}",
                snapshot.kind, snapshot.name
            )));
        }

        let capacity = instance.current_ammo();
        let valid = if capacity == CombatConfig::UNLIMITED_AMMO {
            snapshot.current_ammo == CombatConfig::UNLIMITED_AMMO
        } else {
            (0..=capacity).contains(&snapshot.current_ammo)
        };
        if !valid {
            return Err(RegistryError::InvalidAmmo {
                name: snapshot.name.clone(),
                current_ammo: snapshot.current_ammo,
                capacity,
            });
        }
        Ok(instance.with_current_ammo(snapshot.current_ammo))
    }

    pub fn definition(&self, name: &str) -> Option<&Arc<ActionDefinition>> {
        self.definitions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.makers.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.makers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.makers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.makers.is_empty()
    }
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("actions", &self.makers.keys().collect::<Vec<_>>())
            .finish()
    }
}
