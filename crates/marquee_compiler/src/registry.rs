//! The handler table.
//!
//! Maps handler names to entry points, globally and per factory. Names are
//! matched case-insensitively but keep their spelling for display. Tables
//! are persistent maps, so [`Registry::snapshot`] is cheap and a linker can
//! hold one while compilation continues.

use im::OrdMap;
use marquee_bytecode::CodeOffset;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::session::UnitId;

/// A compiled handler.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HandlerEntry {
    /// Name as written in the definition.
    pub name: String,
    /// Unit whose script holds the body.
    pub unit: UnitId,
    /// Offset of the first instruction of the body.
    pub entry: CodeOffset,
    /// Declared arguments, the implicit receiver of a method included.
    pub arg_count: u32,
}

/// A factory and its methods.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactoryEntry {
    /// Name as written in the definition.
    pub name: String,
    /// Unit that declared the factory.
    pub unit: UnitId,
    methods: OrdMap<String, HandlerEntry>,
}

impl FactoryEntry {
    /// Returns the methods in name order.
    pub fn methods(&self) -> impl Iterator<Item = &HandlerEntry> {
        self.methods.values()
    }

    /// Looks up a method.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&HandlerEntry> {
        self.methods.get(&key(name))
    }
}

/// Where a definition is registered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope<'a> {
    /// The global handler table.
    Global,
    /// The method table of a factory.
    Factory(&'a str),
}

fn key(name: &str) -> String {
    name.to_lowercase()
}

/// Global handlers and factory method tables.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Registry {
    handlers: OrdMap<String, HandlerEntry>,
    factories: OrdMap<String, FactoryEntry>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler, replacing any previous one of the same name.
    pub fn define(&mut self, scope: Scope<'_>, entry: HandlerEntry) {
        let name = key(&entry.name);
        let replaced = match scope {
            Scope::Global => self.handlers.insert(name, entry),
            Scope::Factory(factory) => {
                let unit = entry.unit;
                self.factories
                    .entry(key(factory))
                    .or_insert_with(|| FactoryEntry {
                        name: factory.to_string(),
                        unit,
                        methods: OrdMap::new(),
                    })
                    .methods
                    .insert(name, entry)
            }
        };
        if let Some(old) = replaced {
            warn!(name = %old.name, ?scope, "handler redefined");
        }
    }

    /// Registers a factory with an empty method table.
    pub fn define_factory(&mut self, name: &str, unit: UnitId) {
        let previous = self.factories.insert(
            key(name),
            FactoryEntry {
                name: name.to_string(),
                unit,
                methods: OrdMap::new(),
            },
        );
        if previous.is_some() {
            warn!(name, "factory redefined");
        }
    }

    /// Looks up a global handler.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&HandlerEntry> {
        self.handlers.get(&key(name))
    }

    /// Looks up a factory.
    #[must_use]
    pub fn factory(&self, name: &str) -> Option<&FactoryEntry> {
        self.factories.get(&key(name))
    }

    /// Looks up a method of a factory.
    #[must_use]
    pub fn lookup_method(&self, factory: &str, name: &str) -> Option<&HandlerEntry> {
        self.factory(factory)?.method(name)
    }

    /// Returns true if a call to `name` can be resolved.
    #[must_use]
    pub fn resolves(&self, name: &str) -> bool {
        self.lookup(name).is_some() || self.factory(name).is_some()
    }

    /// Returns the global handlers in name order.
    pub fn handlers(&self) -> impl Iterator<Item = &HandlerEntry> {
        self.handlers.values()
    }

    /// Returns the factories in name order.
    pub fn factories(&self) -> impl Iterator<Item = &FactoryEntry> {
        self.factories.values()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty() && self.factories.is_empty()
    }

    /// Removes every definition.
    pub fn clear(&mut self) {
        self.handlers.clear();
        self.factories.clear();
    }

    /// Returns an immutable copy sharing structure with this registry.
    #[must_use]
    pub fn snapshot(&self) -> Self {
        self.clone()
    }
}
