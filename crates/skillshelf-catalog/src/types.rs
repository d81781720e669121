//! Catalog reference types.
//!
//! Immutable data created at build time and never mutated at runtime.

use strum::{Display, EnumString};

/// Kind tag for a downloadable material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum MaterialKind {
    Checklist,
    Template,
    Pdf,
}

/// Downloadable material attached to a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Material {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: MaterialKind,
}

/// Difficulty level of a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

/// A single purchasable learning unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub id: &'static str,
    pub title: &'static str,
    /// One-line outcome summary shown on cards.
    pub outcome: &'static str,
    pub description: &'static str,
    pub topic: &'static str,
    pub duration_minutes: u16,
    pub level: Level,
    /// Target-role tags.
    pub best_for: &'static [&'static str],
    /// Price in minor currency units. Zero means free.
    pub price: u64,
    pub collection_id: &'static str,
    pub materials: &'static [Material],
}

impl Module {
    pub fn is_free(&self) -> bool {
        self.price == 0
    }
}

/// A curated, ordered group of modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub module_ids: &'static [&'static str],
}
