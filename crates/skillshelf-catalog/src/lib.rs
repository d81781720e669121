//! Static catalog of purchasable learning modules and their collections.
//!
//! Everything here is immutable reference data queried by the page layer.
//! Lookup misses are `None`, never errors.

mod data;
mod types;

pub use types::{Collection, Level, Material, MaterialKind, Module};

/// All modules, in catalog order.
pub fn modules() -> &'static [Module] {
    data::MODULES
}

/// All collections, in catalog order.
pub fn collections() -> &'static [Collection] {
    data::COLLECTIONS
}

/// Look up a module by id.
pub fn find_module(id: &str) -> Option<&'static Module> {
    data::MODULES.iter().find(|m| m.id == id)
}

/// Look up a collection by id.
pub fn find_collection(id: &str) -> Option<&'static Collection> {
    data::COLLECTIONS.iter().find(|c| c.id == id)
}

/// Modules belonging to a collection, in the collection's declared order.
pub fn modules_in_collection(collection_id: &str) -> Vec<&'static Module> {
    match find_collection(collection_id) {
        Some(collection) => collection
            .module_ids
            .iter()
            .filter_map(|id| find_module(id))
            .collect(),
        None => Vec::new(),
    }
}

/// Library filters. `None` (or an empty search) means "any" for that axis;
/// axes combine with AND.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModuleFilter<'a> {
    /// Case-insensitive free-text match against title, outcome and topic.
    pub search: Option<&'a str>,
    pub topic: Option<&'a str>,
    pub level: Option<Level>,
    /// One of the `best_for` role tags.
    pub role: Option<&'a str>,
}

fn matches_search(module: &Module, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    module.title.to_lowercase().contains(&needle)
        || module.outcome.to_lowercase().contains(&needle)
        || module.topic.to_lowercase().contains(&needle)
}

/// Filter modules along every axis of a [`ModuleFilter`].
pub fn filter_modules(filter: &ModuleFilter) -> Vec<&'static Module> {
    data::MODULES
        .iter()
        .filter(|m| {
            filter
                .search
                .is_none_or(|s| s.is_empty() || matches_search(m, s))
        })
        .filter(|m| filter.topic.is_none_or(|t| m.topic == t))
        .filter(|m| filter.level.is_none_or(|l| m.level == l))
        .filter(|m| filter.role.is_none_or(|r| m.best_for.iter().any(|tag| *tag == r)))
        .collect()
}

/// Distinct topics, in first-seen order.
pub fn topics() -> Vec<&'static str> {
    let mut seen = Vec::new();
    for module in data::MODULES {
        if !seen.contains(&module.topic) {
            seen.push(module.topic);
        }
    }
    seen
}

/// Distinct `best_for` role tags, in first-seen order.
pub fn roles() -> Vec<&'static str> {
    let mut seen = Vec::new();
    for module in data::MODULES {
        for role in module.best_for {
            if !seen.contains(role) {
                seen.push(*role);
            }
        }
    }
    seen
}

/// Modules featured on the landing page.
pub fn featured() -> Vec<&'static Module> {
    data::MODULES.iter().take(3).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_module_hit_and_miss() {
        assert!(find_module("one-on-ones").is_some());
        assert!(find_module("does-not-exist").is_none());
    }

    #[test]
    fn every_module_belongs_to_a_known_collection() {
        for module in modules() {
            let collection =
                find_collection(module.collection_id).expect("module references a collection");
            assert!(
                collection.module_ids.contains(&module.id),
                "{} missing from collection {}",
                module.id,
                collection.id
            );
        }
    }

    #[test]
    fn collections_reference_known_modules_in_order() {
        for collection in collections() {
            let listed = modules_in_collection(collection.id);
            assert_eq!(listed.len(), collection.module_ids.len());
            for (module, id) in listed.iter().zip(collection.module_ids) {
                assert_eq!(module.id, *id);
            }
        }
    }

    #[test]
    fn filter_by_topic_and_level() {
        let people = filter_modules(&ModuleFilter {
            topic: Some("People Management"),
            ..ModuleFilter::default()
        });
        assert!(!people.is_empty());
        assert!(people.iter().all(|m| m.topic == "People Management"));

        let advanced = filter_modules(&ModuleFilter {
            level: Some(Level::Advanced),
            ..ModuleFilter::default()
        });
        assert!(advanced.iter().all(|m| m.level == Level::Advanced));

        let both = filter_modules(&ModuleFilter {
            topic: Some("People Management"),
            level: Some(Level::Advanced),
            ..ModuleFilter::default()
        });
        assert!(both.iter().all(|m| m.topic == "People Management"
            && m.level == Level::Advanced));
    }

    #[test]
    fn search_matches_title_outcome_and_topic_case_insensitively() {
        let by_title = filter_modules(&ModuleFilter {
            search: Some("FEEDBACK"),
            ..ModuleFilter::default()
        });
        assert!(by_title.iter().any(|m| m.id == "feedback-loops"));

        let by_outcome = filter_modules(&ModuleFilter {
            search: Some("calendar"),
            ..ModuleFilter::default()
        });
        assert!(by_outcome.iter().any(|m| m.id == "meeting-diet"));

        let by_topic = filter_modules(&ModuleFilter {
            search: Some("hiring"),
            ..ModuleFilter::default()
        });
        assert!(by_topic.iter().any(|m| m.id == "hiring-bar"));

        let miss = filter_modules(&ModuleFilter {
            search: Some("kubernetes"),
            ..ModuleFilter::default()
        });
        assert!(miss.is_empty());
    }

    #[test]
    fn empty_search_matches_everything() {
        let all = filter_modules(&ModuleFilter {
            search: Some(""),
            ..ModuleFilter::default()
        });
        assert_eq!(all.len(), modules().len());
    }

    #[test]
    fn filter_by_role_tag() {
        let directors = filter_modules(&ModuleFilter {
            role: Some("director"),
            ..ModuleFilter::default()
        });
        assert!(!directors.is_empty());
        assert!(directors.iter().all(|m| m.best_for.contains(&"director")));

        let nobody = filter_modules(&ModuleFilter {
            role: Some("astronaut"),
            ..ModuleFilter::default()
        });
        assert!(nobody.is_empty());
    }

    #[test]
    fn roles_are_distinct() {
        let roles = roles();
        assert!(roles.contains(&"team-lead"));
        let mut deduped = roles.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(roles.len(), deduped.len());
    }

    #[test]
    fn catalog_contains_a_free_module() {
        assert!(modules().iter().any(|m| m.is_free()));
    }

    #[test]
    fn topics_are_distinct() {
        let topics = topics();
        let mut deduped = topics.clone();
        deduped.dedup();
        assert_eq!(topics, deduped);
    }
}
