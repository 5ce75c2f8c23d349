//! Archetype lookup and spawn eligibility.

use breach_core::config::{Archetype, EnemyConfig};

/// Look up an archetype by name, falling back to the configured default.
///
/// Returns the name actually resolved together with its stats. `None` only
/// when neither the requested nor the default archetype is defined, which a
/// validated config rules out.
pub fn resolve_archetype<'a>(
    name: &'a str,
    enemies: &'a EnemyConfig,
) -> Option<(&'a str, &'a Archetype)> {
    match enemies.archetypes.get(name) {
        Some(archetype) => Some((name, archetype)),
        None => enemies
            .archetypes
            .get(&enemies.default_type)
            .map(|archetype| (enemies.default_type.as_str(), archetype)),
    }
}

/// Whether `name` exists and passes the global allow-list. An empty
/// allow-list admits every defined archetype.
pub fn is_type_allowed(name: &str, global_allowed: &[String], enemies: &EnemyConfig) -> bool {
    if !enemies.archetypes.contains_key(name) {
        return false;
    }
    global_allowed.is_empty() || global_allowed.iter().any(|allowed| allowed == name)
}

/// Archetype pool a wave may draw from.
///
/// Unlisted wave types mean the default archetype. The pool is filtered by
/// [`is_type_allowed`] and collapses to the default when nothing survives,
/// so it is never empty.
pub fn spawn_pool(wave_types: &[String], global_allowed: &[String], enemies: &EnemyConfig) -> Vec<String> {
    let pool: Vec<String> = wave_types
        .iter()
        .filter(|name| is_type_allowed(name, global_allowed, enemies))
        .cloned()
        .collect();
    if pool.is_empty() {
        vec![enemies.default_type.clone()]
    } else {
        pool
    }
}
