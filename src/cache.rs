// src/cache.rs - Per-session bundle cache keyed by canonical scenario
use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::generator::generate_scenario_bundle;
use crate::scenario::Scenario;
use crate::types::ScenarioDatasetBundle;

/// Holds one generated bundle per scenario so re-selecting a scenario shows
/// the same data. Labels are resolved through `Scenario::from_label` first, so
/// "Nightlife" and " nightlife " share an entry and every unknown label shares
/// the baseline entry. No expiry; entries live until invalidated or until the
/// owning session is dropped.
#[derive(Debug, Default)]
pub struct SessionCache {
    bundles: HashMap<Scenario, Arc<ScenarioDatasetBundle>>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create(&mut self, label: &str) -> Arc<ScenarioDatasetBundle> {
        let scenario = Scenario::from_label(label);
        if let Some(bundle) = self.bundles.get(&scenario) {
            debug!("📦 [CACHE] Hit for '{}' ({})", label, scenario.slug());
            return Arc::clone(bundle);
        }

        let bundle = Arc::new(generate_scenario_bundle(scenario));
        info!(
            "📦 [CACHE] Generated bundle for '{}' ({} zones, {} reports)",
            scenario.slug(),
            bundle.zones.len(),
            bundle.reports.len()
        );
        self.bundles.insert(scenario, Arc::clone(&bundle));
        bundle
    }

    pub fn get(&self, label: &str) -> Option<Arc<ScenarioDatasetBundle>> {
        self.bundles.get(&Scenario::from_label(label)).cloned()
    }

    /// Returns true if an entry was removed.
    pub fn invalidate(&mut self, label: &str) -> bool {
        let scenario = Scenario::from_label(label);
        let removed = self.bundles.remove(&scenario).is_some();
        if removed {
            info!("🔄 [CACHE] Invalidated '{}'", scenario.slug());
        }
        removed
    }

    pub fn contains(&self, label: &str) -> bool {
        self.bundles.contains_key(&Scenario::from_label(label))
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    pub fn clear(&mut self) {
        self.bundles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenarios_are_cached_independently() {
        let mut cache = SessionCache::new();
        let night = cache.get_or_create("nightlife");
        let school = cache.get_or_create("school-commute-safety");

        assert_eq!(cache.len(), 2);
        assert!(!Arc::ptr_eq(&night, &school));
        assert!(cache.invalidate("nightlife"));
        assert!(!cache.contains("nightlife"));
        assert!(cache.contains("school-commute-safety"));
        assert!(!cache.invalidate("nightlife"));
    }

    #[test]
    fn test_spellings_of_one_scenario_share_an_entry() {
        let mut cache = SessionCache::new();
        let lower = cache.get_or_create("nightlife");
        let title = cache.get_or_create("Nightlife");
        let padded = cache.get_or_create("  nightlife ");

        assert!(Arc::ptr_eq(&lower, &title));
        assert!(Arc::ptr_eq(&lower, &padded));
        assert_eq!(cache.len(), 1);
    }
}
