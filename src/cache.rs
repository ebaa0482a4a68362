//! Memoised expansion of debug-mode resource lists.

use std::sync::Arc;

use dashmap::DashMap;

use crate::models::Resource;
use crate::tag::TagSet;

/// Default number of expanded groups kept before entries start being evicted.
///
/// Eviction takes the first entry of the first non-empty shard, so under sustained pressure
/// the same shard loses entries first.
pub const DEFAULT_CAPACITY: usize = 256;

/// Key under which the expansion of `group_name` for `tags` is stored.
///
/// Group names containing `@` can collide with other keys; callers keep group names plain.
pub fn cache_key(tags: &TagSet, group_name: &str) -> String {
  format!("{}@{}", tags.join("_"), group_name)
}

/// Bounded concurrent cache of expanded resource lists.
///
/// Entries are immutable once inserted, so readers never observe a partially built list.
/// Concurrent misses for the same key may both compute and insert; the last insert wins.
#[derive(Debug)]
pub struct ResolvedResourceCache {
  entries: DashMap<String, Arc<[Resource]>>,
  capacity: usize,
}

impl ResolvedResourceCache {
  /// Cache holding up to [`DEFAULT_CAPACITY`] entries.
  pub fn new() -> Self {
    Self::with_capacity(DEFAULT_CAPACITY)
  }

  /// Cache holding up to `capacity` entries (at least one).
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      entries: DashMap::new(),
      capacity: capacity.max(1),
    }
  }

  /// Previously stored expansion for `key`.
  pub fn get(&self, key: &str) -> Option<Arc<[Resource]>> {
    self.entries.get(key).map(|entry| Arc::clone(entry.value()))
  }

  /// Store `resources` under `key`, evicting an arbitrary entry when full.
  pub fn insert(&self, key: String, resources: Vec<Resource>) -> Arc<[Resource]> {
    let resources: Arc<[Resource]> = resources.into();
    if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
      self.evict_one();
    }
    self.entries.insert(key, Arc::clone(&resources));
    resources
  }

  fn evict_one(&self) {
    let victim = self.entries.iter().next().map(|entry| entry.key().clone());
    if let Some(victim) = victim {
      log::debug!("evicting resolved resources for {victim}");
      self.entries.remove(&victim);
    }
  }

  /// Number of cached expansions.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Returns `true` when nothing is cached.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Drop every cached expansion, e.g. after the sources on disk changed.
  pub fn clear(&self) {
    self.entries.clear();
  }
}

impl Default for ResolvedResourceCache {
  fn default() -> Self {
    Self::new()
  }
}
