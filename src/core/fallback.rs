use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::ConvertError;

/// A string map whose lookups are total: a miss synthesizes the key itself
/// as the value, caches it, and returns it.
///
/// The caching is part of the observable contract. Callers may inspect the
/// key set after a conversion run to see which values were ever looked up,
/// so a second lookup of the same absent key must find the cached entry
/// rather than synthesize a fresh one. Interior mutability keeps the owning
/// registry shareable by `&` reference; the pipeline is single-threaded
/// batch code, so no locking is needed.
#[derive(Debug, Default)]
pub struct FallbackMap {
    entries: RefCell<HashMap<String, String>>,
}

impl FallbackMap {
    /// An empty map where every lookup falls back to identity.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        FallbackMap { entries: RefCell::new(entries) }
    }

    /// Returns the stored value, or the key itself on a miss.
    /// A miss permanently grows the map.
    pub fn lookup_or_default(&self, key: &str) -> String {
        self.entries
            .borrow_mut()
            .entry(key.to_string())
            .or_insert_with(|| key.to_string())
            .clone()
    }

    /// Whether `key` was registered up front or looked up at least once.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

/// A string map without any fallback: a miss is a reportable error.
///
/// Used for the missing-value side table, where the caller decides whether
/// to surface the miss or to fall back to identity itself.
#[derive(Debug, Default)]
pub struct StrictMap {
    entries: HashMap<String, String>,
}

impl StrictMap {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        StrictMap { entries }
    }

    pub fn lookup_strict(&self, key: &str) -> Result<&str, ConvertError> {
        self.entries
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ConvertError::KeyNotFound { key: key.to_string() })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// A validated bilingual table: forward (zh to en) and reverse (en to zh)
/// directions built from one pair list.
///
/// Construction fails if either side contains a duplicate, since a repeated
/// value would silently drop an entry from the inverse direction. Lookups
/// are pure identity-fallback; unlike [`FallbackMap`] nothing is cached.
#[derive(Debug)]
pub struct BijectiveMap {
    forward: HashMap<String, String>,
    reverse: HashMap<String, String>,
}

impl BijectiveMap {
    /// Builds both directions from `(zh, en)` pairs, verifying invertibility.
    pub fn from_pairs(
        table: &'static str,
        pairs: &[(&str, &str)],
    ) -> Result<Self, ConvertError> {
        let mut forward = HashMap::with_capacity(pairs.len());
        let mut reverse = HashMap::with_capacity(pairs.len());
        for &(zh, en) in pairs {
            if forward.insert(zh.to_string(), en.to_string()).is_some() {
                return Err(ConvertError::BrokenBijection {
                    table,
                    side: "key",
                    entry: zh.to_string(),
                });
            }
            if reverse.insert(en.to_string(), zh.to_string()).is_some() {
                return Err(ConvertError::BrokenBijection {
                    table,
                    side: "value",
                    entry: en.to_string(),
                });
            }
        }
        Ok(BijectiveMap { forward, reverse })
    }

    /// zh to en, falling back to the key itself.
    pub fn forward(&self, key: &str) -> String {
        self.forward
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// en to zh, falling back to the key itself.
    pub fn reverse(&self, key: &str) -> String {
        self.reverse
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Forward lookup without the identity fallback.
    pub fn get_forward(&self, key: &str) -> Option<&str> {
        self.forward.get(key).map(String::as_str)
    }

    /// Reverse lookup without the identity fallback.
    pub fn get_reverse(&self, key: &str) -> Option<&str> {
        self.reverse.get(key).map(String::as_str)
    }

    pub fn contains_forward(&self, key: &str) -> bool {
        self.forward.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_map_returns_and_caches_identity() {
        let map = FallbackMap::from_pairs([("知道", "known")]);
        assert_eq!(map.lookup_or_default("知道"), "known");
        assert_eq!(map.len(), 1);

        // First miss synthesizes the default and grows the map.
        assert_eq!(map.lookup_or_default("未知"), "未知");
        assert_eq!(map.len(), 2);
        assert!(map.contains("未知"));

        // Second lookup hits the cached entry.
        assert_eq!(map.lookup_or_default("未知"), "未知");
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn strict_map_misses_are_errors() {
        let map = StrictMap::from_pairs([("免费", "free")]);
        assert_eq!(map.lookup_strict("免费").unwrap(), "free");
        let err = map.lookup_strict("收费").unwrap_err();
        assert!(matches!(err, ConvertError::KeyNotFound { key } if key == "收费"));
        // A miss never grows the map.
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn bijective_map_round_trips_and_falls_back() {
        let map = BijectiveMap::from_pairs("test", &[("酒店", "hotel")]).unwrap();
        assert_eq!(map.forward("酒店"), "hotel");
        assert_eq!(map.reverse("hotel"), "酒店");
        assert_eq!(map.forward("民宿"), "民宿");
        assert_eq!(map.get_forward("民宿"), None);
    }

    #[test]
    fn duplicate_values_break_construction() {
        let err =
            BijectiveMap::from_pairs("test", &[("酒店", "hotel"), ("旅馆", "hotel")])
                .unwrap_err();
        assert!(matches!(
            err,
            ConvertError::BrokenBijection { side: "value", .. }
        ));

        let err =
            BijectiveMap::from_pairs("test", &[("酒店", "hotel"), ("酒店", "inn")])
                .unwrap_err();
        assert!(matches!(
            err,
            ConvertError::BrokenBijection { side: "key", .. }
        ));
    }
}
