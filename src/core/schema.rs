use std::collections::HashMap;

use crate::core::fallback::BijectiveMap;
use crate::core::tables;

static NO_SLOTS: &[String] = &[];

/// Per-domain slot vocabulary, reachable under either language's domain
/// name, plus the required-slot table for API calls.
///
/// The required-slot lists are populated empty for every domain. That is a
/// deliberate placeholder carried over from the source annotation scheme:
/// the slots needed to issue a lookup for a domain have not been curated
/// yet, and this table is where such a policy would live.
#[derive(Debug)]
pub struct DomainSchema {
    slots: HashMap<String, Vec<String>>,
    required: HashMap<String, Vec<String>>,
    /// Chinese names first, then English, in table order.
    names: Vec<String>,
}

impl DomainSchema {
    /// Builds the schema from the static domain-slot table, registering
    /// every slot list under both spellings of its domain.
    pub fn build(domains: &BijectiveMap) -> Self {
        let mut slots = HashMap::new();
        let mut required = HashMap::new();
        let mut names = Vec::with_capacity(tables::DOMAIN_SLOTS.len() * 2);

        for &(zh, slot_list) in tables::DOMAIN_SLOTS {
            let list: Vec<String> = slot_list.iter().map(|s| s.to_string()).collect();
            let en = domains.forward(zh);
            slots.insert(zh.to_string(), list.clone());
            slots.insert(en.clone(), list);
            required.insert(zh.to_string(), Vec::new());
            required.insert(en, Vec::new());
            names.push(zh.to_string());
        }
        for &(zh, _) in tables::DOMAIN_SLOTS {
            names.push(domains.forward(zh));
        }

        DomainSchema { slots, required, names }
    }

    /// The slots known for `domain`, under either language's name.
    pub fn slots_for(&self, domain: &str) -> Option<&[String]> {
        self.slots.get(domain).map(Vec::as_slice)
    }

    /// The slots mandatory for an API call against `domain`. Empty for
    /// every domain until a call policy is curated; unknown domains also
    /// resolve to the empty list so the pipeline stays total.
    pub fn required_slots_for(&self, domain: &str) -> &[String] {
        self.required.get(domain).map(Vec::as_slice).unwrap_or(NO_SLOTS)
    }

    /// The closed set of domain names in both languages combined.
    pub fn domain_names(&self) -> &[String] {
        &self.names
    }

    /// The names an API call may be issued under. Same set as
    /// [`domain_names`](Self::domain_names).
    pub fn api_names(&self) -> &[String] {
        &self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> DomainSchema {
        let domains = BijectiveMap::from_pairs("domain", tables::DOMAIN_PAIRS).unwrap();
        DomainSchema::build(&domains)
    }

    #[test]
    fn both_spellings_reach_the_same_slot_list() {
        let schema = schema();
        for &(zh, en) in tables::DOMAIN_PAIRS {
            assert_eq!(schema.slots_for(zh), schema.slots_for(en));
            assert_eq!(schema.required_slots_for(zh), schema.required_slots_for(en));
        }
        assert_eq!(schema.slots_for("酒店").unwrap()[0], "电话号码");
        assert_eq!(schema.slots_for("general"), Some(&[][..]));
    }

    #[test]
    fn required_slots_are_empty_placeholders() {
        let schema = schema();
        for name in schema.domain_names() {
            assert!(schema.required_slots_for(name).is_empty());
        }
        // Unknown domains resolve to the same empty list.
        assert!(schema.required_slots_for("银行").is_empty());
    }

    #[test]
    fn domain_names_cover_both_languages() {
        let schema = schema();
        assert_eq!(schema.domain_names().len(), tables::DOMAIN_PAIRS.len() * 2);
        assert!(schema.domain_names().contains(&"酒店".to_string()));
        assert!(schema.domain_names().contains(&"hotel".to_string()));
        assert_eq!(schema.api_names(), schema.domain_names());
    }
}
