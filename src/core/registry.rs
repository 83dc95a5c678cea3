use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::core::fallback::{BijectiveMap, FallbackMap, StrictMap};
use crate::core::schema::DomainSchema;
use crate::core::tables;
use crate::core::types::Language;
use crate::error::ConvertError;

/// File holding the long-tail value translations, relative to the
/// mappings directory handed to [`MappingRegistry::load`].
pub const MISSING_VALUE_FILE: &str = "zh2en_missing.json";

/// The bilingual translation tables and everything derived from them.
///
/// Built once at startup and passed by reference to the converter and the
/// regression harness. Construction is the only fallible path; afterwards
/// every lookup is total, falling back to the key itself when no
/// translation is registered. The only post-construction mutation is the
/// documented miss-caching of the [`FallbackMap`] tables.
#[derive(Debug)]
pub struct MappingRegistry {
    domains: BijectiveMap,
    slots: BijectiveMap,
    acts: BijectiveMap,
    relations: BijectiveMap,
    specials: BijectiveMap,
    /// zh to en long-tail value translations from the side file. Strict:
    /// callers choose between surfacing the miss and identity fallback.
    missing_zh2en: StrictMap,
    /// The reverse direction starts empty and stays identity unless a
    /// reverse table is ever curated.
    missing_en2zh: StrictMap,
    api_map: FallbackMap,
    entity_map: FallbackMap,
    reverse_entity_map: FallbackMap,
    zh2en_values: FallbackMap,
    en2zh_values: FallbackMap,
    schema: DomainSchema,
    /// Merged domain+slot+act+relation+special pairs, longest key first,
    /// insertion order on ties.
    composite: Vec<(String, String)>,
}

impl MappingRegistry {
    /// Builds every table and loads the missing-value side file from
    /// `mappings_dir`. An absent or malformed file is fatal; so is a
    /// vocabulary table that turns out not to be a bijection.
    pub fn load(mappings_dir: &Path) -> Result<Self, ConvertError> {
        let domains = BijectiveMap::from_pairs("domain table", tables::DOMAIN_PAIRS)?;
        let slots = BijectiveMap::from_pairs("slot table", tables::SLOT_PAIRS)?;
        let acts = BijectiveMap::from_pairs("act table", tables::ACT_PAIRS)?;
        let relations =
            BijectiveMap::from_pairs("relation table", tables::RELATION_PAIRS)?;
        let specials =
            BijectiveMap::from_pairs("special value table", tables::SPECIAL_PAIRS)?;

        let missing_path = mappings_dir.join(MISSING_VALUE_FILE);
        let text = fs::read_to_string(&missing_path)
            .map_err(|e| ConvertError::io(&missing_path, e))?;
        let missing: HashMap<String, String> = serde_json::from_str(&text)
            .map_err(|e| ConvertError::json(&missing_path, e))?;
        tracing::debug!(
            entries = missing.len(),
            path = %missing_path.display(),
            "loaded missing-value table"
        );
        let missing_zh2en = StrictMap::from_pairs(missing);

        let schema = DomainSchema::build(&domains);
        let composite = build_composite();

        Ok(MappingRegistry {
            domains,
            slots,
            acts,
            relations,
            specials,
            missing_zh2en,
            missing_en2zh: StrictMap::default(),
            api_map: FallbackMap::new(),
            entity_map: FallbackMap::new(),
            reverse_entity_map: FallbackMap::new(),
            zh2en_values: FallbackMap::new(),
            en2zh_values: FallbackMap::new(),
            schema,
            composite,
        })
    }

    pub fn translate_domain(&self, name: &str, source: Language) -> String {
        match source {
            Language::Zh => self.domains.forward(name),
            Language::En => self.domains.reverse(name),
        }
    }

    pub fn translate_slot(&self, name: &str, source: Language) -> String {
        match source {
            Language::Zh => self.slots.forward(name),
            Language::En => self.slots.reverse(name),
        }
    }

    pub fn translate_act(&self, name: &str, source: Language) -> String {
        match source {
            Language::Zh => self.acts.forward(name),
            Language::En => self.acts.reverse(name),
        }
    }

    pub fn translate_relation(&self, name: &str, source: Language) -> String {
        match source {
            Language::Zh => self.relations.forward(name),
            Language::En => self.relations.reverse(name),
        }
    }

    /// Translates a slot value: the special-value table first, then the
    /// missing-value side table, else identity through the per-direction
    /// value map (which caches the miss).
    pub fn translate_value(&self, value: &str, source: Language) -> String {
        match source {
            Language::Zh => {
                if let Some(v) = self.specials.get_forward(value) {
                    return v.to_string();
                }
                if let Ok(v) = self.missing_zh2en.lookup_strict(value) {
                    return v.to_string();
                }
                self.zh2en_values.lookup_or_default(value)
            }
            Language::En => {
                if let Some(v) = self.specials.get_reverse(value) {
                    return v.to_string();
                }
                if let Ok(v) = self.missing_en2zh.lookup_strict(value) {
                    return v.to_string();
                }
                self.en2zh_values.lookup_or_default(value)
            }
        }
    }

    /// Translates an API name. Currently an identity table.
    pub fn translate_api(&self, name: &str) -> String {
        self.api_map.lookup_or_default(name)
    }

    /// Translates an entity reference. Currently an identity table.
    pub fn translate_entity(&self, name: &str) -> String {
        self.entity_map.lookup_or_default(name)
    }

    /// Reverse direction of [`translate_entity`](Self::translate_entity).
    pub fn reverse_entity(&self, name: &str) -> String {
        self.reverse_entity_map.lookup_or_default(name)
    }

    /// Strict accessor for the missing-value table.
    pub fn missing_value(&self, value: &str) -> Result<&str, ConvertError> {
        self.missing_zh2en.lookup_strict(value)
    }

    pub fn required_slots_for(&self, domain: &str) -> &[String] {
        self.schema.required_slots_for(domain)
    }

    pub fn schema(&self) -> &DomainSchema {
        &self.schema
    }

    /// Rewrites every vocabulary token embedded in `text` into the
    /// canonical spelling. Keys are applied longest first so a token is
    /// never clipped by a shorter token that is a substring of it;
    /// within one key, replacement is leftmost first.
    pub fn substitute_text(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (zh, en) in &self.composite {
            if out.contains(zh.as_str()) {
                out = out.replace(zh.as_str(), en);
            }
        }
        out
    }

    /// The composite substitution pairs in application order.
    pub fn composite_pairs(&self) -> &[(String, String)] {
        &self.composite
    }
}

/// Merges the vocabulary pair tables into one substitution table. Later
/// tables win on a repeated key but keep its original position, then the
/// whole table is ordered by descending key length (in characters), ties
/// staying in insertion order.
fn build_composite() -> Vec<(String, String)> {
    let mut order: Vec<String> = Vec::new();
    let mut values: HashMap<String, String> = HashMap::new();
    let pairs = tables::DOMAIN_PAIRS
        .iter()
        .chain(tables::SLOT_PAIRS)
        .chain(tables::ACT_PAIRS)
        .chain(tables::RELATION_PAIRS)
        .chain(tables::SPECIAL_PAIRS);
    for &(k, v) in pairs {
        if values.insert(k.to_string(), v.to_string()).is_none() {
            order.push(k.to_string());
        }
    }
    let mut composite: Vec<(String, String)> = order
        .into_iter()
        .map(|k| {
            let v = values.remove(&k).unwrap_or_default();
            (k, v)
        })
        .collect();
    composite.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));
    composite
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn mappings_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/mappings")
    }

    fn registry() -> MappingRegistry {
        MappingRegistry::load(&mappings_dir()).unwrap()
    }

    #[test]
    fn every_domain_round_trips() {
        let reg = registry();
        for &(zh, en) in tables::DOMAIN_PAIRS {
            let there = reg.translate_domain(zh, Language::Zh);
            assert_eq!(there, en);
            assert_eq!(reg.translate_domain(&there, Language::En), zh);
        }
    }

    #[test]
    fn every_slot_round_trips() {
        let reg = registry();
        for &(zh, en) in tables::SLOT_PAIRS {
            let there = reg.translate_slot(zh, Language::Zh);
            assert_eq!(there, en);
            assert_eq!(reg.translate_slot(&there, Language::En), zh);
        }
    }

    #[test]
    fn substitution_prefers_the_longest_token() {
        let reg = registry();
        // 价格 is a substring of 价格区间, which is a substring of
        // 所属价格区间. Each must be matched whole.
        assert_eq!(reg.substitute_text("价格"), "price");
        assert_eq!(reg.substitute_text("价格区间"), "price_range");
        assert_eq!(
            reg.substitute_text("所属价格区间"),
            "the_price_range_it_belongs_to"
        );
        assert_eq!(
            reg.substitute_text("这家酒店的价格区间如何"),
            "这家hotel的price_range如何"
        );
    }

    #[test]
    fn composite_order_is_longest_first() {
        let reg = registry();
        let lengths: Vec<usize> = reg
            .composite_pairs()
            .iter()
            .map(|(k, _)| k.chars().count())
            .collect();
        assert!(lengths.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn value_translation_checks_special_then_missing_then_identity() {
        let reg = registry();
        assert_eq!(reg.translate_value("不在乎", Language::Zh), "don't care");
        assert_eq!(reg.translate_value("don't care", Language::En), "不在乎");
        // From the side file.
        assert_eq!(reg.translate_value("免费", Language::Zh), "free");
        // Unregistered values fall back to identity and are cached.
        assert_eq!(reg.translate_value("拙政园", Language::Zh), "拙政园");
        assert_eq!(reg.translate_value("拙政园", Language::Zh), "拙政园");
    }

    #[test]
    fn strict_missing_value_lookup_reports_the_key() {
        let reg = registry();
        let err = reg.missing_value("不存在的值").unwrap_err();
        assert!(
            matches!(err, ConvertError::KeyNotFound { key } if key == "不存在的值")
        );
    }

    #[test]
    fn required_slots_match_under_both_names() {
        let reg = registry();
        for &(zh, en) in tables::DOMAIN_PAIRS {
            assert_eq!(reg.required_slots_for(zh), reg.required_slots_for(en));
        }
    }

    #[test]
    fn api_and_entity_tables_are_identity() {
        let reg = registry();
        assert_eq!(reg.translate_api("酒店"), "酒店");
        assert_eq!(reg.translate_entity("维也纳国际酒店"), "维也纳国际酒店");
        assert_eq!(reg.reverse_entity("Vienna International Hotel"), "Vienna International Hotel");
    }

    #[test]
    fn registry_load_fails_without_the_side_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = MappingRegistry::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConvertError::Io { .. }));
    }
}
