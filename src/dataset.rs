use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::registry::MappingRegistry;
use crate::core::types::{Language, Relation, Setting};
use crate::db::{Constraint, Document, EntityDb};
use crate::error::ConvertError;

/// Annotated action quadruple as it appears in the raw files:
/// `[act, domain, slot, value]`.
pub type RawAction = (String, String, String, String);

/// Belief-state constraint quadruple: `[domain, slot, relation, value]`.
/// The value may be a string or, for `one_of`, a list of alternatives.
pub type RawConstraint = (String, String, String, Value);

#[derive(Debug, Clone, Deserialize)]
pub struct RawDialogue {
    pub dialogue_id: String,
    pub domains: Vec<String>,
    pub dialogue: Vec<RawTurn>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTurn {
    pub turn_id: u32,
    pub turn_domain: Vec<String>,
    pub user_utterance: String,
    pub system_utterance: String,
    #[serde(default)]
    pub user_actions: Vec<RawAction>,
    #[serde(default)]
    pub system_actions: Vec<RawAction>,
    /// Constraints introduced by this turn; the converter accumulates them
    /// into the dialogue-level state.
    #[serde(default)]
    pub belief_state: Vec<RawConstraint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedDialogue {
    pub dialogue_id: String,
    pub domains: Vec<String>,
    pub turns: Vec<NormalizedTurn>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTurn {
    pub turn_id: u32,
    pub domains: Vec<String>,
    pub user_utterance: String,
    pub system_utterance: String,
    pub user_actions: Vec<NormalizedAction>,
    pub system_actions: Vec<NormalizedAction>,
    /// Cumulative belief state after this turn, in first-seen order.
    pub belief_state: Vec<NormalizedConstraint>,
    /// The domain the entity lookup was issued under, when one was.
    pub api_name: Option<String>,
    pub db_results: Vec<Document>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedAction {
    pub act: String,
    pub domain: String,
    pub slot: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedConstraint {
    pub domain: String,
    pub slot: String,
    pub relation: String,
    pub value: Value,
}

/// Converts one raw split file into the canonical schema.
///
/// Every domain label, slot key, act label, relation operator and
/// qualifying value is rewritten through the registry; the cumulative
/// belief state drives an entity lookup per turn; utterances pass through
/// unchanged except under the `en_zh` setting, where embedded vocabulary
/// tokens are rewritten by `substitute_text`. A pure function of the raw
/// file, the registry tables and the database content.
pub fn build_dataset(
    raw_path: &Path,
    db: &EntityDb,
    setting: Setting,
    registry: &MappingRegistry,
) -> Result<Vec<NormalizedDialogue>, ConvertError> {
    let text = fs::read_to_string(raw_path).map_err(|e| ConvertError::io(raw_path, e))?;
    let raw: Vec<RawDialogue> =
        serde_json::from_str(&text).map_err(|e| ConvertError::json(raw_path, e))?;
    tracing::info!(
        dialogues = raw.len(),
        path = %raw_path.display(),
        "converting split"
    );
    Ok(raw
        .into_iter()
        .map(|dialogue| convert_dialogue(registry, db, setting, dialogue))
        .collect())
}

// The canonical vocabulary is the English side of every table, so raw
// English annotations pass through unchanged and only Chinese sources are
// routed through the registry.

fn canonical_domain(registry: &MappingRegistry, name: &str, source: Language) -> String {
    match source {
        Language::Zh => registry.translate_domain(name, source),
        Language::En => name.to_string(),
    }
}

fn canonical_slot(registry: &MappingRegistry, name: &str, source: Language) -> String {
    match source {
        Language::Zh => registry.translate_slot(name, source),
        Language::En => name.to_string(),
    }
}

fn canonical_act(registry: &MappingRegistry, name: &str, source: Language) -> String {
    match source {
        Language::Zh => registry.translate_act(name, source),
        Language::En => name.to_string(),
    }
}

fn canonical_relation(registry: &MappingRegistry, name: &str, source: Language) -> String {
    match source {
        Language::Zh => registry.translate_relation(name, source),
        Language::En => name.to_string(),
    }
}

fn canonical_value(registry: &MappingRegistry, value: &str, source: Language) -> String {
    match source {
        Language::Zh => registry.translate_value(value, source),
        Language::En => value.to_string(),
    }
}

fn convert_dialogue(
    registry: &MappingRegistry,
    db: &EntityDb,
    setting: Setting,
    dialogue: RawDialogue,
) -> NormalizedDialogue {
    let source = setting.source_language();
    let domains = dialogue
        .domains
        .iter()
        .map(|d| canonical_domain(registry, d, source))
        .collect();
    let mut state: Vec<NormalizedConstraint> = Vec::new();
    let turns = dialogue
        .dialogue
        .into_iter()
        .map(|turn| convert_turn(registry, db, setting, &mut state, turn))
        .collect();
    NormalizedDialogue { dialogue_id: dialogue.dialogue_id, domains, turns }
}

fn convert_turn(
    registry: &MappingRegistry,
    db: &EntityDb,
    setting: Setting,
    state: &mut Vec<NormalizedConstraint>,
    turn: RawTurn,
) -> NormalizedTurn {
    let source = setting.source_language();
    let domains: Vec<String> = turn
        .turn_domain
        .iter()
        .map(|d| canonical_domain(registry, d, source))
        .collect();

    let user_actions = turn
        .user_actions
        .iter()
        .map(|a| convert_action(registry, a, source))
        .collect();
    let system_actions = turn
        .system_actions
        .iter()
        .map(|a| convert_action(registry, a, source))
        .collect();

    for raw in &turn.belief_state {
        let constraint = convert_constraint(registry, raw, source);
        match state
            .iter_mut()
            .find(|c| c.domain == constraint.domain && c.slot == constraint.slot)
        {
            Some(existing) => *existing = constraint,
            None => state.push(constraint),
        }
    }

    // One lookup per turn against the first non-general active domain,
    // once the state holds at least one constraint for it.
    let active = domains.iter().find(|d| d.as_str() != "general").cloned();
    let (api_name, db_results) = match active {
        Some(domain) => {
            let constraints: Vec<Constraint> = state
                .iter()
                .filter(|c| c.domain == domain)
                .filter_map(to_db_constraint)
                .collect();
            if constraints.is_empty() {
                (None, Vec::new())
            } else {
                let results =
                    db.find(&domain, &constraints).into_iter().cloned().collect();
                (Some(domain), results)
            }
        }
        None => (None, Vec::new()),
    };

    let (user_utterance, system_utterance) = match setting {
        Setting::EnZh => (
            registry.substitute_text(&turn.user_utterance),
            registry.substitute_text(&turn.system_utterance),
        ),
        Setting::Zh | Setting::En => (turn.user_utterance, turn.system_utterance),
    };

    NormalizedTurn {
        turn_id: turn.turn_id,
        domains,
        user_utterance,
        system_utterance,
        user_actions,
        system_actions,
        belief_state: state.clone(),
        api_name,
        db_results,
    }
}

fn convert_action(
    registry: &MappingRegistry,
    (act, domain, slot, value): &RawAction,
    source: Language,
) -> NormalizedAction {
    NormalizedAction {
        act: canonical_act(registry, act, source),
        domain: canonical_domain(registry, domain, source),
        slot: canonical_slot(registry, slot, source),
        value: canonical_value(registry, value, source),
    }
}

fn convert_constraint(
    registry: &MappingRegistry,
    (domain, slot, relation, value): &RawConstraint,
    source: Language,
) -> NormalizedConstraint {
    NormalizedConstraint {
        domain: canonical_domain(registry, domain, source),
        slot: canonical_slot(registry, slot, source),
        relation: canonical_relation(registry, relation, source),
        value: translate_constraint_value(registry, value, source),
    }
}

fn translate_constraint_value(
    registry: &MappingRegistry,
    value: &Value,
    source: Language,
) -> Value {
    match value {
        Value::String(s) => Value::String(canonical_value(registry, s, source)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| translate_constraint_value(registry, item, source))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn to_db_constraint(constraint: &NormalizedConstraint) -> Option<Constraint> {
    Relation::from_canonical(&constraint.relation).map(|relation| Constraint {
        slot: constraint.slot.clone(),
        relation,
        value: constraint.value.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::build_db;
    use std::path::PathBuf;

    fn root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    }

    fn fixture(setting: Setting) -> (MappingRegistry, EntityDb, tempfile::TempDir) {
        let registry = MappingRegistry::load(&root().join("data/mappings")).unwrap();
        let store = tempfile::tempdir().unwrap();
        let db = build_db(
            &registry,
            &root().join("database/db_zh"),
            None,
            setting,
            store.path(),
        )
        .unwrap();
        (registry, db, store)
    }

    #[test]
    fn converts_the_committed_split() {
        let (registry, db, _store) = fixture(Setting::Zh);
        let dialogues = build_dataset(
            &root().join("data/original/zh_valid.json"),
            &db,
            Setting::Zh,
            &registry,
        )
        .unwrap();

        assert_eq!(dialogues.len(), 2);
        let first = &dialogues[0];
        assert_eq!(first.domains, vec!["hotel"]);

        let turn = &first.turns[0];
        assert_eq!(
            turn.user_actions[0],
            NormalizedAction {
                act: "inform".to_string(),
                domain: "hotel".to_string(),
                slot: "cost".to_string(),
                value: "expensive".to_string(),
            }
        );
        assert_eq!(turn.api_name.as_deref(), Some("hotel"));
        assert_eq!(turn.db_results.len(), 1);
        assert_eq!(turn.db_results[0]["cost"], "expensive");

        // Belief state accumulates across turns.
        let last = &first.turns[1];
        assert_eq!(last.belief_state.len(), 3);
        assert_eq!(last.belief_state[2].relation, "at_least");

        // The closing dialogue never issues a lookup.
        let general = &dialogues[1];
        assert_eq!(general.turns[0].api_name, None);
        assert!(general.turns[0].db_results.is_empty());
    }

    #[test]
    fn en_zh_setting_rewrites_utterance_tokens() {
        let (registry, db, _store) = fixture(Setting::EnZh);
        let dialogues = build_dataset(
            &root().join("data/original/zh_valid.json"),
            &db,
            Setting::EnZh,
            &registry,
        )
        .unwrap();
        let utterance = &dialogues[0].turns[0].user_utterance;
        assert!(utterance.contains("hotel"));
        assert!(utterance.contains("cost"));
        assert!(!utterance.contains("酒店"));
    }
}
