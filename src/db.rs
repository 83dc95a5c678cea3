use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tempfile::NamedTempFile;

use crate::core::fallback::FallbackMap;
use crate::core::registry::MappingRegistry;
use crate::core::types::{Language, Relation, Setting};
use crate::error::ConvertError;

/// One entity record: an ordered slot-to-value object.
pub type Document = Map<String, Value>;

/// A slot-value condition evaluated against entity documents.
#[derive(Debug, Clone)]
pub struct Constraint {
    pub slot: String,
    pub relation: Relation,
    pub value: Value,
}

/// The materialized knowledge base: one collection of entity documents per
/// canonical domain, in load order.
#[derive(Debug)]
pub struct EntityDb {
    setting: Setting,
    collections: Vec<(String, Vec<Document>)>,
    index: HashMap<String, usize>,
}

impl EntityDb {
    pub fn from_collections(
        setting: Setting,
        collections: Vec<(String, Vec<Document>)>,
    ) -> Self {
        let index = collections
            .iter()
            .enumerate()
            .map(|(i, (name, _))| (name.clone(), i))
            .collect();
        EntityDb { setting, collections, index }
    }

    pub fn setting(&self) -> Setting {
        self.setting
    }

    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.collections.iter().map(|(name, _)| name.as_str())
    }

    pub fn collection(&self, domain: &str) -> Option<&[Document]> {
        self.index
            .get(domain)
            .map(|&i| self.collections[i].1.as_slice())
    }

    /// All documents of `domain` satisfying every constraint, in file
    /// order. A constraint on a field the document does not carry never
    /// matches, whatever the relation.
    pub fn find(&self, domain: &str, constraints: &[Constraint]) -> Vec<&Document> {
        let docs = match self.collection(domain) {
            Some(docs) => docs,
            None => return Vec::new(),
        };
        docs.iter()
            .filter(|doc| constraints.iter().all(|c| constraint_matches(doc, c)))
            .collect()
    }

    /// Writes the snapshot `db_<setting>.json` under `store_dir`,
    /// atomically. Rebuilding and re-persisting is deterministic, so a
    /// repeated run replaces the snapshot with identical bytes.
    pub fn persist(&self, store_dir: &Path) -> Result<PathBuf, ConvertError> {
        fs::create_dir_all(store_dir)
            .map_err(|e| ConvertError::io(store_dir, e))?;
        let path = store_dir.join(format!("db_{}.json", self.setting));

        let mut root = Map::new();
        for (name, docs) in &self.collections {
            let docs: Vec<Value> =
                docs.iter().map(|d| Value::Object(d.clone())).collect();
            root.insert(name.clone(), Value::Array(docs));
        }

        let mut tmp = NamedTempFile::new_in(store_dir)
            .map_err(|e| ConvertError::Persist { path: path.clone(), source: e })?;
        serde_json::to_writer(&mut tmp, &Value::Object(root))
            .map_err(ConvertError::Render)?;
        tmp.write_all(b"\n")
            .map_err(|e| ConvertError::Persist { path: path.clone(), source: e })?;
        tmp.persist(&path)
            .map_err(|e| ConvertError::Persist { path: path.clone(), source: e.error })?;
        Ok(path)
    }
}

/// Loads every `<domain>_db.json` under `db_json_path` into an [`EntityDb`]
/// keyed by canonical domain, translating slot keys and qualifying values
/// when the setting's source language is Chinese, and persists a snapshot
/// under `store_dir`. When `api_map` is given, collections are registered
/// under the mapped API name instead of the plain domain name.
pub fn build_db(
    registry: &MappingRegistry,
    db_json_path: &Path,
    api_map: Option<&FallbackMap>,
    setting: Setting,
    store_dir: &Path,
) -> Result<EntityDb, ConvertError> {
    let entries = fs::read_dir(db_json_path)
        .map_err(|e| ConvertError::io(db_json_path, e))?;
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.ends_with("_db.json"))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    if files.is_empty() {
        return Err(ConvertError::MissingDatabase { path: db_json_path.to_path_buf() });
    }

    let source = setting.source_language();
    let mut collections = Vec::with_capacity(files.len());
    for path in files {
        let stem = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_suffix("_db.json"))
            .unwrap_or_default()
            .to_string();
        let text = fs::read_to_string(&path).map_err(|e| ConvertError::io(&path, e))?;
        let docs: Vec<Document> =
            serde_json::from_str(&text).map_err(|e| ConvertError::json(&path, e))?;

        let domain = match source {
            Language::Zh => registry.translate_domain(&stem, Language::Zh),
            Language::En => stem,
        };
        let name = match api_map {
            Some(map) => map.lookup_or_default(&domain),
            None => domain,
        };
        let docs: Vec<Document> = docs
            .into_iter()
            .map(|doc| translate_document(registry, doc, source))
            .collect();
        tracing::info!(domain = %name, entities = docs.len(), "loaded entity collection");
        collections.push((name, docs));
    }

    let db = EntityDb::from_collections(setting, collections);
    let snapshot = db.persist(store_dir)?;
    tracing::info!(path = %snapshot.display(), "materialized entity store");
    Ok(db)
}

/// Rewrites one entity document into the canonical vocabulary. English
/// sources are already canonical and pass through untouched.
fn translate_document(
    registry: &MappingRegistry,
    doc: Document,
    source: Language,
) -> Document {
    if source == Language::En {
        return doc;
    }
    doc.into_iter()
        .map(|(key, value)| {
            let key = registry.translate_slot(&key, source);
            let value = translate_field(registry, value, source);
            (key, value)
        })
        .collect()
}

fn translate_field(registry: &MappingRegistry, value: Value, source: Language) -> Value {
    match value {
        Value::String(s) => Value::String(registry.translate_value(&s, source)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| translate_field(registry, item, source))
                .collect(),
        ),
        other => other,
    }
}

fn constraint_matches(doc: &Document, constraint: &Constraint) -> bool {
    let field = match doc.get(&constraint.slot) {
        Some(v) => v,
        None => return false,
    };
    match constraint.relation {
        Relation::EqualTo => eq_any(field, &constraint.value),
        Relation::Not => !eq_any(field, &constraint.value),
        Relation::LessThan => cmp_numeric(field, &constraint.value, |a, b| a < b),
        Relation::AtLeast => cmp_numeric(field, &constraint.value, |a, b| a >= b),
        Relation::OneOf => one_of(field, &constraint.value),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn eq_scalar(field: &Value, want: &Value) -> bool {
    match (scalar_text(field), scalar_text(want)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Multi-valued fields match if any element does.
fn eq_any(field: &Value, want: &Value) -> bool {
    match field {
        Value::Array(items) => items.iter().any(|item| eq_scalar(item, want)),
        _ => eq_scalar(field, want),
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn cmp_numeric(field: &Value, want: &Value, op: fn(f64, f64) -> bool) -> bool {
    match (as_number(field), as_number(want)) {
        (Some(a), Some(b)) => op(a, b),
        _ => false,
    }
}

fn one_of(field: &Value, want: &Value) -> bool {
    match want {
        Value::Array(options) => options.iter().any(|option| eq_any(field, option)),
        _ => eq_any(field, want),
    }
}
