use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::config::{Config, StoreKind};
use crate::error::{DashError, DashResult};

pub type DocumentData = Map<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: DocumentData,
}

impl Document {
    pub fn decode<T: DeserializeOwned>(&self) -> DashResult<T> {
        Ok(serde_json::from_value(Value::Object(self.data.clone()))?)
    }
}

pub fn to_document_data<T: Serialize>(value: &T) -> DashResult<DocumentData> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(DashError::invalid(format!(
            "documents must be objects, got {}",
            json_type(&other)
        ))),
        Err(err) => Err(DashError::invalid(err.to_string())),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Gte,
    Lte,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Eq,
            value: value.into(),
        }
    }

    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Gte,
            value: value.into(),
        }
    }

    pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Lte,
            value: value.into(),
        }
    }

    pub fn matches(&self, data: &DocumentData) -> bool {
        let Some(actual) = data.get(&self.field) else {
            return false;
        };
        match self.op {
            FilterOp::Eq => values_equal(actual, &self.value),
            FilterOp::Gte => matches!(
                compare_values(actual, &self.value),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            FilterOp::Lte => matches!(
                compare_values(actual, &self.value),
                Some(Ordering::Less | Ordering::Equal)
            ),
        }
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Schema-less document persistence. Queries return documents in insertion order.
pub trait DocumentStore: Send {
    fn get_document(&self, collection: &str, id: &str) -> DashResult<Option<Document>>;
    fn add_document(&mut self, collection: &str, data: DocumentData) -> DashResult<String>;
    fn set_document(&mut self, collection: &str, id: &str, data: DocumentData) -> DashResult<()>;
    fn query_documents(&self, collection: &str, filters: &[Filter]) -> DashResult<Vec<Document>>;
    fn delete_document(&mut self, collection: &str, id: &str) -> DashResult<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: HashMap<String, Vec<Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    fn get_document(&self, collection: &str, id: &str) -> DashResult<Option<Document>> {
        Ok(self
            .collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }

    fn add_document(&mut self, collection: &str, data: DocumentData) -> DashResult<String> {
        let id = Uuid::new_v4().to_string();
        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(Document {
                id: id.clone(),
                data,
            });
        Ok(id)
    }

    fn set_document(&mut self, collection: &str, id: &str, data: DocumentData) -> DashResult<()> {
        let docs = self.collections.entry(collection.to_string()).or_default();
        match docs.iter_mut().find(|d| d.id == id) {
            Some(existing) => existing.data = data,
            None => docs.push(Document {
                id: id.to_string(),
                data,
            }),
        }
        Ok(())
    }

    fn query_documents(&self, collection: &str, filters: &[Filter]) -> DashResult<Vec<Document>> {
        Ok(self
            .collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| filters.iter().all(|f| f.matches(&d.data)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn delete_document(&mut self, collection: &str, id: &str) -> DashResult<()> {
        let docs = self
            .collections
            .get_mut(collection)
            .ok_or_else(|| DashError::not_found(format!("{collection}/{id}")))?;
        let before = docs.len();
        docs.retain(|d| d.id != id);
        if docs.len() == before {
            return Err(DashError::not_found(format!("{collection}/{id}")));
        }
        Ok(())
    }
}

/// Local sqlite file holding one JSON payload per (collection, id).
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create store dir {}", parent.display()))?;
        }
        let conn = Connection::open(path)
            .with_context(|| format!("open sqlite db {}", path.display()))?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory sqlite db")?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    fn decode_row(id: String, raw: String) -> DashResult<Document> {
        match serde_json::from_str::<Value>(&raw)? {
            Value::Object(data) => Ok(Document { id, data }),
            other => Err(DashError::StoreUnavailable(format!(
                "document {id} holds a {} payload",
                json_type(&other)
            ))),
        }
    }
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        PRAGMA journal_mode = WAL;
        CREATE TABLE IF NOT EXISTS documents (
            collection TEXT NOT NULL,
            id TEXT NOT NULL,
            data TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            PRIMARY KEY (collection, id)
        );
        CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(collection);
        "#,
    )
    .context("init documents schema")?;
    Ok(())
}

impl DocumentStore for SqliteStore {
    fn get_document(&self, collection: &str, id: &str) -> DashResult<Option<Document>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT data FROM documents WHERE collection = ?1 AND id = ?2",
                params![collection, id],
                |row| row.get(0),
            )
            .optional()?;
        raw.map(|raw| Self::decode_row(id.to_string(), raw))
            .transpose()
    }

    fn add_document(&mut self, collection: &str, data: DocumentData) -> DashResult<String> {
        let id = Uuid::new_v4().to_string();
        self.set_document(collection, &id, data)?;
        Ok(id)
    }

    fn set_document(&mut self, collection: &str, id: &str, data: DocumentData) -> DashResult<()> {
        let raw = serde_json::to_string(&Value::Object(data))?;
        self.conn.execute(
            r#"
            INSERT INTO documents (collection, id, data, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(collection, id) DO UPDATE SET
                data = excluded.data,
                updated_at = excluded.updated_at
            "#,
            params![collection, id, raw, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn query_documents(&self, collection: &str, filters: &[Filter]) -> DashResult<Vec<Document>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, data FROM documents WHERE collection = ?1 ORDER BY rowid")?;
        let rows = stmt.query_map(params![collection], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut out = Vec::new();
        for row in rows {
            let (id, raw) = row?;
            let doc = Self::decode_row(id, raw)?;
            if filters.iter().all(|f| f.matches(&doc.data)) {
                out.push(doc);
            }
        }
        Ok(out)
    }

    fn delete_document(&mut self, collection: &str, id: &str) -> DashResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
            params![collection, id],
        )?;
        if changed == 0 {
            return Err(DashError::not_found(format!("{collection}/{id}")));
        }
        Ok(())
    }
}

pub fn open_store(config: &Config) -> Result<Box<dyn DocumentStore>> {
    match config.store {
        StoreKind::Memory => Ok(Box::new(MemoryStore::new())),
        StoreKind::Sqlite => {
            let path = config
                .resolved_db_path()
                .context("unable to resolve sqlite path")?;
            tracing::info!(path = %path.display(), "opening sqlite document store");
            Ok(Box::new(SqliteStore::open(&path)?))
        }
    }
}
