//! In-memory gateway that interprets statements by kind, so repository and HTTP
//! behavior can be exercised without PostgreSQL.

#![allow(dead_code)]

use async_trait::async_trait;
use inventory_api::sql::{Statement, StatementKind};
use inventory_api::Gateway;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
struct Tables {
    rows: HashMap<&'static str, BTreeMap<i64, Map<String, Value>>>,
    next_id: HashMap<&'static str, i64>,
}

#[derive(Default)]
pub struct MemoryGateway {
    tables: Mutex<Tables>,
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statements received so far, including failed ones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make every subsequent statement fail as if the database were unreachable.
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    fn begin(&self) -> Result<(), sqlx::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }

    fn id_param(statement: &Statement) -> i64 {
        statement
            .params
            .iter()
            .find_map(|p| p.as_id())
            .expect("statement binds an id")
    }

    fn record_param(statement: &Statement) -> Map<String, Value> {
        statement
            .params
            .iter()
            .find_map(|p| p.as_record())
            .cloned()
            .unwrap_or_default()
    }
}

fn with_id(id: i64, fields: &Map<String, Value>) -> Value {
    let mut row = fields.clone();
    row.insert("id".into(), Value::from(id));
    Value::Object(row)
}

#[async_trait]
impl Gateway for MemoryGateway {
    async fn fetch(&self, statement: &Statement) -> Result<Vec<Value>, sqlx::Error> {
        self.begin()?;
        let mut tables = self.tables.lock().unwrap();
        match statement.kind {
            StatementKind::SelectAll => Ok(tables
                .rows
                .get(statement.table)
                .map(|t| t.iter().map(|(id, f)| with_id(*id, f)).collect())
                .unwrap_or_default()),
            StatementKind::SelectById => {
                let id = Self::id_param(statement);
                Ok(tables
                    .rows
                    .get(statement.table)
                    .and_then(|t| t.get(&id))
                    .map(|f| vec![with_id(id, f)])
                    .unwrap_or_default())
            }
            StatementKind::Insert => {
                let next = tables.next_id.entry(statement.table).or_insert(0);
                *next += 1;
                let id = *next;
                tables
                    .rows
                    .entry(statement.table)
                    .or_default()
                    .insert(id, Self::record_param(statement));
                Ok(vec![serde_json::json!({ "id": id })])
            }
            kind => panic!("fetch called with {:?}", kind),
        }
    }

    async fn execute(&self, statement: &Statement) -> Result<u64, sqlx::Error> {
        self.begin()?;
        let mut tables = self.tables.lock().unwrap();
        let id = Self::id_param(statement);
        let table = tables.rows.entry(statement.table).or_default();
        match statement.kind {
            StatementKind::Update => match table.get_mut(&id) {
                Some(row) => {
                    row.extend(Self::record_param(statement));
                    Ok(1)
                }
                None => Ok(0),
            },
            StatementKind::Delete => Ok(table.remove(&id).map_or(0, |_| 1)),
            kind => panic!("execute called with {:?}", kind),
        }
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        self.begin()
    }

    async fn close(&self) {}
}
