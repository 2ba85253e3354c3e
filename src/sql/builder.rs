//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for an entity.
//!
//! Every statement that yields rows returns a single JSON column named `record`,
//! rendered by PostgreSQL so numeric, date and text columns need no client-side decoding.

use crate::config::EntityDef;
use crate::sql::BindValue;
use serde_json::{Map, Value};

/// Name of the JSON column every row-returning statement produces.
pub const RECORD_COLUMN: &str = "record";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatementKind {
    SelectAll,
    SelectById,
    Insert,
    Update,
    Delete,
}

#[derive(Clone, Debug)]
pub struct Statement {
    pub kind: StatementKind,
    pub table: &'static str,
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl Statement {
    fn new(kind: StatementKind, entity: &EntityDef) -> Self {
        Statement {
            kind,
            table: entity.table_name,
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: BindValue) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// Quote identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// `SELECT row_to_json(t) AS record FROM table AS t ORDER BY t.id`
pub fn select_all(entity: &EntityDef) -> Statement {
    let mut q = Statement::new(StatementKind::SelectAll, entity);
    q.sql = format!(
        "SELECT row_to_json(t) AS {} FROM {} AS t ORDER BY t.{}",
        RECORD_COLUMN,
        quoted(entity.table_name),
        quoted(entity.pk_column)
    );
    q
}

pub fn select_by_id(entity: &EntityDef, id: i64) -> Statement {
    let mut q = Statement::new(StatementKind::SelectById, entity);
    let n = q.push_param(BindValue::Id(id));
    q.sql = format!(
        "SELECT row_to_json(t) AS {} FROM {} AS t WHERE t.{} = ${}",
        RECORD_COLUMN,
        quoted(entity.table_name),
        quoted(entity.pk_column),
        n
    );
    q
}

/// INSERT the given fields and return the generated key as `{"<pk>": id}`.
/// Field values are bound as one JSONB parameter; column names must already be validated.
pub fn insert(entity: &EntityDef, fields: &Map<String, Value>) -> Statement {
    let mut q = Statement::new(StatementKind::Insert, entity);
    let table = quoted(entity.table_name);
    let pk = quoted(entity.pk_column);
    let returning = format!("RETURNING json_build_object('{}', {}) AS {}", entity.pk_column, pk, RECORD_COLUMN);
    if fields.is_empty() {
        q.sql = format!("INSERT INTO {} DEFAULT VALUES {}", table, returning);
        return q;
    }
    let n = q.push_param(BindValue::Record(fields.clone()));
    let columns: Vec<String> = fields.keys().map(|c| quoted(c)).collect();
    let source: Vec<String> = fields.keys().map(|c| format!("r.{}", quoted(c))).collect();
    q.sql = format!(
        "INSERT INTO {} ({}) SELECT {} FROM jsonb_populate_record(NULL::{}, ${}) AS r {}",
        table,
        columns.join(", "),
        source.join(", "),
        table,
        n,
        returning
    );
    q
}

/// UPDATE every given field of the row with `id`. Full replacement of the listed
/// fields; no row-count check. Returns None when there is nothing to set.
pub fn update(entity: &EntityDef, id: i64, fields: &Map<String, Value>) -> Option<Statement> {
    if fields.is_empty() {
        return None;
    }
    let mut q = Statement::new(StatementKind::Update, entity);
    let table = quoted(entity.table_name);
    let record = q.push_param(BindValue::Record(fields.clone()));
    let key = q.push_param(BindValue::Id(id));
    let assignments: Vec<String> = fields
        .keys()
        .map(|c| format!("{} = r.{}", quoted(c), quoted(c)))
        .collect();
    q.sql = format!(
        "UPDATE {} SET {} FROM jsonb_populate_record(NULL::{}, ${}) AS r WHERE {}.{} = ${}",
        table,
        assignments.join(", "),
        table,
        record,
        table,
        quoted(entity.pk_column),
        key
    );
    Some(q)
}

pub fn delete(entity: &EntityDef, id: i64) -> Statement {
    let mut q = Statement::new(StatementKind::Delete, entity);
    let n = q.push_param(BindValue::Id(id));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ${}",
        quoted(entity.table_name),
        quoted(entity.pk_column),
        n
    );
    q
}
