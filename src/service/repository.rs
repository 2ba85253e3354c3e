//! Per-entity repository: validation, statement building, and result shaping over a Gateway.

use crate::config::EntityDef;
use crate::error::AppError;
use crate::service::RequestValidator;
use crate::sql;
use crate::store::Gateway;
use serde_json::{Map, Value};
use std::sync::Arc;

#[derive(Clone)]
pub struct Repository {
    gateway: Arc<dyn Gateway>,
    entity: &'static EntityDef,
}

impl Repository {
    pub fn new(gateway: Arc<dyn Gateway>, entity: &'static EntityDef) -> Self {
        Self { gateway, entity }
    }

    /// All rows in insertion order; empty when the table is empty.
    pub async fn list(&self) -> Result<Vec<Value>, AppError> {
        let rows = self.gateway.fetch(&sql::select_all(self.entity)).await?;
        Ok(rows)
    }

    /// The row with `id`, or None.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Value>, AppError> {
        let rows = self.gateway.fetch(&sql::select_by_id(self.entity, id)).await?;
        Ok(rows.into_iter().next())
    }

    /// Insert a new row and return the submitted fields with the generated id.
    pub async fn create(&self, body: &Map<String, Value>) -> Result<Value, AppError> {
        RequestValidator::validate(self.entity, body)?;
        let fields = self.entity.shape(body);
        let rows = self.gateway.fetch(&sql::insert(self.entity, &fields)).await?;
        let id = rows
            .into_iter()
            .next()
            .and_then(|mut r| r.get_mut(self.entity.pk_column).map(Value::take))
            .ok_or(AppError::Storage(sqlx::Error::RowNotFound))?;
        tracing::info!(entity = self.entity.name, id = %id, "created");
        Ok(self.entity.with_id(id, fields))
    }

    /// Overwrite the row with `id`. Returns what was submitted, not a re-read; a missing id
    /// is not an error.
    pub async fn update(&self, id: i64, body: &Map<String, Value>) -> Result<Value, AppError> {
        RequestValidator::validate(self.entity, body)?;
        let fields = self.entity.shape(body);
        match sql::update(self.entity, id, &fields) {
            Some(statement) => {
                let affected = self.gateway.execute(&statement).await?;
                tracing::info!(entity = self.entity.name, id, affected, "updated");
            }
            None => tracing::debug!(entity = self.entity.name, id, "update with no fields"),
        }
        Ok(self.entity.with_id(Value::from(id), fields))
    }

    /// Remove the row with `id`. Deleting a missing id succeeds.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let affected = self.gateway.execute(&sql::delete(self.entity, id)).await?;
        tracing::info!(entity = self.entity.name, id, affected, "deleted");
        Ok(())
    }
}
