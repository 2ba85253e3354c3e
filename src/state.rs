//! Shared application state: the database gateway injected into every repository.

use crate::config::EntityDef;
use crate::service::Repository;
use crate::store::Gateway;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn Gateway>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    pub fn repository(&self, entity: &'static EntityDef) -> Repository {
        Repository::new(self.gateway.clone(), entity)
    }
}
