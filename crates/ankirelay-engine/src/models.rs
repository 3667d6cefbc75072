//! Model (note type) lookups.

use ankirelay::AnkiClient;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ClientContext, Result};
use crate::response;

/// Model workflow engine.
#[derive(Debug)]
pub struct ModelEngine<'a> {
    client: &'a AnkiClient,
}

impl<'a> ModelEngine<'a> {
    pub(crate) fn new(client: &'a AnkiClient) -> Self {
        Self { client }
    }

    /// Get the full definition of every model.
    ///
    /// Collects IDs from `modelNamesAndIds` (in name order) and resolves them
    /// with `findModelsById`.
    pub async fn list(&self) -> Result<Value> {
        let names = self
            .client
            .models()
            .names_and_ids()
            .await
            .context("Error listing models")?;
        let ids: Vec<Value> = response::object(names, "modelNamesAndIds")?
            .into_iter()
            .map(|(_, id)| id)
            .collect();
        debug!(count = ids.len(), "Resolving models");

        let models = self
            .client
            .models()
            .find_by_id(&ids)
            .await
            .context("Error getting models")?;
        Ok(response::or_empty(models, Value::Array(Vec::new())))
    }

    /// Get the fields used on each card template of a model.
    pub async fn fields_on_templates(&self, model_name: &str) -> Result<Value> {
        let result = self
            .client
            .models()
            .fields_on_templates(model_name)
            .await
            .context("Error getting model fields")?;
        Ok(response::or_empty(result, Value::Object(Map::new())))
    }
}
