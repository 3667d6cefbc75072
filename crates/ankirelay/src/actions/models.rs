//! Model (note type) AnkiConnect actions.

use serde::Serialize;
use serde_json::Value;

use crate::client::AnkiClient;
use crate::error::Result;

/// Provides access to model-related AnkiConnect operations.
///
/// Obtained via [`AnkiClient::models()`].
#[derive(Debug)]
pub struct ModelActions<'a> {
    pub(crate) client: &'a AnkiClient,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ModelNameParams<'a> {
    model_name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FindModelsByIdParams<'a> {
    model_ids: &'a [Value],
}

impl<'a> ModelActions<'a> {
    /// Get a `{name: id}` map of every model.
    pub async fn names_and_ids(&self) -> Result<Value> {
        self.client.call_without_params("modelNamesAndIds").await
    }

    /// Get full model definitions (fields, templates, css) by ID.
    ///
    /// IDs are forwarded exactly as AnkiConnect reported them.
    pub async fn find_by_id(&self, model_ids: &[Value]) -> Result<Value> {
        self.client
            .call("findModelsById", FindModelsByIdParams { model_ids })
            .await
    }

    /// Get, per card template, the fields used on its front and back.
    pub async fn fields_on_templates(&self, model_name: &str) -> Result<Value> {
        self.client
            .call("modelFieldsOnTemplates", ModelNameParams { model_name })
            .await
    }
}
