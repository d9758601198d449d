//! Model and temperature choice shared by the parse and generate actions.

use tracing::debug;

use crate::api::ApiClient;
use crate::cache::{QueryCache, QueryKey};
use crate::errors::ApiError;
use crate::models::llm::{clamp_temperature, DEFAULT_TEMPERATURE};
use crate::models::{ModelName, ModelParameters};
use crate::notify::{Toaster, LONG_TOAST_MS};

#[derive(Debug, Clone)]
pub struct ModelSelector {
    options: Vec<ModelName>,
    selected: Option<String>,
    temperature: f32,
}

impl Default for ModelSelector {
    fn default() -> Self {
        Self {
            options: Vec::new(),
            selected: None,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl ModelSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a selector over a known catalog, selecting the first entry.
    pub fn with_options(options: Vec<ModelName>) -> Self {
        let mut selector = Self::default();
        selector.set_options(options);
        selector
    }

    /// Loads the catalog through the cache. On failure the option list stays
    /// empty and an error toast is raised.
    pub async fn load(&mut self, api: &ApiClient, cache: &QueryCache, toaster: &Toaster) {
        match cache.fetch(QueryKey::ModelNames, || api.get_model_names()).await {
            Ok(options) => self.set_options(options),
            Err(e) => {
                debug!("Model catalog unavailable: {e}");
                self.options.clear();
                self.selected = None;
                toaster.error("Error!", "Failed to fetch model names.", LONG_TOAST_MS);
            }
        }
    }

    fn set_options(&mut self, options: Vec<ModelName>) {
        let keep = self
            .selected
            .as_deref()
            .is_some_and(|s| options.iter().any(|o| o.llm_alias == s));
        if !keep {
            self.selected = options.first().map(|o| o.llm_alias.clone());
        }
        self.options = options;
    }

    pub fn options(&self) -> &[ModelName] {
        &self.options
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn select(&mut self, alias: &str) -> Result<(), ApiError> {
        if !self.options.iter().any(|o| o.llm_alias == alias) {
            return Err(ApiError::Invalid(format!("Unknown model: {alias}")));
        }
        self.selected = Some(alias.to_string());
        Ok(())
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn set_temperature(&mut self, temperature: f32) {
        self.temperature = clamp_temperature(temperature);
    }

    /// Parameters for the next request, if a model is selected.
    pub fn parameters(&self) -> Option<ModelParameters> {
        self.selected
            .as_ref()
            .map(|name| ModelParameters::new(name.clone(), self.temperature))
    }
}
