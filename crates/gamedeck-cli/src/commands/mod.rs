//! Command handlers grouped by concern.

pub(crate) mod favorites;
pub(crate) mod filters;
pub(crate) mod games;
pub(crate) mod shell;
pub(crate) mod show;

#[cfg(test)]
pub(crate) mod test_context {
    use std::sync::Arc;

    use gamedeck_catalog::PersistencePort;
    use gamedeck_engine::Collaborators;
    use gamedeck_test_support::{FakeCatalog, MemoryStore};

    use crate::cli::OutputFormat;
    use crate::client::AppContext;

    pub(crate) fn context(catalog: &Arc<FakeCatalog>, store: &Arc<MemoryStore>) -> AppContext {
        let collaborators =
            Collaborators::from_client(catalog, Arc::clone(store) as Arc<dyn PersistencePort>);
        AppContext::new(collaborators, OutputFormat::Json).expect("default config is valid")
    }
}
