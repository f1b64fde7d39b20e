//! Engine construction shared by every command.

use anyhow::{Context, Result};
use tracing::info;

use support_bot_core::engine::RetrievalEngine;

use crate::catalog;
use crate::config::Config;

/// Load the configured catalog and build a ready engine.
///
/// Called once per process before any input is accepted; a failure here
/// aborts the command.
pub fn build_engine(config: &Config) -> Result<RetrievalEngine> {
    let corpus = catalog::load_corpus(config)?;
    let source = config
        .catalog
        .path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in".to_string());
    info!(catalog = %source, entries = corpus.len(), "loading catalog");

    RetrievalEngine::from_corpus(config.engine.to_engine_config(), corpus)
        .with_context(|| format!("Failed to build retrieval engine from {} catalog", source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use support_bot_core::error::EngineError;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_engine_is_ready() {
        let engine = build_engine(&Config::default()).unwrap();
        assert!(engine.is_ready());
        assert_eq!(engine.corpus().map(|c| c.len()), Some(37));
    }

    #[test]
    fn test_empty_catalog_file_surfaces_empty_corpus() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("empty.json");
        std::fs::write(&path, "[]").unwrap();
        let mut config = Config::default();
        config.catalog.path = Some(path);

        let err = build_engine(&config).unwrap_err();
        assert_eq!(
            err.downcast_ref::<EngineError>(),
            Some(&EngineError::EmptyCorpus)
        );
    }
}
