//! Gateway wiring for the HTTP layer.

use std::sync::Arc;

use anyhow::Context;

use eanpay_gateway::{
    CatalogTranslator, EanPaymentGateway, InMemoryOrderHost, InMemoryOrderMetaStore, Translator,
};

use crate::config::ApiConfig;

/// Gateway backed by the in-memory collaborators (dev/test).
pub type Gateway = EanPaymentGateway<Arc<InMemoryOrderMetaStore>, Arc<InMemoryOrderHost>>;

pub struct AppServices {
    pub gateway: Gateway,
}

pub fn build_services(config: &ApiConfig) -> anyhow::Result<AppServices> {
    let store = Arc::new(InMemoryOrderMetaStore::new());
    let host = Arc::new(InMemoryOrderHost::new(config.public_url.clone()));

    let mut gateway = EanPaymentGateway::new(config.gateway.clone(), store, host)?;

    if let Some(path) = &config.translations_path {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read translations from {}", path.display()))?;
        let catalog = CatalogTranslator::from_json(&raw)
            .with_context(|| format!("invalid translation catalog {}", path.display()))?;
        tracing::info!(domain = catalog.domain(), "loaded translation catalog");
        gateway = gateway.with_translator(Arc::new(catalog) as Arc<dyn Translator>);
    }

    if !gateway.is_available() {
        tracing::warn!("EAN payment gateway is disabled; checkout submissions will be refused");
    }

    Ok(AppServices { gateway })
}
