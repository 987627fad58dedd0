use std::{collections::HashMap, sync::Arc};

use futures::future::join_all;

use super::CacheProxy;
use crate::{error::Error, fetch::Fetch, menu::Menu, parse::Extractor, sources::Source};

/// All known sources and one cache proxy per source.
///
/// Built once at startup. The source table is read-only afterwards; the
/// mutable cache state lives only inside the proxies.
pub struct Registry<F> {
    sources: Vec<Arc<Source>>,
    proxies: HashMap<String, CacheProxy<F>>,
}

impl<F: Fetch> Registry<F> {
    pub fn new(sources: Vec<Source>, fetcher: F, extractor: Extractor, max_age: u64) -> Self {
        let fetcher = Arc::new(fetcher);
        let extractor = Arc::new(extractor);
        let sources: Vec<Arc<Source>> = sources.into_iter().map(Arc::new).collect();
        let proxies = sources
            .iter()
            .map(|source| {
                let proxy = CacheProxy::new(
                    Arc::clone(source),
                    Arc::clone(&fetcher),
                    Arc::clone(&extractor),
                    max_age,
                );
                (source.key.to_lowercase(), proxy)
            })
            .collect();
        Self { sources, proxies }
    }

    /// Source keys in registry order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|source| source.key.as_str())
    }

    /// Keys are matched case-insensitively.
    pub fn proxy(&self, key: &str) -> crate::Result<&CacheProxy<F>> {
        self.proxies
            .get(&key.to_lowercase())
            .ok_or_else(|| Error::UnknownCanteen(key.to_owned()))
    }

    pub async fn get_current_menu(&self, key: &str) -> crate::Result<Arc<Menu>> {
        self.proxy(key)?.get_current_menu().await
    }

    pub async fn refresh(&self, key: &str) -> crate::Result<Arc<Menu>> {
        self.proxy(key)?.refresh().await
    }

    /// Loads every source once. Failures are logged and leave that source cold.
    pub async fn warm_up(&self) {
        let results = join_all(self.sources.iter().map(|source| async move {
            (source, self.get_current_menu(&source.key).await)
        }))
        .await;
        for (source, result) in results {
            match result {
                Ok(menu) if menu.meals().is_empty() => {
                    log::warn!("{}: page lists no meals", source.key);
                }
                Ok(menu) => log::info!(
                    "{} ({}): [{}] valid {} to {}, prices in {}",
                    source.key,
                    menu.info().name,
                    menu.meals().labels().collect::<Vec<_>>().join(", "),
                    menu.validity().from(),
                    menu.validity().until(),
                    menu.currency()
                ),
                Err(e) => log::warn!("{}: initial load failed: {e}", source.key),
            }
        }
    }
}
