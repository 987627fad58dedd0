use std::sync::Arc;

use chrono::Duration;
use futures_locks::{Mutex, RwLock};

use super::CacheEntry;
use crate::{fetch::Fetch, menu::Menu, parse::Extractor, sources::Source};

/// Serves the menu of one source, refetching once it is older than `max_age` seconds.
///
/// Concurrent stale callers share one refresh: whoever waited for the
/// running refresh checks the cache again before fetching itself.
pub struct CacheProxy<F> {
    source: Arc<Source>,
    fetcher: Arc<F>,
    extractor: Arc<Extractor>,
    max_age: u64,
    entry: RwLock<CacheEntry>,
    refreshing: Mutex<()>,
}

impl<F: Fetch> CacheProxy<F> {
    pub fn new(
        source: Arc<Source>,
        fetcher: Arc<F>,
        extractor: Arc<Extractor>,
        max_age: u64,
    ) -> Self {
        Self {
            source,
            fetcher,
            extractor,
            max_age,
            entry: RwLock::new(CacheEntry::Cold),
            refreshing: Mutex::new(()),
        }
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    #[cfg(test)]
    pub(crate) fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// The cached menu while it is fresh, otherwise a newly fetched one.
    ///
    /// A failed refresh returns the error and leaves the cache as it was; the
    /// previous menu is not handed out instead.
    pub async fn get_current_menu(&self) -> crate::Result<Arc<Menu>> {
        if let Some(menu) = self.entry.read().await.fresh_menu(self.max_age) {
            return Ok(menu);
        }
        let _guard = self.refreshing.lock().await;
        if let Some(menu) = self.entry.read().await.fresh_menu(self.max_age) {
            log::debug!("{}: refreshed while waiting", self.source.key);
            return Ok(menu);
        }
        self.fetch_and_store().await
    }

    /// Fetches and parses the page regardless of the cached menu's age.
    pub async fn refresh(&self) -> crate::Result<Arc<Menu>> {
        let _guard = self.refreshing.lock().await;
        self.fetch_and_store().await
    }

    pub async fn time_since_refresh(&self) -> Option<Duration> {
        self.entry.read().await.time_since_refresh()
    }

    pub async fn time_until_refresh(&self) -> Option<Duration> {
        let max_age = Duration::seconds(i64::try_from(self.max_age).unwrap_or(i64::MAX));
        self.time_since_refresh().await.map(|age| max_age - age)
    }

    async fn fetch_and_store(&self) -> crate::Result<Arc<Menu>> {
        log::info!("{}: fetching {}", self.source.key, self.source.locator);
        let raw = self.fetcher.fetch(&self.source.locator).await?;
        let menu = Arc::new(self.extractor.parse(&self.source, &raw)?);
        *self.entry.write().await = CacheEntry::warm(Arc::clone(&menu));
        Ok(menu)
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, time::Duration as StdDuration};

    use super::*;
    use crate::{
        cache::stub::StubFetcher, error::Error, fetch::Locator, menu::CanteenInfo,
        parse::{Layout, NutritionPolicy},
    };

    fn page() -> String {
        fs::read_to_string("./src/parse/html_examples/current.html").unwrap()
    }

    fn proxy(fetcher: &Arc<StubFetcher>, max_age: u64) -> CacheProxy<StubFetcher> {
        let source = Source {
            key: "test".into(),
            info: CanteenInfo {
                name: "Testmensa".into(),
                location_description: None,
                location: None,
            },
            locator: Locator::parse("http://localhost/test.html"),
            meal_count: 2,
            layout: Layout::Current,
        };
        CacheProxy::new(
            Arc::new(source),
            Arc::clone(fetcher),
            Arc::new(Extractor::new("€", NutritionPolicy::Strict)),
            max_age,
        )
    }

    #[tokio::test]
    async fn test_fresh_menu_is_served_from_cache() {
        let fetcher = Arc::new(StubFetcher::serving(&page()));
        let proxy = proxy(&fetcher, 60);
        let first = proxy.get_current_menu().await.unwrap();
        let second = proxy.get_current_menu().await.unwrap();
        assert_eq!(fetcher.calls(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(proxy.time_since_refresh().await.is_some());
    }

    #[tokio::test]
    async fn test_stale_menu_is_refetched() {
        let fetcher = Arc::new(StubFetcher::serving(&page()));
        let proxy = proxy(&fetcher, 1);
        proxy.get_current_menu().await.unwrap();
        tokio::time::sleep(StdDuration::from_millis(1100)).await;
        proxy.get_current_menu().await.unwrap();
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn test_zero_max_age_always_fetches() {
        let fetcher = Arc::new(StubFetcher::serving(&page()));
        let proxy = proxy(&fetcher, 0);
        for _ in 0..3 {
            proxy.get_current_menu().await.unwrap();
        }
        assert_eq!(fetcher.calls(), 3);
    }

    #[tokio::test]
    async fn test_cold_failure_retries_next_time() {
        let fetcher = Arc::new(StubFetcher::failing());
        let proxy = proxy(&fetcher, 60);
        assert!(matches!(proxy.get_current_menu().await, Err(Error::Fetch(_))));
        assert!(proxy.time_since_refresh().await.is_none());

        fetcher.set_page(Some(&page()));
        let menu = proxy.get_current_menu().await.unwrap();
        assert_eq!(menu.meals().len(), 2);
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn test_warm_failure_keeps_previous_menu() {
        let fetcher = Arc::new(StubFetcher::serving(&page()));
        let proxy = proxy(&fetcher, 0);
        let first = proxy.get_current_menu().await.unwrap();

        fetcher.set_page(Some("<html><body>Wartung</body></html>"));
        assert!(matches!(proxy.get_current_menu().await, Err(Error::Parse(_))));
        fetcher.set_page(None);
        assert!(matches!(proxy.refresh().await, Err(Error::Fetch(_))));

        match &*proxy.entry.read().await {
            CacheEntry::Warm { menu, .. } => assert!(Arc::ptr_eq(menu, &first)),
            CacheEntry::Cold => panic!("a failed refresh must not clear the cache"),
        }
    }

    #[tokio::test]
    async fn test_concurrent_stale_callers_share_one_fetch() {
        let fetcher =
            Arc::new(StubFetcher::serving(&page()).with_delay(StdDuration::from_millis(50)));
        let proxy = proxy(&fetcher, 60);
        let (a, b) = futures::join!(proxy.get_current_menu(), proxy.get_current_menu());
        assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_forced_refresh_ignores_age() {
        let fetcher = Arc::new(StubFetcher::serving(&page()));
        let proxy = proxy(&fetcher, 60);
        proxy.get_current_menu().await.unwrap();
        proxy.refresh().await.unwrap();
        assert_eq!(fetcher.calls(), 2);
        let until = proxy.time_until_refresh().await.unwrap();
        assert!(until > Duration::seconds(58));
    }
}
