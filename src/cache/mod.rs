mod proxy;
mod registry;

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::menu::Menu;

pub use proxy::CacheProxy;
pub use registry::Registry;

/// Last good menu of one source.
#[derive(Debug, Clone, Default)]
pub enum CacheEntry {
    /// Nothing fetched successfully yet. Always stale.
    #[default]
    Cold,
    Warm {
        menu: Arc<Menu>,
        cached_at: DateTime<Utc>,
    },
}

impl CacheEntry {
    pub fn warm(menu: Arc<Menu>) -> Self {
        Self::Warm {
            menu,
            cached_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn time_since_refresh(&self) -> Option<Duration> {
        match self {
            Self::Cold => None,
            Self::Warm { cached_at, .. } => Some(Utc::now().signed_duration_since(*cached_at)),
        }
    }

    /// The cached menu, if it is younger than `max_age` whole seconds.
    #[must_use]
    pub fn fresh_menu(&self, max_age: u64) -> Option<Arc<Menu>> {
        let age = self.time_since_refresh()?.num_seconds();
        let max_age = i64::try_from(max_age).unwrap_or(i64::MAX);
        match self {
            Self::Warm { menu, .. } if age < max_age => Some(Arc::clone(menu)),
            _ => None,
        }
    }
}
