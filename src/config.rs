use std::{
    env,
    fmt::{self, Display, Formatter},
    net::{IpAddr, SocketAddr},
    path::PathBuf,
    str::FromStr,
    time::Duration,
};

use crate::parse::NutritionPolicy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    var: &'static str,
    value: String,
    reason: String,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config error: {}={:?} is invalid: {}",
            self.var, self.value, self.reason
        )
    }
}

impl std::error::Error for Error {}

/// Process configuration, read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub addr: SocketAddr,
    /// Cached menus older than this many seconds are refetched.
    pub max_menu_age: u64,
    pub currency: String,
    pub fetch_timeout: Duration,
    pub nutrition: NutritionPolicy,
    /// Read every source from `<page_dir>/<key>.html` instead of its URL.
    pub page_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let host: IpAddr = parsed(&lookup, "HOST", "127.0.0.1")?;
        let port: u16 = parsed(&lookup, "PORT", "3000")?;
        let max_menu_age = parsed(&lookup, "MAX_MENU_AGE", "1200")?;
        let fetch_timeout = Duration::from_secs(parsed(&lookup, "FETCH_TIMEOUT", "30")?);
        let nutrition = parsed(&lookup, "NUTRITION_POLICY", "strict")?;
        let currency = lookup("CURRENCY").unwrap_or_else(|| "€".to_string());
        let page_dir = lookup("PAGE_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);
        Ok(Self {
            addr: SocketAddr::new(host, port),
            max_menu_age,
            currency,
            fetch_timeout,
            nutrition,
            page_dir,
        })
    }
}

fn parsed<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: &str,
) -> Result<T, Error>
where
    T: FromStr,
    T::Err: Display,
{
    let value = lookup(var).unwrap_or_else(|| default.to_string());
    value.trim().parse().map_err(|e: T::Err| Error {
        var,
        value: value.clone(),
        reason: e.to_string(),
    })
}
