/// Default port the show-control server serves assets from.
pub const DEFAULT_ASSET_PORT: u16 = 12095;

/// Turns a message's `file` into the locator handed to a surface.
pub trait AssetResolver {
    /// URL of `file` on the server.
    fn asset_url(&self, file: &str) -> String;

    /// Locally cached copy of `url`, if one exists.
    fn cached(&self, _url: &str) -> Option<String> {
        None
    }

    /// Cached copy when available, otherwise the server URL.
    fn resolve(&self, file: &str) -> String {
        let url = self.asset_url(file);
        self.cached(&url).unwrap_or(url)
    }
}

/// Resolves assets against the show-control server over HTTP.
pub struct ServerAssets {
    host: String,
    port: u16,
    cache: Option<Box<dyn Fn(&str) -> Option<String>>>,
}

impl ServerAssets {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            cache: None,
        }
    }

    /// Install a lookup for locally cached assets, consulted before the server URL.
    pub fn with_cache(mut self, cache: impl Fn(&str) -> Option<String> + 'static) -> Self {
        self.cache = Some(Box::new(cache));
        self
    }
}

impl AssetResolver for ServerAssets {
    fn asset_url(&self, file: &str) -> String {
        format!(
            "http://{}:{}/assets/{}",
            self.host,
            self.port,
            file.trim_start_matches('/')
        )
    }

    fn cached(&self, url: &str) -> Option<String> {
        self.cache.as_ref().and_then(|lookup| lookup(url))
    }
}
