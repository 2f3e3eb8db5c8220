/// Configuration for creating the WebView.
#[derive(Debug, Clone)]
pub struct WebViewConfig {
    /// Initial URL to load (takes precedence over `html`).
    pub url: Option<String>,
    /// Initial HTML content to render.
    pub html: Option<String>,
    /// Script installed before any document script, on every navigation.
    pub init_script: String,
    /// Whether to enable dev tools (always on in debug builds).
    pub devtools: bool,
    pub user_agent: Option<String>,
}

impl Default for WebViewConfig {
    fn default() -> Self {
        Self {
            url: None,
            html: None,
            init_script: String::new(),
            devtools: cfg!(debug_assertions),
            user_agent: Some(format!("pagesync/{}", env!("CARGO_PKG_VERSION"))),
        }
    }
}

impl WebViewConfig {
    /// Create a config that loads a URL.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Create a config that renders inline HTML.
    pub fn with_html(html: impl Into<String>) -> Self {
        Self {
            html: Some(html.into()),
            ..Default::default()
        }
    }

    /// Initial URL for logging: the configured URL or `about:blank`.
    pub fn initial_url(&self) -> &str {
        self.url.as_deref().unwrap_or("about:blank")
    }
}
