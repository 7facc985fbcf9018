use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Search provider
    pub chirp_api_token: String,
    pub search_page_size: u32,
    pub search_lang: String,

    // Web server
    pub web_host: String,
    pub web_port: u16,

    // Reports
    pub report_dir: String,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            chirp_api_token: required_env("CHIRP_API_TOKEN"),
            search_page_size: env::var("SEARCH_PAGE_SIZE")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .expect("SEARCH_PAGE_SIZE must be a number"),
            search_lang: env::var("SEARCH_LANG").unwrap_or_else(|_| "en".to_string()),
            web_host: env::var("WEB_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_port: env::var("WEB_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .expect("WEB_PORT must be a number"),
            report_dir: env::var("REPORT_DIR").unwrap_or_else(|_| "./reports".to_string()),
        }
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}
