pub struct Config {
    pub api_base: String,
    pub default_symbol: String,
    pub chart_height: u16,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn new() -> Self {
        Self {
            api_base: "http://localhost:8000".to_string(),
            default_symbol: "AAPL".to_string(),
            chart_height: 20,
            request_timeout_secs: 30,
        }
    }

    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    pub fn with_default_symbol(mut self, symbol: &str) -> Self {
        self.default_symbol = symbol.to_uppercase();
        self
    }

    pub fn with_chart_height(mut self, height: u16) -> Self {
        self.chart_height = height;
        self
    }

    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
