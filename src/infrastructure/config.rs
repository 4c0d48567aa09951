use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(9000),
            cors_allowed_origins: parse_origins(env::var("CORS_ALLOWED_ORIGINS").ok()),
        }
    }

    /// Apply `--port <n>` from the command line, if present
    pub fn with_args(mut self, args: &[String]) -> Self {
        if let Some(pos) = args.iter().position(|arg| arg == "--port") {
            match args.get(pos + 1).map(|v| v.parse::<u16>()) {
                Some(Ok(port)) => self.port = port,
                Some(Err(e)) => tracing::warn!("Ignoring invalid --port value: {}", e),
                None => tracing::warn!("--port given without a value"),
            }
        }
        self
    }
}

fn parse_origins(raw: Option<String>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    })
    .unwrap_or_default()
}
