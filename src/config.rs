use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url_development: String,
    pub backend_url_production: String,
    pub environment: String,
    pub enable_logging: bool,
    /// Intervalo del poll del feed cuando el partner está online
    pub poll_interval_secs: u32,
    /// Fracción del importe que cobra el partner (el resto es fee de plataforma)
    pub earnings_share: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url_development: "http://localhost:5000".to_string(),
            backend_url_production: "https://api.boxy-delivery.example".to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            poll_interval_secs: 5,
            earnings_share: 0.7,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend_url_development: option_env!("BACKEND_URL_DEVELOPMENT")
                .map(|s| s.to_string())
                .unwrap_or(defaults.backend_url_development),
            backend_url_production: option_env!("BACKEND_URL_PRODUCTION")
                .map(|s| s.to_string())
                .unwrap_or(defaults.backend_url_production),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development")
                .to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true")
                .parse()
                .unwrap_or(true),
            poll_interval_secs: option_env!("POLL_INTERVAL_SECS")
                .unwrap_or("5")
                .parse()
                .unwrap_or(5),
            earnings_share: option_env!("EARNINGS_SHARE")
                .unwrap_or("0.7")
                .parse()
                .unwrap_or(0.7),
        }
    }

    /// Obtiene la URL del backend según el entorno actual
    pub fn backend_url(&self) -> &str {
        match self.environment.as_str() {
            "production" => &self.backend_url_production,
            _ => &self.backend_url_development,
        }
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }

    /// Intervalo del poll en milisegundos (para gloo_timers)
    pub fn poll_interval_ms(&self) -> u32 {
        self.poll_interval_secs * 1000
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_url_segun_entorno() {
        let mut config = AppConfig::default();
        assert_eq!(config.backend_url(), "http://localhost:5000");

        config.environment = "production".to_string();
        assert_eq!(config.backend_url(), "https://api.boxy-delivery.example");
    }

    #[test]
    fn intervalo_de_poll_en_ms() {
        let config = AppConfig::default();
        assert_eq!(config.poll_interval_ms(), 5000);
    }
}
