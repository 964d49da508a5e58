use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub seat_map: SeatMapConfig,
    pub business_rules: BusinessRules,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SeatMapConfig {
    /// Seats per bus.
    pub seat_count: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BusinessRules {
    pub default_currency: String,
    /// Pause between closing the bill and showing the confirmation. Presentation only.
    #[serde(default)]
    pub confirmation_delay_ms: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seat_map: SeatMapConfig { seat_count: 30 },
            business_rules: BusinessRules {
                default_currency: buzzes_catalog::DEFAULT_CURRENCY.to_string(),
                confirmation_delay_ms: 300,
            },
            logging: LoggingConfig {
                filter: "buzzes_app=info".to_string(),
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::builder(&run_mode, Self::environment())?.build()?.try_deserialize()
    }

    /// Eg. `BUZZES__SEAT_MAP__SEAT_COUNT=40`
    fn environment() -> config::Environment {
        config::Environment::with_prefix("BUZZES")
            .separator("__")
            .try_parsing(true)
    }

    fn builder(
        run_mode: &str,
        environment: config::Environment,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        let defaults = Self::default();

        let builder = config::Config::builder()
            .set_default("seat_map.seat_count", i64::from(defaults.seat_map.seat_count))?
            .set_default("business_rules.default_currency", defaults.business_rules.default_currency)?
            .set_default(
                "business_rules.confirmation_delay_ms",
                defaults.business_rules.confirmation_delay_ms as i64,
            )?
            .set_default("logging.filter", defaults.logging.filter)?
            // Files are all optional; the built-in defaults above are enough to run.
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(environment);

        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_with_env(vars: &[(&str, &str)]) -> Config {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Config::builder("test-no-such-mode", Config::environment().source(Some(map)))
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_builder_falls_back_to_defaults() {
        let config = load_with_env(&[]);

        assert_eq!(config.seat_map.seat_count, 30);
        assert_eq!(config.business_rules.default_currency, "LKR");
        assert_eq!(config.business_rules.confirmation_delay_ms, 300);
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let config = load_with_env(&[
            ("BUZZES__SEAT_MAP__SEAT_COUNT", "40"),
            ("BUZZES__BUSINESS_RULES__CONFIRMATION_DELAY_MS", "0"),
        ]);

        assert_eq!(config.seat_map.seat_count, 40);
        assert_eq!(config.business_rules.confirmation_delay_ms, 0);
        assert_eq!(config.business_rules.default_currency, "LKR");
    }

    #[test]
    fn test_environment_ignores_other_prefixes() {
        let config = load_with_env(&[("OTHER__SEAT_MAP__SEAT_COUNT", "12")]);
        assert_eq!(config.seat_map.seat_count, 30);
    }
}
