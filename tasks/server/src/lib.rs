pub mod config {
    use serde::Deserialize;

    use crate::task::DescriptionLimits;

    #[derive(Deserialize, Debug, Clone)]
    pub struct Config {
        pub db_url: String,
        #[serde(default = "default_port")]
        pub port: u16,
        #[serde(default = "default_min_description_length")]
        pub min_description_length: usize,
        #[serde(default = "default_max_description_length")]
        pub max_description_length: usize,
        /// Offset from UTC, in whole hours, used when stamping `createdOn`.
        #[serde(default)]
        pub utc_offset_hours: i32,
    }

    impl Config {
        /// Loads configuration from environment variables.
        pub fn from_env() -> anyhow::Result<Self> {
            Self::from_environment(config::Environment::default())
        }

        /// Loads configuration from the given environment source.
        pub fn from_environment(environment: config::Environment) -> anyhow::Result<Self> {
            let settings = config::Config::builder()
                .add_source(environment)
                .build()?;

            let config: Config = settings.try_deserialize()?;
            Ok(config)
        }

        /// Returns the description length bounds enforced when creating tasks.
        pub fn description_limits(&self) -> anyhow::Result<DescriptionLimits> {
            DescriptionLimits::new(self.min_description_length, self.max_description_length)
                .ok_or_else(|| {
                    anyhow::anyhow!(
                        "Minimum description length {} exceeds maximum {}",
                        self.min_description_length,
                        self.max_description_length
                    )
                })
        }

        /// Returns the zone offset the task clock is bound to.
        pub fn utc_offset(&self) -> anyhow::Result<chrono::FixedOffset> {
            self.utc_offset_hours
                .checked_mul(3600)
                .and_then(chrono::FixedOffset::east_opt)
                .ok_or_else(|| anyhow::anyhow!("Invalid UTC offset: {} hours", self.utc_offset_hours))
        }
    }

    fn default_port() -> u16 {
        8080
    }

    fn default_min_description_length() -> usize {
        DescriptionLimits::MIN_DESCRIPTION_LENGTH
    }

    fn default_max_description_length() -> usize {
        DescriptionLimits::MAX_DESCRIPTION_LENGTH
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn environment(vars: &[(&str, &str)]) -> config::Environment {
            let source: config::Map<String, String> = vars
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect();
            config::Environment::default().source(Some(source))
        }

        #[test]
        fn can_load_config_with_defaults() {
            let config =
                Config::from_environment(environment(&[("db_url", "sqlite::memory:")])).unwrap();

            assert_eq!(config.db_url, "sqlite::memory:");
            assert_eq!(config.port, 8080);
            assert_eq!(config.utc_offset_hours, 0);
            assert_eq!(config.description_limits().unwrap(), DescriptionLimits::DEFAULT);
        }

        #[test]
        fn can_override_description_limits() {
            let config = Config::from_environment(environment(&[
                ("db_url", "sqlite::memory:"),
                ("port", "9090"),
                ("min_description_length", "5"),
                ("max_description_length", "50"),
            ]))
            .unwrap();

            assert_eq!(config.port, 9090);
            let limits = config.description_limits().unwrap();
            assert_eq!(limits.min(), 5);
            assert_eq!(limits.max(), 50);
        }

        #[test]
        fn rejects_inverted_description_limits() {
            let config = Config::from_environment(environment(&[
                ("db_url", "sqlite::memory:"),
                ("min_description_length", "10"),
                ("max_description_length", "2"),
            ]))
            .unwrap();

            assert!(config.description_limits().is_err());
        }

        #[test]
        fn fails_without_database_url() {
            assert!(Config::from_environment(environment(&[])).is_err());
        }

        #[test]
        fn can_convert_utc_offset() {
            let config = Config::from_environment(environment(&[
                ("db_url", "sqlite::memory:"),
                ("utc_offset_hours", "2"),
            ]))
            .unwrap();

            assert_eq!(config.utc_offset().unwrap().local_minus_utc(), 7200);
        }
    }
}
pub mod entities;
pub mod task;
pub mod web;
