use domino_api::{DEFAULT_TEAM_A_NAME, DEFAULT_TEAM_B_NAME, DEFAULT_WINNING_SCORE};
use log::LevelFilter;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub team_a_name: String,
    pub team_b_name: String,
    pub winning_score: u32,
    /// Overrides that were ignored. Logged by `App` once the level is applied.
    pub rejected: Vec<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            team_a_name: DEFAULT_TEAM_A_NAME.to_string(),
            team_b_name: DEFAULT_TEAM_B_NAME.to_string(),
            winning_score: DEFAULT_WINNING_SCORE,
            rejected: Vec::new(),
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Read overrides through `lookup`. Unparsable values keep the default and
    /// are noted in `rejected`.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(name) = lookup("QDOMINO_TEAM_A").filter(|v| !v.trim().is_empty()) {
            settings.team_a_name = name.trim().to_string();
        }
        if let Some(name) = lookup("QDOMINO_TEAM_B").filter(|v| !v.trim().is_empty()) {
            settings.team_b_name = name.trim().to_string();
        }

        if let Some(raw) = lookup("QDOMINO_TARGET") {
            match raw.trim().parse::<u32>() {
                Ok(score) if score > 0 => settings.winning_score = score,
                _ => settings.rejected.push(format!(
                    "QDOMINO_TARGET={raw} is not a positive integer, keeping {DEFAULT_WINNING_SCORE}"
                )),
            }
        }

        if let Some(raw) = lookup("QDOMINO_LOG") {
            match raw.trim().parse::<LevelFilter>() {
                Ok(level) => settings.log_level = Some(level),
                Err(_) => settings
                    .rejected
                    .push(format!("QDOMINO_LOG={raw} is not a log level")),
            }
        }

        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> AppSettings {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppSettings::from_vars(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let settings = settings_from(&[]);
        assert_eq!(settings.team_a_name, "Cyber Nexus");
        assert_eq!(settings.team_b_name, "Void Runners");
        assert_eq!(settings.winning_score, 200);
        assert_eq!(settings.log_level, None);
        assert!(settings.rejected.is_empty());
    }

    #[test]
    fn overrides_are_applied() {
        let settings = settings_from(&[
            ("QDOMINO_TEAM_A", " Los Primos "),
            ("QDOMINO_TARGET", "150"),
            ("QDOMINO_LOG", "debug"),
        ]);
        assert_eq!(settings.team_a_name, "Los Primos");
        assert_eq!(settings.winning_score, 150);
        assert_eq!(settings.log_level, Some(LevelFilter::Debug));
    }

    #[test]
    fn invalid_values_fall_back() {
        let settings = settings_from(&[
            ("QDOMINO_TEAM_B", "  "),
            ("QDOMINO_TARGET", "0"),
            ("QDOMINO_LOG", "loud"),
        ]);
        assert_eq!(settings.team_b_name, "Void Runners");
        assert_eq!(settings.winning_score, 200);
        assert_eq!(settings.log_level, None);
        assert_eq!(settings.rejected.len(), 2);
        assert!(settings.rejected[0].starts_with("QDOMINO_TARGET=0"));
        assert!(settings.rejected[1].starts_with("QDOMINO_LOG=loud"));
    }
}
