//! Build-time configuration of the apply page.
//!
//! Values are baked in when the wasm bundle is compiled (`option_env!`), so
//! `APPLY_API_BASE_URL=https://hr.example.com trunk build` points the page at
//! another backend without touching the code.

use std::str::FromStr;

use common::workflow::DocumentTitles;
use log::LevelFilter;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Root of the Job and Evaluation services, without trailing slash.
    pub api_base_url: String,
    pub log_level: LevelFilter,
    pub titles: DocumentTitles,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            log_level: LevelFilter::Info,
            titles: DocumentTitles::default(),
        }
    }
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        Self::from_vars(|key| match key {
            "APPLY_API_BASE_URL" => option_env!("APPLY_API_BASE_URL"),
            "APPLY_LOG_LEVEL" => option_env!("APPLY_LOG_LEVEL"),
            "APPLY_WARNING_TITLE" => option_env!("APPLY_WARNING_TITLE"),
            "APPLY_SUBMITTED_TITLE" => option_env!("APPLY_SUBMITTED_TITLE"),
            _ => None,
        })
    }

    /// Overlays whatever `var` returns on top of the defaults. Blank or
    /// unparsable values keep the default and log a warning.
    pub fn from_vars(var: impl Fn(&str) -> Option<&'static str>) -> Self {
        let default = Self::default();
        let set = |key: &str| var(key).map(str::trim).filter(|v| !v.is_empty());

        let api_base_url = match set("APPLY_API_BASE_URL") {
            Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
                url.trim_end_matches('/').to_string()
            }
            Some(url) => {
                log::warn!("APPLY_API_BASE_URL={url:?} is not an http(s) URL, using {DEFAULT_API_BASE_URL}");
                default.api_base_url
            }
            None => default.api_base_url,
        };

        let log_level = match set("APPLY_LOG_LEVEL") {
            Some(level) => LevelFilter::from_str(level).unwrap_or_else(|_| {
                log::warn!("APPLY_LOG_LEVEL={level:?} is not a log level, using {}", default.log_level);
                default.log_level
            }),
            None => default.log_level,
        };

        let titles = DocumentTitles {
            warning: set("APPLY_WARNING_TITLE")
                .map(str::to_string)
                .unwrap_or(default.titles.warning),
            submitted: set("APPLY_SUBMITTED_TITLE")
                .map(str::to_string)
                .unwrap_or(default.titles.submitted),
        };

        Self {
            api_base_url,
            log_level,
            titles,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}
