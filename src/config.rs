use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const FAVORITES_CLUBS_FILE: &str = "favorites_clubs.json";
pub const FAVORITES_COMPETITIONS_FILE: &str = "favorites_competitions.json";
pub const ALIASES_CLUBS_FILE: &str = "aliases_clubs.json";
pub const ALIASES_COMPETITIONS_FILE: &str = "aliases_competitions.json";
pub const BLACKLIST_CLUBS_FILE: &str = "blacklist_clubs.json";
pub const BLACKLIST_COMPETITIONS_FILE: &str = "blacklist_competitions.json";
pub const BLACKLIST_TEXT_PATTERNS_FILE: &str = "blacklist_text_patterns.json";
pub const FEED_SETTINGS_FILE: &str = "feed.json";

pub const TEMPLATE_HTML_FILE: &str = "report_template.html";
pub const TEMPLATE_CSS_FILE: &str = "report_styles.css";

pub const DEFAULT_BASE_URL: &str = "https://api.sportdb.dev";
pub const API_KEY_ENV: &str = "FOOTBALL_REPORT_API_KEY";
pub const BASE_URL_ENV: &str = "FOOTBALL_REPORT_BASE_URL";

const EMBEDDED_TEMPLATE_HTML: &str = include_str!("../templates/report_template.html");
const EMBEDDED_TEMPLATE_CSS: &str = include_str!("../templates/report_styles.css");

/// Matching inputs for one run. Never mutated once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub favorite_competitions: Vec<String>,
    pub favorite_clubs: Vec<String>,
    /// raw -> canonical
    pub competition_aliases: BTreeMap<String, String>,
    /// raw -> canonical
    pub club_aliases: BTreeMap<String, String>,
    pub blacklisted_competitions: Vec<String>,
    pub blacklisted_clubs: Vec<String>,
    pub blacklisted_text_patterns: Vec<String>,
}

impl RuleConfig {
    /// Load all seven rule files from the config directory.
    /// Every file is required; a missing one aborts the run.
    pub fn load(paths: &ProjectPaths) -> Result<Self, ConfigError> {
        let config = Self {
            favorite_clubs: read_json(&paths.config_file(FAVORITES_CLUBS_FILE))?,
            favorite_competitions: read_json(&paths.config_file(FAVORITES_COMPETITIONS_FILE))?,
            club_aliases: read_json(&paths.config_file(ALIASES_CLUBS_FILE))?,
            competition_aliases: read_json(&paths.config_file(ALIASES_COMPETITIONS_FILE))?,
            blacklisted_clubs: read_json(&paths.config_file(BLACKLIST_CLUBS_FILE))?,
            blacklisted_competitions: read_json(&paths.config_file(BLACKLIST_COMPETITIONS_FILE))?,
            blacklisted_text_patterns: read_json(&paths.config_file(BLACKLIST_TEXT_PATTERNS_FILE))?,
        };

        tracing::info!(
            favorite_competitions = config.favorite_competitions.len(),
            favorite_clubs = config.favorite_clubs.len(),
            competition_aliases = config.competition_aliases.len(),
            club_aliases = config.club_aliases.len(),
            blacklist_entries = config.blacklisted_competitions.len()
                + config.blacklisted_clubs.len()
                + config.blacklisted_text_patterns.len(),
            "Loaded rule config from {}",
            paths.config_dir().display()
        );
        Ok(config)
    }

    /// Write every rule file, cleaning lists and maps first
    pub fn save(&self, paths: &ProjectPaths) -> Result<(), ConfigError> {
        write_json(&paths.config_file(FAVORITES_CLUBS_FILE), &clean_list(&self.favorite_clubs))?;
        write_json(
            &paths.config_file(FAVORITES_COMPETITIONS_FILE),
            &clean_list(&self.favorite_competitions),
        )?;
        write_json(&paths.config_file(ALIASES_CLUBS_FILE), &clean_map(&self.club_aliases))?;
        write_json(
            &paths.config_file(ALIASES_COMPETITIONS_FILE),
            &clean_map(&self.competition_aliases),
        )?;
        write_json(&paths.config_file(BLACKLIST_CLUBS_FILE), &clean_list(&self.blacklisted_clubs))?;
        write_json(
            &paths.config_file(BLACKLIST_COMPETITIONS_FILE),
            &clean_list(&self.blacklisted_competitions),
        )?;
        write_json(
            &paths.config_file(BLACKLIST_TEXT_PATTERNS_FILE),
            &clean_list(&self.blacklisted_text_patterns),
        )?;
        Ok(())
    }
}

/// Trim entries, drop blanks and case-insensitive duplicates (first wins)
pub fn clean_list(items: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .filter(|item| seen.insert(item.to_lowercase()))
        .map(str::to_string)
        .collect()
}

/// Trim keys and values, drop blank pairs and case-insensitive duplicate keys
pub fn clean_map(map: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    let mut seen = HashSet::new();
    let mut cleaned = BTreeMap::new();
    for (key, value) in map {
        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() || value.is_empty() || !seen.insert(key.to_lowercase()) {
            continue;
        }
        cleaned.insert(key.to_string(), value.to_string());
    }
    cleaned
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ConfigError::ParseFailed {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ConfigError> {
    let write_failed = |source| ConfigError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_failed)?;
    }

    let json = serde_json::to_string_pretty(value).map_err(|source| ConfigError::ParseFailed {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(write_failed)
}

/// Directory layout of a report project: `config/`, `templates/`, `out/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    root: PathBuf,
}

impl ProjectPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Locate the project root.
    ///
    /// Walks up from the executable directory, then from the current
    /// directory, looking for a directory holding both `config/` and
    /// `templates/`. Falls back to the current directory.
    pub fn locate() -> Self {
        let exe_dir = env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        let cwd = env::current_dir().ok();

        for start in exe_dir.iter().chain(cwd.iter()) {
            if let Some(root) = start.ancestors().find(|dir| Self::is_project_root(dir)) {
                return Self::new(root);
            }
        }

        Self::new(cwd.unwrap_or_else(|| PathBuf::from(".")))
    }

    fn is_project_root(dir: &Path) -> bool {
        dir.join("config").is_dir() && dir.join("templates").is_dir()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_dir(&self) -> PathBuf {
        self.root.join("config")
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.root.join("templates")
    }

    pub fn out_dir(&self) -> PathBuf {
        self.root.join("out")
    }

    pub fn config_file(&self, name: &str) -> PathBuf {
        self.config_dir().join(name)
    }

    pub fn template_html_path(&self) -> PathBuf {
        self.templates_dir().join(TEMPLATE_HTML_FILE)
    }

    pub fn template_css_path(&self) -> PathBuf {
        self.templates_dir().join(TEMPLATE_CSS_FILE)
    }
}

/// Create whatever is missing for a fresh project: empty rule files and the
/// embedded default template and stylesheet. Existing files are left alone.
/// Returns the paths that were created.
pub fn init_project(paths: &ProjectPaths) -> Result<Vec<PathBuf>, ConfigError> {
    let mut created = Vec::new();

    for name in [
        FAVORITES_CLUBS_FILE,
        FAVORITES_COMPETITIONS_FILE,
        BLACKLIST_CLUBS_FILE,
        BLACKLIST_COMPETITIONS_FILE,
        BLACKLIST_TEXT_PATTERNS_FILE,
    ] {
        let path = paths.config_file(name);
        if !path.exists() {
            write_json(&path, &Vec::<String>::new())?;
            created.push(path);
        }
    }

    for name in [ALIASES_CLUBS_FILE, ALIASES_COMPETITIONS_FILE] {
        let path = paths.config_file(name);
        if !path.exists() {
            write_json(&path, &BTreeMap::<String, String>::new())?;
            created.push(path);
        }
    }

    for (path, content) in [
        (paths.template_html_path(), EMBEDDED_TEMPLATE_HTML),
        (paths.template_css_path(), EMBEDDED_TEMPLATE_CSS),
    ] {
        if path.exists() {
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::WriteFailed {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, content).map_err(|source| ConfigError::WriteFailed {
            path: path.clone(),
            source,
        })?;
        created.push(path);
    }

    for path in &created {
        tracing::info!("Created {}", path.display());
    }
    Ok(created)
}

/// Access settings for the fixture feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub api_key: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
        }
    }
}

impl FeedSettings {
    /// Load `config/feed.json` if present, then apply environment overrides.
    /// The API key is required.
    pub fn load(paths: &ProjectPaths) -> Result<Self, ConfigError> {
        let path = paths.config_file(FEED_SETTINGS_FILE);
        let from_file = if path.exists() {
            read_json(&path)?
        } else {
            Self::default()
        };

        from_file
            .with_overrides(env::var(API_KEY_ENV).ok(), env::var(BASE_URL_ENV).ok())
            .validated()
    }

    /// Non-blank override values replace file values
    pub fn with_overrides(mut self, api_key: Option<String>, base_url: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.api_key = key;
        }
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url;
        }
        self
    }

    /// Trim both values and reject blanks
    pub fn validated(self) -> Result<Self, ConfigError> {
        let api_key = self.api_key.trim().to_string();
        let base_url = self.base_url.trim().to_string();

        if api_key.is_empty() {
            return Err(ConfigError::MissingSetting("api_key"));
        }
        if base_url.is_empty() {
            return Err(ConfigError::MissingSetting("base_url"));
        }
        Ok(Self { base_url, api_key })
    }
}
