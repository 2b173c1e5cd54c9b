//! Configuration management for folio.
//!
//! Loads configuration from ${FOLIO_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Pacing of the role typewriter, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    /// Delay between characters while typing.
    pub typing_delay_ms: u64,
    /// Delay between characters while deleting. Half the typing delay when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleting_delay_ms: Option<u64>,
    /// Hold time once a role is fully typed.
    pub pause_after_typed_ms: u64,
    /// Hold time once a role is fully erased, before moving to the next one.
    pub pause_after_deleted_ms: u64,
    /// Delay before the very first step.
    pub start_delay_ms: u64,
}

impl TypewriterConfig {
    const DEFAULT_TYPING_DELAY_MS: u64 = 110;
    const DEFAULT_PAUSE_AFTER_TYPED_MS: u64 = 1800;
    const DEFAULT_PAUSE_AFTER_DELETED_MS: u64 = 500;
    const DEFAULT_START_DELAY_MS: u64 = 800;

    /// All delays zero. Used for non-interactive runs and tests.
    pub fn instant() -> Self {
        Self {
            typing_delay_ms: 0,
            deleting_delay_ms: Some(0),
            pause_after_typed_ms: 0,
            pause_after_deleted_ms: 0,
            start_delay_ms: 0,
        }
    }

    pub fn typing_delay(&self) -> Duration {
        Duration::from_millis(self.typing_delay_ms)
    }

    pub fn deleting_delay(&self) -> Duration {
        Duration::from_millis(self.deleting_delay_ms.unwrap_or(self.typing_delay_ms / 2))
    }

    pub fn pause_after_typed(&self) -> Duration {
        Duration::from_millis(self.pause_after_typed_ms)
    }

    pub fn pause_after_deleted(&self) -> Duration {
        Duration::from_millis(self.pause_after_deleted_ms)
    }

    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            typing_delay_ms: Self::DEFAULT_TYPING_DELAY_MS,
            deleting_delay_ms: None,
            pause_after_typed_ms: Self::DEFAULT_PAUSE_AFTER_TYPED_MS,
            pause_after_deleted_ms: Self::DEFAULT_PAUSE_AFTER_DELETED_MS,
            start_delay_ms: Self::DEFAULT_START_DELAY_MS,
        }
    }
}

/// Navbar thresholds, in terminal rows of scroll offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Offset past which the navbar switches to its "scrolled" style.
    pub scrolled_threshold: u16,
    /// Offset past which the back-to-top hint is shown.
    pub back_to_top_threshold: u16,
    /// Rows of lead before a section counts as the active one.
    pub active_offset: u16,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            scrolled_threshold: 1,
            back_to_top_threshold: 8,
            active_offset: 3,
        }
    }
}

/// Visibility thresholds for scroll-triggered animations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Fraction of a block that must be visible before it is revealed.
    pub threshold: f64,
    /// Fraction of the skills card that must be visible before bars fill.
    pub skills_threshold: f64,
    /// Fraction of the about section that must be visible before stats count up.
    pub stats_threshold: f64,
    /// Extra delay added per block within a section.
    pub stagger_ms: u64,
}

impl RevealConfig {
    /// Reveal delay for the `index`-th block of a group.
    pub fn stagger(&self, index: usize) -> Duration {
        Duration::from_millis(self.stagger_ms.saturating_mul(index as u64))
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.12,
            skills_threshold: 0.3,
            stats_threshold: 0.4,
            stagger_ms: 120,
        }
    }
}

/// Count-up animation for the about section stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub duration_ms: u64,
}

impl CounterConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self { duration_ms: 1500 }
    }
}

/// A number shown in the about section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatConfig {
    pub label: String,
    pub count: u64,
}

/// A skill bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillConfig {
    pub name: String,
    /// Fill percentage (clamped to 0..=100).
    pub level: u8,
}

/// Contact form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Spreadsheet web-app URL that accepts the JSON submission.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Seconds before the submit button returns to its idle label.
    pub reset_after_secs: u64,
    /// Request timeout in seconds (0 disables).
    pub timeout_secs: u64,
}

impl ContactConfig {
    /// Returns the configured endpoint, treating blank strings as unset.
    pub fn effective_endpoint(&self) -> Option<&str> {
        self.endpoint
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn reset_after(&self) -> Duration {
        Duration::from_secs(self.reset_after_secs)
    }

    pub fn timeout(&self) -> Option<Duration> {
        if self.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_secs))
        }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            reset_after_secs: 5,
            timeout_secs: 15,
        }
    }
}

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Recursively merges items from source table into target table.
///
/// Scalars and arrays of tables from `source` replace the target's;
/// nested tables merge so the target's comments survive.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source.iter() {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

pub mod paths {
    //! Path resolution for folio configuration and data directories.
    //!
    //! FOLIO_HOME resolution order:
    //! 1. FOLIO_HOME environment variable (if set)
    //! 2. ~/.config/folio (default)
    //! 3. ./.folio when no home directory can be determined

    use std::path::PathBuf;

    /// Returns the folio home directory.
    pub fn folio_home() -> PathBuf {
        if let Ok(home) = std::env::var("FOLIO_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".folio"),
            |h| h.join(".config").join("folio"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        folio_home().join("config.toml")
    }

    /// Returns the directory log files are written to.
    pub fn logs_dir() -> PathBuf {
        folio_home().join("logs")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name shown in the hero section.
    pub name: String,

    /// Short bio shown in the about section.
    pub about: String,

    /// Roles cycled by the hero typewriter, in order.
    pub roles: Vec<String>,

    pub typewriter: TypewriterConfig,

    pub scroll: ScrollConfig,

    pub reveal: RevealConfig,

    pub counter: CounterConfig,

    pub contact: ContactConfig,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stats: Vec<StatConfig>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<SkillConfig>,
}

impl Config {
    const DEFAULT_NAME: &str = "Alex Dev";
    const DEFAULT_ABOUT: &str = "Student of AI and data science who builds full stack web \
                                 applications and likes shipping small, well-tested tools.";
    const DEFAULT_ROLES: [&str; 5] = [
        "AI & Data Science Student",
        "Full Stack Developer",
        "React.js Developer",
        "Django Developer",
        "Machine Learning Enthusiast",
    ];

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    ///
    /// # Errors
    /// Returns an error if the file exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Generates a fresh config TOML from Rust defaults.
    ///
    /// Uses the embedded template for structure/comments and merges
    /// generated values from `Config::default()` into it.
    ///
    /// # Errors
    /// Returns an error if serialization or template parsing fails.
    pub fn generate() -> Result<String> {
        use toml_edit::DocumentMut;

        let config = Config::default();
        let generated_toml =
            toml::to_string(&config).context("Failed to serialize default config to TOML")?;

        let mut doc: DocumentMut = default_config_template()
            .parse()
            .context("Failed to parse default config template")?;

        let generated_doc: DocumentMut = generated_toml
            .parse()
            .context("Failed to parse generated config")?;

        merge_items(doc.as_table_mut(), generated_doc.as_table());

        Ok(doc.to_string())
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            about: Self::DEFAULT_ABOUT.to_string(),
            roles: Self::DEFAULT_ROLES.iter().map(ToString::to_string).collect(),
            typewriter: TypewriterConfig::default(),
            scroll: ScrollConfig::default(),
            reveal: RevealConfig::default(),
            counter: CounterConfig::default(),
            contact: ContactConfig::default(),
            stats: vec![
                StatConfig {
                    label: "Projects".to_string(),
                    count: 15,
                },
                StatConfig {
                    label: "Technologies".to_string(),
                    count: 12,
                },
                StatConfig {
                    label: "Certifications".to_string(),
                    count: 6,
                },
            ],
            skills: vec![
                SkillConfig {
                    name: "Python".to_string(),
                    level: 90,
                },
                SkillConfig {
                    name: "JavaScript / React".to_string(),
                    level: 85,
                },
                SkillConfig {
                    name: "Django".to_string(),
                    level: 80,
                },
                SkillConfig {
                    name: "Machine Learning".to_string(),
                    level: 75,
                },
                SkillConfig {
                    name: "SQL".to_string(),
                    level: 70,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.roles.len(), 5);
        assert_eq!(config.roles[0], "AI & Data Science Student");
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(
            &config_path,
            "roles = [\"Rustacean\"]\n\n[typewriter]\ntyping_delay_ms = 40\n",
        )
        .unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.roles, vec!["Rustacean".to_string()]);
        assert_eq!(config.typewriter.typing_delay_ms, 40);
        assert_eq!(config.typewriter.pause_after_typed_ms, 1800);
        assert_eq!(config.name, "Alex Dev");
    }

    #[test]
    fn test_load_invalid_toml_is_error() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "roles = [").unwrap();

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn test_deleting_delay_defaults_to_half_typing() {
        let config = TypewriterConfig {
            typing_delay_ms: 90,
            deleting_delay_ms: None,
            ..Default::default()
        };
        assert_eq!(config.deleting_delay(), Duration::from_millis(45));

        let explicit = TypewriterConfig {
            deleting_delay_ms: Some(20),
            ..Default::default()
        };
        assert_eq!(explicit.deleting_delay(), Duration::from_millis(20));
    }

    #[test]
    fn test_typewriter_defaults_match_observed_pacing() {
        let config = TypewriterConfig::default();
        assert_eq!(config.typing_delay(), Duration::from_millis(110));
        assert_eq!(config.deleting_delay(), Duration::from_millis(55));
        assert_eq!(config.pause_after_typed(), Duration::from_millis(1800));
        assert_eq!(config.pause_after_deleted(), Duration::from_millis(500));
        assert_eq!(config.start_delay(), Duration::from_millis(800));
    }

    #[test]
    fn test_init_creates_config_with_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        assert!(config_path.exists());
        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("typing_delay_ms = 110"));
        assert!(contents.contains("# deleting_delay_ms ="));

        let loaded = Config::load_from(&config_path).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "").unwrap();

        let result = Config::init(&config_path);
        assert!(result.is_err());
    }

    #[test]
    fn test_generate_keeps_comments_and_defaults() {
        let generated = Config::generate().unwrap();
        assert!(generated.contains("# Roles cycled by the hero typewriter"));

        let parsed: Config = toml::from_str(&generated).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_contact_endpoint_blank_is_none() {
        let config = ContactConfig {
            endpoint: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.effective_endpoint(), None);

        let config = ContactConfig {
            endpoint: Some(" https://example.com/exec ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.effective_endpoint(), Some("https://example.com/exec"));
    }

    #[test]
    fn test_contact_timeout_zero_disables() {
        let config = ContactConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.timeout(), None);
        assert_eq!(
            ContactConfig::default().timeout(),
            Some(Duration::from_secs(15))
        );
    }
}
