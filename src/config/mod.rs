//! Composer configuration, persisted as pretty JSON.

use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use strsim::levenshtein;
use tracing::{debug, info};

use crate::commit::fields::CommitField;
use crate::commit::gitmoji::{Gitmoji, DEFAULT_GITMOJIS};
use crate::commit::rules::LintRules;
use crate::errors::ConfigError;

const APP_DIR: &str = "commit_inquiry";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";
const SUGGESTION_DISTANCE: usize = 3;

/// A named subset of message fields offered by the first wizard step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepPreset {
    pub name: String,
    pub fields: Vec<CommitField>,
}

impl StepPreset {
    pub fn new(name: impl Into<String>, fields: Vec<CommitField>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Comma-separated field names, shown as picker detail.
    pub fn summary(&self) -> String {
        self.fields
            .iter()
            .map(CommitField::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// One selectable commit type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitTypeEntry {
    pub name: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

impl CommitTypeEntry {
    fn new(name: &str, title: &str, description: &str, emoji: &str) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            emoji: Some(emoji.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    pub presets: Vec<StepPreset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_preset: Option<String>,
    pub scopes: Vec<String>,
    pub types: Vec<CommitTypeEntry>,
    /// Prefix type labels and values with their emoji.
    pub emoji_in_header: bool,
    /// Placeholder text per field.
    pub questions: BTreeMap<CommitField, String>,
    pub rules: LintRules,
    pub breaking_keyword: String,
    pub append_branch_name: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gitmojis: Option<Vec<Gitmoji>>,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        use CommitField::{Body, Breaking, Footer, Header, Issues, Scope, Subject, Type};
        Self {
            presets: vec![
                StepPreset::new("Quick", vec![Type, Scope, Subject]),
                StepPreset::new("Standard", vec![Type, Scope, CommitField::Gitmoji, Subject, Body]),
                StepPreset::new(
                    "Full",
                    vec![Type, Scope, CommitField::Gitmoji, Subject, Body, Breaking, Issues],
                ),
                StepPreset::new("Custom header", vec![Header, Body, Footer]),
            ],
            last_preset: None,
            scopes: Vec::new(),
            types: default_types(),
            emoji_in_header: false,
            questions: default_questions(),
            rules: LintRules::default(),
            breaking_keyword: "BREAKING CHANGE".to_string(),
            append_branch_name: false,
            gitmojis: None,
        }
    }
}

fn default_types() -> Vec<CommitTypeEntry> {
    vec![
        CommitTypeEntry::new("feat", "Features", "A new feature", "✨"),
        CommitTypeEntry::new("fix", "Bug Fixes", "A bug fix", "🐛"),
        CommitTypeEntry::new("docs", "Documentation", "Documentation only changes", "📝"),
        CommitTypeEntry::new(
            "style",
            "Styles",
            "Changes that do not affect the meaning of the code (white-space, formatting, etc)",
            "💄",
        ),
        CommitTypeEntry::new(
            "refactor",
            "Code Refactoring",
            "A code change that neither fixes a bug nor adds a feature",
            "♻️",
        ),
        CommitTypeEntry::new("perf", "Performance Improvements", "A code change that improves performance", "⚡️"),
        CommitTypeEntry::new("test", "Tests", "Adding missing tests or correcting existing tests", "✅"),
        CommitTypeEntry::new("build", "Builds", "Changes that affect the build system or external dependencies", "📦️"),
        CommitTypeEntry::new("ci", "Continuous Integrations", "Changes to CI configuration files and scripts", "👷"),
        CommitTypeEntry::new("chore", "Chores", "Other changes that don't modify src or test files", "🔧"),
        CommitTypeEntry::new("revert", "Reverts", "Reverts a previous commit", "⏪️"),
    ]
}

fn default_questions() -> BTreeMap<CommitField, String> {
    [
        (CommitField::Header, "Full header: <type>(<scope>): <subject>"),
        (CommitField::Type, "Select the type of change that you're committing"),
        (CommitField::Scope, "What is the scope of this change (e.g. component or file name)"),
        (CommitField::Gitmoji, "Search gitmoji"),
        (CommitField::Subject, "Write a short, imperative tense description of the change"),
        (CommitField::Body, "Provide a longer description of the change"),
        (CommitField::Footer, "Full footer, replacing breaking change and issue lines"),
        (CommitField::Breaking, "Describe the breaking changes"),
        (CommitField::Issues, "Add issue references (e.g. \"#123\", \"#123, #456\")"),
    ]
    .into_iter()
    .map(|(field, text)| (field, text.to_string()))
    .collect()
}

impl ComposerConfig {
    /// Rejects configurations the wizard cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.presets.is_empty() {
            return Err(ConfigError::Invalid("at least one step preset is required".into()));
        }
        for (index, preset) in self.presets.iter().enumerate() {
            if preset.name.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("preset #{} has no name", index + 1)));
            }
            if preset.fields.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "preset `{}` has no fields",
                    preset.name
                )));
            }
            if preset.fields.contains(&CommitField::Steps) {
                return Err(ConfigError::Invalid(format!(
                    "preset `{}` cannot include the `steps` field",
                    preset.name
                )));
            }
            if self.presets[..index].iter().any(|other| other.name == preset.name) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate preset `{}`",
                    preset.name
                )));
            }
        }
        Ok(())
    }

    /// Looks up a preset by exact name, suggesting the closest one on a miss.
    pub fn preset(&self, name: &str) -> Result<&StepPreset, ConfigError> {
        if let Some(preset) = self.presets.iter().find(|preset| preset.name == name) {
            return Ok(preset);
        }
        let wanted = name.to_lowercase();
        let suggestion = self
            .presets
            .iter()
            .map(|preset| (levenshtein(&preset.name.to_lowercase(), &wanted), preset))
            .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, preset)| format!(" (did you mean `{}`?)", preset.name))
            .unwrap_or_default();
        Err(ConfigError::Invalid(format!("unknown preset `{name}`{suggestion}")))
    }

    /// Adds a scope unless it is already known. Returns whether it was added.
    pub fn add_scope(&mut self, scope: &str) -> bool {
        let scope = scope.trim();
        if scope.is_empty() || self.scopes.iter().any(|existing| existing == scope) {
            return false;
        }
        self.scopes.push(scope.to_string());
        true
    }

    pub fn question(&self, field: CommitField) -> Option<&str> {
        self.questions.get(&field).map(String::as_str)
    }

    pub fn gitmojis(&self) -> &[Gitmoji] {
        self.gitmojis.as_deref().unwrap_or(DEFAULT_GITMOJIS.as_slice())
    }
}

/// Loads and saves [`ComposerConfig`] at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Manager for the per-user configuration file.
    pub fn new() -> Result<Self, ConfigError> {
        let base = dirs::config_dir().ok_or_else(|| {
            ConfigError::Invalid("unable to determine the user configuration directory".into())
        })?;
        Ok(Self::with_path(base.join(APP_DIR).join(CONFIG_FILE)))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads the configuration, falling back to defaults when the file does
    /// not exist yet.
    pub fn load(&self) -> Result<ComposerConfig, ConfigError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no configuration file, using defaults");
            return Ok(ComposerConfig::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: ComposerConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &ComposerConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        info!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<(), ConfigError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.write_all(b"\n")?;
    file.flush()?;
    Ok(())
}
