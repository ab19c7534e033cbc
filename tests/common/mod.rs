#![allow(dead_code)]

use commit_inquiry::{
    cli::ui::test_mode::{parse_script, ScriptedHost},
    config::{ComposerConfig, ConfigManager},
};
use tempfile::TempDir;

/// Config manager writing into a fresh temporary directory. Keep the
/// `TempDir` alive for the duration of the test.
pub fn temp_manager() -> (TempDir, ConfigManager) {
    let temp = TempDir::new().expect("create temp dir");
    let manager = ConfigManager::with_path(temp.path().join("config.json"));
    (temp, manager)
}

/// Same as [`temp_manager`] with `config` already saved.
pub fn manager_with(config: &ComposerConfig) -> (TempDir, ConfigManager) {
    let (temp, manager) = temp_manager();
    manager.save(config).expect("save config");
    (temp, manager)
}

/// Host replaying a script in the `COMMIT_INQUIRY_TEST_EVENTS` syntax.
pub fn scripted(script: &str) -> ScriptedHost {
    ScriptedHost::new(parse_script(script).expect("valid script"))
}
