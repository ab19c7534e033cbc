use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// One entry of the gitmoji catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gitmoji {
    pub emoji: String,
    pub code: String,
    pub description: String,
    pub name: String,
}

impl Gitmoji {
    fn new(emoji: &str, code: &str, description: &str, name: &str) -> Self {
        Self {
            emoji: emoji.to_string(),
            code: code.to_string(),
            description: description.to_string(),
            name: name.to_string(),
        }
    }
}

/// Built-in catalogue used when the configuration does not provide one.
pub static DEFAULT_GITMOJIS: Lazy<Vec<Gitmoji>> = Lazy::new(|| {
    vec![
        Gitmoji::new("🎨", ":art:", "Improve structure / format of the code.", "art"),
        Gitmoji::new("⚡️", ":zap:", "Improve performance.", "zap"),
        Gitmoji::new("🔥", ":fire:", "Remove code or files.", "fire"),
        Gitmoji::new("🐛", ":bug:", "Fix a bug.", "bug"),
        Gitmoji::new("🚑️", ":ambulance:", "Critical hotfix.", "ambulance"),
        Gitmoji::new("✨", ":sparkles:", "Introduce new features.", "sparkles"),
        Gitmoji::new("📝", ":memo:", "Add or update documentation.", "memo"),
        Gitmoji::new("🚀", ":rocket:", "Deploy stuff.", "rocket"),
        Gitmoji::new("💄", ":lipstick:", "Add or update the UI and style files.", "lipstick"),
        Gitmoji::new("🎉", ":tada:", "Begin a project.", "tada"),
        Gitmoji::new("✅", ":white_check_mark:", "Add, update, or pass tests.", "white-check-mark"),
        Gitmoji::new("🔒️", ":lock:", "Fix security or privacy issues.", "lock"),
        Gitmoji::new("🔖", ":bookmark:", "Release / Version tags.", "bookmark"),
        Gitmoji::new("🚨", ":rotating_light:", "Fix compiler / linter warnings.", "rotating-light"),
        Gitmoji::new("🚧", ":construction:", "Work in progress.", "construction"),
        Gitmoji::new("💚", ":green_heart:", "Fix CI Build.", "green-heart"),
        Gitmoji::new("⬇️", ":arrow_down:", "Downgrade dependencies.", "arrow-down"),
        Gitmoji::new("⬆️", ":arrow_up:", "Upgrade dependencies.", "arrow-up"),
        Gitmoji::new("👷", ":construction_worker:", "Add or update CI build system.", "construction-worker"),
        Gitmoji::new("♻️", ":recycle:", "Refactor code.", "recycle"),
        Gitmoji::new("➕", ":heavy_plus_sign:", "Add a dependency.", "heavy-plus-sign"),
        Gitmoji::new("➖", ":heavy_minus_sign:", "Remove a dependency.", "heavy-minus-sign"),
        Gitmoji::new("🔧", ":wrench:", "Add or update configuration files.", "wrench"),
        Gitmoji::new("🌐", ":globe_with_meridians:", "Internationalization and localization.", "globe-with-meridians"),
        Gitmoji::new("✏️", ":pencil2:", "Fix typos.", "pencil2"),
        Gitmoji::new("⏪️", ":rewind:", "Revert changes.", "rewind"),
        Gitmoji::new("📦️", ":package:", "Add or update compiled files or packages.", "package"),
        Gitmoji::new("🚚", ":truck:", "Move or rename resources.", "truck"),
        Gitmoji::new("💥", ":boom:", "Introduce breaking changes.", "boom"),
        Gitmoji::new("🏷️", ":label:", "Add or update types.", "label"),
        Gitmoji::new("🗃️", ":card_file_box:", "Perform database related changes.", "card-file-box"),
        Gitmoji::new("🧪", ":test_tube:", "Add a failing test.", "test-tube"),
    ]
});
