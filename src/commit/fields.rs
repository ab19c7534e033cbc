use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Keys of the commit wizard's answer record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitField {
    /// Name of the preset chosen in the first step.
    Steps,
    Header,
    Type,
    Scope,
    Gitmoji,
    Subject,
    Body,
    Footer,
    Breaking,
    Issues,
}

impl CommitField {
    /// Message fields in the order their steps run.
    pub const MESSAGE: [CommitField; 9] = [
        CommitField::Header,
        CommitField::Type,
        CommitField::Scope,
        CommitField::Gitmoji,
        CommitField::Subject,
        CommitField::Body,
        CommitField::Footer,
        CommitField::Breaking,
        CommitField::Issues,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommitField::Steps => "steps",
            CommitField::Header => "header",
            CommitField::Type => "type",
            CommitField::Scope => "scope",
            CommitField::Gitmoji => "gitmoji",
            CommitField::Subject => "subject",
            CommitField::Body => "body",
            CommitField::Footer => "footer",
            CommitField::Breaking => "breaking",
            CommitField::Issues => "issues",
        }
    }

    /// Whether the field is collected with a free-text prompt.
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            CommitField::Header
                | CommitField::Subject
                | CommitField::Body
                | CommitField::Footer
                | CommitField::Breaking
                | CommitField::Issues
        )
    }
}

impl fmt::Display for CommitField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommitField {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let needle = raw.trim().to_ascii_lowercase();
        std::iter::once(CommitField::Steps)
            .chain(CommitField::MESSAGE)
            .find(|field| field.as_str() == needle)
            .ok_or_else(|| format!("unknown commit field `{raw}`"))
    }
}
