//! Assembly of the final commit message from the wizard's answers.

use crate::commit::fields::CommitField;
use crate::inquiry::record::AnswerRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageOptions {
    /// Keyword prefixing the breaking-change line.
    pub breaking_keyword: String,
    /// Branch appended as a trailer line, when known and enabled.
    pub branch: Option<String>,
}

impl Default for MessageOptions {
    fn default() -> Self {
        Self {
            breaking_keyword: "BREAKING CHANGE".to_string(),
            branch: None,
        }
    }
}

/// Builds the commit message, or `None` when nothing beyond the preset
/// choice was collected.
pub fn compose_message(record: &AnswerRecord<CommitField>, options: &MessageOptions) -> Option<String> {
    if record.len() <= 1 {
        return None;
    }
    let field = |key: CommitField| record.get(&key).map(|answer| answer.to_string()).unwrap_or_default();

    let mut message = match field(CommitField::Header) {
        header if !header.trim().is_empty() => header,
        _ => compose_header(
            &field(CommitField::Type),
            &field(CommitField::Scope),
            &field(CommitField::Gitmoji),
            &field(CommitField::Subject),
        ),
    };

    let body = field(CommitField::Body);
    if !body.trim().is_empty() {
        message.push_str("\n\n");
        message.push_str(&body);
    }

    let footer = compose_footer(
        &field(CommitField::Footer),
        &field(CommitField::Breaking),
        &field(CommitField::Issues),
        &options.breaking_keyword,
    );
    if let Some(footer) = footer {
        message.push_str("\n\n");
        message.push_str(&footer);
    }

    if let Some(branch) = options.branch.as_deref().filter(|name| !name.is_empty()) {
        message.push_str("\nBranch: ");
        message.push_str(branch);
    }
    Some(message)
}

/// `type(scope): gitmoji subject`; the parentheses and the gitmoji are
/// left out when empty.
pub fn compose_header(kind: &str, scope: &str, gitmoji: &str, subject: &str) -> String {
    let mut header = kind.to_string();
    if !scope.is_empty() {
        header.push('(');
        header.push_str(scope);
        header.push(')');
    }
    header.push_str(": ");
    if !gitmoji.is_empty() {
        header.push_str(gitmoji);
        header.push(' ');
    }
    header.push_str(subject);
    header
}

fn compose_footer(footer: &str, breaking: &str, issues: &str, keyword: &str) -> Option<String> {
    if !footer.trim().is_empty() {
        return Some(footer.to_string());
    }
    let mut lines = Vec::new();
    if !breaking.trim().is_empty() {
        lines.push(format!("{keyword}: {breaking}"));
    }
    if !issues.trim().is_empty() {
        let verb = if issues.contains(',') { "Closes" } else { "Close" };
        lines.push(format!("{verb} {issues}"));
    }
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inquiry::record::Answer;

    fn record(entries: &[(CommitField, &str)]) -> AnswerRecord<CommitField> {
        std::iter::once((CommitField::Steps, Answer::from("Full")))
            .chain(entries.iter().map(|(field, value)| (*field, Answer::from(*value))))
            .collect()
    }

    #[test]
    fn preset_choice_alone_composes_nothing() {
        assert_eq!(compose_message(&record(&[]), &MessageOptions::default()), None);
    }

    #[test]
    fn header_is_assembled_from_parts() {
        let answers = record(&[
            (CommitField::Type, "feat"),
            (CommitField::Scope, "parser"),
            (CommitField::Gitmoji, "✨"),
            (CommitField::Subject, "support nested lists"),
        ]);
        assert_eq!(
            compose_message(&answers, &MessageOptions::default()).unwrap(),
            "feat(parser): ✨ support nested lists"
        );
    }

    #[test]
    fn empty_scope_drops_parentheses() {
        let answers = record(&[
            (CommitField::Type, "fix"),
            (CommitField::Scope, ""),
            (CommitField::Subject, "handle eof"),
        ]);
        assert_eq!(
            compose_message(&answers, &MessageOptions::default()).unwrap(),
            "fix: handle eof"
        );
    }

    #[test]
    fn explicit_header_and_footer_win() {
        let answers = record(&[
            (CommitField::Header, "chore: release 1.2.0"),
            (CommitField::Type, "feat"),
            (CommitField::Footer, "Reviewed-by: Z"),
            (CommitField::Issues, "#9"),
        ]);
        assert_eq!(
            compose_message(&answers, &MessageOptions::default()).unwrap(),
            "chore: release 1.2.0\n\nReviewed-by: Z"
        );
    }

    #[test]
    fn breaking_and_issue_lines_follow_body() {
        let answers = record(&[
            (CommitField::Type, "feat"),
            (CommitField::Subject, "drop v1 api"),
            (CommitField::Body, "The v1 endpoints are gone."),
            (CommitField::Breaking, "v1 removed"),
            (CommitField::Issues, "#12, #14"),
        ]);
        let options = MessageOptions {
            breaking_keyword: "BREAKING CHANGE".into(),
            branch: Some("main".into()),
        };
        assert_eq!(
            compose_message(&answers, &options).unwrap(),
            "feat: drop v1 api\n\nThe v1 endpoints are gone.\n\nBREAKING CHANGE: v1 removed\nCloses #12, #14\nBranch: main"
        );
    }

    #[test]
    fn single_issue_uses_close() {
        let answers = record(&[(CommitField::Type, "fix"), (CommitField::Subject, "x"), (CommitField::Issues, "#3")]);
        assert_eq!(
            compose_message(&answers, &MessageOptions::default()).unwrap(),
            "fix: x\n\nClose #3"
        );
    }
}
