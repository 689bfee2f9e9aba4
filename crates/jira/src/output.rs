//! Output formatting helpers for the `jira` CLI.

use std::io::{self, Write};

use jira_core::issue::Issue;
use jira_ui::styles;
use serde::Serialize;

/// Print a value as pretty JSON on stdout.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Render an issue as the multi-line text `jira issue view` prints.
pub fn format_issue_detail(issue: &Issue) -> String {
    let fields = &issue.fields;
    let mut out = String::new();

    let status = fields
        .status
        .as_ref()
        .map(|s| styles::render_status(&s.name))
        .unwrap_or_default();
    out.push_str(&format!(
        "{} {}  [{}]\n",
        styles::render_key(&issue.key),
        styles::render_bold(&fields.summary),
        status
    ));

    let mut line = |label: &str, value: &str| {
        if !value.is_empty() {
            out.push_str(&format!("{} {}\n", styles::render_muted(&format!("{label:<10}")), value));
        }
    };
    line("Type:", &fields.issue_type.name);
    line(
        "Priority:",
        fields.priority.as_ref().map_or("", |p| p.name.as_str()),
    );
    line(
        "Assignee:",
        &fields
            .assignee
            .as_ref()
            .map(|u| u.full_name())
            .unwrap_or_default(),
    );
    line(
        "Reporter:",
        &fields
            .reporter
            .as_ref()
            .map(|u| u.full_name())
            .unwrap_or_default(),
    );
    line("Labels:", &fields.labels.join(", "));
    line(
        "Components:",
        &fields
            .components
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    );
    line(
        "Created:",
        &fields
            .created_at()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default(),
    );
    line(
        "Updated:",
        &fields
            .updated_at()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default(),
    );

    if let Some(description) = fields.description.as_deref().filter(|d| !d.trim().is_empty()) {
        out.push('\n');
        out.push_str(description.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use jira_core::issue::{IssueFields, Named};

    #[test]
    fn detail_lists_set_fields_only() {
        // Test output is not a TTY, so no color codes are emitted.
        let issue = Issue {
            key: "PROJ-7".into(),
            fields: IssueFields {
                summary: "Crash on save".into(),
                issue_type: Named::new("Bug"),
                status: Some(Named::new("Open")),
                labels: vec!["regression".into(), "triage".into()],
                description: Some("Steps:\n1. save\n".into()),
                created: Some("2024-03-01T09:30:00.000+0000".into()),
                ..IssueFields::default()
            },
            ..Issue::default()
        };

        let text = format_issue_detail(&issue);
        assert!(text.starts_with("PROJ-7 Crash on save  [Open]\n"));
        assert!(text.contains("Labels:    regression, triage\n"));
        assert!(text.contains("Created:   2024-03-01 09:30\n"));
        assert!(!text.contains("Priority:"));
        assert!(text.ends_with("Steps:\n1. save\n"));
    }
}
