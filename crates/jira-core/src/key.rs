//! Issue key normalisation.

/// Normalise a user-supplied issue reference into a full issue key.
///
/// A bare number is prefixed with the project key (`42` -> `PROJ-42`);
/// anything else is upper-cased. Without a project the input is returned
/// unchanged.
pub fn issue_key(project: &str, input: &str) -> String {
    let input = input.trim();
    if project.is_empty() {
        return input.to_string();
    }
    if !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit()) {
        return format!("{}-{}", project, input);
    }
    input.to_uppercase()
}

/// Returns the project part of an issue key (`PROJ-42` -> `PROJ`).
pub fn project_of(key: &str) -> Option<&str> {
    let (project, number) = key.rsplit_once('-')?;
    if project.is_empty() || number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(project)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_input_gets_project_prefix() {
        assert_eq!(issue_key("PROJ", "42"), "PROJ-42");
    }

    #[test]
    fn key_input_is_uppercased() {
        assert_eq!(issue_key("PROJ", "other-7"), "OTHER-7");
    }

    #[test]
    fn no_project_leaves_input_alone() {
        assert_eq!(issue_key("", "42"), "42");
    }

    #[test]
    fn project_of_valid_and_invalid_keys() {
        assert_eq!(project_of("PROJ-42"), Some("PROJ"));
        assert_eq!(project_of("MY-PROJ-1"), Some("MY-PROJ"));
        assert_eq!(project_of("PROJ-"), None);
        assert_eq!(project_of("PROJ"), None);
        assert_eq!(project_of("-1"), None);
    }
}
