//! JQL builders for the derived searches.

/// Quote a JQL string value, escaping backslashes and double quotes.
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Sub-tasks of an issue.
pub fn subtasks_of(issue_key: &str) -> String {
    format!("parent={}", quote(issue_key))
}

/// Issues of a project with the given fix version.
pub fn project_version(project_key: &str, version_name: &str) -> String {
    format!(
        "project={} AND fixVersion={}",
        quote(project_key),
        quote(version_name)
    )
}

/// Issues linked to an epic.
pub fn epic_link(epic_key: &str) -> String {
    format!("\"Epic Link\" = {}", quote(epic_key))
}

/// All epics of a project.
pub fn project_epics(project: &str) -> String {
    format!("project = {} AND type = Epic", quote(project))
}

/// The epic of a project with the given epic name.
pub fn project_epic(project: &str, epic_name: &str) -> String {
    format!(
        "{} AND \"Epic Name\" = {}",
        project_epics(project),
        quote(epic_name)
    )
}

/// Issues in a sprint.
pub fn sprint(sprint_id: u64) -> String {
    format!("Sprint = {}", sprint_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_plain() {
        assert_eq!(quote("ABC-1"), "\"ABC-1\"");
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote(r#"say "hi""#), r#""say \"hi\"""#);
        assert_eq!(quote(r"a\b"), r#""a\\b""#);
    }

    #[test]
    fn test_subtasks_of() {
        assert_eq!(subtasks_of("ABC-1"), "parent=\"ABC-1\"");
    }

    #[test]
    fn test_project_version() {
        assert_eq!(
            project_version("ABC", "1.0 beta"),
            "project=\"ABC\" AND fixVersion=\"1.0 beta\""
        );
    }

    #[test]
    fn test_epic_link() {
        assert_eq!(epic_link("ABC-7"), "\"Epic Link\" = \"ABC-7\"");
    }

    #[test]
    fn test_project_epics() {
        assert_eq!(
            project_epics("Apollo"),
            "project = \"Apollo\" AND type = Epic"
        );
    }

    #[test]
    fn test_project_epic() {
        assert_eq!(
            project_epic("Apollo", "Launch"),
            "project = \"Apollo\" AND type = Epic AND \"Epic Name\" = \"Launch\""
        );
    }

    #[test]
    fn test_project_epic_escapes_name() {
        assert_eq!(
            project_epic("Apollo", "The \"big\" one"),
            "project = \"Apollo\" AND type = Epic AND \"Epic Name\" = \"The \\\"big\\\" one\""
        );
    }

    #[test]
    fn test_sprint() {
        assert_eq!(sprint(42), "Sprint = 42");
    }
}
