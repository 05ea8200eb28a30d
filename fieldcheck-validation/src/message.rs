// Error message templates

use std::fmt;

/// Named parameters available to a message template.
///
/// Every rule documents the names it supplies. `field_name` is always
/// present.
#[derive(Debug, Clone, Default)]
pub struct MessageParams {
    entries: Vec<(&'static str, String)>,
}

impl MessageParams {
    /// Start a parameter set for `field_name`.
    pub fn new(field_name: &str) -> Self {
        Self {
            entries: vec![("field_name", field_name.to_string())],
        }
    }

    /// Add a parameter, stringified through its `Display` form.
    pub fn with(mut self, name: &'static str, value: impl fmt::Display) -> Self {
        self.entries.push((name, value.to_string()));
        self
    }

    /// Look up a parameter. The latest entry with that name wins.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }
}

/// Render `template`, replacing every `{name}` with the matching parameter.
///
/// - unknown names render as an empty string
/// - `{{` and `}}` render as literal braces
/// - braces that do not enclose a plain identifier are copied through
///
/// ```
/// use fieldcheck_validation::{render, MessageParams};
///
/// let params = MessageParams::new("age").with("threshold", 18);
/// assert_eq!(
///     render("{field_name} should be greater then {threshold}{unit}", &params),
///     "age should be greater then 18"
/// );
/// ```
pub fn render(template: &str, params: &MessageParams) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(after) = tail.strip_prefix("{{") {
            out.push('{');
            rest = after;
        } else if let Some(after) = tail.strip_prefix("}}") {
            out.push('}');
            rest = after;
        } else if let Some(after) = tail.strip_prefix('}') {
            out.push('}');
            rest = after;
        } else {
            match placeholder_at(tail) {
                Some(name) => {
                    out.push_str(params.get(name).unwrap_or(""));
                    rest = &tail[name.len() + 2..];
                }
                None => {
                    out.push('{');
                    rest = &tail[1..];
                }
            }
        }
    }

    out.push_str(rest);
    out
}

/// Placeholder names referenced by `template`, in order of appearance.
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = template;

    while let Some(pos) = rest.find('{') {
        let tail = &rest[pos..];
        if let Some(after) = tail.strip_prefix("{{") {
            rest = after;
            continue;
        }
        match placeholder_at(tail) {
            Some(name) => {
                names.push(name);
                rest = &tail[name.len() + 2..];
            }
            None => rest = &tail[1..],
        }
    }

    names
}

// `tail` starts with '{'
fn placeholder_at(tail: &str) -> Option<&str> {
    let end = tail[1..].find('}')?;
    let name = &tail[1..1 + end];
    if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Some(name)
    } else {
        None
    }
}

/// Displays a list as `[a, b, c]`.
pub struct DisplayList<'a, T>(pub &'a [T]);

impl<T: fmt::Display> fmt::Display for DisplayList<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", item)?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_known_placeholders() {
        let params = MessageParams::new("username").with("min", 3).with("max", 20);
        assert_eq!(
            render("field {field_name} length must be between {min} and {max}", &params),
            "field username length must be between 3 and 20"
        );
    }

    #[test]
    fn test_missing_placeholder_renders_empty() {
        let params = MessageParams::new("x");
        assert_eq!(render("{field_name} [{nope}]", &params), "x []");
    }

    #[test]
    fn test_repeated_placeholder() {
        let params = MessageParams::new("a");
        assert_eq!(render("{field_name}{field_name}-{field_name}", &params), "aa-a");
    }

    #[test]
    fn test_escaped_and_stray_braces() {
        let params = MessageParams::new("f");
        assert_eq!(render("{{field_name}} {field_name}", &params), "{field_name} f");
        assert_eq!(render("\\d{4} {field_name}", &params), "\\d f");
        assert_eq!(render("open { brace", &params), "open { brace");
        assert_eq!(render("close } brace", &params), "close } brace");
        assert_eq!(render("{not a name}", &params), "{not a name}");
        assert_eq!(render("dangling {field_name", &params), "dangling {field_name");
    }

    #[test]
    fn test_non_string_params() {
        let params = MessageParams::new("f")
            .with("ratio", 2.5)
            .with("list", DisplayList(&["png", "jpg"]))
            .with("date", chrono::NaiveDate::from_ymd_opt(2024, 12, 12).unwrap());
        assert_eq!(
            render("{ratio} {list} {date}", &params),
            "2.5 [png, jpg] 2024-12-12"
        );
    }

    #[test]
    fn test_latest_param_wins() {
        let params = MessageParams::new("f").with("field_name", "g");
        assert_eq!(params.get("field_name"), Some("g"));
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(
            placeholders("{field_name} {{x}} must be {min} {bad name} {max"),
            vec!["field_name", "min"]
        );
    }
}
