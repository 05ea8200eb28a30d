// File name rules

use crate::{DisplayList, MessageParams, Rule, Value, render};

/// File name extension must be in the allow-list.
///
/// Only the name is inspected; the file system is never touched. The
/// extension is whatever follows the last `.`, compared case-insensitively.
/// A blank or null name passes, pair with [`NotBlank`](crate::NotBlank) to
/// require a file.
///
/// Placeholders: `field_name`, `value`, `allowed_extensions`.
#[derive(Debug, Clone)]
pub struct AllowedFile {
    extensions: Vec<String>,
    message: String,
}

impl AllowedFile {
    pub const DEFAULT_MESSAGE: &'static str = "{field_name} only accepts {allowed_extensions}";
    pub const DEFAULT_EXTENSIONS: [&'static str; 3] = ["png", "jpg", "jpeg"];

    pub fn new() -> Self {
        Self::with_extensions(Self::DEFAULT_EXTENSIONS)
    }

    /// Allow these extensions instead of the defaults. A leading `.` is
    /// ignored.
    pub fn with_extensions<I, T>(extensions: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .collect();
        Self {
            extensions,
            message: Self::DEFAULT_MESSAGE.to_string(),
        }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    fn allows(&self, file_name: &str) -> bool {
        match file_name.rsplit_once('.') {
            Some((_, ext)) => {
                let ext = ext.to_ascii_lowercase();
                self.extensions.iter().any(|allowed| *allowed == ext)
            }
            None => false,
        }
    }
}

impl Default for AllowedFile {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for AllowedFile {
    fn validate(&self, value: &Value, field_name: &str) -> Option<String> {
        let file_name = value.as_text()?;
        if file_name.trim().is_empty() || self.allows(&file_name) {
            return None;
        }
        let params = MessageParams::new(field_name)
            .with("value", &file_name)
            .with("allowed_extensions", DisplayList(&self.extensions));
        Some(render(&self.message, &params))
    }

    fn name(&self) -> &'static str {
        "allowed_file"
    }

    fn placeholders(&self) -> &'static [&'static str] {
        &["field_name", "value", "allowed_extensions"]
    }
}

message_template!(AllowedFile);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_extensions() {
        let rule = AllowedFile::new();
        assert_eq!(rule.validate(&Value::from("a.png"), "file"), None);
        assert_eq!(rule.validate(&Value::from("photo.final.JPEG"), "file"), None);
        assert_eq!(
            rule.validate(&Value::from("a.docx"), "file"),
            Some("file only accepts [png, jpg, jpeg]".to_string())
        );
        assert!(rule.validate(&Value::from("png"), "file").is_some());
    }

    #[test]
    fn test_blank_passes() {
        let rule = AllowedFile::new();
        assert_eq!(rule.validate(&Value::from(""), "file"), None);
        assert_eq!(rule.validate(&Value::from("  "), "file"), None);
        assert_eq!(rule.validate(&Value::Null, "file"), None);
    }

    #[test]
    fn test_custom_extensions() {
        let rule = AllowedFile::with_extensions([".PDF", "txt"]).with_message("{value} rejected");
        assert_eq!(rule.extensions(), &["pdf".to_string(), "txt".to_string()]);
        assert_eq!(rule.validate(&Value::from("report.pdf"), "file"), None);
        assert_eq!(
            rule.validate(&Value::from("a.png"), "file"),
            Some("a.png rejected".to_string())
        );
    }
}
