use std::collections::HashMap;

/// Template processor for substituting variables in tool commands.
pub struct TemplateProcessor;

impl TemplateProcessor {
    /// Replace every `{{VAR}}` placeholder with its value.
    ///
    /// Unknown placeholders are left untouched. `$VAR` is not expanded, since
    /// commands are handed to a shell that owns that syntax.
    pub fn process(content: &str, vars: &HashMap<String, String>) -> String {
        let mut result = content.to_string();
        for (key, value) in vars {
            let placeholder = format!("{{{{{}}}}}", key);
            result = result.replace(&placeholder, value);
        }
        result
    }
}

/// Quote a path or word for inclusion in a shell command line.
///
/// Words made only of characters that are safe unquoted are returned as-is.
pub fn shell_quote(word: &str) -> String {
    let safe = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "/._-+:,@=%".contains(c));
    if safe {
        return word.to_string();
    }

    #[cfg(unix)]
    {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
    #[cfg(not(unix))]
    {
        format!("\"{}\"", word.replace('"', "\"\""))
    }
}
