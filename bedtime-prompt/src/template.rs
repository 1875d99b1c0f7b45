use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

fn placeholder() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{\{\s*(\w+)\s*\}\}").expect("valid placeholder pattern"))
}

/// A text template with `{{name}}` placeholders.
///
/// Values are substituted in a single pass, so placeholder syntax inside a
/// value is left as is. Unknown placeholders render as empty text.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn render(&self, vars: &HashMap<&str, String>) -> String {
        placeholder()
            .replace_all(&self.template, |caps: &regex::Captures| {
                vars.get(&caps[1]).cloned().unwrap_or_default()
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_known_and_blanks_unknown_placeholders() {
        let template = PromptTemplate::new("Hi {{ name }}, {{missing}}bye");
        let vars = HashMap::from([("name", "Mia".to_string())]);
        assert_eq!(template.render(&vars), "Hi Mia, bye");
    }

    #[test]
    fn placeholders_inside_values_are_not_expanded() {
        let template = PromptTemplate::new("{{a}} {{b}}");
        let vars = HashMap::from([("a", "{{b}}".to_string()), ("b", "x".to_string())]);
        assert_eq!(template.render(&vars), "{{b}} x");
    }
}
