use regex::Regex;

/// Whole-message template with `{name}` placeholders.
///
/// Literal text matches regardless of case. Each placeholder captures one
/// or more characters, as few as the rest of the template allows, and the
/// template must cover the entire message.
#[derive(Debug, Clone)]
pub struct Template {
    source: &'static str,
    regex: Regex,
}

impl Template {
    pub fn compile(source: &'static str) -> Result<Self, String> {
        let mut pattern = String::from(r"\A(?is:");
        let mut rest = source;

        while let Some(open) = rest.find('{') {
            let close = rest[open..]
                .find('}')
                .map(|offset| open + offset)
                .ok_or_else(|| format!("Unclosed placeholder in template: {}", source))?;

            let name = &rest[open + 1..close];
            if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(format!("Invalid placeholder '{{{}}}' in template: {}", name, source));
            }

            pattern.push_str(&regex::escape(&rest[..open]));
            pattern.push_str(&format!("(?P<{}>.+?)", name));
            rest = &rest[close + 1..];
        }
        pattern.push_str(&regex::escape(rest));
        pattern.push_str(r")\z");

        let regex = Regex::new(&pattern)
            .map_err(|e| format!("Invalid template {}: {}", source, e))?;

        Ok(Self { source, regex })
    }

    pub fn source(&self) -> &'static str {
        self.source
    }

    /// Match the whole text, returning the captured placeholders
    pub fn parse<'t>(&self, text: &'t str) -> Option<Fields<'t>> {
        self.regex.captures(text).map(|captures| Fields { captures })
    }
}

/// Placeholder values of one successful match
pub struct Fields<'t> {
    captures: regex::Captures<'t>,
}

impl<'t> Fields<'t> {
    pub fn get(&self, name: &str) -> Option<&'t str> {
        self.captures.name(name).map(|m| m.as_str())
    }

    /// Number of placeholders (group 0 is the whole match)
    pub fn len(&self) -> usize {
        self.captures.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
