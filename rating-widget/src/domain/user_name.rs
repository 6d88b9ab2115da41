use std::fmt;

/// A user name accepted by the history endpoint: one or more ASCII letters,
/// digits or underscores.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    pub fn parse(s: String) -> Result<Self, String> {
        if s.is_empty() {
            Err("User name is empty.".to_string())
        } else if let Some(c) = s.chars().find(|&c| !is_allowed_character(c)) {
            Err(format!("User name {:?} contains forbidden character {:?}.", s, c))
        } else {
            Ok(Self(s))
        }
    }
}

fn is_allowed_character(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
