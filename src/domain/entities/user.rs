use std::fmt;

/// A row of the `users` relation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl User {
    #[cfg(test)]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            email: None,
        }
    }

    #[cfg(test)]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[cfg(test)]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Name if non-empty, else email if non-empty.
    ///
    /// Whitespace-only values count as present; only the empty string is skipped.
    pub fn display_name(&self) -> Option<&str> {
        match (self.name.as_deref(), self.email.as_deref()) {
            (Some(name), _) if !name.is_empty() => Some(name),
            (_, Some(email)) if !email.is_empty() => Some(email),
            _ => None,
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name().unwrap_or(&self.id))
    }
}
