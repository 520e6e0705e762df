/// Append-only list of user-visible error messages.
///
/// Entries keep arrival order and are never removed or deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorLog {
    entries: Vec<String>,
}

impl ErrorLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.entries.push(message.into());
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ErrorLog {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
