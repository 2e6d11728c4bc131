/// Query defaults for a [`Finder`](super::Finder).
#[derive(Debug, Clone)]
pub struct FinderConfig {
    /// Extension class files carry; also the default filter for `scan`.
    pub extension: String,
    /// Separator between the segments of a derived class name. Must be
    /// distinct from the platform path separator.
    pub namespace_separator: char,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            extension: ".php".to_string(),
            namespace_separator: '\\',
        }
    }
}
