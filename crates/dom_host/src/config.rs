/// Construction-time options for a [`DomHost`](crate::DomHost).
#[derive(Clone, Debug)]
pub struct DomHostConfig {
    /// Track ancestor tags in host contexts and report illegal nesting.
    ///
    /// Advisories are logged only; they never change what gets committed.
    pub validate_nesting: bool,
    /// Whether this renderer owns the document (as opposed to rendering
    /// alongside another renderer that does).
    pub is_primary_renderer: bool,
}

impl DomHostConfig {
    /// Configuration for development builds: nesting validation on.
    pub fn development() -> Self {
        Self {
            validate_nesting: true,
            ..Self::default()
        }
    }
}

impl Default for DomHostConfig {
    fn default() -> Self {
        Self {
            validate_nesting: false,
            is_primary_renderer: true,
        }
    }
}
