//! Mapping options

/// Options for a mapping run
#[derive(Debug, Clone)]
pub struct MapOptions {
    /// Fall back to case-insensitive field name matching (default: true)
    pub case_insensitive_names: bool,
    /// Maximum record nesting depth; `None` recurses without bound (default: None)
    pub max_depth: Option<usize>,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            case_insensitive_names: true,
            max_depth: None,
        }
    }
}

impl MapOptions {
    /// Set the recursion guard
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Require exact field names
    pub fn exact_names(mut self) -> Self {
        self.case_insensitive_names = false;
        self
    }
}
