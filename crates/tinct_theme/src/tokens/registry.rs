//! Editable token registry

/// Version of [`DEFAULT_TOKENS`]; bump when the list changes
pub const REGISTRY_VERSION: u32 = 1;

/// Token names the editor exposes by default
pub const DEFAULT_TOKENS: &[&str] = &[
    // Surfaces
    "--background",
    "--foreground",
    "--card",
    "--card-foreground",
    "--popover",
    "--popover-foreground",
    // Brand
    "--primary",
    "--primary-foreground",
    "--secondary",
    "--secondary-foreground",
    "--muted",
    "--muted-foreground",
    "--accent",
    "--accent-foreground",
    "--destructive",
    "--destructive-foreground",
    // Lines and focus
    "--border",
    "--input",
    "--ring",
    // Charts
    "--chart-1",
    "--chart-2",
    "--chart-3",
    "--chart-4",
    "--chart-5",
    // Sidebar
    "--sidebar",
    "--sidebar-foreground",
    "--sidebar-primary",
    "--sidebar-primary-foreground",
    "--sidebar-accent",
    "--sidebar-accent-foreground",
    "--sidebar-border",
    "--sidebar-ring",
    // Shape and type
    "--radius",
    "--font-sans",
    "--font-mono",
];

/// A versioned, ordered list of editable token names
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenRegistry {
    version: u32,
    names: Vec<String>,
}

impl TokenRegistry {
    pub fn new(version: u32, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut out: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if !out.contains(&name) {
                out.push(name);
            }
        }
        Self {
            version,
            names: out,
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for TokenRegistry {
    fn default() -> Self {
        Self::new(REGISTRY_VERSION, DEFAULT_TOKENS.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_is_versioned_and_unique() {
        let registry = TokenRegistry::default();
        assert_eq!(registry.version(), REGISTRY_VERSION);
        assert_eq!(registry.len(), DEFAULT_TOKENS.len());
        assert!(registry.contains("--primary"));
        assert!(!registry.contains("primary"));
        assert!(registry.iter().all(|name| name.starts_with("--")));
    }

    #[test]
    fn duplicates_are_dropped_in_order() {
        let registry = TokenRegistry::new(7, ["--a", "--b", "--a"]);
        assert_eq!(registry.names(), ["--a", "--b"]);
    }
}
