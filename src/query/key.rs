use std::{collections::BTreeMap, fmt};

/// Identifies one cached resource: a namespace plus its request parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey {
    pub namespace: String,
    pub params: BTreeMap<String, String>,
}

impl QueryKey {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(name.into(), value.to_string());
        self
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.namespace)?;
        for (i, (name, value)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", sep, name, value)?;
        }
        Ok(())
    }
}

/// Selects the entries an invalidation applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyPattern {
    /// Every key in the namespace, whatever its parameters.
    Namespace(String),
    Exact(QueryKey),
}

impl KeyPattern {
    pub fn namespace(namespace: impl Into<String>) -> Self {
        Self::Namespace(namespace.into())
    }

    pub fn matches(&self, key: &QueryKey) -> bool {
        match self {
            Self::Namespace(namespace) => key.namespace == *namespace,
            Self::Exact(exact) => key == exact,
        }
    }

    /// Whether the pattern can match any key of `namespace`.
    pub fn touches_namespace(&self, namespace: &str) -> bool {
        match self {
            Self::Namespace(pattern) => pattern == namespace,
            Self::Exact(key) => key.namespace == namespace,
        }
    }
}

impl fmt::Display for KeyPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Namespace(namespace) => write!(f, "{}/*", namespace),
            Self::Exact(key) => write!(f, "{}", key),
        }
    }
}
