//! Configurable method classification.

use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::verb::Verb;

static DEFAULT_RULES: LazyLock<Arc<CacheRules>> =
    LazyLock::new(|| Arc::new(CacheRules::default()));

/// Method classification used by cache-aware requests.
///
/// The defaults follow RFC 7234: only `GET` and `HEAD` responses may be
/// served from cache, and the unsafe methods `POST`, `PUT`, `DELETE` and
/// `PATCH` invalidate the target resource.
///
/// Rules can be loaded from YAML; omitted fields keep their defaults.
///
/// ```
/// use revalidate_core::{CacheRules, Verb};
///
/// let rules = CacheRules::from_yaml("cacheable_methods: [GET, HEAD, OPTIONS]").unwrap();
/// assert!(rules.is_cacheable_method(&Verb::Options));
/// assert!(rules.is_invalidating_method(&Verb::Post));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CacheRules {
    /// Methods whose responses may be served from cache.
    pub cacheable_methods: Vec<Verb>,
    /// Methods that invalidate cached entries of their target.
    pub invalidating_methods: Vec<Verb>,
    /// `max-age` sent when a conditional request must reach the origin.
    pub revalidation_max_age: u32,
}

impl Default for CacheRules {
    fn default() -> Self {
        Self {
            cacheable_methods: vec![Verb::Get, Verb::Head],
            invalidating_methods: vec![Verb::Post, Verb::Put, Verb::Delete, Verb::Patch],
            revalidation_max_age: 0,
        }
    }
}

impl CacheRules {
    /// Shared instance of the default rules.
    pub fn shared_default() -> Arc<CacheRules> {
        Arc::clone(&DEFAULT_RULES)
    }

    /// Deserializes rules from a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        Ok(serde_saphyr::from_str(yaml)?)
    }

    /// `verb` may be served from cache.
    pub fn is_cacheable_method(&self, verb: &Verb) -> bool {
        self.cacheable_methods.contains(verb)
    }

    /// `verb` invalidates cached state.
    pub fn is_invalidating_method(&self, verb: &Verb) -> bool {
        self.invalidating_methods.contains(verb)
    }
}
