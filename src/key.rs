//! Work item keys and tenant derivation.
//!
//! Items are `"<namespace>/<name>"` strings in practice. The namespace is the
//! tenant; an unqualified key (`"name"`) belongs to the default tenant `""`.

use crate::error::{Error, Result};
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

/// Split a `"<namespace>/<name>"` key into `(tenant, name)`.
///
/// A key without a separator belongs to the default (empty) tenant. More
/// than one separator is rejected.
pub fn split_tenant_key(key: &str) -> Result<(&str, &str)> {
    let mut parts = key.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(name), None, _) => Ok(("", name)),
        (Some(namespace), Some(name), None) => Ok((namespace, name)),
        _ => Err(Error::InvalidKey {
            key: key.to_string(),
            reason: "unexpected key format",
        }),
    }
}

/// Something that can be queued in a [`FairQueue`](crate::queue::FairQueue).
///
/// Items double as set keys for deduplication, hence `Eq + Hash`.
pub trait QueueItem: Clone + Eq + Hash + fmt::Debug {
    /// The tenant this item is scheduled under.
    fn tenant(&self) -> Result<&str>;
}

impl QueueItem for String {
    fn tenant(&self) -> Result<&str> {
        split_tenant_key(self).map(|(tenant, _)| tenant)
    }
}

impl QueueItem for &str {
    fn tenant(&self) -> Result<&str> {
        split_tenant_key(self).map(|(tenant, _)| tenant)
    }
}

/// A namespace/name pair.
///
/// The fields are public, so a separator can still sneak into either part;
/// such a key has no tenant, exactly like its string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectKey {
    pub namespace: String,
    pub name: String,
}

impl ObjectKey {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl FromStr for ObjectKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (namespace, name) = split_tenant_key(s)?;
        Ok(Self::new(namespace, name))
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}/{}", self.namespace, self.name)
        }
    }
}

impl QueueItem for ObjectKey {
    fn tenant(&self) -> Result<&str> {
        if self.namespace.contains('/') || self.name.contains('/') {
            return Err(Error::InvalidKey {
                key: self.to_string(),
                reason: "unexpected key format",
            });
        }
        Ok(&self.namespace)
    }
}
