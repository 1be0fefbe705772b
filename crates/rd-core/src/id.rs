//! Component identifiers.
//!
//! Ids are unique across a whole template, not just within a page. They
//! are interned once and passed around as a 4-byte handle; the string form
//! only appears in stored templates and in `data-component-id`.

use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

static IDS: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);
static NEXT_GENERATED: AtomicU64 = AtomicU64::new(1);

/// Prefix of ids minted by [`ComponentId::generate`].
pub const GENERATED_PREFIX: &str = "comp_";

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId(Spur);

impl ComponentId {
    /// The id spelled `s`. Equal strings give equal ids.
    pub fn intern(s: &str) -> Self {
        Self(IDS.get_or_intern(s))
    }

    pub fn as_str(&self) -> &str {
        IDS.resolve(&self.0)
    }

    /// A new `comp_<n>` id. Unique per process only; ids loaded from a
    /// stored template can still collide (see `Scene::fresh_id`).
    pub fn generate() -> Self {
        let n = NEXT_GENERATED.fetch_add(1, Ordering::Relaxed);
        Self::intern(&format!("{GENERATED_PREFIX}{n}"))
    }
}

impl fmt::Debug for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ComponentId").field(&self.as_str()).finish()
    }
}

/// The stored spelling, suitable for markup attributes.
impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ComponentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_str().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ComponentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(|s| Self::intern(&s))
    }
}
