use crate::error::GenerateError;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

/// Slugs with a generation in flight. The output directory and archive
/// path are derived from the slug, so at most one run may own a slug.
#[derive(Debug, Clone, Default)]
pub struct SlugLocks {
    inflight: Arc<Mutex<HashSet<String>>>,
}

impl SlugLocks {
    /// Claim `slug`, or fail with `SlugBusy` if another run holds it.
    pub fn acquire(&self, slug: &str) -> Result<SlugGuard, GenerateError> {
        let mut inflight = self.inflight.lock();
        if !inflight.insert(slug.to_string()) {
            return Err(GenerateError::SlugBusy(slug.to_string()));
        }
        Ok(SlugGuard {
            inflight: Arc::clone(&self.inflight),
            slug: slug.to_string(),
        })
    }

    #[cfg(test)]
    pub fn is_held(&self, slug: &str) -> bool {
        self.inflight.lock().contains(slug)
    }
}

/// Releases its slug on drop, whether the run succeeded or not.
#[derive(Debug)]
pub struct SlugGuard {
    inflight: Arc<Mutex<HashSet<String>>>,
    slug: String,
}

impl Drop for SlugGuard {
    fn drop(&mut self) {
        self.inflight.lock().remove(&self.slug);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_slug_is_exclusive_until_released() {
        let locks = SlugLocks::default();
        let guard = locks.acquire("demo").unwrap();
        assert!(locks.is_held("demo"));
        assert!(matches!(locks.acquire("demo"), Err(GenerateError::SlugBusy(s)) if s == "demo"));

        drop(guard);
        assert!(!locks.is_held("demo"));
        assert!(locks.acquire("demo").is_ok());
    }

    #[test]
    fn different_slugs_are_independent() {
        let locks = SlugLocks::default();
        let _a = locks.acquire("a").unwrap();
        let _b = locks.clone().acquire("b").unwrap();
        assert!(locks.is_held("a") && locks.is_held("b"));
    }
}
