//! Small string and identifier helpers shared by the web layer.

use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Suffix appended by [`truncate`].
pub const DEFAULT_TRUNCATE_SUFFIX: &str = "...";

/// Parse a canonical UUID string, returning `None` if it is not one.
pub fn to_uuid(value: &str) -> Option<Uuid> {
    Uuid::parse_str(value).ok()
}

/// Truncate `value` to `length` characters without splitting a word,
/// appending `...` when anything was cut.
pub fn truncate(value: &str, length: usize) -> String {
    truncate_with(value, length, DEFAULT_TRUNCATE_SUFFIX)
}

/// Like [`truncate`] with a custom suffix.
///
/// Lengths count characters. When the cut lands inside a word the partial
/// word is dropped; a value with no whitespace before such a cut becomes
/// just the suffix.
pub fn truncate_with(value: &str, length: usize, suffix: &str) -> String {
    let cut = match value.char_indices().nth(length) {
        Some((idx, _)) => idx,
        None => return value.to_string(),
    };

    let head = &value[..cut];
    let at_boundary = value[cut..].chars().next().is_some_and(char::is_whitespace);
    let kept = if at_boundary {
        head
    } else {
        match head.rfind(char::is_whitespace) {
            Some(idx) => &head[..idx],
            None => "",
        }
    };

    format!("{}{}", kept.trim_end(), suffix)
}

/// Context-bound reference to a value that is only available while some
/// context (a request, a task) is active.
pub struct Proxy<T> {
    resolver: Arc<dyn Fn() -> Option<T> + Send + Sync>,
}

impl<T> Proxy<T> {
    pub fn new<F>(resolver: F) -> Self
    where
        F: Fn() -> Option<T> + Send + Sync + 'static,
    {
        Self {
            resolver: Arc::new(resolver),
        }
    }

    /// The real object behind the proxy, if its context is bound.
    pub fn current_object(&self) -> Option<T> {
        (self.resolver)()
    }
}

impl<T> Clone for Proxy<T> {
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
        }
    }
}

impl<T> fmt::Debug for Proxy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proxy").finish_non_exhaustive()
    }
}

/// Either a concrete value or a [`Proxy`] to one.
#[derive(Debug, Clone)]
pub enum Handle<T> {
    Concrete(T),
    Proxied(Proxy<T>),
}

impl<T> Handle<T> {
    pub fn concrete(self) -> Option<T> {
        match self {
            Handle::Concrete(value) => Some(value),
            Handle::Proxied(_) => None,
        }
    }
}

/// Replace a proxy with the real object it currently points at.
///
/// Concrete values, and proxies whose context is not bound, are returned
/// unchanged.
pub fn deproxy<T>(handle: Handle<T>) -> Handle<T> {
    match handle {
        Handle::Proxied(proxy) => match proxy.current_object() {
            Some(value) => Handle::Concrete(value),
            None => Handle::Proxied(proxy),
        },
        concrete => concrete,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_to_uuid() {
        let parsed = to_uuid("123e4567-e89b-12d3-a456-426614174000").unwrap();
        assert_eq!(parsed.to_string(), "123e4567-e89b-12d3-a456-426614174000");

        let id = Uuid::new_v4();
        assert_eq!(to_uuid(&id.to_string()), Some(id));
    }

    #[test]
    fn test_to_uuid_rejects_malformed() {
        assert_eq!(to_uuid("not-a-uuid"), None);
        assert_eq!(to_uuid(""), None);
        assert_eq!(to_uuid("123e4567-e89b-12d3-a456-42661417400"), None);
    }

    #[test]
    fn test_truncate_backs_off_to_word() {
        assert_eq!(truncate_with("the quick brown fox", 12, "..."), "the quick...");
    }

    #[test]
    fn test_truncate_short_unchanged() {
        assert_eq!(truncate("short", 50), "short");
        assert_eq!(truncate("exact", 5), "exact");
    }

    #[test]
    fn test_truncate_cut_on_boundary_keeps_word() {
        assert_eq!(truncate("the quick brown", 9), "the quick...");
    }

    #[test]
    fn test_truncate_single_long_word() {
        assert_eq!(truncate("supercalifragilistic", 5), "...");
        assert_eq!(truncate_with("supercalifragilistic", 5, " [more]"), " [more]");
    }

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("żółw żółw żółw", 9), "żółw żółw...");
        assert_eq!(truncate("żółw żółw żółw", 7), "żółw...");
    }

    #[test]
    fn test_deproxy_concrete_unchanged() {
        let handle = deproxy(Handle::Concrete(7));
        assert_eq!(handle.concrete(), Some(7));
    }

    #[test]
    fn test_deproxy_bound_proxy() {
        let current_user = Arc::new(Mutex::new(Some("alice".to_string())));
        let context = Arc::clone(&current_user);
        let proxy = Proxy::new(move || context.lock().unwrap().clone());

        let handle = deproxy(Handle::Proxied(proxy));
        assert_eq!(handle.concrete().as_deref(), Some("alice"));
    }

    #[test]
    fn test_deproxy_unbound_proxy_unchanged() {
        let proxy: Proxy<String> = Proxy::new(|| None);
        let handle = deproxy(Handle::Proxied(proxy));
        assert!(matches!(handle, Handle::Proxied(_)));
    }
}
