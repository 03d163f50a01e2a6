use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// How repeated `get_logger` calls for one name attach the JSON file sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AttachPolicy {
    /// At most one attachment per name, and each record reaches the file
    /// at most once.
    #[default]
    Once,
    /// Every call adds another attachment. A record is written once per
    /// attachment on its logger and on each attached ancestor.
    PerCall,
}

/// Which logger names have the JSON file sink attached, and how often.
#[derive(Debug)]
pub(crate) struct Attachments {
    policy: AttachPolicy,
    counts: Mutex<HashMap<String, usize>>,
}

impl Attachments {
    pub fn new(policy: AttachPolicy) -> Self {
        Attachments {
            policy,
            counts: Mutex::new(HashMap::new()),
        }
    }

    /// Attaches the sink to `name` and returns its attachment count.
    pub fn attach(&self, name: &str) -> usize {
        let mut counts = self.counts.lock().unwrap_or_else(PoisonError::into_inner);
        let count = counts.entry(name.to_string()).or_insert(0);
        match self.policy {
            AttachPolicy::Once => *count = 1,
            AttachPolicy::PerCall => *count += 1,
        }
        *count
    }

    /// Number of JSON lines a record from `name` produces.
    ///
    /// Walks `name` and its ancestors up to the root logger `""`.
    pub fn copies_for(&self, name: &str) -> usize {
        let counts = self.counts.lock().unwrap_or_else(PoisonError::into_inner);
        let mut total = 0;
        let mut current = Some(name);
        while let Some(n) = current {
            total += counts.get(n).copied().unwrap_or(0);
            current = parent(n);
        }
        match self.policy {
            AttachPolicy::Once => total.min(1),
            AttachPolicy::PerCall => total,
        }
    }
}

/// Parent of a logger name: `a.b` -> `a`, `a::b` -> `a`, `a` -> root, root -> none.
fn parent(name: &str) -> Option<&str> {
    if name.is_empty() {
        return None;
    }
    let dot = name.rfind('.');
    let path = name.rfind("::");
    match dot.max(path) {
        Some(idx) => Some(&name[..idx]),
        None => Some(""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_walks_both_separators() {
        assert_eq!(parent("a.b.c"), Some("a.b"));
        assert_eq!(parent("crate::module"), Some("crate"));
        assert_eq!(parent("a::b.c"), Some("a::b"));
        assert_eq!(parent("svc"), Some(""));
        assert_eq!(parent(""), None);
    }

    #[test]
    fn once_policy_is_idempotent() {
        let attachments = Attachments::new(AttachPolicy::Once);
        assert_eq!(attachments.attach("x"), 1);
        assert_eq!(attachments.attach("x"), 1);
        assert_eq!(attachments.copies_for("x"), 1);
    }

    #[test]
    fn per_call_policy_accumulates() {
        let attachments = Attachments::new(AttachPolicy::PerCall);
        attachments.attach("x");
        assert_eq!(attachments.attach("x"), 2);
        assert_eq!(attachments.copies_for("x"), 2);
    }

    #[test]
    fn records_propagate_to_attached_ancestors() {
        let attachments = Attachments::new(AttachPolicy::PerCall);
        attachments.attach("svc");
        assert_eq!(attachments.copies_for("svc.db"), 1);
        assert_eq!(attachments.copies_for("other"), 0);

        attachments.attach("svc.db");
        assert_eq!(attachments.copies_for("svc.db"), 2);

        let once = Attachments::new(AttachPolicy::Once);
        once.attach("svc");
        once.attach("svc.db");
        assert_eq!(once.copies_for("svc.db"), 1);
    }

    #[test]
    fn root_attachment_catches_everything() {
        let attachments = Attachments::new(AttachPolicy::Once);
        assert_eq!(attachments.copies_for("epicli::main"), 0);
        attachments.attach("");
        assert_eq!(attachments.copies_for("epicli::main"), 1);
        assert_eq!(attachments.copies_for("anything"), 1);
    }
}
