/// Maps a backend error to a retry disposition and a label used to suffix
/// `IncError`/`final:<kind>`/`retry:<kind>` metric reasons.
///
/// The default implementation below is intentionally substring-based rather
/// than keyed off each driver's native error-code enum: it works uniformly
/// across MySQL/PostgreSQL/SQLite/Redis without `batch-executor` depending on
/// any of their crates. Driver crates that want sharper classification can
/// supply their own `Classifier` and still attach the backend-native error as
/// the source chain.
pub trait Classifier: Send + Sync {
    /// Returns `(kind, retryable)`.
    fn classify(&self, message: &str) -> (String, bool);
}

const RETRYABLE_KEYWORDS: &[&str] = &[
    "timeout",
    "deadlock",
    "connection reset",
    "temporary",
    "i/o timeout",
    "try again",
];

const NON_RETRYABLE_KEYWORDS: &[&str] = &[
    "syntax",
    "constraint violation",
    "unknown column",
    "authentication",
];

/// The keyword-substring classifier from spec.md §4.6. Unknown errors are
/// retryable by default — safer for transient failures than giving up early.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultClassifier;

impl Classifier for DefaultClassifier {
    fn classify(&self, message: &str) -> (String, bool) {
        let lower = message.to_lowercase();

        for kw in RETRYABLE_KEYWORDS {
            if lower.contains(kw) {
                return (kw.to_string(), true);
            }
        }

        for kw in NON_RETRYABLE_KEYWORDS {
            if lower.contains(kw) {
                return (kw.to_string(), false);
            }
        }

        ("unknown".to_string(), true)
    }
}
