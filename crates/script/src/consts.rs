use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

/// Marks the rest of a line as a comment.
pub(crate) const COMMENT: &str = "//";

regex!(IF_REGEX, r"(?i)^\s*IF\s+");
regex!(DO_REGEX, r"(?i)^\s*DO(?:\s+|$)");
// One test, optionally preceded by its joiner: `; G(5)`.
regex!(TEST_REGEX, r"^\s*([;,]?)\s*([A-Za-z])\s*\(([^)]*)\)");
regex!(REPLACE_REGEX, r"^\s*'([^']*)'\s+'([^']*)'\s*$");
regex!(TOKEN_REGEX, r"%([A-Za-z0-9]{3})");
