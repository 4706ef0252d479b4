//! Log redaction.
//!
//! Every persisted or printed log event passes through [`redact`]
//! before it leaves the process. No literal password or OAuth token
//! may survive as a substring.

use once_cell::sync::Lazy;
use regex::Regex;

struct Pattern {
    regex: Regex,
    replacement: &'static str,
}

static PATTERNS: Lazy<Vec<Pattern>> = Lazy::new(|| {
    vec![
        Pattern {
            regex: Regex::new(r#""password"\s*:\s*"[^"]*""#).unwrap(),
            replacement: "\"password\":\"***REDACTED***\"",
        },
        Pattern {
            regex: Regex::new(r#""access_token"\s*:\s*"[^"]*""#).unwrap(),
            replacement: "\"access_token\":\"***REDACTED***\"",
        },
        Pattern {
            regex: Regex::new(r"password=[^\s&]+").unwrap(),
            replacement: "password=***REDACTED***",
        },
        Pattern {
            regex: Regex::new(r"token=[^\s&]+").unwrap(),
            replacement: "token=***REDACTED***",
        },
    ]
});

/// Redact sensitive substrings from a log message or key-value pair.
pub fn redact(input: &str) -> String {
    let mut out = input.to_string();
    for pattern in PATTERNS.iter() {
        out = pattern.regex.replace_all(&out, pattern.replacement).into_owned();
    }
    out
}

#[cfg(test)]
#[path = "redact_test.rs"]
mod tests;
