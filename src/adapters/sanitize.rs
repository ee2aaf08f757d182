//! Log redaction for clinical values and key material.
//!
//! Formatted log lines pass through [`SanitizingMakeWriter`] before reaching
//! the sink. Patterns cover:
//! - Clinical `field=value` / `field: value` pairs (age, cholesterol, ...)
//! - Numeric vectors that look like encoded feature rows
//! - UUIDs and email addresses
//! - Signing-key material (hex runs, contextual base64 secrets)
//!
//! Call sites should not log patient values in the first place; this is a
//! fallback for what slips through (e.g. `Debug` of a record in an error).
//!
//! Input is capped at `CARDIORISK_SANITIZE_MAX_BYTES` (default 16 KiB).

use regex::{Regex, RegexSet};
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

static PATTERNS: OnceLock<RedactionPatterns> = OnceLock::new();

const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

/// Clinical field names, in both the record's camelCase and the dataset codes.
const CLINICAL_FIELDS: &str = "age|sex|chestPainType|cp|restingBloodPressure|trestbps|cholesterol|chol|fastingBloodSugar|fbs|restingEcg|restecg|maxHeartRate|thalach|exerciseInducedAngina|exang|stDepression|oldpeak|stSlope|slope|majorVesselsColored|ca|thalassemia|thal";

struct RedactionRule {
    regex: Regex,
    replacement: &'static str,
}

struct RedactionPatterns {
    set: RegexSet,
    rules: Vec<RedactionRule>,
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }
    let mut end = max_bytes.min(input.len());
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

fn max_sanitize_bytes() -> usize {
    std::env::var("CARDIORISK_SANITIZE_MAX_BYTES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_SANITIZE_MAX_BYTES)
}

fn patterns() -> &'static RedactionPatterns {
    PATTERNS.get_or_init(|| {
        let clinical_pair = format!(
            r#"(?i)\b"?(?:{CLINICAL_FIELDS})"?\s*[:=]\s*(?:"[^"]{{0,64}}"|[A-Za-z0-9_.+-]{{1,32}})"#
        );
        // Order matters: specific secrets before the broad hex rule.
        let rules: Vec<(String, &'static str)> = vec![
            (clinical_pair, "[REDACTED-CLINICAL]"),
            (
                r"\[\s*-?\d+(?:\.\d+)?(?:\s*,\s*-?\d+(?:\.\d+)?){4,}\s*\]".to_string(),
                "[REDACTED-VECTOR]",
            ),
            (
                r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}"
                    .to_string(),
                "[REDACTED-UUID]",
            ),
            (
                r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b"
                    .to_string(),
                "[REDACTED-EMAIL]",
            ),
            (
                r"(?i)\b(?:secret|private[_-]?key|signing[_-]?key|seed|token|key)\b\s*[:=]\s*[A-Za-z0-9+/]{32,}={0,2}"
                    .to_string(),
                "[REDACTED-SECRET]",
            ),
            (r"\b[0-9a-fA-F]{32,}\b".to_string(), "[REDACTED-KEY]"),
        ];

        let set = RegexSet::new(rules.iter().map(|(p, _)| p.as_str())).expect("Valid regex set");
        let rules = rules
            .into_iter()
            .map(|(pattern, replacement)| RedactionRule {
                regex: Regex::new(&pattern).expect("Valid regex"),
                replacement,
            })
            .collect();

        RedactionPatterns { set, rules }
    })
}

/// Replace clinical values and secrets in `input`.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_sanitize_bytes())
}

fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let patterns = patterns();
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);

    let matched: Vec<usize> = patterns.set.matches(prefix).into_iter().collect();
    let mut result = prefix.to_string();
    for idx in matched {
        let rule = &patterns.rules[idx];
        result = rule.regex.replace_all(&result, rule.replacement).to_string();
    }

    if truncated {
        result.push_str(" [TRUNCATED]");
    }
    result
}

/// Whether `input` contains anything [`sanitize`] would redact.
#[must_use]
pub fn contains_sensitive(input: &str) -> bool {
    let (prefix, _) = truncate_to_char_boundary(input, max_sanitize_bytes());
    patterns().set.is_match(prefix)
}

/// `MakeWriter` wrapper that sanitizes each formatted line.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

pub struct SanitizingWriter<W> {
    inner: W,
    buffer: Vec<u8>,
}

impl<W: std::io::Write> SanitizingWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
        }
    }

    fn write_sanitized(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        let sanitized = sanitize(&String::from_utf8_lossy(bytes));
        self.inner.write_all(sanitized.as_bytes())
    }

    fn flush_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            self.write_sanitized(&line)?;
        }
        Ok(())
    }
}

impl<W: std::io::Write> std::io::Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        // A single line with no newline must not grow without bound.
        let hard_cap = max_sanitize_bytes().saturating_mul(2);
        if self.buffer.len() > hard_cap {
            let pending = std::mem::take(&mut self.buffer);
            self.write_sanitized(&pending)?;
            self.inner.write_all(b"\n[TRUNCATED]\n")?;
            return Ok(buf.len());
        }

        self.flush_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_lines()?;
        if !self.buffer.is_empty() {
            let pending = std::mem::take(&mut self.buffer);
            self.write_sanitized(&pending)?;
        }
        self.inner.flush()
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter::new(self.inner.make_writer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_redacts_clinical_pairs() {
        let sanitized = sanitize("validated record age=57 cholesterol: 241 thal=\"Fixed Defect\"");
        assert!(!sanitized.contains("57"));
        assert!(!sanitized.contains("241"));
        assert!(!sanitized.contains("Fixed Defect"));
        assert_eq!(sanitized.matches("[REDACTED-CLINICAL]").count(), 3);
    }

    #[test]
    fn test_redacts_json_clinical_fields() {
        let sanitized = sanitize(r#"{"age": 63, "maxHeartRate": 150}"#);
        assert!(!sanitized.contains("63"));
        assert!(!sanitized.contains("150"));
    }

    #[test]
    fn test_redacts_feature_vectors() {
        let sanitized = sanitize("features [57.0, 1.0, 3.0, 140.0, 241.0, 0.0] encoded");
        assert!(sanitized.contains("[REDACTED-VECTOR]"));
        assert!(!sanitized.contains("241.0"));
    }

    #[test]
    fn test_leaves_short_lists_and_plain_text() {
        assert_eq!(sanitize("probabilities [0.1, 0.9]"), "probabilities [0.1, 0.9]");
        assert!(!contains_sensitive("Loaded model from \"models\" (n_features=13)"));
    }

    #[test]
    fn test_redacts_uuid_and_email() {
        let sanitized = sanitize("request 550e8400-e29b-41d4-a716-446655440000 from a@b.org");
        assert!(sanitized.contains("[REDACTED-UUID]"));
        assert!(sanitized.contains("[REDACTED-EMAIL]"));
    }

    #[test]
    fn test_redacts_key_material() {
        let sanitized = sanitize("seed 0123456789abcdef0123456789abcdef0123456789abcdef");
        assert!(sanitized.contains("[REDACTED-KEY]"));

        let sanitized = sanitize("signing_key=QWxhZGRpbjpvcGVuIHNlc2FtZSB3aXRoIGxvbmcgc2VjcmV0");
        assert!(sanitized.contains("[REDACTED-SECRET]"));
    }

    #[test]
    fn test_truncates_large_inputs() {
        let sanitized = sanitize_with_limit("prefix éééééééééé suffix", 10);
        assert!(sanitized.ends_with(" [TRUNCATED]"));
    }

    #[test]
    fn test_writer_sanitizes_each_line() {
        let make = SanitizingMakeWriter::new(std::sync::Mutex::new(Vec::<u8>::new()));
        {
            let mut w = make.make_writer();
            w.write_all(b"age=44\nplain line\n").expect("write");
            w.write_all(b"tail chol=199").expect("write");
            w.flush().expect("flush");
        }
        let out = make.inner.into_inner().expect("lock");
        let out = String::from_utf8(out).expect("utf8");
        assert_eq!(out, "[REDACTED-CLINICAL]\nplain line\ntail [REDACTED-CLINICAL]");
    }
}
