//! PASS/FAIL verdict parsing.

/// Whether a generator verdict response counts as PASS.
///
/// Deliberately loose: the response is trimmed, lowercased, and searched for
/// the substring "pass". Anything else, including malformed multi-word
/// answers and empty responses, counts as FAIL. The looseness is a known
/// compatibility wart: a response like "this should not PASS" reads as a
/// pass.
pub fn is_pass(response: &str) -> bool {
    response.trim().to_lowercase().contains("pass")
}
