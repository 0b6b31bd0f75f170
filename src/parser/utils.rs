//! Common text helpers shared by the matcher, the trimmer and the handlers

/// Trim surrounding whitespace and lowercase, the form every comparison uses
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Replace control characters that voice transcripts occasionally carry and
/// collapse the whitespace runs they leave behind
pub fn sanitize_user_input(input: &str) -> String {
    input
        .split(|c: char| c.is_control() || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
