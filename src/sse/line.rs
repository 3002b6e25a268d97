//! Per-line SSE classification.

/// A single SSE line classified by its field prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseLine {
    /// `data:` line; payload has the prefix stripped and whitespace trimmed.
    Data(String),
    /// `event:` line naming an event type.
    Event(String),
    /// Comment line (`:` prefix) or any unrecognized field.
    Comment(String),
    /// Blank separator line.
    Empty,
}

/// Classify a single SSE line into its component type.
pub fn parse_sse_line(line: &str) -> SseLine {
    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(rest) = line.strip_prefix("data:") {
        return SseLine::Data(rest.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("event:") {
        return SseLine::Event(rest.trim().to_string());
    }

    if let Some(stripped) = line.strip_prefix(':') {
        return SseLine::Comment(stripped.trim().to_string());
    }

    // Unknown field - treat as comment
    SseLine::Comment(line.to_string())
}
