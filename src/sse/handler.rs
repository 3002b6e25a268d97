//! Consumer contract for streamed answers.

use crate::error::ApiError;

/// Receives the pieces of one streamed answer.
///
/// For a given stream the client calls [`on_message`](Self::on_message)
/// zero or more times, in payload order, followed by exactly one of
/// [`on_complete`](Self::on_complete) or [`on_error`](Self::on_error).
/// Nothing is delivered after the terminal call.
pub trait StreamHandler {
    /// One decoded payload, delivered in stream order.
    fn on_message(&mut self, chunk: &str);

    /// The stream ended cleanly.
    fn on_complete(&mut self);

    /// The stream failed - a bad status, a transport error, or a read
    /// failure mid-stream.
    fn on_error(&mut self, error: &ApiError);
}

/// Handler that accumulates a streamed answer in memory.
#[derive(Debug, Default)]
pub struct CollectedAnswer {
    /// Payloads in arrival order.
    pub chunks: Vec<String>,
    /// Whether the stream completed cleanly.
    pub completed: bool,
    /// Message of the error that ended the stream, if any.
    pub error: Option<String>,
}

impl CollectedAnswer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The full answer text assembled so far.
    pub fn text(&self) -> String {
        self.chunks.concat()
    }
}

impl StreamHandler for CollectedAnswer {
    fn on_message(&mut self, chunk: &str) {
        self.chunks.push(chunk.to_string());
    }

    fn on_complete(&mut self) {
        self.completed = true;
    }

    fn on_error(&mut self, error: &ApiError) {
        self.error = Some(error.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collected_answer_assembles_text() {
        let mut handler = CollectedAnswer::new();
        handler.on_message("Tell me about");
        handler.on_message(" ownership.");
        handler.on_complete();

        assert_eq!(handler.text(), "Tell me about ownership.");
        assert!(handler.completed);
        assert!(handler.error.is_none());
    }

    #[test]
    fn test_collected_answer_records_error() {
        let mut handler = CollectedAnswer::new();
        handler.on_error(&ApiError::Server {
            status: 503,
            message: "overloaded".to_string(),
        });

        assert!(!handler.completed);
        let error = handler.error.expect("error should be recorded");
        assert!(error.contains("overloaded"));
    }
}
