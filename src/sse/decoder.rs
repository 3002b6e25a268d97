//! Incremental decoder for streamed SSE answers.

use tracing::debug;

use super::line::{parse_sse_line, SseLine};

/// Decodes a streamed response body into ordered `data:` payloads.
///
/// One decoder consumes one stream. Chunks may split a UTF-8 code point or
/// a line anywhere; the decoder carries the incomplete trailing sequence
/// and the unterminated line across calls, so the payload sequence is
/// identical no matter how the bytes were chunked. All buffering state
/// lives in the instance - concurrent streams stay independent.
#[derive(Debug, Default)]
pub struct StreamDecoder {
    /// Bytes of an incomplete trailing UTF-8 sequence from the last chunk.
    utf8_carry: Vec<u8>,
    /// Decoded text after the last newline; at most one partial line.
    line_buffer: String,
}

impl StreamDecoder {
    /// Create a decoder with empty buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk of response bytes.
    ///
    /// Returns the payloads of every line the chunk completed, in stream
    /// order. Non-`data:` lines (comments, event types, blank separators)
    /// are dropped, as are payloads that trim down to empty.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        let text = self.decode_utf8(chunk);
        self.line_buffer.push_str(&text);

        let mut payloads = Vec::new();
        while let Some(newline_pos) = self.line_buffer.find('\n') {
            let line = self.line_buffer[..newline_pos].to_string();
            self.line_buffer = self.line_buffer[newline_pos + 1..].to_string();

            if let SseLine::Data(payload) = parse_sse_line(&line) {
                if !payload.is_empty() {
                    payloads.push(payload);
                }
            }
        }
        payloads
    }

    /// Flush the residue once the transport reports end-of-stream.
    ///
    /// The final (unterminated) line is trimmed and checked against the
    /// same `data:` rule. Trailing text without the prefix is discarded.
    pub fn finish(&mut self) -> Option<String> {
        if !self.utf8_carry.is_empty() {
            // A sequence truncated at end-of-stream can no longer complete.
            let tail = std::mem::take(&mut self.utf8_carry);
            self.line_buffer.push_str(&String::from_utf8_lossy(&tail));
        }

        let residue = std::mem::take(&mut self.line_buffer);
        let residue = residue.trim();
        if residue.is_empty() {
            return None;
        }

        match parse_sse_line(residue) {
            SseLine::Data(payload) if !payload.is_empty() => Some(payload),
            _ => {
                debug!(len = residue.len(), "discarding non-data stream residue");
                None
            }
        }
    }

    /// Decode a chunk against the carried partial sequence.
    ///
    /// Returns all text that is complete so far. An incomplete trailing
    /// sequence is carried to the next call; invalid interior bytes become
    /// U+FFFD instead of aborting the stream.
    fn decode_utf8(&mut self, chunk: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.utf8_carry);
        bytes.extend_from_slice(chunk);

        let mut text = String::new();
        let mut rest: &[u8] = &bytes;
        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    text.push_str(valid);
                    break;
                }
                Err(e) => {
                    let (valid, after) = rest.split_at(e.valid_up_to());
                    text.push_str(std::str::from_utf8(valid).unwrap_or(""));

                    match e.error_len() {
                        Some(invalid_len) => {
                            text.push('\u{FFFD}');
                            rest = &after[invalid_len..];
                        }
                        None => {
                            // Incomplete trailing sequence - wait for more bytes.
                            self.utf8_carry = after.to_vec();
                            break;
                        }
                    }
                }
            }
        }
        text
    }
}
