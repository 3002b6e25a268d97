//! SSE (Server-Sent Events) stream decoding.
//!
//! The backend streams answers as newline-delimited SSE lines; only lines
//! with a `data:` prefix carry payload. This module turns the raw response
//! byte stream into ordered payload strings:
//! - `line` - per-line classification (`SseLine`, `parse_sse_line`)
//! - `decoder` - stateful `StreamDecoder` handling chunk reassembly
//! - `handler` - the `StreamHandler` consumer contract

mod decoder;
mod handler;
mod line;

pub use decoder::StreamDecoder;
pub use handler::{CollectedAnswer, StreamHandler};
pub use line::{parse_sse_line, SseLine};
