//! Message dispatch
//!
//! One decoder instance serves one connection. Messages that are valid
//! UTF-8 are tried against the full-record grammar first; everything else
//! falls through to the delta-frame decoder.

use crate::error::Result;
use crate::parser::delta::decode_delta;
use crate::parser::report::decode_report;
use crate::session::{BaselineProvider, IdentityProvider, TransportContext};
use crate::types::PositionRecord;

/// What one decoded message produced.
#[derive(Debug, Default)]
pub struct DecodeOutcome {
    /// Position record, when the message yielded one.
    pub position: Option<PositionRecord>,
    /// Bytes to send back to the device, currently only the photo
    /// handshake acknowledgment.
    pub reply: Option<String>,
}

/// Per-connection decoder state.
#[derive(Debug, Default)]
pub struct VttDecoder {
    expected_photo_size: Option<usize>,
}

impl VttDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Byte count announced by the last photo handshake, if one happened
    /// on this connection.
    pub fn expected_photo_size(&self) -> Option<usize> {
        self.expected_photo_size
    }

    /// Decode one framed message.
    pub fn decode(
        &mut self,
        ctx: &TransportContext,
        message: &[u8],
        identity: &dyn IdentityProvider,
        baselines: &dyn BaselineProvider,
        debug: bool,
    ) -> Result<DecodeOutcome> {
        if let Ok(text) = std::str::from_utf8(message) {
            if let Some(decoded) = decode_report(ctx, text, identity, debug) {
                if decoded.photo_size.is_some() {
                    self.expected_photo_size = decoded.photo_size;
                }
                return Ok(DecodeOutcome {
                    position: decoded.position,
                    reply: decoded.reply,
                });
            }
        }

        let position = decode_delta(ctx, message, identity, baselines, debug)?;
        Ok(DecodeOutcome {
            position,
            reply: None,
        })
    }
}
