//! Delta frames
//!
//! A delta frame patches the textual serialization of the previous record
//! instead of resending it. The frame is a marker byte, one reserved byte,
//! then a run of `(tag, overwrite index, length, payload)` entries. Most
//! tags exist only so the stream can be walked; the ones acted on are
//! command, device identifier, latitude, and longitude.

use crate::coordinate::{
    overwrite_coordinate, LATITUDE_HEMISPHERES, LONGITUDE_HEMISPHERES,
};
use crate::error::Result;
use crate::parser::stream::DeltaStream;
use crate::session::{BaselineProvider, IdentityProvider, TransportContext};
use crate::types::{Alarm, DeviceId, PositionRecord, KEY_ALARM};
use chrono::{DateTime, Utc};

/// First byte of every delta frame.
pub const DELTA_MARKER: u8 = b'@';

pub const TAG_COMMAND: u8 = 0;
pub const TAG_DEVICE_ID: u8 = 1;
pub const TAG_TIME: u8 = 2;
pub const TAG_FIX_FLAG: u8 = 3;
pub const TAG_LATITUDE: u8 = 4;
pub const TAG_NORTH_SOUTH: u8 = 5;
pub const TAG_LONGITUDE: u8 = 6;
pub const TAG_EAST_WEST: u8 = 7;
pub const TAG_SPEED: u8 = 8;
pub const TAG_HEADING: u8 = 9;
pub const TAG_DATE: u8 = 10;
pub const TAG_END: u8 = 13;

/// Decode one binary delta frame against the device's stored baseline.
///
/// `Ok(None)` covers every silent-skip case: missing marker, no session,
/// no baseline to patch, or a frame whose entries carried nothing new.
/// Errors surface only structural damage, a payload length pointing past
/// the end of the buffer.
pub(crate) fn decode_delta(
    ctx: &TransportContext,
    message: &[u8],
    identity: &dyn IdentityProvider,
    baselines: &dyn BaselineProvider,
    debug: bool,
) -> Result<Option<PositionRecord>> {
    let mut stream = DeltaStream::new(message);

    match stream.read_u8() {
        Ok(DELTA_MARKER) => {}
        _ => return Ok(None),
    }

    let device = match identity.resolve_session(ctx) {
        Some(device) if device != DeviceId(0) => device,
        _ => return Ok(None),
    };

    // reserved byte after the marker
    stream.read_u8()?;

    let baseline = baselines.last_position(device);

    let mut record = PositionRecord::new(device);
    let mut new_latitude = None;
    let mut new_longitude = None;
    let mut got_new_info = false;

    while stream.has_remaining() {
        let tag = stream.read_u8()?;
        let overwrite_index = stream.read_u8()? as usize;
        let length = stream.read_u8()? as usize;
        let payload = stream.read_bytes(length)?;

        match tag {
            TAG_COMMAND => {
                if let Ok(code) = std::str::from_utf8(payload) {
                    if let Some(alarm) = Alarm::from_code(code) {
                        record.set_text(KEY_ALARM, alarm.as_str());
                        got_new_info = true;
                    }
                }
            }
            TAG_DEVICE_ID => {
                let current = match identity.unique_identifier(record.device_id) {
                    Some(current) => current,
                    None => continue,
                };
                let prefix = match current.get(..overwrite_index) {
                    Some(prefix) => prefix,
                    None => continue,
                };
                let extension = match std::str::from_utf8(payload) {
                    Ok(extension) => extension,
                    Err(_) => continue,
                };
                let candidate = format!("{}{}", prefix, extension);
                if let Some(resolved) =
                    identity.resolve_session_by_identifier(ctx, &candidate)
                {
                    if resolved != DeviceId(0) {
                        if debug {
                            println!("Device patch: {} -> {}", current, candidate);
                        }
                        record.device_id = resolved;
                        got_new_info = true;
                    }
                }
            }
            TAG_LATITUDE => {
                if let Some(ref baseline) = baseline {
                    let patched = overwrite_coordinate(
                        baseline.latitude,
                        overwrite_index,
                        payload,
                        LATITUDE_HEMISPHERES,
                    );
                    if patched != 0.0 {
                        new_latitude = Some(patched);
                        got_new_info = true;
                    }
                }
            }
            TAG_LONGITUDE => {
                if let Some(ref baseline) = baseline {
                    let patched = overwrite_coordinate(
                        baseline.longitude,
                        overwrite_index,
                        payload,
                        LONGITUDE_HEMISPHERES,
                    );
                    if patched != 0.0 {
                        new_longitude = Some(patched);
                        got_new_info = true;
                    }
                }
            }
            // remaining tag vocabulary carries no decode action
            _ => {
                if debug {
                    println!("Delta entry skipped: tag {}", tag);
                }
            }
        }
    }

    if !got_new_info {
        return Ok(None);
    }

    if let Some(baseline) = baseline {
        record.latitude = new_latitude.unwrap_or(baseline.latitude);
        record.longitude = new_longitude.unwrap_or(baseline.longitude);
        record.valid = baseline.valid;
        record.speed = baseline.speed;
        record.course = baseline.course;
        record.device_time = baseline.device_time;
        record.fix_time = baseline.fix_time;
        record.inherit_attributes(&baseline);
    }

    if record.device_time.is_none() {
        record.device_time = Some(Utc::now());
    }
    if record.fix_time.is_none() {
        record.fix_time = Some(DateTime::UNIX_EPOCH);
    }

    Ok(Some(record))
}
