//! Full-record grammar
//!
//! One textual message carries a complete position fix:
//! `$type,id,hhmmss.sss,A|V,lat,N|S,lon,E|W,speed?,course?,ddmmyy,,,` then
//! the input/output/adc/odometer/rfid/status block. Firmware variants
//! delimit that trailing block with `,` or `/`, so the skeleton accepts
//! either. A skeleton mismatch is not an error: it is how delta frames are
//! told apart from full records.

use crate::coordinate::parse_coordinate;
use crate::session::{IdentityProvider, TransportContext};
use crate::types::{
    Alarm, PositionRecord, StatusWord, KEY_ALARM, KEY_BATTERY, KEY_DRIVER_ID, KEY_INPUT,
    KEY_ODOMETER, KEY_OUTPUT, KEY_RSSI, KEY_SATELLITES, PREFIX_ADC,
};
use chrono::{DateTime, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

/// Largest photo chunk the handshake reply may request.
pub const MAX_PHOTO_CHUNK: usize = 960;

fn report_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?x)
            \$
            ([^,]+),                        # type
            (\d+),                          # id
            (\d{2})(\d{2})(\d{2})\.(\d{3}),  # time hhmmss.sss
            ([AV]),                         # validity
            (\d+)(\d{2}\.\d{4}),            # latitude
            ([NS]),
            (\d+)(\d{2}\.\d{4}),            # longitude
            ([EW]),
            (\d+(?:\.\d+)?)?,               # speed
            (\d+(?:\.\d+)?)?,               # course
            (\d{2})(\d{2})(\d{2}),,,        # date ddmmyy
            (?:./)?                         # junk byte some firmwares emit
            ([01]+)[,/]                     # inputs
            ([01]+)/                        # outputs
            ([^/]*)[,/]                     # adc list
            (\d+)                           # odometer
            (?:
                /([^/]*)                    # rfid, only with its closing slash
                /([0-9A-Fa-f]{3})?          # status word
            )?
            ",
        )
        .unwrap()
    })
}

/// Outcome of one full-record decode attempt.
///
/// `photo_size` is the announced image byte count when the type token was a
/// photo announcement; the dispatcher keeps it on the decoder instance.
pub(crate) struct ReportDecode {
    pub position: Option<PositionRecord>,
    pub reply: Option<String>,
    pub photo_size: Option<usize>,
}

fn coordinate_from_groups(degrees: &str, minutes: &str, hemisphere: &str) -> Option<f64> {
    parse_coordinate(&format!("{}{}{}", degrees, minutes, hemisphere))
}

/// Decode one textual full record.
///
/// `None` means the skeleton did not match and the caller should try the
/// delta grammar. `Some` with `position: None` means the skeleton matched
/// but no record could be produced (unknown device, bad coordinates); the
/// message is consumed either way.
pub(crate) fn decode_report(
    ctx: &TransportContext,
    line: &str,
    identity: &dyn IdentityProvider,
    debug: bool,
) -> Option<ReportDecode> {
    let captures = report_pattern().captures(line)?;

    let type_token = &captures[1];

    let mut reply = None;
    let mut photo_size = None;
    if let Some(announced) = type_token.strip_prefix("PHO") {
        if let Ok(size) = announced.parse::<usize>() {
            photo_size = Some(size);
            reply = Some(format!("#PHD0,{}\r\n", size.min(MAX_PHOTO_CHUNK)));
            if debug {
                println!("Photo announcement: {} bytes expected", size);
            }
        }
    }

    let rejected = |reason: &str| {
        if debug {
            println!("Full record rejected: {}", reason);
        }
        Some(ReportDecode {
            position: None,
            reply: reply.clone(),
            photo_size,
        })
    };

    let device = match identity.resolve_session_by_identifier(ctx, &captures[2]) {
        Some(device) => device,
        None => return rejected("unknown device identifier"),
    };

    let latitude = match coordinate_from_groups(&captures[8], &captures[9], &captures[10]) {
        Some(value) => value,
        None => return rejected("latitude out of range"),
    };
    let longitude = match coordinate_from_groups(&captures[11], &captures[12], &captures[13]) {
        Some(value) => value,
        None => return rejected("longitude out of range"),
    };

    let mut position = PositionRecord::new(device);

    if let Some(alarm) = Alarm::from_code(type_token) {
        position.set_text(KEY_ALARM, alarm.as_str());
    }

    position.valid = &captures[7] == "A";
    position.latitude = latitude;
    position.longitude = longitude;
    position.speed = optional_number(captures.get(14).map(|m| m.as_str()));
    position.course = optional_number(captures.get(15).map(|m| m.as_str()));

    // Malformed date or time components degrade to the epoch; the record
    // always carries both timestamps.
    let timestamp = build_timestamp(
        &captures[18],
        &captures[17],
        &captures[16],
        &captures[3],
        &captures[4],
        &captures[5],
        &captures[6],
    )
    .unwrap_or(DateTime::UNIX_EPOCH);
    position.set_time(timestamp);

    position.set_text(KEY_INPUT, &captures[19]);
    position.set_text(KEY_OUTPUT, &captures[20]);

    if let Some(adc) = captures.get(21).map(|m| m.as_str()).filter(|s| !s.is_empty()) {
        // analog readings are transmitted in hex
        for (index, value) in adc.split(',').enumerate() {
            let value = i64::from_str_radix(value, 16).unwrap_or(0);
            position.set_integer(&format!("{}{}", PREFIX_ADC, index + 1), value);
        }
    }

    position.set_integer(
        KEY_ODOMETER,
        captures[22].parse::<i64>().unwrap_or(0),
    );

    if let Some(rfid) = captures.get(23).map(|m| m.as_str()).filter(|s| !s.is_empty()) {
        position.set_text(KEY_DRIVER_ID, rfid);
    }

    if let Some(raw) = captures.get(24) {
        if let Ok(value) = u16::from_str_radix(raw.as_str(), 16) {
            let status = StatusWord::from_raw(value);
            position.set_integer(KEY_BATTERY, status.battery as i64);
            position.set_integer(KEY_RSSI, status.rssi as i64);
            position.set_integer(KEY_SATELLITES, status.satellites as i64);
        }
    }

    if debug {
        println!(
            "Full record: device {} at {:.6},{:.6}",
            device, position.latitude, position.longitude
        );
    }

    Some(ReportDecode {
        position: Some(position),
        reply,
        photo_size,
    })
}

fn optional_number(field: Option<&str>) -> f64 {
    field.and_then(|s| s.parse().ok()).unwrap_or(0.0)
}

#[allow(clippy::too_many_arguments)]
fn build_timestamp(
    year: &str,
    month: &str,
    day: &str,
    hour: &str,
    minute: &str,
    second: &str,
    millis: &str,
) -> Option<DateTime<chrono::Utc>> {
    let date = NaiveDate::from_ymd_opt(
        2000 + year.parse::<i32>().ok()?,
        month.parse().ok()?,
        day.parse().ok()?,
    )?;
    let time = date.and_hms_milli_opt(
        hour.parse().ok()?,
        minute.parse().ok()?,
        second.parse().ok()?,
        millis.parse().ok()?,
    )?;
    Some(time.and_utc())
}
