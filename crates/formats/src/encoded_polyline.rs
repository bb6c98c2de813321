//! Encoded polyline format (the "polyline algorithm") used by routing engines
//! to ship route shapes compactly.
//!
//! Each value is the zigzag-encoded delta from the previous point, split into
//! 5-bit chunks, offset by 63 into printable ASCII. Points are `(lat, lon)`.

use foundation::Coordinate;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum PolylinePrecision {
    /// 1e-5 degrees.
    E5,
    /// 1e-6 degrees.
    #[default]
    E6,
}

impl PolylinePrecision {
    pub fn from_digits(digits: u8) -> Option<Self> {
        match digits {
            5 => Some(Self::E5),
            6 => Some(Self::E6),
            _ => None,
        }
    }

    pub fn factor(self) -> f64 {
        match self {
            Self::E5 => 1e5,
            Self::E6 => 1e6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolylineError {
    InvalidCharacter { index: usize, byte: u8 },
    Truncated,
    Overflow,
    /// Point `index` lies outside latitude [-90, 90] or longitude [-180, 180],
    /// or is not finite.
    OutOfRange { index: usize },
}

impl std::fmt::Display for PolylineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolylineError::InvalidCharacter { index, byte } => {
                write!(f, "invalid polyline byte 0x{byte:02x} at index {index}")
            }
            PolylineError::Truncated => write!(f, "polyline ends in the middle of a point"),
            PolylineError::Overflow => write!(f, "polyline value overflows 64 bits"),
            PolylineError::OutOfRange { index } => {
                write!(f, "polyline point {index} is not a valid coordinate")
            }
        }
    }
}

impl std::error::Error for PolylineError {}

pub fn decode_polyline(
    encoded: &str,
    precision: PolylinePrecision,
) -> Result<Vec<Coordinate>, PolylineError> {
    let bytes = encoded.as_bytes();
    let factor = precision.factor();
    let mut cursor = 0;
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;
    let mut out = Vec::new();

    while cursor < bytes.len() {
        let dlat = read_value(bytes, &mut cursor)?;
        if cursor >= bytes.len() {
            return Err(PolylineError::Truncated);
        }
        let dlon = read_value(bytes, &mut cursor)?;
        lat = lat.checked_add(dlat).ok_or(PolylineError::Overflow)?;
        lon = lon.checked_add(dlon).ok_or(PolylineError::Overflow)?;
        let point = Coordinate::new(lat as f64 / factor, lon as f64 / factor);
        if !in_range(&point) {
            return Err(PolylineError::OutOfRange { index: out.len() });
        }
        out.push(point);
    }

    Ok(out)
}

pub fn encode_polyline(
    coords: &[Coordinate],
    precision: PolylinePrecision,
) -> Result<String, PolylineError> {
    let factor = precision.factor();
    let mut out = String::new();
    let mut prev_lat: i64 = 0;
    let mut prev_lon: i64 = 0;

    for (index, c) in coords.iter().enumerate() {
        if !in_range(c) {
            return Err(PolylineError::OutOfRange { index });
        }
        let lat = (c.lat_deg * factor).round() as i64;
        let lon = (c.lon_deg * factor).round() as i64;
        let dlat = lat.checked_sub(prev_lat).ok_or(PolylineError::Overflow)?;
        let dlon = lon.checked_sub(prev_lon).ok_or(PolylineError::Overflow)?;
        write_value(&mut out, dlat);
        write_value(&mut out, dlon);
        prev_lat = lat;
        prev_lon = lon;
    }

    Ok(out)
}

fn in_range(c: &Coordinate) -> bool {
    c.is_finite() && c.lat_deg.abs() <= 90.0 && c.lon_deg.abs() <= 180.0
}

fn read_value(bytes: &[u8], cursor: &mut usize) -> Result<i64, PolylineError> {
    let mut result: u64 = 0;
    let mut shift = 0u32;
    loop {
        let index = *cursor;
        let byte = *bytes.get(index).ok_or(PolylineError::Truncated)?;
        if !(63..=126).contains(&byte) {
            return Err(PolylineError::InvalidCharacter { index, byte });
        }
        let chunk = u64::from(byte - 63);
        // Only the low four bits of a 13th chunk still fit in 64 bits.
        if shift >= 64 || (shift == 60 && chunk & 0x1f > 0xf) {
            return Err(PolylineError::Overflow);
        }
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        *cursor += 1;
        if chunk < 0x20 {
            break;
        }
    }

    // Zigzag: the low bit carries the sign.
    let value = (result >> 1) as i64;
    Ok(if result & 1 == 1 { !value } else { value })
}

fn write_value(out: &mut String, value: i64) {
    let mut v = ((value << 1) ^ (value >> 63)) as u64;
    while v >= 0x20 {
        out.push(char::from((0x20 | (v & 0x1f)) as u8 + 63));
        v >>= 5;
    }
    out.push(char::from(v as u8 + 63));
}
