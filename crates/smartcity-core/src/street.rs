//! # Street Builder
//!
//! Staged construction of a smart street descriptor.
//!
//! Setters accept anything implementing [`StreetCount`] and coerce it to a
//! non-negative count: negative numbers clamp to 0, fractions truncate,
//! non-numeric text and `None` become 0. Calling a setter again overwrites the previous value.
//! `build` consumes the builder and returns a frozen [`StreetDescriptor`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::IntErrorKind;

// =============================================================================
// COUNT COERCION
// =============================================================================

/// Numeric-like input accepted by the builder setters.
pub trait StreetCount {
    /// Coerce to a non-negative count.
    fn to_count(self) -> u32;
}

macro_rules! unsigned_count {
    ($($t:ty),*) => {$(
        impl StreetCount for $t {
            fn to_count(self) -> u32 {
                u32::try_from(self).unwrap_or(u32::MAX)
            }
        }
    )*};
}

macro_rules! signed_count {
    ($($t:ty),*) => {$(
        impl StreetCount for $t {
            fn to_count(self) -> u32 {
                if self < 0 {
                    0
                } else {
                    u32::try_from(self).unwrap_or(u32::MAX)
                }
            }
        }
    )*};
}

unsigned_count!(u8, u16, u32, u64, usize);
signed_count!(i8, i16, i32, i64, isize);

/// Accepts decimal, exponent and `0x`/`0o`/`0b` forms, with fractions
/// truncated. Blank text, non-numeric text
/// and non-finite values are 0.
impl StreetCount for &str {
    fn to_count(self) -> u32 {
        let text = self.trim();
        if let Some(n) = parse_prefixed(text) {
            return n;
        }
        match text.parse::<f64>() {
            // `as` truncates toward zero and saturates; negatives become 0.
            Ok(value) if value.is_finite() => value as u32,
            _ => 0,
        }
    }
}

/// `0x`, `0o` and `0b` literals. `None` when `text` has no such prefix.
fn parse_prefixed(text: &str) -> Option<u32> {
    let bytes = text.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    let digits = &text[2..];
    if digits.starts_with('+') {
        return Some(0);
    }
    Some(match u32::from_str_radix(digits, radix) {
        Ok(n) => n,
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => u32::MAX,
        Err(_) => 0,
    })
}

impl StreetCount for String {
    fn to_count(self) -> u32 {
        self.as_str().to_count()
    }
}

impl StreetCount for &String {
    fn to_count(self) -> u32 {
        self.as_str().to_count()
    }
}

impl<T: StreetCount> StreetCount for Option<T> {
    fn to_count(self) -> u32 {
        self.map(StreetCount::to_count).unwrap_or(0)
    }
}

// =============================================================================
// BUILDER
// =============================================================================

/// Fluent builder for [`StreetDescriptor`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmartStreetBuilder {
    lamps: u32,
    cameras: u32,
    solar_panels: u32,
}

impl SmartStreetBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn add_lamps(mut self, count: impl StreetCount) -> Self {
        self.lamps = count.to_count();
        self
    }

    #[must_use]
    pub fn add_cameras(mut self, count: impl StreetCount) -> Self {
        self.cameras = count.to_count();
        self
    }

    #[must_use]
    pub fn add_solar_panels(mut self, count: impl StreetCount) -> Self {
        self.solar_panels = count.to_count();
        self
    }

    /// Freeze the current counts into a descriptor.
    #[must_use]
    pub fn build(self) -> StreetDescriptor {
        StreetDescriptor::new(self.lamps, self.cameras, self.solar_panels)
    }
}

// =============================================================================
// DESCRIPTOR
// =============================================================================

/// Immutable description of a smart street.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreetDescriptor {
    lamps: u32,
    cameras: u32,
    solar_panels: u32,
    summary: String,
}

impl StreetDescriptor {
    fn new(lamps: u32, cameras: u32, solar_panels: u32) -> Self {
        let summary = format!(
            "Lamps: {} | Cameras: {} | Solar panels: {}",
            lamps, cameras, solar_panels
        );
        Self {
            lamps,
            cameras,
            solar_panels,
            summary,
        }
    }

    #[must_use]
    pub fn lamps(&self) -> u32 {
        self.lamps
    }

    #[must_use]
    pub fn cameras(&self) -> u32 {
        self.cameras
    }

    #[must_use]
    pub fn solar_panels(&self) -> u32 {
        self.solar_panels
    }

    /// One-line summary of all three counts.
    pub fn info(&self) -> &str {
        &self.summary
    }
}

impl fmt::Display for StreetDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary)
    }
}

// =============================================================================
// TESTS
// =============================================================================
