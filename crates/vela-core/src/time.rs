//! Fixed-point time tags
//!
//! A [`TimeTag`] is a 64-bit fixed-point timestamp: the high 32 bits count
//! whole seconds since 1900-01-01 00:00:00 UTC, the low 32 bits a fraction
//! of a second scaled by 2^32 (about 230 picoseconds per tick).
//!
//! The raw value `1` is the reserved "immediate" sentinel and never takes
//! part in the seconds/fraction arithmetic: converting it to a wall-clock
//! value yields the current time at the moment of the call.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Seconds between 1900-01-01 and the Unix epoch.
const EPOCH_DELTA_SECS: u64 = 2_208_988_800;

/// Fraction ticks per second (2^32).
const TICKS_PER_SEC: u64 = 1 << 32;

/// 64-bit fixed-point timestamp carried in bundle headers and `t` arguments.
///
/// The sentinel value `1` means "immediate". A legitimately computed tag for
/// 1900-01-01 plus one tick has the same bit pattern and is indistinguishable
/// from the sentinel; no guard is attempted.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeTag(pub u64);

impl TimeTag {
    /// The "immediate" sentinel.
    pub const IMMEDIATE: TimeTag = TimeTag(1);

    /// Tag for the current wall-clock time.
    pub fn now() -> Self {
        TimeTag::from_system_time(SystemTime::now())
    }

    /// Raw 64-bit wire value.
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }

    /// Whole seconds since the 1900 epoch (high 32 bits).
    #[inline]
    pub fn seconds(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Fractional second in 2^-32 ticks (low 32 bits).
    #[inline]
    pub fn fraction(self) -> u32 {
        (self.0 & 0xFFFF_FFFF) as u32
    }

    #[inline]
    pub fn is_immediate(self) -> bool {
        self.0 == 1
    }

    /// Convert a wall-clock time into a tag.
    ///
    /// Times before the 1900 epoch clamp to tag `0`. The fraction is rounded
    /// to the nearest tick; a carry of a full second rolls into the seconds
    /// field.
    pub fn from_system_time(t: SystemTime) -> Self {
        let since_epoch = match t.duration_since(UNIX_EPOCH) {
            Ok(d) => d + Duration::from_secs(EPOCH_DELTA_SECS),
            // Between 1900 and 1970, or clamped to zero before 1900.
            Err(e) => match Duration::from_secs(EPOCH_DELTA_SECS).checked_sub(e.duration()) {
                Some(d) => d,
                None => return TimeTag(0),
            },
        };

        let mut secs = since_epoch.as_secs();
        let mut frac = ((since_epoch.subsec_nanos() as u128 * TICKS_PER_SEC as u128
            + 500_000_000)
            / 1_000_000_000) as u64;
        if frac >= TICKS_PER_SEC {
            secs += 1;
            frac = 0;
        }

        TimeTag(((secs as u32 as u64) << 32) | frac)
    }

    /// Convert the tag to a wall-clock time.
    ///
    /// The sentinel yields the current time at the moment of the call, not a
    /// value computed from the bit pattern.
    pub fn to_system_time(self) -> SystemTime {
        if self.is_immediate() {
            return SystemTime::now();
        }

        let secs = self.seconds() as i64 - EPOCH_DELTA_SECS as i64;
        let frac = self.fraction() as u64;
        let nanos = ((frac * 1_000_000_000 + (1 << 31)) >> 32) as u32;

        if secs >= 0 {
            UNIX_EPOCH + Duration::new(secs as u64, nanos)
        } else {
            UNIX_EPOCH
                .checked_sub(Duration::from_secs((-secs) as u64))
                .unwrap_or(UNIX_EPOCH)
                + Duration::new(0, nanos)
        }
    }

    /// Total seconds as a double (whole seconds plus fraction).
    ///
    /// The sentinel is exempt and yields `0.0`.
    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        if self.is_immediate() {
            return 0.0;
        }
        self.0 as f64 / TICKS_PER_SEC as f64
    }

    /// Build a tag from total seconds since the 1900 epoch.
    #[inline]
    pub fn from_secs_f64(secs: f64) -> Self {
        TimeTag((secs * TICKS_PER_SEC as f64) as u64)
    }

    /// Fractional part of the second as a double.
    ///
    /// The sentinel is exempt and yields `0.0`.
    #[inline]
    pub fn frac_f64(self) -> f64 {
        if self.is_immediate() {
            return 0.0;
        }
        self.fraction() as f64 / TICKS_PER_SEC as f64
    }
}

impl From<u64> for TimeTag {
    #[inline]
    fn from(raw: u64) -> Self {
        TimeTag(raw)
    }
}

/// Raw-value equality, kept alongside `PartialEq<Self>`.
impl PartialEq<u64> for TimeTag {
    #[inline]
    fn eq(&self, other: &u64) -> bool {
        self.0 == *other
    }
}

impl std::fmt::Debug for TimeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_immediate() {
            write!(f, "TimeTag(immediate)")
        } else {
            write!(f, "TimeTag({}+{:.9}s)", self.seconds(), self.frac_f64())
        }
    }
}
