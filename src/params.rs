use crate::{errors::TicketError, types::{DEFAULT_DIGITS, DEFAULT_INTERVAL_SECS, INNER_PAD, MAX_DIGITS, MAX_SKEW_STEPS, OUTER_PAD}};

/// Immutable passcode parameters shared by the engine, the generator and the service.
///
/// Build with [`Params::new`] (validated) or take [`Params::default`]
/// (30 s steps, 6 digits, epoch 0, no skew tolerance, standard pads).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawParams"))]
pub struct Params {
    interval_secs: u64,
    digits: u32,
    epoch: u64,
    skew_steps: u64,
    inner_pad: u8,
    outer_pad: u8,
}

impl Params {
    pub const DEFAULT: Self = Self {
        interval_secs: DEFAULT_INTERVAL_SECS,
        digits: DEFAULT_DIGITS,
        epoch: 0,
        skew_steps: 0,
        inner_pad: INNER_PAD,
        outer_pad: OUTER_PAD,
    };

    /// # Errors
    ///
    /// Returns `TicketError::InvalidParams` if `interval_secs` is zero or
    /// `digits` is outside `1..=MAX_DIGITS`.
    pub const fn new(interval_secs: u64, digits: u32) -> Result<Self, TicketError> {
        if interval_secs == 0 {
            return Err(TicketError::InvalidParams("interval must be positive"));
        }
        if digits == 0 || digits > MAX_DIGITS {
            return Err(TicketError::InvalidParams("digits must be in 1..=9"));
        }
        Ok(Self { interval_secs, digits, ..Self::DEFAULT })
    }

    #[must_use]
    pub const fn with_epoch(mut self, epoch: u64) -> Self {
        self.epoch = epoch;
        self
    }

    /// Accept codes from up to `steps` time steps either side of "now".
    ///
    /// # Errors
    ///
    /// Returns `TicketError::InvalidParams` if `steps` exceeds `MAX_SKEW_STEPS`.
    pub const fn with_skew_steps(mut self, steps: u64) -> Result<Self, TicketError> {
        if steps > MAX_SKEW_STEPS {
            return Err(TicketError::InvalidParams("skew must be at most 10 steps"));
        }
        self.skew_steps = steps;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `TicketError::InvalidParams` if both pads are equal.
    pub const fn with_pads(mut self, inner: u8, outer: u8) -> Result<Self, TicketError> {
        if inner == outer {
            return Err(TicketError::InvalidParams("inner and outer pads must differ"));
        }
        self.inner_pad = inner;
        self.outer_pad = outer;
        Ok(self)
    }

    #[must_use] pub const fn interval_secs(&self) -> u64 { self.interval_secs }
    #[must_use] pub const fn digits(&self) -> u32 { self.digits }
    #[must_use] pub const fn epoch(&self) -> u64 { self.epoch }
    #[must_use] pub const fn skew_steps(&self) -> u64 { self.skew_steps }
    #[must_use] pub const fn inner_pad(&self) -> u8 { self.inner_pad }
    #[must_use] pub const fn outer_pad(&self) -> u8 { self.outer_pad }

    /// 10^digits
    #[must_use]
    pub const fn modulus(&self) -> u32 {
        10u32.pow(self.digits)
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawParams {
    interval_secs: u64,
    digits: u32,
    #[serde(default)]
    epoch: u64,
    #[serde(default)]
    skew_steps: u64,
    #[serde(default = "default_inner_pad")]
    inner_pad: u8,
    #[serde(default = "default_outer_pad")]
    outer_pad: u8,
}

#[cfg(feature = "serde")]
const fn default_inner_pad() -> u8 { INNER_PAD }

#[cfg(feature = "serde")]
const fn default_outer_pad() -> u8 { OUTER_PAD }

#[cfg(feature = "serde")]
impl TryFrom<RawParams> for Params {
    type Error = TicketError;
    fn try_from(raw: RawParams) -> Result<Self, Self::Error> {
        Self::new(raw.interval_secs, raw.digits)?
            .with_epoch(raw.epoch)
            .with_skew_steps(raw.skew_steps)?
            .with_pads(raw.inner_pad, raw.outer_pad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_wire_format() {
        let p = Params::default();
        assert_eq!(p.interval_secs(), 30);
        assert_eq!(p.digits(), 6);
        assert_eq!(p.modulus(), 1_000_000);
        assert_eq!(p.skew_steps(), 0);
        assert_eq!((p.inner_pad(), p.outer_pad()), (0x36, 0x5c));
        assert_eq!(Params::new(30, 6).unwrap(), p);
    }

    #[test]
    fn rejects_degenerate_values() {
        assert!(matches!(Params::new(0, 6), Err(TicketError::InvalidParams(_))));
        assert!(matches!(Params::new(30, 0), Err(TicketError::InvalidParams(_))));
        assert!(matches!(Params::new(30, 10), Err(TicketError::InvalidParams(_))));
        assert!(Params::new(30, 9).is_ok());
        assert!(Params::default().with_pads(0x36, 0x36).is_err());
    }

    #[test]
    fn skew_is_bounded() {
        let p = Params::default().with_skew_steps(MAX_SKEW_STEPS).unwrap();
        assert_eq!(p.skew_steps(), MAX_SKEW_STEPS);
        assert!(matches!(Params::default().with_skew_steps(MAX_SKEW_STEPS + 1), Err(TicketError::InvalidParams(_))));
        assert!(matches!(Params::default().with_skew_steps(u64::MAX), Err(TicketError::InvalidParams(_))));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_with_validation() {
        let p: Params = serde_json::from_str(r#"{"interval_secs":60,"digits":8,"skew_steps":1}"#).unwrap();
        assert_eq!(p.interval_secs(), 60);
        assert_eq!(p.digits(), 8);
        assert_eq!(p.skew_steps(), 1);
        assert_eq!(p.inner_pad(), 0x36);
        assert!(serde_json::from_str::<Params>(r#"{"interval_secs":0,"digits":6}"#).is_err());
        assert!(serde_json::from_str::<Params>(r#"{"interval_secs":30,"digits":6,"skew_steps":18446744073709551615}"#).is_err());
    }
}
