/// Duration of one nominal frame; a time scale of 1.0 corresponds to this many milliseconds.
pub const NOMINAL_FRAME_MS: f64 = 16.66;

/// Longest single-frame delta the simulation will integrate.
pub const FRAME_CEILING_MS: f64 = 100.0;

/// Elapsed time for one tick, already clamped and normalized.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeStep {
    /// Clamped elapsed milliseconds, never negative.
    pub dt_ms: f64,
    /// `dt_ms` in nominal frames. Every motion and decay formula multiplies by this.
    pub scale: f64,
}

impl TimeStep {
    /// No motion this tick.
    pub const ZERO: Self = Self {
        dt_ms: 0.0,
        scale: 0.0,
    };

    /// Exactly one nominal frame.
    pub const NOMINAL: Self = Self {
        dt_ms: NOMINAL_FRAME_MS,
        scale: 1.0,
    };

    /// Normalize `elapsed_ms` with the default frame constants.
    pub fn from_elapsed_ms(elapsed_ms: f64) -> Self {
        Self::with_limits(elapsed_ms, NOMINAL_FRAME_MS, FRAME_CEILING_MS)
    }

    /// Normalize `elapsed_ms` against `nominal_ms`, clamping it to `[0, ceiling_ms]`.
    ///
    /// Zero, negative and non-finite deltas (clock anomalies) become [`TimeStep::ZERO`].
    pub fn with_limits(elapsed_ms: f64, nominal_ms: f64, ceiling_ms: f64) -> Self {
        if !(elapsed_ms.is_finite() && elapsed_ms > 0.0) {
            return Self::ZERO;
        }
        let nominal = if nominal_ms.is_finite() && nominal_ms > 0.0 {
            nominal_ms
        } else {
            NOMINAL_FRAME_MS
        };
        let ceiling = if ceiling_ms.is_finite() && ceiling_ms > 0.0 {
            ceiling_ms
        } else {
            FRAME_CEILING_MS
        };
        let dt_ms = elapsed_ms.min(ceiling);
        Self {
            dt_ms,
            scale: dt_ms / nominal,
        }
    }

    /// Return `true` when nothing should move.
    pub fn is_still(self) -> bool {
        self.scale <= 0.0
    }
}

/// Turns absolute frame timestamps into [`TimeStep`]s.
///
/// Orchestration code that stops ticking while the page is hidden calls [`FrameClock::resume`]
/// when ticking restarts so the first delta after the pause is not a stale jump.
#[derive(Clone, Debug)]
pub struct FrameClock {
    last_ms: Option<f64>,
    nominal_ms: f64,
    ceiling_ms: f64,
}

impl FrameClock {
    /// Clock using the default frame constants.
    pub fn new() -> Self {
        Self::with_limits(NOMINAL_FRAME_MS, FRAME_CEILING_MS)
    }

    /// Clock with explicit nominal frame length and ceiling.
    pub fn with_limits(nominal_ms: f64, ceiling_ms: f64) -> Self {
        Self {
            last_ms: None,
            nominal_ms,
            ceiling_ms,
        }
    }

    /// Advance to `now_ms`. The first call only establishes the baseline.
    pub fn tick(&mut self, now_ms: f64) -> TimeStep {
        let step = match self.last_ms {
            Some(last) => TimeStep::with_limits(now_ms - last, self.nominal_ms, self.ceiling_ms),
            None => TimeStep::ZERO,
        };
        if now_ms.is_finite() {
            self.last_ms = Some(now_ms);
        }
        step
    }

    /// Reset the baseline after a pause.
    pub fn resume(&mut self, now_ms: f64) {
        self.last_ms = now_ms.is_finite().then_some(now_ms);
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
