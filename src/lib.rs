//! A single-pole (RC) low-pass filter for embedded signal conditioning.
//!
//! The filter keeps a single value of state and advances it with the
//! exponential-moving-average recurrence
//!
//! ```text
//! y[i] = y[i-1] + α · (x[i] - y[i-1])
//! ```
//!
//! where the smoothing coefficient `α = dt / (RC + dt)` is either derived
//! from a −3 dB bandwidth (`RC = 1 / (2π·BW)`) or supplied directly. This is
//! the classic RC filter used for sensor smoothing and AGC response shaping
//! in tight control loops.
//!
//! Construction never fails: out-of-range parameters degrade to a
//! pass-through filter (`α = 1`, output equals input) instead of returning an
//! error, so a misconfigured filter still leaves the loop running.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use rc_lowpass::LowPassFilter;
//!
//! // 10 Hz cut-off, sampled every 10 ms.
//! let mut filter = LowPassFilter::from_bandwidth(10.0, Duration::from_millis(10), 0.0);
//!
//! // A step input settles towards 1.0 in roughly 5 time constants.
//! let mut y = 0.0;
//! for _ in 0..100 {
//!     y = filter.next_value(1.0);
//! }
//! assert!((y - 1.0).abs() < 1e-9);
//! ```

pub mod multichannel;

use std::f64::consts::PI;
use std::time::Duration;

/// Construction mode of a filter.
///
/// A fixed-coefficient filter carries no time constant, so variable-interval
/// updates have nothing to recompute from. Keeping the mode explicit avoids
/// branching on a floating-point "time constant is zero" sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) enum Mode {
    /// Derived from a −3 dB bandwidth; carries the RC time constant in
    /// seconds so variable-interval updates can recompute the coefficient.
    Bandwidth {
        /// RC time constant in seconds.
        time_constant: f64,
    },
    /// The coefficient was supplied directly and is never recomputed.
    Fixed,
}

/// Return the RC time constant and per-sample smoothing coefficient for a
/// single-pole low-pass filter with the given −3 dB bandwidth.
///
/// The time constant is `RC = 1 / (2π·bandwidth_hz)` and the coefficient
/// `α = dt / (RC + dt)`. The step response of the resulting filter reaches
/// ~63% of a step input after `RC` seconds and settles within ~5·RC.
///
/// Callers are expected to pass a positive bandwidth and a non-zero
/// interval; the filter constructors fall back to pass-through behavior
/// instead of calling this otherwise.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use rc_lowpass::first_order_rc;
///
/// let (rc, alpha) = first_order_rc(10.0, Duration::from_millis(10));
/// assert!((rc - 0.015_915).abs() < 1e-5);
/// assert!((alpha - 0.385_8).abs() < 1e-4);
/// ```
#[must_use]
pub fn first_order_rc(bandwidth_hz: f64, sample_interval: Duration) -> (f64, f64) {
    let dt = sample_interval.as_secs_f64();
    let time_constant = 1.0 / (2.0 * PI * bandwidth_hz);
    (time_constant, dt / (time_constant + dt))
}

/// A single-pole RC low-pass filter over a scalar signal.
///
/// The filter's only mutable state is the last output value, which is all
/// that is needed to resume filtering. Every update is a pure function of
/// (state, input, optional interval).
///
/// State is kept in `f64` for accumulation stability over long-running
/// loops.
///
/// # Example
///
/// ```rust
/// use rc_lowpass::LowPassFilter;
///
/// // Direct coefficient, halfway between input and state each step.
/// let mut filter = LowPassFilter::from_coefficient(0.5, 0.0);
/// assert_eq!(filter.next_value(10.0), 5.0);
/// assert_eq!(filter.next_value(10.0), 7.5);
/// assert_eq!(filter.last_value(), 7.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LowPassFilter {
    mode: Mode,
    coefficient: f64,
    last_value: f64,
}

impl LowPassFilter {
    /// Create a filter from a −3 dB bandwidth in Hz and the expected
    /// interval between samples, with the state initialized to
    /// `initial_value`.
    ///
    /// A non-positive (or NaN) bandwidth or a zero interval produces a
    /// pass-through filter (`α = 1`) rather than an error; there is no
    /// error channel in a sensor loop, and a pass-through filter keeps the
    /// signal flowing.
    #[must_use]
    pub fn from_bandwidth(
        bandwidth_hz: f64,
        sample_interval: Duration,
        initial_value: f64,
    ) -> Self {
        if bandwidth_hz > 0.0 && !sample_interval.is_zero() {
            let (time_constant, coefficient) = first_order_rc(bandwidth_hz, sample_interval);
            Self {
                mode: Mode::Bandwidth { time_constant },
                coefficient,
                last_value: initial_value,
            }
        } else {
            Self {
                mode: Mode::Fixed,
                coefficient: 1.0,
                last_value: initial_value,
            }
        }
    }

    /// Create a filter from a smoothing coefficient directly, for the simple
    /// case where no sample rate or bandwidth is involved.
    ///
    /// The coefficient is used as-is when `0 < α < 1`; anything else
    /// (including NaN) clamps to `1`, a pass-through filter.
    #[must_use]
    pub fn from_coefficient(coefficient: f64, initial_value: f64) -> Self {
        let coefficient = if coefficient > 0.0 && coefficient < 1.0 {
            coefficient
        } else {
            1.0
        };

        Self {
            mode: Mode::Fixed,
            coefficient,
            last_value: initial_value,
        }
    }

    /// Reset the filter output to `initial_value`.
    ///
    /// The coefficient and time constant are unchanged, so the filter keeps
    /// its configured response.
    pub fn reset(&mut self, initial_value: f64) {
        self.last_value = initial_value;
    }

    /// The last value output by the filter.
    #[must_use]
    pub fn last_value(&self) -> f64 {
        self.last_value
    }

    /// The current smoothing coefficient `α`.
    #[must_use]
    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    /// The RC time constant in seconds, or `None` for a fixed-coefficient
    /// filter.
    #[must_use]
    pub fn time_constant(&self) -> Option<f64> {
        match self.mode {
            Mode::Bandwidth { time_constant } => Some(time_constant),
            Mode::Fixed => None,
        }
    }

    /// Advance the filter with the next input sample and return the new
    /// output.
    #[must_use]
    pub fn next_value(&mut self, input: f64) -> f64 {
        self.last_value += self.coefficient * (input - self.last_value);
        self.last_value
    }

    /// Advance the filter with the next input sample and the interval since
    /// the previous sample, for loops whose period is not constant (AGC and
    /// similar adaptive responses).
    ///
    /// A bandwidth-constructed filter recomputes `α = dt / (RC + dt)` from
    /// the supplied interval before updating, so the −3 dB point stays where
    /// it was configured even when the loop period jitters. A zero interval
    /// yields `α = 0` and leaves the state unchanged.
    ///
    /// A fixed-coefficient filter has no time constant to recompute from;
    /// the interval is ignored and this is identical to
    /// [`Self::next_value`].
    #[must_use]
    pub fn next_value_with_interval(&mut self, input: f64, sample_interval: Duration) -> f64 {
        if let Mode::Bandwidth { time_constant } = self.mode {
            let dt = sample_interval.as_secs_f64();
            self.coefficient = dt / (time_constant + dt);
        }
        self.next_value(input)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn bandwidth_construction_keeps_coefficient_in_unit_interval() {
        for (bandwidth, interval_ms) in [(0.1, 1), (1.0, 10), (10.0, 10), (500.0, 1), (10.0, 1000)]
        {
            let filter =
                LowPassFilter::from_bandwidth(bandwidth, Duration::from_millis(interval_ms), 0.0);
            assert!(
                filter.coefficient() > 0.0 && filter.coefficient() < 1.0,
                "BW {bandwidth} Hz, dt {interval_ms} ms gave α = {}",
                filter.coefficient()
            );
        }
    }

    #[test]
    fn invalid_bandwidth_is_pass_through() {
        for bandwidth in [0.0, -10.0, f64::NAN] {
            let mut filter =
                LowPassFilter::from_bandwidth(bandwidth, Duration::from_millis(10), 0.0);
            assert_eq!(filter.coefficient(), 1.0);
            assert_eq!(filter.time_constant(), None);
            assert_eq!(filter.next_value(42.5), 42.5);
            assert_eq!(filter.next_value(-3.25), -3.25);
        }
    }

    #[test]
    fn zero_interval_is_pass_through() {
        let mut filter = LowPassFilter::from_bandwidth(10.0, Duration::ZERO, 0.0);
        assert_eq!(filter.coefficient(), 1.0);
        assert_eq!(filter.next_value(7.0), 7.0);
    }

    #[test]
    fn out_of_range_coefficient_clamps_to_pass_through() {
        for coefficient in [0.0, -0.5, 1.0, 1.5, f64::NAN] {
            let mut filter = LowPassFilter::from_coefficient(coefficient, 0.0);
            assert_eq!(filter.coefficient(), 1.0);
            assert_eq!(filter.next_value(3.5), 3.5);
        }
    }

    #[test]
    fn fixed_coefficient_update_sequence() {
        let mut filter = LowPassFilter::from_coefficient(0.5, 0.0);
        assert_eq!(filter.next_value(10.0), 5.0);
        assert_eq!(filter.next_value(10.0), 7.5);
        assert_eq!(filter.last_value(), 7.5);
    }

    #[test]
    fn bandwidth_construction_matches_rc_formula() {
        let mut filter = LowPassFilter::from_bandwidth(10.0, Duration::from_millis(10), 0.0);
        let time_constant = filter.time_constant().unwrap();
        assert!((time_constant - 0.015_92).abs() < 1e-5);
        assert!((filter.coefficient() - 0.385_8).abs() < 1e-4);
        assert!((filter.next_value(1.0) - 0.385_8).abs() < 1e-4);
    }

    #[test]
    fn constant_input_converges_monotonically() {
        let mut filter = LowPassFilter::from_bandwidth(10.0, Duration::from_millis(10), 0.0);
        let mut previous = filter.last_value();

        // 2 s of samples, far beyond the ~0.08 s settling time (5·RC).
        for _ in 0..200 {
            let output = filter.next_value(1.0);
            // Non-decreasing rather than strict: once within an ulp of the
            // target the update rounds to no change.
            assert!(output >= previous);
            assert!(output <= 1.0);
            previous = output;
        }
        assert!((filter.last_value() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn reset_overwrites_state_exactly() {
        let mut filter = LowPassFilter::from_bandwidth(10.0, Duration::from_millis(10), 0.0);
        let _ = filter.next_value(123.0);
        let _ = filter.next_value(-7.5);

        filter.reset(2.25);
        assert_eq!(filter.last_value(), 2.25);

        filter.reset(0.0);
        assert_eq!(filter.last_value(), 0.0);
    }

    #[test]
    fn variable_interval_recomputes_coefficient_in_bandwidth_mode() {
        let mut filter = LowPassFilter::from_bandwidth(10.0, Duration::from_millis(10), 0.0);
        let time_constant = filter.time_constant().unwrap();

        let output = filter.next_value_with_interval(1.0, Duration::from_millis(20));
        let expected_alpha = 0.02 / (time_constant + 0.02);
        assert_eq!(filter.coefficient(), expected_alpha);
        assert!((output - expected_alpha).abs() < 1e-12);
    }

    #[test]
    fn variable_interval_is_ignored_in_fixed_mode() {
        let mut filter = LowPassFilter::from_coefficient(0.5, 0.0);
        let output = filter.next_value_with_interval(10.0, Duration::from_millis(500));
        assert_eq!(output, 5.0);
        assert_eq!(filter.coefficient(), 0.5);
    }

    #[test]
    fn zero_interval_update_leaves_state_unchanged() {
        let mut filter = LowPassFilter::from_bandwidth(10.0, Duration::from_millis(10), 0.0);
        let _ = filter.next_value(1.0);
        let before = filter.last_value();

        let output = filter.next_value_with_interval(100.0, Duration::ZERO);
        assert_eq!(output, before);
        assert_eq!(filter.coefficient(), 0.0);
    }
}
