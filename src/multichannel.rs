//! Single-pole RC low-pass filtering for NxM-dimensional signals.
//!
//! Multi-axis sensors (accelerometers, gyroscopes) produce vector samples
//! that should be smoothed with one common response across channels. The
//! [`MultiChannelLowPassFilter`] applies the scalar recurrence element-wise
//! with a single shared coefficient, so every channel sees the same −3 dB
//! point.

use std::time::Duration;

use nalgebra::SMatrix;

use crate::{first_order_rc, Mode};

/// A single-pole RC low-pass filter over an NxM-dimensional signal.
///
/// Construction modes, pass-through degradation, and update semantics are
/// identical to [`LowPassFilter`](crate::LowPassFilter); the state is an
/// `SMatrix<f64, N, M>` updated element-wise with one shared coefficient.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use nalgebra::Vector3;
/// use rc_lowpass::multichannel::MultiChannelLowPassFilter;
///
/// // Smooth a 3-axis accelerometer sampled every 10 ms.
/// let mut filter = MultiChannelLowPassFilter::<3, 1>::from_bandwidth(
///     10.0,
///     Duration::from_millis(10),
///     Vector3::zeros(),
/// );
///
/// let sample = Vector3::new(0.1, 0.0, 9.81);
/// let smoothed = filter.next_value(sample);
/// assert!(smoothed.z < sample.z);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiChannelLowPassFilter<const N: usize, const M: usize> {
    mode: Mode,
    coefficient: f64,
    last_value: SMatrix<f64, N, M>,
}

impl<const N: usize, const M: usize> MultiChannelLowPassFilter<N, M> {
    /// Create a filter from a −3 dB bandwidth in Hz and the expected
    /// interval between samples, with the state initialized to
    /// `initial_value`.
    ///
    /// Invalid parameters (non-positive bandwidth, zero interval) produce a
    /// pass-through filter, as with the scalar constructor.
    #[must_use]
    pub fn from_bandwidth(
        bandwidth_hz: f64,
        sample_interval: Duration,
        initial_value: SMatrix<f64, N, M>,
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

    /// Create a filter from a smoothing coefficient directly.
    ///
    /// The coefficient is used as-is when `0 < α < 1`, and clamps to `1`
    /// (pass-through) otherwise.
    #[must_use]
    pub fn from_coefficient(coefficient: f64, initial_value: SMatrix<f64, N, M>) -> Self {
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

    /// Reset the filter output to `initial_value`, keeping the configured
    /// response.
    pub fn reset(&mut self, initial_value: SMatrix<f64, N, M>) {
        self.last_value = initial_value;
    }

    /// The last value output by the filter.
    #[must_use]
    pub fn last_value(&self) -> SMatrix<f64, N, M> {
        self.last_value
    }

    /// The current smoothing coefficient `α`, shared by all channels.
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
    pub fn next_value(&mut self, input: SMatrix<f64, N, M>) -> SMatrix<f64, N, M> {
        self.last_value += (input - self.last_value) * self.coefficient;
        self.last_value
    }

    /// Advance the filter with the next input sample and the interval since
    /// the previous sample.
    ///
    /// Bandwidth-constructed filters recompute `α = dt / (RC + dt)` before
    /// updating; fixed-coefficient filters ignore the interval.
    #[must_use]
    pub fn next_value_with_interval(
        &mut self,
        input: SMatrix<f64, N, M>,
        sample_interval: Duration,
    ) -> SMatrix<f64, N, M> {
        if let Mode::Bandwidth { time_constant } = self.mode {
            let dt = sample_interval.as_secs_f64();
            self.coefficient = dt / (time_constant + dt);
        }
        self.next_value(input)
    }
}
