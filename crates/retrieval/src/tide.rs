//! Lightweight tide used to backfill sea level on the hybrid path.

use ocean_common::round_to;

/// Amplitude of the inline tide (m).
pub const INLINE_TIDE_AMPLITUDE_M: f64 = 1.2;
/// Phase advance per time step (rad).
pub const INLINE_TIDE_RATE: f64 = 0.5;

/// Sea level at time step `i`: a single sinusoid, rounded to centimetres.
///
/// ```
/// use retrieval::inline_tide;
///
/// assert_eq!(inline_tide(0), 0.0);
/// assert_eq!(inline_tide(3), 1.2);
/// ```
pub fn inline_tide(i: usize) -> f64 {
    round_to(INLINE_TIDE_AMPLITUDE_M * (i as f64 * INLINE_TIDE_RATE).sin(), 2)
}
