/*
 * Copyright © 2024. EcomDev B.V.
 * All rights reserved.
 * See LICENSE for license details.
 */

//! Nearest-rank percentile over raw observations
//!
//! For `n` sorted observations and `rank = p * n`:
//!
//! * fractional rank selects element at `ceil(rank)`;
//! * whole rank averages elements at `rank` and `rank + 1`;
//! * zero rank selects the minimum.
//!
//! Positions are zero-based and clamped to the last element,
//! so `p = 1.0` always returns the maximum.

use super::AggregateError;

/// Calculates percentile over a private sorted copy of `observations`
///
/// Caller data is left untouched, use [`percentile_mut`] to avoid the copy.
///
/// # Example
/// ```
/// use compacted_json::aggregate::percentile;
///
/// assert_eq!(percentile(0.95, &[300.0, 100.0, 200.0]), Ok(300.0));
/// assert_eq!(percentile(0.5, &[4.0, 1.0, 3.0, 2.0]), Ok(3.5));
/// ```
pub fn percentile(percentile: f64, observations: &[f64]) -> Result<f64, AggregateError> {
    validate(percentile, observations)?;
    let mut sorted = observations.to_vec();
    percentile_mut(percentile, &mut sorted)
}

/// Calculates percentile by sorting `observations` in place
pub fn percentile_mut(
    percentile: f64,
    observations: &mut [f64],
) -> Result<f64, AggregateError> {
    validate(percentile, observations)?;
    observations.sort_unstable_by(f64::total_cmp);

    let last = observations.len() - 1;
    let rank = percentile * observations.len() as f64;
    let index = (rank.ceil() as usize).min(last);

    if rank == 0.0 {
        return Ok(observations[0]);
    }

    if rank.fract() == 0.0 {
        let next = (index + 1).min(last);
        return Ok((observations[index] + observations[next]) / 2.0);
    }

    Ok(observations[index])
}

fn validate(percentile: f64, observations: &[f64]) -> Result<(), AggregateError> {
    if !(0.0..=1.0).contains(&percentile) {
        return Err(AggregateError::PercentileOutOfRange(percentile));
    }

    if observations.is_empty() {
        return Err(AggregateError::EmptyInput);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const OBSERVATIONS: &[f64] = &[
        120.0, 35.5, 48.0, 900.0, 61.25, 33.0, 77.0, 410.0, 52.0, 18.75, 240.0, 95.0,
    ];

    #[test]
    fn selects_element_at_ceiling_of_fractional_rank() {
        assert_eq!(percentile(0.95, &[100.0, 200.0, 300.0]), Ok(300.0));
        assert_eq!(percentile(0.3, &[10.0, 20.0, 30.0, 40.0]), Ok(30.0));
        assert_eq!(percentile(0.1, &[5.0, 1.0, 4.0, 2.0, 3.0, 6.0]), Ok(2.0));
    }

    #[test]
    fn averages_neighbours_on_whole_rank() {
        assert_eq!(percentile(0.5, &[1.0, 2.0, 3.0, 4.0]), Ok(3.5));
        assert_eq!(percentile(0.25, &[8.0, 2.0, 6.0, 4.0]), Ok(5.0));
    }

    #[test]
    fn clamps_rank_past_last_observation() {
        assert_eq!(percentile(0.95, &[50.0]), Ok(50.0));
        assert_eq!(percentile(0.95, &[100.0, 200.0, 300.0, 50.0]), Ok(300.0));
        assert_eq!(percentile(0.75, &[1.0, 2.0, 3.0, 4.0]), Ok(4.0));
    }

    #[test]
    fn returns_maximum_for_full_percentile() {
        let max = OBSERVATIONS.iter().copied().fold(f64::MIN, f64::max);

        assert_eq!(percentile(1.0, OBSERVATIONS), Ok(max));
        assert_eq!(percentile(1.0, &[7.0]), Ok(7.0));
    }

    #[test]
    fn returns_minimum_for_zero_percentile() {
        let min = OBSERVATIONS.iter().copied().fold(f64::MAX, f64::min);

        assert_eq!(percentile(0.0, OBSERVATIONS), Ok(min));
        assert_eq!(percentile(0.0, &[7.0]), Ok(7.0));
    }

    #[test]
    fn result_does_not_depend_on_input_order() {
        let mut sorted = OBSERVATIONS.to_vec();
        sorted.sort_by(f64::total_cmp);
        let mut reversed = sorted.clone();
        reversed.reverse();

        for p in [0.0, 0.1, 0.25, 0.5, 0.9, 0.95, 0.99, 1.0] {
            let expected = percentile(p, OBSERVATIONS);
            assert_eq!(percentile(p, &sorted), expected, "sorted input at {p}");
            assert_eq!(percentile(p, &reversed), expected, "reversed input at {p}");
        }
    }

    #[test]
    fn leaves_caller_observations_untouched() {
        let observations = vec![3.0, 1.0, 2.0];

        percentile(0.5, &observations).unwrap();

        assert_eq!(observations, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn sorts_observations_in_place_when_mutable() {
        let mut observations = vec![3.0, 1.0, 2.0];

        assert_eq!(percentile_mut(0.95, &mut observations), Ok(3.0));
        assert_eq!(observations, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn rejects_empty_observations() {
        assert_eq!(percentile(0.95, &[]), Err(AggregateError::EmptyInput));
        assert_eq!(percentile_mut(0.5, &mut []), Err(AggregateError::EmptyInput));
    }

    #[test]
    fn rejects_percentile_outside_of_unit_range() {
        assert_eq!(
            percentile(1.5, &[1.0]),
            Err(AggregateError::PercentileOutOfRange(1.5))
        );
        assert_eq!(
            percentile(-0.1, &[1.0]),
            Err(AggregateError::PercentileOutOfRange(-0.1))
        );
        assert!(matches!(
            percentile(f64::NAN, &[1.0]),
            Err(AggregateError::PercentileOutOfRange(_))
        ));
    }
}
