// This file is part of Opmeter.
//
// Opmeter is free software: you can redistribute it and/or modify it under the
// terms of the GNU Lesser General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version.
//
// Opmeter is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with Opmeter.
// If not, see https://www.gnu.org/licenses/.

use opmeter_types::Call;

/// Partition `calls` into contiguous batches of at most `capacity` calls.
///
/// Batches preserve the original call order and cover it disjointly; only
/// the final batch may be shorter than `capacity`. An empty input yields no
/// batches rather than one empty batch.
pub fn plan_batches(calls: &[Call], capacity: usize) -> Vec<&[Call]> {
    assert!(capacity > 0, "batch capacity must be positive");
    calls.chunks(capacity).collect()
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Address, U256};

    use super::*;

    fn calls(n: usize) -> Vec<Call> {
        (0..n)
            .map(|i| Call {
                to: Address::with_last_byte(i as u8 + 1),
                value: U256::from(i),
            })
            .collect()
    }

    #[test]
    fn test_empty_input_yields_no_batches() {
        assert!(plan_batches(&[], 5).is_empty());
    }

    #[test]
    fn test_seven_calls_split_five_two() {
        let calls = calls(7);
        let batches = plan_batches(&calls, 5);
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].len(), 5);
        assert_eq!(batches[1].len(), 2);
    }

    #[test]
    fn test_partition_reconstructs_input() {
        for n in 0..=17 {
            let calls = calls(n);
            let batches = plan_batches(&calls, 5);
            assert_eq!(batches.len(), n.div_ceil(5));

            // All but the last batch are full.
            for batch in batches.iter().take(batches.len().saturating_sub(1)) {
                assert_eq!(batch.len(), 5);
            }

            let rebuilt: Vec<Call> = batches.concat();
            assert_eq!(rebuilt, calls);
        }
    }

    #[test]
    fn test_exact_multiple_has_no_short_batch() {
        let calls = calls(10);
        let batches = plan_batches(&calls, 5);
        assert_eq!(batches.len(), 2);
        assert!(batches.iter().all(|b| b.len() == 5));
    }

    #[test]
    #[should_panic(expected = "batch capacity must be positive")]
    fn test_zero_capacity_panics() {
        plan_batches(&calls(1), 0);
    }
}
