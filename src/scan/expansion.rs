use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};

use crate::types::ParamSet;

use super::Scan;

/// One run requested by a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanPoint {
    /// Flat index of the parameter combination, `0..combination_count()`.
    pub combination: usize,
    /// Which repetition of this combination, `0..repeats`.
    pub repeat: usize,
    /// Total repetitions requested for this combination.
    pub repeats: usize,
    pub params: ParamSet,
}

/// Row-major unravel of a flat index into per-axis subscripts.
/// The last axis varies fastest. Empty axes get subscript 0.
pub fn unravel_index(mut index: usize, sizes: &[usize]) -> Vec<usize> {
    let mut sub = vec![0; sizes.len()];
    for (slot, &size) in sub.iter_mut().zip(sizes).rev() {
        if size == 0 {
            continue;
        }
        *slot = index % size;
        index /= size;
    }
    sub
}

/// Lazy walk over every combination of a scan, each repeated as many times
/// as the scan's repeat rules ask for.
pub struct ScanIter<'a> {
    scan: &'a Scan,
    sizes: Vec<usize>,
    total: usize,
    next_combination: usize,
    current: Option<Pending>,
}

struct Pending {
    combination: usize,
    params: ParamSet,
    repeats: usize,
    next_repeat: usize,
}

impl<'a> ScanIter<'a> {
    pub(crate) fn new(scan: &'a Scan) -> Self {
        let sizes = scan.axis_sizes();
        let total = scan.combination_count();

        tracing::debug!(axes = sizes.len(), combinations = total, "Expanding scan");

        Self {
            scan,
            sizes,
            total,
            next_combination: 0,
            current: None,
        }
    }

    fn combination(&self, index: usize) -> ParamSet {
        let sub = unravel_index(index, &self.sizes);
        let mut params = ParamSet::new();

        let comb = self.scan.comb_params();
        for ((name, values), &i) in comb.iter().zip(&sub) {
            params.insert(name.clone(), values[i].clone());
        }

        for (group, &i) in self.scan.joint_groups().iter().zip(&sub[comb.len()..]) {
            for (name, values) in group.params() {
                params.insert(name.clone(), values[i].clone());
            }
        }

        params
    }
}

impl Iterator for ScanIter<'_> {
    type Item = ScanPoint;

    fn next(&mut self) -> Option<ScanPoint> {
        loop {
            if let Some(pending) = self.current.as_mut() {
                if pending.next_repeat < pending.repeats {
                    let point = ScanPoint {
                        combination: pending.combination,
                        repeat: pending.next_repeat,
                        repeats: pending.repeats,
                        params: pending.params.clone(),
                    };
                    pending.next_repeat += 1;
                    return Some(point);
                }
                self.current = None;
            }

            if self.next_combination >= self.total {
                return None;
            }

            let combination = self.next_combination;
            self.next_combination += 1;

            let params = self.combination(combination);
            let repeats = self.scan.repeat_count(&params);
            if repeats == 0 {
                tracing::debug!(combination, "Skipping combination with zero repeats");
            }

            self.current = Some(Pending {
                combination,
                params,
                repeats,
                next_repeat: 0,
            });
        }
    }
}

impl FusedIterator for ScanIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unravel_is_row_major() {
        assert_eq!(unravel_index(0, &[3, 5]), vec![0, 0]);
        assert_eq!(unravel_index(4, &[3, 5]), vec![0, 4]);
        assert_eq!(unravel_index(5, &[3, 5]), vec![1, 0]);
        assert_eq!(unravel_index(14, &[3, 5]), vec![2, 4]);
        assert_eq!(unravel_index(0, &[]), Vec::<usize>::new());
    }
}
