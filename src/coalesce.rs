//! The coalescing engine: index-based merge and compaction of a
//! region sequence so that no two stored regions overlap.

use crate::region::Region;
use std::ops::Range;

/// Indices within `range` whose region is equal to, intersects, or is
/// covered by `reference`. Linear scan.
pub(crate) fn overlapping(regions: &[Region], reference: Region, range: Range<usize>) -> Vec<usize> {
    range
        .filter(|&i| {
            reference == regions[i]
                || reference.intersects(regions[i])
                || reference.covers(regions[i])
        })
        .collect()
}

/// Union every region named by `merged` into `regions[target]`, then
/// remove the merged entries in a single left-shift compaction pass.
///
/// `merged` must be ascending and must not contain `target`.
pub(crate) fn merge_into(regions: &mut Vec<Region>, target: usize, merged: &[usize]) {
    debug_assert!(merged.windows(2).all(|pair| pair[0] < pair[1]));
    debug_assert!(!merged.contains(&target));

    for &i in merged {
        regions[target] = regions[target].cover(regions[i]);
    }

    // Compact by shifting survivors over the removed slots, positions
    // only, never live iterators.
    let mut next_removed = 0;
    let mut removed = 0;
    for i in 0..regions.len() {
        if next_removed < merged.len() && i == merged[next_removed] {
            next_removed += 1;
            removed += 1;
        } else if removed > 0 {
            regions[i - removed] = regions[i];
        }
    }
    regions.truncate(regions.len() - removed);
}

/// Single left-to-right coalescing pass.
///
/// For each position i, the prefix `[0, i)` is already pairwise
/// non-overlapping (carried inductively from earlier iterations).
/// Any prefix entries overlapping `regions[i]` are merged into the
/// first of them together with `regions[i]` itself; the scan then
/// resumes at the shifted position of the next unvisited entry, so
/// every region is scanned as a reference exactly once.
pub(crate) fn coalesce(regions: &mut Vec<Region>) {
    let mut i = 1;
    while i < regions.len() {
        let overlaps = overlapping(regions, regions[i], 0..i);
        if overlaps.is_empty() {
            i += 1;
            continue;
        }
        let target = overlaps[0];
        let mut merged = overlaps[1..].to_vec();
        merged.push(i);
        merge_into(regions, target, &merged);
        // The next unvisited entry shifted down past the removed
        // prefix entries; the current slot now holds it.
        i -= overlaps.len() - 1;
    }
}
