//! The coalescing region set.
//!
//! `RegionSet` tracks the selections of one buffer, merging any
//! overlapping regions so the stored sequence stays pairwise
//! non-overlapping. Regions that merely touch are kept apart so that
//! multiple cursors can sit right next to each other.
//!
//! Every operation serializes on an internal mutex; share a set
//! between threads (or views of one document) behind an `Arc`.
//! Registered change callbacks are always invoked with the lock
//! released, so a callback may call back into the set.

use crate::coalesce::{coalesce, merge_into, overlapping};
use crate::lock::LockResultExt;
use crate::observers::ObserverRegistry;
use crate::region::Region;
use std::sync::{Arc, Mutex, MutexGuard};

/// A set of regions kept free of overlap by merging.
///
/// The stored order reflects insertion and merge history, not
/// left-to-right buffer order; callers that need sorted regions sort
/// the [`regions`](Self::regions) snapshot themselves.
#[derive(Default)]
pub struct RegionSet {
    regions: Mutex<Vec<Region>>,
    observers: ObserverRegistry,
}

impl RegionSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set from an initial batch of regions, coalescing them.
    pub fn from_regions(regions: &[Region]) -> Self {
        let set = Self::new();
        set.add_all(regions);
        set
    }

    /// Every read and structural mutation goes through this guard.
    fn lock(&self, context: &str) -> MutexGuard<'_, Vec<Region>> {
        self.regions.lock().recover_poison(context)
    }

    /// Invoke the registered change callbacks. Callers must have
    /// released the region guard first.
    fn changed(&self) {
        self.observers.notify_all();
    }

    /// Shift every region for a buffer edit of `delta` bytes at
    /// `position`, then re-coalesce; a shift can push regions into
    /// one another.
    pub fn adjust(&self, position: usize, delta: i64) {
        {
            let mut regions = self.lock("set::adjust");
            for region in regions.iter_mut() {
                region.adjust(position, delta);
            }
            coalesce(&mut regions);
            log::trace!(
                target: "region_set::set",
                "adjust({}, {}) left {} regions",
                position,
                delta,
                regions.len()
            );
        }
        self.changed();
    }

    /// Add a region, merging it with any stored regions it overlaps.
    pub fn add(&self, region: Region) {
        {
            let mut regions = self.lock("set::add");
            // The stored sequence is already non-overlapping, so one
            // targeted merge suffices; no full pass needed.
            let overlaps = overlapping(&regions, region, 0..regions.len());
            regions.push(region);
            if !overlaps.is_empty() {
                let mut merged = overlaps[1..].to_vec();
                merged.push(regions.len() - 1);
                merge_into(&mut regions, overlaps[0], &merged);
            }
        }
        self.changed();
    }

    /// Add a batch of regions, merging overlaps, with a single change
    /// notification for the whole batch.
    pub fn add_all(&self, batch: &[Region]) {
        // Phase 1: reduce the batch against itself only.
        let mut batch = batch.to_vec();
        coalesce(&mut batch);

        {
            let mut regions = self.lock("set::add_all");
            // Phase 2: the batch entries are now mutually disjoint, so
            // each appended entry only needs checking against the
            // pre-existing prefix, which shrinks as merges remove
            // entries from it.
            let mut prefix = regions.len();
            let mut index = regions.len();
            regions.extend(batch.iter().copied());
            for _ in 0..batch.len() {
                let overlaps = overlapping(&regions, regions[index], 0..prefix);
                if overlaps.is_empty() {
                    index += 1;
                    continue;
                }
                let mut merged = overlaps[1..].to_vec();
                merged.push(index);
                merge_into(&mut regions, overlaps[0], &merged);
                prefix -= overlaps.len() - 1;
                index -= overlaps.len() - 1;
            }
            log::trace!(
                target: "region_set::set",
                "add_all of {} regions left {} stored",
                batch.len(),
                regions.len()
            );
        }
        self.changed();
    }

    /// Cut `region` away from every stored region and collect the
    /// non-empty remainders into a new, independent set.
    ///
    /// The returned set starts with an empty callback registry; it
    /// does not inherit this set's observers. `self` is not modified
    /// and no notification fires.
    pub fn cut(&self, region: Region) -> RegionSet {
        let result = RegionSet::new();
        let regions = self.lock("set::cut");
        for stored in regions.iter() {
            for remainder in stored.cut(region) {
                if !remainder.is_empty() {
                    result.add(remainder);
                }
            }
        }
        result
    }

    /// Remove `region` from the set, splitting any stored regions
    /// that span it.
    pub fn subtract(&self, region: Region) {
        let replacement = self.cut(region).into_regions();
        {
            // The replacement is coalesced by construction, so only
            // the swap happens under the guard.
            let mut regions = self.lock("set::subtract");
            *regions = replacement;
        }
        self.changed();
    }

    /// Remove every region. The change notification fires even when
    /// the set was already empty; callers rely on it as an
    /// unconditional "set became empty" signal.
    pub fn clear(&self) {
        self.lock("set::clear").clear();
        self.changed();
    }

    /// The region at position `index`.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of range; indices are only valid
    /// immediately after a length check.
    pub fn get(&self, index: usize) -> Region {
        self.lock("set::get")[index]
    }

    /// The number of stored regions.
    pub fn len(&self) -> usize {
        self.lock("set::len").len()
    }

    /// Whether the set holds no regions.
    pub fn is_empty(&self) -> bool {
        self.lock("set::is_empty").is_empty()
    }

    /// Whether `region` is part of the set: stored verbatim, or with
    /// both endpoints inside a single stored region. This is a looser
    /// test than the overlap check used for merging.
    pub fn contains(&self, region: Region) -> bool {
        let regions = self.lock("set::contains");
        regions
            .iter()
            .any(|stored| *stored == region || (stored.contains(region.begin()) && stored.contains(region.end())))
    }

    /// A copy of the stored regions, usable without holding the
    /// set's lock.
    pub fn regions(&self) -> Vec<Region> {
        self.lock("set::regions").clone()
    }

    /// Consume the set, returning its regions.
    pub fn into_regions(self) -> Vec<Region> {
        self.regions.into_inner().recover_poison("set::into_regions")
    }

    /// Whether at least one stored region is non-empty.
    pub fn has_non_empty(&self) -> bool {
        self.lock("set::has_non_empty")
            .iter()
            .any(|region| !region.is_empty())
    }

    /// Whether at least one stored region is a caret.
    pub fn has_empty(&self) -> bool {
        self.lock("set::has_empty")
            .iter()
            .any(|region| region.is_empty())
    }

    /// Register a change callback under `key`, replacing any callback
    /// already registered there. Callbacks run synchronously after
    /// every content change, with no lock held, in unspecified order.
    pub fn on_change(&self, key: impl Into<String>, callback: impl Fn() + Send + Sync + 'static) {
        self.observers.register(key.into(), Arc::new(callback));
    }

    /// Remove the change callback under `key`, if any.
    pub fn clear_on_change(&self, key: &str) {
        self.observers.unregister(key);
    }
}
