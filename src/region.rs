//! Selection regions over a text buffer.
//!
//! A region is a pair of byte offsets: the anchor (where a selection
//! started) and the head (the moving cursor end). The anchor may lie
//! after the head for a backward selection; orientation is part of
//! value equality.

use serde::{Deserialize, Serialize};

/// A possibly-empty, possibly-backward range of buffer offsets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    /// Where the selection started.
    pub anchor: usize,
    /// The moving cursor end.
    pub head: usize,
}

impl Region {
    /// Create a new region. `anchor > head` expresses a backward selection.
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// Create a zero-width region (a caret) at the given offset.
    pub fn caret(offset: usize) -> Self {
        Self {
            anchor: offset,
            head: offset,
        }
    }

    /// The lower bound of the region.
    pub fn begin(&self) -> usize {
        self.anchor.min(self.head)
    }

    /// The upper bound of the region.
    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }

    /// The number of offsets spanned.
    pub fn len(&self) -> usize {
        self.end() - self.begin()
    }

    /// Whether the region is a caret (zero width).
    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    /// Whether the given offset lies within the region, endpoints included.
    pub fn contains(&self, offset: usize) -> bool {
        self.begin() <= offset && offset <= self.end()
    }

    /// Whether the two regions share interior offsets, or are equal.
    ///
    /// Touching endpoints alone do not intersect, so neighbouring
    /// carets and selections stay distinct.
    pub fn intersects(&self, other: Region) -> bool {
        *self == other || (self.end() > other.begin() && self.begin() < other.end())
    }

    /// Whether this region fully contains `other`'s extent.
    ///
    /// A caret sitting exactly on one of our endpoints is adjacent,
    /// not covered, so touching cursors stay distinct.
    pub fn covers(&self, other: Region) -> bool {
        if other.is_empty() && (other.begin() == self.begin() || other.begin() == self.end()) {
            return false;
        }
        self.contains(other.begin()) && other.end() <= self.end()
    }

    /// The smallest region spanning both regions, keeping this
    /// region's orientation.
    pub fn cover(&self, other: Region) -> Region {
        let begin = self.begin().min(other.begin());
        let end = self.end().max(other.end());
        if self.anchor <= self.head {
            Region::new(begin, end)
        } else {
            Region::new(end, begin)
        }
    }

    /// The overlapping sub-span of the two regions, normalized forward.
    /// Zero-width when they do not intersect.
    pub fn intersection(&self, other: Region) -> Region {
        if !self.intersects(other) {
            return Region::default();
        }
        Region::new(
            self.begin().max(other.begin()),
            self.end().min(other.end()),
        )
    }

    /// The portions of this region not covered by `other`: the left
    /// remainder and/or the right remainder, in that order. Remainders
    /// may be zero-width; callers filter those where it matters.
    pub fn cut(&self, other: Region) -> Vec<Region> {
        let mut remainders = Vec::with_capacity(2);
        if self.begin() < other.begin() {
            remainders.push(Region::new(self.begin(), self.end().min(other.begin())));
        }
        if self.end() > other.end() {
            remainders.push(Region::new(self.begin().max(other.end()), self.end()));
        }
        remainders
    }

    /// Shift the region for a buffer edit of `delta` bytes at `position`.
    ///
    /// Endpoints at or after `position` move by `delta`. An endpoint
    /// before `position` that a deletion would leave beyond the edit
    /// point is pulled back to `position + delta`. Offsets saturate
    /// at zero.
    pub fn adjust(&mut self, position: usize, delta: i64) {
        self.anchor = adjust_offset(self.anchor, position, delta);
        self.head = adjust_offset(self.head, position, delta);
    }
}

fn adjust_offset(offset: usize, position: usize, delta: i64) -> usize {
    if offset >= position {
        return (offset as i64 + delta).max(0) as usize;
    }
    let edit_end = position as i64 + delta;
    if edit_end < offset as i64 {
        edit_end.max(0) as usize
    } else {
        offset
    }
}
