//! Region size histogram
//!
//! Counts grown regions by pixel count. Bucket `i` holds regions of exactly
//! `i` pixels for `i < 99`; the last bucket collects every region of 99
//! pixels or more.

use std::fmt;

/// Number of histogram buckets
pub const HISTOGRAM_BUCKETS: usize = 100;

/// Histogram of region sizes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeHistogram {
    buckets: [u32; HISTOGRAM_BUCKETS],
}

impl Default for SizeHistogram {
    fn default() -> Self {
        Self::new()
    }
}

impl SizeHistogram {
    pub fn new() -> Self {
        Self {
            buckets: [0; HISTOGRAM_BUCKETS],
        }
    }

    /// Bucket index for a region of `size` pixels
    #[inline]
    pub fn bucket_for(size: u32) -> usize {
        (size as usize).min(HISTOGRAM_BUCKETS - 1)
    }

    /// Record one region of `size` pixels
    pub fn record(&mut self, size: u32) {
        let bucket = Self::bucket_for(size);
        self.buckets[bucket] = self.buckets[bucket].saturating_add(1);
    }

    /// Count in a bucket; zero for indices past the end
    pub fn get(&self, bucket: usize) -> u32 {
        self.buckets.get(bucket).copied().unwrap_or(0)
    }

    pub fn buckets(&self) -> &[u32; HISTOGRAM_BUCKETS] {
        &self.buckets
    }

    /// Total number of recorded regions
    pub fn total(&self) -> u64 {
        self.buckets.iter().map(|&c| c as u64).sum()
    }

    /// Non-empty buckets as `(bucket, count)` pairs
    pub fn non_empty(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.buckets
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > 0)
            .map(|(i, &c)| (i, c))
    }
}

impl fmt::Display for SizeHistogram {
    /// Formats the non-empty buckets as `size:count` pairs; the overflow
    /// bucket is written as `99+`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (bucket, count) in self.non_empty() {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            if bucket == HISTOGRAM_BUCKETS - 1 {
                write!(f, "{}+:{}", bucket, count)?;
            } else {
                write!(f, "{}:{}", bucket, count)?;
            }
        }
        if first {
            f.write_str("(empty)")?;
        }
        Ok(())
    }
}
