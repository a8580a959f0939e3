/// Quietest finite bucket, in dBFS.
pub const FLOOR_DBFS: i32 = -140;
/// Loudest finite bucket, in dBFS.
pub const CEILING_DBFS: i32 = 0;
/// 141 finite buckets plus the "> 0 dBFS" sentinel.
pub const NUM_BUCKETS: usize = (CEILING_DBFS - FLOOR_DBFS) as usize + 2;

/// Boundary of the sentinel bucket.
pub const SENTINEL_BOUNDARY: f64 = f64::MAX;
/// Report label of the sentinel bucket, outside the real -140..0 range.
pub const SENTINEL_LABEL: f64 = 1.0;

pub fn from_dbfs(dbfs: f64) -> f64 {
    10f64.powf(dbfs / 20.0)
}

pub fn to_dbfs(value: f64) -> f64 {
    debug_assert!(value > 0.0);
    20.0 * value.log10()
}

/// Upper edge of one histogram bucket.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bucket {
    /// Linear amplitude threshold.
    pub boundary: f64,
    /// Originating dBFS step, `None` for the sentinel.
    pub dbfs: Option<i32>,
}

impl Bucket {
    #[cfg(test)]
    pub fn is_sentinel(&self) -> bool {
        self.dbfs.is_none()
    }

    pub fn label(&self) -> f64 {
        match self.dbfs {
            Some(dbfs) => f64::from(dbfs),
            None => SENTINEL_LABEL,
        }
    }
}

/// Bucket boundaries shared by every histogram, ascending by amplitude.
#[derive(Clone, Debug)]
pub struct BucketTable {
    buckets: [Bucket; NUM_BUCKETS],
}

impl BucketTable {
    pub fn new() -> Self {
        let mut buckets = [Bucket {
            boundary: SENTINEL_BOUNDARY,
            dbfs: None,
        }; NUM_BUCKETS];

        for (slot, dbfs) in buckets.iter_mut().zip(FLOOR_DBFS..=CEILING_DBFS) {
            *slot = Bucket {
                boundary: from_dbfs(dbfs as f64),
                dbfs: Some(dbfs),
            };
        }

        Self { buckets }
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Index of the smallest boundary that is >= `magnitude`.
    ///
    /// Anything above the 0 dBFS boundary, `+inf` included, lands in the
    /// sentinel. NaN compares false against every boundary and lands in the
    /// quietest bucket.
    pub fn index_of(&self, magnitude: f64) -> usize {
        let idx = self.buckets.partition_point(|b| b.boundary < magnitude);
        idx.min(NUM_BUCKETS - 1)
    }
}

impl Default for BucketTable {
    fn default() -> Self {
        Self::new()
    }
}
