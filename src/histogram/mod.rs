pub mod accumulate;
pub mod buckets;
pub mod window;
