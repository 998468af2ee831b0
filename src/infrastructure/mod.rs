pub mod driver;
pub mod in_memory;
pub mod local;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
