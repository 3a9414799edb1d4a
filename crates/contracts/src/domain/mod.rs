pub mod a001_device;
pub mod a002_log_entry;
