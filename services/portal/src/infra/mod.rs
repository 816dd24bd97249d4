pub mod notify;
pub mod storage;
pub mod store;
