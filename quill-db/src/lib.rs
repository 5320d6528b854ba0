pub mod storage;
pub mod store;

mod record;
