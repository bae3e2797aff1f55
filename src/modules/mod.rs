pub mod condition;
pub mod fetcher;
pub mod region;
pub mod scheduler;
