pub mod audit;
pub mod diff;
pub mod error;
pub mod event;
pub mod id;
pub mod profile;
pub mod store;
pub mod time;
