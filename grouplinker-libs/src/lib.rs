pub mod availability;
pub mod data;
pub mod registry;
pub mod store;
