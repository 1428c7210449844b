pub mod api;
pub mod mutation;
pub mod store;
pub mod ui;
