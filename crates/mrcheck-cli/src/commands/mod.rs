pub mod store;
pub mod verify;
