pub mod store;

pub use store::{SessionState, SharedStore, Store};
