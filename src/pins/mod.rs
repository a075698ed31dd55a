//! Pin records and their JSON-file collection store

mod record;
mod store;

pub use record::{next_id, split_list, Pin};
pub use store::{PinStore, StoreError};
