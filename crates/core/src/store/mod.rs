mod error;
mod traits;
mod types;

pub use error::{Result, StoreError};
pub use traits::{DataStore, ItemStream};
pub use types::{project, AttrValue, Item, ScanFilter};
