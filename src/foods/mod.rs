mod entry;
mod error;
mod table;


pub use entry::{FoodEntry, DEFAULT_SERVING_G};
pub use error::FoodTableError;
pub use table::FoodTable;
