pub mod command;
pub mod engine;
pub mod model;
pub mod storage;

pub use command::{transition, CartCommand};
pub use engine::{CartEngine, DEFAULT_ADD_QUANTITY};
pub use model::{compute_total, Cart, CartLine};
pub use storage::{CartStorage, FileStorage, MemoryStorage, CART_STORAGE_KEY};
