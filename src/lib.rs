pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod storage;

pub use config::Config;
pub use error::{ModelError, Result};
pub use model::{BaseModel, Mapping, Model};
pub use storage::StorageHook;
