// Telekino draw viewer: load published results and browse them draw by draw.
pub mod api;
pub mod collection;
pub mod config;
pub mod display;
pub mod error;
pub mod events;
pub mod page;
pub mod reports;
pub mod types;
pub mod utils;
pub mod viewer;

pub use api::*;
pub use collection::*;
pub use error::*;
pub use page::*;
pub use types::*;
pub use utils::*;
pub use viewer::*;
