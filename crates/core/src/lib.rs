pub mod check;
pub mod config;
pub mod error;
pub mod events;
pub mod object;

pub use check::*;
pub use config::{load_dotenv, NotifyConfig};
pub use error::VigilError;
pub use events::*;
pub use object::*;
