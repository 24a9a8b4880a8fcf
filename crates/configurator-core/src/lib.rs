pub mod accessory;
pub mod config;
pub mod constants;
pub mod error;
pub mod feature;
pub mod host;
pub mod input;
pub mod session;
pub mod state;
pub mod tween;
pub mod ui;

pub use accessory::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use feature::*;
pub use host::*;
pub use input::*;
pub use session::*;
pub use state::*;
pub use tween::*;
pub use ui::*;
