pub mod render;
pub mod state;

pub use render::render;
pub use state::{Commit, Intent, LoadMode, LoadTicket, ViewState};
