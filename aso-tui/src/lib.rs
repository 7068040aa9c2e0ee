mod command;
mod feeders;
mod session;
mod styles;
mod transcript;
mod tui;
mod view;

pub use feeders::spawn_tui_feeders;
pub use tui::{TuiActor, TuiMsg};
