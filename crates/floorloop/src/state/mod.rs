pub mod lines;
pub mod settings;

pub use lines::{LineTableState, PasteReport};
pub use settings::{AppSettings, ChainSettings, FloorSettings};
