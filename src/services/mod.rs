//! Services
//!
//! Business logic of the application layer. Services are driven by
//! `AppState` and the CLI.

pub mod chat;
pub mod display;
pub mod history;
pub mod table;

pub use chat::{prepare_question, ChatService};
pub use display::{ChartRenderer, ChartSlot, Drawable, RenderedChart};
pub use history::SessionHistory;
pub use table::{export_filename, format_cell_value, rows_to_csv, table_columns};
