// App module for rag-query-tui
// Handles application state and key handling

pub mod input;
pub mod state;

pub use input::handle_input;
pub use state::{AnswerView, App, Focus};
