// UI module for rag-query-tui
// Handles all UI rendering functions

pub mod screens;
pub mod widgets;

use crate::app::App;
use rag_query_tui::service::AnswerService;
use ratatui::Frame;

pub fn ui<S: AnswerService>(app: &mut App<S>, f: &mut Frame<'_>) {
    screens::main::render_main(app, f);
}
