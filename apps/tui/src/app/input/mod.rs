use crate::app::state::{App, Focus};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rag_query_tui::service::AnswerService;

pub fn handle_input<S: AnswerService>(app: &mut App<S>, key: KeyEvent) {
    // Raw mode delivers Ctrl+C as a key press instead of a signal
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('c') {
            app.running = false;
        }
        return;
    }

    if handle_help_toggle(app, key.code) {
        return;
    }

    match key.code {
        KeyCode::Esc => {
            app.running = false;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.focus = app.focus.toggle();
        }
        KeyCode::Enter => {
            app.submit();
        }
        KeyCode::Char(c) => {
            app.focus = Focus::Input;
            app.controller.push_char(c);
        }
        KeyCode::Backspace => {
            app.focus = Focus::Input;
            app.controller.pop_char();
        }
        _ => {}
    }
}

fn handle_help_toggle<S>(app: &mut App<S>, key: KeyCode) -> bool {
    if key == KeyCode::F(1) {
        app.show_help = !app.show_help;
        return true;
    }

    if app.show_help {
        if key == KeyCode::Esc {
            app.show_help = false;
        }
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::FixedService;

    fn app() -> App<FixedService> {
        App::new(FixedService(Some("ok")), String::new())
    }

    fn press(app: &mut App<FixedService>, code: KeyCode) {
        handle_input(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App<FixedService>, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_typing_edits_query() {
        let mut app = app();

        type_text(&mut app, "RAG?");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.controller.query(), "RAG");
    }

    #[test]
    fn test_help_swallows_keys_until_closed() {
        let mut app = app();

        press(&mut app, KeyCode::F(1));
        assert!(app.show_help);

        type_text(&mut app, "x");
        assert_eq!(app.controller.query(), "");

        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
        assert!(app.running);

        press(&mut app, KeyCode::Esc);
        assert!(!app.running);
    }

    #[test]
    fn test_ctrl_c_quits_without_editing_query() {
        let mut app = app();
        type_text(&mut app, "ab");

        handle_input(&mut app, KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(app.controller.query(), "ab");
        assert!(app.running);

        handle_input(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(app.controller.query(), "ab");
        assert!(!app.running);
    }

    #[test]
    fn test_shifted_characters_are_typed() {
        let mut app = app();
        handle_input(&mut app, KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT));
        assert_eq!(app.controller.query(), "Q");
    }

    #[tokio::test]
    async fn test_enter_submits_from_either_control() {
        let mut app = app();

        press(&mut app, KeyCode::Enter);
        assert!(app.controller.is_busy());
        app.controller.wait_for_completion().await;

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::SendButton);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.controller.latest_seq(), 2);
        app.controller.wait_for_completion().await;

        // Input stays editable and submit stays available while busy
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "more");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.controller.query(), "more");
        assert_eq!(app.controller.in_flight(), 2);
        assert_eq!(app.focus, Focus::Input);
    }
}
