use crate::app::state::ANSWER_PLACEHOLDER;
use crate::app::{AnswerView, App, Focus};
use crate::ui::widgets::popup::render_popup;
use rag_query_tui::service::AnswerService;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use throbber_widgets_tui::Throbber;

pub fn render_main<S: AnswerService>(app: &mut App<S>, f: &mut Frame<'_>) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title area
            Constraint::Length(3), // Query bar
            Constraint::Min(5),    // Answer area
            Constraint::Length(3), // Status area
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(2, 1)));

    render_title_section(f, main_layout[0]);
    render_query_bar(app, f, main_layout[1]);
    render_answer_section(app, f, main_layout[2]);
    render_status_section(app, f, main_layout[3]);
    render_shortcuts(f, main_layout[4]);

    if app.show_help {
        let area = f.area();
        render_help_popup(f, area);
    }
}

fn render_title_section(f: &mut Frame<'_>, area: Rect) {
    let title = Paragraph::new(TextLine::from(vec![
        Span::styled(
            "Academic ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Chatbot",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    )
    .alignment(Alignment::Center);

    f.render_widget(title, area);
}

fn focus_style(focused: bool, color: Color) -> Style {
    if focused {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn render_query_bar<S: AnswerService>(app: &App<S>, f: &mut Frame<'_>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(10)])
        .split(area);

    let input_focused = app.focus == Focus::Input;
    let cursor = if input_focused { "_" } else { "" };
    let input = Paragraph::new(TextLine::from(vec![
        Span::raw(app.controller.query()),
        Span::styled(cursor, Style::default().fg(Color::Green)),
    ]))
    .block(
        Block::default()
            .title(" Search ")
            .borders(Borders::ALL)
            .border_style(focus_style(input_focused, Color::Green)),
    );
    f.render_widget(input, chunks[0]);

    let button_focused = app.focus == Focus::SendButton;
    let button_style = if button_focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Blue)
    };
    let button = Paragraph::new(Span::styled(" Send ", button_style))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_style(button_focused, Color::Blue)),
        );
    f.render_widget(button, chunks[1]);
}

fn render_answer_section<S: AnswerService>(app: &mut App<S>, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Answer ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let paragraph = match app.answer_view() {
        AnswerView::Busy => None,
        AnswerView::Answer(answer) => Some(
            Paragraph::new(Text::from(answer.to_string())).style(Style::default().fg(Color::White)),
        ),
        AnswerView::Placeholder => Some(
            Paragraph::new(ANSWER_PLACEHOLDER).style(Style::default().fg(Color::DarkGray)),
        ),
    };

    match paragraph {
        Some(paragraph) => f.render_widget(paragraph.wrap(Wrap { trim: false }), inner),
        None => {
            let throbber = Throbber::default()
                .label("Loading...")
                .style(Style::default().fg(Color::Gray))
                .throbber_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
            f.render_stateful_widget(throbber, inner, &mut app.throbber_state);
        }
    }
}

fn render_status_section<S: AnswerService>(app: &App<S>, f: &mut Frame<'_>, area: Rect) {
    let color = if app.controller.state().failure().is_some() {
        Color::Red
    } else if app.controller.is_busy() {
        Color::Yellow
    } else {
        Color::Green
    };

    let status = Paragraph::new(app.status_line())
        .style(Style::default().fg(color))
        .block(
            Block::default()
                .title(" Status ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    f.render_widget(status, area);
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let shortcuts = Paragraph::new(TextLine::from(vec![
        Span::styled("Enter", key_style),
        Span::raw(": Send   "),
        Span::styled("Tab", key_style),
        Span::raw(": Switch focus   "),
        Span::styled("F1", key_style),
        Span::raw(": Help   "),
        Span::styled("Esc", key_style),
        Span::raw(": Quit"),
    ]))
    .alignment(Alignment::Center);

    f.render_widget(shortcuts, area);
}

fn render_help_popup(f: &mut Frame<'_>, area: Rect) {
    let help = Paragraph::new(Text::from(vec![
        TextLine::from("Type a question and press Enter to send it."),
        TextLine::from(""),
        TextLine::from("The answer panel shows a spinner while the service works."),
        TextLine::from("You can keep typing and send again at any time; a reply to"),
        TextLine::from("an older question never replaces a newer answer."),
        TextLine::from(""),
        TextLine::from("A failed request leaves the previous answer in place and"),
        TextLine::from("is reported in the status bar."),
        TextLine::from(""),
        TextLine::from("F1/Esc: close help"),
    ]));

    render_popup(f, " Help ", help, area);
}
