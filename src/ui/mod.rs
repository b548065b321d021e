//! Terminal UI layer for the interactive chat session.
//!
//! Owns rendering, keyboard and mouse handling, and the event loop. Domain
//! state lives in [`crate::core::session::SessionController`]; this layer
//! only presents it and feeds submissions in. The single in-flight inference
//! request runs on a spawned task and reports back over an mpsc channel, so
//! the interface keeps redrawing (and showing the thinking indicator) while
//! the call is outstanding.

use std::io;
use std::time::Duration;

use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseEventKind,
};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;

use crate::api::client::{InferenceClient, InferenceResult};
use crate::api::GenerationParameters;
use crate::core::logging::ChatLog;
use crate::core::session::{SessionController, TurnDispatch};

pub struct ChatApp {
    session: SessionController,
    client: InferenceClient,
    params: GenerationParameters,
    chat_log: ChatLog,
    input: String,
    scroll_offset: u16,
}

impl ChatApp {
    pub fn new(
        session: SessionController,
        client: InferenceClient,
        params: GenerationParameters,
        chat_log: ChatLog,
    ) -> Self {
        Self {
            session,
            client,
            params,
            chat_log,
            input: String::new(),
            scroll_offset: 0,
        }
    }

    /// Transcript lines, most recent exchange first. While a request is in
    /// flight the pending question and a thinking indicator sit on top, ahead
    /// of the committed history.
    fn build_display_lines(&self) -> Vec<Line<'_>> {
        let mut lines = Vec::new();

        if let Some(pending) = self.session.pending_user() {
            lines.push(Line::from(vec![
                Span::styled(
                    "You: ",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::styled(pending.to_string(), Style::default().fg(Color::Cyan)),
            ]));
            lines.push(Line::from(Span::styled(
                "Thinking...",
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::from(""));
        }

        for turn in self.session.transcript().snapshot() {
            if turn.role.is_user() {
                lines.push(Line::from(vec![
                    Span::styled(
                        "You: ",
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(turn.content, Style::default().fg(Color::Cyan)),
                ]));
            } else {
                for content_line in turn.content.lines() {
                    if content_line.trim().is_empty() {
                        lines.push(Line::from(""));
                    } else {
                        lines.push(Line::from(Span::styled(
                            content_line.to_string(),
                            Style::default().fg(Color::White),
                        )));
                    }
                }
            }
            lines.push(Line::from(""));
        }

        lines
    }

    fn max_scroll_offset(&self, available_height: u16) -> u16 {
        let total_lines = self.build_display_lines().len() as u16;
        total_lines.saturating_sub(available_height)
    }

    /// Mirrors the latest committed pair into the chat log, if one is open.
    fn record_latest_exchange(&self) {
        if !self.chat_log.is_active() {
            return;
        }
        let turns = self.session.transcript().turns();
        if turns.len() < 2 {
            return;
        }
        for turn in &turns[turns.len() - 2..] {
            if let Err(err) = self.chat_log.record(turn) {
                tracing::warn!(error = %err, "failed to append to chat log");
            }
        }
    }
}

fn draw(f: &mut Frame, app: &ChatApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let lines = app.build_display_lines();
    let available_height = chunks[0].height.saturating_sub(1);
    let max_offset = (lines.len() as u16).saturating_sub(available_height);
    let scroll_offset = app.scroll_offset.min(max_offset);

    let transcript = Paragraph::new(lines)
        .block(Block::default().title("Kisan - Farming Assistant"))
        .wrap(Wrap { trim: true })
        .scroll((scroll_offset, 0));
    f.render_widget(transcript, chunks[0]);

    let (input_style, input_title) = if app.session.is_awaiting() {
        (
            Style::default().fg(Color::DarkGray),
            "Waiting for the model...",
        )
    } else {
        (
            Style::default().fg(Color::Yellow),
            "Ask your farming question (Enter to send, Ctrl+C to quit)",
        )
    };

    let input = Paragraph::new(app.input.as_str())
        .style(input_style)
        .block(Block::default().borders(Borders::ALL).title(input_title))
        .wrap(Wrap { trim: true });
    f.render_widget(input, chunks[1]);

    if !app.session.is_awaiting() {
        f.set_cursor_position((chunks[1].x + app.input.len() as u16 + 1, chunks[1].y + 1));
    }
}

/// Sets up the terminal, runs the event loop, and restores the terminal on
/// the way out. Raw mode is entered only here, after all startup checks.
pub async fn run_chat(app: ChatApp) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, app).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: ChatApp,
) -> Result<(), Box<dyn std::error::Error>> {
    let (tx, mut rx) = mpsc::unbounded_channel::<InferenceResult>();

    loop {
        terminal.draw(|f| draw(f, &app))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(());
                    }
                    KeyCode::Enter => {
                        let input = std::mem::take(&mut app.input);
                        match app.session.begin_turn(&input) {
                            TurnDispatch::Ignored => {
                                // Keep what the user typed while a request is
                                // still in flight; empty input just clears.
                                if app.session.is_awaiting() {
                                    app.input = input;
                                }
                            }
                            TurnDispatch::Resolved => {
                                app.scroll_offset = 0;
                                app.record_latest_exchange();
                            }
                            TurnDispatch::Inference(prompt) => {
                                app.scroll_offset = 0;
                                let client = app.client.clone();
                                let params = app.params;
                                let tx = tx.clone();
                                tokio::spawn(async move {
                                    let _ = tx.send(client.complete(&prompt, params).await);
                                });
                            }
                        }
                    }
                    KeyCode::Char(c) => {
                        if !app.session.is_awaiting() {
                            app.input.push(c);
                        }
                    }
                    KeyCode::Backspace => {
                        app.input.pop();
                    }
                    KeyCode::Up => {
                        app.scroll_offset = app.scroll_offset.saturating_sub(1);
                    }
                    KeyCode::Down => {
                        let available_height = visible_height(terminal);
                        let max_offset = app.max_scroll_offset(available_height);
                        app.scroll_offset = app.scroll_offset.saturating_add(1).min(max_offset);
                    }
                    _ => {}
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => {
                        app.scroll_offset = app.scroll_offset.saturating_sub(3);
                    }
                    MouseEventKind::ScrollDown => {
                        let available_height = visible_height(terminal);
                        let max_offset = app.max_scroll_offset(available_height);
                        app.scroll_offset = app.scroll_offset.saturating_add(3).min(max_offset);
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        // Drain the pending result, if the in-flight request has finished.
        // The user/assistant pair lands in the transcript before the next
        // draw, so the renderer only ever sees whole exchanges.
        while let Ok(result) = rx.try_recv() {
            app.session.complete_turn(result);
            app.scroll_offset = 0;
            app.record_latest_exchange();
        }
    }
}

fn visible_height(terminal: &Terminal<CrosstermBackend<io::Stdout>>) -> u16 {
    let terminal_height = terminal.size().map(|size| size.height).unwrap_or_default();
    // 3 rows for the input box, 1 for the transcript title.
    terminal_height.saturating_sub(3).saturating_sub(1)
}
