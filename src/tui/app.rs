//! TUI Application - render loop and command dispatch
//!
//! The render loop ticks on its own interval. Each tick samples the
//! controller (snapshot, step count, last step) and redraws; key presses are
//! turned into controller commands in between. Nothing here waits for a run.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::events::{handle_key_event, Action};
use super::state::{ActivityEvent, ActivityEventType, AppState};
use super::theme::{symbols, BarTheme};
use super::widgets::{utils::format_elapsed, Bars};
use crate::algorithms::AlgorithmKind;
use crate::controller::{ControllerState, SortController};

/// TUI Application
pub struct TuiApp {
    controller: SortController,
    state: AppState,
    theme: BarTheme,
    render_interval: Duration,
}

impl TuiApp {
    pub fn new(controller: SortController, render_interval: Duration) -> Self {
        Self {
            controller,
            state: AppState::default(),
            theme: BarTheme::new(),
            render_interval,
        }
    }

    /// Run the TUI application until the user quits
    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut terminal = self.setup_terminal()?;

        self.state.push_event(ActivityEvent::info(format!(
            "{} bars ready, press 's' to sort",
            self.controller.len()
        )));

        let result = self.main_loop(&mut terminal).await;

        // Leave no run sleeping behind the restored terminal
        self.controller.cancel();
        self.restore_terminal(&mut terminal)?;

        result
    }

    fn setup_terminal(&self) -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    fn restore_terminal(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<()> {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    /// Render loop: fixed-interval redraws, input handled between ticks
    async fn main_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let mut ticker = tokio::time::interval(self.render_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut input = EventStream::new();

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.draw(terminal)?;
                }
                event = input.next() => match event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        self.apply(handle_key_event(key));
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },
            }

            if self.state.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// One render tick
    pub fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        self.state.observe(&self.controller);
        terminal.draw(|frame| self.render(frame))?;
        Ok(())
    }

    /// Translate an action into controller commands
    pub fn apply(&mut self, action: Action) {
        debug!(?action, "Key action");
        match action {
            Action::Quit => {
                if self.controller.cancel() {
                    self.state.push_event(ActivityEvent::info("Cancelling run"));
                }
                self.state.should_quit = true;
            }
            Action::Start => {
                if self.controller.start() {
                    let label = self.controller.algorithm().label();
                    self.state.push_event(ActivityEvent::run_started(label));
                } else {
                    self.state
                        .push_event(ActivityEvent::info("Run already in progress"));
                }
            }
            Action::Cancel => {
                if !self.controller.cancel() {
                    self.state.push_event(ActivityEvent::info("Nothing to cancel"));
                }
            }
            Action::Randomize => match self.controller.randomize() {
                Ok(()) => self.state.push_event(ActivityEvent::info("Array randomized")),
                Err(e) => self.state.push_event(ActivityEvent::rejected(&e)),
            },
            Action::NextAlgorithm => self.select(self.controller.algorithm().next()),
            Action::PrevAlgorithm => self.select(self.controller.algorithm().prev()),
            Action::SelectAlgorithm(kind) => self.select(kind),
            Action::None => {}
        }
    }

    fn select(&mut self, kind: AlgorithmKind) {
        match self.controller.set_algorithm(kind) {
            Ok(()) => self
                .state
                .push_event(ActivityEvent::info(format!("Selected {}", kind))),
            Err(e) => self.state.push_event(ActivityEvent::rejected(&e)),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(5),    // Bars
                Constraint::Length(7), // Activity
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0]);
        self.render_bars(frame, chunks[1]);
        self.render_activity(frame, chunks[2]);
        self.render_footer(frame, chunks[3]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let state = self.controller.state();
        let icon = match state {
            ControllerState::Running => symbols::RUN,
            ControllerState::Idle => symbols::IDLE,
        };

        let header = Line::from(vec![
            Span::styled(
                self.controller.algorithm().label(),
                self.theme.highlight(),
            ),
            Span::raw("  │  "),
            Span::styled(format!("{} {}", icon, state), self.theme.state_style(state)),
            Span::raw("  │  "),
            Span::styled(
                format!("Steps: {}", self.controller.redraw().steps()),
                self.theme.text(),
            ),
            Span::raw("  │  "),
            Span::styled(
                format!("⏱ {}", format_elapsed(self.state.elapsed)),
                self.theme.text(),
            ),
            Span::raw("  │  "),
            Span::styled(
                format!("{} ms/step", self.controller.pacing_delay().as_millis()),
                self.theme.dimmed(),
            ),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border())
            .title(Span::styled(" SORTVIZ ", self.theme.header()));

        frame.render_widget(Paragraph::new(header).block(block), area);
    }

    fn render_bars(&self, frame: &mut Frame, area: Rect) {
        let snapshot = self.controller.snapshot();
        let running = self.controller.is_running();
        let finished_clean = self
            .controller
            .last_outcome()
            .is_some_and(|outcome| !outcome.cancelled);
        let highlight = if running {
            self.controller.redraw().last_step()
        } else {
            None
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.dimmed())
            .title(format!(" ARRAY ({}) ", snapshot.len()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let bars = Bars::new(
            snapshot.values(),
            self.controller.value_range().max,
            &self.theme,
        )
        .highlight(highlight)
        .sorted(!running && finished_clean && snapshot.is_sorted());
        frame.render_widget(bars, inner);
    }

    fn render_activity(&self, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = self
            .state
            .events
            .iter()
            .take(area.height.saturating_sub(2) as usize)
            .map(|e| {
                let style = match e.event_type {
                    ActivityEventType::Rejected => self.theme.error(),
                    ActivityEventType::RunCancelled => self.theme.warning(),
                    _ => self.theme.text(),
                };
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(e.icon(), style),
                    Span::raw(" "),
                    Span::styled(e.message.as_str(), style),
                ])
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.dimmed())
            .title(" ACTIVITY ");

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let help = Line::from(vec![
            Span::styled(" [s]", self.theme.accent()),
            Span::styled("tart  ", self.theme.dimmed()),
            Span::styled("[c]", self.theme.accent()),
            Span::styled("ancel  ", self.theme.dimmed()),
            Span::styled("[r]", self.theme.accent()),
            Span::styled("andomize  ", self.theme.dimmed()),
            Span::styled("[Tab/1-5]", self.theme.accent()),
            Span::styled(" algorithm  ", self.theme.dimmed()),
            Span::styled("[q]", self.theme.accent()),
            Span::styled("uit", self.theme.dimmed()),
        ]);

        frame.render_widget(Paragraph::new(help), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VisualizerConfig;
    use ratatui::backend::TestBackend;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn app_with(config: VisualizerConfig, values: Vec<u32>) -> TuiApp {
        let controller = SortController::from_values(&config, values).unwrap();
        TuiApp::new(controller, config.render_interval())
    }

    #[test]
    fn test_idle_screen() {
        let mut app = app_with(VisualizerConfig::default(), vec![50, 450, 250]);
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        app.draw(&mut terminal).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Bubble Sort"));
        assert!(text.contains("IDLE"));
        assert!(text.contains("ARRAY (3)"));
        assert!(text.contains("Steps: 0"));
    }

    #[test]
    fn test_algorithm_selection_while_idle() {
        let mut app = app_with(VisualizerConfig::default(), vec![300, 100, 200]);
        app.apply(Action::SelectAlgorithm(AlgorithmKind::MergeSort));
        app.apply(Action::NextAlgorithm);

        assert_eq!(app.controller.algorithm(), AlgorithmKind::QuickSort);
        assert_eq!(app.state().events[0].message, "Selected Quick Sort");
    }

    #[tokio::test]
    async fn test_commands_rejected_while_running() {
        let config = VisualizerConfig {
            pacing_delay_ms: 1_000,
            ..Default::default()
        };
        let mut app = app_with(config, (50..90).rev().collect());

        app.apply(Action::Start);
        assert!(app.controller.is_running());

        app.apply(Action::Randomize);
        assert_eq!(app.state().events[0].event_type, ActivityEventType::Rejected);
        app.apply(Action::NextAlgorithm);
        assert_eq!(app.state().events[0].event_type, ActivityEventType::Rejected);
        assert_eq!(app.controller.algorithm(), AlgorithmKind::BubbleSort);

        app.apply(Action::Quit);
        assert!(app.state().should_quit);
        app.controller.wait_idle().await;
        assert!(app.controller.last_outcome().unwrap().cancelled);
    }

    #[tokio::test]
    async fn test_render_tick_reports_outcome() {
        let config = VisualizerConfig {
            pacing_delay_ms: 0,
            ..Default::default()
        };
        let mut app = app_with(config, vec![250, 150, 400, 50]);
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();

        app.apply(Action::Start);
        app.controller.wait_idle().await;
        app.draw(&mut terminal).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Steps: 4"));
        assert!(text.contains("Bubble Sort completed: 4 steps"));
    }
}
