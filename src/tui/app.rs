//! Application state and event loop

use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget, DefaultTerminal, Frame};
use tokio::runtime::Runtime;

use crate::config::AppConfig;
use crate::presenter::DashboardModel;
use crate::services::{DashboardScreen, DashboardView, HttpApiClient};

use super::theme::Theme;
use super::widgets::{
    charts_page::ChartsPage,
    error_panel::ErrorPanel,
    help::HelpPopup,
    overview::OverviewView,
    spinner::{LoadingStage, Spinner},
    tabs::Tab,
};

/// Result of a background render, handed back with the view that produced it
type RenderResult = (DashboardView, DashboardScreen);

/// How long quit waits for an in-flight render to hand the view back
const QUIT_GRACE: Duration = Duration::from_secs(2);

pub enum AppState {
    /// Waiting on a render, spinner animating
    Loading {
        spinner_frame: usize,
        stage: LoadingStage,
    },
    Ready { model: Box<DashboardModel> },
    /// The whole dashboard failed; one panel, no partial data
    Error { message: String },
}

pub struct App {
    state: AppState,
    should_quit: bool,
    current_tab: Tab,
    show_help: bool,
    theme: Theme,
    currency_symbol: String,
    /// `None` while a render is in flight on the runtime
    view: Option<DashboardView>,
    render_requested: bool,
}

impl App {
    /// Create an app that will load on the first loop iteration
    pub fn new(view: DashboardView, currency_symbol: impl Into<String>, theme: Theme) -> Self {
        Self {
            state: AppState::Loading {
                spinner_frame: 0,
                stage: LoadingStage::Fetching,
            },
            should_quit: false,
            current_tab: Tab::default(),
            show_help: false,
            theme,
            currency_symbol: currency_symbol.into(),
            view: Some(view),
            render_requested: true,
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit(),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.quit(),
            KeyCode::Tab => {
                self.current_tab = self.current_tab.next();
            }
            KeyCode::BackTab => {
                self.current_tab = self.current_tab.prev();
            }
            KeyCode::Char(c @ '1'..='4') => {
                if let Some(tab) = Tab::from_number(c as u8 - b'0') {
                    self.current_tab = tab;
                }
            }
            KeyCode::Char('?') => {
                self.show_help = !self.show_help;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.request_refresh(),
            _ => {}
        }
    }

    /// Queue a render unless one is already in flight
    fn request_refresh(&mut self) {
        if self.view.is_none() || self.render_requested {
            return;
        }
        tracing::info!("dashboard refresh requested");
        self.render_requested = true;
        self.state = AppState::Loading {
            spinner_frame: 0,
            stage: LoadingStage::Refreshing,
        };
    }

    /// Hand the view out for a background render, if one was requested
    pub fn take_render_request(&mut self) -> Option<DashboardView> {
        if !self.render_requested {
            return None;
        }
        self.render_requested = false;
        self.view.take()
    }

    /// Take back the view and show what it rendered
    pub fn apply_render(&mut self, view: DashboardView, screen: DashboardScreen) {
        self.view = Some(view);
        self.state = match screen {
            DashboardScreen::Ready(model) => AppState::Ready { model },
            DashboardScreen::Failed(message) => AppState::Error { message },
        };
    }

    /// Leaving the dashboard releases its charts
    fn quit(&mut self) {
        if let Some(view) = self.view.as_mut() {
            view.leave();
        }
        self.should_quit = true;
    }

    /// Update spinner animation
    pub fn tick(&mut self) {
        if let AppState::Loading {
            spinner_frame,
            stage,
        } = &self.state
        {
            self.state = AppState::Loading {
                spinner_frame: Spinner::next_frame(*spinner_frame),
                stage: *stage,
            };
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// A render holds the view
    pub fn render_in_flight(&self) -> bool {
        self.view.is_none()
    }

    /// Take back a view whose render finished after quit and release its charts
    fn release(&mut self, mut view: DashboardView) {
        view.leave();
        self.view = Some(view);
    }

    pub fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match &self.state {
            AppState::Loading {
                spinner_frame,
                stage,
            } => {
                Spinner::new(*spinner_frame, *stage, self.theme).render(area, buf);
            }
            AppState::Ready { model } => {
                match self.current_tab {
                    Tab::Overview => OverviewView::new(model, self.theme).render(area, buf),
                    tab => ChartsPage::new(
                        tab,
                        model,
                        self.view.as_ref().map(|v| v.presenter()),
                        &self.currency_symbol,
                        self.theme,
                    )
                    .render(area, buf),
                }

                if self.show_help {
                    let popup_area = HelpPopup::centered_area(area);
                    HelpPopup::new(self.theme).render(popup_area, buf);
                }
            }
            AppState::Error { message } => {
                ErrorPanel::new(message, self.theme).render(area, buf);
            }
        }
    }
}

/// Run the TUI application
pub fn run(config: &AppConfig, theme: Theme) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let api = Arc::new(HttpApiClient::new(&config.api)?);
    let view = DashboardView::new(api, &config.dashboard);
    let app = App::new(view, config.dashboard.currency_symbol.clone(), theme);

    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, &runtime, app);
    ratatui::restore();
    result
}

fn spawn_render(runtime: &Runtime, mut view: DashboardView, tx: mpsc::Sender<RenderResult>) {
    runtime.spawn(async move {
        let screen = view.render().await;
        // Receiver gone means the app already quit
        let _ = tx.send((view, screen));
    });
}

fn run_app(terminal: &mut DefaultTerminal, runtime: &Runtime, mut app: App) -> anyhow::Result<()> {
    let (render_tx, render_rx) = mpsc::channel();

    loop {
        terminal.draw(|frame| app.draw(frame))?;

        if app.should_quit() {
            break;
        }

        if let Some(view) = app.take_render_request() {
            spawn_render(runtime, view, render_tx.clone());
        }

        if let Ok((view, screen)) = render_rx.try_recv() {
            app.apply_render(view, screen);
        }

        // 100ms poll keeps the spinner moving
        if event::poll(Duration::from_millis(100))? {
            app.handle_event(event::read()?);
        } else {
            app.tick();
        }
    }

    await_in_flight(&mut app, &render_rx, QUIT_GRACE);
    Ok(())
}

/// Quit only reaches the view when no render holds it; otherwise wait for the
/// render so its charts are released too
fn await_in_flight(app: &mut App, render_rx: &mpsc::Receiver<RenderResult>, grace: Duration) {
    if !app.render_in_flight() {
        return;
    }
    match render_rx.recv_timeout(grace) {
        Ok((view, _)) => app.release(view),
        Err(e) => tracing::warn!(error = %e, "render still in flight at quit"),
    }
}
