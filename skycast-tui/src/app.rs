use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use skycast_core::locate::ip_api::IpApiLocator;
use skycast_core::locate::nominatim::NominatimGeocoder;
use skycast_core::source::http::HttpWeatherSource;
use skycast_core::{
    FetchTicket, LocationError, LocationProvider, ReverseGeocoder, TemperatureUnit, Theme,
    UiState, WeatherError, WeatherReport, WeatherSource, resolve_city,
};

use crate::cli::Cli;
use crate::ui;

const TICK: Duration = Duration::from_millis(100);

/// Outcomes of background work, delivered into the draw loop over a channel.
#[derive(Debug)]
enum AppEvent {
    WeatherSettled {
        generation: u64,
        outcome: Result<WeatherReport, WeatherError>,
    },
    CityLocated(Option<String>),
    LocationFailed(LocationError),
}

pub struct App {
    state: UiState,
    source: Arc<dyn WeatherSource>,
    // Absent when the geolocation clients could not be built at all.
    location: Option<(Arc<dyn LocationProvider>, Arc<dyn ReverseGeocoder>)>,
    auto_locate: bool,
    tx: mpsc::UnboundedSender<AppEvent>,
    rx: mpsc::UnboundedReceiver<AppEvent>,
    should_quit: bool,
}

impl App {
    pub fn new(cli: &Cli) -> Self {
        let mut state = UiState::new();
        state.city_input = cli.city.clone().unwrap_or_default();
        if cli.fahrenheit {
            state.unit = TemperatureUnit::Fahrenheit;
        }
        if cli.dark {
            state.theme = Theme::Dark;
        }

        let source: Arc<dyn WeatherSource> =
            Arc::new(HttpWeatherSource::new(cli.endpoint.clone()));

        let location = match (
            IpApiLocator::new(skycast_core::locate::ip_api::DEFAULT_ENDPOINT),
            NominatimGeocoder::new(skycast_core::locate::nominatim::DEFAULT_ENDPOINT),
        ) {
            (Ok(provider), Ok(geocoder)) => Some((
                Arc::new(provider) as Arc<dyn LocationProvider>,
                Arc::new(geocoder) as Arc<dyn ReverseGeocoder>,
            )),
            _ => None,
        };

        let (tx, rx) = mpsc::unbounded_channel();

        Self {
            state,
            source,
            location,
            auto_locate: !cli.no_locate && cli.city.is_none(),
            tx,
            rx,
            should_quit: false,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let mut terminal =
            Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")?;

        // A preset city fetches immediately; otherwise location detection
        // kicks off the first fetch, exactly once, at startup.
        if !self.state.city_input.is_empty() {
            if let Some(ticket) = self.state.submit() {
                self.spawn_fetch(ticket);
            }
        } else if self.auto_locate {
            self.spawn_locate();
        }

        let result = self.event_loop(&mut terminal).await;

        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to restore cursor")?;

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::render(frame, &self.state))?;

            while let Ok(app_event) = self.rx.try_recv() {
                self.on_app_event(app_event);
            }

            if event::poll(TICK).context("Failed to poll terminal events")? {
                if let Event::Key(key) = event::read().context("Failed to read terminal event")? {
                    self.on_key(key);
                }
            }
        }

        Ok(())
    }

    fn on_app_event(&mut self, app_event: AppEvent) {
        match app_event {
            AppEvent::WeatherSettled { generation, outcome } => {
                self.state.settle(generation, outcome);
            }
            AppEvent::CityLocated(Some(city)) => {
                if let Some(ticket) = self.state.fetch_city(city) {
                    self.spawn_fetch(ticket);
                }
            }
            // Position resolved but no city-like name: stay silent.
            AppEvent::CityLocated(None) => {}
            AppEvent::LocationFailed(err) => {
                self.state.location_failed(&err);
            }
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('t') => self.state.toggle_theme(),
                KeyCode::Char('u') => self.state.toggle_unit(),
                KeyCode::Char('l') => self.spawn_locate(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter => {
                if let Some(ticket) = self.state.submit() {
                    self.spawn_fetch(ticket);
                }
            }
            KeyCode::Backspace => {
                self.state.city_input.pop();
            }
            KeyCode::Char(c) => self.state.city_input.push(c),
            _ => {}
        }
    }

    /// Run one weather request off the draw loop. The settle carries the
    /// ticket's generation so stale responses get dropped by the state layer.
    fn spawn_fetch(&self, ticket: FetchTicket) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let outcome = source.current(&ticket.city).await;
            let _ = tx.send(AppEvent::WeatherSettled {
                generation: ticket.generation,
                outcome,
            });
        });
    }

    fn spawn_locate(&mut self) {
        let Some((provider, geocoder)) = &self.location else {
            self.state.location_failed(&LocationError::Unavailable);
            return;
        };

        let provider = Arc::clone(provider);
        let geocoder = Arc::clone(geocoder);
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let message = match resolve_city(provider.as_ref(), geocoder.as_ref()).await {
                Ok(city) => AppEvent::CityLocated(city),
                Err(err) => AppEvent::LocationFailed(err),
            };
            let _ = tx.send(message);
        });
    }
}
