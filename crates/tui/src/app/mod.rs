mod state;

use std::time::{Duration, Instant};

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use crossterm::event::{self, Event, KeyEventKind};
use store::{ApiClient, Dispatch, Settlement};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    ui::{self, keymap},
};

pub use state::{AppState, Confirm, Section, ToastLevel, ToastState};

const TICK_RATE: Duration = Duration::from_millis(200);

/// Drives the terminal: keys go into [`AppState`], requests run on the runtime and their
/// settlements come back through a channel drained on every tick.
pub struct App {
    api: ApiClient,
    pub state: AppState,
    timezone: Tz,
    tx: UnboundedSender<Settlement>,
    rx: UnboundedReceiver<Settlement>,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let timezone = config.timezone()?;
        let api = ApiClient::new(&config.base_url, config.request_timeout())?;
        let state = AppState::new(
            api.base_url().to_string(),
            timezone,
            today(timezone),
            config.reminder_days,
        );
        let (tx, rx) = unbounded_channel();

        Ok(Self {
            api,
            state,
            timezone,
            tx,
            rx,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let initial = self.state.initial_load();
        self.spawn_all(initial);

        while !self.state.should_quit {
            while let Ok(settlement) = self.rx.try_recv() {
                let follow_up = self.state.settle(settlement);
                self.spawn_all(follow_up);
            }
            self.state.tick(Instant::now(), today(self.timezone));

            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(TICK_RATE)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        let dispatches = self.state.handle(keymap::map_key(key));
                        self.spawn_all(dispatches);
                    }
                }
            }
            tokio::task::yield_now().await;
        }

        Ok(())
    }

    fn spawn_all(&self, dispatches: Vec<Dispatch>) {
        for dispatch in dispatches {
            tracing::debug!(
                resource = dispatch.resource(),
                operation = %dispatch.operation(),
                "sending request"
            );
            let api = self.api.clone();
            let tx = self.tx.clone();
            tokio::spawn(async move {
                if tx.send(dispatch.send(&api).await).is_err() {
                    tracing::debug!("event loop gone, dropping settlement");
                }
            });
        }
    }
}

fn today(timezone: Tz) -> NaiveDate {
    Utc::now().with_timezone(&timezone).date_naive()
}
