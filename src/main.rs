mod compass;
mod config;
mod database;
mod error;
mod observer;
mod parsing;
mod sighting;
mod target;
mod ui;

use anyhow::Result;
use chrono::{DateTime, Local};
use clap::{Args, Parser, Subcommand};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use config::Config;
use database::ObserverStore;
use error::SightingError;
use observer::{coordinate_label, coordinate_to_entry, Observer};
use sighting::{sight, status_line, SightingResult};
use target::TargetText;

#[derive(Parser, Debug)]
#[command(author, version, about = "Tells you where to look in the sky to spot an aircraft")]
struct Cli {
    /// Path to the configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the SpotThePlane line for one aircraft position
    Spot {
        #[command(flatten)]
        telemetry: TelemetryArgs,

        /// Observer latitude, overriding the stored one
        #[arg(long, allow_hyphen_values = true)]
        observer_lat: Option<String>,

        /// Observer longitude, overriding the stored one
        #[arg(long, allow_hyphen_values = true)]
        observer_lon: Option<String>,

        /// Also print azimuth, elevation and distances
        #[arg(long)]
        details: bool,
    },
    /// Show or change the stored observer coordinates
    Observer {
        #[command(subcommand)]
        action: ObserverAction,
    },
    /// Interactive screen, recomputed on every change (default)
    Tui {
        #[command(flatten)]
        telemetry: TelemetryArgs,
    },
}

#[derive(Subcommand, Debug)]
enum ObserverAction {
    /// Print the observer used by `spot` and the interactive screen
    Show,
    /// Store new coordinates
    Set {
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        latitude: String,
        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        longitude: String,
    },
    /// Forget the stored coordinates
    Clear,
}

#[derive(Args, Debug, Default)]
struct TelemetryArgs {
    /// Aircraft latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true, default_value = "")]
    lat: String,

    /// Aircraft longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true, default_value = "")]
    lon: String,

    /// Aircraft altitude as shown by the tracker, e.g. "10,000 ft"
    #[arg(long, default_value = "")]
    altitude: String,
}

impl TelemetryArgs {
    fn to_text(&self) -> TargetText {
        TargetText::new(&self.lat, &self.lon, &self.altitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ObserverLatitude,
    ObserverLongitude,
    TargetLatitude,
    TargetLongitude,
    TargetAltitude,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::ObserverLatitude,
        Field::ObserverLongitude,
        Field::TargetLatitude,
        Field::TargetLongitude,
        Field::TargetAltitude,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::ObserverLatitude => "Your latitude",
            Field::ObserverLongitude => "Your longitude",
            Field::TargetLatitude => "Aircraft latitude",
            Field::TargetLongitude => "Aircraft longitude",
            Field::TargetAltitude => "Aircraft altitude",
        }
    }

    fn index(&self) -> usize {
        Field::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> Field {
        Field::ALL[(self.index() + 1) % Field::ALL.len()]
    }

    pub fn prev(&self) -> Field {
        Field::ALL[(self.index() + Field::ALL.len() - 1) % Field::ALL.len()]
    }
}

pub struct AppState {
    pub observer: Observer,
    pub telemetry: TargetText,
    pub config: Config,
    pub selected_field: Field,
    pub editing: bool,
    pub input_buffer: String,
    pub last_update: DateTime<Local>,
    edited_latitude: bool,
    edited_longitude: bool,
}

impl AppState {
    fn new(observer: Observer, telemetry: TargetText, config: Config) -> Self {
        Self {
            observer,
            telemetry,
            config,
            selected_field: Field::ObserverLatitude,
            editing: false,
            input_buffer: String::new(),
            last_update: Local::now(),
            edited_latitude: false,
            edited_longitude: false,
        }
    }

    /// Display value of a field that is not being edited
    pub fn field_value(&self, field: Field) -> String {
        let text = match field {
            Field::ObserverLatitude => return coordinate_label(self.observer.latitude),
            Field::ObserverLongitude => return coordinate_label(self.observer.longitude),
            Field::TargetLatitude => &self.telemetry.latitude,
            Field::TargetLongitude => &self.telemetry.longitude,
            Field::TargetAltitude => &self.telemetry.altitude,
        };
        if text.is_empty() {
            observer::UNSET_LABEL.to_string()
        } else {
            text.clone()
        }
    }

    pub fn sighting(&self) -> Result<SightingResult, SightingError> {
        sight(&self.observer, &self.telemetry.parse())
    }

    pub fn status_line(&self) -> String {
        status_line(&self.observer, &self.telemetry.parse())
    }

    fn begin_edit(&mut self) {
        self.input_buffer = match self.selected_field {
            Field::ObserverLatitude => coordinate_to_entry(self.observer.latitude),
            Field::ObserverLongitude => coordinate_to_entry(self.observer.longitude),
            Field::TargetLatitude => self.telemetry.latitude.clone(),
            Field::TargetLongitude => self.telemetry.longitude.clone(),
            Field::TargetAltitude => self.telemetry.altitude.clone(),
        };
        self.editing = true;
    }

    fn commit_edit(&mut self) {
        let text = std::mem::take(&mut self.input_buffer);
        match self.selected_field {
            Field::ObserverLatitude => {
                self.observer.set_latitude_text(&text);
                self.edited_latitude = true;
            }
            Field::ObserverLongitude => {
                self.observer.set_longitude_text(&text);
                self.edited_longitude = true;
            }
            Field::TargetLatitude => self.telemetry.latitude = text,
            Field::TargetLongitude => self.telemetry.longitude = text,
            Field::TargetAltitude => self.telemetry.altitude = text,
        }
        self.editing = false;
        self.last_update = Local::now();
        debug!(field = ?self.selected_field, line = %self.status_line(), "updated");
    }

    fn has_observer_edits(&self) -> bool {
        self.edited_latitude || self.edited_longitude
    }

    /// Persist the coordinates typed during the session, as the page did on
    /// unload. Values that came from the configured defaults are left out.
    fn save_observer_edits(&self, store: &ObserverStore) -> Result<()> {
        if self.edited_latitude {
            store.save_latitude(self.observer.latitude)?;
        }
        if self.edited_longitude {
            store.save_longitude(self.observer.longitude)?;
        }
        Ok(())
    }

    /// Apply a key press. Returns false when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing {
            match code {
                KeyCode::Enter | KeyCode::Esc => self.commit_edit(),
                KeyCode::Tab => {
                    self.commit_edit();
                    self.selected_field = self.selected_field.next();
                    self.begin_edit();
                }
                KeyCode::BackTab => {
                    self.commit_edit();
                    self.selected_field = self.selected_field.prev();
                    self.begin_edit();
                }
                KeyCode::Backspace => {
                    self.input_buffer.pop();
                }
                KeyCode::Char(c) => self.input_buffer.push(c),
                _ => {}
            }
            return true;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Enter | KeyCode::Char('e') => self.begin_edit(),
            KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => {
                self.selected_field = self.selected_field.prev();
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                self.selected_field = self.selected_field.next();
            }
            KeyCode::Home => self.selected_field = Field::ALL[0],
            KeyCode::End => self.selected_field = Field::ALL[Field::ALL.len() - 1],
            _ => {}
        }
        true
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = Config::load_or_default(&cli.config)?;
    let database = config.storage.database_path();

    match cli.command {
        Some(Command::Spot {
            telemetry,
            observer_lat,
            observer_lon,
            details,
        }) => {
            let mut observer = match (&observer_lat, &observer_lon) {
                (Some(_), Some(_)) => Observer::new(config.observer.name.clone(), None, None),
                _ => {
                    let store = ObserverStore::open_read_only(&database)?;
                    resolve_observer(&config, store.as_ref())?
                }
            };
            if let Some(text) = observer_lat {
                observer.set_latitude_text(&text);
            }
            if let Some(text) = observer_lon {
                observer.set_longitude_text(&text);
            }
            print!("{}", spot_report(&observer, &telemetry.to_text(), details));
            Ok(())
        }
        Some(Command::Observer { action }) => {
            let report = match action {
                ObserverAction::Show => {
                    let store = ObserverStore::open_read_only(&database)?;
                    observer_show(&config, store.as_ref())?
                }
                ObserverAction::Set {
                    latitude,
                    longitude,
                } => observer_set(&config, &ObserverStore::open(&database)?, &latitude, &longitude)?,
                ObserverAction::Clear => observer_clear(&ObserverStore::open(&database)?)?,
            };
            print!("{}", report);
            Ok(())
        }
        Some(Command::Tui { telemetry }) => run_tui(config, telemetry.to_text()),
        None => run_tui(config, TargetText::default()),
    }
}

/// Stored coordinates first, configured defaults for whatever is missing
fn resolve_observer(config: &Config, store: Option<&ObserverStore>) -> Result<Observer> {
    let mut observer = match store {
        Some(store) => store.load_observer(&config.observer.name)?,
        None => Observer::new(config.observer.name.clone(), None, None),
    };
    if observer.latitude.is_none() {
        observer.latitude = config.observer.latitude;
    }
    if observer.longitude.is_none() {
        observer.longitude = config.observer.longitude;
    }
    Ok(observer)
}

/// Output of the `spot` command
fn spot_report(observer: &Observer, telemetry: &TargetText, details: bool) -> String {
    let target = telemetry.parse();
    if !target.is_complete() {
        warn!(?telemetry, "incomplete aircraft telemetry");
    }

    let mut report = format!("{}\n", status_line(observer, &target));

    if details {
        if let Ok(result) = sight(observer, &target) {
            report.push_str(&format!(
                "  Azimuth:   {:.1}° ({})\n",
                result.azimuth_degrees(),
                result.compass_point()
            ));
            report.push_str(&format!("  Elevation: {:.1}°\n", result.elevation_degrees()));
            report.push_str(&format!("  Ground:    {:.1} km\n", result.ground_distance_km()));
            report.push_str(&format!("  Slant:     {:.1} km\n", result.slant_distance_km()));
        }
    }
    report
}

fn observer_show(config: &Config, store: Option<&ObserverStore>) -> Result<String> {
    let observer = resolve_observer(config, store)?;
    let position = match observer.position() {
        Ok(position) => format!("{:.4}, {:.4}", position.latitude, position.longitude),
        Err(e) => e.to_string(),
    };
    Ok(format!(
        "{}: {}\n  {}\n",
        observer.name,
        observer.location_label(),
        position
    ))
}

fn observer_set(
    config: &Config,
    store: &ObserverStore,
    latitude: &str,
    longitude: &str,
) -> Result<String> {
    let mut observer = Observer::new(config.observer.name.clone(), None, None);
    observer.set_latitude_text(latitude);
    observer.set_longitude_text(longitude);
    if let Err(e) = observer.position() {
        warn!(%latitude, %longitude, "{}", e);
    }
    store.save_observer(&observer)?;
    Ok(format!("{}: {}\n", observer.name, observer.location_label()))
}

fn observer_clear(store: &ObserverStore) -> Result<String> {
    store.save_latitude(None)?;
    store.save_longitude(None)?;
    Ok("Observer coordinates cleared\n".to_string())
}

fn run_tui(config: Config, telemetry: TargetText) -> Result<()> {
    let database = config.storage.database_path();
    // The connection is only held while loading and saving, not for the session
    let observer = {
        let store = ObserverStore::open_read_only(&database)?;
        resolve_observer(&config, store.as_ref())?
    };
    let mut app_state = AppState::new(observer, telemetry, config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app_state);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if app_state.has_observer_edits() {
        app_state.save_observer_edits(&ObserverStore::open(&database)?)?;
    }

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app_state: &mut AppState,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            ui::draw_ui(f, app_state);
        })?;

        if event::poll(std::time::Duration::from_millis(
            app_state.config.display.refresh_rate,
        ))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && !app_state.handle_key(key.code) {
                    return Ok(());
                }
            }
        }
    }
}
