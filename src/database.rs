use anyhow::Result;
use duckdb::{params, AccessMode, Connection};
use std::path::Path;
use tracing::debug;

use crate::observer::{coordinate_from_entry, Observer};

pub const LATITUDE_KEY: &str = "observer_latitude";
pub const LONGITUDE_KEY: &str = "observer_longitude";

/// Key/value store holding the observer's two coordinates between runs
pub struct ObserverStore {
    conn: Connection,
}

impl ObserverStore {
    /// Open or create a store at the specified path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        debug!(path = %path.as_ref().display(), "opening observer store");
        let conn = Connection::open(path)?;
        let store = ObserverStore { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Open an existing store without write access. Returns None when
    /// nothing has been stored yet, so no file or directory is created.
    pub fn open_read_only<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "no observer store yet");
            return Ok(None);
        }
        debug!(path = %path.display(), "opening observer store read-only");
        let flags = duckdb::Config::default().access_mode(AccessMode::ReadOnly)?;
        let conn = Connection::open_with_flags(path, flags)?;
        Ok(Some(ObserverStore { conn }))
    }

    /// Open an in-memory store (useful for testing)
    #[allow(dead_code)]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = ObserverStore { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS observer_settings (
                key VARCHAR PRIMARY KEY,
                value VARCHAR NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM observer_settings WHERE key = ?")?;

        match stmt.query_row(params![key], |row| row.get(0)) {
            Ok(value) => Ok(Some(value)),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Insert or update a value
    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE observer_settings SET value = ? WHERE key = ?",
            params![value, key],
        )?;

        if affected == 0 {
            self.conn.execute(
                "INSERT INTO observer_settings (key, value) VALUES (?, ?)",
                params![key, value],
            )?;
        }
        Ok(())
    }

    pub fn remove_item(&self, key: &str) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM observer_settings WHERE key = ?", params![key])?;
        Ok(affected > 0)
    }

    /// Restore the observer's coordinates. Missing keys stay unset and
    /// malformed stored text becomes NaN.
    pub fn load_observer(&self, name: &str) -> Result<Observer> {
        let latitude = self.get_item(LATITUDE_KEY)?;
        let longitude = self.get_item(LONGITUDE_KEY)?;

        Ok(Observer::new(
            name.to_string(),
            latitude.and_then(|value| coordinate_from_entry(&value)),
            longitude.and_then(|value| coordinate_from_entry(&value)),
        ))
    }

    pub fn save_observer(&self, observer: &Observer) -> Result<()> {
        self.save_latitude(observer.latitude)?;
        self.save_longitude(observer.longitude)?;
        debug!(location = %observer.location_label(), "saved observer");
        Ok(())
    }

    pub fn save_latitude(&self, value: Option<f64>) -> Result<()> {
        self.save_coordinate(LATITUDE_KEY, value)
    }

    pub fn save_longitude(&self, value: Option<f64>) -> Result<()> {
        self.save_coordinate(LONGITUDE_KEY, value)
    }

    fn save_coordinate(&self, key: &str, value: Option<f64>) -> Result<()> {
        match value {
            Some(v) => self.set_item(key, &v.to_string()),
            None => self.remove_item(key).map(|_| ()),
        }
    }
}
