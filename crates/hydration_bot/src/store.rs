//! Profile and event-log storage.
//!
//! The engine never writes storage itself; the bot appends events and reads
//! today's slice back through these traits. Two backends are provided: an
//! in-memory one and a JSON file keyed by user id.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::{BotError, BotResult};
use crate::types::{EventCategory, FoodEvent, LoggedEvent, Profile, WaterEvent, WorkoutEvent};

#[async_trait]
pub trait ProfileStore: Send + Sync + 'static {
    async fn get_profile(&self, user_id: &str) -> BotResult<Option<Profile>>;
    /// Replace the stored profile; last write wins.
    async fn set_profile(&self, user_id: &str, profile: Profile) -> BotResult<()>;
}

#[async_trait]
pub trait EventLog: Send + Sync + 'static {
    /// Append one event; its category follows from the variant.
    async fn append(&self, user_id: &str, event: LoggedEvent) -> BotResult<()>;
    /// Events of `category` whose date equals `today` exactly, in log order.
    async fn read_today(
        &self,
        user_id: &str,
        category: EventCategory,
        today: &str,
    ) -> BotResult<Vec<LoggedEvent>>;
}

/// Volatile store used in tests and for throwaway sessions.
#[derive(Default)]
pub struct InMemoryStore {
    profiles: Mutex<HashMap<String, Profile>>,
    events: Mutex<HashMap<String, Vec<LoggedEvent>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for InMemoryStore {
    async fn get_profile(&self, user_id: &str) -> BotResult<Option<Profile>> {
        Ok(self.profiles.lock().await.get(user_id).cloned())
    }

    async fn set_profile(&self, user_id: &str, profile: Profile) -> BotResult<()> {
        self.profiles
            .lock()
            .await
            .insert(user_id.to_string(), profile);
        Ok(())
    }
}

#[async_trait]
impl EventLog for InMemoryStore {
    async fn append(&self, user_id: &str, event: LoggedEvent) -> BotResult<()> {
        self.events
            .lock()
            .await
            .entry(user_id.to_string())
            .or_default()
            .push(event);
        Ok(())
    }

    async fn read_today(
        &self,
        user_id: &str,
        category: EventCategory,
        today: &str,
    ) -> BotResult<Vec<LoggedEvent>> {
        let map = self.events.lock().await;
        Ok(map
            .get(user_id)
            .map(|events| {
                events
                    .iter()
                    .filter(|e| e.category() == category && e.date() == today)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct UserRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    profile: Option<Profile>,
    #[serde(default)]
    logs: UserLogs,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct UserLogs {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    water: Vec<WaterEvent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    food: Vec<FoodEvent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    workout: Vec<WorkoutEvent>,
}

type Database = BTreeMap<String, UserRecord>;

/// Store backed by one JSON document:
/// `{ user_id: { profile: {...}, logs: { water: [...], food: [...], workout: [...] } } }`.
///
/// Every mutation is load, modify, write under a single lock, so concurrent
/// appends from one process never lose each other.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> BotResult<Database> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) if raw.trim().is_empty() => Ok(Database::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Database::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, db: &Database) -> BotResult<()> {
        let body = serde_json::to_string_pretty(db)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            BotError::Storage(format!("cannot replace {}: {e}", self.path.display()))
        })?;
        Ok(())
    }

    async fn update<F>(&self, user_id: &str, f: F) -> BotResult<()>
    where
        F: FnOnce(&mut UserRecord) + Send,
    {
        let _guard = self.lock.lock().await;
        let mut db = self.load().await?;
        f(db.entry(user_id.to_string()).or_default());
        self.save(&db).await
    }
}

#[async_trait]
impl ProfileStore for JsonFileStore {
    async fn get_profile(&self, user_id: &str) -> BotResult<Option<Profile>> {
        let _guard = self.lock.lock().await;
        let mut db = self.load().await?;
        Ok(db.remove(user_id).and_then(|r| r.profile))
    }

    async fn set_profile(&self, user_id: &str, profile: Profile) -> BotResult<()> {
        self.update(user_id, |record| record.profile = Some(profile))
            .await
    }
}

#[async_trait]
impl EventLog for JsonFileStore {
    async fn append(&self, user_id: &str, event: LoggedEvent) -> BotResult<()> {
        self.update(user_id, |record| match event {
            LoggedEvent::Water(e) => record.logs.water.push(e),
            LoggedEvent::Food(e) => record.logs.food.push(e),
            LoggedEvent::Workout(e) => record.logs.workout.push(e),
        })
        .await
    }

    async fn read_today(
        &self,
        user_id: &str,
        category: EventCategory,
        today: &str,
    ) -> BotResult<Vec<LoggedEvent>> {
        let _guard = self.lock.lock().await;
        let mut db = self.load().await?;
        let Some(record) = db.remove(user_id) else {
            return Ok(Vec::new());
        };
        let logs = record.logs;
        let events: Vec<LoggedEvent> = match category {
            EventCategory::Water => logs.water.into_iter().map(LoggedEvent::Water).collect(),
            EventCategory::Food => logs.food.into_iter().map(LoggedEvent::Food).collect(),
            EventCategory::Workout => logs
                .workout
                .into_iter()
                .map(LoggedEvent::Workout)
                .collect(),
        };
        Ok(events.into_iter().filter(|e| e.date() == today).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water(date: &str, ml: u32) -> LoggedEvent {
        LoggedEvent::Water(WaterEvent {
            date: date.into(),
            amount_ml: ml,
        })
    }

    #[tokio::test]
    async fn in_memory_profile_last_write_wins() {
        let store = InMemoryStore::new();
        assert!(store.get_profile("u1").await.unwrap().is_none());
        let mut p = Profile {
            sex: "male".into(),
            age: 30,
            weight_kg: 75.0,
            height_cm: 180.0,
        };
        store.set_profile("u1", p.clone()).await.unwrap();
        p.weight_kg = 80.0;
        store.set_profile("u1", p.clone()).await.unwrap();
        assert_eq!(store.get_profile("u1").await.unwrap(), Some(p));
    }

    #[tokio::test]
    async fn in_memory_read_today_filters_user_category_and_date() {
        let store = InMemoryStore::new();
        store.append("u1", water("2025-06-01", 200)).await.unwrap();
        store.append("u1", water("2025-05-31", 900)).await.unwrap();
        store.append("u2", water("2025-06-01", 300)).await.unwrap();
        let today = store
            .read_today("u1", EventCategory::Water, "2025-06-01")
            .await
            .unwrap();
        assert_eq!(today, vec![water("2025-06-01", 200)]);
        let food = store
            .read_today("u1", EventCategory::Food, "2025-06-01")
            .await
            .unwrap();
        assert!(food.is_empty());
    }
}
