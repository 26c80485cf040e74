use std::collections::HashMap;

use tokio::sync::Mutex;

/// Where a user's conversation stands between two messages.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DialogueState {
    #[default]
    Idle,
    /// A product was found; the next message is its weight in grams.
    AwaitingGrams {
        product_name: String,
        kcal_per_100g: f64,
    },
}

/// Short-lived dialogue state per user id. Not persisted.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    states: Mutex<HashMap<String, DialogueState>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, user_id: &str) -> DialogueState {
        self.states
            .lock()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn set(&self, user_id: &str, state: DialogueState) {
        let mut map = self.states.lock().await;
        if state == DialogueState::Idle {
            map.remove(user_id);
        } else {
            map.insert(user_id.to_string(), state);
        }
    }

    /// Take the current state and reset the user to [`DialogueState::Idle`].
    pub async fn take(&self, user_id: &str) -> DialogueState {
        self.states
            .lock()
            .await
            .remove(user_id)
            .unwrap_or_default()
    }
}
