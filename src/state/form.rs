//! Per-user state for multi-step command wizards.
//!
//! Wizards span several interactions (select menus, buttons, a modal) and keep what the
//! user picked so far keyed by user id. Nothing here is persisted; an abandoned wizard is
//! removed by the periodic sweep.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::Arc;

/// Wizard data together with the time the wizard was started.
#[derive(Debug, Clone)]
pub struct FormState<T> {
    pub data: T,
    pub created_at: DateTime<Utc>,
}

/// Concurrent map of user id to wizard state; clones share the same map.
#[derive(Debug)]
pub struct FormStateStore<T> {
    states: Arc<DashMap<u64, FormState<T>>>,
}

impl<T> Clone for FormStateStore<T> {
    fn clone(&self) -> Self {
        Self {
            states: self.states.clone(),
        }
    }
}

impl<T> Default for FormStateStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FormStateStore<T> {
    pub fn new() -> Self {
        Self {
            states: Arc::new(DashMap::new()),
        }
    }

    /// Removes the user's state, if any.
    pub fn clear(&self, user_id: u64) {
        self.states.remove(&user_id);
    }

    /// Removes every state started more than `max_age` ago.
    ///
    /// # Returns
    /// Number of states removed.
    pub fn sweep(&self, max_age: Duration) -> usize {
        self.sweep_at(Utc::now(), max_age)
    }

    pub(crate) fn sweep_at(&self, now: DateTime<Utc>, max_age: Duration) -> usize {
        let before = self.states.len();
        self.states
            .retain(|_, state| now - state.created_at <= max_age);
        before.saturating_sub(self.states.len())
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl<T: Clone + Default> FormStateStore<T> {
    /// Returns the user's wizard data, starting a fresh wizard if there is none.
    pub fn get_or_create(&self, user_id: u64) -> T {
        self.states
            .entry(user_id)
            .or_insert_with(|| FormState {
                data: T::default(),
                created_at: Utc::now(),
            })
            .data
            .clone()
    }

    /// Returns the user's wizard data without starting one.
    pub fn try_get(&self, user_id: u64) -> Option<T> {
        self.states.get(&user_id).map(|state| state.data.clone())
    }

    /// Applies `change` to the user's wizard data, starting a wizard if needed.
    ///
    /// The wizard's start time is kept, so editing does not postpone its sweep.
    pub fn update<F>(&self, user_id: u64, change: F) -> T
    where
        F: FnOnce(&mut T),
    {
        let mut entry = self.states.entry(user_id).or_insert_with(|| FormState {
            data: T::default(),
            created_at: Utc::now(),
        });
        change(&mut entry.data);
        entry.data.clone()
    }

    /// Replaces the user's wizard with fresh data started now.
    pub fn reset(&self, user_id: u64) -> T {
        let data = T::default();
        self.states.insert(
            user_id,
            FormState {
                data: data.clone(),
                created_at: Utc::now(),
            },
        );
        data
    }

    #[cfg(test)]
    fn insert_started_at(&self, user_id: u64, created_at: DateTime<Utc>) {
        self.states.insert(
            user_id,
            FormState {
                data: T::default(),
                created_at,
            },
        );
    }
}

/// `/poll` wizard progress.
#[derive(Debug, Clone, Default)]
pub struct PollForm {
    pub duration: Option<std::time::Duration>,
    pub question: String,
    pub answers: Vec<String>,
    pub emojis: Vec<String>,
}

/// `/giveaway` wizard progress.
#[derive(Debug, Clone, Default)]
pub struct GiveawayForm {
    pub duration: Option<std::time::Duration>,
    pub prize: String,
    pub winner_count: usize,
    pub reaction_emoji: String,
}

/// `/support` wizard selections, collected before the description modal.
#[derive(Debug, Clone, Default)]
pub struct SupportForm {
    pub application: Option<String>,
    pub issue_type: Option<String>,
    pub reproducibility: Option<String>,
    pub urgency: Option<String>,
    pub platform: Option<String>,
}

/// The wizard stores shared by every interaction handler.
#[derive(Debug, Clone, Default)]
pub struct FormStores {
    pub poll: FormStateStore<PollForm>,
    pub giveaway: FormStateStore<GiveawayForm>,
    pub support: FormStateStore<SupportForm>,
}

impl FormStores {
    /// Sweeps every store.
    ///
    /// # Returns
    /// Total number of states removed.
    pub fn sweep_all(&self, max_age: Duration) -> usize {
        self.poll.sweep(max_age) + self.giveaway.sweep(max_age) + self.support.sweep(max_age)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_removes_only_stale_states() {
        let store: FormStateStore<PollForm> = FormStateStore::new();
        let now = Utc::now();
        store.insert_started_at(1, now - Duration::minutes(31));
        store.insert_started_at(2, now - Duration::minutes(5));

        let removed = store.sweep_at(now, Duration::minutes(30));

        assert_eq!(removed, 1);
        assert!(store.try_get(1).is_none());
        assert!(store.try_get(2).is_some());
    }

    #[test]
    fn get_or_create_keeps_existing_data() {
        let store: FormStateStore<GiveawayForm> = FormStateStore::new();
        store.update(7, |form| form.prize = "Nitro".to_string());

        let form = store.get_or_create(7);

        assert_eq!(form.prize, "Nitro");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn try_get_does_not_start_a_wizard() {
        let store: FormStateStore<SupportForm> = FormStateStore::new();

        assert!(store.try_get(3).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn clones_share_state() {
        let store: FormStateStore<PollForm> = FormStateStore::new();
        let other = store.clone();

        other.update(4, |form| form.question = "Lunch?".to_string());
        store.clear(4);

        assert!(other.try_get(4).is_none());
    }

    #[test]
    fn reset_restarts_the_clock() {
        let store: FormStateStore<PollForm> = FormStateStore::new();
        let now = Utc::now();
        store.insert_started_at(5, now - Duration::minutes(40));

        store.reset(5);

        assert_eq!(store.sweep(Duration::minutes(30)), 0);
        assert!(store.try_get(5).unwrap().question.is_empty());
    }

    #[tokio::test]
    async fn concurrent_handlers_do_not_lose_updates() {
        let stores = FormStores::default();
        let mut handles = Vec::new();

        for user in 0..16u64 {
            let stores = stores.clone();
            handles.push(tokio::spawn(async move {
                stores.poll.update(user, |form| form.answers.push(user.to_string()));
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(stores.poll.len(), 16);
        assert_eq!(stores.sweep_all(Duration::minutes(30)), 0);
    }
}
