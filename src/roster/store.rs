use std::{collections::HashMap, sync::Arc, time::{Duration, Instant}};

use tokio::{sync::Mutex, task::JoinHandle};
use uuid::Uuid;

use crate::blocks::Block;

use super::{Room, RoomRoster, RosterError, User};

struct Entry {
    roster: RoomRoster,
    touched: Instant,
}

/// Live room polls, keyed by roster id. Polls nobody has clicked on for
/// longer than the TTL are dropped.
pub struct RosterStore {
    rosters: Mutex<HashMap<Uuid, Entry>>,
    ttl: Duration,
}

impl RosterStore {
    pub fn new(ttl: Duration) -> RosterStore {
        RosterStore {
            rosters: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Starts a poll for `created_by`, returning its id and first render.
    pub async fn create(&self, created_by: User) -> (Uuid, Vec<Block>) {
        let now = Instant::now();
        let roster = RoomRoster::new(created_by);
        let id = roster.id();
        let blocks = roster.render();

        let mut rosters = self.rosters.lock().await;
        Self::evict(&mut rosters, self.ttl, now);
        rosters.insert(id, Entry { roster, touched: now });

        tracing::info!(%id, polls = rosters.len(), "room poll created");
        (id, blocks)
    }

    /// Assigns and renders under one lock, so clicks on the same poll
    /// apply one after another.
    pub async fn assign(&self, id: Uuid, user: User, room: Room) -> Result<Vec<Block>, RosterError> {
        let mut rosters = self.rosters.lock().await;
        let entry = rosters.get_mut(&id).ok_or(RosterError::RosterNotFound(id))?;

        tracing::debug!(%id, user = %user.id, %room, "assigning room");
        entry.roster.assign(user, room);
        entry.touched = Instant::now();
        Ok(entry.roster.render())
    }

    pub async fn render(&self, id: Uuid) -> Result<Vec<Block>, RosterError> {
        let rosters = self.rosters.lock().await;
        rosters
            .get(&id)
            .map(|entry| entry.roster.render())
            .ok_or(RosterError::RosterNotFound(id))
    }

    pub async fn len(&self) -> usize {
        self.rosters.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn evict_expired(&self) -> usize {
        self.evict_expired_at(Instant::now()).await
    }

    pub(crate) async fn evict_expired_at(&self, now: Instant) -> usize {
        let mut rosters = self.rosters.lock().await;
        Self::evict(&mut rosters, self.ttl, now)
    }

    fn evict(rosters: &mut HashMap<Uuid, Entry>, ttl: Duration, now: Instant) -> usize {
        let before = rosters.len();
        rosters.retain(|_, entry| now.saturating_duration_since(entry.touched) <= ttl);
        let evicted = before - rosters.len();
        if evicted > 0 {
            tracing::info!(evicted, remaining = rosters.len(), "evicted idle room polls");
        }
        evicted
    }

    /// Sweeps idle polls every `every` until the task is aborted.
    pub fn spawn_sweeper(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.tick().await;
            loop {
                interval.tick().await;
                self.evict_expired().await;
            }
        })
    }
}
