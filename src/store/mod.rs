//! In-memory per-user record store
//!
//! Stands in for a database behind the HTTP surface: users and session
//! tokens, per-user assumptions, holdings, cached quotes, and persisted
//! projection summaries. Projection tables are never stored; only the
//! summary and its checkpoint children are.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

use crate::assumptions::Assumptions;
use crate::holding::Holding;
use crate::projection::{Checkpoint, ProjectionResult, ProjectionSummary, CHECKPOINT_DAYS};

/// Store-level failures, each mapped to a distinct HTTP category upstream
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("unknown session token")]
    InvalidToken,

    #[error("user not found")]
    UserNotFound,

    #[error("holding not found")]
    HoldingNotFound,

    #[error("no projections yet")]
    NoProjection,
}

pub type UserId = u64;

#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// A holding with its storage identity
#[derive(Debug, Clone, Serialize)]
pub struct StoredHolding {
    pub id: u64,
    #[serde(flatten)]
    pub holding: Holding,
    pub updated_at: DateTime<Utc>,
}

/// Cached quote for one (user, ticker) pair
#[derive(Debug, Clone, Serialize)]
pub struct PriceRecord {
    pub ticker: String,
    pub price: f64,
    pub ts: DateTime<Utc>,
    pub source: String,
}

/// Persisted projection: summary plus checkpoint children
#[derive(Debug, Clone, Serialize)]
pub struct StoredProjection {
    #[serde(flatten)]
    pub summary: ProjectionSummary,
    pub checkpoints: Vec<Checkpoint>,
}

/// The record store; one instance serves every user
#[derive(Debug, Default)]
pub struct RecordStore {
    next_id: u64,
    users: HashMap<UserId, UserRecord>,
    users_by_name: HashMap<String, UserId>,
    sessions: HashMap<String, UserId>,
    assumptions: HashMap<UserId, Assumptions>,
    holdings: HashMap<UserId, Vec<StoredHolding>>,
    prices: HashMap<(UserId, String), PriceRecord>,
    projections: HashMap<UserId, Vec<StoredProjection>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Find-or-create the user and issue a fresh opaque session token.
    /// First login also seeds default assumptions.
    pub fn login(&mut self, username: &str) -> (String, UserId) {
        let user_id = match self.users_by_name.get(username) {
            Some(&id) => id,
            None => {
                let id = self.allocate_id();
                self.users.insert(
                    id,
                    UserRecord {
                        id,
                        username: username.to_string(),
                        created_at: Utc::now(),
                    },
                );
                self.users_by_name.insert(username.to_string(), id);
                self.assumptions.insert(id, Assumptions::default());
                id
            }
        };

        let token = Uuid::new_v4().to_string();
        self.sessions.insert(token.clone(), user_id);
        (token, user_id)
    }

    /// Resolve a bearer token to its user
    pub fn user_for_token(&self, token: &str) -> Result<UserId, StoreError> {
        self.sessions
            .get(token)
            .copied()
            .ok_or(StoreError::InvalidToken)
    }

    pub fn username(&self, user: UserId) -> Result<&str, StoreError> {
        self.users
            .get(&user)
            .map(|u| u.username.as_str())
            .ok_or(StoreError::UserNotFound)
    }

    // ---- assumptions ----

    pub fn assumptions(&self, user: UserId) -> Result<&Assumptions, StoreError> {
        self.assumptions.get(&user).ok_or(StoreError::UserNotFound)
    }

    pub fn set_assumptions(
        &mut self,
        user: UserId,
        assumptions: Assumptions,
    ) -> Result<(), StoreError> {
        if !self.users.contains_key(&user) {
            return Err(StoreError::UserNotFound);
        }
        self.assumptions.insert(user, assumptions);
        Ok(())
    }

    // ---- holdings ----

    pub fn holdings(&self, user: UserId) -> &[StoredHolding] {
        self.holdings
            .get(&user)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn add_holding(&mut self, user: UserId, holding: Holding) -> StoredHolding {
        let record = StoredHolding {
            id: self.allocate_id(),
            holding,
            updated_at: Utc::now(),
        };
        self.holdings.entry(user).or_default().push(record.clone());
        record
    }

    /// Replace a holding owned by `user`; a foreign or unknown id is not found
    pub fn update_holding(
        &mut self,
        user: UserId,
        id: u64,
        holding: Holding,
    ) -> Result<StoredHolding, StoreError> {
        let rows = self
            .holdings
            .get_mut(&user)
            .ok_or(StoreError::HoldingNotFound)?;
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::HoldingNotFound)?;
        row.holding = holding;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    pub fn delete_holding(&mut self, user: UserId, id: u64) -> Result<(), StoreError> {
        let rows = self
            .holdings
            .get_mut(&user)
            .ok_or(StoreError::HoldingNotFound)?;
        let before = rows.len();
        rows.retain(|r| r.id != id);
        if rows.len() == before {
            return Err(StoreError::HoldingNotFound);
        }
        Ok(())
    }

    /// Distinct uppercased ticker symbols across the user's holdings
    pub fn ticker_symbols(&self, user: UserId) -> Vec<String> {
        let mut symbols: Vec<String> = self
            .holdings(user)
            .iter()
            .filter_map(|r| r.holding.ticker_symbol())
            .collect();
        symbols.sort();
        symbols.dedup();
        symbols
    }

    // ---- price cache ----

    pub fn cached_price(&self, user: UserId, ticker: &str) -> Option<&PriceRecord> {
        self.prices.get(&(user, ticker.to_uppercase()))
    }

    pub fn upsert_price(&mut self, user: UserId, ticker: &str, price: f64, source: &str) {
        let key = (user, ticker.to_uppercase());
        self.prices.insert(
            key.clone(),
            PriceRecord {
                ticker: key.1.clone(),
                price,
                ts: Utc::now(),
                source: source.to_string(),
            },
        );
    }

    /// Symbol-to-price map consumed by the projection snapshot
    pub fn price_map(&self, user: UserId) -> HashMap<String, f64> {
        self.prices
            .iter()
            .filter(|((uid, _), _)| *uid == user)
            .map(|((_, sym), rec)| (sym.clone(), rec.price))
            .collect()
    }

    // ---- projections ----

    /// Persist the summary and its checkpoint children; the monthly table
    /// belongs to the immediate caller and is dropped here.
    pub fn save_projection(&mut self, user: UserId, result: &ProjectionResult) {
        let checkpoints = result
            .checkpoints
            .iter()
            .filter(|c| CHECKPOINT_DAYS.contains(&c.day))
            .copied()
            .collect();
        self.projections.entry(user).or_default().push(StoredProjection {
            summary: result.summary(),
            checkpoints,
        });
    }

    pub fn latest_projection(&self, user: UserId) -> Result<&StoredProjection, StoreError> {
        self.projections
            .get(&user)
            .and_then(|rows| rows.last())
            .ok_or(StoreError::NoProjection)
    }
}
