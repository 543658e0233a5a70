use serde::{Deserialize, Serialize};

use crate::repository::StoreRecord;

/// Balance granted to every account at registration.
pub const INITIAL_BALANCE: f64 = 10_000.0;

/// A registered account.
///
/// The id is chosen at registration and never changes afterwards. The
/// password is stored as entered; this is a teaching system, not a vault.
/// The balance never goes below zero — every mutation path checks first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub password: String,
    pub name: String,
    pub balance: f64,
}

impl User {
    /// Creates an account with the fixed starting balance.
    pub fn new(id: impl Into<String>, password: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            password: password.into(),
            name: name.into(),
            balance: INITIAL_BALANCE,
        }
    }

    /// Whether `input` matches the stored password.
    pub fn matches_password(&self, input: &str) -> bool {
        self.password == input
    }

    /// Whether the account can cover `amount`.
    pub fn has_enough_balance(&self, amount: f64) -> bool {
        self.balance >= amount
    }
}

impl StoreRecord for User {
    type Id = String;

    const SLOT: &'static str = "users.json";

    fn id(&self) -> String {
        self.id.clone()
    }
}
