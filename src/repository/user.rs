use crate::model::User;
use crate::repository::{RepositoryClient, RepositoryHandle};

/// Repository for user accounts.
///
/// The full surface comes from [`RepositoryHandle`]; accounts need nothing
/// beyond the standard collection operations.
#[derive(Clone)]
pub struct UserRepository {
    inner: RepositoryClient<User>,
}

impl UserRepository {
    pub fn new(inner: RepositoryClient<User>) -> Self {
        Self { inner }
    }
}

impl RepositoryHandle<User> for UserRepository {
    fn inner(&self) -> &RepositoryClient<User> {
        &self.inner
    }
}
