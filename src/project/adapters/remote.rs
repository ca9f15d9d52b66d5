//! Breaker-guarded clients for the user and task services.
//!
//! Each wrapper owns the [`CircuitBreaker`] it was built with and routes
//! every call of the wrapped client through it.

use async_trait::async_trait;

use crate::project::{
    domain::{ProjectId, UserAccount, UserId},
    ports::{TaskDeletionAck, TaskServiceClient, UserDirectory},
};
use crate::remote::{CircuitBreaker, RemoteResult};

/// User directory client guarded by a circuit breaker.
#[derive(Debug, Clone)]
pub struct BreakerUserDirectory<U> {
    inner: U,
    breaker: CircuitBreaker,
}

impl<U: UserDirectory> BreakerUserDirectory<U> {
    /// Wraps `inner` with `breaker`.
    #[must_use]
    pub const fn new(inner: U, breaker: CircuitBreaker) -> Self {
        Self { inner, breaker }
    }

    /// Returns the breaker guarding this client.
    #[must_use]
    pub const fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }
}

#[async_trait]
impl<U: UserDirectory> UserDirectory for BreakerUserDirectory<U> {
    async fn user_exists(&self, user_id: UserId) -> RemoteResult<bool> {
        self.breaker.call(self.inner.user_exists(user_id)).await
    }

    async fn is_admin(&self, user_id: UserId) -> RemoteResult<bool> {
        self.breaker.call(self.inner.is_admin(user_id)).await
    }

    async fn find_user(&self, user_id: UserId) -> RemoteResult<Option<UserAccount>> {
        self.breaker.call(self.inner.find_user(user_id)).await
    }
}

/// Task service client guarded by a circuit breaker.
#[derive(Debug, Clone)]
pub struct BreakerTaskServiceClient<T> {
    inner: T,
    breaker: CircuitBreaker,
}

impl<T: TaskServiceClient> BreakerTaskServiceClient<T> {
    /// Wraps `inner` with `breaker`.
    #[must_use]
    pub const fn new(inner: T, breaker: CircuitBreaker) -> Self {
        Self { inner, breaker }
    }

    /// Returns the breaker guarding this client.
    #[must_use]
    pub const fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }
}

#[async_trait]
impl<T: TaskServiceClient> TaskServiceClient for BreakerTaskServiceClient<T> {
    async fn delete_tasks_by_project(
        &self,
        project_id: ProjectId,
    ) -> RemoteResult<TaskDeletionAck> {
        self.breaker
            .call(self.inner.delete_tasks_by_project(project_id))
            .await
    }
}
