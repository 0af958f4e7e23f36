//! User service implementation.

use crate::cache::{cache_keys, ReadThroughCache};
use crate::dto::{CreateUserRequest, UserResponse};
use crate::user_service::UserService;
use async_trait::async_trait;
use roster_core::{NewUser, RosterError, RosterResult, UserId, ValidateExt};
use roster_repository::UserRepository;
use std::sync::Arc;
use tracing::{debug, info};

/// User service backed by a repository with a read-through cache in front.
pub struct UserServiceImpl<R: UserRepository + ?Sized> {
    user_repository: Arc<R>,
    cache: ReadThroughCache,
}

impl<R: UserRepository + ?Sized> UserServiceImpl<R> {
    /// Creates a new user service.
    pub fn new(user_repository: Arc<R>, cache: ReadThroughCache) -> Self {
        Self { user_repository, cache }
    }
}

#[async_trait]
impl<R: UserRepository + ?Sized + 'static> UserService for UserServiceImpl<R> {
    async fn create_user(&self, request: CreateUserRequest) -> RosterResult<UserResponse> {
        debug!("Creating user: {}", request.name);

        request.validate_request()?;

        let user = self.user_repository.create(&NewUser::from(request)).await?;
        let response = UserResponse::from(user);

        self.cache
            .store(&cache_keys::user_by_id(response.id), &response)
            .await;

        info!("User created: {}", response.id);
        Ok(response)
    }

    async fn get_user(&self, id: UserId) -> RosterResult<UserResponse> {
        debug!("Getting user: {}", id);

        let cache_key = cache_keys::user_by_id(id);

        if let Some(cached) = self.cache.lookup::<UserResponse>(&cache_key).await {
            debug!("Cache hit for user: {}", id);
            return Ok(cached);
        }

        let user = self
            .user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| RosterError::not_found("User", id))?;

        let response = UserResponse::from(user);
        self.cache.store(&cache_key, &response).await;

        Ok(response)
    }
}
