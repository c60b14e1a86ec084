//! User profile service.
//!
//! Profiles are only ever read one at a time, so the `users` collection entry
//! stays absent and writes only touch the item keys.

use std::sync::Arc;

use eventdesk_core::cache::{CacheScope, EntityKind, TtlRegistry, USERS_KEY, USER_PREFIX};
use eventdesk_core::portal::{CreateUserRequest, UpdateUserRequest, UserProfile};
use eventdesk_core::storage::{DocumentStore, Result, TypedCollection};

use crate::storage::CacheAside;

const COLLECTION: &str = "users";

#[derive(Clone)]
pub struct UserService {
    users: TypedCollection<UserProfile>,
    aside: Arc<CacheAside>,
    scope: CacheScope,
}

impl UserService {
    pub fn new(store: Arc<dyn DocumentStore>, aside: Arc<CacheAside>, ttl: &TtlRegistry) -> Self {
        Self {
            users: TypedCollection::new(store, COLLECTION),
            aside,
            scope: CacheScope::new(USERS_KEY, USER_PREFIX, ttl.ttl(EntityKind::Users)),
        }
    }

    pub async fn get(&self, id: &str) -> Result<Option<UserProfile>> {
        self.aside.get_item(&self.scope, id, &self.users).await
    }

    pub async fn create(&self, request: CreateUserRequest) -> Result<UserProfile> {
        let profile = request.into_profile()?;
        self.aside.create_item(&self.scope, profile, &self.users).await
    }

    pub async fn update(
        &self,
        id: &str,
        request: UpdateUserRequest,
    ) -> Result<Option<UserProfile>> {
        self.aside
            .modify_item(&self.scope, id, &self.users, |profile: &mut UserProfile| {
                request.apply_to(profile).map_err(Into::into)
            })
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        if self.get(id).await?.is_none() {
            return Ok(false);
        }

        self.aside
            .delete_item::<UserProfile, _>(&self.scope, id, &self.users)
            .await
    }
}
