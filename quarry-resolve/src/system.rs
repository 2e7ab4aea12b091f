//! System helpers: users.

use crate::candidate::Candidate;
use crate::error::ResolveResult;
use crate::resolver::{first_of, Lookup, Resolver};
use async_trait::async_trait;
use quarry_client::{Filter, SystemApi};
use quarry_model::system::User;
use quarry_model::Entity;
use quarry_types::ObjectId;
use std::sync::Arc;

/// Users by id or handle.
pub struct UserLookup<'a> {
    pub api: &'a dyn SystemApi,
}

#[async_trait]
impl Lookup<User> for UserLookup<'_> {
    async fn find_by_id(&self, id: ObjectId) -> ResolveResult<User> {
        Ok(User::from_raw(&self.api.user_read(id).await?)?)
    }

    async fn find_by_handle(&self, handle: &str) -> ResolveResult<Option<User>> {
        let filter = Filter::new().with("handle", handle).limit(1);
        first_of(&self.api.user_list(&filter).await?, "handle", handle)
    }
}

#[derive(Clone)]
pub struct SystemHelper {
    api: Arc<dyn SystemApi>,
}

impl SystemHelper {
    pub fn new(api: Arc<dyn SystemApi>) -> Self {
        Self { api }
    }

    pub async fn resolve_user<'c>(&self, candidates: Vec<Candidate<'c, User>>) -> ResolveResult<User> {
        let lookup = UserLookup { api: self.api.as_ref() };
        Resolver::new(&lookup).resolve(candidates).await
    }
}
