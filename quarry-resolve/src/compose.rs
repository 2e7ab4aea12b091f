//! Compose helpers: namespaces, modules and pages.

use crate::candidate::Candidate;
use crate::error::{ResolveError, ResolveResult};
use crate::resolver::{first_of, Lookup, Resolver};
use async_trait::async_trait;
use quarry_client::{ComposeApi, Filter};
use quarry_model::compose::{Module, Namespace, Page};
use quarry_model::Entity;
use quarry_types::ObjectId;
use std::sync::Arc;
use tracing::debug;

/// Namespaces by id or slug.
pub struct NamespaceLookup<'a> {
    pub api: &'a dyn ComposeApi,
}

#[async_trait]
impl Lookup<Namespace> for NamespaceLookup<'_> {
    async fn find_by_id(&self, id: ObjectId) -> ResolveResult<Namespace> {
        Ok(Namespace::from_raw(&self.api.namespace_read(id).await?)?)
    }

    async fn find_by_handle(&self, slug: &str) -> ResolveResult<Option<Namespace>> {
        let filter = Filter::new().with("slug", slug).limit(1);
        first_of(&self.api.namespace_list(&filter).await?, "slug", slug)
    }
}

/// Modules of one namespace, by id or handle.
pub struct ModuleLookup<'a> {
    pub api: &'a dyn ComposeApi,
    pub namespace_id: ObjectId,
}

#[async_trait]
impl Lookup<Module> for ModuleLookup<'_> {
    async fn find_by_id(&self, id: ObjectId) -> ResolveResult<Module> {
        Ok(Module::from_raw(&self.api.module_read(self.namespace_id, id).await?)?)
    }

    async fn find_by_handle(&self, handle: &str) -> ResolveResult<Option<Module>> {
        let filter = Filter::new().with("handle", handle).limit(1);
        first_of(&self.api.module_list(self.namespace_id, &filter).await?, "handle", handle)
    }
}

/// Pages of one namespace, by id or handle.
pub struct PageLookup<'a> {
    pub api: &'a dyn ComposeApi,
    pub namespace_id: ObjectId,
}

#[async_trait]
impl Lookup<Page> for PageLookup<'_> {
    async fn find_by_id(&self, id: ObjectId) -> ResolveResult<Page> {
        Ok(Page::from_raw(&self.api.page_read(self.namespace_id, id).await?)?)
    }

    async fn find_by_handle(&self, handle: &str) -> ResolveResult<Option<Page>> {
        let filter = Filter::new().with("handle", handle).limit(1);
        first_of(&self.api.page_list(self.namespace_id, &filter).await?, "handle", handle)
    }
}

/// Resolves compose resources, falling back on a context namespace.
#[derive(Clone)]
pub struct ComposeHelper {
    api: Arc<dyn ComposeApi>,
    namespace: Option<Namespace>,
}

impl ComposeHelper {
    pub fn new(api: Arc<dyn ComposeApi>) -> Self {
        Self { api, namespace: None }
    }

    /// Sets the namespace used when a call names none.
    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = Some(namespace);
        self
    }

    pub fn namespace(&self) -> Option<&Namespace> {
        self.namespace.as_ref()
    }

    /// Resolves a namespace; the context namespace is tried last.
    pub async fn resolve_namespace<'c>(
        &self,
        candidates: Vec<Candidate<'c, Namespace>>,
    ) -> ResolveResult<Namespace> {
        let lookup = NamespaceLookup { api: self.api.as_ref() };
        let context = self.namespace.clone().map(Candidate::Entity);
        Resolver::new(&lookup)
            .resolve(candidates.into_iter().chain(context))
            .await
    }

    /// Resolves a module inside `namespace` (or the context namespace).
    pub async fn resolve_module<'c>(
        &self,
        candidates: Vec<Candidate<'c, Module>>,
        namespace: Option<Candidate<'c, Namespace>>,
    ) -> ResolveResult<Module> {
        let namespace_id = self.namespace_id(namespace).await?;
        let lookup = ModuleLookup {
            api: self.api.as_ref(),
            namespace_id,
        };
        Resolver::new(&lookup).resolve(candidates).await
    }

    /// Resolves a page inside `namespace` (or the context namespace).
    pub async fn resolve_page<'c>(
        &self,
        candidates: Vec<Candidate<'c, Page>>,
        namespace: Option<Candidate<'c, Namespace>>,
    ) -> ResolveResult<Page> {
        let namespace_id = self.namespace_id(namespace).await?;
        let lookup = PageLookup {
            api: self.api.as_ref(),
            namespace_id,
        };
        Resolver::new(&lookup).resolve(candidates).await
    }

    /// Loads every page of a namespace and assembles them into a forest.
    pub async fn find_page_tree<'c>(
        &self,
        namespace: Option<Candidate<'c, Namespace>>,
    ) -> ResolveResult<Vec<Page>> {
        let namespace_id = self.namespace_id(namespace).await?;
        let list = self.api.page_list(namespace_id, &Filter::new()).await?;
        let pages = list
            .objects()
            .map(Page::from_raw)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(%namespace_id, pages = pages.len(), "assembling page tree");
        Ok(Page::assemble(pages))
    }

    async fn namespace_id(&self, namespace: Option<Candidate<'_, Namespace>>) -> ResolveResult<ObjectId> {
        let namespace = match namespace {
            Some(candidate) => self.resolve_namespace(vec![candidate]).await?,
            None => self
                .namespace
                .clone()
                .ok_or(ResolveError::MissingContext("namespace"))?,
        };
        Ok(namespace.namespace_id)
    }
}
