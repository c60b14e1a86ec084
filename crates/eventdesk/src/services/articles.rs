//! Article service.

use std::sync::Arc;

use eventdesk_core::cache::{CacheScope, EntityKind, TtlRegistry, ARTICLES_KEY, ARTICLE_PREFIX};
use eventdesk_core::portal::{Article, CreateArticleRequest, UpdateArticleRequest};
use eventdesk_core::storage::{DocumentStore, Result, TypedCollection};

use crate::storage::CacheAside;

const COLLECTION: &str = "articles";

#[derive(Clone)]
pub struct ArticleService {
    articles: TypedCollection<Article>,
    aside: Arc<CacheAside>,
    scope: CacheScope,
}

impl ArticleService {
    pub fn new(store: Arc<dyn DocumentStore>, aside: Arc<CacheAside>, ttl: &TtlRegistry) -> Self {
        Self {
            articles: TypedCollection::new(store, COLLECTION)
                .sorted_by(|a, b| super::newest_first(&a.created_at, &b.created_at)),
            aside,
            scope: CacheScope::new(ARTICLES_KEY, ARTICLE_PREFIX, ttl.ttl(EntityKind::Articles)),
        }
    }

    /// All articles, newest first.
    pub async fn list(&self) -> Result<Vec<Article>> {
        self.aside.get_collection(&self.scope, &self.articles).await
    }

    pub async fn get(&self, id: &str) -> Result<Option<Article>> {
        self.aside.get_item(&self.scope, id, &self.articles).await
    }

    pub async fn create(&self, request: CreateArticleRequest) -> Result<Article> {
        let article = request.into_article()?;
        self.aside
            .create_item(&self.scope, article, &self.articles)
            .await
    }

    /// Applies a partial update. Returns `None` if the article does not exist.
    pub async fn update(&self, id: &str, request: UpdateArticleRequest) -> Result<Option<Article>> {
        self.aside
            .modify_item(&self.scope, id, &self.articles, |article: &mut Article| {
                request.apply_to(article).map_err(Into::into)
            })
            .await
    }

    /// Returns `false` if the article does not exist.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        if self.get(id).await?.is_none() {
            return Ok(false);
        }

        self.aside
            .delete_item::<Article, _>(&self.scope, id, &self.articles)
            .await
    }

    /// Increments the view counter of an article.
    ///
    /// Serialized per article within this process, so concurrent views are
    /// all counted.
    pub async fn record_view(&self, id: &str) -> Result<Option<Article>> {
        let article = self
            .aside
            .modify_item(&self.scope, id, &self.articles, |article: &mut Article| {
                article.view_count += 1;
                Ok(())
            })
            .await?;

        if let Some(ref article) = article {
            tracing::debug!(%id, views = article.view_count, "Recorded article view");
        }
        Ok(article)
    }
}
