//! Repository trait: the storage-agnostic boundary for entity persistence
//!
//! Implementations provide CRUD plus a deferred [`Query`] handle; the
//! specification-based finders and validated save are derived. The toolkit is
//! agnostic to the underlying storage mechanism.

use crate::core::entity::Entity;
use crate::core::error::{SiftError, SiftResult};
use crate::core::schema::Queryable;
use crate::core::validation::Validate;
use crate::query::lazy::Query;
use crate::query::specification::Specification;
use async_trait::async_trait;
use uuid::Uuid;

/// Async repository for an entity type.
#[async_trait]
pub trait Repository<T>: Send + Sync
where
    T: Entity + Queryable,
{
    /// Persist an entity (insert or replace by id)
    async fn save(&self, entity: T) -> SiftResult<T>;

    /// Remove an entity by id
    async fn remove(&self, id: &Uuid) -> SiftResult<()>;

    /// Get an entity by id
    async fn find_by_id(&self, id: &Uuid) -> SiftResult<Option<T>>;

    /// Deferred query over all entities; nothing is read until the plan's
    /// terminal operations run
    async fn query(&self) -> SiftResult<Query<T>>;

    /// Count all entities
    async fn count(&self) -> SiftResult<usize> {
        Ok(self.query().await?.count())
    }

    /// Deferred query narrowed by a specification
    async fn find_where(&self, spec: &Specification<T>) -> SiftResult<Query<T>> {
        Ok(self.query().await?.filter(spec.clone()))
    }

    /// First entity satisfying the specification, if any
    async fn find_one(&self, spec: &Specification<T>) -> SiftResult<Option<T>> {
        Ok(self
            .find_where(spec)
            .await?
            .take(1)
            .materialize()
            .into_iter()
            .next())
    }

    /// Validate, then save. Invalid entities are rejected before any write.
    async fn save_validated(&self, entity: T) -> SiftResult<T>
    where
        T: Validate,
    {
        entity.validate().map_err(SiftError::Validation)?;
        self.save(entity).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ValidationError;
    use crate::core::validation::{check, non_blank};
    use crate::queryable;
    use chrono::{DateTime, Utc};
    use std::sync::Mutex;

    #[derive(Clone, Debug)]
    struct Widget {
        id: Uuid,
        name: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        deleted_at: Option<DateTime<Utc>>,
        status: String,
    }

    impl Widget {
        fn new(name: &str) -> Self {
            let now = Utc::now();
            Self {
                id: Uuid::new_v4(),
                name: name.to_string(),
                created_at: now,
                updated_at: now,
                deleted_at: None,
                status: "active".to_string(),
            }
        }
    }

    impl Entity for Widget {
        fn resource_name() -> &'static str {
            "widgets"
        }

        fn resource_name_singular() -> &'static str {
            "widget"
        }

        fn id(&self) -> Uuid {
            self.id
        }

        fn entity_type(&self) -> &str {
            "widget"
        }

        fn created_at(&self) -> DateTime<Utc> {
            self.created_at
        }

        fn updated_at(&self) -> DateTime<Utc> {
            self.updated_at
        }

        fn deleted_at(&self) -> Option<DateTime<Utc>> {
            self.deleted_at
        }

        fn status(&self) -> &str {
            &self.status
        }
    }

    queryable!(Widget, "widget", {
        name: string,
        status: string,
    });

    impl Validate for Widget {
        fn validate(&self) -> Result<(), ValidationError> {
            check([non_blank("name", &self.name)])
        }
    }

    struct StubRepository {
        rows: Mutex<Vec<Widget>>,
    }

    impl StubRepository {
        fn new() -> Self {
            Self {
                rows: Mutex::new(Vec::new()),
            }
        }

        fn snapshot(&self) -> Vec<Widget> {
            self.rows.lock().expect("stub lock").clone()
        }
    }

    #[async_trait]
    impl Repository<Widget> for StubRepository {
        async fn save(&self, entity: Widget) -> SiftResult<Widget> {
            self.rows.lock().expect("stub lock").push(entity.clone());
            Ok(entity)
        }

        async fn remove(&self, id: &Uuid) -> SiftResult<()> {
            self.rows.lock().expect("stub lock").retain(|w| w.id != *id);
            Ok(())
        }

        async fn find_by_id(&self, id: &Uuid) -> SiftResult<Option<Widget>> {
            Ok(self.snapshot().into_iter().find(|w| w.id == *id))
        }

        async fn query(&self) -> SiftResult<Query<Widget>> {
            Ok(Query::from_rows(self.snapshot()))
        }
    }

    #[test]
    fn test_derived_finders() {
        tokio_test::block_on(async {
            let repo = StubRepository::new();
            repo.save(Widget::new("anvil")).await.unwrap();
            repo.save(Widget::new("bolt")).await.unwrap();

            assert_eq!(repo.count().await.unwrap(), 2);

            let spec = Specification::new(|w: &Widget| w.name == "bolt");
            let found = repo.find_one(&spec).await.unwrap();
            assert_eq!(found.map(|w| w.name), Some("bolt".to_string()));

            let matches = repo.find_where(&spec).await.unwrap().materialize();
            assert_eq!(matches.len(), 1);
        });
    }

    #[test]
    fn test_save_validated_rejects_blank_name() {
        tokio_test::block_on(async {
            let repo = StubRepository::new();
            let err = repo.save_validated(Widget::new("  ")).await.unwrap_err();
            assert!(matches!(err, SiftError::Validation(_)));
            assert_eq!(repo.count().await.unwrap(), 0);

            assert!(repo.save_validated(Widget::new("gear")).await.is_ok());
            assert_eq!(repo.count().await.unwrap(), 1);
        });
    }
}
