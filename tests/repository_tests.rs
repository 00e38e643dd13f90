//! Integration tests for the async repository boundary over the in-memory
//! backend: CRUD, validated saves, specification finders and paged reads.

mod harness;

use anyhow::Result;
use harness::*;
use sift::prelude::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

#[tokio::test]
async fn crud_round_trip() -> Result<()> {
    init_tracing();
    let repo = InMemoryRepository::new();

    let alice = customer("Alice", 30, "Lisbon", Tier::Premium);
    repo.save(alice.clone()).await?;
    assert_eq!(repo.count().await?, 1);

    let found = repo.find_by_id(&alice.id).await?;
    assert_eq!(found.as_ref().map(|c| c.name.as_str()), Some("Alice"));

    repo.remove(&alice.id).await?;
    assert_eq!(repo.count().await?, 0);
    assert!(repo.find_by_id(&alice.id).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn save_validated_rejects_invalid_entities() -> Result<()> {
    let repo = InMemoryRepository::new();

    let mut bad = customer("Alice", 30, "Lisbon", Tier::Premium);
    bad.email = "not-an-email".to_string();

    let err = repo.save_validated(bad).await.unwrap_err();
    assert!(matches!(err, SiftError::Validation(_)));
    assert_eq!(repo.count().await?, 0);

    repo.save_validated(customer("Alice", 30, "Lisbon", Tier::Premium))
        .await?;
    assert_eq!(repo.count().await?, 1);

    Ok(())
}

#[tokio::test]
async fn specification_finders() -> Result<()> {
    let repo = InMemoryRepository::new();
    for entity in seed() {
        repo.save(entity).await?;
    }

    let premium = Specification::<Customer>::parse("tier", "eq", "Premium")?;
    let found = repo.find_where(&premium).await?.materialize();
    assert_eq!(found.len(), 3);

    let by_name = Specification::<Customer>::parse("name", "eq", "Carol")?;
    let carol = repo.find_one(&by_name).await?;
    assert_eq!(carol.map(|c| c.age), Some(42));

    let nobody = Specification::<Customer>::parse("name", "eq", "Zed")?;
    assert!(repo.find_one(&nobody).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn paged_read_with_configured_page_length() -> Result<()> {
    init_tracing();
    let repo = InMemoryRepository::new();
    for entity in seed() {
        repo.save(entity).await?;
    }

    let config = SiftConfig::from_yaml_str("paging:\n  default_page_length: 4\n")?;
    let page = config
        .paging
        .page_request(0, None)
        .with_sorter("age DESC, name");

    let filter = Specification::<Customer>::parse("address.city", "ne", "Faro")?;
    let result = read_page(repo.query().await?, Some(&filter), Some(&page))?;

    let names: Vec<&str> = result.records.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Carol", "Alice", "Frank", "Erin"]);
    assert_eq!(result.total_records, 5);
    assert_eq!(result.page_size, 4);

    let meta = result.meta();
    assert_eq!(meta.total_pages, 2);
    assert!(meta.has_next);
    assert!(!meta.has_prev);

    Ok(())
}

#[tokio::test]
async fn repository_clones_share_state_across_tasks() -> Result<()> {
    let repo = InMemoryRepository::new();

    let mut handles = Vec::new();
    for entity in seed() {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move { repo.save(entity).await }));
    }
    for handle in handles {
        handle.await??;
    }

    assert_eq!(repo.count().await?, 6);
    Ok(())
}

#[tokio::test]
async fn deferred_query_sees_later_writes() -> Result<()> {
    let repo = InMemoryRepository::new();
    let query = repo.query().await?;

    // the plan holds no rows yet; the write below lands before enumeration
    repo.save(customer("Late", 50, "Braga", Tier::Standard))
        .await?;

    assert_eq!(query.count(), 1);
    Ok(())
}
