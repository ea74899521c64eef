use greenstep_core::{
    CatalogConfig, CatalogError, CatalogService, FixtureTreeRepository, InstantClock, RepoError,
    ScriptedEntropy, TokioClock, TreeId, TreeRepository,
};
use std::time::Duration;

fn service_with(
    repo: FixtureTreeRepository,
    samples: &[f64],
) -> CatalogService<FixtureTreeRepository, InstantClock, ScriptedEntropy> {
    CatalogService::new(
        repo,
        InstantClock::new(),
        ScriptedEntropy::new(samples.iter().copied()),
        CatalogConfig::default(),
    )
}

#[tokio::test]
async fn list_returns_six_fixture_trees_in_order() {
    let service = service_with(FixtureTreeRepository::new(), &[0.5]);
    let trees = service.list_trees().await.unwrap();
    let ids: Vec<_> = trees.iter().map(|tree| tree.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["tree-001", "tree-002", "tree-003", "tree-004", "tree-005", "tree-006"]
    );
}

#[tokio::test]
async fn list_results_are_defensive_copies() {
    let service = service_with(FixtureTreeRepository::new(), &[0.5]);
    let mut first = service.list_trees().await.unwrap();
    first[1].benefits.clear();
    first.truncate(1);

    let second = service.list_trees().await.unwrap();
    assert_eq!(second.len(), 6);
    assert_eq!(second[1].benefits.len(), 4);
}

#[tokio::test]
async fn every_list_call_draws_failure_independently() {
    let service = service_with(FixtureTreeRepository::new(), &[0.9, 0.001, 0.9]);
    assert!(service.list_trees().await.is_ok());
    assert!(matches!(
        service.list_trees().await,
        Err(CatalogError::ServiceUnavailable { .. })
    ));
    assert!(service.list_trees().await.is_ok());
}

#[tokio::test]
async fn fetch_unknown_id_is_not_found_not_error() {
    let service = service_with(FixtureTreeRepository::new(), &[0.0]);
    assert_eq!(service.fetch_tree("tree-007").await, None);
    assert_eq!(service.fetch_tree("").await, None);
}

#[tokio::test]
async fn fetch_known_id_returns_full_record() {
    let service = service_with(FixtureTreeRepository::new(), &[0.0]);
    let birch = service.fetch_tree("tree-005").await.unwrap();
    assert_eq!(birch.common_name, "Birch Tree");
    assert_eq!(birch.age, 0);
    assert_eq!(
        birch.maintenance_notes(),
        Some("Recently planted. Monitor soil moisture levels.")
    );
}

#[tokio::test]
async fn zero_failure_rate_never_fails() {
    let mut config = CatalogConfig::default();
    config.failure_rate = 0.0;
    let service = CatalogService::new(
        FixtureTreeRepository::new(),
        InstantClock::new(),
        ScriptedEntropy::constant(0.0),
        config,
    );
    for _ in 0..10 {
        assert!(service.list_trees().await.is_ok());
    }
}

#[tokio::test(start_paused = true)]
async fn tokio_clock_waits_for_configured_latency() {
    let service = CatalogService::new(
        FixtureTreeRepository::new(),
        TokioClock,
        ScriptedEntropy::constant(0.9),
        CatalogConfig::default(),
    );
    let started = tokio::time::Instant::now();
    service.list_trees().await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(800));

    let started = tokio::time::Instant::now();
    service.fetch_tree("tree-001").await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(300));
    assert!(started.elapsed() < Duration::from_millis(800));
}

#[test]
fn custom_repository_rejects_duplicate_ids() {
    let mut records = FixtureTreeRepository::new().list_trees();
    let mut copy = records[0].clone();
    copy.common_name = "Second Oak".to_string();
    records.push(copy);

    let err = FixtureTreeRepository::with_records(records).unwrap_err();
    assert_eq!(err, RepoError::DuplicateId(TreeId::new("tree-001")));
}

#[test]
fn custom_repository_rejects_invalid_records() {
    let mut records = FixtureTreeRepository::new().list_trees();
    records[2].planted_date = "last spring".to_string();
    let err = FixtureTreeRepository::with_records(records).unwrap_err();
    assert!(matches!(err, RepoError::InvalidRecord(_)));
}

#[tokio::test]
async fn empty_custom_repository_lists_nothing() {
    let repo = FixtureTreeRepository::with_records(Vec::new()).unwrap();
    assert!(repo.is_empty());
    let service = service_with(repo, &[0.5]);
    assert!(service.list_trees().await.unwrap().is_empty());
}
