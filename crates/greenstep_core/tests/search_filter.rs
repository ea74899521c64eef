use greenstep_core::{
    count_label, filter_trees, matches_query, CatalogState, CatalogView, FixtureTreeRepository,
    TreeRepository,
};

fn fixture() -> Vec<greenstep_core::TreeRecord> {
    FixtureTreeRepository::new().list_trees()
}

fn ready_view(query: &str) -> CatalogView {
    let mut view = CatalogView::new();
    let ticket = view.begin_load().unwrap();
    assert!(view.complete(ticket, Ok(fixture())));
    view.set_query(query);
    view
}

#[test]
fn oak_matches_exactly_one_tree() {
    let trees = fixture();
    let hits = filter_trees(&trees, "oak");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].common_name, "Oak Tree");
}

#[test]
fn planted_date_is_not_searched() {
    let trees = fixture();
    assert!(filter_trees(&trees, "2023-03").is_empty());
}

#[test]
fn grove_matches_both_grove_locations() {
    let view = ready_view("grove");
    let ids: Vec<_> = view
        .state()
        .visible_trees()
        .iter()
        .map(|tree| tree.id.as_str().to_string())
        .collect();
    assert_eq!(ids, vec!["tree-003", "tree-006"]);
    assert_eq!(view.state().count_label().as_deref(), Some("2 trees found"));
}

#[test]
fn single_match_uses_singular_label() {
    let view = ready_view("MAPLE");
    assert_eq!(view.state().count_label().as_deref(), Some("1 tree found"));
}

#[test]
fn zero_matches_use_plural_label() {
    let view = ready_view("baobab");
    assert_eq!(view.state().count_label().as_deref(), Some("0 trees found"));
    assert_eq!(count_label(0), "0 trees found");
}

#[test]
fn empty_query_shows_every_record_without_label() {
    let view = ready_view("");
    assert_eq!(view.state().visible_trees().len(), 6);
    assert_eq!(view.state().count_label(), None);
}

#[test]
fn filtered_set_is_exactly_the_matching_subset() {
    let trees = fixture();
    for query in ["", "a", "TREE", "pinus", "section", "east", "zzz", " ", "Grove Plot"] {
        let hits = filter_trees(&trees, query);
        let expected: Vec<_> = trees
            .iter()
            .filter(|tree| {
                let q = query.to_lowercase();
                tree.common_name.to_lowercase().contains(&q)
                    || tree.scientific_name.to_lowercase().contains(&q)
                    || tree.location.to_lowercase().contains(&q)
            })
            .collect();
        assert_eq!(hits, expected, "query `{query}`");
        for tree in &trees {
            assert_eq!(
                matches_query(tree, query),
                expected.contains(&tree),
                "query `{query}` on {}",
                tree.id
            );
        }
    }
}

#[test]
fn query_change_never_touches_loaded_records() {
    let mut view = ready_view("");
    let before: CatalogState = view.state().clone();
    view.set_query("oak");
    view.set_query("nothing matches this");
    assert_eq!(view.state().records(), before.records());
    assert_eq!(view.state().status(), before.status());
}
