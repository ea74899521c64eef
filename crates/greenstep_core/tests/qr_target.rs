use greenstep_core::{derive_qr_target, tree_id_from_deep_link, CatalogConfig};
use url::Url;

fn data_param(image_url: &str) -> String {
    let url = Url::parse(image_url).unwrap();
    url.query_pairs()
        .find(|(key, _)| key == "data")
        .map(|(_, value)| value.into_owned())
        .unwrap()
}

#[test]
fn derivation_is_idempotent() {
    let config = CatalogConfig::default();
    assert_eq!(
        derive_qr_target(&config, "tree-005"),
        derive_qr_target(&config, "tree-005")
    );
}

#[test]
fn encoded_deep_link_round_trips_to_original_id() {
    let config = CatalogConfig::default();
    for id in [
        "tree-001",
        "tree-006",
        "oak & ash",
        "späť/100%",
        "a?b=c#d",
        "",
    ] {
        let target = derive_qr_target(&config, id);
        let decoded = data_param(&target.image_url);
        assert_eq!(decoded, target.deep_link, "id `{id}`");
        assert_eq!(tree_id_from_deep_link(&config, &decoded), Some(id));
    }
}

#[test]
fn renderer_parameters_follow_config() {
    let config = CatalogConfig::from_json_str(
        r#"{
            "appOrigin": "https://trees.example.org",
            "qrEndpoint": "https://qr.example.org/render",
            "qrSize": "320x320",
            "qrBackground": "ffffff",
            "qrForeground": "000000"
        }"#,
    )
    .unwrap();

    let target = derive_qr_target(&config, "tree-002");
    assert_eq!(target.deep_link, "https://trees.example.org/tree/tree-002");
    assert!(target
        .image_url
        .starts_with("https://qr.example.org/render?size=320x320&data="));
    assert!(target.image_url.ends_with("&bgcolor=ffffff&color=000000"));
    assert_eq!(target.display_link(), "trees.example.org/tree/tree-002");
}
