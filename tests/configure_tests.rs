//! Process-wide configuration behavior
//!
//! `configure` mutates state shared by the whole process, so everything
//! here runs inside a single test function, in its own binary, to keep it
//! away from the suites that rely on the default configuration.

use axum::http::StatusCode;
use axum_test::TestServer;
use rest_list::prelude::*;
use std::sync::Arc;

#[tokio::test]
async fn test_configure_replaces_config_and_rebinds_capability_lookup() {
    // Replacement is wholesale, not merged.
    configure(GlobalConfig {
        warn_missing_searchable: false,
        searchable_capability: "text_fields".to_string(),
    });
    let current = global_config();
    assert!(!current.warn_missing_searchable);
    assert_eq!(current.searchable_capability, "text_fields");
    configure(GlobalConfig::default());
    assert_eq!(global_config(), GlobalConfig::default());

    // A model declaring its fields under a custom capability name.
    let model = InMemoryModel::new("articles")
        .with_capability("text_fields", &["title"])
        .with_records(vec![
            json!({ "_id": 1, "title": "lorem ipsum" }),
            json!({ "_id": 2, "title": "dolor sit" }),
        ]);

    // Registered while the default capability name is in effect.
    let router = register_list_route(
        Router::new(),
        Arc::new(model),
        "/articles",
        vec![],
        RouteOverrides::default(),
    )
    .unwrap();
    let server = TestServer::new(router);

    // Under the default name the model has no searchable fields, so the
    // filter falls back to the (empty) default conditions.
    let before: Value = server
        .get("/articles")
        .add_query_param("filter", "lorem")
        .await
        .json();
    assert_eq!(before["totalResults"], 2);

    // The capability name is read per request: reconfiguring changes the
    // behavior of the already-registered route.
    configure(GlobalConfig {
        warn_missing_searchable: true,
        searchable_capability: "text_fields".to_string(),
    });

    let after = server
        .get("/articles")
        .add_query_param("filter", "lorem")
        .await;
    after.assert_status(StatusCode::OK);
    let after: Value = after.json();
    assert_eq!(after["totalResults"], 1);
    assert_eq!(after["results"][0]["_id"], 1);

    configure(GlobalConfig::default());
}
