use anyhow::Result;
use gradebook_loader::{LoaderError, RequestDispatcher};
use httpmock::prelude::*;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq)]
struct Item {
    id: u64,
}

fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[tokio::test]
async fn depaginated_get_follows_next_links() -> Result<()> {
    let server = MockServer::start();

    let page1 = server.mock(|when, then| {
        when.method(GET).path("/items").query_param("kind", "widget");
        then.status(200)
            .header("Link", format!("<{}>; rel=\"next\"", server.url("/items?cursor=2")))
            .json_body(serde_json::json!([{"id": 1}, {"id": 2}]));
    });
    let page2 = server.mock(|when, then| {
        when.method(GET).path("/items").query_param("cursor", "2");
        then.status(200)
            .header(
                "Link",
                format!(
                    "<{}>; rel=\"prev\", <{}>; rel=\"next\"",
                    server.url("/items?cursor=1"),
                    server.url("/items?cursor=3")
                ),
            )
            .json_body(serde_json::json!([{"id": 3}, {"id": 4}]));
    });
    let page3 = server.mock(|when, then| {
        when.method(GET).path("/items").query_param("cursor", "3");
        then.status(200).json_body(serde_json::json!([{"id": 5}]));
    });

    let dispatch = RequestDispatcher::new(&server.base_url(), 2)?;
    let items: Vec<Item> = dispatch
        .get_depaginated("/items", &params(&[("kind", "widget")]))
        .await?;

    assert_eq!(
        items,
        [1, 2, 3, 4, 5].map(|id| Item { id }).to_vec()
    );
    page1.assert();
    page2.assert();
    page3.assert();

    Ok(())
}

#[tokio::test]
async fn get_pages_preserves_page_boundaries() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/items").query_param("kind", "widget");
        then.status(200)
            .header("Link", format!("<{}>; rel=\"next\"", server.url("/items?cursor=2")))
            .json_body(serde_json::json!([{"id": 1}, {"id": 2}]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/items").query_param("cursor", "2");
        then.status(200).json_body(serde_json::json!([{"id": 3}]));
    });

    let dispatch = RequestDispatcher::new(&server.base_url(), 2)?;
    let pages: Vec<Vec<Item>> = dispatch
        .get_pages("/items", &params(&[("kind", "widget")]))
        .await?;

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].len(), 2);
    assert_eq!(pages[1].len(), 1);

    Ok(())
}

#[tokio::test]
async fn single_page_without_link_header_is_one_fetch() -> Result<()> {
    let server = MockServer::start();

    let only_page = server.mock(|when, then| {
        when.method(GET).path("/items");
        then.status(200).json_body(serde_json::json!([{"id": 9}]));
    });

    let dispatch = RequestDispatcher::new(&server.base_url(), 2)?;
    let items: Vec<Item> = dispatch.get_depaginated("/items", &[]).await?;

    assert_eq!(items, vec![Item { id: 9 }]);
    only_page.assert();

    Ok(())
}

#[tokio::test]
async fn non_success_status_is_an_error() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/items");
        then.status(404);
    });

    let dispatch = RequestDispatcher::new(&server.base_url(), 2)?;
    let result: gradebook_loader::Result<Vec<Item>> = dispatch.get_depaginated("/items", &[]).await;

    match result {
        Err(LoaderError::StatusError { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected status error, got {:?}", other.map(|v| v.len())),
    }

    Ok(())
}

#[tokio::test]
async fn get_json_decodes_single_objects() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/item");
        then.status(200).json_body(serde_json::json!({"id": 7}));
    });

    let dispatch = RequestDispatcher::new(&server.base_url(), 2)?;
    let item: Item = dispatch.get_json("/item", &[]).await?;
    assert_eq!(item, Item { id: 7 });

    Ok(())
}
