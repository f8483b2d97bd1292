use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;
use crate::page::{Page, PageOutcome, StoryRequest};
use crate::server::AppState;
use std::sync::Arc;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl ToString) -> ApiError {
    (status, Json(ErrorResponse { error: error.to_string() }))
}

/// Story request from the request target; the first `story` value wins
fn parse_request(uri: &Uri) -> Result<StoryRequest, ApiError> {
    StoryRequest::from_url(&uri.to_string()).map_err(|e| api_error(StatusCode::BAD_REQUEST, e))
}

/// `GET /?story=<id>` and `GET /story/{id}`
pub async fn story_page(State(state): State<Arc<AppState>>, uri: Uri) -> Result<Response, ApiError> {
    let request = parse_request(&uri)?;
    tracing::debug!("Story page requested: {:?}", request.story);

    Ok(match state.pages.build(&request).await {
        PageOutcome::Render(page) => Html(page.to_html()).into_response(),
        PageOutcome::Redirect(to) => Redirect::to(&to).into_response(),
    })
}

/// `GET /api/page?story=<id>` - the page model as JSON
pub async fn page_json(State(state): State<Arc<AppState>>, uri: Uri) -> Result<Json<Page>, ApiError> {
    let request = parse_request(&uri)?;

    match state.pages.build(&request).await {
        PageOutcome::Render(page) => Ok(Json(page)),
        PageOutcome::Redirect(_) => {
            let id = request.story.map(|id| id.to_string()).unwrap_or_default();
            Err(api_error(StatusCode::NOT_FOUND, crate::Error::StoryNotFound(id)))
        }
    }
}

pub async fn healthz() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::StorageResolver;
    use crate::page::{MissingStoryPolicy, PageBuilder, RenderOptions};
    use crate::server::router;
    use crate::storage::SqliteStore;
    use crate::story::{Chapter, Story};
    use axum::{body::Body, http::{header, Request}, Router};
    use tower::ServiceExt;

    fn app(options: RenderOptions) -> (Router, tempfile::TempDir) {
        app_with(&[("id-a", "A", 1), ("id-b", "B", 2), ("id-c", "C", 3)], options)
    }

    fn app_with(stories: &[(&str, &str, i64)], options: RenderOptions) -> (Router, tempfile::TempDir) {
        let store = SqliteStore::open_in_memory().unwrap();
        for &(id, title, created_at) in stories {
            let story = Story::new(id, title, created_at, vec![
                Chapter::new("Opening", "It began.\n\nThen it went on.", "gs://bucket/open.png"),
                Chapter::new("Ending", "It ended.", "gs://bucket/end.png"),
            ]);
            store.insert_story(&options.collection, &story).unwrap();
        }

        let assets = tempfile::tempdir().unwrap();
        std::fs::write(assets.path().join("style.css"), "body {}").unwrap();

        let state = Arc::new(AppState {
            pages: PageBuilder::new(Arc::new(store), Arc::new(StorageResolver::default()), options),
        });
        (router(state, assets.path()), assets)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_middle_story_page() {
        let (app, _assets) = app(RenderOptions::default());
        let (status, _, html) = get(app, "/?story=id-b").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains(r#"<h1 id="title">B</h1>"#));
        assert!(html.contains("<title>B — Short Stories</title>"));
        assert!(html.contains(r#"<div id="prev" style="display: block"><a href="/?story=id-a">← A</a></div>"#));
        assert!(html.contains(r#"<div id="next" style="display: block"><a href="/?story=id-c">C →</a></div>"#));
        assert!(html.contains("It began.<br><br>Then it went on."));
        assert_eq!(html.matches("<details open>").count(), 1);
        assert_eq!(html.matches("<details>").count(), 1);
    }

    #[tokio::test]
    async fn test_path_form_and_latest() {
        let (app, _assets) = app(RenderOptions::default());
        let (_, _, html) = get(app.clone(), "/story/id-c").await;
        assert!(html.contains(r#"<h1 id="title">C</h1>"#));
        assert!(html.contains(r#"<div id="next" hidden style="display: none">"#));

        let (_, _, html) = get(app, "/").await;
        assert!(html.contains(r#"<h1 id="title">C</h1>"#));
        assert!(html.contains(r#"<a href="/?story=id-b">← B</a>"#));
        assert!(html.contains(r#"<div id="next" hidden style="display: none">"#));
    }

    #[tokio::test]
    async fn test_unknown_story_redirects_home() {
        let (app, _assets) = app(RenderOptions::default());
        let (status, headers, _) = get(app, "/?story=missing").await;

        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(headers.get(header::LOCATION).unwrap(), "/");
    }

    #[tokio::test]
    async fn test_root_on_empty_store_renders_shell() {
        let (app, _assets) = app_with(&[], RenderOptions::default());
        let (status, headers, html) = get(app, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(headers.get(header::LOCATION).is_none());
        assert!(html.contains(r#"<h1 id="title"></h1>"#));
    }

    #[tokio::test]
    async fn test_repeated_story_parameter_uses_first() {
        let (app, _assets) = app(RenderOptions::default());
        let (status, _, html) = get(app.clone(), "/?story=id-a&story=id-b").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains(r#"<h1 id="title">A</h1>"#));

        let (status, _, body) = get(app, "/api/page?story=id-c&story=id-a").await;
        assert_eq!(status, StatusCode::OK);
        let page: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(page["title"], "C");
    }

    #[tokio::test]
    async fn test_unknown_story_blank_policy() {
        let options = RenderOptions {
            missing_story: MissingStoryPolicy::Blank,
            ..RenderOptions::default()
        };
        let (app, _assets) = app(options);
        let (status, _, html) = get(app, "/story/missing").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains(r#"<h1 id="title"></h1>"#));
        assert!(html.contains(r#"<div class="chapters"></div>"#));
    }

    #[tokio::test]
    async fn test_page_json() {
        let (app, _assets) = app(RenderOptions::default());
        let (status, _, body) = get(app.clone(), "/api/page?story=id-a").await;
        assert_eq!(status, StatusCode::OK);

        let page: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(page["title"], "A");
        assert_eq!(page["prev"]["visible"], false);
        assert_eq!(page["next"]["href"], "/?story=id-b");
        assert_eq!(page["chapters"].as_array().unwrap().len(), 2);

        let (status, _, _) = get(app, "/api/page?story=missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_static_fallback_and_health() {
        let (app, _assets) = app(RenderOptions::default());
        let (status, _, body) = get(app.clone(), "/style.css").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "body {}");

        let (_, _, body) = get(app, "/healthz").await;
        assert_eq!(body, "ok");
    }
}
