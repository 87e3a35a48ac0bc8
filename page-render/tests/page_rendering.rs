//! Integration tests for page rendering through axum handlers
//!
//! Drives the renderer with real requests and checks status, body and cache
//! state.

use axum::{
    extract::{Request, State},
    response::Response,
    routing::get,
    Router,
};
use http::StatusCode;
use page_render::prelude::*;
use std::fs;
use tower::ServiceExt;

/// Helper to create a test app over the given state
fn test_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/second", get(home_again))
        .route("/contact", get(contact))
        .with_state(state)
}

fn production_state() -> AppState {
    let mut config = PageRenderConfig::default();
    config.templates.cache = Some(CacheMode::Enabled);
    config.assets.api = "api.example.test".to_string();
    config.assets.css_version = "5".to_string();
    AppState::from_config(config)
}

// Test handlers

async fn home(State(renderer): State<Renderer>, request: Request) -> Response {
    let (parts, _body) = request.into_parts();
    let data = TemplateData::new().with_flash("Welcome");
    renderer.render_html(&parts, "home", Some(data), &[])
}

async fn home_again(State(renderer): State<Renderer>, request: Request) -> Response {
    let (parts, _body) = request.into_parts();
    let data = TemplateData::new().with_flash("Back again");
    renderer.render_html(&parts, "home", Some(data), &[])
}

async fn contact(State(renderer): State<Renderer>, request: Request) -> Response {
    let (parts, _body) = request.into_parts();
    renderer.render_html(&parts, "contact", None, &["nav", "footer"])
}

async fn get_page(app: Router, request: http::Request<axum::body::Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn request_to(uri: &str) -> http::Request<axum::body::Body> {
    http::Request::builder()
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_home_page_renders_and_caches() {
    let state = production_state();
    let app = test_app(state.clone());

    let (status, body) = get_page(app.clone(), request_to("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<h1>Home</h1>"));
    assert!(body.contains("Welcome"));
    assert!(body.contains("styles.css?v=5"));
    assert!(body.contains("api.example.test"));
    assert_eq!(
        state.renderer().cache().identifiers(),
        vec!["templates/home.page.tmpl".to_string()]
    );
    assert_eq!(state.renderer().compile_count(), 1);

    let (status, body) = get_page(app, request_to("/second")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Back again"));
    assert!(!body.contains("Welcome"));
    assert_eq!(state.renderer().compile_count(), 1);
}

#[tokio::test]
async fn test_session_snapshot_reaches_template() {
    let state = production_state();
    let app = test_app(state);

    let mut request = request_to("/contact");
    request.extensions_mut().insert(SessionSnapshot {
        csrf_token: "tok-123".to_string(),
        flash: "Message sent".to_string(),
        is_authenticated: true,
        ..SessionSnapshot::default()
    });

    let (status, body) = get_page(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"value="tok-123""#));
    assert!(body.contains("Message sent"));
    assert!(body.contains(r#"href="/logout""#));
    assert!(!body.contains(r#"href="/login""#));
    assert!(body.contains("Powered by page-render"));
}

#[tokio::test]
async fn test_anonymous_contact_page() {
    let app = test_app(production_state());

    let (status, body) = get_page(app, request_to("/contact")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"href="/login""#));
    assert!(body.contains(r#"value="""#));
}

#[tokio::test]
async fn test_missing_partial_returns_server_error() {
    let store = MemoryStore::new()
        .with(
            "templates/base.layout.tmpl",
            "<main>{% block content %}{% endblock %}</main>",
        )
        .with("templates/nav.partial.tmpl", "<nav></nav>")
        .with(
            "templates/contact.page.tmpl",
            "{% extends \"templates/base.layout.tmpl\" %}\
             {% block content %}{% include \"templates/nav.partial.tmpl\" %}\
             {% include \"templates/footer.partial.tmpl\" %}{% endblock %}",
        );
    let renderer = Renderer::builder(store).build();
    let state = AppState::with_renderer(PageRenderConfig::default(), renderer);
    let app = test_app(state.clone());

    let (status, body) = get_page(app, request_to("/contact")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Template rendering failed");
    assert!(state.renderer().cache().is_empty());
    assert_eq!(state.renderer().compile_count(), 1);
}

#[tokio::test]
async fn test_disabled_cache_picks_up_template_edits() {
    let dir = tempfile::tempdir().unwrap();
    let templates = dir.path().join("templates");
    fs::create_dir_all(&templates).unwrap();
    fs::write(
        templates.join("base.layout.tmpl"),
        "{% block content %}{% endblock %}",
    )
    .unwrap();
    let page = templates.join("home.page.tmpl");
    fs::write(
        &page,
        "{% extends \"templates/base.layout.tmpl\" %}{% block content %}v1 {{ flash }}{% endblock %}",
    )
    .unwrap();

    let mut config = PageRenderConfig::default();
    config.templates.cache = Some(CacheMode::Disabled);
    config.templates.template_dir = Some(dir.path().to_path_buf());
    let state = AppState::from_config(config);
    let app = test_app(state.clone());

    let (status, body) = get_page(app.clone(), request_to("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "v1 Welcome");

    fs::write(
        &page,
        "{% extends \"templates/base.layout.tmpl\" %}{% block content %}v2 {{ flash }}{% endblock %}",
    )
    .unwrap();

    let (status, body) = get_page(app, request_to("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "v2 Welcome");
    assert_eq!(state.renderer().compile_count(), 2);
}
