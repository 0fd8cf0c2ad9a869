//! End-to-end flows through the assembled application

use std::path::PathBuf;
use std::sync::Arc;

use api::{App, AppParts, build_app};
use auth::{AuthConfig, MemoryUserRepository};
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use blog::domain::repository::PostRepository;
use blog::{BlogConfig, MemoryPostRepository};
use platform::mail::OutboxMailer;
use platform::view::Views;
use tower::ServiceExt;

struct TestApp {
    app: App,
    posts: MemoryPostRepository,
    outbox: OutboxMailer,
}

fn crate_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(name)
}

fn test_app() -> TestApp {
    let views = Views::from_glob(&format!("{}/**/*.html", crate_path("templates").display()))
        .expect("templates load");
    let posts = MemoryPostRepository::new();
    let outbox = OutboxMailer::new();

    let app = build_app(AppParts {
        users: MemoryUserRepository::new(),
        posts: posts.clone(),
        mailer: outbox.clone(),
        auth: AuthConfig::development(),
        blog: BlogConfig::default(),
        views: Arc::new(views),
        static_dir: crate_path("static"),
    });

    TestApp { app, posts, outbox }
}

impl TestApp {
    async fn send(&self, request: Request<Body>) -> Response {
        self.app.clone().oneshot(request).await.unwrap()
    }

    async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::get(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    async fn post_form(&self, uri: &str, body: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// Register, follow the mailed link, log in; returns the `Cookie` header value
    async fn sign_up(&self, username: &str, email: &str, password: &str) -> String {
        let registered = self
            .post_form(
                "/register",
                &format!("username={username}&email={email}&password={password}"),
                None,
            )
            .await;
        assert_eq!(registered.status(), StatusCode::CREATED);

        let mail = self
            .outbox
            .sent()
            .await
            .into_iter()
            .rev()
            .find(|mail| mail.to == email)
            .expect("verification mail sent");
        let start = mail.text.find("/verify-email").expect("link in mail");
        let path = mail.text[start..].trim().to_string();

        let verified = self.get(&path, None).await;
        assert_eq!(verified.status(), StatusCode::OK);
        assert!(body_string(verified).await.contains("Email verified"));

        let login = self
            .post_form(
                "/admin",
                &format!("username={username}&password={password}"),
                None,
            )
            .await;
        assert_eq!(login.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&login), "/admin/dashboard");

        let set_cookie = login.headers()[header::SET_COOKIE].to_str().unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }
}

async fn body_string(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

#[tokio::test]
async fn dashboard_shows_only_the_callers_posts() {
    let t = test_app();
    let alice = t.sign_up("alice", "alice@example.com", "p").await;
    let bob = t.sign_up("bob", "bob@example.com", "q").await;

    let created = t
        .post_form(
            "/admin/add-post",
            "title=Alpha&author=Alice&body=First&publish=on",
            Some(&alice),
        )
        .await;
    assert_eq!(created.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&created), "/admin/dashboard");

    t.post_form("/admin/add-post", "title=Bravo&author=Bob&body=Second", Some(&bob))
        .await;

    let dashboard = t.get("/admin/dashboard", Some(&alice)).await;
    assert_eq!(dashboard.status(), StatusCode::OK);
    let html = body_string(dashboard).await;
    assert!(html.contains("Hello, alice"));
    assert!(html.contains("Alpha"));
    assert!(!html.contains("Bravo"));

    // The public index lists everyone's posts
    let index = body_string(t.get("/", None).await).await;
    assert!(index.contains("Alpha"));
    assert!(index.contains("Bravo"));
}

#[tokio::test]
async fn admin_routes_require_a_verified_session() {
    let t = test_app();

    let anonymous = t.get("/admin/dashboard", None).await;
    assert_eq!(anonymous.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&anonymous), "/admin/unauth");

    let forged = t.get("/admin/dashboard", Some("token=forged.0.sig")).await;
    assert_eq!(location(&forged), "/admin/unauth");

    // Registered but never verified
    t.post_form(
        "/register",
        "username=carol&email=carol@example.com&password=p",
        None,
    )
    .await;
    let login = t
        .post_form("/admin", "username=carol&password=p", None)
        .await;
    assert_eq!(location(&login), "/admin/unauth");
    assert!(login.headers().get(header::SET_COOKIE).is_none());

    let unauth = t.get("/admin/unauth", None).await;
    assert_eq!(unauth.status(), StatusCode::OK);
}

#[tokio::test]
async fn logout_clears_the_cookie() {
    let t = test_app();
    t.sign_up("alice", "alice@example.com", "p").await;

    let logout = t.get("/admin/logout", None).await;
    assert_eq!(location(&logout), "/admin");
    let cleared = logout.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cleared.starts_with("token="));
    assert!(cleared.contains("Max-Age=0"));
}

#[tokio::test]
async fn public_forms_use_method_override() {
    let t = test_app();

    let created = t
        .post_form(
            "/add-post",
            "title=Hello&author=Ann&body=Text&userId=someone",
            None,
        )
        .await;
    assert_eq!(location(&created), "/");

    let post = t.posts.list_all().await.unwrap().pop().unwrap();
    assert_eq!(post.owner.as_ref().unwrap().as_str(), "someone");
    assert!(!post.is_public);
    let id = post.post_id;

    let edited = t
        .post_form(
            &format!("/edit-post/{id}?_method=PUT"),
            "title=Changed&author=Ann&body=Text",
            None,
        )
        .await;
    assert_eq!(location(&edited), format!("/post/{id}"));

    let page = body_string(t.get(&format!("/post/{id}"), None).await).await;
    assert!(page.contains("Changed"));

    let deleted = t
        .post_form(&format!("/delete-post/{id}?_method=DELETE"), "", None)
        .await;
    assert_eq!(location(&deleted), "/");
    assert!(t.posts.is_empty().await);
}

#[tokio::test]
async fn unknown_paths_and_missing_posts_render_not_found() {
    let t = test_app();

    let unknown = t.get("/no/such/page", None).await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    assert!(body_string(unknown).await.contains("Page not found"));

    let missing = t.get("/post/not-an-id", None).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert!(body_string(missing).await.contains("Post not found"));
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let t = test_app();
    let body = "username=alice&email=alice@example.com&password=p";

    assert_eq!(
        t.post_form("/register", body, None).await.status(),
        StatusCode::CREATED
    );

    let duplicate = t.post_form("/register", body, None).await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);
    let json: serde_json::Value = serde_json::from_str(&body_string(duplicate).await).unwrap();
    assert_eq!(json["status"], 409);
}

#[tokio::test]
async fn static_files_are_served() {
    let t = test_app();
    let css = t.get("/static/css/style.css", None).await;
    assert_eq!(css.status(), StatusCode::OK);
}
