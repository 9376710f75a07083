use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use reqwest::StatusCode as HttpStatusCode;
use sea_orm::{DatabaseConnection, EntityTrait};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use server::routes;
use server::startup::state_from_parts;
use service::access::token::issue_token;
use service::upload::UploadService;

const SECRET: &str = "test-secret";

struct TestApp {
    base_url: String,
    db: DatabaseConnection,
    admin_token: String,
    reader_token: String,
}

impl TestApp {
    fn url(&self, path: &str) -> String { format!("{}{}", self.base_url, path) }
}

async fn start_server() -> anyhow::Result<TestApp> {
    start_server_with(UploadService::in_memory(&["avatars"], "http://cdn.test")?).await
}

async fn start_server_with(uploads: UploadService) -> anyhow::Result<TestApp> {
    let db = models::db::connect_in_memory().await?;

    let admin = models::user::create(&db, "admin@example.com", "Ada", "Admin").await?;
    for p in ["comment show", "comment edit", "comment create", "comment delete"] {
        models::user_permission::grant(&db, admin.id, p).await?;
    }
    let reader = models::user::create(&db, "reader@example.com", "Rita", "Reader").await?;

    let state = state_from_parts(db.clone(), SECRET.into(), uploads);
    let app: Router = routes::build_router(state, tower_http::cors::CorsLayer::very_permissive());

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    let ttl = Duration::from_secs(600);
    Ok(TestApp {
        base_url: format!("http://{}:{}", addr.ip(), addr.port()),
        db,
        admin_token: issue_token(SECRET, admin.id, ttl)?,
        reader_token: issue_token(SECRET, reader.id, ttl)?,
    })
}

fn client() -> reqwest::Client { reqwest::Client::new() }

async fn add_comment(app: &TestApp, body: Value) -> anyhow::Result<Value> {
    let res = client().post(app.url("/add-comment")).bearer_auth(&app.reader_token).json(&body).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    Ok(res.json::<Value>().await?)
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(app.url("/health")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_protected_without_token_unauthorized() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(app.url("/comments")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "UNAUTHORIZED");
    Ok(())
}

#[tokio::test]
async fn e2e_bad_or_orphan_tokens_unauthorized() -> anyhow::Result<()> {
    let app = start_server().await?;
    let forged = issue_token("other-secret", 1, Duration::from_secs(60))?;
    let orphan = issue_token(SECRET, 9999, Duration::from_secs(60))?;
    for token in ["garbage", forged.as_str(), orphan.as_str()] {
        let res = client().get(app.url("/currencies")).bearer_auth(token).send().await?;
        assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED, "token {token}");
    }
    Ok(())
}

#[tokio::test]
async fn e2e_cookie_token_accepted() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .get(app.url("/currencies"))
        .header("Cookie", format!("auth_token={}", app.reader_token))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn e2e_reader_lacks_moderation_permissions() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(app.url("/comments")).bearer_auth(&app.reader_token).send().await?;
    assert_eq!(res.status(), HttpStatusCode::FORBIDDEN);
    assert_eq!(res.json::<Value>().await?["code"], "PERMISSION_DENIED");

    let res = client().delete(app.url("/comment/1")).bearer_auth(&app.reader_token).send().await?;
    assert_eq!(res.status(), HttpStatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn e2e_add_comment_requires_fields() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .post(app.url("/add-comment"))
        .bearer_auth(&app.reader_token)
        .json(&json!({"modelId": 15, "text": "hello"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "OBJECTNAME_IS_REQUIRED");
    assert_eq!(body["message"], "objectName is required");

    let count = models::comment::Entity::find().all(&app.db).await?.len();
    assert_eq!(count, 0);
    Ok(())
}

#[tokio::test]
async fn e2e_thread_nests_replies_with_capitalized_keys() -> anyhow::Result<()> {
    let app = start_server().await?;
    let root = add_comment(&app, json!({"objectName": "Article", "modelId": 15, "text": "First!"})).await?;
    assert_eq!(root["status"], "SUCCESS");
    assert_eq!(root["item"]["Status"], "APPROVE");
    assert_eq!(root["item"]["ObjectId"], "Article");
    assert_eq!(root["item"]["ModelId"], "15");
    let root_id = root["item"]["Id"].as_i64().unwrap_or_default();

    let reply = add_comment(
        &app,
        json!({"objectName": "Article", "modelId": "15", "text": "Agreed", "parentId": root_id.to_string()}),
    )
    .await?;
    let reply_id = reply["item"]["Id"].as_i64().unwrap_or_default();

    let res = client().get(app.url("/get-comments/15/Article")).bearer_auth(&app.reader_token).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    let items = body["items"].as_array().cloned().unwrap_or_default();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["Id"], root_id);
    assert_eq!(items[0]["IsBookmark"], false);
    assert_eq!(items[0]["User"]["FirstName"], "Rita");
    let answers = items[0]["Answers"].as_array().cloned().unwrap_or_default();
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0]["Id"], reply_id);
    assert!(answers[0].get("Answers").is_none());
    Ok(())
}

#[tokio::test]
async fn e2e_unknown_parent_rejected() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .post(app.url("/add-comment"))
        .bearer_auth(&app.reader_token)
        .json(&json!({"objectName": "Article", "modelId": "15", "text": "x", "parentId": 77}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["code"], "PARENTID_IS_INVALID");
    Ok(())
}

#[tokio::test]
async fn e2e_moderation_lifecycle_writes_history() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    let author = models::user::create(&app.db, "author@example.com", "Al", "Author").await?;

    let res = c
        .post(app.url("/comment"))
        .bearer_auth(&app.admin_token)
        .header("X-Forwarded-For", "10.1.1.1")
        .json(&json!({"objectName": "Photo", "modelId": "3", "text": "Pending", "userId": author.id, "status": "NEW"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let created = res.json::<Value>().await?;
    assert_eq!(created["item"]["Status"], "NEW");
    assert_eq!(created["item"]["UserId"], author.id);
    let id = created["item"]["Id"].as_i64().unwrap_or_default() as i32;

    let res = c.get(app.url(&format!("/comment/{id}"))).bearer_auth(&app.admin_token).send().await?;
    assert_eq!(res.json::<Value>().await?["item"]["Text"], "Pending");

    let res = c
        .post(app.url(&format!("/comment/{id}")))
        .bearer_auth(&app.admin_token)
        .json(&json!({"shade": "blue"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let unchanged = res.json::<Value>().await?;
    assert_eq!(unchanged["item"]["Text"], "Pending");
    assert_eq!(unchanged["item"]["Status"], "NEW");

    let res = c
        .post(app.url(&format!("/comment/{id}")))
        .bearer_auth(&app.admin_token)
        .json(&json!({"status": "APPROVE", "text": "Approved"}))
        .send()
        .await?;
    let approved = res.json::<Value>().await?;
    assert_eq!(approved["item"]["Status"], "APPROVE");
    assert_eq!(approved["item"]["Text"], "Approved");

    let res = c.delete(app.url(&format!("/comment/{id}"))).bearer_auth(&app.admin_token).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let res = c.delete(app.url(&format!("/comment/{id}"))).bearer_auth(&app.admin_token).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["code"], "RESOURCES_NOT_FOUND");

    let rows = models::history::for_entity(&app.db, "Comment", id).await?;
    let actions: Vec<&str> = rows.iter().map(|r| r.action.as_str()).collect();
    assert_eq!(actions, ["create", "edit", "edit", "delete"]);
    assert_eq!(rows[0].ip.as_deref(), Some("10.1.1.1"));
    Ok(())
}

#[tokio::test]
async fn e2e_list_paginates() -> anyhow::Result<()> {
    let app = start_server().await?;
    for i in 0..5 {
        add_comment(&app, json!({"objectName": "Article", "modelId": "1", "text": format!("c{i}")})).await?;
    }
    let res = client().get(app.url("/comments?limit=2&offset=0")).bearer_auth(&app.admin_token).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["items"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["total"], 5);

    let res = client().get(app.url("/comments?status=bogus")).bearer_auth(&app.admin_token).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["code"], "STATUS_IS_INVALID");
    Ok(())
}

#[tokio::test]
async fn e2e_non_numeric_id_rejected() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(app.url("/comment/abc")).bearer_auth(&app.admin_token).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["code"], "ID_IS_INVALID");
    Ok(())
}

#[tokio::test]
async fn e2e_upload_and_remove() -> anyhow::Result<()> {
    let app = start_server().await?;
    let part = reqwest::multipart::Part::bytes(vec![137, 80, 78, 71]).file_name("me.png").mime_str("image/png")?;
    let form = reqwest::multipart::Form::new().part("photo", part);
    let res = client().post(app.url("/upload/avatars")).bearer_auth(&app.reader_token).multipart(form).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["items"][0]["field"], "photo");
    let url = body["items"][0]["url"].as_str().unwrap_or_default().to_string();
    assert!(url.starts_with("http://cdn.test/avatars/photo_"), "{url}");

    let res = client()
        .delete(app.url("/upload/avatars"))
        .bearer_auth(&app.reader_token)
        .json(&json!({"url": url}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let part = reqwest::multipart::Part::bytes(b"hello".to_vec()).file_name("a.txt").mime_str("text/plain")?;
    let form = reqwest::multipart::Form::new().part("doc", part);
    let res = client().post(app.url("/upload/avatars")).bearer_auth(&app.reader_token).multipart(form).send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNSUPPORTED_MEDIA_TYPE);

    let part = reqwest::multipart::Part::bytes(vec![1]).file_name("a.png").mime_str("image/png")?;
    let form = reqwest::multipart::Form::new().part("photo", part);
    let res = client().post(app.url("/upload/missing")).bearer_auth(&app.reader_token).multipart(form).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["code"], "BUCKET_NOT_FOUND");
    Ok(())
}

#[tokio::test]
async fn e2e_upload_accepts_video_over_default_body_cap() -> anyhow::Result<()> {
    let app = start_server().await?;
    let movie = vec![0u8; 3 * 1024 * 1024];
    let part = reqwest::multipart::Part::bytes(movie).file_name("clip.mov").mime_str("video/quicktime")?;
    let form = reqwest::multipart::Form::new().part("clip", part);
    let res = client().post(app.url("/upload/avatars")).bearer_auth(&app.reader_token).multipart(form).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["items"][0]["field"], "clip");
    Ok(())
}

#[tokio::test]
async fn e2e_upload_over_configured_cap_rejected() -> anyhow::Result<()> {
    let uploads = UploadService::in_memory(&["avatars"], "http://cdn.test")?.with_max_upload_bytes(64 * 1024);
    let app = start_server_with(uploads).await?;
    let part = reqwest::multipart::Part::bytes(vec![0u8; 256 * 1024]).file_name("clip.mov").mime_str("video/quicktime")?;
    let form = reqwest::multipart::Form::new().part("clip", part);
    // the server may also drop the connection before the body is fully sent
    let res = client().post(app.url("/upload/avatars")).bearer_auth(&app.reader_token).multipart(form).send().await;
    if let Ok(res) = res {
        assert_ne!(res.status(), HttpStatusCode::OK);
    }
    Ok(())
}

#[tokio::test]
async fn e2e_geo_lookups() -> anyhow::Result<()> {
    let app = start_server().await?;
    let fr = models::country::create(&app.db, "FR", "France", "France").await?;
    let paris = models::city::create(&app.db, fr.id, "Paris", "Paris").await?;
    models::currency::create(&app.db, "usd", "US Dollar", "US Dollar").await?;
    models::currency::create(&app.db, "EUR", "Euro", "Euro").await?;

    let res = client().get(app.url(&format!("/cities/{}/location", paris.id))).bearer_auth(&app.reader_token).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["item"], json!({"city": "Paris", "country": "FR"}));

    let res = client().get(app.url("/cities/999/location")).bearer_auth(&app.reader_token).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = client().get(app.url("/currencies")).bearer_auth(&app.reader_token).send().await?;
    let body = res.json::<Value>().await?;
    let codes: Vec<&str> = body["items"].as_array().into_iter().flatten().filter_map(|c| c["code"].as_str()).collect();
    assert_eq!(codes, ["EUR", "USD"]);
    Ok(())
}
