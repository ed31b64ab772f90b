//! 端到端集成测试
//!
//! 后端服务用进程内的 axum stub 模拟，网关跑在随机端口上，
//! 通过 reqwest 走真实的 HTTP 往返。Cookie 手工携带。

use axum::{Json, Router, http::StatusCode, routing::get, routing::post};
use gateway::{Config, ServerState, build_app};
use serde_json::{Value, json};

/// 在随机端口上启动一个 stub 服务，返回其基础 URL
async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// 启动完整网关，返回其基础 URL 和状态 (便于观察会话存储)
async fn spawn_gateway(auth: &str, dishes: &str, orders: &str) -> (String, ServerState) {
    let config = Config::with_backends(auth, dishes, orders);
    let state = ServerState::initialize(&config).unwrap();
    let base = spawn(build_app(state.clone())).await;
    (base, state)
}

fn auth_stub() -> Router {
    async fn register(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        (
            StatusCode::CREATED,
            Json(json!({ "id": 3, "username": body["username"] })),
        )
    }
    async fn login(Json(body): Json<Value>) -> Json<Value> {
        Json(json!({ "id": 3, "username": body["username"] }))
    }
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

fn dishes_stub() -> Router {
    async fn dish() -> Json<Value> {
        Json(json!({
            "id": 5,
            "name": "Steak frites",
            "price": 14.0,
            "category": { "id": 2, "name": "Plats" }
        }))
    }
    async fn dishes() -> Json<Value> {
        Json(json!([]))
    }
    Router::new()
        .route("/dishes/5", get(dish))
        .route("/dishes", get(dishes))
}

fn orders_stub_ok() -> Router {
    async fn create() -> (StatusCode, Json<Value>) {
        (StatusCode::CREATED, Json(json!({ "id": 77, "status": "new" })))
    }
    Router::new().route("/orders", post(create))
}

fn orders_stub_failing() -> Router {
    async fn create() -> (StatusCode, Json<Value>) {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "db down" })),
        )
    }
    Router::new().route("/orders", post(create))
}

/// 从响应头提取会话 Cookie (name=value 部分)
fn session_cookie(response: &reqwest::Response) -> String {
    let raw = response
        .headers()
        .get("set-cookie")
        .expect("gateway should set a session cookie")
        .to_str()
        .unwrap();
    raw.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn test_full_checkout_flow_clears_cart() {
    let auth = spawn(auth_stub()).await;
    let dishes = spawn(dishes_stub()).await;
    let orders = spawn(orders_stub_ok()).await;
    let (base, _state) = spawn_gateway(&auth, &dishes, &orders).await;
    let client = reqwest::Client::new();

    // 注册拿到会话
    let response = client
        .post(format!("{base}/register"))
        .json(&json!({ "username": "alice", "password": "s3cret" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    let cookie = session_cookie(&response);

    // 加购
    let response = client
        .post(format!("{base}/cart/items"))
        .header("cookie", &cookie)
        .json(&json!({ "dish_id": 5, "quantity": 2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    // Checkout
    let response = client
        .post(format!("{base}/checkout"))
        .header("cookie", &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["order"]["id"], 77);
    assert_eq!(body["order"]["status"], "new");

    // 购物车已清空
    let response = client
        .get(format!("{base}/cart"))
        .header("cookie", &cookie)
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    assert!(body["lines"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_checkout_failure_preserves_cart() {
    let auth = spawn(auth_stub()).await;
    let dishes = spawn(dishes_stub()).await;
    let orders = spawn(orders_stub_failing()).await;
    let (base, _state) = spawn_gateway(&auth, &dishes, &orders).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/login"))
        .json(&json!({ "username": "alice", "password": "s3cret" }))
        .send()
        .await
        .unwrap();
    let cookie = session_cookie(&response);

    client
        .post(format!("{base}/cart/items"))
        .header("cookie", &cookie)
        .json(&json!({ "dish_id": 5, "quantity": 2 }))
        .send()
        .await
        .unwrap();

    let response = client
        .post(format!("{base}/checkout"))
        .header("cookie", &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "order failed");

    // 失败后购物车原样保留
    let response = client
        .get(format!("{base}/cart"))
        .header("cookie", &cookie)
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["lines"].as_array().unwrap().len(), 1);
    assert_eq!(body["lines"][0]["dish_id"], 5);
}

#[tokio::test]
async fn test_checkout_without_login_is_401() {
    let auth = spawn(auth_stub()).await;
    let dishes = spawn(dishes_stub()).await;
    let orders = spawn(orders_stub_ok()).await;
    let (base, _state) = spawn_gateway(&auth, &dishes, &orders).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/checkout"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "not authenticated");
}

#[tokio::test]
async fn test_proxy_passes_empty_dish_list_through() {
    let auth = spawn(auth_stub()).await;
    let dishes = spawn(dishes_stub()).await;
    let orders = spawn(orders_stub_ok()).await;
    let (base, _state) = spawn_gateway(&auth, &dishes, &orders).await;

    let response = reqwest::get(format!("{base}/api/dishes?category=Desserts"))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_proxy_unreachable_upstream_is_502() {
    let auth = spawn(auth_stub()).await;
    let orders = spawn(orders_stub_ok()).await;
    // 占一个端口再释放，保证没人监听
    let dead = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };
    let (base, _state) = spawn_gateway(&auth, &dead, &orders).await;

    let response = reqwest::get(format!("{base}/api/dishes")).await.unwrap();
    assert_eq!(response.status(), 502);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "upstream unavailable");
    assert_eq!(body["service"], "dishes");
}

#[tokio::test]
async fn test_cookieless_requests_leave_no_sessions() {
    let auth = spawn(auth_stub()).await;
    let dishes = spawn(dishes_stub()).await;
    let orders = spawn(orders_stub_ok()).await;
    let (base, state) = spawn_gateway(&auth, &dishes, &orders).await;
    let client = reqwest::Client::new();

    // 健康检查和未登录的 checkout 都不落库、不发 Cookie
    for _ in 0..25 {
        let response = reqwest::get(format!("{base}/health")).await.unwrap();
        assert!(response.headers().get("set-cookie").is_none());
    }
    let response = client
        .post(format!("{base}/checkout"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
    assert!(state.sessions.is_empty());

    // 写入会话的请求才会产生条目
    let response = client
        .post(format!("{base}/register"))
        .json(&json!({ "username": "alice", "password": "s3cret" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    assert!(response.headers().get("set-cookie").is_some());
    assert_eq!(state.sessions.len(), 1);
}

#[tokio::test]
async fn test_vanished_dish_flagged_and_unpriced() {
    let auth = spawn(auth_stub()).await;
    let dishes = spawn(dishes_stub()).await;
    let orders = spawn(orders_stub_ok()).await;
    let (base, _state) = spawn_gateway(&auth, &dishes, &orders).await;
    let client = reqwest::Client::new();

    // 加购时 /dishes/5 还能查到，但目录列表里已经没有它
    let response = client
        .post(format!("{base}/cart/items"))
        .json(&json!({ "dish_id": 5, "quantity": 2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let cookie = session_cookie(&response);

    let response = client
        .get(format!("{base}/cart"))
        .header("cookie", &cookie)
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    // 行保留并被标记，不计入显示小计
    assert_eq!(body["lines"][0]["missing"], true);
    assert_eq!(body["lines"][0]["subtotal"].as_f64(), Some(0.0));
    assert_eq!(body["subtotal"].as_f64(), Some(0.0));
}
