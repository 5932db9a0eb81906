use super::*;
use crate::payments::{sign_payload, SIGNATURE_HEADER};
use crate::storage::{DEMO_EMAIL, DEMO_PASSWORD};
use crate::types::PlanTier;
use chrono::Utc;
use reqwest::StatusCode;
use serde_json::{json, Value};

const WEBHOOK_SECRET: &str = "whsec_test";

struct TestApp {
    base: String,
    client: reqwest::Client,
    state: Arc<AppState>,
}

impl TestApp {
    async fn spawn() -> Self {
        let mut config = Config::default();
        config.auth.password_iterations = 10;
        config.payments.webhook_secret = Some(WEBHOOK_SECRET.into());
        config.payments.public_base_url = "https://hub.example.com/".into();
        Self::spawn_with(config).await
    }

    async fn spawn_with(config: Config) -> Self {
        let state = Arc::new(AppState::from_config(config).await.unwrap());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let router = create_router(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base: format!("http://{}", addr),
            client: reqwest::Client::new(),
            state,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut request = self.client.get(self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await.unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }

    async fn post(&self, path: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        let mut request = self.client.post(self.url(path)).json(&body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await.unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }

    async fn login(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .post(
                "/api/auth/login",
                None,
                json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["access_token"].as_str().unwrap().to_string()
    }

    async fn send_webhook(&self, event: &Value, timestamp: i64) -> reqwest::Response {
        let payload = serde_json::to_vec(event).unwrap();
        let signature = sign_payload(WEBHOOK_SECRET, timestamp, &payload).unwrap();
        self.client
            .post(self.url("/api/payments/webhook"))
            .header(SIGNATURE_HEADER, signature)
            .body(payload)
            .send()
            .await
            .unwrap()
    }
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;
    let (status, body) = app.get("/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["ai_status"], "active");
    assert_eq!(body["marketplaces"], 10);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_register_then_login() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({ "email": "maria@example.com", "password": "hunter22" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User created successfully");
    assert_eq!(body["user"]["name"], "maria");
    assert_eq!(body["user"]["plan"], "starter");
    assert_eq!(body["user"]["id"], "user_002");
    assert!(body["access_token"].as_str().is_some());

    let token = app.login("maria@example.com", "hunter22").await;
    let claims = app.state.tokens.verify(&token).unwrap();
    assert_eq!(claims.sub, "maria@example.com");
}

#[tokio::test]
async fn test_register_errors() {
    let app = TestApp::spawn().await;

    let (status, _) = app
        .post("/api/auth/register", None, json!({ "email": "x@example.com" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/api/auth/register",
            None,
            json!({ "email": "   ", "password": "pw" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({ "email": DEMO_EMAIL, "password": "other" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "User already exists");
}

#[tokio::test]
async fn test_login_errors() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": "nobody@example.com", "password": "pw" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");

    let (status, _) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": DEMO_EMAIL, "password": "wrong" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let response = app
        .client
        .post(app.url("/api/auth/login"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = TestApp::spawn().await;

    for path in ["/api/arbitrage/opportunities", "/api/stats/dashboard"] {
        let (status, body) = app.get(path, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", path);
        assert!(body["error"].is_string());

        let (status, _) = app.get(path, Some("not.a.token")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", path);
    }

    let response = app
        .client
        .get(app.url("/api/arbitrage/opportunities"))
        .header("Authorization", "Basic dXNlcjpwdw==")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_for_deleted_account_is_not_found() {
    let app = TestApp::spawn().await;
    let token = app.state.tokens.issue("ghost@example.com").unwrap();

    let (status, body) = app.get("/api/arbitrage/opportunities", Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn test_opportunities_for_demo_account() {
    let app = TestApp::spawn().await;
    let token = app.login(DEMO_EMAIL, DEMO_PASSWORD).await;

    let (status, body) = app.get("/api/arbitrage/opportunities", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let opportunities = body["opportunities"].as_array().unwrap();
    assert_eq!(body["total_opportunities"], opportunities.len());
    assert!(opportunities.len() <= 100);
    assert_eq!(body["marketplaces_scanned"], 10);

    let nets: Vec<f64> = opportunities
        .iter()
        .map(|o| o["profit"]["net"].as_f64().unwrap())
        .collect();
    assert!(nets.iter().all(|n| *n >= 5.0));
    assert!(nets.windows(2).all(|w| w[0] >= w[1]));

    for o in opportunities {
        assert_ne!(o["source"]["marketplace_id"], o["target"]["marketplace_id"]);
        assert!(o["ai_prediction"].is_object());
    }
}

#[tokio::test]
async fn test_starter_quota_after_register() {
    let app = TestApp::spawn().await;
    let (_, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({ "email": "new@example.com", "password": "pw", "name": "New" }),
        )
        .await;
    let token = body["access_token"].as_str().unwrap().to_string();

    for _ in 0..5 {
        let (status, body) = app.get("/api/arbitrage/opportunities", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["opportunities"].as_array().unwrap().len() <= 20);
    }
}

#[tokio::test]
async fn test_scan_fails_without_two_marketplaces() {
    let mut config = Config::default();
    config.auth.password_iterations = 10;
    for (id, market) in config.marketplaces.iter_mut() {
        market.active = id == "amazon";
    }
    let app = TestApp::spawn_with(config).await;
    let token = app.login(DEMO_EMAIL, DEMO_PASSWORD).await;

    let (status, body) = app.get("/api/arbitrage/opportunities", Some(&token)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("2 active marketplaces"));
}

#[tokio::test]
async fn test_search_counts_api_calls() {
    let app = TestApp::spawn().await;
    let token = app.login(DEMO_EMAIL, DEMO_PASSWORD).await;

    let (status, body) = app
        .post("/api/search", Some(&token), json!({ "query": "headphones" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "headphones");
    assert_eq!(body["marketplaces_searched"], 10);
    let results = body["results"].as_array().unwrap();
    assert_eq!(body["total_results"], results.len());
    assert!((30..=80).contains(&results.len()));

    let (status, _) = app.post("/api/search", Some(&token), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let user = app.state.users.find_by_email(DEMO_EMAIL).await.unwrap().unwrap();
    assert_eq!(user.api_calls_today, 1);
}

#[tokio::test]
async fn test_predict_price() {
    let app = TestApp::spawn().await;
    let token = app.login(DEMO_EMAIL, DEMO_PASSWORD).await;

    let (status, body) = app
        .post(
            "/api/predict/price",
            Some(&token),
            json!({ "current_price": 120.0, "category": 2, "marketplace": 1 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_price"], 120.0);
    assert!(body["prediction"]["predicted_price"].as_f64().unwrap() > 0.0);
    assert!(body["recommendation"].is_string());

    for bad in [json!({}), json!({ "current_price": 0 }), json!({ "current_price": -3.5 })] {
        let (status, _) = app.post("/api/predict/price", Some(&token), bad).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_dashboard_and_marketplaces() {
    let app = TestApp::spawn().await;
    let token = app.login(DEMO_EMAIL, DEMO_PASSWORD).await;

    let (status, body) = app.get("/api/stats/dashboard", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["plan"], "professional");
    assert!(body["ai_insights"].is_object());

    let (status, body) = app.get("/api/marketplaces", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 10);
    assert_eq!(body["active"], 10);
    assert_eq!(body["marketplaces"]["ebay"]["name"], "eBay");
}

#[tokio::test]
async fn test_payments_config_and_checkout() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get("/api/payments/config", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["plans"]["professional"]["price_monthly"], 49);
    assert_eq!(body["plans"].as_object().unwrap().len(), 3);

    let (status, body) = app
        .post(
            "/api/payments/create-checkout-session",
            None,
            json!({ "plan": "enterprise", "billing": "annual" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["checkout_session_id"].as_str().unwrap();
    assert!(id.starts_with("cs_test_"));
    assert_eq!(
        body["checkout_url"],
        format!("https://hub.example.com/success?session_id={}", id)
    );

    let (status, body) = app
        .post(
            "/api/payments/create-checkout-session",
            None,
            json!({ "plan": "platinum" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid plan");

    let (status, _) = app
        .post(
            "/api/payments/create-checkout-session",
            None,
            json!({ "plan": "starter", "billing": "weekly" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_webhook_upgrades_plan_and_widens_quota() {
    let app = TestApp::spawn().await;
    let event = json!({
        "type": "checkout.session.completed",
        "data": { "object": {
            "customer": "cus_123",
            "customer_details": { "email": DEMO_EMAIL },
            "metadata": { "plan": "enterprise" }
        }}
    });

    let response = app.send_webhook(&event, Utc::now().timestamp()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "success");

    let user = app.state.users.find_by_email(DEMO_EMAIL).await.unwrap().unwrap();
    assert_eq!(user.plan, PlanTier::Enterprise);
    assert_eq!(user.customer_id.as_deref(), Some("cus_123"));

    let token = app.login(DEMO_EMAIL, DEMO_PASSWORD).await;
    let (status, body) = app.get("/api/arbitrage/opportunities", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["opportunities"].as_array().unwrap().len() <= 1000);
}

#[tokio::test]
async fn test_webhook_rejections() {
    let app = TestApp::spawn().await;
    let event = json!({ "type": "invoice.payment_succeeded", "data": { "object": {} } });

    // stale timestamp
    let response = app.send_webhook(&event, Utc::now().timestamp() - 3600).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // missing header
    let response = app
        .client
        .post(app.url("/api/payments/webhook"))
        .body(serde_json::to_vec(&event).unwrap())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // signed for a different body
    let signature = sign_payload(WEBHOOK_SECRET, Utc::now().timestamp(), b"{}").unwrap();
    let response = app
        .client
        .post(app.url("/api/payments/webhook"))
        .header(SIGNATURE_HEADER, signature)
        .body(serde_json::to_vec(&event).unwrap())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // unknown customer is still acknowledged
    let response = app.send_webhook(&event, Utc::now().timestamp()).await;
    assert_eq!(response.status(), StatusCode::OK);

    // timestamps at the ends of the i64 range are refused, not fatal
    for timestamp in [i64::MIN, i64::MAX] {
        let response = app.send_webhook(&event, timestamp).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_unhandled_event_type_is_acknowledged() {
    let app = TestApp::spawn().await;
    let before = app.state.users.find_by_email(DEMO_EMAIL).await.unwrap().unwrap();

    let event = json!({ "type": "charge.refunded", "data": { "object": { "customer": "cus_1" } } });
    let response = app.send_webhook(&event, Utc::now().timestamp()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "success");

    let after = app.state.users.find_by_email(DEMO_EMAIL).await.unwrap().unwrap();
    assert_eq!(after.plan, before.plan);
    assert_eq!(after.subscription_status, before.subscription_status);
}

#[tokio::test]
async fn test_webhook_without_secret_is_rejected() {
    let mut config = Config::default();
    config.auth.password_iterations = 10;
    let app = TestApp::spawn_with(config).await;

    let event = json!({ "type": "ping", "data": { "object": {} } });
    let response = app.send_webhook(&event, Utc::now().timestamp()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_success_and_cancel_pages() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(app.url("/success?session_id=cs_test_<b>"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await.unwrap();
    assert!(html.contains("cs_test_&lt;b&gt;"));

    let response = app.client.get(app.url("/success")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.client.get(app.url("/cancel")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains("cancelled"));
}

#[tokio::test]
async fn test_autonomous_endpoints() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get("/api/autonomous/revenue", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["passive_revenue"]["growth_rate"], "15%");

    let (status, body) = app.get("/api/autonomous/scaling", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["scaling_action"]["action"].is_string());
    assert!(body["system_metrics"].is_object());

    let (status, body) = app.get("/api/autonomous/viral", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["growth_projections"].as_array().unwrap().len(), 12);

    let (status, body) = app.get("/api/autonomous/maintenance", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["health_metrics"].is_object());

    let (status, body) = app.get("/api/autonomous/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kpis"]["monthly_recurring_revenue"], "€1,150.00");
}

#[tokio::test]
async fn test_jobs_endpoint_reports_scheduler() {
    let app = TestApp::spawn().await;

    let (_, body) = app.get("/api/autonomous/jobs", None).await;
    assert!(body["jobs"].as_array().unwrap().is_empty());

    let mut scheduler = app.state.build_scheduler();
    scheduler.start();
    tokio::time::sleep(Duration::from_millis(200)).await;

    let (status, body) = app.get("/api/autonomous/jobs", None).await;
    assert_eq!(status, StatusCode::OK);
    let jobs = body["jobs"].as_array().unwrap();
    assert_eq!(jobs.len(), 2);
    assert!(jobs.iter().all(|j| j["runs"].as_u64().unwrap() >= 1));

    scheduler.stop().await;
}
