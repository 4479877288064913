use eanpay_api::config::ApiConfig;
use eanpay_core::OrderId;
use eanpay_gateway::GatewaySettings;
use reqwest::StatusCode;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        Self::spawn_with(GatewaySettings::default()).await
    }

    async fn spawn_with(gateway: GatewaySettings) -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let config = ApiConfig {
            bind_addr: addr,
            public_url: base_url.clone(),
            translations_path: None,
            gateway,
        };
        let app = eanpay_api::app::build_app(&config).expect("failed to build app");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn ean_form<'a>(ean: &'a str, ref_name: &'a str, req_num: &'a str) -> [(&'static str, &'a str); 3] {
    [
        ("ean_payment[ean_num]", ean),
        ("ean_payment[ref_name]", ref_name),
        ("ean_payment[req_num]", req_num),
    ]
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn gateway_describes_itself() {
    let srv = TestServer::spawn().await;
    let body: serde_json::Value = reqwest::get(format!("{}/gateway", srv.base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["id"], "ean_payment");
    assert_eq!(body["title"], "EAN Payment");
    assert_eq!(body["enabled"], true);
    assert_eq!(body["has_fields"], true);
    assert_eq!(body["form_fields"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn payment_fields_render_the_form_inputs() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(format!("{}/checkout/payment-fields", srv.base_url))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let html = res.text().await.unwrap();
    assert!(html.contains("ean_payment[ean_num]"));
    assert!(html.contains("ean_payment[req_num]"));
}

#[tokio::test]
async fn valid_checkout_places_order_on_hold_and_shows_details() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let order_id = OrderId::new();

    let res = client
        .post(format!("{}/checkout/orders/{}/ean-payment", srv.base_url, order_id))
        .form(&ean_form("4006381333931", "Jane Doe", "REQ-42"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["result"], "success");
    assert_eq!(
        body["redirect"].as_str().unwrap(),
        format!("{}/checkout/order-received/{}", srv.base_url, order_id)
    );

    let order: serde_json::Value = client
        .get(format!("{}/orders/{}", srv.base_url, order_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(order["status"], "on-hold");
    assert_eq!(order["stock_reductions"], 1);
    assert_eq!(order["cart_emptied"], true);

    let admin = client
        .get(format!("{}/admin/orders/{}/ean", srv.base_url, order_id))
        .send()
        .await
        .unwrap();
    assert_eq!(admin.status(), StatusCode::OK);
    let html = admin.text().await.unwrap();
    assert!(html.contains("EAN Details"));
    assert!(html.contains("4006381333931"));
    assert!(html.contains("REQ-42"));

    let email = client
        .get(format!(
            "{}/orders/{}/ean/email?plain_text=true",
            srv.base_url, order_id
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(email.status(), StatusCode::OK);
    assert!(email.text().await.unwrap().contains("Reference name: Jane Doe"));
}

#[tokio::test]
async fn invalid_checksum_is_refused_with_notice() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let order_id = OrderId::new();

    let res = client
        .post(format!("{}/checkout/orders/{}/ean-payment", srv.base_url, order_id))
        .form(&ean_form("4006381333932", "", ""))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["notices"][0]["kind"], "error");
    assert_eq!(body["notices"][0]["message"], "EAN is not valid.");

    // Nothing reached the order.
    let order = client
        .get(format!("{}/orders/{}", srv.base_url, order_id))
        .send()
        .await
        .unwrap();
    assert_eq!(order.status(), StatusCode::NOT_FOUND);

    let admin = client
        .get(format!("{}/admin/orders/{}/ean", srv.base_url, order_id))
        .send()
        .await
        .unwrap();
    assert_eq!(admin.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn each_validation_rule_surfaces_its_notice() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let cases: [(Vec<(&str, &str)>, &str); 3] = [
        (vec![("unrelated", "x")], "Please add EAN details."),
        (ean_form("", "Jane", "").to_vec(), "Please enter an EAN."),
        (ean_form("12345", "", "").to_vec(), "EAN must be 13 characters."),
    ];

    for (form, expected) in cases {
        let res = client
            .post(format!(
                "{}/checkout/orders/{}/ean-payment",
                srv.base_url,
                OrderId::new()
            ))
            .form(&form)
            .send()
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["notices"][0]["message"], expected);
        assert_eq!(body["notices"].as_array().unwrap().len(), 1);
    }
}

#[tokio::test]
async fn malformed_order_id_is_bad_request() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/checkout/orders/not-a-uuid/ean-payment", srv.base_url))
        .form(&ean_form("4006381333931", "", ""))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_id");
}

#[tokio::test]
async fn disabled_gateway_refuses_checkout() {
    let srv = TestServer::spawn_with(GatewaySettings {
        enabled: false,
        ..GatewaySettings::default()
    })
    .await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!(
            "{}/checkout/orders/{}/ean-payment",
            srv.base_url,
            OrderId::new()
        ))
        .form(&ean_form("4006381333931", "", ""))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "gateway_disabled");
}
