//! API integration tests
//!
//! GraphQL over HTTP against a throwaway SQLite database

use anyhow::Result;
use axum::http::StatusCode;
use axum_test::TestServer;
use orgdir::config::ServerConfig;
use orgdir::database::connection::{establish_connection, get_database_url, setup_database};
use orgdir::server::app::create_app;
use serde_json::{json, Value};
use tempfile::TempDir;

struct TestApp {
    server: TestServer,
    // Keeps the database file alive for the duration of the test
    _dir: TempDir,
}

impl TestApp {
    async fn post(&self, query: &str, variables: Value) -> Value {
        let response = self
            .server
            .post("/graphql")
            .json(&json!({ "query": query, "variables": variables }))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        response.json()
    }
}

async fn setup_test_server(config: ServerConfig) -> Result<TestApp> {
    let dir = TempDir::new()?;
    let path = dir.path().join("orgdir-test.db");
    let db = establish_connection(&get_database_url(path.to_str())).await?;
    setup_database(&db).await?;

    let app = create_app(db, &config).await?;
    let server = TestServer::new(app)?;

    Ok(TestApp { server, _dir: dir })
}

fn test_config() -> ServerConfig {
    ServerConfig {
        bcrypt_cost: 4,
        ..Default::default()
    }
}

const ADD_ORGANIZATION: &str = r#"
    mutation Add($organization: String, $products: [String], $marketValue: Int,
                 $address: String, $ceo: String, $country: String,
                 $employees: [String], $noOfEmployees: Int) {
        addOrganization(organization: $organization, products: $products,
                        marketValue: $marketValue, address: $address, ceo: $ceo,
                        country: $country, employees: $employees,
                        noOfEmployees: $noOfEmployees) {
            id organization products marketValue address ceo country employees noOfEmployees
        }
    }
"#;

const ADD_USER: &str = r#"
    mutation AddUser($username: String, $email: String, $password: String) {
        addUser(username: $username, email: $email, password: $password) {
            id username email password
        }
    }
"#;

const LOGIN: &str = r#"
    mutation Login($email: String!, $password: String!) {
        login(email: $email, password: $password) { id email }
    }
"#;

fn acme() -> Value {
    json!({
        "organization": "Acme",
        "products": ["anvils", "rockets"],
        "marketValue": 1000,
        "address": "1 Desert Rd",
        "ceo": "Wile E. Coyote",
        "country": "US",
        "employees": ["Wile", "Road"],
        "noOfEmployees": 99
    })
}

#[tokio::test]
async fn test_health_endpoint() -> Result<()> {
    let app = setup_test_server(test_config()).await?;

    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["service"], "orgdir");
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_playground_is_served() -> Result<()> {
    let app = setup_test_server(test_config()).await?;

    let response = app.server.get("/graphql").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("GraphQL Playground"));

    Ok(())
}

#[tokio::test]
async fn test_organization_lifecycle() -> Result<()> {
    let app = setup_test_server(test_config()).await?;

    let body = app.post(ADD_ORGANIZATION, acme()).await;
    assert!(body["errors"].is_null(), "unexpected errors: {}", body["errors"]);
    let created = &body["data"]["addOrganization"];
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["noOfEmployees"], 2);
    assert_eq!(created["products"], json!(["anvils", "rockets"]));

    let body = app
        .post(
            "query One($id: ID!) { oneOrganization(id: $id) { organization ceo } }",
            json!({ "id": id }),
        )
        .await;
    assert_eq!(body["data"]["oneOrganization"]["organization"], "Acme");

    let body = app
        .post(
            r#"mutation Update($id: ID!) {
                updateOrganization(id: $id, country: "MX", address: "") {
                    country address ceo marketValue noOfEmployees
                }
            }"#,
            json!({ "id": id }),
        )
        .await;
    let updated = &body["data"]["updateOrganization"];
    assert_eq!(updated["country"], "MX");
    assert_eq!(updated["address"], "1 Desert Rd");
    assert_eq!(updated["ceo"], "Wile E. Coyote");
    assert_eq!(updated["marketValue"], 1000);
    assert_eq!(updated["noOfEmployees"], 2);

    let body = app
        .post("{ allOrganizations { id } }", json!({}))
        .await;
    assert_eq!(body["data"]["allOrganizations"].as_array().unwrap().len(), 1);

    let body = app
        .post(
            r#"mutation { deleteOrganizationByCompany(organization: "Acme") { id } }"#,
            json!({}),
        )
        .await;
    assert_eq!(body["data"]["deleteOrganizationByCompany"]["id"], id.as_str());

    let body = app
        .post(
            "query One($id: ID!) { oneOrganization(id: $id) { id } }",
            json!({ "id": id }),
        )
        .await;
    assert!(body["data"]["oneOrganization"].is_null());

    Ok(())
}

#[tokio::test]
async fn test_add_organization_validation_error() -> Result<()> {
    let app = setup_test_server(test_config()).await?;

    let mut input = acme();
    input["ceo"] = Value::Null;
    let body = app.post(ADD_ORGANIZATION, input).await;

    let error = &body["errors"][0];
    assert_eq!(error["extensions"]["code"], "VALIDATION_FAILED");
    assert_eq!(error["extensions"]["fields"], json!(["ceo"]));

    let body = app.post("{ allOrganizations { id } }", json!({})).await;
    assert!(body["data"]["allOrganizations"].as_array().unwrap().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_null_list_item_is_a_validation_error() -> Result<()> {
    let app = setup_test_server(test_config()).await?;

    let mut input = acme();
    input["products"] = json!(["anvils", null]);
    let body = app.post(ADD_ORGANIZATION, input).await;

    let error = &body["errors"][0];
    assert_eq!(error["extensions"]["code"], "VALIDATION_FAILED");
    assert_eq!(error["extensions"]["fields"], json!(["products"]));
    assert_eq!(error["message"], "\"products[1]\" must be a string");

    Ok(())
}

#[tokio::test]
async fn test_update_and_delete_unknown_organization() -> Result<()> {
    let app = setup_test_server(test_config()).await?;

    let body = app
        .post(
            r#"mutation { updateOrganization(id: "missing", country: "MX") { id } }"#,
            json!({}),
        )
        .await;
    assert_eq!(body["errors"][0]["extensions"]["code"], "NOT_FOUND");

    let body = app
        .post(
            r#"mutation { deleteOrganizationByCompany(organization: "Nobody") { id } }"#,
            json!({}),
        )
        .await;
    assert_eq!(body["errors"][0]["extensions"]["code"], "NOT_FOUND");
    assert_eq!(
        body["errors"][0]["message"],
        "Organization not found in the database"
    );

    let body = app
        .post(r#"mutation { deleteOrganization(id: "missing") { id } }"#, json!({}))
        .await;
    assert!(body["errors"].is_null());
    assert!(body["data"]["deleteOrganization"].is_null());

    Ok(())
}

#[tokio::test]
async fn test_user_signup_and_login() -> Result<()> {
    let app = setup_test_server(test_config()).await?;

    let body = app
        .post(
            ADD_USER,
            json!({ "username": "a", "email": "a@x.com", "password": "secret" }),
        )
        .await;
    let user = &body["data"]["addUser"];
    let hash = user["password"].as_str().unwrap();
    assert_ne!(hash, "secret");
    assert!(hash.starts_with("$2"));

    let body = app
        .post(LOGIN, json!({ "email": "a@x.com", "password": "secret" }))
        .await;
    assert_eq!(body["data"]["login"]["email"], "a@x.com");

    let body = app
        .post(LOGIN, json!({ "email": "a@x.com", "password": "wrong" }))
        .await;
    assert!(body["errors"].is_null());
    assert!(body["data"]["login"].is_null());

    let body = app
        .post(LOGIN, json!({ "email": "", "password": "x" }))
        .await;
    assert_eq!(body["errors"][0]["extensions"]["code"], "MISSING_FIELDS");
    assert_eq!(body["errors"][0]["message"], "All fields are required!");

    let body = app
        .post(
            r#"mutation { deleteUser(email: "a@x.com") { email } }"#,
            json!({}),
        )
        .await;
    assert_eq!(body["data"]["deleteUser"]["email"], "a@x.com");

    let body = app.post("{ allUsers { id } }", json!({})).await;
    assert!(body["data"]["allUsers"].as_array().unwrap().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_add_user_validation_error() -> Result<()> {
    let app = setup_test_server(test_config()).await?;

    let body = app
        .post(ADD_USER, json!({ "username": "a", "email": "nope", "password": "1" }))
        .await;
    let error = &body["errors"][0];
    assert_eq!(error["extensions"]["code"], "VALIDATION_FAILED");
    assert_eq!(error["extensions"]["fields"], json!(["email", "password"]));

    Ok(())
}

#[tokio::test]
async fn test_duplicate_email_is_a_validation_error() -> Result<()> {
    let app = setup_test_server(test_config()).await?;
    let user = json!({ "username": "a", "email": "a@x.com", "password": "secret" });

    let body = app.post(ADD_USER, user.clone()).await;
    assert!(body["errors"].is_null(), "unexpected errors: {}", body["errors"]);

    let body = app.post(ADD_USER, user).await;
    let error = &body["errors"][0];
    assert_eq!(error["extensions"]["code"], "VALIDATION_FAILED");
    assert_eq!(error["extensions"]["fields"], json!(["email"]));
    assert_eq!(error["message"], "\"email\" already exists");

    let body = app.post("{ allUsers { id } }", json!({})).await;
    assert_eq!(body["data"]["allUsers"].as_array().unwrap().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_password_hash_redaction() -> Result<()> {
    let app = setup_test_server(ServerConfig {
        redact_password_hash: true,
        ..test_config()
    })
    .await?;

    let body = app
        .post(
            ADD_USER,
            json!({ "username": "a", "email": "a@x.com", "password": "secret" }),
        )
        .await;
    assert_eq!(body["data"]["addUser"]["email"], "a@x.com");
    assert!(body["data"]["addUser"]["password"].is_null());

    let body = app
        .post(LOGIN, json!({ "email": "a@x.com", "password": "secret" }))
        .await;
    assert_eq!(body["data"]["login"]["email"], "a@x.com");

    Ok(())
}
