use axum::http::StatusCode;
use axum_test::TestServer;
use tallypad::api::create_router;
use tallypad::db::Database;
use tallypad::models::*;

fn setup() -> TestServer {
    let db = Database::open_memory().expect("Failed to create database");
    db.migrate().expect("Failed to migrate");
    let app = create_router(db);
    TestServer::new(app).expect("Failed to create test server")
}

async fn save(server: &TestServer, expression: &str, result: &str) -> Calculation {
    server
        .post("/calculations")
        .json(&CreateCalculationInput {
            expression: expression.to_string(),
            result: result.to_string(),
        })
        .await
        .json::<Calculation>()
}

mod save_calculation {
    use super::*;

    #[tokio::test]
    async fn creates_a_calculation_and_returns_it() {
        let server = setup();

        let response = server
            .post("/calculations")
            .json(&CreateCalculationInput {
                expression: "5 + 3".to_string(),
                result: "8".to_string(),
            })
            .await;

        response.assert_status(StatusCode::CREATED);
        let calculation: Calculation = response.json();
        assert_eq!(calculation.expression, "5 + 3");
        assert_eq!(calculation.result, "8");
        assert!(calculation.id >= 1);
    }

    #[tokio::test]
    async fn rejects_an_empty_expression_with_field_detail() {
        let server = setup();

        let response = server
            .post("/calculations")
            .json(&CreateCalculationInput {
                expression: "".to_string(),
                result: "8".to_string(),
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"][0]["field"], "expression");
    }

    #[tokio::test]
    async fn rejects_a_whitespace_only_result() {
        let server = setup();

        let response = server
            .post("/calculations")
            .json(&CreateCalculationInput {
                expression: "5 + 3".to_string(),
                result: "   ".to_string(),
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"][0]["field"], "result");
    }

    #[tokio::test]
    async fn serializes_the_timestamp_as_created_at() {
        let server = setup();
        save(&server, "5 + 3", "8").await;

        let response = server.get("/calculations").await;
        let body: serde_json::Value = response.json();
        assert!(body[0].get("createdAt").is_some());
    }
}

mod list_calculations {
    use super::*;

    #[tokio::test]
    async fn returns_empty_list_when_log_is_empty() {
        let server = setup();

        let response = server.get("/calculations").await;

        response.assert_status_ok();
        let calculations: Vec<Calculation> = response.json();
        assert!(calculations.is_empty());
    }

    #[tokio::test]
    async fn returns_calculations_in_insertion_order() {
        let server = setup();
        save(&server, "1 + 1", "2").await;
        save(&server, "2 + 2", "4").await;

        let response = server.get("/calculations").await;

        response.assert_status_ok();
        let calculations: Vec<Calculation> = response.json();
        assert_eq!(calculations.len(), 2);
        assert_eq!(calculations[0].expression, "1 + 1");
        assert_eq!(calculations[1].expression, "2 + 2");
    }
}

mod recent_calculations {
    use super::*;

    #[tokio::test]
    async fn returns_newest_first_truncated_to_limit() {
        let server = setup();
        save(&server, "1 + 1", "2").await;
        save(&server, "2 + 2", "4").await;
        save(&server, "3 + 3", "6").await;

        let response = server.get("/calculations/recent?limit=2").await;

        response.assert_status_ok();
        let recent: Vec<Calculation> = response.json();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].expression, "3 + 3");
        assert_eq!(recent[1].expression, "2 + 2");
    }

    #[tokio::test]
    async fn defaults_to_ten_entries() {
        let server = setup();
        for i in 0..12 {
            save(&server, &format!("{} + 0", i), &i.to_string()).await;
        }

        let response = server.get("/calculations/recent").await;

        response.assert_status_ok();
        let recent: Vec<Calculation> = response.json();
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].result, "11");
    }

    #[tokio::test]
    async fn returns_the_just_saved_record_first() {
        let server = setup();
        save(&server, "1 + 1", "2").await;
        let saved = save(&server, "6 × 7", "42").await;

        let response = server.get("/calculations/recent?limit=1").await;

        response.assert_status_ok();
        let recent: Vec<Calculation> = response.json();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, saved.id);
    }
}

mod health {
    use super::*;

    #[tokio::test]
    async fn reports_ok() {
        let server = setup();

        let response = server.get("/health").await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "ok");
    }
}
