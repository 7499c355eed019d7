mod common;

use serde_json::json;

const ACCEPT_MUTATION: &str = r#"
    mutation Accept($id: Int!) {
        acceptRequest(requestId: $id) {
            request { id mentorId menteeId question status }
        }
    }
"#;

const REJECT_MUTATION: &str = r#"
    mutation Reject($id: Int!) {
        rejectRequest(requestId: $id) {
            request { id status }
        }
    }
"#;

#[tokio::test]
async fn create_request_starts_pending() {
    let app = common::spawn_app().await;
    let (mentor_id, _) = common::register_mentor(&app, "mentor").await;
    let (mentee_id, _) = common::register_user(&app, "mentee").await;

    let body = app
        .graphql(
            r#"
            mutation Create($mentorId: Int!, $menteeId: Int!) {
                createRequest(
                    mentorId: $mentorId,
                    menteeId: $menteeId,
                    question: "How do I structure a GraphQL backend?"
                ) {
                    request { id mentorId menteeId question status }
                }
            }
            "#,
            json!({ "mentorId": mentor_id, "menteeId": mentee_id }),
        )
        .await;
    assert!(body["errors"].is_null(), "unexpected errors: {}", body);

    let request = &body["data"]["createRequest"]["request"];
    assert_eq!(request["mentorId"].as_i64().unwrap(), mentor_id as i64);
    assert_eq!(request["menteeId"].as_i64().unwrap(), mentee_id as i64);
    assert_eq!(request["question"], "How do I structure a GraphQL backend?");
    assert_eq!(request["status"], "Pending");
}

#[tokio::test]
async fn create_request_unknown_mentor_fails() {
    let app = common::spawn_app().await;
    let (mentee_id, _) = common::register_user(&app, "mentee").await;

    let body = app
        .graphql(
            r#"
            mutation Create($menteeId: Int!) {
                createRequest(mentorId: 999999, menteeId: $menteeId, question: "Hello?") {
                    request { id }
                }
            }
            "#,
            json!({ "menteeId": mentee_id }),
        )
        .await;
    assert_eq!(common::first_error(&body), "Mentor not found");
}

#[tokio::test]
async fn create_request_unknown_mentee_fails() {
    let app = common::spawn_app().await;
    let (mentor_id, _) = common::register_mentor(&app, "mentor").await;

    let body = app
        .graphql(
            r#"
            mutation Create($mentorId: Int!) {
                createRequest(mentorId: $mentorId, menteeId: 999999, question: "Hello?") {
                    request { id }
                }
            }
            "#,
            json!({ "mentorId": mentor_id }),
        )
        .await;
    assert_eq!(common::first_error(&body), "Mentee not found");
}

#[tokio::test]
async fn accept_request_sets_status() {
    let app = common::spawn_app().await;
    let (mentor_id, _) = common::register_mentor(&app, "mentor").await;
    let (mentee_id, _) = common::register_user(&app, "mentee").await;
    let request_id = common::create_request(&app, mentor_id, mentee_id, "Test question 1").await;

    let body = app
        .graphql(ACCEPT_MUTATION, json!({ "id": request_id }))
        .await;
    assert!(body["errors"].is_null(), "unexpected errors: {}", body);

    let request = &body["data"]["acceptRequest"]["request"];
    assert_eq!(request["id"].as_i64().unwrap(), request_id as i64);
    assert_eq!(request["question"], "Test question 1");
    assert_eq!(request["status"], "Accepted");
}

#[tokio::test]
async fn reject_request_sets_status() {
    let app = common::spawn_app().await;
    let (mentor_id, _) = common::register_mentor(&app, "mentor").await;
    let (mentee_id, _) = common::register_user(&app, "mentee").await;
    let request_id = common::create_request(&app, mentor_id, mentee_id, "Test question 2").await;

    let body = app
        .graphql(REJECT_MUTATION, json!({ "id": request_id }))
        .await;
    assert!(body["errors"].is_null(), "unexpected errors: {}", body);
    assert_eq!(
        body["data"]["rejectRequest"]["request"]["status"],
        "Rejected"
    );
}

#[tokio::test]
async fn accept_overrides_prior_rejection() {
    let app = common::spawn_app().await;
    let (mentor_id, _) = common::register_mentor(&app, "mentor").await;
    let (mentee_id, _) = common::register_user(&app, "mentee").await;
    let request_id = common::create_request(&app, mentor_id, mentee_id, "Second thoughts").await;

    let body = app
        .graphql(REJECT_MUTATION, json!({ "id": request_id }))
        .await;
    assert_eq!(
        body["data"]["rejectRequest"]["request"]["status"],
        "Rejected"
    );

    // There is no terminal-status guard: accepting after a rejection succeeds
    let body = app
        .graphql(ACCEPT_MUTATION, json!({ "id": request_id }))
        .await;
    assert!(body["errors"].is_null(), "unexpected errors: {}", body);
    assert_eq!(
        body["data"]["acceptRequest"]["request"]["status"],
        "Accepted"
    );
}

#[tokio::test]
async fn accept_unknown_request_fails() {
    let app = common::spawn_app().await;

    let body = app.graphql(ACCEPT_MUTATION, json!({ "id": 999999 })).await;
    assert_eq!(common::first_error(&body), "Not found");
}

#[tokio::test]
async fn user_requests_returns_only_that_mentees_requests() {
    let app = common::spawn_app().await;
    let (mentor_id, _) = common::register_mentor(&app, "mentor").await;
    let (mentee_a, _) = common::register_user(&app, "mentee_a").await;
    let (mentee_b, _) = common::register_user(&app, "mentee_b").await;

    let r1 = common::create_request(&app, mentor_id, mentee_a, "Q1").await;
    let _r2 = common::create_request(&app, mentor_id, mentee_b, "Q2").await;

    let body = app
        .graphql(
            r#"
            query UserRequests($menteeId: Int!) {
                userRequests(menteeId: $menteeId) {
                    id mentorId menteeId question status
                }
            }
            "#,
            json!({ "menteeId": mentee_a }),
        )
        .await;
    assert!(body["errors"].is_null(), "unexpected errors: {}", body);

    let requests = body["data"]["userRequests"].as_array().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["id"].as_i64().unwrap(), r1 as i64);
    assert_eq!(requests[0]["question"], "Q1");
    assert_eq!(requests[0]["status"], "Pending");

    // Accepting R1 leaves R2 untouched
    let body = app.graphql(ACCEPT_MUTATION, json!({ "id": r1 })).await;
    assert_eq!(body["data"]["acceptRequest"]["request"]["status"], "Accepted");

    let body = app
        .graphql(
            "query All { allRequests { id status } }",
            json!({}),
        )
        .await;
    let statuses: Vec<(i64, String)> = body["data"]["allRequests"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| {
            (
                r["id"].as_i64().unwrap(),
                r["status"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(statuses.len(), 2);
    assert_eq!(statuses[0], (r1 as i64, "Accepted".to_string()));
    assert_eq!(statuses[1].1, "Pending");
}

#[tokio::test]
async fn user_requests_unknown_mentee_fails() {
    let app = common::spawn_app().await;

    let body = app
        .graphql(
            "query { userRequests(menteeId: 999999) { id } }",
            json!({}),
        )
        .await;
    assert_eq!(common::first_error(&body), "Mentee not found");
}

#[tokio::test]
async fn all_requests_ordered_by_id() {
    let app = common::spawn_app().await;
    let (mentor_id, _) = common::register_mentor(&app, "mentor").await;
    let (mentee_id, _) = common::register_user(&app, "mentee").await;

    let r1 = common::create_request(&app, mentor_id, mentee_id, "First").await;
    let r2 = common::create_request(&app, mentor_id, mentee_id, "Second").await;
    let r3 = common::create_request(&app, mentor_id, mentee_id, "Third").await;

    let body = app
        .graphql("query { allRequests { id } }", json!({}))
        .await;
    assert!(body["errors"].is_null(), "unexpected errors: {}", body);

    let ids: Vec<i64> = body["data"]["allRequests"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![r1 as i64, r2 as i64, r3 as i64]);
}
