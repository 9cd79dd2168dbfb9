use std::convert::Infallible;
use std::sync::Arc;

use warp::{Filter, Rejection, reply::Reply};

use sendgrid_dev::MailHandler;

use super::controllers;
use super::errors;

/// Every route, with rejections turned into API-shaped error bodies
pub fn api(handler: Arc<MailHandler>) -> impl Filter<Extract = (impl Reply, ), Error = Infallible> + Clone {
    health()
        .or(mail_send(handler))
        .recover(errors::handle_rejection)
}

/// GET /health => 200 OK with body "OK"
pub fn health() -> impl Filter<Extract = (&'static str, ), Error = Rejection> + Clone {
    warp::path!("health")
        .and(warp::get())
        .map(|| "OK")
}

/// Route for /v3/mail/send
/// GET is accepted and handled exactly like POST
pub fn mail_send(handler: Arc<MailHandler>) -> impl Filter<Extract = (impl Reply, ), Error = Rejection> + Clone {
    warp::path!("v3" / "mail" / "send")
         .and(warp::get().or(warp::post()).unify())
         .and(warp::body::bytes())
         .and(warp::any().map(move || handler.clone()))
         .and_then(controllers::mail_send)
}

#[cfg(test)]
mod test {
    use super::*;

    use sendgrid_dev::{Config, SmtpDispatcher};
    use serde_json::Value;

    fn test_api() -> impl Filter<Extract = (impl Reply, ), Error = Infallible> + Clone {
        let config = Arc::new(Config {
            dry_run: true,
            ..Default::default()
        });
        let dispatcher = Arc::new(SmtpDispatcher::from_config(&config).unwrap());

        api(Arc::new(MailHandler::new(config, dispatcher)))
    }

    fn json(body: &[u8]) -> Value {
        serde_json::from_slice(body).unwrap()
    }

    const VALID: &str = r#"{
        "personalizations": [{"to": [{"email": "a@x.com"}], "subject": "Hello",
                              "substitutions": {"{{name}}": "Bob"}}],
        "from": {"email": "f@x.com"},
        "content": [{"type": "text/plain", "value": "hi {{name}}"}]
    }"#;

    #[tokio::test]
    async fn health_ok() {
        let resp = warp::test::request()
            .method("GET")
            .path("/health")
            .reply(&test_api())
            .await;

        assert_eq!(resp.status(), 200);
        assert_eq!(resp.body(), "OK");
    }

    #[tokio::test]
    async fn post_accepted() {
        let resp = warp::test::request()
            .method("POST")
            .path("/v3/mail/send")
            .header("authorization", "Bearer SG.xxxxx")
            .body(VALID)
            .reply(&test_api())
            .await;

        assert_eq!(resp.status(), 202);
        assert!(resp.headers().contains_key("x-message-id"));
        assert_eq!(json(resp.body()), serde_json::json!({"errors": []}));
    }

    #[tokio::test]
    async fn cc_only_personalization_accepted() {
        let body = r#"{
            "personalizations": [{"cc": [{"email": "c@x.com"}], "subject": "s"}],
            "from": {"email": "f@x.com"},
            "content": [{"type": "text/plain", "value": "x"}]
        }"#;

        let resp = warp::test::request()
            .method("POST")
            .path("/v3/mail/send")
            .body(body)
            .reply(&test_api())
            .await;

        assert_eq!(resp.status(), 202);
    }

    #[tokio::test]
    async fn get_behaves_like_post() {
        let resp = warp::test::request()
            .method("GET")
            .path("/v3/mail/send")
            .body(VALID)
            .reply(&test_api())
            .await;

        assert_eq!(resp.status(), 202);
    }

    #[tokio::test]
    async fn missing_personalizations() {
        let resp = warp::test::request()
            .method("POST")
            .path("/v3/mail/send")
            .body(r#"{"from": {"email": "f@x.com"}, "content": [{"type": "text/plain", "value": "x"}]}"#)
            .reply(&test_api())
            .await;

        let body = json(resp.body());

        assert_eq!(resp.status(), 400);
        assert_eq!(body["errors"].as_array().unwrap().len(), 1);
        assert_eq!(body["errors"][0]["field"], "personalizations");
    }

    #[tokio::test]
    async fn bad_attachment_field_path() {
        let body = r#"{
            "personalizations": [{"to": [{"email": "a@x.com"}]}],
            "from": {"email": "f@x.com"},
            "subject": "s",
            "content": [{"type": "text/plain", "value": "x"}],
            "attachments": [{"content": "@@@@", "filename": "a.txt"}]
        }"#;

        let resp = warp::test::request()
            .method("POST")
            .path("/v3/mail/send")
            .body(body)
            .reply(&test_api())
            .await;

        assert_eq!(resp.status(), 400);
        assert_eq!(json(resp.body())["errors"][0]["field"], "attachments.0.content");
    }

    #[tokio::test]
    async fn malformed_json() {
        let resp = warp::test::request()
            .method("POST")
            .path("/v3/mail/send")
            .body("{not json")
            .reply(&test_api())
            .await;

        let body = json(resp.body());

        assert_eq!(resp.status(), 400);
        assert_eq!(body["errors"][0]["message"], "Bad Request");
        assert!(body["errors"][0]["field"].is_null());
    }

    #[tokio::test]
    async fn unknown_path() {
        let resp = warp::test::request()
            .method("GET")
            .path("/v3/templates")
            .reply(&test_api())
            .await;

        assert_eq!(resp.status(), 404);
        assert_eq!(json(resp.body())["errors"][0]["message"], "resource not found");
    }

    #[tokio::test]
    async fn post_to_unknown_path() {
        let resp = warp::test::request()
            .method("POST")
            .path("/v3/mail/batch")
            .reply(&test_api())
            .await;

        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn wrong_method() {
        let resp = warp::test::request()
            .method("DELETE")
            .path("/v3/mail/send")
            .reply(&test_api())
            .await;

        assert_eq!(resp.status(), 405);
    }
}
