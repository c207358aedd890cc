use serde_json::json;

use crate::common::{TestApp, routes};

mod comments {
    use super::*;

    #[tokio::test]
    async fn listing_is_scoped_to_the_blog_and_newest_first() {
        let app = TestApp::spawn().await;
        let token = app.login("reader@x.com").await;
        for (blog_id, text, on) in [
            ("blog-a", "first", "2024-01-01T00:00:00Z"),
            ("blog-a", "second", "2024-01-02T00:00:00Z"),
            ("blog-b", "elsewhere", "2024-01-03T00:00:00Z"),
        ] {
            let res = app
                .post_without_token(
                    routes::COMMENTS,
                    &json!({
                        "blog_id": blog_id,
                        "comment": text,
                        "commenter_name": "Bob",
                        "commenter_email": "bob@x.com",
                        "commented_on": on,
                    }),
                )
                .await;
            assert_eq!(res.status, 200, "create comment failed: {}", res.text);
            assert_eq!(res.body["acknowledged"], true);
        }

        let res = app
            .get_with_token(&routes::comments_for("blog-a"), &token)
            .await;

        assert_eq!(res.status, 200);
        let texts: Vec<_> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["comment"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(texts, vec!["second", "first"]);
        assert!(res.body[0]["_id"].is_string());
    }

    #[tokio::test]
    async fn listing_requires_a_session() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::comments_for("blog-a")).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["message"], "Not Authorized!");
    }

    #[tokio::test]
    async fn comment_without_blog_id_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::COMMENTS, &json!({"comment": "orphan"}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod replies {
    use super::*;

    #[tokio::test]
    async fn replies_are_scoped_to_the_comment_and_newest_first() {
        let app = TestApp::spawn().await;
        let token = app.login("reader@x.com").await;
        let comment = app
            .post_without_token(
                routes::COMMENTS,
                &json!({"blog_id": "blog-a", "comment": "question?"}),
            )
            .await
            .inserted_id();

        for (comment_id, text, on) in [
            (comment.as_str(), "early", "2024-02-01T00:00:00Z"),
            (comment.as_str(), "late", "2024-02-03T00:00:00Z"),
            ("other", "unrelated", "2024-02-04T00:00:00Z"),
        ] {
            let res = app
                .post_without_token(
                    routes::REPLIES,
                    &json!({
                        "comment_id": comment_id,
                        "blog_id": "blog-a",
                        "reply": text,
                        "replier_email": "carol@x.com",
                        "replied_on": on,
                    }),
                )
                .await;
            assert_eq!(res.status, 200, "create reply failed: {}", res.text);
        }

        let res = app
            .get_with_token(&routes::replies_for(&comment), &token)
            .await;

        assert_eq!(res.status, 200);
        let texts: Vec<_> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["reply"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(texts, vec!["late", "early"]);
        assert_eq!(res.body[0]["comment_id"], comment);
    }

    #[tokio::test]
    async fn listing_requires_a_session() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::replies_for("any")).await;

        assert_eq!(res.status, 401);
    }
}
