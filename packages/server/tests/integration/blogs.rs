use serde_json::{Value, json};

use crate::common::{TestApp, routes};

fn blog(title: &str, category: &str, email: &str, posted_on: &str) -> Value {
    json!({
        "blog_title": title,
        "short_description": format!("About {title}"),
        "long_description": format!("The full story of {title}"),
        "category": category,
        "image": "https://img.example.com/pet.png",
        "posted_by": "Author",
        "blogger_email": email,
        "blogger_photo": "https://img.example.com/me.png",
        "posted_on": posted_on,
    })
}

fn ids(body: &Value) -> Vec<String> {
    body.as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|b| b["_id"].as_str().unwrap().to_string())
        .collect()
}

mod creation {
    use super::*;

    #[tokio::test]
    async fn create_returns_an_acknowledged_hex_id() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::BLOGS,
                &blog("Puppy Care", "dogs", "a@x.com", "2024-01-01T00:00:00Z"),
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["acknowledged"], true);
        let id = res.inserted_id();
        assert_eq!(id.len(), 24);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn created_post_is_retrievable_with_its_body() {
        let app = TestApp::spawn().await;
        let token = app.login("reader@x.com").await;
        let id = app
            .create_blog(&blog("Puppy Care", "dogs", "a@x.com", "2024-01-01T00:00:00Z"))
            .await;

        let res = app.get_with_token(&routes::blog(&id), &token).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["_id"], id);
        assert_eq!(res.body["blog_title"], "Puppy Care");
        assert_eq!(res.body["long_description"], "The full story of Puppy Care");
    }
}

mod counting {
    use super::*;

    #[tokio::test]
    async fn count_respects_category_and_search() {
        let app = TestApp::spawn().await;
        app.create_blog(&blog("Walking Rex", "dogs", "a@x.com", "2024-01-01T00:00:00Z"))
            .await;
        app.create_blog(&blog("Feeding Tom", "cats", "b@x.com", "2024-01-02T00:00:00Z"))
            .await;

        let all = app.get_without_token(routes::BLOGS_COUNT).await;
        let dogs = app
            .get_without_token(&format!("{}?category=dogs", routes::BLOGS_COUNT))
            .await;
        let dogs_named_tom = app
            .get_without_token(&format!("{}?category=dogs&search=tom", routes::BLOGS_COUNT))
            .await;
        let search = app
            .get_without_token(&format!("{}?search=REX", routes::BLOGS_COUNT))
            .await;

        assert_eq!(all.body["count"], 2);
        assert_eq!(dogs.body["count"], 1);
        assert_eq!(dogs_named_tom.body["count"], 0);
        assert_eq!(search.body["count"], 1);
    }

    #[tokio::test]
    async fn blank_filters_are_ignored() {
        let app = TestApp::spawn().await;
        app.create_blog(&blog("Walking Rex", "dogs", "a@x.com", "2024-01-01T00:00:00Z"))
            .await;

        let res = app
            .get_without_token(&format!("{}?category=&search=%20", routes::BLOGS_COUNT))
            .await;

        assert_eq!(res.body["count"], 1);
    }

    #[tokio::test]
    async fn search_text_is_matched_literally() {
        let app = TestApp::spawn().await;
        app.create_blog(&blog("Walking Rex", "dogs", "a@x.com", "2024-01-01T00:00:00Z"))
            .await;

        let res = app
            .get_without_token(&format!("{}?search=.%2A", routes::BLOGS_COUNT))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["count"], 0);
    }
}

mod listing {
    use super::*;

    async fn seed(app: &TestApp) -> Vec<String> {
        let mut created = Vec::new();
        for day in 1..=5 {
            let id = app
                .create_blog(&blog(
                    &format!("Post {day}"),
                    "dogs",
                    if day % 2 == 0 { "even@x.com" } else { "odd@x.com" },
                    &format!("2024-01-0{day}T00:00:00Z"),
                ))
                .await;
            created.push(id);
        }
        created
    }

    #[tokio::test]
    async fn pages_partition_the_sorted_result() {
        let app = TestApp::spawn().await;
        let created = seed(&app).await;

        let mut seen = Vec::new();
        for page in 0..3 {
            let res = app
                .get_without_token(&format!("{}?page={page}&size=2&sort=-1", routes::BLOGS))
                .await;
            assert_eq!(res.status, 200);
            seen.extend(ids(&res.body));
        }

        let mut newest_first = created.clone();
        newest_first.reverse();
        assert_eq!(seen, newest_first);
    }

    #[tokio::test]
    async fn ascending_sort_is_the_default() {
        let app = TestApp::spawn().await;
        let created = seed(&app).await;

        let res = app.get_without_token(routes::BLOGS).await;

        assert_eq!(ids(&res.body), created);
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty() {
        let app = TestApp::spawn().await;
        seed(&app).await;

        let res = app
            .get_without_token(&format!("{}?page=9&size=2", routes::BLOGS))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!([]));
    }

    #[tokio::test]
    async fn summaries_omit_the_long_description() {
        let app = TestApp::spawn().await;
        seed(&app).await;

        let res = app.get_without_token(routes::BLOGS).await;

        for summary in res.body.as_array().unwrap() {
            assert!(summary.get("long_description").is_none());
            assert!(summary["short_description"].is_string());
        }
    }

    #[tokio::test]
    async fn current_user_restricts_to_their_posts() {
        let app = TestApp::spawn().await;
        seed(&app).await;

        let res = app
            .get_without_token(&format!("{}?currentUser=even@x.com", routes::BLOGS))
            .await;

        let posts = res.body.as_array().unwrap();
        assert_eq!(posts.len(), 2);
        assert!(posts.iter().all(|p| p["blogger_email"] == "even@x.com"));
    }
}

mod single_post {
    use super::*;

    #[tokio::test]
    async fn requires_a_session() {
        let app = TestApp::spawn().await;
        let id = app
            .create_blog(&blog("Puppy Care", "dogs", "a@x.com", "2024-01-01T00:00:00Z"))
            .await;

        let res = app.get_without_token(&routes::blog(&id)).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn unknown_id_yields_null() {
        let app = TestApp::spawn().await;
        let token = app.login("reader@x.com").await;

        let res = app
            .get_with_token(&routes::blog("0123456789abcdef01234567"), &token)
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, Value::Null);
        assert_eq!(res.text, "null");
    }

    #[tokio::test]
    async fn malformed_id_is_a_validation_error() {
        let app = TestApp::spawn().await;
        let token = app.login("reader@x.com").await;

        let res = app.get_with_token(&routes::blog("not-an-id"), &token).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod upserting {
    use super::*;

    #[tokio::test]
    async fn patch_updates_only_the_given_fields() {
        let app = TestApp::spawn().await;
        let token = app.login("reader@x.com").await;
        let id = app
            .create_blog(&blog("Puppy Care", "dogs", "a@x.com", "2024-01-01T00:00:00Z"))
            .await;

        let res = app
            .patch_without_token(&routes::blog(&id), &json!({"blog_title": "Puppy Care 101"}))
            .await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["matchedCount"], 1);
        assert_eq!(res.body["modifiedCount"], 1);
        assert_eq!(res.body["upsertedCount"], 0);
        assert_eq!(res.body["upsertedId"], Value::Null);

        let stored = app.get_with_token(&routes::blog(&id), &token).await;
        assert_eq!(stored.body["blog_title"], "Puppy Care 101");
        assert_eq!(stored.body["category"], "dogs");
    }

    #[tokio::test]
    async fn patch_on_a_missing_id_creates_the_post() {
        let app = TestApp::spawn().await;
        let token = app.login("reader@x.com").await;
        let id = "0123456789abcdef01234567";

        let res = app
            .patch_without_token(&routes::blog(id), &json!({"blog_title": "Fresh", "category": "birds"}))
            .await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["matchedCount"], 0);
        assert_eq!(res.body["upsertedCount"], 1);
        assert_eq!(res.body["upsertedId"], id);

        let stored = app.get_with_token(&routes::blog(id), &token).await;
        assert_eq!(stored.body["blog_title"], "Fresh");
    }

    #[tokio::test]
    async fn empty_patch_is_rejected() {
        let app = TestApp::spawn().await;
        let id = app
            .create_blog(&blog("Puppy Care", "dogs", "a@x.com", "2024-01-01T00:00:00Z"))
            .await;

        let res = app.patch_without_token(&routes::blog(&id), &json!({})).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod featured {
    use super::*;

    #[tokio::test]
    async fn ranks_by_word_count_with_serials() {
        let app = TestApp::spawn().await;
        for (title, body) in [
            ("Short", "one two"),
            ("Long", "one two three four five"),
            ("Medium", "one two three"),
        ] {
            app.post_without_token(
                routes::BLOGS,
                &json!({"blog_title": title, "long_description": body}),
            )
            .await;
        }

        let res = app.get_without_token(routes::FEATURED).await;

        assert_eq!(res.status, 200);
        let featured = res.body.as_array().unwrap();
        let titles: Vec<_> = featured.iter().map(|b| b["blog_title"].clone()).collect();
        assert_eq!(titles, vec![json!("Long"), json!("Medium"), json!("Short")]);
        let serials: Vec<_> = featured.iter().map(|b| b["serial"].as_u64().unwrap()).collect();
        assert_eq!(serials, vec![1, 2, 3]);
        assert_eq!(featured[0]["word_count"], 5);
        assert_eq!(featured[0]["total_characters"], 23);
        assert!(featured[0].get("long_description").is_none());
    }

    #[tokio::test]
    async fn returns_at_most_ten_posts() {
        let app = TestApp::spawn().await;
        for n in 0..12 {
            app.post_without_token(
                routes::BLOGS,
                &json!({"blog_title": format!("Post {n}"), "long_description": "word ".repeat(n)}),
            )
            .await;
        }

        let res = app.get_without_token(routes::FEATURED).await;

        let featured = res.body.as_array().unwrap();
        assert_eq!(featured.len(), 10);
        assert_eq!(featured[9]["serial"], 10);
    }
}

mod wishlist_blogs {
    use super::*;

    #[tokio::test]
    async fn returns_requested_posts_sorted_by_title() {
        let app = TestApp::spawn().await;
        let token = app.login("reader@x.com").await;
        let zebra = app
            .create_blog(&blog("Zebra Finch", "birds", "a@x.com", "2024-01-01T00:00:00Z"))
            .await;
        let alpaca = app
            .create_blog(&blog("Alpaca Grooming", "farm", "a@x.com", "2024-01-02T00:00:00Z"))
            .await;
        app.create_blog(&blog("Unrequested", "farm", "a@x.com", "2024-01-03T00:00:00Z"))
            .await;

        let res = app
            .post_with_token(routes::WISHLIST_BLOGS, &json!([zebra, alpaca]), &token)
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(ids(&res.body), vec![alpaca, zebra]);
        assert!(res.body[0]["long_description"].is_string());
    }

    #[tokio::test]
    async fn empty_id_list_yields_empty_array() {
        let app = TestApp::spawn().await;
        let token = app.login("reader@x.com").await;

        let res = app
            .post_with_token(routes::WISHLIST_BLOGS, &json!([]), &token)
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!([]));
    }

    #[tokio::test]
    async fn requires_a_session() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::WISHLIST_BLOGS, &json!([]))
            .await;

        assert_eq!(res.status, 401);
    }
}
