//! Unit and router tests for the users crate

#[cfg(test)]
mod config_tests {
    use crate::application::config::*;

    #[test]
    fn test_default_config() {
        let config = UsersConfig::default();

        assert_eq!(config.avatar_max_bytes, 1_000_000);
        assert_eq!(config.avatar_edge, 250);
        assert!(config.pepper().is_none());
    }

    #[test]
    fn test_default_secret_is_random() {
        let config1 = UsersConfig::default();
        let config2 = UsersConfig::default();

        assert_ne!(config1.token_secret, config2.token_secret);
        assert!(config1.token_secret.iter().any(|&b| b != 0));
    }
}

#[cfg(test)]
mod models_tests {
    use crate::presentation::dto::*;

    #[test]
    fn test_user_response_serialization() {
        let response = UserResponse {
            id: uuid::Uuid::nil().to_string(),
            name: "Andrew".to_string(),
            email: "andrew@example.com".to_string(),
            age: 27,
            created_at: chrono::DateTime::UNIX_EPOCH,
            updated_at: chrono::DateTime::UNIX_EPOCH,
        };

        let json = serde_json::to_value(&response).unwrap();
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            ["age", "createdAt", "email", "id", "name", "updatedAt"]
        );
    }

    #[test]
    fn test_sign_up_request_age_optional() {
        let json = r#"{"name":"Jess","email":"jess@example.com","password":"MyPass777!"}"#;
        let request: SignUpRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.name, "Jess");
        assert!(request.age.is_none());
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;

    use serde_json::{Map, Value, json};

    use crate::application::*;
    use crate::domain::repository::UserRepository;
    use crate::domain::schema::{EntitySchema, EntityType, SchemaProvider, SchemaRegistry};
    use crate::domain::value_object::user_password::RawPassword;
    use crate::error::UsersError;
    use crate::infra::InMemoryUserRepository;

    fn changes(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    async fn signed_up(repo: &Arc<InMemoryUserRepository>, config: &Arc<UsersConfig>) -> IssuedSession {
        SignUpUseCase::new(repo.clone(), config.clone())
            .execute(SignUpInput {
                name: "Andrew".to_string(),
                email: "Andrew@Example.com".to_string(),
                password: "Red12345!".to_string(),
                age: None,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_sign_up_normalises_and_issues_token() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let config = Arc::new(UsersConfig::default());

        let session = signed_up(&repo, &config).await;

        assert_eq!(session.user.email.as_str(), "andrew@example.com");
        assert_eq!(session.user.age.value(), 0);
        assert_eq!(
            repo.tokens_for_user(&session.user.user_id).await.len(),
            1
        );
    }

    #[tokio::test]
    async fn test_sign_in_appends_token() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let config = Arc::new(UsersConfig::default());
        let session = signed_up(&repo, &config).await;

        let sign_in = SignInUseCase::new(repo.clone(), repo.clone(), config.clone());
        for _ in 0..2 {
            sign_in
                .execute(SignInInput {
                    email: "andrew@example.com".to_string(),
                    password: "Red12345!".to_string(),
                })
                .await
                .unwrap();
        }

        assert_eq!(
            repo.tokens_for_user(&session.user.user_id).await.len(),
            3
        );
    }

    #[tokio::test]
    async fn test_sign_in_failures_are_indistinguishable() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let config = Arc::new(UsersConfig::default());
        signed_up(&repo, &config).await;

        let sign_in = SignInUseCase::new(repo.clone(), repo.clone(), config.clone());
        for (email, password) in [
            ("andrew@example.com", "Wrong1234!"),
            ("nobody@example.com", "Red12345!"),
            ("not-an-email", "Red12345!"),
            ("andrew@example.com", "short"),
        ] {
            let result = sign_in
                .execute(SignInInput {
                    email: email.to_string(),
                    password: password.to_string(),
                })
                .await;
            assert!(
                matches!(result, Err(UsersError::InvalidCredentials)),
                "{email} / {password}"
            );
        }
    }

    #[tokio::test]
    async fn test_authenticate_rejects_revoked_token() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let config = Arc::new(UsersConfig::default());
        let session = signed_up(&repo, &config).await;

        let authenticate = AuthenticateUseCase::new(repo.clone(), repo.clone(), config.clone());
        let auth = authenticate.execute(&session.token).await.unwrap();
        assert_eq!(auth.user.user_id, session.user.user_id);

        SignOutUseCase::new(repo.clone())
            .execute(&auth.token_id)
            .await
            .unwrap();

        let result = authenticate.execute(&session.token).await;
        assert!(matches!(result, Err(UsersError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_update_rejects_before_loading_user() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let config = Arc::new(UsersConfig::default());
        let update = UpdateUserUseCase::new(repo.clone(), Arc::new(SchemaRegistry::new()), config);

        // Unknown user: an undeclared field still wins over not-found
        let result = update
            .execute(
                &kernel::id::UserId::new(),
                changes(json!({"name": "Ann", "location": "Philadelphia"})),
            )
            .await;
        assert!(matches!(result, Err(UsersError::InvalidField(_))));

        let result = update
            .execute(&kernel::id::UserId::new(), changes(json!({"name": "Ann"})))
            .await;
        assert!(matches!(result, Err(UsersError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_update_rehashes_password() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let config = Arc::new(UsersConfig::default());
        let session = signed_up(&repo, &config).await;

        UpdateUserUseCase::new(repo.clone(), Arc::new(SchemaRegistry::new()), config.clone())
            .execute(
                &session.user.user_id,
                changes(json!({"password": "Green98765!"})),
            )
            .await
            .unwrap();

        let stored = repo.find_by_id(&session.user.user_id).await.unwrap().unwrap();
        assert!(!stored.password.as_phc_string().contains("Green98765!"));

        let sign_in = SignInUseCase::new(repo.clone(), repo.clone(), config.clone());
        assert!(
            sign_in
                .execute(SignInInput {
                    email: "andrew@example.com".to_string(),
                    password: "Green98765!".to_string(),
                })
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_update_type_and_value_validation() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let config = Arc::new(UsersConfig::default());
        let session = signed_up(&repo, &config).await;
        let update =
            UpdateUserUseCase::new(repo.clone(), Arc::new(SchemaRegistry::new()), config.clone());

        for body in [
            json!({"age": -1}),
            json!({"age": "twelve"}),
            json!({"name": 42}),
            json!({"name": "   "}),
            json!({"email": "nope"}),
            json!({"password": "password123"}),
        ] {
            let result = update.execute(&session.user.user_id, changes(body.clone())).await;
            assert!(matches!(result, Err(UsersError::Validation(_))), "{body}");
        }
    }

    fn png_bytes() -> Vec<u8> {
        let img = image::RgbImage::from_pixel(30, 60, image::Rgb([200, 40, 40]));
        let mut buffer = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut buffer, image::ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    #[tokio::test]
    async fn test_avatar_upload_keeps_concurrent_update() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let config = Arc::new(UsersConfig::default());
        let session = signed_up(&repo, &config).await;

        // Snapshot taken by the auth layer before the update commits
        let snapshot = AuthenticateUseCase::new(repo.clone(), repo.clone(), config.clone())
            .execute(&session.token)
            .await
            .unwrap();

        UpdateUserUseCase::new(repo.clone(), Arc::new(SchemaRegistry::new()), config.clone())
            .execute(
                &session.user.user_id,
                changes(json!({"name": "Renamed", "password": "NewSecret99!"})),
            )
            .await
            .unwrap();

        let avatars = AvatarUseCase::new(repo.clone(), config.clone());
        avatars
            .upload(
                &snapshot.user.user_id,
                AvatarUpload {
                    file_name: "me.png".to_string(),
                    bytes: png_bytes(),
                },
            )
            .await
            .unwrap();

        let stored = repo.find_by_id(&session.user.user_id).await.unwrap().unwrap();
        assert_eq!(stored.name.as_str(), "Renamed");
        assert!(stored.avatar.is_some());
        let new_password = RawPassword::new("NewSecret99!".to_string()).unwrap();
        assert!(stored.password.verify(&new_password, config.pepper()));

        avatars.remove(&snapshot.user.user_id).await.unwrap();
        let stored = repo.find_by_id(&session.user.user_id).await.unwrap().unwrap();
        assert_eq!(stored.name.as_str(), "Renamed");
        assert!(stored.avatar.is_none());
        assert!(stored.password.verify(&new_password, config.pepper()));
    }

    #[tokio::test]
    async fn test_avatar_for_deleted_user_is_not_found() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let config = Arc::new(UsersConfig::default());
        let session = signed_up(&repo, &config).await;
        repo.delete(&session.user.user_id).await.unwrap();

        let result = AvatarUseCase::new(repo.clone(), config)
            .remove(&session.user.user_id)
            .await;
        assert!(matches!(result, Err(UsersError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_sign_up_with_taken_email_leaves_no_token() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let config = Arc::new(UsersConfig::default());
        let first = signed_up(&repo, &config).await;

        let result = SignUpUseCase::new(repo.clone(), config.clone())
            .execute(SignUpInput {
                name: "Other".to_string(),
                email: "andrew@example.com".to_string(),
                password: "Blue12345!".to_string(),
                age: Some(30),
            })
            .await;

        assert!(matches!(result, Err(UsersError::EmailTaken)));
        assert_eq!(repo.list().await.unwrap().len(), 1);
        assert_eq!(repo.tokens_for_user(&first.user.user_id).await.len(), 1);
    }

    /// Provider declaring a field with no update handler
    struct WideSchema(EntitySchema);

    impl SchemaProvider for WideSchema {
        fn declared_fields(&self, _entity: EntityType) -> &EntitySchema {
            &self.0
        }
    }

    #[tokio::test]
    async fn test_declared_field_without_handler_is_server_error() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let config = Arc::new(UsersConfig::default());
        let session = signed_up(&repo, &config).await;

        let schema = WideSchema(EntitySchema::new(EntityType::User, &["name", "avatar"]));
        let result = UpdateUserUseCase::new(repo.clone(), Arc::new(schema), config)
            .execute(&session.user.user_id, changes(json!({"avatar": "x"})))
            .await;

        let err = result.unwrap_err();
        assert!(err.kind().is_server_error());
    }
}

#[cfg(test)]
mod router_tests {
    use std::io::Cursor;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::config::UsersConfig;
    use crate::domain::repository::UserRepository;
    use crate::infra::InMemoryUserRepository;
    use crate::presentation::router::users_router_generic;

    const BOUNDARY: &str = "----users-test-boundary";

    fn app() -> (Router, InMemoryUserRepository) {
        let repo = InMemoryUserRepository::new();
        let router = users_router_generic(repo.clone(), UsersConfig::default());
        (router, repo)
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn bare_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    fn multipart_request(token: &str, field: &str, file_name: &str, data: &[u8]) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/users/me/avatar")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn jpeg_bytes() -> Vec<u8> {
        let img = image::RgbImage::from_pixel(40, 20, image::Rgb([10, 120, 200]));
        let mut buffer = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut buffer, image::ImageFormat::Jpeg)
            .unwrap();
        buffer.into_inner()
    }

    async fn sign_up(app: &Router, name: &str, email: &str) -> (String, String) {
        let (status, body) = send(
            app,
            json_request(
                "POST",
                "/users",
                None,
                json!({"name": name, "email": email, "password": "MyPass777!", "age": 27}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");

        let id = body["user"]["id"].as_str().unwrap().to_string();
        let token = body["token"].as_str().unwrap().to_string();
        (id, token)
    }

    async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
        send(
            app,
            json_request(
                "POST",
                "/users/login",
                None,
                json!({"email": email, "password": password}),
            ),
        )
        .await
    }

    #[tokio::test]
    async fn test_sign_up_returns_user_and_token() {
        let (app, _) = app();

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/users",
                None,
                json!({"name": "  Andrew ", "email": "Andrew@Example.com", "password": "MyPass777!"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["user"]["name"], "Andrew");
        assert_eq!(body["user"]["email"], "andrew@example.com");
        assert_eq!(body["user"]["age"], 0);
        assert!(body["user"].get("password").is_none());
        assert!(body["user"].get("tokens").is_none());
        assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    }

    #[tokio::test]
    async fn test_sign_up_validation_and_conflict() {
        let (app, _) = app();
        sign_up(&app, "Andrew", "andrew@example.com").await;

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/users",
                None,
                json!({"name": "Other", "email": "ANDREW@example.com", "password": "MyPass777!"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Email is already in use");

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/users",
                None,
                json!({"name": "Mike", "email": "mike@example.com", "password": "password99"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Password cannot contain \"password\"");

        let (status, _) = send(
            &app,
            json_request("POST", "/users", None, json!({"name": "Mike"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login() {
        let (app, _) = app();
        let (id, _) = sign_up(&app, "Andrew", "andrew@example.com").await;

        let (status, body) = login(&app, "andrew@example.com", "MyPass777!").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["id"], id.as_str());
        assert!(body["token"].is_string());

        let (status, body) = login(&app, "andrew@example.com", "NotMyPass1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Unable to login"}));

        let (status, body) = login(&app, "ghost@example.com", "MyPass777!").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Unable to login"}));
    }

    #[tokio::test]
    async fn test_me_requires_bearer() {
        let (app, _) = app();
        let (id, token) = sign_up(&app, "Andrew", "andrew@example.com").await;

        let (status, body) = send(&app, bare_request("GET", "/users/me", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"error": "Please authenticate."}));

        let (status, _) = send(&app, bare_request("GET", "/users/me", Some("garbage"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = send(&app, bare_request("GET", "/users/me", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], id.as_str());
    }

    #[tokio::test]
    async fn test_patch_me_allowed_fields() {
        let (app, _) = app();
        let (_, token) = sign_up(&app, "Andrew", "andrew@example.com").await;

        let (status, body) = send(
            &app,
            json_request(
                "PATCH",
                "/users/me",
                Some(&token),
                json!({"name": "Jess", "age": 31}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Jess");
        assert_eq!(body["age"], 31);
        assert_eq!(body["email"], "andrew@example.com");
    }

    #[tokio::test]
    async fn test_patch_me_invalid_field_leaves_user_untouched() {
        let (app, repo) = app();
        let (id, token) = sign_up(&app, "Andrew", "andrew@example.com").await;
        let user_id = id.parse().unwrap();
        let before = repo.find_by_id(&user_id).await.unwrap().unwrap();

        for body in [
            json!({"name": "Jess", "location": "Philadelphia"}),
            json!({"Name": "Jess"}),
            json!({"tokens": []}),
            json!({"avatar": null}),
            json!({"_id": "abc"}),
        ] {
            let (status, response) =
                send(&app, json_request("PATCH", "/users/me", Some(&token), body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(response, json!({"error": "Invalid field!"}));
        }

        let after = repo.find_by_id(&user_id).await.unwrap().unwrap();
        assert_eq!(after.name, before.name);
        assert_eq!(after.updated_at, before.updated_at);
    }

    #[tokio::test]
    async fn test_patch_empty_object_is_allowed() {
        let (app, _) = app();
        let (_, token) = sign_up(&app, "Andrew", "andrew@example.com").await;

        let (status, body) =
            send(&app, json_request("PATCH", "/users/me", Some(&token), json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Andrew");
    }

    #[tokio::test]
    async fn test_patch_email_conflict() {
        let (app, _) = app();
        sign_up(&app, "Andrew", "andrew@example.com").await;
        let (_, token) = sign_up(&app, "Jess", "jess@example.com").await;

        let (status, _) = send(
            &app,
            json_request(
                "PATCH",
                "/users/me",
                Some(&token),
                json!({"email": "andrew@example.com"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_logout_revokes_only_current_token() {
        let (app, _) = app();
        let (_, first) = sign_up(&app, "Andrew", "andrew@example.com").await;
        let (_, body) = login(&app, "andrew@example.com", "MyPass777!").await;
        let second = body["token"].as_str().unwrap().to_string();

        let (status, _) = send(&app, bare_request("POST", "/users/logout", Some(&first))).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, bare_request("GET", "/users/me", Some(&first))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, _) = send(&app, bare_request("GET", "/users/me", Some(&second))).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_logout_all_revokes_every_token() {
        let (app, repo) = app();
        let (id, first) = sign_up(&app, "Andrew", "andrew@example.com").await;
        let (_, body) = login(&app, "andrew@example.com", "MyPass777!").await;
        let second = body["token"].as_str().unwrap().to_string();

        let (status, _) =
            send(&app, bare_request("POST", "/users/logoutAll", Some(&second))).await;
        assert_eq!(status, StatusCode::OK);

        for token in [&first, &second] {
            let (status, _) = send(&app, bare_request("GET", "/users/me", Some(token))).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
        }
        let user_id = id.parse().unwrap();
        assert!(repo.tokens_for_user(&user_id).await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_me() {
        let (app, repo) = app();
        let (id, token) = sign_up(&app, "Andrew", "andrew@example.com").await;

        let (status, body) = send(&app, bare_request("DELETE", "/users/me", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], id.as_str());

        let (status, _) = send(&app, bare_request("GET", "/users/me", Some(&token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(repo.find_by_id(&id.parse().unwrap()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_avatar_upload_and_fetch() {
        let (app, _) = app();
        let (id, token) = sign_up(&app, "Andrew", "andrew@example.com").await;

        let (status, _) = send(
            &app,
            multipart_request(&token, "avatar", "profile-pic.jpg", &jpeg_bytes()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let response = app
            .clone()
            .oneshot(bare_request("GET", &format!("/users/{id}/avatar"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let png = image::load_from_memory(&bytes).unwrap();
        assert_eq!((png.width(), png.height()), (250, 250));

        let (status, _) =
            send(&app, bare_request("DELETE", "/users/me/avatar", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, bare_request("GET", &format!("/users/{id}/avatar"), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_avatar_rejections() {
        let (app, _) = app();
        let (_, token) = sign_up(&app, "Andrew", "andrew@example.com").await;

        let (status, body) = send(
            &app,
            multipart_request(&token, "avatar", "resume.pdf", b"%PDF-1.4"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Please upload an image"}));

        let (status, body) = send(
            &app,
            multipart_request(&token, "upload", "me.png", &jpeg_bytes()),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Please upload an image"}));

        let (status, _) = send(
            &app,
            multipart_request(&token, "avatar", "me.png", b"not really a png"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let oversized = vec![0u8; 1_000_001];
        let (status, _) = send(
            &app,
            multipart_request(&token, "avatar", "big.jpg", &oversized),
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);

        let (status, _) = send(
            &app,
            multipart_request("not-a-token", "avatar", "me.jpg", &jpeg_bytes()),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_users_by_id() {
        let (app, _) = app();
        let (andrew, token) = sign_up(&app, "Andrew", "andrew@example.com").await;
        let (jess, _) = sign_up(&app, "Jess", "jess@example.com").await;

        let (status, body) = send(&app, bare_request("GET", "/users", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Please authenticate.");

        let (status, body) = send(&app, bare_request("GET", "/users", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(2));

        let (status, body) =
            send(&app, bare_request("GET", &format!("/users/{jess}"), Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Jess");

        let (status, _) =
            send(&app, bare_request("GET", "/users/not-a-uuid", Some(&token))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let unknown = uuid::Uuid::new_v4();
        let (status, body) =
            send(&app, bare_request("GET", &format!("/users/{unknown}"), Some(&token))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "User not found");

        let (status, body) = send(
            &app,
            json_request("PATCH", &format!("/users/{jess}"), Some(&token), json!({"age": 40})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["age"], 40);

        let (status, body) = send(
            &app,
            json_request(
                "PATCH",
                &format!("/users/{jess}"),
                Some(&token),
                json!({"height": 180}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid field!");

        let (status, _) =
            send(&app, bare_request("DELETE", &format!("/users/{jess}"), Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) =
            send(&app, bare_request("DELETE", &format!("/users/{jess}"), Some(&token))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) =
            send(&app, bare_request("GET", &format!("/users/{andrew}"), Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "andrew@example.com");
    }
}

#[cfg(test)]
mod error_tests {
    use crate::domain::services::DisallowedFieldError;
    use crate::error::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases: Vec<(UsersError, StatusCode)> = vec![
            (UsersError::UserNotFound, StatusCode::NOT_FOUND),
            (UsersError::EmailTaken, StatusCode::CONFLICT),
            (UsersError::InvalidCredentials, StatusCode::BAD_REQUEST),
            (UsersError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (
                UsersError::InvalidField(DisallowedFieldError),
                StatusCode::BAD_REQUEST,
            ),
            (UsersError::InvalidUserId, StatusCode::BAD_REQUEST),
            (UsersError::AvatarRequired, StatusCode::BAD_REQUEST),
            (
                UsersError::AvatarTooLarge { limit: 10 },
                StatusCode::PAYLOAD_TOO_LARGE,
            ),
            (UsersError::AvatarNotFound, StatusCode::NOT_FOUND),
            (
                UsersError::Internal("test".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            let response = error.into_response();
            assert_eq!(response.status(), expected_status);
        }
    }
}
