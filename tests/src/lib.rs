#[cfg(test)]
mod tests {
    use apicontract::{
        contract_test, validate, ApiClient, Error, FixtureServer, RequestConfig, SchemaDocument,
        ValidationResult,
    };
    use lazy_static::lazy_static;
    use serde_json::json;

    lazy_static! {
        static ref PLAYBACK: FixtureServer = FixtureServer::builder()
            .route("/ping/", 200, r#"{"pong": true}"#)
            .route_with_content_type("/teapot/", 418, "text/plain", "I'm a teapot")
            .start()
            .expect("the playback server should start");
    }

    fn configure_playback() -> Result<RequestConfig, Error> {
        RequestConfig::build(PLAYBACK.base_uri(), "application/json")
    }

    fn configure_invalid() -> Result<RequestConfig, Error> {
        RequestConfig::build("", "application/json")
    }

    fn film_schema() -> SchemaDocument {
        SchemaDocument::parse(
            "film",
            r#"{
                "type": "object",
                "properties": {
                    "title": {"type": "string"},
                    "episode_id": {"type": "integer"},
                    "director": {"type": "string"}
                },
                "required": ["title", "episode_id", "director"]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn validate_json_schema() {
        let valid = json!({ "title": "A New Hope", "episode_id": 4, "director": "George Lucas" });
        let invalid = json!({ "title": "A New Hope", "episode_id": "four" });

        assert_eq!(
            validate(&film_schema(), &valid).unwrap(),
            ValidationResult::Valid
        );

        match validate(&film_schema(), &invalid).unwrap().into_result() {
            Err(Error::Validation(violations)) => {
                let messages = violations.messages();
                assert_eq!(messages.len(), 2);
                assert!(messages.iter().any(|m| m.contains("episode_id")));
                assert!(messages.iter().any(|m| m.contains("director")));
            }
            other => panic!("the instance should be rejected, got {:?}", other),
        }
    }

    #[contract_test(configure_playback)]
    fn config_is_injected(config: RequestConfig) -> Result<(), Error> {
        assert_eq!(config.base_uri().as_str(), PLAYBACK.base_uri());

        ApiClient::new()
            .get("/ping/", &config)?
            .then()
            .status_code(200)?
            .body("pong", true)?;
        Ok(())
    }

    #[contract_test(configure_playback)]
    fn non_json_response_is_data(config: RequestConfig) -> Result<(), Error> {
        let response = ApiClient::new().get("teapot/", &config)?;

        response.then().status_code(418)?;
        assert_eq!(response.body(), Some("I'm a teapot"));
        assert!(matches!(response.json(), Err(Error::Deserialization(_))));
        Ok(())
    }

    #[contract_test(configure_playback)]
    #[should_panic(expected = "Expected status code 200, got 404")]
    fn failed_assertion_fails_the_test(config: RequestConfig) {
        let response = ApiClient::new().get("/missing/", &config).unwrap();

        if let Err(e) = response.then().status_code(200) {
            panic!("{}", e);
        }
    }

    #[contract_test(configure_invalid)]
    #[should_panic(expected = "Failed to build the request configuration")]
    fn invalid_configuration_fails_the_test(_config: RequestConfig) {}
}
