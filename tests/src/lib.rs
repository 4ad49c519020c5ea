
#[cfg(test)]
mod tests {
    use crate::test_server::TestServer;
    use std::{net::TcpListener, time::Duration};
    use testa::{
        BodyFormat, ConsoleExplainer, Error, ExplainAndSnapshot, GeneratedSnapshot, Interceptor,
        InvokerConfiguration, Invoker, RequestDescriptor, SnapshotCollector,
    };

    type BufferExplainer = ConsoleExplainer<Vec<u8>, Vec<u8>>;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
            .try_init();
    }

    fn invoker_for(server: &TestServer) -> Invoker {
        let mut configuration = InvokerConfiguration::new();
        configuration.set_pdp(server.root());
        configuration.set_version("v0.1.0");
        Invoker::new(configuration)
    }

    fn text(buffer: Option<&Vec<u8>>) -> String {
        String::from_utf8(buffer.cloned().unwrap_or_default()).unwrap()
    }

    fn snapshot_of(buffer: Option<&Vec<u8>>) -> GeneratedSnapshot {
        serde_yaml::from_str(&text(buffer)).unwrap()
    }

    #[test]
    fn json_response_is_captured_and_snapshotted() {
        init_tracing();
        let server = TestServer::start();
        let invoker = invoker_for(&server);
        let descriptor = RequestDescriptor::new()
            .with_path("/orders")
            .with_header("Accept", "application/json");
        let mut collector = SnapshotCollector::new(Vec::new());

        let mut chain: [&mut dyn Interceptor; 1] = [&mut collector];
        let response = invoker.invoke(&descriptor, &mut chain).unwrap();

        assert_eq!(response.status_code(), 200);
        assert_eq!(response.status(), "200 OK");
        assert_eq!(response.version(), "HTTP/1.1");
        assert_eq!(response.body_text(), r#"{"id":7,"items":["book","pen"]}"#);

        let snapshot = snapshot_of(collector.target());
        assert_eq!(snapshot.test_cases.len(), 1);
        let test_case = &snapshot.test_cases[0];
        assert_eq!(test_case.title, "<Generated testcase>");
        assert_eq!(test_case.version.as_deref(), Some("v0.1.0"));
        assert_eq!(test_case.request, descriptor);

        let expectation = &test_case.expectation;
        assert_eq!(
            expectation.status_code.as_ref().unwrap().is_equal_to,
            Some(200)
        );
        let headers = expectation.headers.as_ref().unwrap();
        assert_eq!(headers.has_total, Some(response.headers().len()));
        assert!(headers
            .items
            .iter()
            .any(|item| item.name == "Content-Type" && item.is_equal_to == "application/json"));

        let body = expectation.body.as_ref().unwrap();
        assert_eq!(body.has_format, Some(BodyFormat::Json));
        let includes: serde_json::Value =
            serde_json::from_str(body.includes.as_ref().unwrap()).unwrap();
        assert_eq!(
            includes,
            serde_json::json!({"id": 7, "items": ["book", "pen"]})
        );
    }

    #[test]
    fn yaml_response_is_tagged_yaml() {
        let server = TestServer::start();
        let invoker = invoker_for(&server);
        let mut collector = SnapshotCollector::new(Vec::new());

        let mut chain: [&mut dyn Interceptor; 1] = [&mut collector];
        invoker
            .invoke(&RequestDescriptor::new().with_path("config"), &mut chain)
            .unwrap();

        let snapshot = snapshot_of(collector.target());
        let body = snapshot.test_cases[0].expectation.body.clone().unwrap();
        assert_eq!(body.has_format, Some(BodyFormat::Yaml));
        let includes: serde_yaml::Value =
            serde_yaml::from_str(body.includes.as_ref().unwrap()).unwrap();
        assert_eq!(includes["name"].as_str(), Some("testa"));
        assert_eq!(includes["port"].as_u64(), Some(17779));
    }

    #[test]
    fn missing_resource_is_flat_with_empty_value() {
        let server = TestServer::start();
        let invoker = invoker_for(&server);
        let mut collector = SnapshotCollector::new(Vec::new());

        let mut chain: [&mut dyn Interceptor; 1] = [&mut collector];
        let response = invoker
            .invoke(&RequestDescriptor::new().with_path("/nowhere"), &mut chain)
            .unwrap();

        assert_eq!(response.status_code(), 404);
        let snapshot = snapshot_of(collector.target());
        let expectation = &snapshot.test_cases[0].expectation;
        assert_eq!(
            expectation.status_code.as_ref().unwrap().is_equal_to,
            Some(404)
        );
        let body = expectation.body.as_ref().unwrap();
        assert_eq!(body.has_format, Some(BodyFormat::Flat));
        assert_eq!(body.is_equal_to.as_deref(), Some(""));
        assert_eq!(body.match_with.as_deref(), Some(".*"));
        assert_eq!(body.includes, None);
    }

    #[test]
    fn repeated_header_is_counted_not_itemized() {
        let server = TestServer::start();
        let invoker = invoker_for(&server);
        let mut collector = SnapshotCollector::new(Vec::new());

        let mut chain: [&mut dyn Interceptor; 1] = [&mut collector];
        let response = invoker
            .invoke(&RequestDescriptor::new().with_path("/cookies"), &mut chain)
            .unwrap();

        assert_eq!(response.headers()["Set-Cookie"], vec!["a=1", "b=2"]);
        let snapshot = snapshot_of(collector.target());
        let headers = snapshot.test_cases[0]
            .expectation
            .headers
            .clone()
            .unwrap();
        assert_eq!(headers.has_total, Some(response.headers().len()));
        assert!(headers.items.iter().all(|item| item.name != "Set-Cookie"));
        assert!(headers.items.iter().any(|item| item.name == "Content-Type"));
    }

    #[test]
    fn method_headers_and_body_reach_the_server() {
        let server = TestServer::start();
        let invoker = invoker_for(&server);
        let descriptor = RequestDescriptor::new()
            .with_method("POST")
            .with_url(format!("{}/echo", server.root()))
            .with_header("Accept", "text/plain")
            .with_header("X-Dropped", "")
            .with_body("ping");

        let response = invoker.invoke(&descriptor, &mut []).unwrap();

        assert_eq!(response.body_text(), "POST ping");
        assert_eq!(response.headers()["X-Accept"], vec!["text/plain"]);
    }

    #[test]
    fn transcript_follows_call_order() {
        let server = TestServer::start();
        let invoker = invoker_for(&server);
        let mut first = BufferExplainer::new(Vec::new(), Vec::new());
        let mut both = ExplainAndSnapshot::new(
            ConsoleExplainer::new(Vec::new(), Vec::new()),
            SnapshotCollector::new(Vec::new()),
        );

        let mut chain: [&mut dyn Interceptor; 2] = [&mut first, &mut both];
        invoker
            .invoke(&RequestDescriptor::new().with_path("/plain"), &mut chain)
            .unwrap();

        let transcript = text(first.out());
        let lines: Vec<&str> = transcript.lines().collect();
        assert_eq!(lines[0], "> GET /plain HTTP/1.1");
        assert_eq!(lines[1], format!("> Host: {}", server.root().trim_start_matches("http://")));
        assert!(lines[2].starts_with("> User-Agent: testa/"));
        assert_eq!(lines[3], ">");
        assert_eq!(lines[4], "< HTTP/1.1 200 OK");
        assert!(lines.contains(&"< Content-Type: text/plain"));
        assert_eq!(lines[lines.len() - 2], "<");
        assert_eq!(lines[lines.len() - 1], "hello world");

        assert_eq!(text(both.explainer.out()), transcript);
        let snapshot = snapshot_of(both.snapshot.target());
        let body = snapshot.test_cases[0].expectation.body.clone().unwrap();
        assert_eq!(body.has_format, Some(BodyFormat::Flat));
        assert_eq!(body.is_equal_to.as_deref(), Some("hello world"));
    }

    #[test]
    fn refused_connection_is_a_transport_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let mut configuration = InvokerConfiguration::new();
        configuration.set_pdp(format!("http://127.0.0.1:{}", port));
        let invoker = Invoker::new(configuration);
        let mut both = ExplainAndSnapshot::new(
            ConsoleExplainer::new(Vec::new(), Vec::new()),
            SnapshotCollector::new(Vec::new()),
        );

        let mut chain: [&mut dyn Interceptor; 1] = [&mut both];
        let result = invoker.invoke(&RequestDescriptor::new(), &mut chain);

        assert!(matches!(result, Err(Error::TransportError(_))));
        assert!(text(both.explainer.out()).starts_with("> GET /$ HTTP/1.1\n"));
        assert!(text(both.explainer.err()).starts_with("< error: Transport error:"));
        assert!(text(both.snapshot.target()).is_empty());
    }

    #[test]
    fn slow_response_times_out() {
        let server = TestServer::start();
        let mut configuration = InvokerConfiguration::new();
        configuration.set_pdp(server.root());
        configuration.set_timeout(Duration::from_secs(1));
        let invoker = Invoker::new(configuration);

        let result = invoker.invoke(&RequestDescriptor::new().with_path("/slow"), &mut []);

        match result {
            Err(Error::TransportError(e)) => assert!(e.is_timeout()),
            other => panic!("expected a timeout, got {:?}", other),
        }
    }

    #[test]
    fn malformed_request_never_reaches_the_network() {
        let invoker = Invoker::new(InvokerConfiguration::new());

        let result = invoker.invoke(&RequestDescriptor::new().with_method("BAD METHOD"), &mut []);

        assert!(matches!(result, Err(Error::MalformedRequest(_))));
    }
}
