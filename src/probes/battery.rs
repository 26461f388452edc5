//! Named groups of RPC method probes with an all-or-nothing verdict.

use super::{rpc, Probe, RequestKind, TestCase};
use crate::http::AgentClient;
use async_trait::async_trait;
use serde_json::json;

pub struct Battery {
    name: &'static str,
    cases: Vec<TestCase>,
}

impl Battery {
    pub fn new(name: &'static str, cases: Vec<TestCase>) -> Self {
        debug_assert!(cases.iter().all(|c| c.kind == RequestKind::JsonRpc));
        Self { name, cases }
    }

    pub fn weather_methods() -> Self {
        Self::new(
            "Weather Methods",
            vec![
                TestCase::rpc(
                    "get_current_weather",
                    json!({"zip_code": "10001", "country_code": "us"}),
                    "Current Weather",
                ),
                TestCase::rpc(
                    "get_weather_forecast",
                    json!({"zip_code": "90210", "country_code": "us"}),
                    "Weather Forecast",
                ),
                TestCase::rpc(
                    "get_weather_alerts",
                    json!({"zip_code": "60601", "country_code": "us"}),
                    "Weather Alerts",
                ),
                TestCase::rpc(
                    "get_weather_history",
                    json!({
                        "zip_code": "33101",
                        "country_code": "us",
                        "start_date": "2024-01-01",
                        "end_date": "2024-01-07"
                    }),
                    "Weather History",
                ),
            ],
        )
    }

    pub fn protocol_methods() -> Self {
        Self::new(
            "A2A Protocol Methods",
            vec![
                TestCase::rpc("agent.discover", json!({}), "Agent Discover"),
                TestCase::rpc("agent.getSkills", json!({}), "Agent Skills"),
                TestCase::rpc("agent.info", json!({}), "Agent Info"),
                TestCase::rpc("agent.getCapabilities", json!({}), "Agent Capabilities"),
            ],
        )
    }

    pub fn status_methods() -> Self {
        Self::new(
            "Agent Status Methods",
            vec![
                TestCase::rpc("agent.health", json!({}), "Agent Health"),
                TestCase::rpc("agent.status", json!({}), "Agent Status"),
            ],
        )
    }
}

#[async_trait]
impl Probe for Battery {
    fn name(&self) -> &str {
        self.name
    }

    async fn run(&self, client: &AgentClient) -> bool {
        client.console().info(format!("Testing {}...", self.name));

        let mut passed = 0;
        for case in &self.cases {
            let params = case.params.clone();
            let ok = rpc::invoke(
                client,
                case.target,
                params,
                case.expected_fields,
                case.display_name,
            )
            .await;
            if ok {
                passed += 1;
            }
            client.console().blank();
        }

        passed == self.cases.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TesterConfig;
    use crate::console::Console;
    use serde_json::Value;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn weather_history_carries_date_range() {
        let battery = Battery::weather_methods();
        let history = &battery.cases[3];
        assert_eq!(history.target, "get_weather_history");
        assert_eq!(history.params["start_date"], Value::from("2024-01-01"));
        assert_eq!(history.params["end_date"], Value::from("2024-01-07"));
    }

    #[test]
    fn protocol_methods_take_no_params() {
        let battery = Battery::protocol_methods();
        let methods: Vec<_> = battery.cases.iter().map(|c| c.target).collect();
        assert_eq!(
            methods,
            vec!["agent.discover", "agent.getSkills", "agent.info", "agent.getCapabilities"]
        );
        assert!(battery.cases.iter().all(|c| c.params.is_empty()));
    }

    #[tokio::test]
    async fn one_failure_fails_the_battery_but_all_run() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/jsonrpc"))
            .and(body_partial_json(serde_json::json!({"method": "agent.getSkills"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"error": {"code": -32601, "message": "Method not found"}}),
            ))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/jsonrpc"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"result": {}})),
            )
            .expect(3)
            .mount(&server)
            .await;

        let (console, out) = Console::capture();
        let client = AgentClient::new(&TesterConfig::new(&server.uri()).unwrap(), console).unwrap();

        assert!(!Battery::protocol_methods().run(&client).await);
        let text = out.contents();
        assert!(text.contains("[SUCCESS] Agent Capabilities working"));
        assert!(text.contains("[WARNING] Agent Skills returned error"));
    }
}
