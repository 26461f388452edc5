//! REST endpoint probes: root, agent card, health, and the extended cards.

use super::{display_value, Field, Probe, TestCase};
use crate::http::AgentClient;
use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;

const NOT_AVAILABLE: &str = "N/A";

pub const ROOT_FIELDS: &[Field] = &[
    Field::new("name", "Name"),
    Field::new("version", "Version"),
    Field::new("status", "Status"),
];

pub const CARD_FIELDS: &[Field] = &[
    Field::new("name", "Name"),
    Field::new("version", "Version"),
    Field::new("protocolVersion", "Protocol"),
];

pub const HEALTH_FIELDS: &[Field] = &[
    Field::new("status", "Status"),
    Field::new("platform", "Platform"),
    Field::new("weatherMode", "Weather Mode"),
];

const SKILLS: Field = Field::new("skills", "Skills");

/// GET one endpoint; passes when the body is a non-empty JSON object.
pub struct EndpointProbe {
    name: &'static str,
    case: TestCase,
    /// Sequence field whose length is reported as `N available`.
    count: Option<Field>,
}

impl EndpointProbe {
    pub fn new(name: &'static str, case: TestCase) -> Self {
        Self {
            name,
            case,
            count: None,
        }
    }

    pub fn counting(mut self, field: Field) -> Self {
        self.count = Some(field);
        self
    }

    pub fn root() -> Self {
        Self::new("Root Endpoint", TestCase::get("/", "Root endpoint", ROOT_FIELDS))
    }

    pub fn agent_card() -> Self {
        Self::new("Agent Card", TestCase::get("/agent", "Agent card", CARD_FIELDS)).counting(SKILLS)
    }

    pub fn health() -> Self {
        Self::new(
            "Health Check",
            TestCase::get("/agent/health", "Health check", HEALTH_FIELDS),
        )
    }

    pub fn extended_card() -> Self {
        Self::new(
            "Extended Card",
            TestCase::get("/agent/extendedCard", "Extended card", CARD_FIELDS),
        )
        .counting(SKILLS)
    }

    pub fn authenticated_card() -> Self {
        Self::new(
            "Authenticated Card",
            TestCase::get(
                "/agent/authenticatedExtendedCard",
                "Authenticated extended card",
                CARD_FIELDS,
            ),
        )
        .counting(SKILLS)
    }

    fn report(&self, client: &AgentClient, body: &Map<String, Value>) {
        let console = client.console();
        for field in self.case.expected_fields {
            match body.get(field.key) {
                Some(value) => console.detail(
                    field.label,
                    format_args!("{}{}", display_value(value), field.suffix),
                ),
                None => console.detail(field.label, NOT_AVAILABLE),
            }
        }
        if let Some(field) = self.count {
            let n = body.get(field.key).and_then(Value::as_array).map_or(0, Vec::len);
            console.detail(field.label, format_args!("{n} available"));
        }
    }
}

#[async_trait]
impl Probe for EndpointProbe {
    fn name(&self) -> &str {
        self.name
    }

    async fn run(&self, client: &AgentClient) -> bool {
        let label = self.case.display_name;
        let console = client.console();
        console.info(format!("Testing {}...", label.to_lowercase()));

        match client.get(self.case.target).await {
            Ok(Value::Object(body)) if !body.is_empty() => {
                console.success(format!("{label} working"));
                self.report(client, &body);
                true
            }
            Ok(other) => {
                debug!(path = self.case.target, body = %other, "endpoint returned an empty or non-object body");
                console.error(format!("{label} failed"));
                false
            }
            Err(_) => {
                console.error(format!("{label} failed"));
                false
            }
        }
    }
}
