//! Run orchestrator: executes every probe in order and tallies the results.

use crate::config::TesterConfig;
use crate::console::Console;
use crate::error::ConfigError;
use crate::http::AgentClient;
use crate::probes::battery::Battery;
use crate::probes::endpoint::EndpointProbe;
use crate::probes::error_handling::ErrorHandlingProbe;
use crate::probes::Probe;
use tracing::info;

/// Outcome of one run. Created fresh per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestRunSummary {
    pub total: usize,
    pub passed: usize,
    /// Failed probe names, in execution order.
    pub failures: Vec<String>,
}

impl TestRunSummary {
    pub fn record(&mut self, name: &str, passed: bool) {
        self.total += 1;
        if passed {
            self.passed += 1;
        } else {
            self.failures.push(name.to_string());
        }
    }

    pub fn failed(&self) -> usize {
        self.total - self.passed
    }

    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }

    pub fn exit_code(&self) -> i32 {
        if self.all_passed() {
            0
        } else {
            1
        }
    }
}

/// The six checks every run performs, in order.
pub fn standard_suite() -> Vec<Box<dyn Probe>> {
    vec![
        Box::new(EndpointProbe::root()),
        Box::new(EndpointProbe::agent_card()),
        Box::new(EndpointProbe::health()),
        Box::new(Battery::weather_methods()),
        Box::new(Battery::protocol_methods()),
        Box::new(ErrorHandlingProbe::new()),
    ]
}

/// Checks appended by `--extended`.
pub fn extended_suite() -> Vec<Box<dyn Probe>> {
    vec![
        Box::new(EndpointProbe::extended_card()),
        Box::new(EndpointProbe::authenticated_card()),
        Box::new(Battery::status_methods()),
    ]
}

pub struct Tester {
    client: AgentClient,
    base_url: String,
    probes: Vec<Box<dyn Probe>>,
}

impl Tester {
    pub fn new(config: &TesterConfig, console: Console) -> Result<Self, ConfigError> {
        let mut probes = standard_suite();
        if config.extended {
            probes.extend(extended_suite());
        }
        Ok(Self {
            client: AgentClient::new(config, console)?,
            base_url: config.base_url.clone(),
            probes,
        })
    }

    /// Run every probe; a failure never skips the ones after it.
    pub async fn run_all(&self) -> TestRunSummary {
        let console = self.client.console();
        console.info(format!("Testing A2A Weather Agent at: {}", self.base_url));
        console.info("=".repeat(60));

        let mut summary = TestRunSummary::default();
        for probe in &self.probes {
            let name = probe.name();
            console.blank();
            console.info(format!("Running {name}..."));

            let passed = probe.run(&self.client).await;
            info!(probe = name, passed, "probe finished");
            if passed {
                console.success(format!("{name} PASSED"));
            } else {
                console.error(format!("{name} FAILED"));
            }
            console.rule('-', 40);

            summary.record(name, passed);
        }

        self.report(&summary);
        summary
    }

    fn report(&self, summary: &TestRunSummary) {
        let console = self.client.console();
        console.blank();
        console.info("=".repeat(60));
        console.info(format!(
            "Test Results: {}/{} tests passed",
            summary.passed, summary.total
        ));

        if summary.all_passed() {
            console.success("All tests passed! 🎉");
        } else {
            console.error(format!("{} tests failed", summary.failed()));
            for name in &summary.failures {
                console.detail("Failed", name);
            }
        }
    }
}
