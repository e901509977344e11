//! Health reporting for the running service
//!
//! Components register [`HealthCheck`]s with a [`HealthChecker`]; the server
//! runs them for `GET /health` and folds the results into one
//! [`HealthReport`]. A failing optional dependency (the remote nutrition
//! lookup) degrades the report without making it unhealthy.

use crate::retry::{CircuitBreaker, CircuitState};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Health check status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// All checks passed
    Healthy,
    /// Some optional checks failed
    Degraded,
    /// Required checks failed
    Unhealthy,
}

impl HealthStatus {
    /// Returns true if status is healthy
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }

    /// Returns true if status is healthy or degraded (still operational)
    #[must_use]
    pub fn is_operational(&self) -> bool {
        matches!(self, HealthStatus::Healthy | HealthStatus::Degraded)
    }
}

/// Individual health check result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Name of the check
    pub name: String,
    /// Status of the check
    pub status: HealthStatus,
    /// Optional message with details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Duration of the check in milliseconds
    pub duration_ms: u64,
    /// Additional details as key-value pairs
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub details: HashMap<String, String>,
}

impl CheckResult {
    fn with_status(name: impl Into<String>, status: HealthStatus, message: Option<String>) -> Self {
        Self {
            name: name.into(),
            status,
            message,
            duration_ms: 0,
            details: HashMap::new(),
        }
    }

    /// Create a healthy check result
    pub fn healthy(name: impl Into<String>) -> Self {
        Self::with_status(name, HealthStatus::Healthy, None)
    }

    /// Create an unhealthy check result with a message
    pub fn unhealthy(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_status(name, HealthStatus::Unhealthy, Some(message.into()))
    }

    /// Create a degraded check result with a message
    pub fn degraded(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_status(name, HealthStatus::Degraded, Some(message.into()))
    }

    /// Set the duration of the check
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Add a detail key-value pair
    #[must_use]
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

/// Overall health report containing all check results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// Overall status based on all checks
    pub status: HealthStatus,
    /// Individual check results
    pub checks: Vec<CheckResult>,
    /// Total duration of all checks in milliseconds
    pub total_duration_ms: u64,
    /// Timestamp when the report was generated
    pub timestamp: String,
}

impl HealthReport {
    /// Create a new health report from check results
    #[must_use]
    pub fn new(checks: Vec<CheckResult>, duration: Duration) -> Self {
        let status = if checks.iter().all(|c| c.status.is_healthy()) {
            HealthStatus::Healthy
        } else if checks.iter().any(|c| c.status == HealthStatus::Unhealthy) {
            HealthStatus::Unhealthy
        } else {
            HealthStatus::Degraded
        };

        Self {
            status,
            checks,
            total_duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Returns true if overall status is healthy
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status.is_healthy()
    }

    /// Get all checks that failed (not healthy)
    #[must_use]
    pub fn failed_checks(&self) -> Vec<&CheckResult> {
        self.checks
            .iter()
            .filter(|c| !c.status.is_healthy())
            .collect()
    }
}

/// Trait for implementing health checks
pub trait HealthCheck: Send + Sync {
    /// Perform the health check and return a result
    fn check(&self) -> CheckResult;
}

/// Health checker with registered checks
#[derive(Default)]
pub struct HealthChecker {
    checks: Vec<Box<dyn HealthCheck>>,
}

impl HealthChecker {
    /// Create a new health checker with no checks
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a health check
    #[must_use]
    pub fn add_check(mut self, check: impl HealthCheck + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Number of registered checks
    #[must_use]
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Whether no checks are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Run all health checks
    #[must_use]
    pub fn run(&self) -> HealthReport {
        let start = Instant::now();
        let results = self
            .checks
            .iter()
            .map(|check| {
                let check_start = Instant::now();
                check.check().with_duration(check_start.elapsed())
            })
            .collect();

        HealthReport::new(results, start.elapsed())
    }
}

/// Check backed by a closure
pub struct FnCheck<F> {
    f: F,
}

impl<F> FnCheck<F>
where
    F: Fn() -> CheckResult + Send + Sync,
{
    /// Wrap a closure as a health check
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> HealthCheck for FnCheck<F>
where
    F: Fn() -> CheckResult + Send + Sync,
{
    fn check(&self) -> CheckResult {
        (self.f)()
    }
}

/// Reports the state of an upstream's circuit breaker
///
/// An open circuit means the upstream is being skipped; that is reported as
/// degraded since callers fall back to local data.
pub struct CircuitBreakerCheck {
    name: String,
    breaker: Arc<CircuitBreaker>,
}

impl CircuitBreakerCheck {
    /// Create a check for the named upstream
    pub fn new(name: impl Into<String>, breaker: Arc<CircuitBreaker>) -> Self {
        Self {
            name: name.into(),
            breaker,
        }
    }
}

impl HealthCheck for CircuitBreakerCheck {
    fn check(&self) -> CheckResult {
        let state = self.breaker.state();
        let label = match state {
            CircuitState::Closed => "closed",
            CircuitState::Open => "open",
            CircuitState::HalfOpen => "half_open",
        };
        let result = if state == CircuitState::Open {
            CheckResult::degraded(&self.name, "upstream circuit is open")
        } else {
            CheckResult::healthy(&self.name)
        };
        result.with_detail("circuit", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::CircuitBreakerConfig;

    #[test]
    fn test_health_report() {
        let checks = vec![CheckResult::healthy("check1"), CheckResult::healthy("check2")];
        let report = HealthReport::new(checks, Duration::from_millis(100));
        assert!(report.is_healthy());
        assert_eq!(report.total_duration_ms, 100);
    }

    #[test]
    fn test_health_report_with_failure() {
        let checks = vec![
            CheckResult::healthy("check1"),
            CheckResult::unhealthy("check2", "Failed"),
        ];
        let report = HealthReport::new(checks, Duration::from_millis(100));
        assert!(!report.is_healthy());
        assert_eq!(report.status, HealthStatus::Unhealthy);
        assert_eq!(report.failed_checks().len(), 1);
    }

    #[test]
    fn test_degraded_is_operational() {
        let checks = vec![
            CheckResult::healthy("reference_table"),
            CheckResult::degraded("usda", "slow"),
        ];
        let report = HealthReport::new(checks, Duration::ZERO);
        assert_eq!(report.status, HealthStatus::Degraded);
        assert!(report.status.is_operational());
    }

    #[test]
    fn test_checker_runs_closures() {
        let checker = HealthChecker::new()
            .add_check(FnCheck::new(|| CheckResult::healthy("a").with_detail("entries", "45")));
        assert_eq!(checker.len(), 1);

        let report = checker.run();
        assert!(report.is_healthy());
        assert_eq!(report.checks[0].details["entries"], "45");
    }

    #[test]
    fn test_circuit_breaker_check() {
        let breaker = Arc::new(CircuitBreaker::new(CircuitBreakerConfig {
            failure_threshold: 1,
            ..Default::default()
        }));
        let check = CircuitBreakerCheck::new("usda", Arc::clone(&breaker));
        assert_eq!(check.check().status, HealthStatus::Healthy);

        breaker.record_failure();
        let result = check.check();
        assert_eq!(result.status, HealthStatus::Degraded);
        assert_eq!(result.details["circuit"], "open");
    }
}
