use std::time::Duration;

use async_trait::async_trait;
use eyre::{Result, WrapErr, eyre};
use rollcall_core::{
    errors::ScheduleResult,
    models::{CheckConflictRequest, CheckConflictResponse, ConflictReport, Schedule},
};
use tracing::{debug, warn};

use crate::config::ClientConfig;

/// Asks whether a schedule overlaps other classes.
///
/// Implementations must never fail: when the answer cannot be obtained
/// they report no conflict, so a flaky check never blocks a save.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConflictChecker: Send + Sync {
    async fn check_conflicts(&self, schedule: &Schedule) -> ConflictReport;
}

/// Conflict checker backed by the admin panel's REST endpoint.
#[derive(Debug, Clone)]
pub struct HttpConflictChecker {
    client: reqwest::Client,
    endpoint: String,
    room_number: Option<String>,
    instructor_id: Option<i64>,
}

impl HttpConflictChecker {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .wrap_err("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            room_number: None,
            instructor_id: None,
        })
    }

    /// Builds a checker from configuration, or `None` when no endpoint is configured.
    pub fn from_config(config: &ClientConfig) -> Result<Option<Self>> {
        let Some(url) = &config.conflict_check_url else {
            return Ok(None);
        };

        let mut checker = Self::new(url.clone(), config.timeout())?;
        checker.room_number = config.room_number.clone();
        checker.instructor_id = config.instructor_id;
        Ok(Some(checker))
    }

    pub fn with_room_number(mut self, room_number: impl Into<String>) -> Self {
        self.room_number = Some(room_number.into());
        self
    }

    pub fn with_instructor_id(mut self, instructor_id: i64) -> Self {
        self.instructor_id = Some(instructor_id);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, schedule: String) -> Result<CheckConflictResponse> {
        let request = CheckConflictRequest {
            schedule,
            room_number: self.room_number.clone(),
            instructor_id: self.instructor_id,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .wrap_err("Conflict check request failed")?;

        let status = response.status();
        if status.is_server_error() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(eyre!("Conflict check failed with status {}: {}", status, error_text));
        }

        // A 400 still carries `success: false` and a reason, so the body is
        // read for every non-5xx status.
        response
            .json::<CheckConflictResponse>()
            .await
            .wrap_err_with(|| format!("Invalid conflict check response (status {})", status))
    }

    /// Runs the check without the fail-open fallback.
    pub async fn try_check(&self, schedule: &Schedule) -> ScheduleResult<ConflictReport> {
        if schedule.is_empty() {
            return Ok(ConflictReport::clear());
        }

        let response = self.send(schedule.format()).await?;
        Ok(response.into())
    }
}

#[async_trait]
impl ConflictChecker for HttpConflictChecker {
    async fn check_conflicts(&self, schedule: &Schedule) -> ConflictReport {
        match self.try_check(schedule).await {
            Ok(report) => {
                debug!(
                    has_conflict = report.has_conflict,
                    message = %report.message,
                    "Conflict check finished"
                );
                report
            }
            Err(err) => {
                warn!(error = %err, endpoint = %self.endpoint, "Conflict check unavailable, continuing");
                ConflictReport::fail_open(format!("Could not check for schedule conflicts: {}", err))
            }
        }
    }
}
