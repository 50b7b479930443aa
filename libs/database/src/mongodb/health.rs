use mongodb::{Client, bson::doc};
use std::time::Instant;

use crate::common::{DatabaseError, DatabaseResult};

/// Outcome of a MongoDB `ping`
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub healthy: bool,
    /// Driver error message when unhealthy
    pub message: Option<String>,
    pub response_time_ms: u64,
}

impl HealthStatus {
    /// Turn an unhealthy status into [`DatabaseError::HealthCheckFailed`]
    pub fn into_result(self) -> DatabaseResult<Self> {
        if self.healthy {
            Ok(self)
        } else {
            Err(DatabaseError::HealthCheckFailed(
                self.message.unwrap_or_else(|| "unknown error".to_string()),
            ))
        }
    }
}

/// Ping the `admin` database, recording latency and any error message
pub async fn check_health_detailed(client: &Client) -> HealthStatus {
    let start = Instant::now();
    let result = client.database("admin").run_command(doc! { "ping": 1 }).await;
    let response_time_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(_) => HealthStatus {
            healthy: true,
            message: None,
            response_time_ms,
        },
        Err(e) => HealthStatus {
            healthy: false,
            message: Some(e.to_string()),
            response_time_ms,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_result_healthy() {
        let status = HealthStatus {
            healthy: true,
            message: None,
            response_time_ms: 3,
        };
        assert_eq!(status.into_result().unwrap().response_time_ms, 3);
    }

    #[test]
    fn test_into_result_unhealthy() {
        let status = HealthStatus {
            healthy: false,
            message: Some("connection refused".to_string()),
            response_time_ms: 30_000,
        };
        let err = status.into_result().unwrap_err();
        assert_eq!(err.to_string(), "Health check failed: connection refused");
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_check_health_detailed() {
        let client = Client::with_uri_str("mongodb://localhost:27017")
            .await
            .unwrap();
        let status = check_health_detailed(&client).await;
        assert!(status.healthy);
        assert!(status.message.is_none());
    }
}
