//! Timeout wrapper for async operations.

use crate::RosterError;
use std::future::Future;
use std::time::Duration;

/// Runs an async operation, failing with `RosterError::Timeout` if it does not
/// finish within `duration`. The operation's future is dropped on expiry.
pub async fn with_timeout<Fut, T>(duration: Duration, operation: &str, fut: Fut) -> Result<T, RosterError>
where
    Fut: Future<Output = Result<T, RosterError>>,
{
    tokio::time::timeout(duration, fut)
        .await
        .map_err(|_| RosterError::Timeout(format!("{} timed out after {:?}", operation, duration)))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_timeout_success() {
        let result = with_timeout(Duration::from_secs(1), "answer", async { Ok::<_, RosterError>(42) }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_timeout_exceeded() {
        let result = with_timeout(Duration::from_millis(10), "sleep", async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok::<_, RosterError>(42)
        })
        .await;

        match result {
            Err(RosterError::Timeout(message)) => assert!(message.starts_with("sleep timed out")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_inner_error_passes_through() {
        let result: Result<(), _> = with_timeout(Duration::from_secs(1), "fail", async {
            Err(RosterError::Database("refused".to_string()))
        })
        .await;
        assert!(matches!(result, Err(RosterError::Database(_))));
    }
}
