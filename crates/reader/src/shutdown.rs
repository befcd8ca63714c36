//! Ctrl-C handling around a running batch

use std::future::Future;

use anyhow::anyhow;
use tracing::warn;

/// Run `batch` to completion unless `interrupt` resolves first.
///
/// An interrupted batch is an error so the process exits non-zero and no
/// partial report is printed.
pub async fn run_until_interrupted<T, I>(
    batch: impl Future<Output = T>,
    interrupt: impl Future<Output = I>,
) -> anyhow::Result<T> {
    tokio::select! {
        outcome = batch => Ok(outcome),
        _ = interrupt => {
            warn!("Interrupted before the batch completed");
            Err(anyhow!("interrupted before the batch completed"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future;
    use std::time::Duration;

    #[tokio::test]
    async fn test_completed_batch() {
        let result = run_until_interrupted(async { 3 }, future::pending::<()>()).await;
        assert_eq!(result.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_interrupted_batch_is_an_error() {
        let batch = async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            3
        };
        let result = run_until_interrupted(batch, future::ready(())).await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("interrupted"));
    }
}
