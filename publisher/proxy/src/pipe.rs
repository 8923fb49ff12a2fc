//! Line-oriented event pipe: one JSON event per input line, one cleaned
//! JSON event per output line.

use abstractbuilder::{CloudEventBuilder, Event};
use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn, Span};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PipeStats {
    pub built: u64,
    pub rejected: u64,
    /// Subset of `rejected` a caller could try again later.
    pub retryable: u64,
}

/// Runs until `reader` hits EOF or `shutdown` is cancelled. Output is
/// flushed on both paths, and the counts so far are returned.
pub async fn run<R, W>(
    builder: &dyn CloudEventBuilder,
    reader: R,
    mut writer: W,
    logger: &Span,
    shutdown: CancellationToken,
) -> Result<PipeStats>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut stats = PipeStats::default();

    loop {
        let line = tokio::select! {
            biased;
            _ = shutdown.cancelled() => {
                debug!(parent: logger, "pipe cancelled");
                break;
            }
            line = lines.next_line() => line.context("failed to read event")?,
        };
        let Some(line) = line else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let event: Event = match serde_json::from_str(line) {
            Ok(event) => event,
            Err(err) => {
                warn!(parent: logger, error = %err, "dropping undecodable event");
                stats.rejected += 1;
                continue;
            }
        };

        match builder.build(&event).await {
            Ok(built) => {
                let mut out = serde_json::to_vec(&built).context("failed to encode event")?;
                out.push(b'\n');
                writer.write_all(&out).await.context("failed to write event")?;
                debug!(parent: logger, id = %built.id, event_type = %built.ty, "event built");
                stats.built += 1;
            }
            Err(err) => {
                warn!(
                    parent: logger,
                    id = %event.id,
                    source = %event.source,
                    event_type = %event.ty,
                    retryable = err.is_retryable(),
                    error = %err,
                    "rejecting event"
                );
                stats.rejected += 1;
                if err.is_retryable() {
                    stats.retryable += 1;
                }
            }
        }
    }

    writer.flush().await.context("failed to flush output")?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use abstractbuilder::{ApplicationLister, BuildError, NoopResolver};
    use async_trait::async_trait;
    use backends::{new_builder, BackendType, BuilderOptions};
    use std::sync::Arc;
    use tokio::io::{BufReader, BufWriter};

    fn options() -> BuilderOptions {
        BuilderOptions {
            type_prefix: "sap.kyma.custom".to_string(),
            event_mesh_namespace: None,
        }
    }

    fn generic_builder() -> Arc<dyn CloudEventBuilder> {
        new_builder(BackendType::Generic, &options(), Arc::new(NoopResolver), Span::none()).unwrap()
    }

    /// Delegates to a real builder and cancels `shutdown` after each build.
    struct CancelAfterBuild {
        inner: Arc<dyn CloudEventBuilder>,
        shutdown: CancellationToken,
    }

    #[async_trait]
    impl CloudEventBuilder for CancelAfterBuild {
        async fn build(&self, event: &Event) -> Result<Event, BuildError> {
            let built = self.inner.build(event).await;
            self.shutdown.cancel();
            built
        }
    }

    #[tokio::test]
    async fn test_pipe_builds_and_rejects() {
        let builder = generic_builder();
        let input = concat!(
            r#"{"id":"1","source":"my-app","type":"order.created.v1","data":{"n":1}}"#,
            "\n\n",
            "not json\n",
            r#"{"id":"2","source":"%","type":"order.created.v1"}"#,
            "\n",
            r#"{"id":"3","source":"Order%20Service","type":"order.created.v1"}"#,
            "\n",
        );
        let mut output = Vec::new();

        let stats = run(
            builder.as_ref(),
            input.as_bytes(),
            &mut output,
            &Span::none(),
            CancellationToken::new(),
        )
        .await
        .unwrap();
        assert_eq!(stats, PipeStats { built: 2, rejected: 2, retryable: 0 });

        let events: Vec<Event> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, "1");
        assert_eq!(events[0].ty, "sap.kyma.custom.my-app.order.created.v1");
        assert_eq!(events[0].data, Some(serde_json::json!({"n": 1})));
        assert_eq!(events[1].ty, "sap.kyma.custom.order-service.order.created.v1");
    }

    #[tokio::test]
    async fn test_unsynced_registry_is_counted_as_retryable() {
        let resolver = Arc::new(ApplicationLister::new());
        let builder = new_builder(BackendType::Nats, &options(), resolver, Span::none()).unwrap();
        let input = r#"{"source":"my-app","type":"order.created.v1"}"#;
        let mut output = Vec::new();

        let stats = run(
            builder.as_ref(),
            input.as_bytes(),
            &mut output,
            &Span::none(),
            CancellationToken::new(),
        )
        .await
        .unwrap();
        assert_eq!(stats, PipeStats { built: 0, rejected: 1, retryable: 1 });
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn test_shutdown_while_input_open_flushes_and_returns_stats() {
        let shutdown = CancellationToken::new();
        let builder = CancelAfterBuild {
            inner: generic_builder(),
            shutdown: shutdown.clone(),
        };

        // The writer half stays open, so only the token can end the pipe.
        let (mut input_tx, input_rx) = tokio::io::duplex(1024);
        input_tx
            .write_all(b"{\"id\":\"1\",\"source\":\"my-app\",\"type\":\"order.created.v1\"}\n")
            .await
            .unwrap();
        let mut output = BufWriter::new(Vec::new());

        let stats = run(
            &builder,
            BufReader::new(input_rx),
            &mut output,
            &Span::none(),
            shutdown.clone(),
        )
        .await
        .unwrap();
        assert!(shutdown.is_cancelled());
        assert_eq!(stats, PipeStats { built: 1, rejected: 0, retryable: 0 });

        let written = String::from_utf8(output.get_ref().clone()).unwrap();
        let event: Event = serde_json::from_str(written.trim_end()).unwrap();
        assert_eq!(event.ty, "sap.kyma.custom.my-app.order.created.v1");
        drop(input_tx);
    }

    #[tokio::test]
    async fn test_cancelled_before_start_reads_nothing() {
        let shutdown = CancellationToken::new();
        shutdown.cancel();
        let input = r#"{"source":"my-app","type":"order.created.v1"}"#;
        let mut output = Vec::new();

        let stats =
            run(generic_builder().as_ref(), input.as_bytes(), &mut output, &Span::none(), shutdown)
                .await
                .unwrap();
        assert_eq!(stats, PipeStats::default());
        assert!(output.is_empty());
    }
}
