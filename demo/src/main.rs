mod settings;

use anyhow::Context;
use eventual_future::{Error, Future, TaskPool, flat_map, try_map};
use trace_err::*;
use tracing::{debug, error, info, warn};

fn listen_for_cancel(pool: &TaskPool) {
    cfg_if::cfg_if! {
        if #[cfg(unix)] {
            let mut term_handler =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .trace_expect("Failed to register signal handlers");
            let terminate = async move { term_handler.recv().await };
        } else {
            let terminate = std::future::pending::<Option<()>>();
        }
    }
    let cancel_token = pool.cancel_token().clone();
    eventual_async::spawn!(pool, "listen_for_cancel", async move {
        tokio::select! {
            _ = terminate => {
                // Signal stop
                info!("Received terminate signal, stopping...");
                cancel_token.cancel();
            }
            _ = tokio::signal::ctrl_c() => {
                // Signal stop
                info!("Received CTRL+C, stopping...");
                cancel_token.cancel();
            }
            _ = cancel_token.cancelled() => {}
        }
    });
}

// Stands in for a slow remote reading
async fn measure(operand: i64) -> Result<i64, Error> {
    tokio::time::sleep(std::time::Duration::from_millis(operand.unsigned_abs().min(1000))).await;
    Ok(operand)
}

fn product(pool: &TaskPool, operands: &[i64]) -> Future<i64> {
    let mut acc = Future::successful(pool, 1i64);
    for &operand in operands {
        let factor = Future::spawn(pool, measure(operand));
        factor.foreach(move |v| debug!(operand, "Measured {v}"));

        let p = pool.clone();
        acc = flat_map(pool, &acc, move |x| {
            try_map(&p, &factor, move |y| {
                x.checked_mul(y)
                    .ok_or_else(|| Error::msg(format!("{x} * {y} overflows")))
            })
        });
    }
    acc
}

async fn run(pool: &TaskPool, settings: &settings::Settings) -> anyhow::Result<i64> {
    let product = product(pool, &settings.operands);
    product.on_complete(|outcome| info!("Product settled: {outcome}"));

    let threshold = settings.threshold;
    product
        .filter(pool, move |v| *v >= threshold)
        .get(&settings.future)
        .await
        .with_context(|| format!("Product of {:?} not accepted", settings.operands))
}

#[tokio::main]
async fn main() {
    // Parse command line
    let Some(settings) = settings::init() else {
        return;
    };

    // Prepare for graceful shutdown
    let pool = TaskPool::new();
    listen_for_cancel(&pool);

    info!("Started successfully");

    match run(&pool, &settings).await {
        Ok(v) => info!("Product {v} meets threshold {}", settings.threshold),
        Err(e) => match e.downcast_ref::<Error>() {
            Some(Error::Unsatisfied) => {
                warn!("Product is below threshold {}", settings.threshold)
            }
            Some(Error::Cancelled) => warn!("Stopped before the product was available"),
            _ => error!("{e:#}"),
        },
    }

    // Wait for all tasks to finish
    pool.shutdown().await;

    info!("Stopped");
}
