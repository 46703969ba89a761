//! railflow: lee líneas de stdin, las pasa por la cadena de demostración
//! con un único worker y escribe un reporte JSON por línea en stdout.

use railflow::config;
use railflow::errors::CoreError;
use railflow::logging;
use railflow::pipeline::{decode_line, demo_chain, line_input, render};
use railflow::rail_core::pipe_async;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("railflow: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CoreError> {
    let cfg = config::config()?;
    logging::init(&cfg.log_level)?;
    tracing::info!(capacity = cfg.channel_capacity, addend = cfg.addend, "railflow started");

    let (tx, rx) = mpsc::channel(cfg.channel_capacity.max(1));
    let mut out = pipe_async(demo_chain(cfg.addend), rx, cfg.channel_capacity);

    let reader = tokio::spawn(async move {
        let mut stdin = BufReader::new(tokio::io::stdin());
        let mut raw = Vec::new();
        let mut read: u64 = 0;
        loop {
            raw.clear();
            if stdin.read_until(b'\n', &mut raw).await? == 0 {
                break;
            }
            if tx.send(line_input(decode_line(&raw))).await.is_err() {
                return Err(CoreError::Internal("el worker del stream terminó antes de tiempo".into()));
            }
            read += 1;
        }
        Ok::<u64, CoreError>(read)
    });

    let mut stdout = tokio::io::stdout();
    let mut written: u64 = 0;
    while let Some(outcome) = out.recv().await {
        let line = render(&outcome.report())?;
        stdout.write_all(line.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        written += 1;
    }
    stdout.flush().await?;

    let read = reader.await
                     .map_err(|e| CoreError::Internal(format!("lector de stdin abortado: {e}")))??;
    tracing::info!(read, written, "railflow finished");
    Ok(())
}
