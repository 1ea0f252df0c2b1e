// Copyright 2026 HybridJoin Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The `hybridjoin` binary: parses CLI flags, wires up the CSV sources and
//! sink, runs the pipeline to completion (or until Ctrl-C), and exits with
//! the status spec.md §6 calls for.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use hybridjoin_common::{init_logger, LoggerSettings, PipelineConfig};
use hybridjoin_connector::{load_customer_master, load_product_master, CsvFactSink, CsvTransactionSource};
use hybridjoin_core::{DiskBuffer, MasterLookup, Pipeline};

/// Near-real-time HYBRIDJOIN enrichment pipeline.
#[derive(Parser, Debug)]
#[command(name = "hybridjoin", version, about)]
struct Cli {
    /// Path to the transaction stream CSV.
    #[arg(long)]
    transactions: PathBuf,

    /// Path to the customer master CSV.
    #[arg(long)]
    customers: PathBuf,

    /// Path to the product master CSV.
    #[arg(long)]
    products: PathBuf,

    /// Path to the fact CSV the sink appends to.
    #[arg(long)]
    out: PathBuf,

    /// Emit one JSON object per log line instead of the human-readable format.
    #[arg(long)]
    log_json: bool,

    #[command(flatten)]
    pipeline: PipelineConfig,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(LoggerSettings::new().json(cli.log_json));

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "hybridjoin exited with an error");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let customers = load_customer_master(&cli.customers)?;
    let products = load_product_master(&cli.products)?;
    info!(
        customers = customers.len(),
        products = products.len(),
        "loaded master relations"
    );

    let master_lookup = MasterLookup::build(&products);
    let partition_size = cli.pipeline.partition_size;
    let customer_disk = DiskBuffer::new(customers, partition_size, |row| row.customer_id);
    let product_disk = DiskBuffer::new(products, partition_size, |row| row.product_id.clone());

    let source = CsvTransactionSource::open(&cli.transactions)?;
    let sink = CsvFactSink::create(&cli.out)?;

    let handle = Pipeline::spawn(source, customer_disk, product_disk, master_lookup, sink, cli.pipeline);
    let stop = handle.stop_signal();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received interrupt, requesting graceful shutdown");
            stop.cancel();
        }
    });

    let snapshot = handle.join().await?;
    info!(?snapshot, "pipeline finished");
    Ok(())
}
