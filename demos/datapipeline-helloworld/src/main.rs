/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use std::process;

use aws_types::os_shim_internal::Env;
use datapipeline::{Config, Region};

use structopt::StructOpt;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Debug, StructOpt)]
struct Opt {
    /// Defaults to `AWS_REGION` when not set
    #[structopt(short, long)]
    region: Option<String>,

    /// Send requests to this URL instead of the regional endpoint
    #[structopt(long)]
    endpoint_url: Option<String>,

    #[structopt(short, long)]
    verbose: bool,
}

/// Lists the pipelines in a region, following pagination markers
#[tokio::main]
async fn main() {
    let opt = Opt::from_args();

    if opt.verbose {
        println!("Data Pipeline client version: {}\n", datapipeline::PKG_VERSION);
        SubscriberBuilder::default()
            .with_env_filter("info,aws_hyper=debug,aws_endpoint=debug")
            .with_span_events(FmtSpan::CLOSE)
            .init();
    }

    let mut config = Config::builder().env(Env::real());
    if let Some(region) = opt.region {
        config = config.region(Region::new(region));
    }
    if let Some(endpoint_url) = opt.endpoint_url {
        config = config.endpoint_url(endpoint_url);
    }
    let client =
        datapipeline::Client::from_conf_conn(config.build(), aws_hyper::conn::Standard::https());

    let mut marker = None;
    loop {
        let page = match client.list_pipelines().set_marker(marker).send().await {
            Ok(page) => page,
            Err(e) => {
                println!("Got an error listing pipelines:");
                println!("{}", e);
                process::exit(1);
            }
        };
        for pipeline in page.pipeline_id_list.unwrap_or_default() {
            println!(
                "{}\t{}",
                pipeline.id.as_deref().unwrap_or("-"),
                pipeline.name.as_deref().unwrap_or("-")
            );
        }
        if page.has_more_results != Some(true) {
            break;
        }
        marker = page.marker;
    }
}
