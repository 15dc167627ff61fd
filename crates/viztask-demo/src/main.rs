mod quad;

use anyhow::{Context, Result};

use viztask_harness::logging::{LoggingConfig, init_logging};
use viztask_harness::session::{HarnessConfig, HarnessSession};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let session = HarnessSession::new(HarnessConfig {
        title: "viztask demo".to_string(),
        ..HarnessConfig::default()
    });

    session.run(Box::new(|surface, gpu| {
        let gpu = gpu.context("quad task requires a GPU context")?;
        Ok(Box::new(quad::QuadTask::new(surface, gpu)?))
    }))
}
