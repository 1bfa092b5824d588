#![allow(
    clippy::missing_errors_doc,
    dead_code,
    missing_docs,
    clippy::expect_used
)]
use rstest::fixture;
use tracing::info;

mod stub_gateway;
pub use self::stub_gateway::*;

pub fn init_tracing() {
    // should be run once, fail otherwise, we skip that error
    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    info!("Tracing initialized");
}

#[fixture]
pub async fn gateway() -> StubGateway {
    init_tracing();
    match StubGateway::start().await {
        Ok(gateway) => gateway,
        Err(error) => {
            panic!("fail to start stub gateway: {error:?}");
        }
    }
}
