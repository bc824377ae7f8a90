use cabfare::config::Config;
use cabfare::engine::Engine;
use cabfare::error::Error;
use cabfare::server::serve;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let engine = Engine::from_config(&config);

    serve(engine, config.bind_addr).await
}
