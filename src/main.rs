#[tokio::main]
async fn main() {
    if let Err(e) = echoremedy_lib::run().await {
        tracing::error!(error = %e, "EchoRemedy failed to start");
        eprintln!("echoremedy: {e}");
        std::process::exit(1);
    }
}
