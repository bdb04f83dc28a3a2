use std::process::ExitCode;

use my_application::app;

#[tokio::main]
async fn main() -> ExitCode {
    app::start(|key| std::env::var(key).ok()).await.into()
}
