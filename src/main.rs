use clap::Parser;

use textblast::interfaces::cli::{self, RootArgs};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();

    let args = RootArgs::parse();
    if let Err(err) = cli::run(args).await {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
