use clap::Parser;
use flashdeck::db::Db;
use flashdeck::services::auth::AuthService;
use flashdeck::services::token::TokenIssuer;
use flashdeck::AppState;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// libSQL server address, e.g. `file:flashdeck.db` or a Turso URL.
    #[clap(env)]
    url: String,

    /// libSQL authentication token (unused for local files).
    #[clap(env, default_value = "")]
    auth_token: String,

    /// The address to bind to.
    #[arg(short, long, env, default_value = "127.0.0.1:1991")]
    address: String,

    /// JWT signing secret.
    #[arg(
        long,
        env,
        default_value = "default-secret-key-change-this-in-production"
    )]
    jwt_secret: String,

    /// JWT issuer claim.
    #[arg(long, env, default_value = "flashdeck")]
    jwt_issuer: String,

    /// JWT audience claim.
    #[arg(long, env, default_value = "flashdeck-client")]
    jwt_audience: String,

    /// Token lifetime in minutes.
    #[arg(long, env, default_value_t = 60)]
    jwt_expiry_minutes: i64,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "tracing=info,flashdeck=debug".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .init();

    let args = Args::parse();

    let db = Db::new(args.url, args.auth_token).await?;
    let tokens = TokenIssuer::new(
        args.jwt_secret,
        args.jwt_issuer,
        args.jwt_audience,
        args.jwt_expiry_minutes,
    );
    let auth = AuthService::new(db.clone(), tokens.clone());

    let router = flashdeck::router(AppState { db, auth, tokens });

    let address = args.address.parse::<std::net::SocketAddr>()?;
    tracing::info!("listening on {address}");
    let listener = tokio::net::TcpListener::bind(address).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
