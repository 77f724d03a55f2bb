use image_gallery::{Config, IdentityResolver, PostgresVoteStore, VoteStore};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--require-db]\n\
         \n\
         Reads env vars (all optional):\n\
           DATABASE_URL, DB_MAX_CONNECTIONS, BIND_ADDR,\n\
           IP_LOOKUP_URL, IP_LOOKUP_TIMEOUT_SECS, SEED_GALLERY\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let require_db = args.iter().any(|a| a == "--require-db");

    // Force-read config (nice error messages if malformed)
    let config = Config::from_env()?;

    println!("> Preflight:");
    println!("  BIND_ADDR={}", config.bind_addr);
    println!("  IP_LOOKUP_URL={}", config.ip_lookup_url);
    println!("  IP_LOOKUP_TIMEOUT_SECS={}", config.ip_lookup_timeout.as_secs());
    println!("  SEED_GALLERY={}", config.seed_gallery);

    // Vote ledger
    match config.database_url.as_deref() {
        Some(url) => {
            let store = PostgresVoteStore::connect(url, config.db_max_connections).await?;
            store.ping().await?;
            let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM image_votes")
                .fetch_one(store.pool())
                .await?;
            println!("  Vote ledger: Postgres reachable, image_votes has {} rows.", rows);
        }
        None if require_db => {
            return Err(anyhow::anyhow!(
                "DATABASE_URL is not set but --require-db was given"
            ));
        }
        None => {
            println!("  Vote ledger: DATABASE_URL not set, server will use the in-memory store.");
        }
    }

    // Identity lookup
    let resolver = IdentityResolver::http(config.ip_lookup_url.clone(), config.ip_lookup_timeout)?;
    let identity = resolver.resolve().await;
    if identity.is_fallback() {
        eprintln!(
            "  Warning: IP lookup failed; votes would be cast as fallback identity {}",
            identity
        );
    } else {
        println!("  IP lookup OK: identity {}", identity);
    }

    println!("> Preflight OK.");
    Ok(())
}
