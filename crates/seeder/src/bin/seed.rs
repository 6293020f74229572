use clap::{Parser, Subcommand};
use seeder::{AdminAccount, SampleOutcome, check_admin, seed_admin, seed_sample_category};
use sqlx::postgres::PgPoolOptions;
use storage::Database;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "seed")]
#[command(about = "Seed the awards database with an admin account and sample data", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Public origin used when printing the sample share link
    #[arg(long, env = "APP_BASE_URL", default_value = "http://localhost:3000")]
    base_url: String,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or reset the administrator account
    Admin {
        #[command(flatten)]
        account: AdminArgs,
    },
    /// Create the sample category with its four metrics
    SampleCategory {
        /// Leave the category in DRAFT instead of launching it
        #[arg(long)]
        draft: bool,
    },
    /// Admin account plus launched sample category
    All {
        #[command(flatten)]
        account: AdminArgs,
    },
    /// Check an admin email and password against the database
    CheckAdmin {
        #[arg(long)]
        email: String,

        #[arg(long, env = "ADMIN_PASSWORD")]
        password: String,
    },
}

#[derive(clap::Args)]
struct AdminArgs {
    #[arg(long, default_value = seeder::admin::DEFAULT_ADMIN_EMAIL)]
    email: String,

    #[arg(long, default_value = seeder::admin::DEFAULT_ADMIN_NAME)]
    name: String,

    #[arg(long, env = "ADMIN_PASSWORD", default_value = seeder::admin::DEFAULT_ADMIN_PASSWORD)]
    password: String,
}

impl From<AdminArgs> for AdminAccount {
    fn from(args: AdminArgs) -> Self {
        Self {
            email: args.email,
            name: args.name,
            password: args.password,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("seed={},seeder={},storage={}", log_level, log_level, log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&cli.database_url)
        .await?;
    let db = Database::from_pool(pool);
    db.run_migrations().await?;

    match cli.command {
        Commands::Admin { account } => {
            handle_admin(&db, account.into()).await?;
        }
        Commands::SampleCategory { draft } => {
            handle_sample(&db, !draft, &cli.base_url).await?;
        }
        Commands::All { account } => {
            handle_admin(&db, account.into()).await?;
            handle_sample(&db, true, &cli.base_url).await?;
            tracing::info!("Database seeded successfully");
        }
        Commands::CheckAdmin { email, password } => {
            if check_admin(db.pool(), &email, &password).await? {
                tracing::info!("Credentials for {} are valid", email);
            } else {
                tracing::warn!("Credentials for {} are not valid", email);
                db.close().await;
                std::process::exit(1);
            }
        }
    }

    db.close().await;

    Ok(())
}

async fn handle_admin(db: &Database, account: AdminAccount) -> Result<(), Box<dyn std::error::Error>> {
    let admin = seed_admin(db.pool(), &account).await?;

    tracing::info!("Admin: {} <{}>", admin.display_name(), admin.email);

    Ok(())
}

async fn handle_sample(db: &Database, launch: bool, base_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    match seed_sample_category(db.pool(), launch).await? {
        SampleOutcome::Created(detail) => {
            tracing::info!(
                "Created sample category: {} ({} metrics, {})",
                detail.category.name,
                detail.metrics.len(),
                detail.category.status
            );
            tracing::info!(
                "Submission link: {}/submit/{}",
                base_url.trim_end_matches('/'),
                detail.category.share_token
            );
        }
        SampleOutcome::AlreadyPresent => {
            tracing::info!("Sample category already exists; nothing to do");
        }
    }

    Ok(())
}
