use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

use hostelhub_cli::CliResult;
use hostelhub_cli::seeder::{self, SeedConfig};
use hostelhub_cli::super_admin::create_super_admin;
use hostelhub_config::DatabaseConfig;
use hostelhub_models::super_admins::SuperAdminSignupDto;

#[derive(Parser)]
#[command(name = "hostelhub-cli")]
#[command(about = "HostelHub CLI - Administrative tools for HostelHub", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a super-admin account
    CreateSuperAdmin {
        #[arg(short = 'u', long)]
        username: Option<String>,

        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake owners, categories, students and rents
    Seed {
        /// Number of owners to create
        #[arg(short = 'o', long, default_value = "5")]
        owners: usize,

        /// Number of categories per owner
        #[arg(long, default_value = "3")]
        categories: usize,

        /// Number of students per owner
        #[arg(long, default_value = "20")]
        students: usize,

        /// Skip billing the current month
        #[arg(long)]
        no_rents: bool,
    },
    /// Remove all seeded owners and their data
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let mut db_config = DatabaseConfig::from_env().ok_or("DATABASE_URL must be set")?;
    db_config.max_connections = db_config.max_connections.min(5);
    let pool = hostelhub_db::init_db_pool(&db_config).await?;

    match cli.command {
        Commands::CreateSuperAdmin {
            username,
            email,
            name,
            password,
        } => {
            let dto = SuperAdminSignupDto {
                username: prompt_if_missing(username, "Username")?,
                email: prompt_if_missing(email, "Email address")?,
                name: prompt_if_missing(name, "Name")?,
                password: match password {
                    Some(password) => password,
                    None => Password::new()
                        .with_prompt("Password")
                        .with_confirmation("Confirm password", "Passwords don't match")
                        .interact()?,
                },
            };

            let super_admin = create_super_admin(&pool, &dto).await?;
            println!("\n✅ Super-admin created successfully!");
            println!("   Username: {}", super_admin.username);
            println!("   Email: {}", super_admin.email);
        }
        Commands::Seed {
            owners,
            categories,
            students,
            no_rents,
        } => {
            let config = SeedConfig::new(owners)
                .with_categories(categories)
                .with_students(students)
                .with_rents(!no_rents);
            let report = seeder::seed_all(&pool, config).await?;
            println!(
                "   {} owners, {} categories, {} students, {} rents",
                report.owners, report.categories, report.students, report.rents
            );
        }
        Commands::ClearSeed => {
            seeder::clear_seed(&pool).await?;
        }
    }

    Ok(())
}

fn prompt_if_missing(value: Option<String>, prompt: &str) -> CliResult<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Input::new().with_prompt(prompt).interact_text()?),
    }
}
