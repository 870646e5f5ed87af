//! Krushi Mitra CLI
//!
//! Command-line client for the Krushi Mitra advisory platform:
//! - Sign in, register, manage the stored session
//! - Render the application pages
//! - Ask questions, answer them, look up weather, crops, and prices
//! - Approve pending experts (admin)

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use krushi_mitra::advisory::{AdvisoryClient, AdvisoryError, Fetched, LoginInput, RegisterInput};
use krushi_mitra::api::CropFilter;
use krushi_mitra::config::Config;
use krushi_mitra::pages::{self, Page};
use krushi_mitra::session::{Role, Session};

#[derive(Parser)]
#[command(name = "krushi")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Krushi Mitra - agricultural advisory client")]
#[command(
    long_about = "Client for the Krushi Mitra advisory platform.\nWorks against the live backend and falls back to a built-in offline dataset when it is unreachable."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Backend API base URL (overrides config)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Directory for the session and offline ledger (overrides config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format for lookup commands (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in
    Login {
        email: String,
        password: String,
        /// Role used when the backend is unreachable and the login is
        /// fabricated locally
        #[arg(short, long, default_value = "FARMER", value_parser = parse_role)]
        role: Role,
    },

    /// Sign in to the admin console
    AdminLogin { email: String, password: String },

    /// Create an account
    Register {
        /// Full name ("First Last")
        name: String,
        email: String,
        password: String,
        #[arg(short, long, default_value = "FARMER", value_parser = parse_role)]
        role: Role,
        /// Area of expertise (experts)
        #[arg(long)]
        expertise: Option<String>,
        /// Qualifications (experts)
        #[arg(long)]
        qualifications: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// Farm size (farmers)
        #[arg(long)]
        farm_size: Option<String>,
        /// Primary crops (farmers)
        #[arg(long)]
        primary_crops: Option<String>,
    },

    /// Request a password reset link
    ForgotPassword { email: String },

    /// Sign out
    Logout,

    /// Show the stored session
    Whoami,

    /// Render a page (dashboard, qa, market, schemes, admin)
    Page { name: String },

    /// Post a question to the forum
    Ask {
        /// Question text; the first 100 characters become the title
        text: String,
    },

    /// Answer a forum question
    Answer { question_id: u64, text: String },

    /// Current weather for a city
    Weather { city: String },

    /// Search crop recommendations
    Crops {
        #[arg(short, long)]
        season: String,
        #[arg(long)]
        soil: String,
        #[arg(long)]
        climate: Option<String>,
    },

    /// Market prices, optionally for one commodity
    Prices {
        #[arg(short, long)]
        commodity: Option<String>,
    },

    /// Approve a pending expert (admin)
    ApproveExpert { id: u64 },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_role(s: &str) -> Result<Role, String> {
    Role::parse(s).ok_or_else(|| format!("unknown role: {} (FARMER, EXPERT, ADMIN, VISITOR)", s))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_default();
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = dir.to_string_lossy().to_string();
    }

    init_logging(&config);

    // `config` needs no client and must work with no backend and no store.
    if let Commands::Config { output } = &cli.command {
        let rendered = krushi_mitra::config::generate_default_config();
        match output {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, &rendered)?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", rendered),
        }
        return Ok(());
    }

    let client = AdvisoryClient::new(&config)?;

    let outcome = run_command(&cli, &client, &config).await;
    if let Err(err) = outcome {
        report_error(&err);
        std::process::exit(1);
    }

    Ok(())
}

async fn run_command(cli: &Cli, client: &AdvisoryClient, config: &Config) -> Result<(), AdvisoryError> {
    match &cli.command {
        Commands::Login { email, password, role } => {
            let input = LoginInput {
                email: email.clone(),
                password: password.clone(),
                role: *role,
            };
            let session = client.login(&input).await?;
            if session.is_mock() {
                println!("Login successful! Welcome back!");
            }
            print_signed_in(&session.data);
        }

        Commands::AdminLogin { email, password } => {
            let session = client.admin_login(email, password).await?;
            if session.is_mock() {
                println!("Admin login successful!");
            }
            print_signed_in(&session.data);
        }

        Commands::Register {
            name,
            email,
            password,
            role,
            expertise,
            qualifications,
            phone,
            farm_size,
            primary_crops,
        } => {
            let input = RegisterInput {
                name: name.clone(),
                email: email.clone(),
                password: password.clone(),
                role: *role,
                expertise: expertise.clone(),
                qualifications: qualifications.clone(),
                phone_number: phone.clone(),
                farm_size: farm_size.clone(),
                primary_crops: primary_crops.clone(),
            };
            let session = client.register(&input).await?;
            println!("Registration successful! Welcome to Krushi Mitra!");
            print_signed_in(&session.data);
        }

        Commands::ForgotPassword { email } => {
            client.forgot_password(email).await?;
            println!("If the email is registered, a reset link has been sent.");
        }

        Commands::Logout => {
            client.logout()?;
            println!("Logged out successfully");
        }

        Commands::Whoami => match client.current_session() {
            Some(session) => {
                println!("{} <{}>", session.user.full_name(), session.user.email);
                println!("Role: {}", session.user.role);
            }
            None => println!("Not signed in."),
        },

        Commands::Page { name } => match Page::parse(name) {
            Some(page) => pages::run(page, client, config).await?,
            None => println!("No page bound for '{}'", name),
        },

        Commands::Ask { text } => {
            client.ask_question(text).await?;
            println!("Question posted.");
        }

        Commands::Answer { question_id, text } => {
            client.submit_answer(*question_id, text).await?;
            println!("Answer submitted successfully!");
        }

        Commands::Weather { city } => {
            let weather = client.weather(city).await;
            if cli.format == "json" {
                print_json(&weather)?;
            } else {
                let report = &weather.data;
                let temp = report
                    .temperature
                    .map(|t| format!("{:.0}°C", t))
                    .unwrap_or_else(|| "-".to_string());
                println!("{} • {} • {}", report.city, temp, report.condition);
                if let Some(humidity) = report.humidity {
                    println!("Humidity: {:.0}%", humidity);
                }
                if let Some(wind) = report.wind_speed {
                    println!("Wind: {:.1} m/s", wind);
                }
            }
        }

        Commands::Crops { season, soil, climate } => {
            let filter = CropFilter {
                season: season.clone(),
                soil_type: soil.clone(),
                climate: climate.clone(),
            };
            let crops = client.recommend_crops(&filter).await?;
            if cli.format == "json" {
                print_json(&crops)?;
            } else if crops.data.is_empty() {
                println!("No crops found for the selected criteria");
            } else {
                for crop in &crops.data {
                    println!("{:<22} {}", crop.name, crop.description);
                    if let Some(season) = &crop.season {
                        println!("{:<22} Season: {}", "", season);
                    }
                    if let Some(soil) = &crop.soil_type {
                        println!("{:<22} Soil: {}", "", soil);
                    }
                    if let Some(duration) = &crop.growth_duration {
                        println!("{:<22} Duration: {}", "", duration);
                    }
                }
            }
        }

        Commands::Prices { commodity } => {
            let prices = client.market_prices(commodity.as_deref()).await;
            if cli.format == "json" {
                print_json(&prices)?;
            } else if prices.data.is_empty() {
                println!("No market prices found");
            } else {
                println!("{:<16} {:<14} {}", "Commodity", "Price", "Mandi");
                for price in &prices.data {
                    println!("{:<16} ₹{:<13} {}", price.commodity, price.price, price.market);
                }
            }
        }

        Commands::ApproveExpert { id } => {
            let pending = client.pending_experts().await;
            let remaining = client.approve_expert(*id, pending.data).await?;
            println!("Expert approved.");
            if remaining.data.is_empty() {
                println!("No pending experts");
            } else {
                println!("Still pending:");
                for expert in &remaining.data {
                    println!(
                        "#{:<4} {} {} • {}",
                        expert.id, expert.first_name, expert.last_name, expert.email
                    );
                }
            }
        }

        Commands::Config { .. } => unreachable!("handled before client construction"),
    }

    Ok(())
}

fn print_signed_in(session: &Session) {
    println!(
        "Signed in as {} ({})",
        session.user.full_name(),
        session.user.role
    );
    println!(
        "Next: krushi page {}",
        Page::for_role(session.user.role).name()
    );
}

fn print_json<T: serde::Serialize>(fetched: &Fetched<T>) -> Result<(), AdvisoryError> {
    let rendered = serde_json::to_string_pretty(&serde_json::json!({
        "source": match fetched.source {
            krushi_mitra::advisory::DataSource::Live => "live",
            krushi_mitra::advisory::DataSource::Mock => "mock",
        },
        "data": serde_json::to_value(&fetched.data).unwrap_or_default(),
    }))
    .unwrap_or_default();
    println!("{}", rendered);
    Ok(())
}

fn report_error(err: &AdvisoryError) {
    match err {
        AdvisoryError::Validation(fields) => {
            for field in fields {
                eprintln!("{}", field);
            }
        }
        other => eprintln!("{}", other),
    }
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("krushi={}", config.logging.level)),
    );

    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
