use baliquote_primitives::models::entities::agent::{Agent, NewAgent};
use baliquote_primitives::models::entities::client::NewClient;
use baliquote_primitives::models::entities::enum_types::CurrencyCode;
use baliquote_primitives::models::entities::exchange_rate::NewExchangeRate;
use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use dotenvy::dotenv;
use eyre::{eyre, Result};
use std::env;
use uuid::Uuid;

// Agent ids must match the identity provider's user ids, so they are
// configurable. The defaults suit a local auth emulator.
const DEFAULT_ADMIN_ID: &str = "00000000-0000-4000-8000-000000000001";
const DEFAULT_AGENT_ID: &str = "00000000-0000-4000-8000-000000000002";

/// Rupiah per unit, close to market at the time of writing.
const SEED_RATES: [(CurrencyCode, f64); 5] = [
    (CurrencyCode::USD, 16_250.0),
    (CurrencyCode::EUR, 17_600.0),
    (CurrencyCode::AUD, 10_650.0),
    (CurrencyCode::SGD, 12_400.0),
    (CurrencyCode::JPY, 108.0),
];

fn establish_connection() -> Result<PgConnection> {
    let database_url = env::var("DATABASE_URL").map_err(|_| eyre!("DATABASE_URL must be set"))?;
    PgConnection::establish(&database_url)
        .map_err(|e| eyre!("Error connecting to the database: {}", e))
}

fn seed_id(var: &str, default: &str) -> Result<Uuid> {
    let raw = env::var(var).unwrap_or_else(|_| default.to_string());
    Uuid::parse_str(&raw).map_err(|e| eyre!("{} is not a UUID: {}", var, e))
}

fn main() -> Result<()> {
    dotenv().ok();
    println!("🌱 Seeding database...");

    let mut conn = establish_connection()?;

    if env::args().any(|a| a == "--clean") {
        clean_db(&mut conn)?;
    }

    let admin_id = seed_id("SEED_ADMIN_ID", DEFAULT_ADMIN_ID)?;
    let agent_id = seed_id("SEED_AGENT_ID", DEFAULT_AGENT_ID)?;

    seed_agent(&mut conn, admin_id, "admin@baliquote.test", "Platform Admin", None, true)?;
    seed_agent(
        &mut conn,
        agent_id,
        "agent@baliquote.test",
        "Wayan Putra",
        Some("Sunrise Bali Tours"),
        false,
    )?;

    seed_client(&mut conn, agent_id, "Sarah Thompson", "sarah@example.com", Some("Australia"))?;
    seed_client(&mut conn, agent_id, "Kenji Sato", "kenji@example.com", Some("Japan"))?;

    seed_rates(&mut conn)?;

    println!("✅ Database seeded successfully!");
    Ok(())
}

fn clean_db(conn: &mut PgConnection) -> Result<()> {
    println!("🧹 Cleaning database...");
    diesel::sql_query(
        "TRUNCATE notifications, payments, quote_options, quote_days, quote_transports, \
         quote_hotels, quotes, clients, agents, exchange_rates CASCADE",
    )
    .execute(conn)?;
    Ok(())
}

fn seed_agent(
    conn: &mut PgConnection,
    id: Uuid,
    email: &str,
    full_name: &str,
    company_name: Option<&str>,
    admin: bool,
) -> Result<()> {
    use baliquote_primitives::schema::agents;

    let existing = agents::table
        .find(id)
        .select(Agent::as_select())
        .first(conn)
        .optional()?;

    if existing.is_some() {
        println!("Agent {} already exists", email);
        return Ok(());
    }

    diesel::insert_into(agents::table)
        .values(&NewAgent {
            id,
            email,
            full_name,
            company_name,
            phone: None,
            default_markup_bps: None,
        })
        .execute(conn)?;

    // seeded accounts skip the approval queue
    diesel::update(agents::table.find(id))
        .set((agents::is_approved.eq(true), agents::is_admin.eq(admin)))
        .execute(conn)?;

    println!("Created agent: {} ({})", email, id);
    Ok(())
}

fn seed_client(
    conn: &mut PgConnection,
    agent_id: Uuid,
    full_name: &str,
    email: &str,
    nationality: Option<&str>,
) -> Result<()> {
    use baliquote_primitives::schema::clients;

    let inserted = diesel::insert_into(clients::table)
        .values(&NewClient {
            agent_id,
            full_name,
            email,
            phone: None,
            nationality,
            notes: None,
        })
        .on_conflict((clients::agent_id, clients::email))
        .do_nothing()
        .execute(conn)?;

    if inserted > 0 {
        println!("Created client: {}", email);
    }
    Ok(())
}

fn seed_rates(conn: &mut PgConnection) -> Result<()> {
    use baliquote_primitives::schema::exchange_rates;

    for (currency, rate_to_idr) in SEED_RATES {
        let rate = NewExchangeRate {
            currency_code: currency,
            rate_to_idr,
            source: "seed".to_string(),
            updated_at: Utc::now(),
        };

        diesel::insert_into(exchange_rates::table)
            .values(&rate)
            .on_conflict(exchange_rates::currency_code)
            .do_update()
            .set(&rate)
            .execute(conn)?;
    }

    println!("Stored {} exchange rates", SEED_RATES.len());
    Ok(())
}
