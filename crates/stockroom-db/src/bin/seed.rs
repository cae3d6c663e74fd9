//! # Seed Data Generator
//!
//! Populates the database with the starter accounts and catalog for
//! development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p stockroom-db --bin seed
//!
//! # Specify database path
//! cargo run -p stockroom-db --bin seed -- --db ./data/stockroom.db
//! ```
//!
//! ## Seeded Data
//! - Three accounts: admin, user1, manager (passwords printed below)
//! - Eight catalog items across Electronics, Stationery and Accessories
//!
//! Seeding is idempotent: rows whose username or item name already exists
//! are skipped, so re-running against a live database is safe.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher};
use std::env;
use stockroom_core::{NewItem, Role};
use stockroom_db::{Database, DbConfig};

/// Starter accounts: (username, email, password, role).
const USERS: &[(&str, &str, &str, Role)] = &[
    ("admin", "admin@example.com", "admin123", Role::Admin),
    ("user1", "user1@example.com", "password1", Role::User),
    ("manager", "manager@example.com", "manager123", Role::User),
];

/// Starter catalog: (name, category, quantity, price in cents).
const ITEMS: &[(&str, &str, i64, i64)] = &[
    ("Laptop", "Electronics", 10, 5_500_000),
    ("Mouse", "Electronics", 50, 49_900),
    ("Keyboard", "Electronics", 40, 129_900),
    ("Notebook", "Stationery", 100, 4_500),
    ("Pen", "Stationery", 200, 1_000),
    ("Water Bottle", "Accessories", 30, 25_000),
    ("Headphones", "Electronics", 20, 220_000),
    ("Bag", "Accessories", 15, 120_000),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./data/stockroom.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Stockroom Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./data/stockroom.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Stockroom Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_path);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");
    println!();

    // Seed accounts
    println!("Seeding accounts...");
    let argon2 = Argon2::default();

    for (username, email, password, role) in USERS {
        if db.users().identity_taken(username, email).await? {
            println!("  ⚠ {} already exists, skipping", username);
            continue;
        }

        let salt = SaltString::generate(&mut OsRng);
        let digest = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| format!("failed to hash password for {}: {}", username, e))?
            .to_string();

        db.users().insert(username, email, &digest, *role).await?;
        println!("  ✓ {} ({:?}, password: {})", username, role, password);
    }

    // Seed catalog
    println!();
    println!("Seeding catalog...");

    for (name, category, quantity, price_cents) in ITEMS {
        if db.items().name_exists(name).await? {
            println!("  ⚠ {} already exists, skipping", name);
            continue;
        }

        db.items()
            .insert(&NewItem {
                name: name.to_string(),
                category: Some(category.to_string()),
                quantity: *quantity,
                price_cents: *price_cents,
            })
            .await?;
        println!("  ✓ {} ({}, qty {})", name, category, quantity);
    }

    let total = db.items().count().await?;
    println!();
    println!("✓ Seed complete! Catalog has {} items.", total);

    Ok(())
}
