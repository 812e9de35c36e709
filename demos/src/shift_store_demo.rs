use dotenv::dotenv;
use roster_client::prelude::*;
use std::env;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roster_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Token file written by whoever logged in; ROSTER_TOKEN seeds it
    let token_path =
        env::var("ROSTER_TOKEN_FILE").unwrap_or_else(|_| "roster-storage.json".to_string());
    let tokens = Arc::new(FileTokenStore::new(&token_path));
    println!("Reading token from {}", tokens.path().display());
    if let Ok(token) = env::var("ROSTER_TOKEN") {
        tokens.set("authToken", &token).await?;
    }

    let roster = Roster::from_env()?.with_token_store(tokens);
    println!("Using API at {}", roster.client.base_url());

    let store = roster.shift_store();

    let mut changes = store.subscribe();
    let watcher = tokio::spawn(async move {
        while changes.changed().await.is_ok() {
            let state = changes.borrow_and_update().clone();
            println!(
                "[store] {} shift(s), loading: {}",
                state.shifts.len(),
                state.is_loading
            );
        }
    });

    println!("Fetching shifts");
    if let Err(e) = store.fetch_shifts().await {
        println!("Fetch failed: {}", e);
    }

    println!("Creating a shift");
    let created = match store
        .create_shift(&NewShift::new("Demo shift", "06:00:00", "14:00:00"))
        .await
    {
        Ok(shift) => shift,
        Err(e) => {
            println!("Create failed: {}", e);
            return Ok(());
        }
    };
    println!("Created {:?}", created);

    println!("Renaming it");
    let mut renamed = created.clone();
    renamed.name = "Demo shift (renamed)".to_string();
    if let Err(e) = store.update_shift(&renamed).await {
        println!("Update failed: {}", e);
    }

    println!("Deleting it");
    if let Err(e) = store.delete_shift(&created.id).await {
        println!("Delete failed: {}", e);
    }

    for shift in store.shifts() {
        println!("  {} {} {}-{}", shift.id, shift.name, shift.start_time, shift.end_time);
    }

    drop(store);
    watcher.await?;

    Ok(())
}
