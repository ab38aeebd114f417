//! List segments example.
//!
//! Prints the accounts the token represents, the tracking pixels and every
//! segment with its status.
//!
//! Run with: cargo run --example list_segments [token]
//!
//! The token is read from `YANDEX_AUDIENCE_TOKEN`; the first argument is
//! used when the variable is not set.

use yandex_audience::models::{Segment, SegmentKind};
use yandex_audience::AudienceClient;

#[tokio::main]
async fn main() -> yandex_audience::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let fallback = std::env::args().nth(1);
    let client = AudienceClient::from_env(fallback.as_deref())?;

    let accounts = client.accounts().list().await?;
    println!("Represents {} account(s):", accounts.len());
    for account in &accounts {
        println!("  - {} ({:?})", account.user_login, account.perm);
    }

    let pixels = client.pixels().list().await?;
    println!("\nFound {} pixel(s):", pixels.len());
    for pixel in &pixels {
        println!(
            "  - [{}] {}: {} / {} / {} users in 7 / 30 / 90 days",
            pixel.id,
            pixel.name,
            pixel.user_quantity_7,
            pixel.user_quantity_30,
            pixel.user_quantity_90
        );
    }

    let segments = client.segments().list().await?;
    println!("\nFound {} segment(s):", segments.len());
    for raw in segments {
        // Lookalike segments are recognizable by their link field
        let segment = if raw.contains_key("lookalike_link") {
            Segment::decode(SegmentKind::Lookalike, raw)?
        } else {
            Segment::from(raw)
        };

        match &segment {
            Segment::Lookalike(s) => println!(
                "  - [{}] {} (lookalike of {}, status: {})",
                s.base.id, s.base.name, s.lookalike_link, s.base.status
            ),
            Segment::Unknown(raw) => println!(
                "  - [{}] {} (status: {})",
                segment.id(),
                raw.get("name").and_then(|v| v.as_str()).unwrap_or("-"),
                raw.get("status").and_then(|v| v.as_str()).unwrap_or("-")
            ),
            other => println!("  - [{}] {:?}", other.id(), other.kind()),
        }
    }

    client.close();
    Ok(())
}
