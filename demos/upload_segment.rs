//! Upload segment example.
//!
//! Uploads a CSV file of MAC addresses, confirms the new segment and
//! grants view access to another login.
//!
//! Run with: cargo run --example upload_segment <file.csv> <segment name> [grantee]

use yandex_audience::models::{Grant, UploadContentType, UploadingSegment};
use yandex_audience::AudienceClient;

#[tokio::main]
async fn main() -> yandex_audience::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .expect("usage: upload_segment <file.csv> <segment name> [grantee]");
    let name = args.next().unwrap_or_else(|| "uploaded from rust".to_string());
    let grantee = args.next();

    let client = AudienceClient::from_env(None)?;

    println!("Uploading {}...", path);
    let uploaded = client.segments().upload_csv_file(&path).await?;
    println!("Uploaded segment {} ({})", uploaded.base.id, uploaded.base.status);

    let request = UploadingSegment::confirmed(uploaded.base.id, name, UploadContentType::Mac, false);
    let saved = client.segments().confirm(&request).await?;
    println!("Confirmed '{}', status: {}", saved.base.name, saved.base.status);

    if let Some(login) = grantee {
        let grant = client
            .grants()
            .create(saved.base.id, &Grant::new(login).with_comment("shared by upload_segment"))
            .await?;
        println!("Granted access to {}", grant.user_login);
    }

    client.close();
    Ok(())
}
