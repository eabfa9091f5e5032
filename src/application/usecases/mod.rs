pub mod ingest_events;
pub mod notify_recipients;
pub mod verify_webhook;
