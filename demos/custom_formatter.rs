//! Per-column formatting overrides.
//!
//! Run with: cargo run --example custom_formatter

use chrono::{DateTime, Utc};
use rowbind::{Decoder, Encoder, Value};
use std::error::Error;

#[derive(Debug, Default)]
struct Payment {
    id: u64,
    amount: f64,
    paid_at: Option<DateTime<Utc>>,
}

rowbind::impl_record! {
    Payment {
        id: tag("id"),
        amount: tag("amount"),
        paid_at: tag("paid_at"),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let fields = ["id", "amount", "paid_at"];

    let mut payment = Payment::default();
    Decoder::new(fields).decode(&["7", "19.9", "2024-03-01T12:00:00Z"], &mut payment)?;

    // Built-in formatting
    let plain = Encoder::new(fields);
    println!("default:  {}", plain.encode(&payment)?.join(","));

    // Two decimals for money, dates only for timestamps
    let pretty = Encoder::new(fields)
        .with_formatter("amount", |value: &Value| {
            let amount = value.as_f64().ok_or("amount must be numeric")?;
            Ok(format!("{:.2}", amount))
        })
        .with_formatter("paid_at", |value: &Value| {
            Ok(match value.as_datetime() {
                Some(at) => at.format("%Y-%m-%d").to_string(),
                None => "unpaid".to_string(),
            })
        });
    println!("custom:   {}", pretty.encode(&payment)?.join(","));

    payment.paid_at = None;
    println!("unpaid:   {}", pretty.encode(&payment)?.join(","));

    Ok(())
}
