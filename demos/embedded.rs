//! Embedded records, by value and by reference.
//!
//! Run with: cargo run --example embedded

use rowbind::{Decoder, Encoder, Error};

#[derive(Debug, Default)]
struct Dimensions {
    width: f64,
    height: f64,
}

#[derive(Debug, Default)]
struct Supplier {
    name: String,
    country: Option<String>,
}

#[derive(Debug, Default)]
struct Product {
    sku: String,
    size: Dimensions,
    supplier: Option<Box<Supplier>>,
}

rowbind::impl_record! { Dimensions { width: tag("width"), height: tag("height") } }
rowbind::impl_record! { Supplier { name: tag("supplier"), country: tag("country") } }
rowbind::impl_record! {
    Product {
        sku: tag("sku"),
        size: embed(Dimensions),
        supplier: embed_ref(Supplier),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let fields = ["sku", "width", "height", "supplier", "country"];

    // The supplier record is created while decoding
    let mut product = Product::default();
    Decoder::new(fields).decode(&["W-1", "2.5", "4", "Acme", ""], &mut product)?;
    println!("{:#?}", product);

    let encoder = Encoder::new(fields);
    println!("{}", encoder.encode(&product)?.join(","));

    // Encoding never creates records; reading through a missing one fails
    let bare = Product {
        sku: "W-2".to_string(),
        ..Product::default()
    };
    match encoder.encode(&bare) {
        Err(Error::MissingRecord { tag, field }) => {
            println!("cannot encode {:?}: {} is not set", tag, field);
        }
        other => println!("unexpected: {:?}", other),
    }

    // Columns that stay inside the embedded-by-value record are fine
    let tokens = Encoder::new(["sku", "width"]).encode(&bare)?;
    println!("{}", tokens.join(","));

    Ok(())
}
