//! Decoding and encoding a flat record.
//!
//! Run with: cargo run --example simple

use rowbind::{Decoder, Encoder, Schema};
use std::error::Error;

#[derive(Debug, Default, PartialEq)]
struct Person {
    name: String,
    age: Option<u32>,
    member: bool,
}

rowbind::impl_record! {
    Person {
        name: tag("name"),
        age: tag("age"),
        member: tag("member"),
    }
}

const DATA: &str = "\
name,age,member
John Smith,40,yes
Jane Doe,,no
";

fn main() -> Result<(), Box<dyn Error>> {
    let mut lines = DATA.lines();
    let header: Vec<&str> = lines.next().ok_or("missing header")?.split(',').collect();
    let schema = Schema::from_header(&header);

    // Decode each row
    let decoder = Decoder::from(schema.clone());
    let mut people = Vec::new();
    for line in lines {
        let row: Vec<&str> = line.split(',').collect();
        let mut person = Person::default();
        decoder.decode(&row, &mut person)?;
        people.push(person);
    }

    for person in &people {
        let age = person.age.map_or("nil".to_string(), |a| a.to_string());
        println!("{}: {}", person.name, age);
    }

    // Encode back
    let encoder = Encoder::from(schema);
    println!("\nRe-encoded:");
    for person in &people {
        println!("{}", encoder.encode(person)?.join(","));
    }

    Ok(())
}
