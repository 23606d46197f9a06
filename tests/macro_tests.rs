use rowbind::{
    Decoder, Encoder, Error, FieldIndex, FieldMut, FieldRef, Fields, FieldsMut, Layout, Record,
};

mod model {
    #[derive(Default, Debug, PartialEq)]
    pub struct Address {
        pub street: String,
        pub zip: Option<u32>,
    }

    rowbind::impl_record! {
        Address {
            street: tag("street"),
            zip: tag("zip"),
        }
    }
}

#[derive(Default, Debug, PartialEq)]
struct Customer {
    id: u64,
    internal_note: String,
    home: model::Address,
}

#[derive(Default, Debug, PartialEq)]
struct Billing {
    street: String,
}

#[derive(Default, Debug, PartialEq)]
struct Account {
    owner: Customer,
    billing: Option<Box<Billing>>,
}

rowbind::impl_record! {
    Customer {
        id: tag("id"),
        home: embed(model::Address),
    }
}

rowbind::impl_record! { Billing { street: tag("billing_street") } }

rowbind::impl_record! {
    Account {
        owner: embed(Customer),
        billing: embed_ref(Billing),
    }
}

#[test]
fn test_shape_lists_declared_fields_only() {
    let shape = Customer::SHAPE;
    assert_eq!(shape.type_name, "Customer");

    let names: Vec<_> = shape.fields.iter().map(|f| f.name).collect();
    assert_eq!(names, vec!["id", "home"]);
    assert!(shape.field("internal_note").is_none());
    assert!(matches!(
        shape.field("home").unwrap().layout,
        Layout::Embed(child) if child.type_name == "Address"
    ));
}

#[test]
fn test_index_follows_declaration_order() {
    let index = FieldIndex::resolve(Account::SHAPE).unwrap();
    let tags: Vec<_> = index.tags().collect();
    assert_eq!(tags, vec!["id", "street", "zip", "billing_street"]);

    let zip = index.get("zip").unwrap();
    assert_eq!(zip.steps(), &["owner", "home", "zip"]);
    assert_eq!(zip.parents(), &["owner", "home"]);
    assert_eq!(zip.leaf(), "zip");
    assert!(!zip.is_direct());
    assert!(index.get("billing_street").is_some());
    assert!(!index.contains("internal_note"));
}

#[test]
fn test_accessors_match_shape() {
    let mut account = Account::default();

    assert!(matches!(account.field("owner"), Some(FieldRef::Record(Some(_)))));
    assert!(matches!(account.field("billing"), Some(FieldRef::Record(None))));
    assert!(account.field("nope").is_none());

    match account.field_mut("billing") {
        Some(FieldMut::Record(billing)) => {
            assert_eq!(billing.shape().type_name, "Billing");
        }
        _ => panic!("billing should be an embedded record"),
    }
    assert_eq!(account.billing, Some(Box::default()));
}

#[test]
fn test_plain_option_embed_ref() {
    #[derive(Default, Debug, PartialEq)]
    struct Wrapper {
        label: String,
        address: Option<model::Address>,
    }

    rowbind::impl_record! {
        Wrapper {
            label: tag("label"),
            address: embed_ref(model::Address),
        }
    }

    let wrapper: Wrapper = rowbind::from_record(["zip", "label"], &["12345", "w"]).unwrap();
    assert_eq!(
        wrapper,
        Wrapper {
            label: "w".to_string(),
            address: Some(model::Address {
                street: String::new(),
                zip: Some(12345),
            }),
        }
    );
}

#[test]
fn test_nested_round_trip() {
    let fields = ["billing_street", "zip", "id", "street"];
    let decoder = Decoder::new(fields);
    let encoder = Encoder::new(fields);

    let mut account = Account::default();
    decoder
        .decode(&["1 Main St", "", "42", "2 Side St"], &mut account)
        .unwrap();

    assert_eq!(account.owner.id, 42);
    assert_eq!(account.owner.home.street, "2 Side St");
    assert_eq!(account.owner.home.zip, None);
    assert_eq!(account.billing.as_ref().unwrap().street, "1 Main St");
    assert!(account.owner.internal_note.is_empty());

    assert_eq!(
        encoder.encode(&account).unwrap(),
        vec!["1 Main St", "null", "42", "2 Side St"]
    );
}

#[test]
fn test_trailing_comma_and_single_field() {
    #[derive(Default)]
    struct One {
        only: i8,
    }
    rowbind::impl_record! { One { only: tag("only"), } }

    assert_eq!(One::SHAPE.fields.len(), 1);
    assert_eq!(rowbind::to_record(["only"], One { only: -3 }).unwrap(), vec!["-3"]);
}

#[test]
fn test_duplicate_tag_across_embedding() {
    #[derive(Default)]
    struct Twice {
        street: String,
        home: model::Address,
    }
    rowbind::impl_record! {
        Twice {
            street: tag("street"),
            home: embed(model::Address),
        }
    }

    let err = FieldIndex::resolve(Twice::SHAPE).unwrap_err();
    assert!(matches!(err, Error::DuplicateTag { tag: "street", .. }), "{err}");

    // Also reported when encoding an unrelated tag.
    let err = rowbind::to_record(["zip"], &Twice::default()).unwrap_err();
    assert!(matches!(err, Error::DuplicateTag { .. }));
}
