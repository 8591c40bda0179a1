//! Builds a record, prints its document, and checks that reading the
//! document back gives an equal record.

use std::any::TypeId;
use std::process::ExitCode;

use propdoc::prelude::*;

#[derive(Properties, Default, Debug, PartialEq)]
struct NestedObject {
    r: [i32; 3],
    s: String,
    v: Vec<i32>,
}

#[derive(Properties, Default, Debug, PartialEq)]
#[properties(auto_register)]
struct MyObject {
    a: char,
    b: i32,
    c: f32,
    d: NestedObject,
}

fn run() -> Result<bool, PropertyError> {
    let my_object = MyObject {
        a: 'c',
        b: 1,
        c: 3.0,
        d: NestedObject {
            r: [0, 1, 2],
            s: String::from("string"),
            v: vec![3, 4],
        },
    };

    let mut registry = PropertyRegistry::new();
    if !registry.auto_register() {
        log::warn!("static registration is unavailable, registering by hand");
        registry.register::<MyObject>();
    }
    log::info!("{} record types registered", registry.len());

    let document = serialize(&my_object)?;
    println!("{}", document_to_string_pretty(&document)?);

    let restored = registry.deserialize_dyn(TypeId::of::<MyObject>(), &document)?;
    Ok(restored.downcast_ref::<MyObject>() == Some(&my_object))
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(equal) => {
            println!("Objects are equal: {equal}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
