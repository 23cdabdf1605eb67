//! Locator Demo - Stable Test-Id Attributes
//!
//! Demonstrates the Marcar locator tree: hierarchical paths, parameters,
//! mark recovery, chained attribute maps, and the production collapse.
//!
//! # Running
//!
//! ```bash
//! cargo run --example locator_demo -p marcar
//! ```

#![allow(clippy::unwrap_used)]

use marcar::{
    create_locator_from_properties, get_locator_parameters, remove_mark_from_properties, Locator,
    Parameters, RootOptions,
};

fn main() {
    println!("=== Marcar Locator Demo ===\n");

    // Demo 1: The lazy tree
    demo_tree();

    // Demo 2: Parameters
    demo_parameters();

    // Demo 3: Mark recovery
    demo_mark_recovery();

    // Demo 4: Attribute chains
    demo_chain();

    // Demo 5: Production collapse
    demo_production();

    println!("\n=== Locator Demo Complete ===");
}

fn demo_tree() {
    println!("--- Demo 1: The Lazy Tree ---\n");

    let app = Locator::root("app");
    let submit = app.child("form").child("submit");

    println!("Path: {submit}");
    println!("Memoized: {}", submit == app.child("form").child("submit"));

    let properties = submit.invoke().unwrap();
    for (name, value) in properties.iter() {
        println!("  {name}=\"{value}\"");
    }
    println!();
}

fn demo_parameters() {
    println!("--- Demo 2: Parameters ---\n");

    let row = Locator::root("table").child("row");
    let properties = row
        .invoke_with(Parameters::new().with("index", 3).with("selected", true))
        .unwrap();

    println!("Attributes as JSON: {}", serde_json::to_string(&properties).unwrap());
    println!();
}

fn demo_mark_recovery() {
    println!("--- Demo 3: Mark Recovery ---\n");

    let node = Locator::root("app").child("header");
    let properties = node
        .invoke_with(Parameters::new().with("kind", "sticky"))
        .unwrap();

    let recovered = get_locator_parameters(&properties).unwrap();
    println!("Recovered parameter kind: {:?}", recovered.get("kind"));
    println!(
        "Recovered node is the invoked node: {}",
        create_locator_from_properties(&properties) == node
    );

    let stripped = remove_mark_from_properties(properties);
    println!(
        "After stripping, parameters are gone: {}",
        get_locator_parameters(&stripped).is_none()
    );
    println!();
}

fn demo_chain() {
    println!("--- Demo 4: Attribute Chains ---\n");

    let root = Locator::root_with_options(
        "level1",
        RootOptions::new()
            .with_map_attributes_chain(|chain| serde_json::to_value(chain).unwrap()),
    );

    let properties = root
        .invoke_with(Parameters::new().with("parameter1", "value1"))
        .unwrap()
        .child("level2")
        .child("level3")
        .child("level4")
        .invoke()
        .unwrap();

    println!("Chain: {}", properties.mapped().unwrap());
    println!();
}

fn demo_production() {
    println!("--- Demo 5: Production Collapse ---\n");

    let pinned = Locator::root_with_options("app", RootOptions::new().with_production_pin(true));

    println!("Pinned root is inert: {}", pinned == Locator::inert());
    println!(
        "Deep access stays inert: {}",
        pinned.child("form").child("submit") == Locator::inert()
    );
    println!(
        "Invocation yields no attributes: {}",
        pinned.child("form").invoke().unwrap().is_empty()
    );
}
