//! Country picker example.
//!
//! Drives a multi-select country list from the command line and prints the
//! plain-text rendering after each step.
//!
//! Run with: `cargo run -p horizon-select --example country_picker`
//! Set `RUST_LOG=horizon_select=debug` to watch the state machine.

use horizon_select::prelude::*;
use tracing_subscriber::EnvFilter;

fn print(select: &mut SelectBox, title: &str) {
    let rendered = select.render(&mut TextRenderer::new());
    println!("== {title}");
    println!("{}", rendered.head);
    for row in rendered.rows {
        println!("  {row}");
    }
    println!();
}

fn main() -> horizon_select::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = SelectConfig::from_toml_str(
        r#"
multiselect = true
max_selections = 4
favorite_star = true
has_reset_button = true
disabled_selections = ["ch"]
text_for_multiselect = "countries"
"#,
    )?;

    let mut groups = GroupMap::new();
    groups.insert("eu".into(), GroupHeader::new("European Union", true));
    groups.insert("efta".into(), GroupHeader::new("EFTA", false));

    let mut select = SelectBox::from_config(config)?;
    select.set_on_select(|request: &SelectRequest| {
        // Nobody may leave the union once in it.
        !(request.is_deselect && request.key.as_str() == "eu")
    });
    select.on_selected.connect(|event| match event {
        SelectedEvent::Selected { key, value } => println!("-> selected {key} ({value})"),
        SelectedEvent::Loaded => println!("-> list loaded"),
    });

    select.set_data(
        [
            ItemEntry::new("all", "Everywhere").with_collectable(false),
            ItemEntry::new("eu", "European Union"),
            ItemEntry::new("at", "Austria"),
            ItemEntry::new("de", "Germany"),
            ItemEntry::new("fr", "France"),
            ItemEntry::new("efta", "EFTA"),
            ItemEntry::new("ch", "Switzerland"),
            ItemEntry::new("no", "Norway"),
        ],
        groups,
    )?;
    print(&mut select, "loaded");

    select.set_favorite("de");
    select.toggle("no");
    print(&mut select, "picked Norway");

    let outcome = select.toggle("eu");
    println!("group click: {outcome:?}");
    print(&mut select, "picked the union");

    let outcome = select.toggle("fr");
    println!("deselect France: {outcome:?}");
    let outcome = select.toggle("eu");
    println!("deselect the union: {outcome:?}");
    print(&mut select, "after deselects");

    select.set_multiselect(false);
    print(&mut select, "single mode");

    select.set_multiselect(true);
    select.reset();
    print(&mut select, "reset");

    Ok(())
}
