//! Reading, editing and writing back a commented configuration file.
//!
//! Run with: cargo run --example edit_config

use std::error::Error;
use toml_tree::{parse, to_string, to_string_with_options, toml, TomlOptions, Value};

const CONFIG: &str = r#"# Server settings
[server]
host = "localhost" # bind address
port = 8080


workers = 4
tls = false

[[users]]
name = "alice"

[[users]]
name = "bob"
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let mut doc = parse(CONFIG)?;

    println!("port: {}", doc.get_integer("server.port")?);
    println!("users: {}", doc.get_array("users")?.len());
    println!(
        "host comment: {:?}",
        doc.get_value("server.host")?.inline_comment()
    );

    if let Some(server) = doc.get_mut("server").and_then(Value::as_table_mut) {
        server.put("port", 9090)?;
        let mut limits = toml!({ "max_body": 1048576, "timeout": 2.5 });
        limits.set_preceding_comment(Some("Request limits"));
        server.put_value("limits", limits)?;
    }

    println!("\nEdited (padding kept):\n{}", to_string(&doc)?);
    println!(
        "Compact:\n{}",
        to_string_with_options(&doc, &TomlOptions::compact())?
    );

    Ok(())
}
