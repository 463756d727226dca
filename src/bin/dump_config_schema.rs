//! Prints the JSON schema of the airboard configuration file.

use anyhow::{Context, Result};

fn main() -> Result<()> {
    let schema = airboard::Config::json_schema();
    let json = serde_json::to_string_pretty(&schema).context("serializing config schema")?;
    println!("{json}");
    Ok(())
}
