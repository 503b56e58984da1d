//! Prints the JSON schema of the server's configuration file

use schema_mcp_runtime::Config;

fn main() -> anyhow::Result<()> {
    let schema = schemars::schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
