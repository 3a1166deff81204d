//! Init command implementation
//!
//! Writes a sample `trialchain.toml`.

use clap::Args;
use std::fs;
use std::path::Path;

const SAMPLE_CONTRACT_ADDRESS: &str = "0xCf3cC873C988eb635712C8AB7c9a4F6A2376EFc7";

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "trialchain.toml")]
    pub output: String,

    /// Include the optional sections with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Trialchain configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Set [ledger] publish_address and fetch_address");
                println!("  2. Validate configuration: trialchain validate-config");
                println!("  3. Register users: trialchain user register <name> --role <role>");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    fn generate_minimal_config() -> String {
        format!(
            r#"# Trialchain Configuration File

[application]
log_level = "warn"

[storage]
data_dir = "./trialchain-data"

[ledger]
backend = "file"
publish_address = "{SAMPLE_CONTRACT_ADDRESS}"
fetch_address = "{SAMPLE_CONTRACT_ADDRESS}"
file_path = "./trialchain-data/ledger.json"
timeout_seconds = 10
"#
        )
    }

    fn generate_config_with_examples() -> String {
        format!(
            r#"# Trialchain Configuration File
# Clinical trial registry with ledger verification
#
# Any value may reference an environment variable as ${{VAR_NAME}}.
# TRIALCHAIN_* environment variables override values from this file.

[application]
# trace | debug | info | warn | error
log_level = "warn"

[storage]
# Directory holding the record files and the login session
data_dir = "./trialchain-data"

[ledger]
# memory | file | http
backend = "file"

# Report hashes are published to publish_address and verified against
# fetch_address. Verification only succeeds when both name the same contract.
publish_address = "{SAMPLE_CONTRACT_ADDRESS}"
fetch_address = "{SAMPLE_CONTRACT_ADDRESS}"

# Used by the file backend
file_path = "./trialchain-data/ledger.json"

# Used by the http backend
# base_url = "https://ledger-gateway.example.com/api"
# api_token = "${{TRIALCHAIN_LEDGER_API_TOKEN}}"

# Seconds before a ledger call is abandoned (1-300)
timeout_seconds = 10

[report]
# chrono format for the date inside report text
date_format = "%-m/%-d/%Y"

[logging]
# JSON log files in addition to console output
local_enabled = false
local_path = "./logs"
# daily | hourly
local_rotation = "daily"
"#
        )
    }
}
