//! User command implementation
//!
//! Registration, login and logout. The login session is stored next to the
//! registry records so it survives between invocations.

use super::{report_failure, try_step, CommandContext, EXIT_OK};
use crate::domain::Role;
use clap::{Args, Subcommand};

/// Arguments for the user command
#[derive(Args, Debug)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Register a new user
    Register {
        /// Display name, unique across all roles
        name: String,

        /// Role: pharma, hospital or regulator
        #[arg(long)]
        role: Role,
    },

    /// Log in as an existing user
    Login {
        /// Display name
        name: String,
    },

    /// Log out
    Logout,

    /// Show the logged-in user
    Whoami,

    /// List registered users
    List {
        /// Only list users with this role
        #[arg(long)]
        role: Option<Role>,
    },
}

impl UserArgs {
    /// Execute the user command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let mut ctx = try_step!(CommandContext::open(config_path));

        match &self.command {
            UserCommand::Register { name, role } => {
                let user = match ctx.registry.register(name, *role) {
                    Ok(u) => u,
                    Err(e) => return Ok(report_failure("Registration failed", &e)),
                };
                println!("✅ Registered {} as {}", user.display_name, user.role);
                println!("   ID: {}", user.id);
            }
            UserCommand::Login { name } => {
                let user = match ctx.registry.login(name) {
                    Ok(u) => u,
                    Err(e) => return Ok(report_failure("Login failed", &e)),
                };
                println!("✅ Logged in as {} ({})", user.display_name, user.role);
            }
            UserCommand::Logout => {
                if let Err(e) = ctx.registry.logout() {
                    return Ok(report_failure("Logout failed", &e));
                }
                println!("✅ Logged out");
            }
            UserCommand::Whoami => match ctx.registry.current_user() {
                Some(user) => {
                    println!("👤 {} ({})", user.display_name, user.role);
                    println!("   ID: {}", user.id);
                }
                None => println!("Not logged in."),
            },
            UserCommand::List { role } => {
                let users: Vec<_> = match role {
                    Some(r) => ctx.registry.list_by_role(*r),
                    None => ctx.registry.list_users().iter().collect(),
                };

                if users.is_empty() {
                    println!("No users registered.");
                    return Ok(EXIT_OK);
                }

                println!("👥 Users");
                println!();
                for user in users {
                    println!(
                        "  {:<24} {:<10} {}",
                        user.display_name,
                        user.role.as_str(),
                        user.id
                    );
                }
            }
        }

        Ok(EXIT_OK)
    }
}
