use super::{AppContext, StashCommand};
use owo_colors::OwoColorize;
use stash::error::{Result, StashError};

pub struct InitAdminCommand {
    pub email: String,
    pub password: Option<String>,
}

impl StashCommand for InitAdminCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let password = match &self.password {
            Some(password) => password.clone(),
            None => {
                let password = rpassword::prompt_password("Enter password: ")?;
                let confirm = rpassword::prompt_password("Confirm password: ")?;
                if password != confirm {
                    return Err(StashError::InvalidInput("Passwords do not match".to_string()));
                }
                password
            }
        };
        if password.is_empty() {
            return Err(StashError::InvalidInput("Password must not be empty".to_string()));
        }

        let admin = ctx.db.create_root_admin_user(&self.email, &password)?;
        eprintln!(
            "{} Created admin user {} ({})",
            "✓".green(),
            admin.username.bold(),
            admin.email
        );
        Ok(())
    }
}

pub struct UsersCommand;

impl StashCommand for UsersCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let users = ctx.db.get_users_for_admin_panel()?;
        if users.is_empty() {
            eprintln!("No users.");
            return Ok(());
        }

        for user in users {
            let status = match user.disabled {
                Some(when) => format!("disabled {}", when.format("%Y-%m-%d")).red().to_string(),
                None => "active".green().to_string(),
            };
            println!(
                "{}. {} <{}> {} [{}]",
                user.id.to_string().bright_blue(),
                user.username.bold(),
                user.email.yellow(),
                user.created.format("%Y-%m-%d"),
                status
            );
        }
        Ok(())
    }
}

pub struct DisableUserCommand {
    pub login: String,
}

impl StashCommand for DisableUserCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let record = ctx
            .db
            .find_user_record(&self.login)?
            .ok_or_else(|| StashError::InvalidInput(format!("No user '{}'", self.login)))?;

        if record.disabled.is_some() {
            eprintln!("User {} is already disabled.", record.username);
            return Ok(());
        }

        ctx.db.disable_user(record.id)?;
        eprintln!("{} Disabled user {}", "✓".green(), record.username);
        Ok(())
    }
}
