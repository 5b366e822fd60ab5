//! Terminal front end for the user directory.
//!
//! Each subcommand drives one page controller: `list` the list cache,
//! `create` and `edit` the form controllers, `delete` the list cache's
//! confirmed delete. An explicit `list` that cannot reach the directory
//! raises a failure notice and exits non-zero. A successful form submit
//! navigates to the list, which is reloaded and rendered the way the list
//! page would show it.

mod error;
mod render;
mod terminal;

use std::io::Write;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use crate::domain::ports::{AlwaysConfirm, DeleteConfirmation, DirectoryService, Notifier};
use crate::domain::{DeleteOutcome, FormField, Notice, Route, UserForm, UserKey, UserListCache};

pub use error::CliError;
pub use render::OutputFormat;
pub use terminal::{StdinConfirmation, TerminalNotifier};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "user-directory", version, about = "Browse and edit a remote user directory")]
pub struct Cli {
    /// Render records as JSON instead of cards.
    #[arg(long, global = true)]
    pub json: bool,
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Cards
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show users whose first name contains the search text.
    List {
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Add a user.
    Create(FieldArgs),
    /// Replace every field of the user addressed by ID.
    Edit {
        /// First name addressing the user.
        id: String,
        #[command(flatten)]
        fields: FieldArgs,
        /// Start from empty fields instead of the user's current values.
        #[arg(long)]
        no_prefill: bool,
    },
    /// Delete the first user with this first name.
    Delete {
        first_name: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

/// Form inputs. Values are applied as if typed into the form.
#[derive(Debug, Clone, Default, Args)]
pub struct FieldArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub user_name: Option<String>,
    #[arg(long)]
    pub age: Option<String>,
    #[arg(long)]
    pub marital_status: Option<String>,
    /// `true` marks the user employed; anything else does not.
    #[arg(long)]
    pub employed: Option<String>,
    /// `true` marks the user a founder; anything else does not.
    #[arg(long)]
    pub founder: Option<String>,
}

impl FieldArgs {
    fn inputs(&self) -> impl Iterator<Item = (FormField, &str)> {
        [
            (FormField::FirstName, &self.first_name),
            (FormField::LastName, &self.last_name),
            (FormField::UserName, &self.user_name),
            (FormField::Age, &self.age),
            (FormField::MaritalStatus, &self.marital_status),
            (FormField::IsEmployed, &self.employed),
            (FormField::IsFounder, &self.founder),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|raw| (field, raw)))
    }

    fn apply<S, N>(&self, form: &UserForm<S, N>) -> Result<(), CliError>
    where
        S: DirectoryService + ?Sized,
        N: Notifier + ?Sized,
    {
        for (field, raw) in self.inputs() {
            form.set_input(field, raw)?;
        }
        Ok(())
    }
}

/// Execute `cli` against `service`, writing rendered output to `out`.
///
/// Notices go to `notifier`; `confirmation` is asked before a delete unless
/// `--yes` was given.
///
/// # Errors
///
/// Returns [`CliError`] when input is invalid, a directory call fails or
/// output cannot be written.
pub async fn run<S, N, W>(
    cli: &Cli,
    service: Arc<S>,
    notifier: Arc<N>,
    confirmation: &dyn DeleteConfirmation,
    out: &mut W,
) -> Result<(), CliError>
where
    S: DirectoryService + ?Sized,
    N: Notifier + ?Sized,
    W: Write,
{
    let format = cli.format();
    match &cli.command {
        Command::List { search } => {
            let mut cache = UserListCache::new(service, notifier.clone());
            if let Err(failure) = cache.refresh().await {
                notifier.notify(Notice::failed(failure.operation()));
                return Err(failure.into());
            }
            cache.set_search(search.as_str());
            render::records(&cache.visible(), format, out)
        }
        Command::Create(fields) => {
            let form = UserForm::create(service.clone(), notifier.clone());
            fields.apply(&form)?;
            let route = form.submit().await?;
            navigate(route, service, notifier, format, out).await
        }
        Command::Edit {
            id,
            fields,
            no_prefill,
        } => {
            let key = UserKey::new(id.as_str())?;
            let form = if *no_prefill {
                UserForm::edit(service.clone(), notifier.clone(), key)
            } else {
                UserForm::open_edit(service.clone(), notifier.clone(), key).await
            };
            fields.apply(&form)?;
            let route = form.submit().await?;
            navigate(route, service, notifier, format, out).await
        }
        Command::Delete { first_name, yes } => {
            let key = UserKey::new(first_name.as_str())?;
            let confirmation: &dyn DeleteConfirmation = if *yes {
                &AlwaysConfirm
            } else {
                confirmation
            };
            let mut cache = UserListCache::load(service, notifier).await;
            match cache.delete(&key, confirmation).await? {
                DeleteOutcome::Cancelled => {
                    writeln!(out, "Delete cancelled.")?;
                    Ok(())
                }
                DeleteOutcome::Deleted { .. } => render::records(&cache.visible(), format, out),
            }
        }
    }
}

/// Show the page at `route`, reloading the list from the directory.
async fn navigate<S, N, W>(
    route: Route,
    service: Arc<S>,
    notifier: Arc<N>,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), CliError>
where
    S: DirectoryService + ?Sized,
    N: Notifier + ?Sized,
    W: Write,
{
    match route {
        Route::UserList => {
            let cache = UserListCache::load(service, notifier).await;
            render::records(cache.records(), format, out)
        }
    }
}
