//! contactes command line front-end.
//!
//! Each subcommand is one page load: it builds the page the command stands
//! for, lets the router pick the controller, delivers the command's events
//! and prints what the page rendered. A redirect to the index page is
//! followed by printing the list.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};

use contactes::config::{DEFAULT_DATA_DIR, DEFAULT_SEED};
use contactes::page::ids;
use contactes::storage::StorageConfig;
use contactes::{
    App, AppConfig, ContactId, ContactRow, MemoryPage, Page, PageEvent, SeedSource, STORAGE_KEY,
};

#[derive(Debug, Parser)]
#[command(name = "contactes", version, about = "Manage a local contact list")]
struct Cli {
    /// Data directory for the contact storage.
    #[arg(long, short = 'd', env = "CONTACTES_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Seed document (file path or http(s) URL) loaded on first run.
    #[arg(long, env = "CONTACTES_SEED", default_value = DEFAULT_SEED)]
    seed: String,

    /// Do not seed an empty store.
    #[arg(long)]
    no_seed: bool,

    /// Timeout in seconds for an HTTP seed fetch.
    #[arg(long)]
    seed_timeout: Option<u64>,

    /// Storage key holding the collection.
    #[arg(long, default_value = STORAGE_KEY)]
    storage_key: String,

    /// Skip fsync after writes.
    #[arg(long)]
    no_sync: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List contacts, optionally filtered by name.
    List {
        /// Case-insensitive name filter.
        #[arg(long, short = 'f')]
        filter: Option<String>,
    },
    /// Add a contact.
    Add {
        #[arg(long)]
        nom: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        telefon: String,
    },
    /// Show one contact.
    Show {
        #[arg(long)]
        id: String,
    },
    /// Edit one contact; omitted fields keep their value.
    Edit {
        #[arg(long)]
        id: String,
        #[arg(long)]
        nom: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        telefon: Option<String>,
    },
    /// Delete a contact after confirmation.
    Delete {
        #[arg(long)]
        id: u64,
        /// Answer yes to the confirmation.
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

impl Cli {
    fn app_config(&self) -> AppConfig {
        AppConfig {
            data_dir: self.data_dir.clone(),
            storage_key: self.storage_key.clone(),
            seed: (!self.no_seed).then(|| SeedSource::parse(&self.seed)),
            seed_timeout: self.seed_timeout.map(Duration::from_secs),
            storage: StorageConfig {
                sync_on_write: !self.no_sync,
            },
            ..AppConfig::default()
        }
    }
}

/// A memory page whose confirmations are asked on the terminal.
struct TerminalPage {
    inner: MemoryPage,
    assume_yes: bool,
}

impl TerminalPage {
    fn new(inner: MemoryPage) -> Self {
        Self {
            inner,
            assume_yes: false,
        }
    }
}

impl Page for TerminalPage {
    fn has_element(&self, id: &str) -> bool {
        self.inner.has_element(id)
    }

    fn query_param(&self, name: &str) -> Option<String> {
        self.inner.query_param(name)
    }

    fn field_value(&self, id: &str) -> Option<String> {
        self.inner.field_value(id)
    }

    fn set_field_value(&mut self, id: &str, value: &str) {
        self.inner.set_field_value(id, value);
    }

    fn render_rows(&mut self, target: &str, rows: &[ContactRow]) {
        self.inner.render_rows(target, rows);
    }

    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{message} [s/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "s" | "si" | "sí" | "y" | "yes")
    }

    fn alert(&mut self, message: &str) {
        eprintln!("{message}");
        self.inner.alert(message);
    }

    fn navigate(&mut self, path: &str) {
        tracing::debug!(path, "navigate");
        self.inner.navigate(path);
    }
}

fn print_rows(rows: &[ContactRow]) {
    if rows.is_empty() {
        println!("(no contacts)");
        return;
    }
    let name_w = rows.iter().map(|r| r.name.chars().count()).max().unwrap_or(0).max(3);
    let email_w = rows.iter().map(|r| r.email.chars().count()).max().unwrap_or(0).max(5);
    println!("{:>4}  {:<name_w$}  {:<email_w$}  TELEFON", "ID", "NOM", "EMAIL");
    for row in rows {
        println!("{:>4}  {:<name_w$}  {:<email_w$}  {}", row.id.get(), row.name, row.email, row.phone);
    }
}

fn print_detail(page: &TerminalPage) {
    for (label, id) in [
        ("id", ids::EDIT_ID),
        ("nom", ids::EDIT_NAME),
        ("email", ids::EDIT_EMAIL),
        ("telefon", ids::EDIT_PHONE),
    ] {
        println!("{label:>8}: {}", page.field_value(id).unwrap_or_default());
    }
}

/// Prints the list when the page redirected to the index.
fn follow_navigation(app: &App, page: &TerminalPage) {
    if page.inner.navigations().is_empty() {
        return;
    }
    let mut index = MemoryPage::index();
    app.mount(&mut index);
    print_rows(index.rendered(ids::CONTACT_LIST).unwrap_or_default());
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let app = App::open(cli.app_config())
        .with_context(|| format!("failed to open contacts in {}", cli.data_dir.display()))?;

    match cli.command {
        Command::List { filter } => {
            let mut page = TerminalPage::new(MemoryPage::index());
            let mut session = app.load_page(&mut page).await;
            if let Some(filter) = filter {
                session.dispatch(&mut page, PageEvent::SearchInput(filter))?;
            }
            print_rows(page.inner.rendered(ids::CONTACT_LIST).unwrap_or_default());
        }
        Command::Add {
            nom,
            email,
            telefon,
        } => {
            let mut page = TerminalPage::new(MemoryPage::add());
            let mut session = app.load_page(&mut page).await;
            page.set_field_value(ids::ADD_NAME, &nom);
            page.set_field_value(ids::ADD_EMAIL, &email);
            page.set_field_value(ids::ADD_PHONE, &telefon);
            session.dispatch(&mut page, PageEvent::Submit)?;
            follow_navigation(&app, &page);
        }
        Command::Show { id } => {
            let mut page = TerminalPage::new(MemoryPage::detail(Some(id.as_str())));
            let session = app.load_page(&mut page).await;
            if session.view().is_some() && page.inner.navigations().is_empty() {
                print_detail(&page);
            } else {
                follow_navigation(&app, &page);
            }
        }
        Command::Edit {
            id,
            nom,
            email,
            telefon,
        } => {
            let mut page = TerminalPage::new(MemoryPage::detail(Some(id.as_str())));
            let mut session = app.load_page(&mut page).await;
            if page.inner.navigations().is_empty() {
                for (field, value) in [
                    (ids::EDIT_NAME, nom),
                    (ids::EDIT_EMAIL, email),
                    (ids::EDIT_PHONE, telefon),
                ] {
                    if let Some(value) = value {
                        page.set_field_value(field, &value);
                    }
                }
                session.dispatch(&mut page, PageEvent::Submit)?;
            }
            follow_navigation(&app, &page);
        }
        Command::Delete { id, yes } => {
            let mut page = TerminalPage::new(MemoryPage::index());
            page.assume_yes = yes;
            let mut session = app.load_page(&mut page).await;
            session.dispatch(&mut page, PageEvent::Delete(ContactId::new(id)))?;
            print_rows(page.inner.rendered(ids::CONTACT_LIST).unwrap_or_default());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    run(Cli::parse()).await
}
