// Rolodex - Contact Directory CLI
// "Browse the directory from a terminal; every failure arrives classified"

use std::sync::Arc;

use clap::{Arg, Command};
use tracing::{debug, info};

use rolodex::api::types::{ListFilters, ListParams};
use rolodex::api::ContactsApi;
use rolodex::common::logging::init_logging;
use rolodex::config::Settings;
use rolodex::error::RolodexResult;
use rolodex::http::classify::ErrorClassifier;
use rolodex::http::connectivity::HttpConnectivityProbe;
use rolodex::http::hooks::StatusHooks;
use rolodex::http::HttpClient;
use rolodex::visited::VisitedContacts;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI arguments structure
#[derive(Debug)]
struct CliArgs {
    config_file: Option<String>,
    base_url: Option<String>,
    log_level: Option<String>,
    command: CliCommand,
}

#[derive(Debug)]
enum CliCommand {
    List {
        page: u64,
        limit: u64,
        filters: ListFilters,
    },
    Show {
        id: i64,
    },
    Visited {
        ids: Vec<i64>,
    },
}

fn parse_cli_args() -> CliArgs {
    let matches = Command::new("rolodex")
        .version(VERSION)
        .about("Contact directory client")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .global(true),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .help("Override the backend base URL from configuration")
                .global(true),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level (trace, debug, info, warn, error)")
                .value_parser(["trace", "debug", "info", "warn", "error"])
                .global(true),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("list")
                .about("List contacts, optionally filtered")
                .arg(
                    Arg::new("page")
                        .long("page")
                        .value_name("N")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("1"),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_name("N")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("20"),
                )
                .arg(Arg::new("first-name").long("first-name").value_name("TEXT"))
                .arg(Arg::new("last-name").long("last-name").value_name("TEXT"))
                .arg(Arg::new("phone").long("phone").value_name("TEXT")),
        )
        .subcommand(
            Command::new("show").about("Show one contact").arg(
                Arg::new("id")
                    .required(true)
                    .value_parser(clap::value_parser!(i64)),
            ),
        )
        .subcommand(
            Command::new("visited")
                .about("Resolve a recently-visited id list to contacts")
                .arg(
                    Arg::new("ids")
                        .required(true)
                        .num_args(1..)
                        .value_parser(clap::value_parser!(i64)),
                ),
        )
        .get_matches();

    let command = match matches.subcommand() {
        Some(("list", sub)) => CliCommand::List {
            page: *sub.get_one::<u64>("page").unwrap_or(&1),
            limit: *sub.get_one::<u64>("limit").unwrap_or(&20),
            filters: ListFilters {
                first_name: sub.get_one::<String>("first-name").cloned(),
                last_name: sub.get_one::<String>("last-name").cloned(),
                phone: sub.get_one::<String>("phone").cloned(),
            },
        },
        Some(("show", sub)) => CliCommand::Show {
            id: *sub.get_one::<i64>("id").expect("id is required"),
        },
        Some(("visited", sub)) => CliCommand::Visited {
            ids: sub
                .get_many::<i64>("ids")
                .expect("ids are required")
                .copied()
                .collect(),
        },
        _ => unreachable!("subcommand is required"),
    };

    CliArgs {
        config_file: matches.get_one::<String>("config").cloned(),
        base_url: matches.get_one::<String>("base-url").cloned(),
        log_level: matches.get_one::<String>("log-level").cloned(),
        command,
    }
}

/// Apply CLI overrides to configuration
fn apply_cli_overrides(mut settings: Settings, args: &CliArgs) -> Settings {
    if let Some(base_url) = &args.base_url {
        settings.api.base_url = base_url.clone();
    }
    if let Some(level) = &args.log_level {
        settings.logging.level = level.clone();
    }
    settings
}

#[tokio::main]
async fn main() {
    let args = parse_cli_args();

    if let Err(err) = run(args).await {
        match &err {
            rolodex::RolodexError::Api(failure) => match failure.retry_label() {
                Some(label) => eprintln!("{} ({label})", failure.message),
                None => eprintln!("{}", failure.message),
            },
            other => eprintln!("{other}"),
        }
        std::process::exit(1);
    }
}

async fn run(args: CliArgs) -> RolodexResult<()> {
    let settings = Settings::load(args.config_file.as_deref())?;
    let settings = apply_cli_overrides(settings, &args);
    settings.validate()?;
    init_logging(&settings.logging)?;

    debug!(base_url = %settings.api.base_url, "starting");

    let probe = Arc::new(HttpConnectivityProbe::new(&settings.probe)?);
    let classifier = ErrorClassifier::new(probe, StatusHooks::new());
    let http = Arc::new(HttpClient::new(&settings.api, classifier)?);
    let api = ContactsApi::new(http);

    match args.command {
        CliCommand::List {
            page,
            limit,
            filters,
        } => {
            let params = ListParams {
                page,
                limit,
                filters,
            };
            let response = api.get_contact_list(&params, None).await?;
            let list = response.data;
            for contact in &list.items {
                println!("{:>6}  {:<30} {}", contact.id, contact.full_name, contact.phone);
            }
            println!(
                "page {}/{} ({} contacts total)",
                list.meta.page, list.meta.total_pages, list.meta.total_count
            );
        }
        CliCommand::Show { id } => {
            let response = api.get_contact(id, None).await?;
            let contact = response.data;
            println!("{} (#{})", contact.full_name, contact.id);
            println!("  phone:    {}", contact.phone);
            println!("  gender:   {}", contact.gender);
            if let Some(email) = &contact.email {
                println!("  email:    {email}");
            }
            if let Some(company) = &contact.company {
                println!("  company:  {company}");
            }
            if let Some(address) = &contact.address {
                println!("  address:  {address}");
            }
            if let Some(note) = &contact.note {
                println!("  note:     {note}");
            }
        }
        CliCommand::Visited { ids } => {
            let mut visited = VisitedContacts::new(settings.visited.capacity);
            // Recorded oldest to newest so the list comes back most recent first.
            for id in ids {
                visited.record(id);
            }
            let contacts = visited.resolve(&api).await;
            info!(resolved = contacts.len(), "visited contacts resolved");
            for contact in contacts {
                println!("{:>6}  {}", contact.id, contact.full_name);
            }
        }
    }

    Ok(())
}
