use std::io::{self, Write};

use anyhow::Context;
use clap::{Parser, Subcommand};
use workshop::{
    client::ApiClient,
    models::{Collection, Customer, Employee, Part, PartLineItem, Service, ServiceLineItem, Vehicle, WorkOrder},
    telemetry::{get_subscriber, init_subscriber},
    views::{load_options, load_view, CollectionKind},
};

#[derive(Parser, Debug)]
#[command(name = "workshop-cli", version, about = "Tables and forms over the workshop api")]
struct Cli {
    /// Base url of the workshop api
    #[arg(long, env = "WORKSHOP_API_URL", default_value = "http://127.0.0.1:3001")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show every record of a collection, with references resolved
    List { collection: CollectionKind },
    /// Print one record as JSON
    Show { collection: CollectionKind, id: i32 },
    /// List the choices for a field referencing this collection
    Options { collection: CollectionKind },
    /// Create a record from a JSON object holding every field but the id
    Create {
        collection: CollectionKind,
        #[arg(long)]
        data: String,
    },
    /// Edit a record; fields missing from `data` keep their current value
    Update {
        collection: CollectionKind,
        id: i32,
        #[arg(long)]
        data: String,
    },
    /// Delete a record after confirmation
    Delete {
        collection: CollectionKind,
        id: i32,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

// Binds `$R` to the record type behind a collection kind.
macro_rules! with_collection {
    ($kind:expr, $R:ident => $body:expr) => {
        match $kind {
            CollectionKind::Customers => { type $R = Customer; $body }
            CollectionKind::Employees => { type $R = Employee; $body }
            CollectionKind::Vehicles => { type $R = Vehicle; $body }
            CollectionKind::Parts => { type $R = Part; $body }
            CollectionKind::Services => { type $R = Service; $body }
            CollectionKind::WorkOrders => { type $R = WorkOrder; $body }
            CollectionKind::PartLineItems => { type $R = PartLineItem; $body }
            CollectionKind::ServiceLineItems => { type $R = ServiceLineItem; $body }
        }
    };
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("workshop-cli".into(), "warn".into(), std::io::stderr);
    init_subscriber(subscriber)?;

    let cli = Cli::parse();
    let client = ApiClient::new(cli.base_url)?;

    match cli.command {
        Command::List { collection } => {
            print!("{}", load_view(&client, collection).await?);
        }
        Command::Show { collection, id } => {
            with_collection!(collection, R => show::<R>(&client, id).await?)
        }
        Command::Options { collection } => {
            for option in load_options(&client, collection).await? {
                println!("{}\t{}", option.id, option.label);
            }
        }
        Command::Create { collection, data } => {
            with_collection!(collection, R => create::<R>(&client, &data).await?);
            print!("{}", load_view(&client, collection).await?);
        }
        Command::Update { collection, id, data } => {
            with_collection!(collection, R => update::<R>(&client, id, &data).await?);
            print!("{}", load_view(&client, collection).await?);
        }
        Command::Delete { collection, id, yes } => {
            let removed = with_collection!(collection, R => delete::<R>(&client, id, yes).await?);
            if removed {
                print!("{}", load_view(&client, collection).await?);
            }
        }
    }

    Ok(())
}

async fn show<R: Collection>(client: &ApiClient, id: i32) -> anyhow::Result<()> {
    let record = client.get::<R>(id).await?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

async fn create<R: Collection>(client: &ApiClient, data: &str) -> anyhow::Result<()> {
    let payload: R::Payload = serde_json::from_str(data)
        .with_context(|| format!("Invalid {} data", R::NAME))?;

    let record = client.save::<R>(None, &payload).await?;
    println!("Created {} #{}", R::NAME, record.id());
    Ok(())
}

async fn update<R: Collection>(client: &ApiClient, id: i32, data: &str) -> anyhow::Result<()> {
    let changes: serde_json::Value = serde_json::from_str(data)
        .with_context(|| format!("Invalid {} data", R::NAME))?;

    let record = client.edit::<R>(id, changes).await?;
    println!("Updated {} #{}", R::NAME, record.id());
    Ok(())
}

async fn delete<R: Collection>(client: &ApiClient, id: i32, yes: bool) -> anyhow::Result<bool> {
    if !yes && !confirm(&format!("Remove {} #{}?", R::NAME, id))? {
        return Ok(false);
    }

    let message = client.delete::<R>(id).await?;
    println!("{}", message);
    Ok(true)
}

fn confirm(question: &str) -> io::Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
