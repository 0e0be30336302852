use std::io::Read;

use sumo_client::HttpClient;
use sumo_provider::resource::{self, FieldResource, ResourceData};
use sumo_provider::{ProviderConfig, ProviderError, field_schema, init_logging};
use tracing::info;

const USAGE: &str = "usage: sumo-provider --print-schema
       sumo-provider <create|read|update|delete>   (resource JSON on stdin)
       sumo-provider import <id>";

const OPERATIONS: [&str; 5] = ["import", "create", "read", "update", "delete"];

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    // --print-schema: dump the resource schema and exit
    if args.iter().any(|a| a == "--print-schema") {
        match serde_json::to_string_pretty(&field_schema()) {
            Ok(json) => println!("{json}"),
            Err(e) => fail(&e),
        }
        return;
    }

    init_logging();

    let Some(op) = args.first() else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };
    if !OPERATIONS.contains(&op.as_str()) {
        eprintln!("unknown operation: {op}\n{USAGE}");
        std::process::exit(2);
    }

    if let Err(e) = run(op, &args[1..]) {
        fail(&e);
    }
}

fn run(op: &str, rest: &[String]) -> Result<(), ProviderError> {
    if op == "import" {
        let id = rest
            .first()
            .ok_or_else(|| ProviderError::Binding("import needs an id".into()))?;
        return print_json(&resource::import(id));
    }

    let config = ProviderConfig::from_env()?;
    info!(endpoint = config.endpoint.as_str(), op, "running field operation");
    let client: HttpClient = config.client();
    let field = FieldResource::new(&client);

    let mut data = read_stdin()?;
    match op {
        "create" => field.create(&mut data)?,
        "read" => field.read(&mut data)?,
        "update" => field.update(&mut data)?,
        _ => return field.delete(&mut data),
    }
    print_json(&data)
}

fn read_stdin() -> Result<ResourceData, ProviderError> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .map_err(ProviderError::Io)?;
    let value: serde_json::Value = serde_json::from_str(&input)?;
    ResourceData::bind(&value)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), ProviderError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn fail(e: &dyn std::fmt::Display) -> ! {
    eprintln!("error: {e}");
    std::process::exit(1);
}
