//! `pfx list`: show registered transforms

use std::process::ExitCode;

use serde::Serialize;

use crate::registry::Registry;
use crate::transforms;

use super::EXIT_SUCCESS;

#[derive(Debug, Serialize)]
struct TransformInfo<'a> {
    name: &'a str,
    description: &'a str,
}

/// Execute the list command
pub fn run_list(registry: &Registry, json: bool) -> ExitCode {
    let names = registry.names();
    let infos: Vec<TransformInfo<'_>> = names
        .iter()
        .map(|name| TransformInfo {
            name,
            description: transforms::explain(name).unwrap_or(""),
        })
        .collect();

    if json {
        match serde_json::to_string_pretty(&infos) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(super::EXIT_ERROR);
            }
        }
    } else {
        for info in &infos {
            println!("{:<10} {}", info.name, info.description);
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}
