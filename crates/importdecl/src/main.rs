use clap::Parser;
use importdecl::cli::Cli;
use importdecl::commands::{check, encode, list, plan, resolve};
use importdecl::config::{CONFIG_PATH, ImportDeclConfig};
use importdecl_output::output_schema;
use std::process::ExitCode;

/// Print the config, manifest and report schemas for `--schema` (before clap
/// parsing).
fn handle_schema_flag() -> bool {
    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(|s| s.as_str()) == Some("--schema") {
        let response = serde_json::json!({
            "config_path": CONFIG_PATH,
            "format": "toml",
            "schema": schemars::schema_for!(ImportDeclConfig),
            "manifest_schema": importdecl_manifest::manifest_schema(),
            "output_schemas": {
                "check": output_schema::<check::CheckReport>(),
                "list": output_schema::<list::ListReport>(),
                "resolve": output_schema::<resolve::DeclarationReport>(),
                "encode": output_schema::<encode::EncodeReport>(),
                "plan": output_schema::<plan::PlanReport>(),
            },
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&response).unwrap_or_default()
        );
        true
    } else {
        false
    }
}

fn main() -> ExitCode {
    if handle_schema_flag() {
        return ExitCode::SUCCESS;
    }

    let cli = Cli::parse();
    importdecl::logging::init(cli.global.verbose);

    match importdecl::run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
