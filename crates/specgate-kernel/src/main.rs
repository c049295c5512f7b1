//! `specgate` command-line demonstration of the speculation gate.

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use serde_json::json;
use specgate_kernel::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn cli() -> Command {
    Command::new("specgate")
        .version(specgate_kernel::VERSION)
        .about("Speculation gate: proposals without authority, execution behind a capability check")
        .subcommand_required(true)
        .arg(
            Arg::new("confidence")
                .long("confidence")
                .global(true)
                .value_parser(value_parser!(f64))
                .help(format!(
                    "Confidence attached to proposals [default: {DEFAULT_CONFIDENCE}]"
                )),
        )
        .arg(
            Arg::new("token")
                .long("token")
                .global(true)
                .default_value(EXECUTE_CAPABILITY)
                .help("Capability the gate accepts"),
        )
        .subcommand(
            Command::new("speculate")
                .about("Produce a proposal")
                .arg(Arg::new("input").required(true).help("Free-form input")),
        )
        .subcommand(
            Command::new("authorize")
                .about("Gate a proposal record")
                .arg(
                    Arg::new("proposal")
                        .long("proposal")
                        .conflicts_with("proposal-json")
                        .required_unless_present("proposal-json")
                        .help("Proposal text"),
                )
                .arg(
                    Arg::new("proposal-json")
                        .long("proposal-json")
                        .help("Proposal record as JSON"),
                )
                .arg(
                    Arg::new("capability")
                        .long("capability")
                        .required(true)
                        .help("Capability presented to the gate"),
                ),
        )
        .subcommand(
            Command::new("run")
                .about("Speculate, authorize and execute")
                .arg(Arg::new("input").required(true).help("Free-form input"))
                .arg(
                    Arg::new("capability")
                        .long("capability")
                        .required(true)
                        .help("Capability presented to the gate"),
                )
                .arg(
                    Arg::new("audit")
                        .long("audit")
                        .action(ArgAction::SetTrue)
                        .help("Record and report gate decisions"),
                ),
        )
}

fn config_from(args: &ArgMatches) -> GateConfig {
    let confidence = args
        .get_one::<f64>("confidence")
        .copied()
        .unwrap_or(DEFAULT_CONFIDENCE);
    let token = args
        .get_one::<String>("token")
        .cloned()
        .unwrap_or_else(|| EXECUTE_CAPABILITY.to_string());
    GateConfig::new()
        .with_confidence(confidence)
        .with_execute_token(token)
}

fn required<'a>(args: &'a ArgMatches, name: &str) -> anyhow::Result<&'a str> {
    args.get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("missing --{name}"))
}

fn dispatch(matches: &ArgMatches) -> anyhow::Result<serde_json::Value> {
    let output = match matches.subcommand() {
        Some(("speculate", args)) => {
            let speculator = Speculator::from_config(&config_from(args))?;
            serde_json::to_value(speculator.speculate(required(args, "input")?))?
        }
        Some(("authorize", args)) => {
            let config = config_from(args);
            let gate = Gate::from_config(&config)?;
            let proposal = match args.get_one::<String>("proposal-json") {
                Some(raw) => serde_json::from_str::<Proposal>(raw).map_err(GateError::from)?,
                None => Proposal::new(required(args, "proposal")?, config.confidence),
            };
            serde_json::to_value(gate.authorize(&proposal, required(args, "capability")?))?
        }
        Some(("run", args)) => {
            let config = config_from(args).with_audit(args.get_flag("audit"));
            let pipeline = Pipeline::new(&config)?;
            let run = pipeline.run(required(args, "input")?, required(args, "capability")?);
            let mut value = serde_json::to_value(&run)?;
            if let Some(ledger) = pipeline.ledger() {
                let verified = ledger.verify_integrity()?;
                let head = ledger.records().last().map(|r| hex::encode(r.hash));
                value["ledger"] = json!({
                    "records": ledger.len(),
                    "verified": verified,
                    "head": head,
                });
            }
            value
        }
        Some((other, _)) => anyhow::bail!("unknown subcommand {other}"),
        None => anyhow::bail!("a subcommand is required"),
    };
    Ok(output)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let output = dispatch(&cli().get_matches())?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dispatch_args(args: &[&str]) -> anyhow::Result<serde_json::Value> {
        let matches = cli().try_get_matches_from(std::iter::once("specgate").chain(args.iter().copied()))?;
        dispatch(&matches)
    }

    #[test]
    fn cli_definition_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn global_flags_map_onto_config() {
        let matches = cli()
            .try_get_matches_from(["specgate", "run", "x", "--capability", "GO", "--token", "GO", "--confidence", "0.7"])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();
        let config = config_from(args);
        assert_eq!(config.execute_token, "GO");
        assert_eq!(config.confidence, 0.7);
    }

    #[test]
    fn authorize_requires_a_proposal() {
        let result = cli().try_get_matches_from(["specgate", "authorize", "--capability", "EXECUTE"]);
        assert!(result.is_err());
    }

    #[test]
    fn confidence_defaults_to_constant() {
        let matches = cli().try_get_matches_from(["specgate", "speculate", "x"]).unwrap();
        let (_, args) = matches.subcommand().unwrap();
        assert_eq!(config_from(args).confidence, DEFAULT_CONFIDENCE);

        let help = cli().render_help().to_string();
        assert!(help.contains(&format!("[default: {DEFAULT_CONFIDENCE}]")));
    }

    #[test]
    fn speculate_prints_proposal() {
        let value = dispatch_args(&["speculate", "deploy service X"]).unwrap();
        assert_eq!(
            value,
            json!({"proposal": "Suggested action based on: deploy service X", "confidence": 0.42})
        );
    }

    #[test]
    fn refused_run_is_not_an_error() {
        let value = dispatch_args(&["run", "deploy service X", "--capability", "READ"]).unwrap();
        assert_eq!(
            value,
            json!({
                "proposal": {"proposal": "Suggested action based on: deploy service X", "confidence": 0.42},
                "outcome": {"status": "REFUSED", "reason": "NO_CAPABILITY"},
            })
        );
    }

    #[test]
    fn audited_run_reports_ledger() {
        let value = dispatch_args(&["run", "x", "--capability", "EXECUTE", "--audit"]).unwrap();
        assert_eq!(value["outcome"], json!({"status": "EXECUTED", "result": "Suggested action based on: x"}));
        assert_eq!(value["ledger"]["records"], json!(1));
        assert_eq!(value["ledger"]["verified"], json!(1));
        assert_eq!(value["ledger"]["head"].as_str().map(str::len), Some(64));
    }

    #[test]
    fn unaudited_run_has_no_ledger() {
        let value = dispatch_args(&["run", "x", "--capability", "EXECUTE"]).unwrap();
        assert!(value.get("ledger").is_none());
    }

    #[test]
    fn authorize_with_proposal_text() {
        let value = dispatch_args(&["authorize", "--proposal", "ship it", "--capability", "EXECUTE"]).unwrap();
        assert_eq!(value, json!({"status": "EXECUTED", "result": "ship it"}));
    }

    #[test]
    fn invalid_confidence_fails() {
        let err = dispatch_args(&["run", "x", "--capability", "EXECUTE", "--confidence", "2.0"]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GateError>(),
            Some(GateError::InvalidConfidence(_))
        ));
    }

    #[test]
    fn proposal_json_without_confidence_fails() {
        let err = dispatch_args(&[
            "authorize",
            "--proposal-json",
            r#"{"proposal":"x"}"#,
            "--capability",
            "EXECUTE",
        ])
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GateError>(),
            Some(GateError::MalformedProposal(_))
        ));
    }
}
