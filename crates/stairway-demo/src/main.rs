use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction, Command};
use stairway_core::prelude::*;
use stairway_demo::{suites, topo, topo_cases};
use stairway_report::Level;
use stairway_topology::AgentKind;
use std::collections::BTreeMap;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let level_names: Vec<&str> = Level::ALL.iter().map(|level| level.name()).collect();
    let response_names: Vec<&str> = Response::ALL.iter().map(|response| response.name()).collect();
    let agent_names: Vec<&str> = AgentKind::ALL.iter().map(|kind| kind.name()).collect();

    let cli = Command::new("stairway")
        .version("0.1.0")
        .about("Stairway demo scenarios")
        .arg_required_else_help(false)
        .arg(
            Arg::new("log")
                .long("log")
                .short('g')
                .global(true)
                .value_parser(PossibleValuesParser::new(level_names))
                .default_value("info")
                .help("Report all events at or above this level"),
        )
        .arg(
            Arg::new("response")
                .long("response")
                .short('s')
                .global(true)
                .value_parser(PossibleValuesParser::new(response_names))
                .default_value("halt")
                .help("Action on an unexpected result state"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Print the final result tree as JSON"),
        )
        .subcommand(Command::new("report").about("All report demo cases"))
        .subcommand(Command::new("states").about("Sampling of all step states"))
        .subcommand(Command::new("expectations").about("Expectation assessment variants"))
        .subcommand(Command::new("flights").about("Flight variants"))
        .subcommand(Command::new("suites").about("Multi-depth suites and cases"))
        .subcommand(
            Command::new("topology")
                .about("Topology resolution demos")
                .arg(
                    Arg::new("agent")
                        .long("agent")
                        .short('a')
                        .value_parser(PossibleValuesParser::new(agent_names))
                        .default_value("native")
                        .help("Execution mechanism for resolved nodes"),
                )
                .arg(
                    Arg::new("uppercase")
                        .long("uppercase")
                        .short('u')
                        .value_parser(PossibleValuesParser::new(topo::UPPERCASES))
                        .default_value("A")
                        .help("Node category constraint"),
                )
                .arg(
                    Arg::new("lowercase")
                        .long("lowercase")
                        .short('w')
                        .value_parser(PossibleValuesParser::new(topo::LOWERCASES))
                        .default_value("a")
                        .help("Node refinement constraint"),
                )
                .arg(
                    Arg::new("number")
                        .long("number")
                        .short('n')
                        .value_parser(PossibleValuesParser::new(topo::NUMBERS))
                        .default_value("1")
                        .help("Version/build constraint"),
                ),
        );

    let matches = cli.get_matches();

    let mut params = BTreeMap::new();
    for key in [RunConfig::LOG, RunConfig::RESPONSE] {
        if let Some(value) = matches.get_one::<String>(key) {
            params.insert(key.to_string(), value.clone());
        }
    }
    if let Some(("topology", sub)) = matches.subcommand() {
        for key in ["agent", "uppercase", "lowercase", "number"] {
            if let Some(value) = sub.get_one::<String>(key) {
                params.insert(key.to_string(), value.clone());
            }
        }
    }

    let config = match RunConfig::from_params(params) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid run configuration: {err}");
            std::process::exit(2);
        }
    };
    let json = matches.get_flag("json");
    let ctx = RunContext::console(config);

    let mut suite = match matches.subcommand() {
        Some(("report", _)) => suites::multi_case_suite(),
        Some(("states", _)) => suites::states_suite(),
        Some(("expectations", _)) => suites::expectation_suite(),
        Some(("flights", _)) => suites::flight_suite(),
        Some(("topology", sub)) => {
            let value = |key: &str| sub.get_one::<String>(key).cloned().unwrap_or_default();
            let agent = match value("agent").parse::<AgentKind>() {
                Ok(agent) => agent,
                Err(err) => {
                    eprintln!("invalid agent: {err}");
                    std::process::exit(2);
                }
            };
            topo_cases::topology_suite(
                &value("uppercase"),
                &value("lowercase"),
                &value("number"),
                agent,
            )
        }
        _ => suites::all_suites(),
    };

    if let Err(fault) = suite.execute(&ctx) {
        eprintln!("run aborted: {fault:#}");
        std::process::exit(2);
    }

    if json {
        match serde_json::to_string_pretty(suite.result()) {
            Ok(rendered) => println!("{rendered}"),
            Err(err) => eprintln!("could not render JSON summary: {err}"),
        }
    }

    std::process::exit(if suite.result().state().is_bad() { 1 } else { 0 });
}
