/*
 * Copyright (C) 2023 Asim Ihsan
 * SPDX-License-Identifier: AGPL-3.0-only
 *
 * This program is free software: you can redistribute it and/or modify it under
 * the terms of the GNU Affero General Public License as published by the Free
 * Software Foundation, version 3.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A
 * PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License along
 * with this program. If not, see <https://www.gnu.org/licenses/>
 */

//! Compare the random, table-driven, simple reflex and model-based reflex agents in the
//! two-square vacuum world.

mod logging;
mod report;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use vacuum_world::experiment::{episode_rng, evaluate_all_initial_states, run_experiments};
use vacuum_world::simulation::simulate_episode;
use vacuum_world::vacuum_world::VacuumWorldEnvironment;
use vacuum_world::{AgentKind, ExperimentConfig};

#[derive(Parser)]
#[command(
    name = "compare-vacuum-agents",
    version,
    about = "Compare agent programs in the two-square vacuum world",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    compare: CompareArgs,
}

#[derive(Subcommand)]
enum Command {
    /// Run every agent for a number of trials and rank them by success rate (default).
    Compare(CompareArgs),
    /// Run a single episode and print every step.
    Episode(EpisodeArgs),
    /// Run one episode from each of the 8 start states.
    Exhaustive(EpisodeArgs),
}

#[derive(Args)]
struct CompareArgs {
    #[arg(long, default_value_t = ExperimentConfig::default().trials)]
    trials: usize,

    #[arg(long, default_value_t = ExperimentConfig::default().max_steps)]
    max_steps: usize,

    #[arg(long, default_value_t = ExperimentConfig::default().seed)]
    seed: u64,

    /// random, table, reflex or model. Repeat to select several; all four if omitted.
    #[arg(long = "agent", value_name = "AGENT")]
    agents: Vec<AgentKind>,

    /// Spread each agent's trials across threads.
    #[arg(long)]
    parallel: bool,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

impl CompareArgs {
    fn to_config(&self) -> ExperimentConfig {
        let agents = if self.agents.is_empty() {
            AgentKind::ALL.to_vec()
        } else {
            self.agents.clone()
        };
        ExperimentConfig {
            trials: self.trials,
            max_steps: self.max_steps,
            seed: self.seed,
            agents,
            parallel: self.parallel,
        }
    }
}

#[derive(Args)]
struct EpisodeArgs {
    #[arg(long, default_value = "model")]
    agent: AgentKind,

    #[arg(long, default_value_t = ExperimentConfig::default().max_steps)]
    max_steps: usize,

    #[arg(long, default_value_t = ExperimentConfig::default().seed)]
    seed: u64,
}

fn main() -> Result<()> {
    logging::init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Compare(cli.compare)) {
        Command::Compare(args) => cmd_compare(&args),
        Command::Episode(args) => cmd_episode(&args),
        Command::Exhaustive(args) => cmd_exhaustive(&args),
    }
}

fn cmd_compare(args: &CompareArgs) -> Result<()> {
    let config = args.to_config();
    tracing::debug!(?config, "running experiments");
    let report = run_experiments(&config).context("invalid experiment configuration")?;
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("serialize report")?
        );
    } else {
        print!("{}", report::format_report(&report));
    }
    Ok(())
}

fn cmd_episode(args: &EpisodeArgs) -> Result<()> {
    let mut agent = args.agent.build();
    let mut environment = VacuumWorldEnvironment::default();
    let mut rng = episode_rng(args.seed, args.agent, 0);
    let episode = simulate_episode(&mut agent, &mut environment, args.max_steps, &mut rng);
    print!("{}", report::format_episode(args.agent, &episode));
    Ok(())
}

fn cmd_exhaustive(args: &EpisodeArgs) -> Result<()> {
    let report = evaluate_all_initial_states(args.agent, args.max_steps, args.seed);
    print!("{}", report::format_exhaustive(&report));
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_compare_with_defaults() {
        let cli = Cli::try_parse_from(["compare-vacuum-agents"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.compare.to_config(), ExperimentConfig::default());
    }

    #[test]
    fn test_agents_can_be_selected() {
        let cli = Cli::try_parse_from([
            "compare-vacuum-agents",
            "compare",
            "--trials",
            "5",
            "--agent",
            "reflex",
            "--agent",
            "model",
        ])
        .unwrap();
        let Some(Command::Compare(args)) = cli.command else {
            panic!("expected compare");
        };
        let config = args.to_config();
        assert_eq!(config.trials, 5);
        assert_eq!(
            config.agents,
            vec![AgentKind::SimpleReflex, AgentKind::ModelBased]
        );
    }

    #[test]
    fn test_unknown_agent_is_rejected() {
        assert!(Cli::try_parse_from(["compare-vacuum-agents", "--agent", "greedy"]).is_err());
    }

    #[test]
    fn test_episode_defaults_to_model_based() {
        let cli = Cli::try_parse_from(["compare-vacuum-agents", "episode"]).unwrap();
        let Some(Command::Episode(args)) = cli.command else {
            panic!("expected episode");
        };
        assert_eq!(args.agent, AgentKind::ModelBased);
        assert_eq!(args.max_steps, 10);
    }

    #[test]
    fn test_zero_trials_fails() {
        let cli = Cli::try_parse_from(["compare-vacuum-agents", "--trials", "0"]).unwrap();
        assert!(cmd_compare(&cli.compare).is_err());
    }
}
