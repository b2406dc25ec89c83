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

use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::agents::AgentKind;
use crate::error::VacuumWorldError;
use crate::simulation::{run_episode, simulate_episode_from, VacuumEpisode};
use crate::vacuum_world::{VacuumWorldEnvironment, VacuumWorldState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Episodes per agent.
    pub trials: usize,
    pub max_steps: usize,
    pub seed: u64,
    /// Agents to evaluate, in the order used to break ties when ranking.
    pub agents: Vec<AgentKind>,
    /// Run the episodes of each agent on the rayon thread pool. Outcomes are identical either way.
    pub parallel: bool,
}

impl ExperimentConfig {
    fn new(
        trials: usize,
        max_steps: usize,
        seed: u64,
        agents: Vec<AgentKind>,
        parallel: bool,
    ) -> Self {
        Self {
            trials,
            max_steps,
            seed,
            agents,
            parallel,
        }
    }

    pub fn validate(&self) -> Result<(), VacuumWorldError> {
        if self.trials == 0 {
            return Err(VacuumWorldError::ZeroTrials);
        }
        if self.agents.is_empty() {
            return Err(VacuumWorldError::NoAgents);
        }
        Ok(())
    }
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self::new(10, 10, 42, AgentKind::ALL.to_vec(), false)
    }
}

/// Every episode gets its own generator, so an outcome depends only on (seed, agent, trial) and
/// not on which other agents run or on thread scheduling.
pub fn episode_rng(seed: u64, agent: AgentKind, trial: usize) -> crate::Rng {
    crate::Rng::seed_from_u64(seed ^ ((agent as u64) << 32) ^ trial as u64)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResult {
    pub agent: AgentKind,
    /// Per-episode success, in trial order.
    pub outcomes: Vec<bool>,
    pub successes: usize,
    /// Percentage in [0, 100].
    pub success_rate: f64,
}

impl AgentResult {
    pub fn new(agent: AgentKind, outcomes: Vec<bool>) -> Self {
        let successes = outcomes.iter().filter(|&&success| success).count();
        let success_rate = if outcomes.is_empty() {
            0.0
        } else {
            successes as f64 / outcomes.len() as f64 * 100.0
        };
        Self {
            agent,
            outcomes,
            successes,
            success_rate,
        }
    }

    pub fn trials(&self) -> usize {
        self.outcomes.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub config: ExperimentConfig,
    /// One entry per configured agent, in configuration order.
    pub results: Vec<AgentResult>,
}

impl ExperimentReport {
    /// Results by descending success rate. Ties keep configuration order.
    pub fn ranking(&self) -> Vec<&AgentResult> {
        let mut ranking: Vec<&AgentResult> = self.results.iter().collect();
        ranking.sort_by(|a, b| b.success_rate.total_cmp(&a.success_rate));
        ranking
    }

    pub fn best(&self) -> Option<&AgentResult> {
        self.ranking().first().copied()
    }

    pub fn worst(&self) -> Option<&AgentResult> {
        self.ranking().last().copied()
    }
}

pub fn run_experiments(config: &ExperimentConfig) -> Result<ExperimentReport, VacuumWorldError> {
    config.validate()?;

    let results = config
        .agents
        .iter()
        .map(|&agent| {
            let outcomes = if config.parallel {
                run_trials_parallel(agent, config)
            } else {
                run_trials(agent, config)
            };
            let result = AgentResult::new(agent, outcomes);
            tracing::info!(
                %agent,
                successes = result.successes,
                trials = result.trials(),
                success_rate = result.success_rate,
                "agent evaluated"
            );
            result
        })
        .collect();

    Ok(ExperimentReport {
        config: config.clone(),
        results,
    })
}

// One agent and one environment for all trials; the runner resets both between episodes.
fn run_trials(agent: AgentKind, config: &ExperimentConfig) -> Vec<bool> {
    let mut vacuum_agent = agent.build();
    let mut environment = VacuumWorldEnvironment::default();
    (0..config.trials)
        .map(|trial| {
            let mut rng = episode_rng(config.seed, agent, trial);
            run_episode(
                &mut vacuum_agent,
                &mut environment,
                config.max_steps,
                &mut rng,
            )
        })
        .collect()
}

fn run_trials_parallel(agent: AgentKind, config: &ExperimentConfig) -> Vec<bool> {
    (0..config.trials)
        .into_par_iter()
        .map(|trial| {
            let mut vacuum_agent = agent.build();
            let mut environment = VacuumWorldEnvironment::default();
            let mut rng = episode_rng(config.seed, agent, trial);
            run_episode(
                &mut vacuum_agent,
                &mut environment,
                config.max_steps,
                &mut rng,
            )
        })
        .collect()
}

/// One episode from each of the 8 possible start states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExhaustiveReport {
    pub agent: AgentKind,
    pub max_steps: usize,
    pub episodes: Vec<VacuumEpisode>,
}

impl ExhaustiveReport {
    pub fn successes(&self) -> usize {
        self.episodes.iter().filter(|episode| episode.success).count()
    }
}

pub fn evaluate_all_initial_states(
    agent: AgentKind,
    max_steps: usize,
    seed: u64,
) -> ExhaustiveReport {
    let mut vacuum_agent = agent.build();
    let episodes = VacuumWorldState::all()
        .into_iter()
        .enumerate()
        .map(|(i, initial)| {
            let mut rng = episode_rng(seed, agent, i);
            simulate_episode_from(&mut vacuum_agent, initial, max_steps, &mut rng)
        })
        .collect();
    ExhaustiveReport {
        agent,
        max_steps,
        episodes,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn config(agents: Vec<AgentKind>) -> ExperimentConfig {
        ExperimentConfig {
            agents,
            ..ExperimentConfig::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = ExperimentConfig::default();
        assert_eq!(config.trials, 10);
        assert_eq!(config.max_steps, 10);
        assert_eq!(config.agents, AgentKind::ALL.to_vec());
        assert!(!config.parallel);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_zero_trials_is_rejected() {
        let config = ExperimentConfig {
            trials: 0,
            ..ExperimentConfig::default()
        };
        assert_eq!(run_experiments(&config), Err(VacuumWorldError::ZeroTrials));
    }

    #[test]
    fn test_no_agents_is_rejected() {
        assert_eq!(
            run_experiments(&config(vec![])),
            Err(VacuumWorldError::NoAgents)
        );
    }

    #[test]
    fn test_reflex_agents_always_succeed() {
        let config = ExperimentConfig {
            trials: 50,
            ..config(vec![
                AgentKind::TableDriven,
                AgentKind::SimpleReflex,
                AgentKind::ModelBased,
            ])
        };
        let report = run_experiments(&config).unwrap();
        assert_eq!(report.results.len(), 3);
        for result in &report.results {
            assert_eq!(result.trials(), 50);
            assert_eq!(result.successes, 50, "agent: {}", result.agent);
            assert_relative_eq!(result.success_rate, 100.0);
        }
    }

    #[test]
    fn test_random_agent_result_is_consistent() {
        let config = ExperimentConfig {
            trials: 200,
            ..config(vec![AgentKind::Random])
        };
        let report = run_experiments(&config).unwrap();
        let result = &report.results[0];
        assert_eq!(result.trials(), 200);
        assert_eq!(
            result.successes,
            result.outcomes.iter().filter(|&&s| s).count()
        );
        assert_relative_eq!(result.success_rate, result.successes as f64 / 2.0);
        // Starting clean alone succeeds a quarter of the time.
        assert!(result.successes > 0);
        assert!(result.successes < 200);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sequential = ExperimentConfig {
            trials: 100,
            ..ExperimentConfig::default()
        };
        let parallel = ExperimentConfig {
            parallel: true,
            ..sequential.clone()
        };
        let sequential = run_experiments(&sequential).unwrap();
        let parallel = run_experiments(&parallel).unwrap();
        assert_eq!(sequential.results, parallel.results);
    }

    #[test]
    fn test_outcomes_do_not_depend_on_other_agents() {
        let all = run_experiments(&ExperimentConfig::default()).unwrap();
        let random_only = run_experiments(&config(vec![AgentKind::Random])).unwrap();
        assert_eq!(all.results[0], random_only.results[0]);
    }

    #[test]
    fn test_ranking_is_descending_and_stable() {
        let report = ExperimentReport {
            config: ExperimentConfig::default(),
            results: vec![
                AgentResult::new(AgentKind::Random, vec![true, false, false, false]),
                AgentResult::new(AgentKind::TableDriven, vec![true, true, true, true]),
                AgentResult::new(AgentKind::SimpleReflex, vec![true, true, true, true]),
                AgentResult::new(AgentKind::ModelBased, vec![true, true, false, false]),
            ],
        };
        let ranking: Vec<AgentKind> = report.ranking().iter().map(|r| r.agent).collect();
        assert_eq!(
            ranking,
            vec![
                AgentKind::TableDriven,
                AgentKind::SimpleReflex,
                AgentKind::ModelBased,
                AgentKind::Random,
            ]
        );
        assert_eq!(report.best().map(|r| r.agent), Some(AgentKind::TableDriven));
        assert_eq!(report.worst().map(|r| r.agent), Some(AgentKind::Random));
        assert_relative_eq!(report.results[3].success_rate, 50.0);
    }

    #[test]
    fn test_empty_outcomes_have_zero_rate() {
        let result = AgentResult::new(AgentKind::Random, vec![]);
        assert_eq!(result.trials(), 0);
        assert_relative_eq!(result.success_rate, 0.0);
    }

    #[test]
    fn test_exhaustive_reflex_solves_every_state() {
        let report = evaluate_all_initial_states(AgentKind::SimpleReflex, 3, 42);
        assert_eq!(report.episodes.len(), 8);
        assert_eq!(report.successes(), 8);
    }

    // In one step only already-clean worlds and worlds dirty just under the agent are solvable.
    #[test]
    fn test_exhaustive_reflex_with_one_step() {
        let report = evaluate_all_initial_states(AgentKind::SimpleReflex, 1, 42);
        assert_eq!(report.successes(), 4);
        for episode in &report.episodes {
            let initial = episode.initial;
            let solvable = !initial.is_dirty(initial.position.other());
            assert_eq!(episode.success, solvable, "initial: {}", initial);
        }
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = run_experiments(&config(vec![AgentKind::SimpleReflex])).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["results"][0]["agent"], "simple-reflex");
        assert_eq!(json["results"][0]["successes"], 10);
        assert_eq!(json["config"]["trials"], 10);
    }
}
