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

//! Runs a single Agent against an Environment for one episode.
//!
//! An episode resets the Environment and the Agent's memory, then repeats percept → action →
//! execute for at most `max_steps` steps, stopping early once the goal is reached. The step
//! bound is hard: an episode that would have succeeded one step later is still a failure.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::vacuum_world::{VacuumWorldAction, VacuumWorldEnvironment, VacuumWorldState};
use crate::{Agent, Environment};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step<_Percept, _Action> {
    pub before: _Percept,
    pub action: _Action,
    pub after: _Percept,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode<_Percept, _Action> {
    pub initial: _Percept,
    pub steps: Vec<Step<_Percept, _Action>>,
    pub success: bool,
}

impl<_Percept, _Action> Episode<_Percept, _Action> {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

pub type VacuumEpisode = Episode<VacuumWorldState, VacuumWorldAction>;

/// Returns true iff the goal was reached within `max_steps` actions.
pub fn run_episode<_Environment, _Agent, R>(
    agent: &mut _Agent,
    environment: &mut _Environment,
    max_steps: usize,
    rng: &mut R,
) -> bool
where
    _Environment: Environment,
    _Environment::Percept: Clone + Debug,
    _Environment::Action: Debug,
    _Agent: Agent<Action = _Environment::Action, Percept = _Environment::Percept>,
    R: rand::Rng + ?Sized,
{
    simulate_episode(agent, environment, max_steps, rng).success
}

/// Same as `run_episode`, but keeps every step taken.
pub fn simulate_episode<_Environment, _Agent, R>(
    agent: &mut _Agent,
    environment: &mut _Environment,
    max_steps: usize,
    rng: &mut R,
) -> Episode<_Environment::Percept, _Environment::Action>
where
    _Environment: Environment,
    _Environment::Percept: Clone + Debug,
    _Environment::Action: Debug,
    _Agent: Agent<Action = _Environment::Action, Percept = _Environment::Percept>,
    R: rand::Rng + ?Sized,
{
    let percept = environment.reset(rng);
    play(agent, environment, percept, max_steps, rng)
}

/// Runs an episode from a chosen start state instead of a random one.
pub fn simulate_episode_from<_Agent, R>(
    agent: &mut _Agent,
    initial: VacuumWorldState,
    max_steps: usize,
    rng: &mut R,
) -> VacuumEpisode
where
    _Agent: Agent<Action = VacuumWorldAction, Percept = VacuumWorldState>,
    R: rand::Rng + ?Sized,
{
    let mut environment = VacuumWorldEnvironment::from_state(initial);
    play(agent, &mut environment, initial, max_steps, rng)
}

fn play<_Environment, _Agent, R>(
    agent: &mut _Agent,
    environment: &mut _Environment,
    initial: _Environment::Percept,
    max_steps: usize,
    rng: &mut R,
) -> Episode<_Environment::Percept, _Environment::Action>
where
    _Environment: Environment,
    _Environment::Percept: Clone + Debug,
    _Environment::Action: Debug,
    _Agent: Agent<Action = _Environment::Action, Percept = _Environment::Percept>,
    R: rand::Rng + ?Sized,
{
    agent.reset();

    let mut steps = Vec::new();
    let mut percept = initial.clone();
    for step in 0..max_steps {
        let action = agent.act(&percept, rng);
        environment.execute_action(&action);
        let after = environment.percept();
        tracing::debug!(step, ?percept, ?action, ?after, "step");

        steps.push(Step {
            before: percept,
            action,
            after: after.clone(),
        });
        percept = after;

        if environment.is_goal_reached() {
            break;
        }
    }

    Episode {
        initial,
        steps,
        success: environment.is_goal_reached(),
    }
}
