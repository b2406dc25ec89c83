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

// Two-square vacuum world, with the four agent programs of chapter 2: random,
// table-driven, simple reflex and model-based reflex.
//
// See:
// -  Chapter 2: Intelligent Agents, pages 36-50

pub mod agents;
pub mod error;
pub mod experiment;
pub mod simulation;
pub mod vacuum_world;

pub use agents::{AgentKind, VacuumAgent};
pub use error::VacuumWorldError;
pub use experiment::{ExperimentConfig, ExperimentReport};

/// Concrete random number generator used by experiments. Anything that takes randomness accepts
/// any `rand::Rng`, so tests can substitute a scripted or fixed-seed source.
pub type Rng = rand_pcg::Pcg64;

/// An Agent maps a Percept to an Action.
///
/// Stateless agents (random, table-driven, simple reflex) ignore everything but the current
/// Percept. Agents with an internal model keep it across calls to `act` and must forget it in
/// `reset`, which is called at the start of every episode.
///
/// Notice that the Agent is not aware of an Environment, it's only interface is the Percept
/// coming in then the Action going out. Randomness is passed in rather than owned so that an
/// experiment controls every random draw.
pub trait Agent {
    type Action;
    type Percept;

    fn act<R: rand::Rng + ?Sized>(&mut self, percept: &Self::Percept, rng: &mut R)
        -> Self::Action;

    /// Forget anything learned during the previous episode.
    fn reset(&mut self) {}
}

/// An Environment holds the ground truth of the world and is only changed through
/// `execute_action`.
///
/// Notice that the Environment is not aware of an Agent.
pub trait Environment {
    type Action;
    type Percept;

    /// Start a new episode from a random state, returning the first Percept.
    fn reset<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) -> Self::Percept;

    /// Returns an independent copy of the current state.
    fn percept(&self) -> Self::Percept;

    fn execute_action(&mut self, action: &Self::Action);

    fn is_goal_reached(&self) -> bool;
}
