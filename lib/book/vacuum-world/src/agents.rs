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

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VacuumWorldError;
use crate::vacuum_world::{Location, SquareState, VacuumWorldAction, VacuumWorldState};
use crate::Agent;

pub type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// Key of the table-driven agent's lookup table: (position, square A, square B).
pub type TableKey = (Location, SquareState, SquareState);

/// Picks one of the three actions uniformly at random, ignoring the percept.
#[derive(Debug, Default, Clone)]
pub struct RandomVacuumAgent {}

impl RandomVacuumAgent {
    pub fn new() -> Self {
        Self {}
    }
}

impl Agent for RandomVacuumAgent {
    type Action = VacuumWorldAction;
    type Percept = VacuumWorldState;

    fn act<R: rand::Rng + ?Sized>(
        &mut self,
        _percept: &Self::Percept,
        rng: &mut R,
    ) -> Self::Action {
        VacuumWorldAction::ALL[rng.gen_range(0..VacuumWorldAction::ALL.len())]
    }
}

/// Looks up the action for the full percept in a fixed table.
///
/// The table covers all 8 states, so a missing entry only happens with a table supplied through
/// `with_table`. Missing entries fall back to `Clean`.
#[derive(Debug, Clone)]
pub struct TableDrivenVacuumAgent {
    table: HashMap<TableKey, VacuumWorldAction>,
}

impl Default for TableDrivenVacuumAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl TableDrivenVacuumAgent {
    pub fn new() -> Self {
        let table = [
            (
                (Location::A, SquareState::Dirty, SquareState::Dirty),
                VacuumWorldAction::Clean,
            ),
            (
                (Location::A, SquareState::Dirty, SquareState::Clean),
                VacuumWorldAction::Clean,
            ),
            (
                (Location::A, SquareState::Clean, SquareState::Dirty),
                VacuumWorldAction::MoveTo(Location::B),
            ),
            (
                (Location::A, SquareState::Clean, SquareState::Clean),
                VacuumWorldAction::MoveTo(Location::B),
            ),
            (
                (Location::B, SquareState::Dirty, SquareState::Dirty),
                VacuumWorldAction::Clean,
            ),
            (
                (Location::B, SquareState::Dirty, SquareState::Clean),
                VacuumWorldAction::MoveTo(Location::A),
            ),
            (
                (Location::B, SquareState::Clean, SquareState::Dirty),
                VacuumWorldAction::Clean,
            ),
            (
                (Location::B, SquareState::Clean, SquareState::Clean),
                VacuumWorldAction::MoveTo(Location::A),
            ),
        ]
        .into_iter()
        .collect();
        Self::with_table(table)
    }

    pub fn with_table(table: HashMap<TableKey, VacuumWorldAction>) -> Self {
        Self { table }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn lookup(&self, key: &TableKey) -> Option<VacuumWorldAction> {
        self.table.get(key).copied()
    }
}

impl Agent for TableDrivenVacuumAgent {
    type Action = VacuumWorldAction;
    type Percept = VacuumWorldState;

    fn act<R: rand::Rng + ?Sized>(
        &mut self,
        percept: &Self::Percept,
        _rng: &mut R,
    ) -> Self::Action {
        let key = (percept.position, percept.a, percept.b);
        self.lookup(&key).unwrap_or(VacuumWorldAction::Clean)
    }
}

#[derive(Debug, Default, Clone)]
pub struct ReflexVacuumAgent {}

impl ReflexVacuumAgent {
    pub fn new() -> Self {
        Self {}
    }
}

impl Agent for ReflexVacuumAgent {
    type Action = VacuumWorldAction;
    type Percept = VacuumWorldState;

    fn act<R: rand::Rng + ?Sized>(
        &mut self,
        percept: &Self::Percept,
        _rng: &mut R,
    ) -> Self::Action {
        if percept.is_dirty(percept.position) {
            VacuumWorldAction::Clean
        } else {
            VacuumWorldAction::MoveTo(percept.position.other())
        }
    }
}

/// Reflex agent that remembers what it has seen of each square during the current episode.
///
/// Before every decision the belief for the current square is overwritten with what is observed
/// there. With a clean current square it heads to the other square unless it already saw that
/// square clean, in which case nothing is left to learn and it wanders to either square at random.
#[derive(Debug, Default, Clone)]
pub struct ModelBasedReflexVacuumAgent {
    model: [Option<SquareState>; 2],
}

impl ModelBasedReflexVacuumAgent {
    pub fn new() -> Self {
        Self { model: [None; 2] }
    }

    /// `None` until the agent has stood on `location` this episode.
    pub fn belief(&self, location: Location) -> Option<SquareState> {
        self.model[location.index()]
    }

    fn update_model(&mut self, percept: &VacuumWorldState) {
        let here = percept.position;
        let observed = percept.square(here);
        self.model[here.index()] = Some(observed);
        tracing::trace!(location = %here, %observed, "belief updated");
    }
}

impl Agent for ModelBasedReflexVacuumAgent {
    type Action = VacuumWorldAction;
    type Percept = VacuumWorldState;

    fn act<R: rand::Rng + ?Sized>(
        &mut self,
        percept: &Self::Percept,
        rng: &mut R,
    ) -> Self::Action {
        self.update_model(percept);

        let here = percept.position;
        if percept.is_dirty(here) {
            return VacuumWorldAction::Clean;
        }

        let there = here.other();
        match self.belief(there) {
            Some(SquareState::Dirty) | None => VacuumWorldAction::MoveTo(there),
            Some(SquareState::Clean) => {
                if rng.gen_bool(0.5) {
                    VacuumWorldAction::MoveTo(Location::A)
                } else {
                    VacuumWorldAction::MoveTo(Location::B)
                }
            }
        }
    }

    fn reset(&mut self) {
        self.model = [None; 2];
    }
}

/// Which agent program to run. Parsed from the short names `random`, `table`, `reflex` and
/// `model`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgentKind {
    Random,
    TableDriven,
    SimpleReflex,
    ModelBased,
}

impl AgentKind {
    pub const ALL: [AgentKind; 4] = [
        AgentKind::Random,
        AgentKind::TableDriven,
        AgentKind::SimpleReflex,
        AgentKind::ModelBased,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AgentKind::Random => "Random Agent",
            AgentKind::TableDriven => "Table-Driven Agent",
            AgentKind::SimpleReflex => "Simple Reflex Agent",
            AgentKind::ModelBased => "Model-Based Reflex Agent",
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            AgentKind::Random => "random",
            AgentKind::TableDriven => "table",
            AgentKind::SimpleReflex => "reflex",
            AgentKind::ModelBased => "model",
        }
    }

    pub fn build(self) -> VacuumAgent {
        match self {
            AgentKind::Random => VacuumAgent::Random(RandomVacuumAgent::new()),
            AgentKind::TableDriven => VacuumAgent::TableDriven(TableDrivenVacuumAgent::new()),
            AgentKind::SimpleReflex => VacuumAgent::SimpleReflex(ReflexVacuumAgent::new()),
            AgentKind::ModelBased => VacuumAgent::ModelBased(ModelBasedReflexVacuumAgent::new()),
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for AgentKind {
    type Err = VacuumWorldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(AgentKind::Random),
            "table" | "table-driven" => Ok(AgentKind::TableDriven),
            "reflex" | "simple-reflex" => Ok(AgentKind::SimpleReflex),
            "model" | "model-based" => Ok(AgentKind::ModelBased),
            _ => Err(VacuumWorldError::UnknownAgent(s.to_string())),
        }
    }
}

/// Any one of the four agent programs, so experiments can hold them side by side without boxing.
#[derive(Debug, Clone)]
pub enum VacuumAgent {
    Random(RandomVacuumAgent),
    TableDriven(TableDrivenVacuumAgent),
    SimpleReflex(ReflexVacuumAgent),
    ModelBased(ModelBasedReflexVacuumAgent),
}

impl VacuumAgent {
    pub fn kind(&self) -> AgentKind {
        match self {
            VacuumAgent::Random(_) => AgentKind::Random,
            VacuumAgent::TableDriven(_) => AgentKind::TableDriven,
            VacuumAgent::SimpleReflex(_) => AgentKind::SimpleReflex,
            VacuumAgent::ModelBased(_) => AgentKind::ModelBased,
        }
    }
}

impl Agent for VacuumAgent {
    type Action = VacuumWorldAction;
    type Percept = VacuumWorldState;

    fn act<R: rand::Rng + ?Sized>(
        &mut self,
        percept: &Self::Percept,
        rng: &mut R,
    ) -> Self::Action {
        match self {
            VacuumAgent::Random(agent) => agent.act(percept, rng),
            VacuumAgent::TableDriven(agent) => agent.act(percept, rng),
            VacuumAgent::SimpleReflex(agent) => agent.act(percept, rng),
            VacuumAgent::ModelBased(agent) => agent.act(percept, rng),
        }
    }

    fn reset(&mut self) {
        match self {
            VacuumAgent::Random(agent) => agent.reset(),
            VacuumAgent::TableDriven(agent) => agent.reset(),
            VacuumAgent::SimpleReflex(agent) => agent.reset(),
            VacuumAgent::ModelBased(agent) => agent.reset(),
        }
    }
}
