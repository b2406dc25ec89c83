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

use crate::Environment;
use serde::{Deserialize, Serialize};

/// One of the two squares of the world. There is no way to name a third one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Location {
    A,
    B,
}

impl Location {
    pub const ALL: [Location; 2] = [Location::A, Location::B];

    pub fn other(self) -> Self {
        match self {
            Location::A => Location::B,
            Location::B => Location::A,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Location::A => 0,
            Location::B => 1,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::A => write!(f, "A"),
            Location::B => write!(f, "B"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SquareState {
    Clean,
    Dirty,
}

impl SquareState {
    pub fn from_dirty(dirty: bool) -> Self {
        if dirty {
            SquareState::Dirty
        } else {
            SquareState::Clean
        }
    }

    pub fn is_dirty(self) -> bool {
        self == SquareState::Dirty
    }
}

impl std::fmt::Display for SquareState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SquareState::Clean => write!(f, "clean"),
            SquareState::Dirty => write!(f, "dirty"),
        }
    }
}

/// Moves name the destination square rather than a direction, so moving to the square the agent
/// is already on is allowed and does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VacuumWorldAction {
    Clean,
    MoveTo(Location),
}

impl VacuumWorldAction {
    pub const ALL: [VacuumWorldAction; 3] = [
        VacuumWorldAction::Clean,
        VacuumWorldAction::MoveTo(Location::A),
        VacuumWorldAction::MoveTo(Location::B),
    ];
}

impl std::fmt::Display for VacuumWorldAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VacuumWorldAction::Clean => write!(f, "Clean"),
            VacuumWorldAction::MoveTo(location) => write!(f, "MoveTo({})", location),
        }
    }
}

/// Full state of the world: the dirt on both squares and where the agent is. This is also what
/// every agent perceives, so it is a plain `Copy` value and a percept can never alias the
/// environment's own state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VacuumWorldState {
    pub a: SquareState,
    pub b: SquareState,
    pub position: Location,
}

impl VacuumWorldState {
    pub fn new(position: Location, a: SquareState, b: SquareState) -> Self {
        Self { a, b, position }
    }

    /// All 8 states: both positions times the four dirt configurations.
    pub fn all() -> Vec<VacuumWorldState> {
        const SQUARES: [SquareState; 2] = [SquareState::Dirty, SquareState::Clean];
        Location::ALL
            .iter()
            .flat_map(|&position| {
                SQUARES.iter().flat_map(move |&a| {
                    SQUARES
                        .iter()
                        .map(move |&b| VacuumWorldState::new(position, a, b))
                })
            })
            .collect()
    }

    pub fn square(&self, location: Location) -> SquareState {
        match location {
            Location::A => self.a,
            Location::B => self.b,
        }
    }

    fn square_mut(&mut self, location: Location) -> &mut SquareState {
        match location {
            Location::A => &mut self.a,
            Location::B => &mut self.b,
        }
    }

    pub fn is_dirty(&self, location: Location) -> bool {
        self.square(location).is_dirty()
    }

    pub fn is_clean(&self) -> bool {
        !self.a.is_dirty() && !self.b.is_dirty()
    }
}

// e.g. "A: dirty, B: clean, at A"
impl std::fmt::Display for VacuumWorldState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "A: {}, B: {}, at {}", self.a, self.b, self.position)
    }
}

pub struct VacuumWorldEnvironment {
    state: VacuumWorldState,
}

impl Default for VacuumWorldEnvironment {
    fn default() -> Self {
        VacuumWorldEnvironment::from_state(VacuumWorldState::new(
            Location::A,
            SquareState::Dirty,
            SquareState::Dirty,
        ))
    }
}

impl VacuumWorldEnvironment {
    pub fn from_state(state: VacuumWorldState) -> Self {
        Self { state }
    }

    pub fn position(&self) -> Location {
        self.state.position
    }

    pub fn is_dirty(&self, location: Location) -> bool {
        self.state.is_dirty(location)
    }

    /// Idempotent.
    pub fn clean(&mut self, location: Location) {
        *self.state.square_mut(location) = SquareState::Clean;
    }

    pub fn move_to(&mut self, location: Location) {
        self.state.position = location;
    }
}

impl Environment for VacuumWorldEnvironment {
    type Action = VacuumWorldAction;
    type Percept = VacuumWorldState;

    /// Each square is dirty with probability 1/2, independently, and the agent starts on either
    /// square with probability 1/2. Draws happen in the order: A, B, position.
    fn reset<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) -> Self::Percept {
        self.state = VacuumWorldState {
            a: SquareState::from_dirty(rng.gen_bool(0.5)),
            b: SquareState::from_dirty(rng.gen_bool(0.5)),
            position: if rng.gen_bool(0.5) {
                Location::A
            } else {
                Location::B
            },
        };
        self.state
    }

    fn percept(&self) -> Self::Percept {
        self.state
    }

    fn execute_action(&mut self, action: &Self::Action) {
        match action {
            VacuumWorldAction::Clean => {
                self.clean(self.state.position);
            }
            VacuumWorldAction::MoveTo(location) => {
                self.move_to(*location);
            }
        }
    }

    fn is_goal_reached(&self) -> bool {
        self.state.is_clean()
    }
}

#[cfg(test)]
pub(crate) mod strategies {
    use super::{Location, SquareState, VacuumWorldAction, VacuumWorldState};
    use proptest::prelude::*;

    pub fn location() -> impl Strategy<Value = Location> {
        prop_oneof![Just(Location::A), Just(Location::B)]
    }

    pub fn square_state() -> impl Strategy<Value = SquareState> {
        prop_oneof![Just(SquareState::Clean), Just(SquareState::Dirty)]
    }

    pub fn world_state() -> impl Strategy<Value = VacuumWorldState> {
        (location(), square_state(), square_state())
            .prop_map(|(position, a, b)| VacuumWorldState::new(position, a, b))
    }

    pub fn action() -> impl Strategy<Value = VacuumWorldAction> {
        prop_oneof![
            Just(VacuumWorldAction::Clean),
            Just(VacuumWorldAction::MoveTo(Location::A)),
            Just(VacuumWorldAction::MoveTo(Location::B)),
        ]
    }
}
