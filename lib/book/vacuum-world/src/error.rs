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

/// Vacuum world error. The world itself has no failure modes, only experiment setup does.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VacuumWorldError {
    /// An experiment needs at least one trial per agent to compute a success rate.
    #[error("number of trials must be at least 1")]
    ZeroTrials,

    /// An experiment with no agents has nothing to rank.
    #[error("at least one agent must be selected")]
    NoAgents,

    /// Agent name did not match any known agent.
    #[error("unknown agent: {0} (expected one of: random, table, reflex, model)")]
    UnknownAgent(String),
}
