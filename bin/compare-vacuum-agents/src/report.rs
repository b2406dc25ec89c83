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

// Console formatting. Every function returns a String so the layout can be tested without
// capturing stdout.

use std::fmt::Write;

use vacuum_world::experiment::{AgentResult, ExhaustiveReport};
use vacuum_world::simulation::VacuumEpisode;
use vacuum_world::{AgentKind, ExperimentConfig, ExperimentReport};

const WIDTH: usize = 60;

fn rule(c: char) -> String {
    c.to_string().repeat(WIDTH)
}

fn banner(title: &str) -> String {
    format!("{}\n{}\n{}\n", rule('='), title, rule('='))
}

/// One block per 5 percentage points.
pub fn bar(success_rate: f64) -> String {
    "█".repeat((success_rate / 5.0) as usize)
}

pub fn format_header(config: &ExperimentConfig) -> String {
    let mut s = banner("VACUUM WORLD - AGENT PERFORMANCE COMPARISON");
    s.push_str("\nSimulation parameters:\n");
    let _ = writeln!(s, "  - Trials per agent: {}", config.trials);
    let _ = writeln!(s, "  - Maximum actions per trial: {}", config.max_steps);
    let _ = writeln!(s, "  - Seed: {}", config.seed);
    s.push_str("  - Locations: A and B\n");
    s.push_str("  - Success criterion: both locations clean\n");
    s
}

pub fn format_agent_trials(result: &AgentResult) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "\nTesting {}...", result.agent);
    let _ = writeln!(s, "{}", rule('-'));
    for (trial, success) in result.outcomes.iter().enumerate() {
        let status = if *success { "✓ SUCCESS" } else { "✗ FAILURE" };
        let _ = writeln!(s, "  Trial {:2}: {}", trial + 1, status);
    }
    let _ = writeln!(
        s,
        "\n  Total successes: {}/{}",
        result.successes,
        result.trials()
    );
    let _ = writeln!(s, "  Success rate: {:.1}%", result.success_rate);
    s
}

pub fn format_comparison(report: &ExperimentReport) -> String {
    let mut s = String::from("\n");
    s.push_str(&banner("COMPARATIVE RESULTS"));
    let _ = writeln!(s, "\n{:<26} {:<15} Success rate", "Agent", "Successes");
    let _ = writeln!(s, "{}", rule('-'));
    for result in report.ranking() {
        let _ = writeln!(
            s,
            "{:<26} {:>2}/{:<12} {:>5.1}% {}",
            result.agent.name(),
            result.successes,
            result.trials(),
            result.success_rate,
            bar(result.success_rate)
        );
    }
    s
}

pub fn format_analysis(report: &ExperimentReport) -> String {
    let mut s = String::from("\n");
    s.push_str(&banner("ANALYSIS"));
    if let Some(best) = report.best() {
        let _ = writeln!(s, "\n1. Best agent: {}", best.agent);
        let _ = writeln!(s, "   Success rate: {:.1}%", best.success_rate);
    }
    if let Some(worst) = report.worst() {
        let _ = writeln!(s, "\n2. Worst agent: {}", worst.agent);
        let _ = writeln!(s, "   Success rate: {:.1}%", worst.success_rate);
    }
    s
}

pub fn format_report(report: &ExperimentReport) -> String {
    let mut s = format_header(&report.config);
    for result in &report.results {
        s.push_str(&format_agent_trials(result));
    }
    s.push_str(&format_comparison(report));
    s.push_str(&format_analysis(report));
    s
}

pub fn format_episode(agent: AgentKind, episode: &VacuumEpisode) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "{}", agent);
    let _ = writeln!(s, "start: {}", episode.initial);
    for (i, step) in episode.steps.iter().enumerate() {
        let _ = writeln!(
            s,
            "{:3}. {:<10} -> {}",
            i + 1,
            step.action.to_string(),
            step.after
        );
    }
    let outcome = if episode.success { "success" } else { "failure" };
    let _ = writeln!(s, "{} after {} steps", outcome, episode.len());
    s
}

pub fn format_exhaustive(report: &ExhaustiveReport) -> String {
    let mut s = String::new();
    let _ = writeln!(
        s,
        "{}, at most {} actions per start state",
        report.agent, report.max_steps
    );
    for episode in &report.episodes {
        let status = if episode.success { "✓" } else { "✗" };
        let _ = writeln!(
            s,
            "  {} {:<26} {} steps",
            status,
            episode.initial.to_string(),
            episode.len()
        );
    }
    let _ = writeln!(
        s,
        "solved {}/{} start states",
        report.successes(),
        report.episodes.len()
    );
    s
}
