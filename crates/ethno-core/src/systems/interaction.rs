//! Interaction System
//!
//! Spatial Prisoner's Dilemma between orthogonally adjacent agents.

use bevy_ecs::prelude::*;

use super::GenerationReport;
use crate::components::agent::Agent;
use crate::components::grid::{Direction, Grid};
use crate::config::{Payoff, SimParams};

/// Plays one round of the dilemma between `a` and `b`.
///
/// Same-color pairs decide by `inner_coop`, mixed pairs by `outer_coop`.
/// A cooperator pays `give_cost` and its partner collects
/// `receive_benefit`; mutual defection changes nothing.
pub fn play_dilemma(a: &mut Agent, b: &mut Agent, payoff: &Payoff) {
    let give = payoff.give_cost;
    let gain = payoff.receive_benefit;

    if a.same_group(b) {
        match (a.inner_coop, b.inner_coop) {
            (true, true) => {
                a.give(give);
                a.receive(gain);
                b.give(give);
                b.receive(gain);
            }
            (true, false) => {
                a.give(give);
                b.receive(gain);
            }
            (false, true) => {
                b.give(give);
                a.receive(gain);
            }
            (false, false) => {}
        }
    } else {
        match (a.outer_coop, b.outer_coop) {
            (true, true) => {
                a.give(give);
                b.receive(gain);
                b.give(give);
                a.receive(gain);
            }
            (true, false) => {
                a.give(give);
                b.receive(gain);
            }
            (false, true) => {
                b.give(give);
                a.receive(gain);
            }
            (false, false) => {}
        }
    }
}

/// Index of the partner along one axis, or `None` when wrapping would
/// revisit a pair already played (size 2) or pair a cell with itself (size 1).
fn partner_index(size: usize, index: usize) -> Option<usize> {
    let next = (index + 1) % size;
    if size > 2 || next > index {
        Some(next)
    } else {
        None
    }
}

/// Plays every adjacent pair once: first all horizontal pairs row by row,
/// then all vertical pairs column by column. Pairs with an empty cell are
/// skipped. Returns the number of encounters played.
pub fn interact(grid: &mut Grid, payoff: &Payoff) -> usize {
    let size = grid.size();
    let mut encounters = 0;

    for row in 0..size {
        for col in 0..size {
            if partner_index(size, col).is_none() {
                continue;
            }
            let partner = grid.neighbor((row, col), Direction::Right);
            if let Some((a, b)) = grid.pair_mut((row, col), partner) {
                play_dilemma(a, b, payoff);
                encounters += 1;
            }
        }
    }

    for col in 0..size {
        for row in 0..size {
            if partner_index(size, row).is_none() {
                continue;
            }
            let partner = grid.neighbor((row, col), Direction::Down);
            if let Some((a, b)) = grid.pair_mut((row, col), partner) {
                play_dilemma(a, b, payoff);
                encounters += 1;
            }
        }
    }

    encounters
}

/// Interaction phase of a generation
pub fn run_interaction(
    mut grid: ResMut<Grid>,
    params: Res<SimParams>,
    mut report: ResMut<GenerationReport>,
) {
    report.encounters = interact(&mut grid, &params.payoff);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::agent::ColorId;

    const EPS: f64 = 1e-12;

    fn agent(color: usize, inner: bool, outer: bool) -> Agent {
        Agent::new(ColorId(color), inner, outer, 0.12)
    }

    #[test]
    fn test_ingroup_mutual_cooperation_nets_two_cents() {
        let mut a = agent(0, true, false);
        let mut b = agent(0, true, false);
        play_dilemma(&mut a, &mut b, &Payoff::default());
        assert!((a.potential - 0.14).abs() < EPS);
        assert!((b.potential - 0.14).abs() < EPS);
    }

    #[test]
    fn test_outgroup_mutual_cooperation_nets_two_cents() {
        let mut a = agent(0, false, true);
        let mut b = agent(1, false, true);
        play_dilemma(&mut a, &mut b, &Payoff::default());
        assert!((a.potential - 0.14).abs() < EPS);
        assert!((b.potential - 0.14).abs() < EPS);
    }

    #[test]
    fn test_one_sided_cooperation() {
        let payoff = Payoff::default();

        let mut giver = agent(0, true, false);
        let mut taker = agent(0, false, false);
        play_dilemma(&mut giver, &mut taker, &payoff);
        assert!((giver.potential - 0.11).abs() < EPS);
        assert!((taker.potential - 0.15).abs() < EPS);

        let mut taker = agent(2, true, false);
        let mut giver = agent(1, true, true);
        play_dilemma(&mut taker, &mut giver, &payoff);
        assert!((giver.potential - 0.11).abs() < EPS);
        assert!((taker.potential - 0.15).abs() < EPS);
    }

    #[test]
    fn test_mutual_defection_is_a_no_op() {
        let payoff = Payoff::default();

        let mut a = agent(0, false, true);
        let mut b = agent(0, false, true);
        play_dilemma(&mut a, &mut b, &payoff);
        assert_eq!(a.potential, 0.12);
        assert_eq!(b.potential, 0.12);

        let mut a = agent(0, true, false);
        let mut b = agent(1, true, false);
        play_dilemma(&mut a, &mut b, &payoff);
        assert_eq!(a.potential, 0.12);
        assert_eq!(b.potential, 0.12);
    }

    #[test]
    fn test_partner_index() {
        assert_eq!(partner_index(1, 0), None);
        assert_eq!(partner_index(2, 0), Some(1));
        assert_eq!(partner_index(2, 1), None);
        assert_eq!(partner_index(5, 4), Some(0));
    }

    #[test]
    fn test_wrapping_pairs_on_larger_grid() {
        // (0,0) and (0,4) only meet through the horizontal wrap
        let mut grid = Grid::new(5);
        grid.place((0, 0), agent(0, true, true));
        grid.place((0, 4), agent(0, true, true));
        assert_eq!(interact(&mut grid, &Payoff::default()), 1);
        assert!((grid.get((0, 0)).unwrap().potential - 0.14).abs() < EPS);
        assert!((grid.get((0, 4)).unwrap().potential - 0.14).abs() < EPS);

        // (0,2) and (4,2) only meet through the vertical wrap
        let mut grid = Grid::new(5);
        grid.place((0, 2), agent(1, false, true));
        grid.place((4, 2), agent(2, false, true));
        assert_eq!(interact(&mut grid, &Payoff::default()), 1);
        assert!((grid.get((4, 2)).unwrap().potential - 0.14).abs() < EPS);
    }

    #[test]
    fn test_payoffs_accumulate_across_neighbors() {
        // A samaritan surrounded by four kin samaritans plays four encounters
        let mut grid = Grid::new(3);
        grid.place((1, 1), agent(0, true, true));
        for cell in grid.neighbors((1, 1)) {
            grid.place(cell, agent(0, true, true));
        }
        interact(&mut grid, &Payoff::default());
        assert!((grid.get((1, 1)).unwrap().potential - 0.20).abs() < EPS);
    }

    #[test]
    fn test_two_by_two_pairs_play_once() {
        let mut grid = Grid::new(2);
        grid.place((0, 0), agent(0, true, true));
        grid.place((0, 1), agent(0, true, true));
        assert_eq!(interact(&mut grid, &Payoff::default()), 1);
        assert!((grid.get((0, 0)).unwrap().potential - 0.14).abs() < EPS);
        assert!((grid.get((0, 1)).unwrap().potential - 0.14).abs() < EPS);
    }

    #[test]
    fn test_single_cell_never_plays_itself() {
        let mut grid = Grid::new(1);
        grid.place((0, 0), agent(0, true, true));
        assert_eq!(interact(&mut grid, &Payoff::default()), 0);
        assert_eq!(grid.get((0, 0)).unwrap().potential, 0.12);
    }

    #[test]
    fn test_empty_cells_are_skipped() {
        let mut grid = Grid::new(4);
        grid.place((2, 2), agent(0, true, true));
        assert_eq!(interact(&mut grid, &Payoff::default()), 0);
    }
}
