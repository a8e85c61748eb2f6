//! Per-surface chart lifecycle.
//!
//! A [`ChartView`] owns exactly one rendering surface. Applying a new spec
//! always produces a command that destroys the previous chart instance
//! before creating the next one: charts are replaced, never mutated in
//! place, so no stale animation or zoom state survives a dataset swap.
//!
//! Refreshes are token-guarded: every `begin_refresh` supersedes earlier
//! tickets, so when two fetches race, only the latest one's result renders,
//! regardless of arrival order.

use crate::dataset::ChartSpec;
use log::debug;

/// Lifecycle phase of a chart bound to one surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartPhase {
    Uninitialized,
    Loading,
    Rendered,
    Refreshing,
    Destroyed,
}

/// Permission to apply the result of one refresh. Superseded tickets are
/// rejected at apply time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket {
    token: u64,
}

/// Instruction for the JS bridge: tear down whatever chart the surface holds
/// (if any), then create one from `config_json`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCommand {
    pub surface_id: String,
    pub destroy_previous: bool,
    pub config_json: String,
}

/// State machine for one chart surface.
#[derive(Debug)]
pub struct ChartView {
    surface_id: String,
    phase: ChartPhase,
    latest_token: u64,
    spec: Option<ChartSpec>,
}

impl ChartView {
    pub fn new(surface_id: impl Into<String>) -> ChartView {
        ChartView {
            surface_id: surface_id.into(),
            phase: ChartPhase::Uninitialized,
            latest_token: 0,
            spec: None,
        }
    }

    pub fn phase(&self) -> ChartPhase {
        self.phase
    }

    pub fn surface_id(&self) -> &str {
        &self.surface_id
    }

    /// The currently rendered spec, if any.
    pub fn spec(&self) -> Option<&ChartSpec> {
        self.spec.as_ref()
    }

    /// Mutable access to the rendered spec, for in-place visibility
    /// toggles that do not replace the chart.
    pub fn spec_mut(&mut self) -> Option<&mut ChartSpec> {
        self.spec.as_mut()
    }

    /// Start a (re)load. Any earlier outstanding ticket is superseded.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.latest_token += 1;
        self.phase = match self.phase {
            ChartPhase::Uninitialized | ChartPhase::Loading => ChartPhase::Loading,
            ChartPhase::Rendered | ChartPhase::Refreshing => ChartPhase::Refreshing,
            ChartPhase::Destroyed => ChartPhase::Destroyed,
        };
        RefreshTicket {
            token: self.latest_token,
        }
    }

    /// Apply a completed refresh. Returns the render command, or `None` when
    /// the ticket was superseded by a newer refresh or the surface is gone;
    /// the caller simply drops the stale spec.
    pub fn apply(&mut self, ticket: RefreshTicket, spec: ChartSpec) -> Option<RenderCommand> {
        if self.phase == ChartPhase::Destroyed {
            return None;
        }
        if ticket.token != self.latest_token {
            debug!(
                "discarding superseded refresh {} for surface {}",
                ticket.token, self.surface_id
            );
            return None;
        }
        let destroy_previous = self.spec.is_some();
        let config_json = spec.to_config_json();
        self.spec = Some(spec);
        self.phase = ChartPhase::Rendered;
        Some(RenderCommand {
            surface_id: self.surface_id.clone(),
            destroy_previous,
            config_json,
        })
    }

    /// The surface is being removed; the chart and any outstanding tickets
    /// die with it.
    pub fn destroy(&mut self) {
        self.phase = ChartPhase::Destroyed;
        self.spec = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{ChartKind, ChartSpec};

    fn spec(title: &str) -> ChartSpec {
        ChartSpec::new(ChartKind::Line, title)
    }

    #[test]
    fn first_render_walks_uninitialized_loading_rendered() {
        let mut view = ChartView::new("surface");
        assert_eq!(view.phase(), ChartPhase::Uninitialized);

        let ticket = view.begin_refresh();
        assert_eq!(view.phase(), ChartPhase::Loading);

        let command = view.apply(ticket, spec("first")).unwrap();
        assert_eq!(view.phase(), ChartPhase::Rendered);
        assert!(!command.destroy_previous, "nothing to tear down yet");
    }

    #[test]
    fn refresh_replaces_the_previous_chart() {
        let mut view = ChartView::new("surface");
        let ticket = view.begin_refresh();
        view.apply(ticket, spec("first")).unwrap();

        let ticket = view.begin_refresh();
        assert_eq!(view.phase(), ChartPhase::Refreshing);
        let command = view.apply(ticket, spec("second")).unwrap();
        assert!(command.destroy_previous, "old instance must be destroyed");
        assert_eq!(view.spec().unwrap().title, "second");
    }

    #[test]
    fn later_request_wins_even_when_it_resolves_first() {
        let mut view = ChartView::new("surface");
        let ticket_a = view.begin_refresh();
        let ticket_b = view.begin_refresh();

        // B resolves first and renders.
        assert!(view.apply(ticket_b, spec("b")).is_some());
        // A's response arrives late and must be discarded.
        assert!(view.apply(ticket_a, spec("a")).is_none());
        assert_eq!(view.spec().unwrap().title, "b");
        assert_eq!(view.phase(), ChartPhase::Rendered);
    }

    #[test]
    fn destroyed_surface_accepts_nothing() {
        let mut view = ChartView::new("surface");
        let ticket = view.begin_refresh();
        view.destroy();
        assert_eq!(view.phase(), ChartPhase::Destroyed);
        assert!(view.apply(ticket, spec("late")).is_none());
        assert!(view.spec().is_none());
    }
}
