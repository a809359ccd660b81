//! Route planner facade.
//!
//! # States
//!
//! ```text
//!            build_index(settings)          build_index / configure
//!   Empty ───────────────────────────▶ Built ──────────────────────▶ Built′
//!     ▲                                  │
//!     └──── configure(no settings) ──────┘   (or a failed rebuild)
//! ```
//!
//! `find_route` only answers in `Built`.  A rebuild discards the old graph
//! and index before anything new is computed; there is no incremental
//! update path.  The catalogue itself never changes after construction.

use std::time::Instant;

use serde::Serialize;

use tc_catalogue::Catalogue;
use tc_core::RoutingSettings;
use tc_graph::ShortestPathIndex;

use crate::builder::{EdgeAnnotation, RouteGraph, RouteGraphBuilder};
use crate::{PlannerConfig, RouterError, RouterResult};

// ── Query results ─────────────────────────────────────────────────────────────

/// One step of an itinerary.  Durations are in minutes.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum RouteItem {
    Wait { stop_name: String, duration: f64 },
    Ride { bus_name: String, span_count: u32, duration: f64 },
}

impl RouteItem {
    pub fn duration(&self) -> f64 {
        match self {
            RouteItem::Wait { duration, .. } | RouteItem::Ride { duration, .. } => *duration,
        }
    }
}

/// A found route: total time and the steps that add up to it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Itinerary {
    pub total_time: f64,
    pub items:      Vec<RouteItem>,
}

/// Answer to a well-formed query between two known stops.
#[derive(Clone, Debug, PartialEq)]
pub enum RouteOutcome {
    Found(Itinerary),
    /// Both stops exist but no sequence of rides connects them.
    NoRoute,
}

impl RouteOutcome {
    pub fn itinerary(&self) -> Option<&Itinerary> {
        match self {
            RouteOutcome::Found(it) => Some(it),
            RouteOutcome::NoRoute   => None,
        }
    }
}

// ── Planner state ─────────────────────────────────────────────────────────────

/// Graph, index, and the settings they were built with.
#[derive(Debug)]
pub(crate) struct BuiltIndex {
    pub(crate) settings:    RoutingSettings,
    pub(crate) route_graph: RouteGraph,
    pub(crate) index:       ShortestPathIndex,
}

#[derive(Debug)]
pub(crate) enum PlannerState {
    Empty,
    Built(Box<BuiltIndex>),
}

/// Owns a catalogue and, once built, its routing graph and index.
#[derive(Debug)]
pub struct RoutePlanner {
    pub(crate) catalogue: Catalogue,
    pub(crate) state:     PlannerState,
}

impl RoutePlanner {
    /// A planner in the `Empty` state.
    pub fn new(catalogue: Catalogue) -> Self {
        Self { catalogue, state: PlannerState::Empty }
    }

    // ── Build phase ───────────────────────────────────────────────────────

    /// Build the routing graph and the all-pairs index, replacing any
    /// earlier build.
    ///
    /// On error the planner is left `Empty`; a half-built index is never
    /// exposed.
    pub fn build_index(&mut self, settings: &RoutingSettings) -> RouterResult<()> {
        self.state = PlannerState::Empty;
        let started = Instant::now();

        let route_graph = RouteGraphBuilder::new(&self.catalogue, settings).build()?;
        let index = ShortestPathIndex::build(&route_graph.graph)?;

        log::info!(
            "route index ready: {} stops, {} bus lines, {} edges in {:.3} s",
            self.catalogue.stop_count(),
            self.catalogue.bus_count(),
            route_graph.graph.edge_count(),
            started.elapsed().as_secs_f64()
        );

        self.state = PlannerState::Built(Box::new(BuiltIndex {
            settings: *settings,
            route_graph,
            index,
        }));
        Ok(())
    }

    /// Apply a configuration: build when routing settings are present,
    /// otherwise disable routing.
    pub fn configure(&mut self, config: &PlannerConfig) -> RouterResult<()> {
        match &config.routing_settings {
            Some(settings) => self.build_index(settings),
            None => {
                log::warn!("no routing settings configured; route queries are disabled");
                self.state = PlannerState::Empty;
                Ok(())
            }
        }
    }

    // ── State ─────────────────────────────────────────────────────────────

    pub fn is_ready(&self) -> bool {
        matches!(self.state, PlannerState::Built(_))
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    /// Settings of the current build, if any.
    pub fn settings(&self) -> Option<&RoutingSettings> {
        match &self.state {
            PlannerState::Built(b) => Some(&b.settings),
            PlannerState::Empty    => None,
        }
    }

    // ── Query phase ───────────────────────────────────────────────────────

    /// Fastest route from stop `from` to stop `to`, by name.
    ///
    /// - [`RouterError::NotReady`] before a successful build.
    /// - [`RouterError::UnknownStop`] if either name is not in the catalogue.
    /// - [`RouteOutcome::NoRoute`] if no line connects the stops.  A stop
    ///   that no line serves reaches only itself.
    pub fn find_route(&self, from: &str, to: &str) -> RouterResult<RouteOutcome> {
        let PlannerState::Built(built) = &self.state else {
            return Err(RouterError::NotReady);
        };

        let from_id = self
            .catalogue
            .stop_id(from)
            .ok_or_else(|| RouterError::UnknownStop(from.to_owned()))?;
        let to_id = self
            .catalogue
            .stop_id(to)
            .ok_or_else(|| RouterError::UnknownStop(to.to_owned()))?;

        if from_id == to_id {
            return Ok(RouteOutcome::Found(Itinerary { total_time: 0.0, items: Vec::new() }));
        }

        let rg = &built.route_graph;
        let (Some(a), Some(b)) = (rg.vertices_of(from_id), rg.vertices_of(to_id)) else {
            return Ok(RouteOutcome::NoRoute);
        };
        let Some(path) = built.index.route(&rg.graph, a.wait, b.wait) else {
            return Ok(RouteOutcome::NoRoute);
        };

        let items = path
            .edges
            .iter()
            .map(|&e| self.route_item(rg.annotation(e)))
            .collect();

        Ok(RouteOutcome::Found(Itinerary { total_time: path.weight, items }))
    }

    fn route_item(&self, annotation: &EdgeAnnotation) -> RouteItem {
        match *annotation {
            EdgeAnnotation::Wait { stop, duration } => RouteItem::Wait {
                stop_name: self.catalogue.stop(stop).name.clone(),
                duration,
            },
            EdgeAnnotation::Ride { bus, span_count, duration } => RouteItem::Ride {
                bus_name: self.catalogue.bus(bus).name.clone(),
                span_count,
                duration,
            },
        }
    }
}
