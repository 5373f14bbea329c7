// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::graph::{Graph, Node, NodeIdx};
use crate::projection::{polyline_distance, project, ScreenPoint, PIXELS_PER_DEGREE};
use crate::{find_route, Error, GeoPoint, Result, Route};

/// Thresholds used by the [RouteTracker].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerOptions {
    /// Maximum distance from the active route, in [projected](crate::projection) units,
    /// at which a position is still considered on course.
    pub off_course_threshold: f64,

    /// Distance from the destination, in meters, at which the destination is considered reached.
    pub arrival_radius: f64,

    /// Scale of the projection used for the on-course test.
    pub pixels_per_degree: f64,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            off_course_threshold: 30.0,
            arrival_radius: 10.0,
            pixels_per_degree: PIXELS_PER_DEGREE,
        }
    }
}

/// Notifications produced by the [RouteTracker] for the display layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A new active route was computed; see [RouteTracker::active_route].
    RouteComputed,

    /// The position has left the active route; a new route is computed.
    OffCourse,

    /// The destination can't be reached from the current position.
    /// The previous active route (if any) is kept.
    NoPathFound,

    /// The destination was reached and tracking has stopped.
    Arrived,
}

/// Holds the active route and the driving destination, and follows
/// position updates against them ("drive there" mode).
///
/// The tracker is either idle or tracking. Tracking starts with
/// [RouteTracker::start_driving] and ends on arrival, [RouteTracker::cancel]
/// or [RouteTracker::reset].
#[derive(Debug, Clone, Default)]
pub struct RouteTracker {
    options: TrackerOptions,
    destination: Option<NodeIdx>,
    route: Option<Route>,
    tracking: bool,
}

impl RouteTracker {
    pub fn new(options: TrackerOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &TrackerOptions {
        &self.options
    }

    pub fn destination(&self) -> Option<NodeIdx> {
        self.destination
    }

    pub fn active_route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Computes a route between two graph nodes and makes it the active route.
    ///
    /// Returns `Ok(None)` without touching the active route if `start == dest`.
    /// On failure the active route is left unchanged.
    pub fn route_between(
        &mut self,
        g: &Graph,
        start: NodeIdx,
        dest: NodeIdx,
    ) -> Result<Option<&Route>> {
        if start == dest {
            return Ok(None);
        }

        let route = find_route(g, start, dest)?;
        Ok(Some(&*self.route.insert(route)))
    }

    /// Records the driving destination. Doesn't start tracking by itself.
    ///
    /// An active route leading elsewhere is dropped, so that the next
    /// position update computes a new one.
    pub fn set_destination(&mut self, dest: NodeIdx) {
        self.destination = Some(dest);
        if self.route.as_ref().is_some_and(|r| r.destination() != dest) {
            self.route = None;
        }
    }

    /// Starts following position updates.
    pub fn start_driving(&mut self) -> Result<()> {
        let dest = self.destination.ok_or(Error::NoDestinationSelected)?;
        if self.route.as_ref().is_some_and(|r| r.destination() != dest) {
            self.route = None;
        }

        log::info!("tracking started, destination {}", dest);
        self.tracking = true;
        Ok(())
    }

    /// Processes a new live position.
    ///
    /// Does nothing unless tracking. Otherwise, (re)computes the active route
    /// if there's none or if `position` is off course, and stops tracking once
    /// `position` is within [TrackerOptions::arrival_radius] of the destination.
    pub fn on_position_update(&mut self, g: &Graph, position: GeoPoint) -> Result<Vec<Event>> {
        let mut events = Vec::default();
        if !self.tracking {
            return Ok(events);
        }

        let dest = self.destination.ok_or(Error::NoDestinationSelected)?;
        let dest_position = g
            .get_node(dest)
            .ok_or(Error::InvalidReference(dest))?
            .position;
        let current = Node::dummy(position);

        let needs_route = if self.route.is_none() {
            true
        } else if self.is_on_course(g, position)? {
            false
        } else {
            log::warn!("off course at {}, rerouting", position);
            events.push(Event::OffCourse);
            true
        };

        if needs_route {
            let nearest = g.find_nearest_node(position).ok_or(Error::EmptyModel)?;
            match find_route(g, nearest, dest) {
                Ok(route) => {
                    self.route = Some(route.with_head(g, current));
                    events.push(Event::RouteComputed);
                }
                Err(Error::NoPathFound { .. }) => {
                    log::warn!("no route from {} to destination {}", position, dest);
                    events.push(Event::NoPathFound);
                }
                Err(e) => return Err(e),
            }
        }

        if position.distance_to(dest_position) <= self.options.arrival_radius {
            log::info!("arrived at destination {}", dest);
            self.clear();
            events.push(Event::Arrived);
        }

        Ok(events)
    }

    /// Checks whether `position` lies within [TrackerOptions::off_course_threshold]
    /// of any segment of the active route.
    ///
    /// Both the position and the route are projected relative to the
    /// [center node](Graph::center_node). Without an active route, nothing is on course.
    pub fn is_on_course(&self, g: &Graph, position: GeoPoint) -> Result<bool> {
        let Some(route) = &self.route else {
            return Ok(false);
        };

        let origin = g.center_node()?.position;
        let ppd = self.options.pixels_per_degree;
        let here = project(origin, position, ppd);
        let polyline: Vec<ScreenPoint> = route
            .points(g)
            .into_iter()
            .map(|p| project(origin, p, ppd))
            .collect();

        Ok(polyline_distance(here, &polyline)
            .is_some_and(|d| d < self.options.off_course_threshold))
    }

    /// Stops tracking and forgets the destination and the active route.
    pub fn cancel(&mut self) {
        log::info!("tracking cancelled");
        self.clear();
    }

    /// Forgets everything, as the active route refers to a map which is no longer loaded.
    pub fn reset(&mut self) {
        log::info!("tracker reset");
        self.clear();
    }

    fn clear(&mut self) {
        self.tracking = false;
        self.destination = None;
        self.route = None;
    }
}
