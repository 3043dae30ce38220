//! Traffic simulation driver
//!
//! Spawns one thread per vehicle. Each vehicle repeatedly arrives from a
//! random origin, waits for admission, occupies the intersection for the
//! configured service time and leaves. An [`OccupancyMonitor`] checks from
//! the outside that no two directions were ever inside together.

mod config;
mod errors;
mod monitor;
mod report;

pub use config::{pick_destination, DirectionBias, SimulationConfig};
pub use errors::{SimulationError, SimulationResult};
pub use monitor::{DirectionStats, OccupancyMonitor};
pub use report::SimulationReport;

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

use crate::controller::IntersectionController;
use crate::observability::{log_event_with_fields, Event, Logger, ObservationScope, Severity};

/// One simulation run over a fresh controller
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> SimulationResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run every vehicle to completion and shut the controller down.
    pub fn run(&self) -> SimulationResult<SimulationReport> {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let vehicles = self.config.vehicles.to_string();
        let crossings = self.config.total_crossings().to_string();
        let seed_field = seed.to_string();
        let scope = ObservationScope::with_fields(
            "SIMULATION",
            &[
                ("vehicles", vehicles.as_str()),
                ("crossings", crossings.as_str()),
                ("seed", seed_field.as_str()),
            ],
        );

        match self.run_with_seed(seed) {
            Ok(report) => {
                let admitted = report.total_admitted.to_string();
                scope.complete_with_fields(&[("admitted", admitted.as_str())]);
                Ok(report)
            }
            Err(err) => {
                scope.fail(&err.to_string());
                Err(err)
            }
        }
    }

    fn run_with_seed(&self, seed: u64) -> SimulationResult<SimulationReport> {
        let started_at = Utc::now();
        let clock = Instant::now();

        let controller = Arc::new(IntersectionController::init());
        let monitor = Arc::new(OccupancyMonitor::new());

        let halt = Arc::new(AtomicBool::new(false));

        // Every spawned vehicle is joined before this returns, on all paths.
        let driven = self
            .spawn_vehicles(seed, &controller, &monitor, &halt)
            .and_then(join_vehicles);

        let final_state = controller.snapshot();
        let metrics = controller.metrics().snapshot();
        let shutdown = Arc::try_unwrap(controller)
            .map_err(|_| SimulationError::ControllerStillShared)
            .and_then(|c| c.try_shutdown().map_err(SimulationError::from));

        driven?;
        shutdown?;

        let directions = monitor.stats();
        let total_admitted = directions.iter().map(|s| s.admitted).sum();

        Ok(SimulationReport {
            run_id: Uuid::new_v4(),
            started_at,
            elapsed_ms: u64::try_from(clock.elapsed().as_millis()).unwrap_or(u64::MAX),
            seed,
            config: self.config.clone(),
            directions,
            total_admitted,
            final_state,
            metrics,
        })
    }

    fn spawn_vehicles(
        &self,
        seed: u64,
        controller: &Arc<IntersectionController>,
        monitor: &Arc<OccupancyMonitor>,
        halt: &Arc<AtomicBool>,
    ) -> SimulationResult<Vec<VehicleHandle>> {
        spawn_fleet(self.config.vehicles, halt, |id| {
            let vehicle = Vehicle {
                id,
                rng: StdRng::seed_from_u64(seed.wrapping_add(id as u64)),
                config: self.config.clone(),
                controller: Arc::clone(controller),
                monitor: Arc::clone(monitor),
                halt: Arc::clone(halt),
            };
            thread::Builder::new()
                .name(format!("vehicle-{}", id))
                .spawn(move || vehicle.drive())
        })
    }
}

type VehicleHandle = JoinHandle<SimulationResult<()>>;

/// Spawn `count` vehicles with `spawn`.
///
/// If a spawn fails, the vehicles already running are told to halt and are
/// joined before the spawn error is returned.
fn spawn_fleet<F>(count: usize, halt: &AtomicBool, mut spawn: F) -> SimulationResult<Vec<VehicleHandle>>
where
    F: FnMut(usize) -> io::Result<VehicleHandle>,
{
    let mut handles = Vec::with_capacity(count);
    for id in 0..count {
        match spawn(id) {
            Ok(handle) => handles.push(handle),
            Err(source) => {
                halt.store(true, Ordering::SeqCst);
                if let Err(err) = join_vehicles(handles) {
                    let reason = err.to_string();
                    Logger::error("VEHICLE_FAILED", &[("reason", reason.as_str())]);
                }
                return Err(SimulationError::Spawn { id, source });
            }
        }
    }
    Ok(handles)
}

/// Join every vehicle, returning the first failure.
fn join_vehicles(handles: Vec<VehicleHandle>) -> SimulationResult<()> {
    let mut first_error = None;
    for (id, handle) in handles.into_iter().enumerate() {
        let outcome = handle.join().unwrap_or_else(|_| {
            let vehicle = id.to_string();
            log_event_with_fields(Event::VehiclePanicked, &[("vehicle", vehicle.as_str())]);
            Err(SimulationError::VehiclePanicked(id))
        });
        if let Err(err) = outcome {
            first_error.get_or_insert(err);
        }
    }
    first_error.map_or(Ok(()), Err)
}

struct Vehicle {
    id: usize,
    rng: StdRng,
    config: SimulationConfig,
    controller: Arc<IntersectionController>,
    monitor: Arc<OccupancyMonitor>,
    /// Set when the run is being abandoned; checked before each arrival.
    halt: Arc<AtomicBool>,
}

impl Vehicle {
    fn drive(mut self) -> SimulationResult<()> {
        for _ in 0..self.config.iterations {
            if self.halt.load(Ordering::SeqCst) {
                break;
            }
            thread::sleep(self.config.inter_arrival());

            let origin = self.config.pick_origin(&mut self.rng);
            let destination = pick_destination(origin, &mut self.rng);

            let arrived = Instant::now();
            self.controller.before_entry(origin, destination);
            let wait = arrived.elapsed();

            let entered = self.monitor.enter(origin, wait);
            if entered.is_ok() {
                thread::sleep(self.config.service_time());
                self.monitor.exit(origin);
            }
            self.controller.after_exit(origin, destination);

            if let Err(err) = entered {
                self.halt.store(true, Ordering::SeqCst);
                let reason = err.to_string();
                log_event_with_fields(Event::ExclusionViolation, &[("reason", reason.as_str())]);
                return Err(err);
            }

            if Logger::enabled(Severity::Trace) {
                let vehicle = self.id.to_string();
                let wait_us = wait.as_micros().to_string();
                Logger::trace(
                    "VEHICLE_CROSSED",
                    &[
                        ("vehicle", vehicle.as_str()),
                        ("origin", origin.as_str()),
                        ("destination", destination.as_str()),
                        ("wait_us", wait_us.as_str()),
                    ],
                );
            }
        }
        Ok(())
    }
}
