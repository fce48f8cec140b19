//! Two-body, one-axis elastic collision simulation.
//!
//! [`SimulationState`] owns both bodies, the simulation clock and the collision
//! cooldown.  It is a plain value with no ECS dependencies beyond being a
//! [`Resource`], so every rule below is unit-tested without a window.
//!
//! ## Step order
//!
//! 1. Advance the clock and integrate positions (`x += v·dt`).
//! 2. Resolve body–body contact (approaching + cooldown elapsed).
//! 3. Reflect each body off the arena walls.
//!
//! Positions are always integrated before any overlap test in the same step.
//!
//! ## Units
//!
//! Positions are display units measured from the left wall.  Velocities are
//! stored as display units per second, i.e. physical m/s × `scale`.

use bevy::prelude::*;
use bevy::winit::WinitSettings;

use crate::config::SimConfig;
use crate::constants::ARENA_WIDTH;
use crate::error::{validate_nonzero_mass_sum, SimResult};
use crate::menu::{AppState, CollisionInputs};

/// A point mass moving along the arena's horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: f32,
    /// Display units per second.
    pub velocity: f32,
    pub mass: f32,
    pub radius: f32,
}

impl Body {
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }

    /// Leading or trailing edge has reached either wall.
    #[inline]
    pub fn touches_wall(&self, arena_width: f32) -> bool {
        self.position - self.radius <= 0.0 || self.position + self.radius >= arena_width
    }

    /// Negate the velocity if the body is at a wall and still moving into it.
    ///
    /// No position correction: a body may overlap the wall for a frame.  A
    /// body already heading back into the arena is left alone, so it cannot
    /// flip twice while its edge is still past the wall.
    pub fn reflect_off_walls(&mut self, arena_width: f32) -> bool {
        let into_left = self.position - self.radius <= 0.0 && self.velocity < 0.0;
        let into_right = self.position + self.radius >= arena_width && self.velocity > 0.0;
        if into_left || into_right {
            self.velocity = -self.velocity;
            true
        } else {
            false
        }
    }
}

/// Centres within the sum of the radii.
#[inline]
pub fn bodies_in_contact(a: &Body, b: &Body) -> bool {
    (a.position - b.position).abs() <= a.radius + b.radius
}

/// `(v1 − v2)(x1 − x2) < 0`: the gap between the bodies is shrinking.
#[inline]
pub fn is_approaching(a: &Body, b: &Body) -> bool {
    (a.velocity - b.velocity) * (a.position - b.position) < 0.0
}

/// 1-D elastic collision in physical units.
///
/// ```text
/// v1' = (m1 − m2)/(m1 + m2)·u1 + 2·m2/(m1 + m2)·u2
/// v2' = 2·m1/(m1 + m2)·u1 + (m2 − m1)/(m1 + m2)·u2
/// ```
pub fn elastic_velocities(u1: f32, u2: f32, m1: f32, m2: f32) -> SimResult<(f32, f32)> {
    validate_nonzero_mass_sum(m1, m2)?;
    let sum = m1 + m2;
    let v1 = ((m1 - m2) / sum) * u1 + ((2.0 * m2) / sum) * u2;
    let v2 = ((2.0 * m1) / sum) * u1 + ((m2 - m1) / sum) * u2;
    Ok((v1, v2))
}

/// Elastic collision on stored (scaled) velocities.
///
/// Converts to physical units by dividing by `scale`, applies
/// [`elastic_velocities`], and converts back.
pub fn elastic_collision(
    v1: f32,
    v2: f32,
    m1: f32,
    m2: f32,
    scale: f32,
) -> SimResult<(f32, f32)> {
    let (w1, w2) = elastic_velocities(v1 / scale, v2 / scale, m1, m2)?;
    Ok((w1 * scale, w2 * scale))
}

/// What happened during one [`SimulationState::step`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub collided: bool,
    pub wall_bounces: [bool; 2],
}

/// Complete simulation state, advanced once per fixed step.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SimulationState {
    pub bodies: [Body; 2],
    /// Simulated seconds since the run started. Kept in `f64` so a long run
    /// still advances by a 60 Hz step.
    pub clock: f64,
    /// Clock time of the last resolved collision.
    pub last_collision: Option<f64>,
    pub cooldown: f32,
    pub scale: f32,
    pub arena_width: f32,
    pub collision_count: u32,
}

impl SimulationState {
    /// Build the initial state from the submitted form.
    ///
    /// Fails if `mass1 + mass2` is not positive, since the collision law
    /// would divide by it.
    pub fn new(inputs: &CollisionInputs, config: &SimConfig) -> SimResult<Self> {
        inputs.validate()?;
        let body = |position: f32, velocity: f32, mass: f32| Body {
            position,
            velocity: velocity * config.velocity_scale,
            mass,
            radius: config.body_radius,
        };
        Ok(Self {
            bodies: [
                body(config.body1_start_x, inputs.velocity1, inputs.mass1),
                body(config.body2_start_x, inputs.velocity2, inputs.mass2),
            ],
            clock: 0.0,
            last_collision: None,
            cooldown: config.collision_cooldown_secs,
            scale: config.velocity_scale,
            arena_width: ARENA_WIDTH,
            collision_count: 0,
        })
    }

    fn cooldown_elapsed(&self) -> bool {
        match self.last_collision {
            None => true,
            Some(t) => self.clock - t >= f64::from(self.cooldown),
        }
    }

    /// Advance one frame of `dt` seconds.
    pub fn step(&mut self, dt: f32) -> StepOutcome {
        let mut outcome = StepOutcome::default();

        self.clock += f64::from(dt);
        for body in self.bodies.iter_mut() {
            body.advance(dt);
        }

        let [a, b] = self.bodies;
        if bodies_in_contact(&a, &b) && is_approaching(&a, &b) && self.cooldown_elapsed() {
            match elastic_collision(a.velocity, b.velocity, a.mass, b.mass, self.scale) {
                Ok((v1, v2)) => {
                    self.bodies[0].velocity = v1;
                    self.bodies[1].velocity = v2;
                    self.last_collision = Some(self.clock);
                    self.collision_count += 1;
                    outcome.collided = true;
                }
                Err(err) => warn!("Skipping collision impulse: {err}"),
            }
        }

        for (body, bounced) in self.bodies.iter_mut().zip(outcome.wall_bounces.iter_mut()) {
            *bounced = body.reflect_off_walls(self.arena_width);
        }

        outcome
    }

    /// Current velocities in physical units (m/s), for display.
    pub fn physical_velocities(&self) -> [f32; 2] {
        self.bodies.map(|b| b.velocity / self.scale)
    }

    /// Total momentum in physical units.
    pub fn momentum(&self) -> f32 {
        self.bodies
            .iter()
            .map(|b| b.mass * b.velocity / self.scale)
            .sum()
    }

    /// Total kinetic energy in physical units.
    pub fn kinetic_energy(&self) -> f32 {
        self.bodies
            .iter()
            .map(|b| {
                let u = b.velocity / self.scale;
                0.5 * b.mass * u * u
            })
            .sum()
    }
}

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(AppState::Running),
            (
                init_simulation_state,
                enable_continuous_redraw,
                crate::rendering::setup_arena,
            )
                .chain(),
        )
        .add_systems(
            FixedUpdate,
            advance_simulation_system.run_if(in_state(AppState::Running)),
        )
        .add_systems(
            Update,
            (
                crate::rendering::sync_body_transforms_system,
                crate::rendering::telemetry_display_system,
            )
                .run_if(in_state(AppState::Running)),
        );
    }
}

/// Build [`SimulationState`] from the submitted [`CollisionInputs`].
pub fn init_simulation_state(
    mut commands: Commands,
    inputs: Option<Res<CollisionInputs>>,
    config: Res<SimConfig>,
) {
    let Some(inputs) = inputs else {
        error!("Entered Running without submitted inputs");
        return;
    };
    match SimulationState::new(&inputs, &config) {
        Ok(state) => {
            commands.insert_resource(state);
        }
        Err(err) => error!("Cannot start simulation: {err}"),
    }
}

/// Render every frame once the bodies are moving.
pub fn enable_continuous_redraw(mut commands: Commands) {
    commands.insert_resource(WinitSettings::game());
}

/// Fixed-step driver.  In `FixedUpdate`, `Time` is the fixed clock, so `dt`
/// is the configured step regardless of render rate.
pub fn advance_simulation_system(time: Res<Time>, state: Option<ResMut<SimulationState>>) {
    let Some(mut state) = state else {
        return;
    };
    let outcome = state.step(time.delta_secs());
    if outcome.collided {
        let [v1, v2] = state.physical_velocities();
        info!(
            "Collision #{} at t = {:.2}s: v1 = {:.2} m/s, v2 = {:.2} m/s",
            state.collision_count, state.clock, v1, v2
        );
    }
    for (i, bounced) in outcome.wall_bounces.iter().enumerate() {
        if *bounced {
            debug!("Body {} bounced off a wall at t = {:.2}s", i + 1, state.clock);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() <= EPS * (1.0 + a.abs().max(b.abs()))
    }

    fn body(position: f32, velocity: f32, mass: f32) -> Body {
        Body {
            position,
            velocity,
            mass,
            radius: 20.0,
        }
    }

    fn state_with(a: Body, b: Body) -> SimulationState {
        SimulationState {
            bodies: [a, b],
            clock: 0.0,
            last_collision: None,
            cooldown: 0.2,
            scale: 60.0,
            arena_width: ARENA_WIDTH,
            collision_count: 0,
        }
    }

    // ── collision law ─────────────────────────────────────────────────────────

    #[test]
    fn collision_conserves_momentum_and_energy() {
        let cases = [
            (2.0, 1.0, 3.0, -2.0),
            (1.0, 5.0, 4.0, 0.0),
            (0.3, 7.5, -1.25, 2.5),
            (10.0, 0.1, 0.0, -9.0),
            (1.0, 1.0, 0.0, 0.0),
        ];
        for (m1, m2, u1, u2) in cases {
            let (v1, v2) = elastic_velocities(u1, u2, m1, m2).unwrap();
            let p0 = m1 * u1 + m2 * u2;
            let p1 = m1 * v1 + m2 * v2;
            let e0 = 0.5 * m1 * u1 * u1 + 0.5 * m2 * u2 * u2;
            let e1 = 0.5 * m1 * v1 * v1 + 0.5 * m2 * v2 * v2;
            assert!(approx(p0, p1), "momentum {p0} vs {p1} for {m1},{m2}");
            assert!(approx(e0, e1), "energy {e0} vs {e1} for {m1},{m2}");
        }
    }

    #[test]
    fn equal_masses_swap_velocities_exactly() {
        for (u1, u2) in [(3.0, -2.0), (0.0, 4.5), (-1.5, -7.25)] {
            let (v1, v2) = elastic_velocities(u1, u2, 2.5, 2.5).unwrap();
            assert_eq!(v1, u2);
            assert_eq!(v2, u1);
        }
    }

    #[test]
    fn collision_is_reversible() {
        let (m1, m2, u1, u2) = (2.0, 1.0, 3.0, -2.0);
        let (v1, v2) = elastic_velocities(u1, u2, m1, m2).unwrap();
        // Running the outgoing velocities back in reverse recovers the inputs.
        let (r1, r2) = elastic_velocities(-v1, -v2, m1, m2).unwrap();
        assert!(approx(-r1, u1), "{r1} vs {u1}");
        assert!(approx(-r2, u2), "{r2} vs {u2}");
    }

    #[test]
    fn scaled_collision_matches_physical_law() {
        let (v1, v2) = elastic_collision(180.0, -120.0, 2.0, 1.0, 60.0).unwrap();
        assert!(approx(v1 / 60.0, -1.0 / 3.0), "{v1}");
        assert!(approx(v2 / 60.0, 14.0 / 3.0), "{v2}");
    }

    #[test]
    fn degenerate_mass_sum_is_an_error() {
        assert!(elastic_velocities(1.0, -1.0, 0.0, 0.0).is_err());
        assert!(elastic_collision(60.0, -60.0, 2.0, -2.0, 60.0).is_err());
        assert!(elastic_velocities(1.0, 1.0, f32::INFINITY, 1.0).is_err());
    }

    #[test]
    fn negative_mass_sum_still_conserves() {
        let (m1, m2, u1, u2) = (-2.0, -1.0, 3.0, -2.0);
        let (v1, v2) = elastic_velocities(u1, u2, m1, m2).expect("sum is non-zero");
        assert!(approx(m1 * u1 + m2 * u2, m1 * v1 + m2 * v2));
        assert!(approx(
            m1 * u1 * u1 + m2 * u2 * u2,
            m1 * v1 * v1 + m2 * v2 * v2
        ));
    }

    // ── contact predicates ────────────────────────────────────────────────────

    #[test]
    fn contact_is_inclusive_of_touching_edges() {
        assert!(bodies_in_contact(&body(100.0, 0.0, 1.0), &body(140.0, 0.0, 1.0)));
        assert!(!bodies_in_contact(&body(100.0, 0.0, 1.0), &body(140.5, 0.0, 1.0)));
    }

    #[test]
    fn approaching_depends_on_relative_motion() {
        let left = body(100.0, 60.0, 1.0);
        let right = body(130.0, -60.0, 1.0);
        assert!(is_approaching(&left, &right));
        assert!(is_approaching(&right, &left));
        let separating = body(130.0, 120.0, 1.0);
        assert!(!is_approaching(&left, &separating));
    }

    // ── walls ─────────────────────────────────────────────────────────────────

    #[test]
    fn wall_flips_once_then_not_while_leaving() {
        let mut state = state_with(body(25.0, -600.0, 1.0), body(500.0, 0.0, 1.0));
        let first = state.step(1.0 / 60.0);
        assert!(first.wall_bounces[0]);
        assert_eq!(state.bodies[0].velocity, 600.0);
        let second = state.step(1.0 / 60.0);
        assert!(!second.wall_bounces[0]);
        assert_eq!(state.bodies[0].velocity, 600.0);
    }

    #[test]
    fn deep_wall_overlap_does_not_trap_body() {
        // Edge 15 units past the wall, moving out slower than the overlap.
        let mut b = body(5.0, 60.0, 1.0);
        assert!(b.touches_wall(ARENA_WIDTH));
        assert!(!b.reflect_off_walls(ARENA_WIDTH));
        b.advance(1.0 / 60.0);
        assert!(!b.reflect_off_walls(ARENA_WIDTH));
        assert_eq!(b.velocity, 60.0);
    }

    #[test]
    fn right_wall_reflects() {
        let mut b = body(ARENA_WIDTH - 20.0, 30.0, 1.0);
        assert!(b.reflect_off_walls(ARENA_WIDTH));
        assert_eq!(b.velocity, -30.0);
    }

    #[test]
    fn no_position_clamping_at_wall() {
        let mut state = state_with(body(21.0, -600.0, 1.0), body(500.0, 0.0, 1.0));
        state.step(1.0 / 60.0);
        assert!(approx(state.bodies[0].position, 11.0));
    }

    // ── cooldown ──────────────────────────────────────────────────────────────

    #[test]
    fn overlapping_bodies_get_one_impulse_per_cooldown_window() {
        let mut state = state_with(body(400.0, 60.0, 1.0), body(430.0, -60.0, 1.0));
        let dt = 1.0 / 60.0;

        assert!(state.step(dt).collided);
        assert_eq!(state.collision_count, 1);

        // Force them back into an approaching overlap every frame; the
        // cooldown must hold until 0.2 s of simulated time has passed.
        let mut impulses_in_window = 0;
        for _ in 0..11 {
            state.bodies[0].position = 400.0;
            state.bodies[1].position = 430.0;
            state.bodies[0].velocity = 60.0;
            state.bodies[1].velocity = -60.0;
            if state.step(dt).collided {
                impulses_in_window += 1;
            }
        }
        assert_eq!(impulses_in_window, 0, "no impulse inside the cooldown");

        // Step well past the window: the next approaching contact resolves.
        let mut resolved = false;
        for _ in 0..3 {
            state.bodies[0].position = 400.0;
            state.bodies[1].position = 430.0;
            state.bodies[0].velocity = 60.0;
            state.bodies[1].velocity = -60.0;
            resolved |= state.step(dt).collided;
        }
        assert!(resolved);
        assert_eq!(state.collision_count, 2);
    }

    #[test]
    fn separating_overlap_is_not_resolved() {
        let mut state = state_with(body(400.0, -60.0, 1.0), body(430.0, 60.0, 1.0));
        assert!(!state.step(1.0 / 60.0).collided);
        assert_eq!(state.bodies[0].velocity, -60.0);
    }

    #[test]
    fn cooldown_still_expires_after_a_long_run() {
        let mut state = state_with(body(390.0, 60.0, 1.0), body(420.0, -60.0, 1.0));
        // About a week of simulated time.
        state.clock = 600_000.0;
        state.last_collision = Some(600_000.0);

        let start = state.clock;
        state.step(1.0 / 60.0);
        assert!(state.clock > start, "clock stalled at {start}");

        // Still inside the window: bodies approach but no impulse yet.
        state.last_collision = Some(state.clock);
        for _ in 0..11 {
            state.bodies = [body(390.0, 60.0, 1.0), body(420.0, -60.0, 1.0)];
            assert!(!state.step(1.0 / 60.0).collided);
        }
        // 0.2 s = 12 steps at 60 Hz.
        let mut fired = false;
        for _ in 0..3 {
            state.bodies = [body(390.0, 60.0, 1.0), body(420.0, -60.0, 1.0)];
            fired |= state.step(1.0 / 60.0).collided;
        }
        assert!(fired, "cooldown never elapsed at t = {}", state.clock);
    }

    // ── construction / end-to-end ─────────────────────────────────────────────

    #[test]
    fn new_scales_velocities_and_places_bodies() {
        let state = SimulationState::new(&CollisionInputs::default(), &SimConfig::default())
            .expect("defaults are valid");
        assert_eq!(state.bodies[0].position, 200.0);
        assert_eq!(state.bodies[1].position, 600.0);
        assert_eq!(state.bodies[0].velocity, 180.0);
        assert_eq!(state.bodies[1].velocity, -120.0);
        assert_eq!(state.bodies[0].radius, 20.0);
        assert_eq!(state.physical_velocities(), [3.0, -2.0]);
        assert!(state.last_collision.is_none());
    }

    #[test]
    fn new_rejects_zero_mass_sum() {
        let inputs = CollisionInputs {
            mass1: 0.0,
            velocity1: 1.0,
            mass2: 0.0,
            velocity2: -1.0,
        };
        assert!(SimulationState::new(&inputs, &SimConfig::default()).is_err());
    }

    #[test]
    fn default_scenario_first_collision() {
        let mut state =
            SimulationState::new(&CollisionInputs::default(), &SimConfig::default()).unwrap();
        assert!(approx(state.momentum(), 4.0));
        let energy_before = state.kinetic_energy();

        let mut steps = 0;
        while !state.step(1.0 / 60.0).collided {
            steps += 1;
            assert!(steps < 200, "bodies never met");
        }

        // 400 units apart, closing at 300 units/s, contact at 40 → ~1.2 s.
        assert!((state.clock - 1.2).abs() < 0.05, "clock {}", state.clock);
        let [v1, v2] = state.physical_velocities();
        assert!(approx(v1, -1.0 / 3.0), "v1 = {v1}");
        assert!(approx(v2, 14.0 / 3.0), "v2 = {v2}");
        assert!(approx(state.momentum(), 4.0));
        assert!(approx(state.kinetic_energy(), energy_before));
    }
}
