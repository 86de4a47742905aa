//! Per-tick locomotion state machine.
//!
//! # Tick order
//! 1. Discrete input edges: run press/release, crouch press
//!    (crouch toggle, slide start). Applied first so a press acts this tick.
//! 2. Slide timer (from the tick after launch) → slide end (stand if clear,
//!    else crouch; latch sprint while run is held).
//! 3. Lean smoothing (suppressed while run is held).
//! 4. Sprint eligibility + run duration.
//! 5. Stamina integration.
//! 6. Desired velocity.
//!
//! Refused transitions (stand-up blocked, crouch while sliding) are silent
//! no-ops. The only trace is `LocomotionOutput::stand_refused`.

use bevy::prelude::*;

use super::components::{
    LocomotionConfig, LocomotionInputs, LocomotionMode, LocomotionOutput, LocomotionState,
    ModeTransition,
};
use super::rules;
use crate::probe::ClearanceQuery;
use crate::shared::approach_exp;
use crate::stamina::Stamina;

impl LocomotionState {
    /// Advance one fixed tick
    pub fn advance(
        &mut self,
        dt: f32,
        inputs: &LocomotionInputs,
        stamina: &mut Stamina,
        config: &LocomotionConfig,
        clearance: &dyn ClearanceQuery,
    ) -> LocomotionOutput {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let start_mode = self.mode;
        let mut output = LocomotionOutput::default();

        // === Phase 1: discrete events ===
        self.move_input = rules::sanitize_move_input(inputs.move_input);
        self.lean_input = rules::sanitize_axis(inputs.lean_axis);
        self.walk_held = inputs.walk_held;
        self.apply_run_edge(inputs.run_held);
        self.is_moving = rules::is_moving(inputs.velocity, config);

        if inputs.crouch_pressed {
            self.apply_crouch_press(inputs, stamina, config, clearance, &mut output);
        }

        // === Phase 2: slide timer ===
        // Тик старта слайда не считается: длительность отсчитывается от импульса
        if self.mode == LocomotionMode::Sliding && start_mode == LocomotionMode::Sliding {
            self.slide_elapsed += dt;
            if self.slide_elapsed >= config.slide_duration {
                self.end_slide(inputs.feet_position, config, clearance, &mut output);
            }
        }

        // === Phase 3: lean ===
        let lean_target = if self.run_held {
            0.0
        } else {
            -self.lean_input * config.lean_angle
        };
        self.lean_roll = approach_exp(self.lean_roll, lean_target, config.lean_speed, dt);

        // === Phase 4: sprint eligibility ===
        self.can_sprint = rules::can_sprint(self, stamina);
        if self.can_sprint {
            self.run_duration += dt;
        } else {
            self.run_duration = 0.0;
        }

        // === Phase 5: stamina ===
        let had_stamina = !stamina.is_depleted();
        stamina.update(dt, self.can_sprint, self.mode == LocomotionMode::Sliding);
        output.stamina_depleted = had_stamina && stamina.is_depleted();

        // === Phase 6: velocity ===
        output.desired_velocity = rules::target_speed(self.mode, self.can_sprint, self.walk_held, config)
            .map(|speed| {
                rules::desired_velocity(
                    self.move_input,
                    inputs.right,
                    inputs.forward,
                    speed,
                    inputs.velocity.y,
                )
            });

        output.collision_height = config.height_for(self.mode);
        if self.mode != start_mode {
            output.transition = Some(ModeTransition {
                from: start_mode,
                to: self.mode,
            });
        }

        output
    }

    fn apply_run_edge(&mut self, run_held: bool) {
        let pressed = run_held && !self.run_held;

        if pressed {
            // Sprint press cancels any lean immediately
            self.lean_roll = 0.0;
        }
        // Latch clears on release
        if !run_held {
            self.sprint_blocked_until_run_released = false;
        }

        self.run_held = run_held;
    }

    fn apply_crouch_press(
        &mut self,
        inputs: &LocomotionInputs,
        stamina: &Stamina,
        config: &LocomotionConfig,
        clearance: &dyn ClearanceQuery,
        output: &mut LocomotionOutput,
    ) {
        // Sprinting is judged on the state after this tick's run edge
        let sprinting = rules::can_sprint(self, stamina);

        if rules::can_start_slide(self, sprinting, inputs.grounded, config) {
            self.mode = LocomotionMode::Sliding;
            self.slide_elapsed = 0.0;
            self.run_duration = 0.0;
            output.impulse = Some(rules::slide_impulse(inputs.velocity, inputs.forward, config));
            return;
        }

        match self.mode {
            LocomotionMode::Standing => {
                self.mode = LocomotionMode::Crouching;
                if inputs.grounded && config.crouch_stomp_force > 0.0 {
                    output.impulse = Some(Vec3::NEG_Y * config.crouch_stomp_force);
                }
            }
            LocomotionMode::Crouching => {
                if rules::can_stand_up(inputs.feet_position, config, clearance) {
                    self.mode = LocomotionMode::Standing;
                } else {
                    output.stand_refused = true;
                }
            }
            // Crouch while sliding: no-op
            LocomotionMode::Sliding => {}
        }
    }

    fn end_slide(
        &mut self,
        feet: Vec3,
        config: &LocomotionConfig,
        clearance: &dyn ClearanceQuery,
        output: &mut LocomotionOutput,
    ) {
        self.slide_elapsed = 0.0;
        // Run уже отпущен → латчить нечего
        self.sprint_blocked_until_run_released = self.run_held;

        if rules::can_stand_up(feet, config, clearance) {
            self.mode = LocomotionMode::Standing;
        } else {
            self.mode = LocomotionMode::Crouching;
            output.stand_refused = true;
        }
    }
}
