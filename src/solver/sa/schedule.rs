//! Cooling schedules for simulated annealing.

/// A temperature schedule. The solver reads the current temperature once per
/// batch of neighbour trials and advances the schedule between batches; the
/// run ends when the schedule reports it is done.
pub trait CoolingSchedule: std::fmt::Debug {
    /// Resets the temperature to its starting value.
    fn reset(&mut self);

    /// The current temperature.
    fn current(&self) -> f64;

    /// Advances one step and returns the new temperature.
    fn step(&mut self) -> f64;

    /// `true` once the temperature has fallen to the stopping threshold.
    fn done(&self) -> bool {
        self.current() <= self.t_min()
    }

    /// The stopping threshold.
    fn t_min(&self) -> f64;
}

/// Classic geometric cooling: `T_k = T0 * alpha^k`.
#[derive(Debug, Clone)]
pub struct GeometricSchedule {
    t0: f64,
    alpha: f64,
    t_min: f64,
    t: f64,
}

impl GeometricSchedule {
    /// `t0` is the initial temperature, `alpha` the decay factor in (0, 1),
    /// `t_min` the stopping threshold.
    pub fn new(t0: f64, alpha: f64, t_min: f64) -> Self {
        Self {
            t0,
            alpha,
            t_min,
            t: t0,
        }
    }
}

impl CoolingSchedule for GeometricSchedule {
    fn reset(&mut self) {
        self.t = self.t0;
    }

    fn current(&self) -> f64 {
        self.t
    }

    fn step(&mut self) -> f64 {
        self.t *= self.alpha;
        self.t
    }

    fn t_min(&self) -> f64 {
        self.t_min
    }
}

/// Linear cooling: `T_k = max(t_min, T0 - k * delta)`.
#[derive(Debug, Clone)]
pub struct LinearSchedule {
    t0: f64,
    delta: f64,
    t_min: f64,
    t: f64,
}

impl LinearSchedule {
    pub fn new(t0: f64, delta: f64, t_min: f64) -> Self {
        Self {
            t0,
            delta,
            t_min,
            t: t0,
        }
    }
}

impl CoolingSchedule for LinearSchedule {
    fn reset(&mut self) {
        self.t = self.t0;
    }

    fn current(&self) -> f64 {
        self.t
    }

    fn step(&mut self) -> f64 {
        self.t = self.t_min.max(self.t - self.delta);
        self.t
    }

    fn t_min(&self) -> f64 {
        self.t_min
    }
}

/// Logarithmic (harmonic) cooling: `T_k = T0 / (1 + beta * k)`.
#[derive(Debug, Clone)]
pub struct LogarithmicSchedule {
    t0: f64,
    beta: f64,
    t_min: f64,
    k: u64,
    t: f64,
}

impl LogarithmicSchedule {
    pub fn new(t0: f64, beta: f64, t_min: f64) -> Self {
        Self {
            t0,
            beta,
            t_min,
            k: 0,
            t: t0,
        }
    }
}

impl CoolingSchedule for LogarithmicSchedule {
    fn reset(&mut self) {
        self.k = 0;
        self.t = self.t0;
    }

    fn current(&self) -> f64 {
        self.t
    }

    fn step(&mut self) -> f64 {
        self.k += 1;
        self.t = self.t0 / (1.0 + self.beta * self.k as f64);
        self.t
    }

    fn t_min(&self) -> f64 {
        self.t_min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometric_schedule_decays_and_finishes() {
        let mut schedule = GeometricSchedule::new(1.0, 0.5, 1e-3);
        assert!(!schedule.done());
        let first = schedule.current();
        assert!(schedule.step() < first);

        let mut steps = 0;
        while !schedule.done() {
            schedule.step();
            steps += 1;
            assert!(steps < 1_000, "schedule must terminate");
        }
        assert!(schedule.current() <= 1e-3);
    }

    #[test]
    fn geometric_schedule_resets_to_t0() {
        let mut schedule = GeometricSchedule::new(2.0, 0.9, 1e-3);
        schedule.step();
        schedule.step();
        schedule.reset();
        assert_eq!(schedule.current(), 2.0);
    }

    #[test]
    fn linear_schedule_clamps_at_the_threshold() {
        let mut schedule = LinearSchedule::new(0.01, 0.004, 1e-3);
        schedule.step();
        schedule.step();
        schedule.step();
        assert_eq!(schedule.current(), 1e-3);
        assert!(schedule.done());
    }

    #[test]
    fn logarithmic_schedule_decays_harmonically() {
        let mut schedule = LogarithmicSchedule::new(2.0, 1.0, 1e-3);
        assert_eq!(schedule.step(), 1.0);
        assert_eq!(schedule.step(), 2.0 / 3.0);
        schedule.reset();
        assert_eq!(schedule.current(), 2.0);
    }
}
