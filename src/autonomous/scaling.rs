use parking_lot::Mutex;
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct SystemMetrics {
    pub current_load: Decimal,
    pub cpu_usage: String,
    pub memory_usage: String,
    pub api_requests_per_minute: u32,
    pub active_users: u32,
    pub scaling_needed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScalingAction {
    ScaleUp {
        old_capacity: u32,
        new_capacity: u32,
        reason: &'static str,
        estimated_cost_increase: String,
        revenue_protection: String,
    },
    Maintain {
        current_capacity: u32,
        reason: &'static str,
        cost_optimization: &'static str,
    },
}

impl ScalingAction {
    pub fn label(&self) -> &'static str {
        match self {
            ScalingAction::ScaleUp { .. } => "scale_up",
            ScalingAction::Maintain { .. } => "maintain",
        }
    }
}

/// Simulated capacity controller.
///
/// Capacity is owned by the manager and only grows: when observed load
/// exceeds the threshold it doubles, capped at `max_capacity`.
#[derive(Debug)]
pub struct AutoScalingManager {
    capacity: Mutex<u32>,
    max_capacity: u32,
    threshold: Decimal,
}

impl Default for AutoScalingManager {
    fn default() -> Self {
        Self::new(100, 10_000, dec!(0.8))
    }
}

impl AutoScalingManager {
    pub fn new(initial_capacity: u32, max_capacity: u32, threshold: Decimal) -> Self {
        Self {
            capacity: Mutex::new(initial_capacity.min(max_capacity)),
            max_capacity,
            threshold,
        }
    }

    pub fn capacity(&self) -> u32 {
        *self.capacity.lock()
    }

    pub fn monitor<R: Rng + ?Sized>(&self, rng: &mut R) -> SystemMetrics {
        let current_load = Decimal::new(rng.random_range(30..=90), 2);
        SystemMetrics {
            scaling_needed: current_load > self.threshold,
            current_load,
            cpu_usage: format!("{:.1}%", rng.random_range(20.0..85.0)),
            memory_usage: format!("{:.1}%", rng.random_range(30.0..75.0)),
            api_requests_per_minute: rng.random_range(100..=1500),
            active_users: rng.random_range(50..=800),
        }
    }

    /// Act on one load observation
    pub fn apply<R: Rng + ?Sized>(&self, metrics: &SystemMetrics, rng: &mut R) -> ScalingAction {
        let mut capacity = self.capacity.lock();

        if !metrics.scaling_needed {
            return ScalingAction::Maintain {
                current_capacity: *capacity,
                reason: "Load within normal parameters",
                cost_optimization: "No scaling needed - saving costs",
            };
        }

        let old = *capacity;
        let new = old.saturating_mul(2).min(self.max_capacity);
        *capacity = new;

        if new != old {
            info!("📈 Scaling capacity {} -> {} (load {})", old, new, metrics.current_load);
        }

        ScalingAction::ScaleUp {
            old_capacity: old,
            new_capacity: new,
            reason: "High load detected",
            estimated_cost_increase: format!(
                "€{:.2}/hour",
                Decimal::from(new - old) * dec!(0.05)
            ),
            revenue_protection: format!("€{}/hour", rng.random_range(500..=2000)),
        }
    }

    /// Observe load and react in one step
    pub fn auto_scale<R: Rng + ?Sized>(&self, rng: &mut R) -> ScalingAction {
        let metrics = self.monitor(rng);
        self.apply(&metrics, rng)
    }
}
