//! Online, time-decayed summary of a set of latency samples (spec.md §4.4).

use portspam_timing::Sample;

/// A cluster center plus enough moment information to estimate its radius.
/// `weight == 0.0` means "empty" — the [`Option`]-free stand-in for the
/// source's `cx == -1` sentinel (spec.md §9 design note).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MicroCluster {
    pub center: (f64, f64),
    pub variance: (f64, f64),
    pub weight: f64,
    pub point_number: u64,
    pub lambda: f64,
    pub decay_factor: f64,
    pub creation_time: u64,
}

impl MicroCluster {
    pub fn new(lambda: f64, creation_time: u64) -> Self {
        Self {
            center: (0.0, 0.0),
            variance: (0.0, 0.0),
            weight: 0.0,
            point_number: 0,
            lambda,
            decay_factor: 2f64.powf(-lambda),
            creation_time,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.weight == 0.0
    }

    /// Folds `s` into the cluster's decayed moments (spec.md §4.4).
    pub fn insert_sample(&mut self, s: Sample) {
        if self.weight == 0.0 {
            self.center = (s.x, s.y);
            self.weight = 1.0;
            self.point_number = 1;
            return;
        }

        let w = 1.0;
        let w0 = self.weight;
        let w1 = w0 * self.decay_factor + w;

        let new_cx = self.center.0 + (w / w1) * (s.x - self.center.0);
        let new_cy = self.center.1 + (w / w1) * (s.y - self.center.1);

        let vx = self.variance.0 * ((w1 - w) / w0) + w * (s.x - new_cx) * (s.x - self.center.0);
        let vy = self.variance.1 * ((w1 - w) / w0) + w * (s.y - new_cy) * (s.y - self.center.1);

        self.center = (new_cx, new_cy);
        self.variance = (vx, vy);
        self.weight = w1;
        self.point_number += 1;
    }

    /// `None` when the cluster is empty (weight 0), replacing the source's
    /// `radius() == -1` sentinel.
    pub fn radius(&self) -> Option<f64> {
        if self.weight > 0.0 {
            let rx = (self.variance.0 / self.weight).sqrt();
            let ry = (self.variance.1 / self.weight).sqrt();
            Some(rx.hypot(ry))
        } else {
            None
        }
    }

    /// Re-initializes `self` with `other`'s `lambda`/`creation_time`, then
    /// bulk-copies its moments (spec.md §4.4 `copy`).
    pub fn copy_from(&mut self, other: &MicroCluster) {
        self.lambda = other.lambda;
        self.decay_factor = other.decay_factor;
        self.creation_time = other.creation_time;
        self.center = other.center;
        self.variance = other.variance;
        self.weight = other.weight;
        self.point_number = other.point_number;
    }

    /// Merges `a` and `b` into a new cluster (spec.md §4.4 `merge`).
    pub fn merge(a: &MicroCluster, b: &MicroCluster) -> MicroCluster {
        MicroCluster {
            center: ((a.center.0 + b.center.0) / 2.0, (a.center.1 + b.center.1) / 2.0),
            variance: ((a.variance.0 + b.variance.0) / 2.0, (a.variance.1 + b.variance.1) / 2.0),
            weight: a.weight + b.weight,
            point_number: a.point_number + b.point_number,
            lambda: (a.lambda + b.lambda) / 2.0,
            decay_factor: 2f64.powf(-(a.lambda + b.lambda) / 2.0),
            creation_time: a.creation_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_sample_initializes_an_empty_cluster() {
        let mut mc = MicroCluster::new(0.5, 0);
        mc.insert_sample(Sample { x: 1.0, y: 10.0 });
        assert_eq!(mc.point_number, 1);
        assert_eq!(mc.weight, 1.0);
        assert_eq!(mc.center, (1.0, 10.0));
    }

    #[test]
    fn insert_sample_increments_point_number_and_never_decays_weight_below_previous_decay() {
        let mut mc = MicroCluster::new(0.5, 0);
        mc.insert_sample(Sample { x: 0.0, y: 0.0 });
        let w0 = mc.weight;
        let decay = mc.decay_factor;
        mc.insert_sample(Sample { x: 1.0, y: 1.0 });
        assert_eq!(mc.point_number, 2);
        assert!(mc.weight >= w0 * decay);
    }

    #[test]
    fn radius_is_none_for_an_empty_cluster() {
        let mc = MicroCluster::new(0.5, 0);
        assert_eq!(mc.radius(), None);
    }

    #[test]
    fn radius_is_finite_after_merging_two_nonempty_clusters() {
        let mut a = MicroCluster::new(0.5, 0);
        a.insert_sample(Sample { x: 0.0, y: 0.0 });
        a.insert_sample(Sample { x: 1.0, y: 1.0 });
        let mut b = MicroCluster::new(0.5, 0);
        b.insert_sample(Sample { x: 2.0, y: 2.0 });
        let c = MicroCluster::merge(&a, &b);
        assert!(c.radius().unwrap().is_finite());
        assert_eq!(c.point_number, 3);
    }
}
